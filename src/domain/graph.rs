//! Prerequisite graph for courses
//!
//! Owns the course records and the directed prerequisite edges between them,
//! with cycle rejection, topological ordering and gap-free renumbering on
//! delete. Uses petgraph for graph operations.

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::course::Course;
use super::id::{CourseId, SeqId};

/// A prerequisite graph over courses
///
/// Edges point from a course to each of its prerequisites. Insertion order
/// is tracked separately so listings stay stable and deletes can renumber
/// the courses that came after.
#[derive(Debug, Default)]
pub struct CourseGraph {
    /// Course records keyed by ID
    courses: HashMap<CourseId, Course>,

    /// The underlying directed graph
    graph: DiGraph<CourseId, ()>,

    /// Map from CourseId to node index
    node_map: HashMap<CourseId, NodeIndex>,

    /// IDs in the order courses were added
    insertion_order: Vec<CourseId>,
}

impl CourseGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course, keyed by its ID
    ///
    /// Returns false and leaves the graph untouched when the ID is already
    /// present.
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(&course.id) {
            return false;
        }

        let idx = self.graph.add_node(course.id.clone());
        self.node_map.insert(course.id.clone(), idx);
        self.insertion_order.push(course.id.clone());
        self.courses.insert(course.id.clone(), course);
        true
    }

    /// Removes a course and every prerequisite edge touching it
    pub fn remove_course(&mut self, id: &CourseId) -> bool {
        if let Some(idx) = self.node_map.remove(id) {
            self.graph.remove_node(idx);
            // Note: petgraph may reuse indices, so we need to rebuild the map
            self.rebuild_node_map();
            self.courses.remove(id);
            self.insertion_order.retain(|c| c != id);
            true
        } else {
            false
        }
    }

    /// Removes a course and closes the numbering gap it leaves
    ///
    /// Every course with the removed course's prefix and a higher sequence
    /// number is renamed one down; IDs that do not parse as
    /// `{prefix}{number}` are left alone, and removing such an ID shifts
    /// nothing. Returns the (old, new) pairs in ascending sequence order so
    /// callers can rewrite references.
    pub fn remove_course_and_shift(&mut self, id: &CourseId) -> Vec<(CourseId, CourseId)> {
        let mut mapping = Vec::new();

        if !self.contains(id) {
            return mapping;
        }
        let victim = id.seq();

        self.remove_course(id);

        let victim = match victim {
            Some(victim) => victim,
            None => return mapping,
        };

        // Ascending order, so each rename lands in a slot the previous one
        // (or the removal itself) just vacated
        let mut to_rename: Vec<SeqId> = self
            .insertion_order
            .iter()
            .filter_map(|c| c.seq())
            .filter(|seq| seq.prefix() == victim.prefix() && seq.sequence() > victim.sequence())
            .collect();
        to_rename.sort_by_key(|seq| seq.sequence());

        for seq in to_rename {
            let old = CourseId::from(seq.clone());
            let new = CourseId::from(seq.shifted_down());
            self.rename_course(&old, new.clone());
            mapping.push((old, new));
        }

        mapping
    }

    /// Rewrites a course ID everywhere it appears: the course record, the
    /// node weight (edges follow the node), the node map and the insertion
    /// order.
    fn rename_course(&mut self, old: &CourseId, new: CourseId) {
        let idx = match self.node_map.remove(old) {
            Some(idx) => idx,
            None => return,
        };

        if let Some(weight) = self.graph.node_weight_mut(idx) {
            *weight = new.clone();
        }
        self.node_map.insert(new.clone(), idx);

        if let Some(mut course) = self.courses.remove(old) {
            course.id = new.clone();
            self.courses.insert(new.clone(), course);
        }

        if let Some(slot) = self.insertion_order.iter_mut().find(|c| *c == old) {
            *slot = new;
        }
    }

    /// Rebuilds the node map after removal
    fn rebuild_node_map(&mut self) {
        self.node_map.clear();
        for idx in self.graph.node_indices() {
            if let Some(course_id) = self.graph.node_weight(idx) {
                self.node_map.insert(course_id.clone(), idx);
            }
        }
    }

    /// Updates a course's title and description in place
    ///
    /// The ID and all prerequisite edges are untouched. Returns false when
    /// the course is unknown.
    pub fn update_course(
        &mut self,
        id: &CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> bool {
        match self.courses.get_mut(id) {
            Some(course) => {
                course.title = title.into();
                course.description = description.into();
                true
            }
            None => false,
        }
    }

    /// Adds a prerequisite edge: `course` requires `prereq` first
    ///
    /// Returns false when either course is unknown or when the edge would
    /// create a cycle; a rejected edge leaves the graph exactly as it was.
    /// Adding an edge that already exists is a successful no-op.
    pub fn add_prerequisite(&mut self, course: &CourseId, prereq: &CourseId) -> bool {
        let course_idx = match self.node_map.get(course) {
            Some(idx) => *idx,
            None => return false,
        };
        let prereq_idx = match self.node_map.get(prereq) {
            Some(idx) => *idx,
            None => return false,
        };

        if self.graph.find_edge(course_idx, prereq_idx).is_some() {
            return true;
        }

        // Add edge: course -> prereq
        let edge = self.graph.add_edge(course_idx, prereq_idx, ());

        // Check for cycles
        if is_cyclic_directed(&self.graph) {
            // Remove the edge we just added
            self.graph.remove_edge(edge);
            return false;
        }

        true
    }

    /// Removes a prerequisite edge
    pub fn remove_prerequisite(&mut self, course: &CourseId, prereq: &CourseId) -> bool {
        let course_idx = match self.node_map.get(course) {
            Some(idx) => *idx,
            None => return false,
        };
        let prereq_idx = match self.node_map.get(prereq) {
            Some(idx) => *idx,
            None => return false,
        };

        if let Some(edge) = self.graph.find_edge(course_idx, prereq_idx) {
            self.graph.remove_edge(edge);
            true
        } else {
            false
        }
    }

    /// Returns the direct prerequisites of a course
    pub fn prerequisites(&self, id: &CourseId) -> Vec<&Course> {
        let idx = match self.node_map.get(id) {
            Some(idx) => *idx,
            None => return vec![],
        };

        let mut prereqs: Vec<&Course> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n))
            .filter_map(|course_id| self.courses.get(course_id))
            .collect();
        // petgraph walks edges newest first; present oldest first
        prereqs.reverse();
        prereqs
    }

    /// Returns true if the prerequisite relation contains a cycle
    ///
    /// `add_prerequisite` keeps this false; it can only turn true if edges
    /// arrive by some other route.
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns all courses so that every course appears before its
    /// prerequisites
    ///
    /// Falls back to insertion order in the degenerate case where a cycle
    /// is present and no such order exists.
    pub fn topological_order(&self) -> Vec<&Course> {
        match toposort(&self.graph, None) {
            Ok(order) => order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx))
                .filter_map(|course_id| self.courses.get(course_id))
                .collect(),
            Err(_) => self.list_all(),
        }
    }

    /// Returns all courses in the order they were added
    pub fn list_all(&self) -> Vec<&Course> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.courses.get(id))
            .collect()
    }

    /// Looks up a course by ID
    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Returns true if the graph contains the course
    pub fn contains(&self, id: &CourseId) -> bool {
        self.courses.contains_key(id)
    }

    /// Returns the number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns true if there are no courses
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
