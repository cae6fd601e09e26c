//! Course domain model

use serde::{Deserialize, Serialize};

use super::id::CourseId;

/// A course of study
///
/// Courses are nodes in the prerequisite graph; tasks reference them by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: CourseId,

    /// Human-readable title
    pub title: String,

    /// Optional longer description
    #[serde(default)]
    pub description: String,
}

impl Course {
    /// Creates a new course
    pub fn new(id: CourseId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_construction() {
        let id: CourseId = "C1".parse().unwrap();
        let course = Course::new(id.clone(), "Algorithms", "Sorting and graphs");

        assert_eq!(course.id, id);
        assert_eq!(course.title, "Algorithms");
        assert_eq!(course.description, "Sorting and graphs");
    }

    #[test]
    fn serde_defaults_missing_description() {
        let json = r#"{"id":"C1","title":"Algorithms"}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert!(course.description.is_empty());
    }
}
