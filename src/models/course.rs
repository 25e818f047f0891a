use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub instructor: Option<UserRef>,
}

/// Body of `POST /api/courses`.
///
/// There is no `id` field: a client-supplied id is dropped during
/// deserialization and the store assigns one on save. `title` stays optional
/// here so that a missing title is reported by validation rather than as a
/// JSON rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub instructor: Option<UserRef>,
}

impl NewCourse {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
