use crate::deliverable::{Deliverable, TaskStatus};
use serde::{Deserialize, Serialize};

/// A milestone card on the roadmap timeline, owning its deliverables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapCard {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
}

impl RoadmapCard {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            icon_name: None,
            deliverables: Vec::new(),
        }
    }
}
