use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::compat;

/// Monthly spending limit for one expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(deserialize_with = "compat::record_id")]
    pub id: Uuid,
    pub category: String,
    #[serde(deserialize_with = "compat::amount")]
    pub limit: f64,
}

impl Goal {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub category: String,
    pub limit: f64,
}
