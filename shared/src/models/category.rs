//! Category Model

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
