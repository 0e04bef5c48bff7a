//! Nation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, NationId};

/// A nation owning a league pyramid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nation {
    pub id: NationId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Nation {
    /// Create a new Nation with a random ID.
    pub fn new(name: String) -> Self {
        Self {
            id: EntityId::random(),
            name,
            created_at: Utc::now(),
        }
    }
}
