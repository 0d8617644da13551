use serde::{Deserialize, Serialize};

const CANONICAL_ID: &str = "test-id";
const CANONICAL_DESCRIPTION: &str = "test-desc";

/// Response body for `GET /query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub description: String,
}

impl Status {
    /// The status this server reports. It never changes between calls.
    pub fn current() -> Self {
        Self {
            id: String::from(CANONICAL_ID),
            description: String::from(CANONICAL_DESCRIPTION),
        }
    }
}
