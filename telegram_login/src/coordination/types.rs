use serde::{Deserialize, Serialize};

/// Response to a successful `start` call of either challenge flow.
///
/// The caller presents `challenge_id` again on verify, within `ttl_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedLogin {
    pub challenge_id: String,
    pub ttl_seconds: i64,
}
