//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// The principal is resolved by an external auth collaborator before the
/// core is invoked; the context only carries the stable owner identifier
/// every operation is scoped by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated principal's stable identifier.
    pub owner_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for a principal.
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            request_time: Utc::now(),
        }
    }
}
