//! Authenticated session as reported by the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::value_objects::Email;

/// Authenticated identity handle.
///
/// Owned by the credential store; the client only observes it through the
/// store's change subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: Email,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: UserId, email: Email, signed_in_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email,
            signed_in_at,
        }
    }
}
