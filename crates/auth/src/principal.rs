use serde::{Deserialize, Serialize};

use sponsorship_core::UserId;

use crate::Role;

/// Identity of an authenticated caller, as established by a verified token.
///
/// The id points at the caller's own row in the `USER` table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
