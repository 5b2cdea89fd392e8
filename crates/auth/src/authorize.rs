//! Authorization policy for mutating user-owned resources.
//!
//! The rule is deliberately small: a principal may mutate a resource it owns,
//! and administrators may mutate anything. Data-access code consults this
//! before it builds any write statement.

use thiserror::Error;

use sponsorship_core::UserId;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: user {principal} may not {action} resources owned by user {owner}")]
    Forbidden {
        principal: UserId,
        owner: UserId,
        action: &'static str,
    },
}

/// Allow when `principal` is `owner` or holds the admin role.
///
/// - No IO
/// - No panics
pub fn authorize_owner_or_admin(
    principal: &Principal,
    owner: UserId,
    action: &'static str,
) -> Result<(), AuthzError> {
    if principal.user_id == owner || principal.is_admin() {
        return Ok(());
    }

    tracing::debug!(
        principal = %principal.user_id,
        role = %principal.role,
        owner = %owner,
        action,
        "authorization denied"
    );
    Err(AuthzError::Forbidden {
        principal: principal.user_id,
        owner,
        action,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Role;

    #[test]
    fn owner_is_allowed() {
        let p = Principal::new(UserId::from_raw(5), Role::Sponsor);
        assert_eq!(authorize_owner_or_admin(&p, UserId::from_raw(5), "update"), Ok(()));
    }

    #[test]
    fn admin_is_allowed_on_foreign_rows() {
        let p = Principal::new(UserId::from_raw(1), Role::Admin);
        assert_eq!(authorize_owner_or_admin(&p, UserId::from_raw(99), "update"), Ok(()));
    }

    #[test]
    fn stranger_is_forbidden() {
        let p = Principal::new(UserId::from_raw(2), Role::Camper);
        let err = authorize_owner_or_admin(&p, UserId::from_raw(3), "update").unwrap_err();
        assert_eq!(
            err,
            AuthzError::Forbidden {
                principal: UserId::from_raw(2),
                owner: UserId::from_raw(3),
                action: "update",
            }
        );
    }

    proptest! {
        /// Property: a non-admin principal is allowed exactly when it owns the row.
        #[test]
        fn non_admins_only_touch_their_own_rows(
            principal in 1i64..10_000,
            owner in 1i64..10_000,
            sponsor in any::<bool>(),
        ) {
            let role = if sponsor { Role::Sponsor } else { Role::Camper };
            let p = Principal::new(UserId::from_raw(principal), role);
            let result = authorize_owner_or_admin(&p, UserId::from_raw(owner), "update");
            prop_assert_eq!(result.is_ok(), principal == owner);
        }
    }
}
