use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Discriminator stored in the `role` column of the shared `USER` table.
///
/// Sponsors, campers and administrators live in the same table; every query
/// scoped to one kind of user must bind the matching variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sponsor,
    Camper,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Sponsor => "sponsor",
            Role::Camper => "camper",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sponsor" => Ok(Role::Sponsor),
            "camper" => Ok(Role::Camper),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_column_values() {
        for role in [Role::Sponsor, Role::Camper, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn rejects_unknown_column_values() {
        assert_eq!("Sponsor".parse::<Role>(), Err(UnknownRole("Sponsor".to_string())));
    }

    #[test]
    fn serde_uses_column_spelling() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), serde_json::json!("admin"));
    }
}
