//! `sponsorship-auth`: authentication and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to validate tokens, hash passwords and decide whether a principal may
//! mutate a resource, but never how requests arrive or rows are written.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod password;
pub mod principal;
pub mod roles;

pub use authorize::{authorize_owner_or_admin, AuthzError};
pub use claims::{validate_claims, JwtClaims, TokenValidationError};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use password::{PasswordError, PasswordHasher};
pub use principal::Principal;
pub use roles::{Role, UnknownRole};
