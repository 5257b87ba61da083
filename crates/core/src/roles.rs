//! Well-known role name constants.
//!
//! These must match the `chk_profiles_role` constraint in the profiles migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_CLIENT: &str = "client";

/// Staff roles may own projects and drive the lifecycle from the studio side.
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}
