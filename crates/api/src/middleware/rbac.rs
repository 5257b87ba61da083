//! Role gate for the studio dashboard.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use studio_core::error::CoreError;
use studio_core::roles::is_staff_role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// An [`AuthUser`] whose role is `admin` or `manager`; 403 for anyone else.
///
/// ```ignore
/// async fn list(RequireStaff(user): RequireStaff, State(state): State<AppState>) { .. }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if is_staff_role(&user.role) {
            Ok(RequireStaff(user))
        } else {
            tracing::debug!(user_id = %user.user_id, role = %user.role, "Non-staff token refused");
            Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )))
        }
    }
}
