//! Create a staff login for the studio dashboard.
//!
//! Reads `DATABASE_URL`, `STAFF_EMAIL`, `STAFF_PASSWORD`, and optionally
//! `STAFF_NAME` and `STAFF_ROLE` (default `manager`).

use studio_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use studio_core::roles::{is_staff_role, ROLE_MANAGER};
use studio_db::models::profile::CreateProfile;
use studio_db::repositories::ProfileRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "create_staff=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let email = std::env::var("STAFF_EMAIL").expect("STAFF_EMAIL must be set");
    let password = std::env::var("STAFF_PASSWORD").expect("STAFF_PASSWORD must be set");
    let role = std::env::var("STAFF_ROLE").unwrap_or_else(|_| ROLE_MANAGER.to_string());
    assert!(is_staff_role(&role), "STAFF_ROLE must be admin or manager, got '{role}'");
    if let Err(message) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        panic!("{message}");
    }

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = studio_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    studio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let email = email.trim().to_lowercase();
    if ProfileRepo::find_by_email(&pool, &email)
        .await
        .expect("Profile lookup failed")
        .is_some()
    {
        tracing::warn!(%email, "A profile with this email already exists, nothing to do");
        return;
    }

    let profile = ProfileRepo::create(
        &pool,
        &CreateProfile {
            email,
            full_name: std::env::var("STAFF_NAME").ok(),
            company_name: None,
            role,
            password_hash: Some(hash_password(&password).expect("Failed to hash password")),
        },
    )
    .await
    .expect("Failed to create profile");

    tracing::info!(profile_id = %profile.id, email = %profile.email, role = %profile.role, "Staff profile created");
}
