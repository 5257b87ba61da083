//! Stripe credentials loaded from the environment.

/// Default REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Configuration for the Stripe client.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (`sk_live_...` / `sk_test_...`).
    pub secret_key: String,
    /// Base URL without a trailing slash. Overridable for tests.
    pub api_base: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `STRIPE_SECRET_KEY` is not set, in which case
    /// checkout endpoints report the provider as unavailable.
    ///
    /// | Variable            | Required | Default                  |
    /// |---------------------|----------|--------------------------|
    /// | `STRIPE_SECRET_KEY` | yes      | -                        |
    /// | `STRIPE_API_BASE`   | no       | `https://api.stripe.com` |
    pub fn from_env() -> Option<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let api_base =
            std::env::var("STRIPE_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Some(Self::new(secret_key, api_base))
    }

    pub fn new(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = StripeConfig::new("sk_test_1", "http://localhost:12111/");
        assert_eq!(config.api_base, "http://localhost:12111");
    }
}
