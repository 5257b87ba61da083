//! Request and response shapes for the checkout session endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Parameters for opening an embedded checkout session with one line item.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Price in the smallest currency unit.
    pub unit_amount: i64,
    /// ISO currency code, lowercase.
    pub currency: String,
    pub product_name: String,
    pub product_description: Option<String>,
    pub customer_email: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl CheckoutRequest {
    /// Encode as the form fields the Stripe API expects.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = vec![
            ("ui_mode".into(), "embedded".into()),
            ("redirect_on_completion".into(), "never".into()),
            ("mode".into(), "payment".into()),
            (
                "line_items[0][price_data][currency]".into(),
                self.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                self.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                self.unit_amount.to_string(),
            ),
            ("line_items[0][quantity]".into(), "1".into()),
        ];
        // Stripe rejects an empty description.
        if let Some(description) = self
            .product_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            fields.push((
                "line_items[0][price_data][product_data][description]".into(),
                description.to_string(),
            ));
        }
        if let Some(email) = &self.customer_email {
            fields.push(("customer_email".into(), email.clone()));
        }
        for (key, value) in &self.metadata {
            fields.push((format!("metadata[{key}]"), value.clone()));
        }
        fields
    }
}

/// A freshly created checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Secret the embedded checkout widget is mounted with.
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
}

/// Payment state of an existing checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionStatus {
    pub id: String,
    /// `open`, `complete` or `expired`.
    pub status: Option<String>,
    /// `paid`, `unpaid` or `no_payment_required`.
    pub payment_status: String,
    pub payment_intent: Option<String>,
    pub customer_email: Option<String>,
    pub customer_details: Option<CustomerDetails>,
}

impl SessionStatus {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    /// Email entered at checkout, falling back to the prefilled one.
    pub fn email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|d| d.email.as_deref())
            .or(self.customer_email.as_deref())
    }
}
