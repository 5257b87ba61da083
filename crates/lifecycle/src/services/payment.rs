//! Checkout initiation and pull-based payment reconciliation.

use std::collections::BTreeMap;
use std::sync::Arc;

use studio_core::billing::{amount_cents, invoice_number, CHECKOUT_CURRENCY};
use studio_core::error::CoreError;
use studio_core::lifecycle::{ensure, next_state, LifecycleEvent};
use studio_core::status::{ContractStatus, ProjectStatus};
use studio_core::types::DbId;
use studio_db::models::lifecycle::{PaymentSettlement, ProjectTransition, SettlementOutcome};
use studio_db::models::invoice::Invoice;
use studio_db::models::payment::{CreatePayment, Payment};
use studio_events::PlatformEvent;
use studio_payments::CheckoutRequest;

use crate::context::LifecycleContext;
use crate::error::LifecycleResult;
use crate::ports::{GatewayError, PaymentGateway};
use crate::views::{CheckoutStarted, CheckoutStatus};

/// Opens checkout sessions and settles them once the provider reports them
/// paid.
#[derive(Clone)]
pub struct PaymentService {
    ctx: LifecycleContext,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(ctx: LifecycleContext, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { ctx, gateway }
    }

    /// Open an embedded checkout for the project's total value and record a
    /// pending payment against it.
    ///
    /// Refused unless the project is `in_progress` with a signed contract
    /// and no completed payment. Abandoned pending sessions do not block a
    /// new one.
    pub async fn create_checkout(
        &self,
        actor: DbId,
        project_id: DbId,
        contract_id: DbId,
    ) -> LifecycleResult<CheckoutStarted> {
        let project = self.ctx.owned_project(project_id, actor).await?;
        let total_value = project.total_value.ok_or_else(|| {
            CoreError::Validation("Project has no total value to charge".into())
        })?;
        let unit_amount = amount_cents(total_value)?;

        let contract = self
            .ctx
            .store
            .find_contract(contract_id)
            .await?
            .filter(|c| c.project_id == project.id)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Contract {contract_id} does not belong to project {project_id}"
                ))
            })?;
        ensure(contract.status == ContractStatus::Signed, || {
            "The contract must be signed before payment".to_string()
        })?;

        ensure(project.status == ProjectStatus::InProgress, || {
            format!("Project in status '{}' is not awaiting payment", project.status)
        })?;
        // Earlier sessions may still be pending; only a settled one blocks.
        let paid = self.ctx.store.find_completed_payment(project.id).await?;
        ensure(paid.is_none(), || "Project has already been paid".to_string())?;

        let customer_email = match project.client_id {
            Some(client_id) => self
                .ctx
                .store
                .find_profile(client_id)
                .await?
                .map(|client| client.email),
            None => None,
        };

        let request = CheckoutRequest {
            unit_amount,
            currency: CHECKOUT_CURRENCY.to_string(),
            product_name: format!("Project: {}", project.title),
            product_description: Some(project.description.clone()),
            customer_email,
            metadata: BTreeMap::from([
                ("project_id".to_string(), project.id.to_string()),
                ("contract_id".to_string(), contract.id.to_string()),
            ]),
        };
        let session = self.gateway.create_checkout(&request).await?;
        let client_secret = session.client_secret.ok_or_else(|| {
            GatewayError::Unreachable("Checkout session has no client secret".into())
        })?;

        let payment = self
            .ctx
            .store
            .insert_payment(&CreatePayment {
                project_id: project.id,
                contract_id: Some(contract.id),
                amount: total_value,
                stripe_session_id: session.id.clone(),
            })
            .await?;

        tracing::info!(
            payment_id = %payment.id,
            project_id = %project.id,
            session_id = %session.id,
            amount_cents = unit_amount,
            "Checkout session opened",
        );
        Ok(CheckoutStarted {
            payment,
            session_id: session.id,
            client_secret,
        })
    }

    /// Reconcile a checkout session with the provider.
    ///
    /// The first call that sees the session paid completes the payment,
    /// issues a paid invoice and completes the project. Later calls write
    /// nothing and report the recorded state.
    pub async fn check_status(&self, session_id: &str) -> LifecycleResult<CheckoutStatus> {
        let payment = self
            .ctx
            .store
            .find_payment_by_session(session_id)
            .await?
            .ok_or_else(|| CoreError::NotFoundBy {
                entity: "Payment",
                field: "session id",
                value: session_id.to_string(),
            })?;

        let session = self.gateway.retrieve_session(session_id).await?;
        let customer_email = session.email().map(str::to_string);

        let (payment, invoice) = if session.is_paid() && payment.status.can_settle() {
            self.settle(payment, session.payment_intent.clone()).await?
        } else {
            let invoice = self.ctx.store.find_invoice_for_payment(payment.id).await?;
            (payment, invoice)
        };

        Ok(CheckoutStatus {
            status: session.status,
            payment_status: session.payment_status,
            customer_email,
            payment,
            invoice,
        })
    }

    async fn settle(
        &self,
        payment: Payment,
        payment_intent_id: Option<String>,
    ) -> LifecycleResult<(Payment, Option<Invoice>)> {
        let project = self.ctx.project(payment.project_id).await?;
        let transition = match next_state(project.status, LifecycleEvent::PaymentCompleted) {
            Ok(next) => Some(ProjectTransition {
                expected: project.status,
                next,
            }),
            Err(rejected) => {
                tracing::warn!(
                    project_id = %project.id,
                    payment_id = %payment.id,
                    error = %rejected,
                    "Recording payment without completing the project",
                );
                None
            }
        };

        let now = self.ctx.now();
        let outcome = self
            .ctx
            .store
            .settle_payment(&PaymentSettlement {
                payment_id: payment.id,
                project_id: project.id,
                payment_intent_id,
                paid_at: now,
                invoice_number: invoice_number(project.id, now),
                issue_date: now.date_naive(),
                transition,
            })
            .await?;

        match outcome {
            SettlementOutcome::Settled {
                payment,
                invoice,
                project_completed,
            } => {
                tracing::info!(
                    payment_id = %payment.id,
                    project_id = %project.id,
                    invoice_number = %invoice.invoice_number,
                    project_completed,
                    "Payment settled",
                );
                self.ctx.publish(
                    PlatformEvent::lifecycle(LifecycleEvent::PaymentCompleted, project.id)
                        .with_source("payment", payment.id)
                        .with_payload(serde_json::json!({
                            "invoice_id": invoice.id,
                            "invoice_number": invoice.invoice_number,
                            "project_completed": project_completed,
                        })),
                );
                Ok((payment, Some(invoice)))
            }
            SettlementOutcome::AlreadySettled => {
                tracing::debug!(payment_id = %payment.id, "Payment already settled");
                let session_id = payment.stripe_session_id.clone().unwrap_or_default();
                let payment = self
                    .ctx
                    .store
                    .find_payment_by_session(&session_id)
                    .await?
                    .unwrap_or(payment);
                let invoice = self.ctx.store.find_invoice_for_payment(payment.id).await?;
                Ok((payment, invoice))
            }
        }
    }
}
