//! Multi-row lifecycle writes.
//!
//! Every method runs in a single transaction and guards each row with a
//! compare-and-set on its current status. A guard that matches no row rolls
//! the transaction back and the method reports the miss as `None` (or
//! [`SettlementOutcome::AlreadySettled`]), so concurrent requests cannot
//! both apply the same transition.

use sqlx::{PgConnection, PgPool};
use studio_core::roles::ROLE_CLIENT;
use studio_core::status::{ContractStatus, InvoiceStatus, PaymentStatus, ProposalStatus};
use studio_core::types::DbId;

use crate::models::contract::Contract;
use crate::models::invoice::Invoice;
use crate::models::lifecycle::{
    AnsweredProposal, ContractSignature, PaymentSettlement, ProjectTransition, ProposalResponse,
    ProposalSend, ProposalSent, SettlementOutcome, SignedContract,
};
use crate::models::payment::Payment;
use crate::models::profile::Profile;
use crate::models::project::Project;
use crate::models::proposal::Proposal;

use super::{contract_repo, invoice_repo, payment_repo, profile_repo, project_repo, proposal_repo};

/// Transactional lifecycle writes spanning a document and its project.
pub struct LifecycleRepo;

impl LifecycleRepo {
    /// Send a draft proposal: resolve or create the client profile, bind it
    /// to the project, and move both rows forward.
    pub async fn send_proposal(
        pool: &PgPool,
        input: &ProposalSend,
    ) -> Result<Option<ProposalSent>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (client, client_created) = find_or_create_client(&mut tx, &input.client_email).await?;

        let Some(project) =
            transition_project(&mut tx, input.project_id, input.transition, Some(client.id))
                .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let query = format!(
            "UPDATE proposals SET status = $2, sent_at = $3, updated_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING {}",
            proposal_repo::COLUMNS
        );
        let Some(proposal) = sqlx::query_as::<_, Proposal>(&query)
            .bind(input.proposal_id)
            .bind(ProposalStatus::Sent.as_str())
            .bind(input.sent_at)
            .bind(ProposalStatus::Draft.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some(ProposalSent {
            proposal,
            project,
            client,
            client_created,
        }))
    }

    /// Record the client's answer on an open proposal and move the project.
    pub async fn answer_proposal(
        pool: &PgPool,
        input: &ProposalResponse,
    ) -> Result<Option<AnsweredProposal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE proposals SET status = $2, responded_at = $3, updated_at = NOW()
             WHERE id = $1 AND status IN ($4, $5)
             RETURNING {}",
            proposal_repo::COLUMNS
        );
        let Some(proposal) = sqlx::query_as::<_, Proposal>(&query)
            .bind(input.proposal_id)
            .bind(input.status.as_str())
            .bind(input.responded_at)
            .bind(ProposalStatus::Draft.as_str())
            .bind(ProposalStatus::Sent.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let Some(project) =
            transition_project(&mut tx, input.project_id, input.transition, None).await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some(AnsweredProposal { proposal, project }))
    }

    /// Sign a sent contract and start the project.
    pub async fn sign_contract(
        pool: &PgPool,
        input: &ContractSignature,
    ) -> Result<Option<SignedContract>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE contracts SET
                status = $2, signed_at = $3, signature_data = $4, signer_name = $5,
                updated_at = NOW()
             WHERE id = $1 AND status = $6
             RETURNING {}",
            contract_repo::COLUMNS
        );
        let Some(contract) = sqlx::query_as::<_, Contract>(&query)
            .bind(input.contract_id)
            .bind(ContractStatus::Signed.as_str())
            .bind(input.signed_at)
            .bind(&input.signature_data)
            .bind(&input.signer_name)
            .bind(ContractStatus::Sent.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        let Some(project) =
            transition_project(&mut tx, input.project_id, input.transition, None).await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some(SignedContract { contract, project }))
    }

    /// Complete a pending payment, issue its paid invoice and complete the
    /// project.
    ///
    /// The payment guard makes this idempotent: once a payment is
    /// `completed`, later calls write nothing. A missed project guard does
    /// not undo the payment or invoice.
    pub async fn settle_payment(
        pool: &PgPool,
        input: &PaymentSettlement,
    ) -> Result<SettlementOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE payments SET
                status = $2, paid_at = $3,
                stripe_payment_intent_id = COALESCE($4, stripe_payment_intent_id),
                updated_at = NOW()
             WHERE id = $1 AND status IN ($5, $6)
             RETURNING {}",
            payment_repo::COLUMNS
        );
        let Some(payment) = sqlx::query_as::<_, Payment>(&query)
            .bind(input.payment_id)
            .bind(PaymentStatus::Completed.as_str())
            .bind(input.paid_at)
            .bind(&input.payment_intent_id)
            .bind(PaymentStatus::Pending.as_str())
            .bind(PaymentStatus::Processing.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(SettlementOutcome::AlreadySettled);
        };

        let query = format!(
            "INSERT INTO invoices
                (project_id, payment_id, invoice_number, amount, issue_date, due_date, status)
             VALUES ($1, $2, $3, $4, $5, $5, $6)
             RETURNING {}",
            invoice_repo::COLUMNS
        );
        let invoice = sqlx::query_as::<_, Invoice>(&query)
            .bind(input.project_id)
            .bind(payment.id)
            .bind(&input.invoice_number)
            .bind(payment.amount)
            .bind(input.issue_date)
            .bind(InvoiceStatus::Paid.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let project_completed = match input.transition {
            Some(transition) => {
                let moved =
                    transition_project(&mut tx, input.project_id, transition, None).await?;
                if moved.is_none() {
                    tracing::warn!(
                        project_id = %input.project_id,
                        payment_id = %payment.id,
                        expected = %transition.expected,
                        "Project status changed before settlement, left as is",
                    );
                }
                moved.is_some()
            }
            None => false,
        };

        tx.commit().await?;
        Ok(SettlementOutcome::Settled {
            payment,
            invoice,
            project_completed,
        })
    }
}

/// Resolve a profile by email, creating a `client` profile when none exists.
async fn find_or_create_client(
    conn: &mut PgConnection,
    email: &str,
) -> Result<(Profile, bool), sqlx::Error> {
    let query = format!(
        "INSERT INTO profiles (email, role) VALUES ($1, $2)
         ON CONFLICT ((LOWER(email))) DO NOTHING
         RETURNING {}",
        profile_repo::COLUMNS
    );
    let created = sqlx::query_as::<_, Profile>(&query)
        .bind(email)
        .bind(ROLE_CLIENT)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(profile) = created {
        return Ok((profile, true));
    }

    let query = format!(
        "SELECT {} FROM profiles WHERE LOWER(email) = LOWER($1)",
        profile_repo::COLUMNS
    );
    let existing = sqlx::query_as::<_, Profile>(&query)
        .bind(email)
        .fetch_one(&mut *conn)
        .await?;
    Ok((existing, false))
}

/// Apply a project status compare-and-set, optionally binding the client.
async fn transition_project(
    conn: &mut PgConnection,
    project_id: DbId,
    transition: ProjectTransition,
    client_id: Option<DbId>,
) -> Result<Option<Project>, sqlx::Error> {
    let query = format!(
        "UPDATE projects SET
            status = $2, client_id = COALESCE($3, client_id), updated_at = NOW()
         WHERE id = $1 AND status = $4
         RETURNING {}",
        project_repo::COLUMNS
    );
    sqlx::query_as::<_, Project>(&query)
        .bind(project_id)
        .bind(transition.next.as_str())
        .bind(client_id)
        .bind(transition.expected.as_str())
        .fetch_optional(&mut *conn)
        .await
}
