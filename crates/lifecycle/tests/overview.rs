//! Project overview and its action flags at each lifecycle stage.

mod common;

use common::{harness, Harness};
use rstest::rstest;
use studio_core::status::{PaymentStatus, ProjectStatus};

#[rstest]
#[tokio::test]
async fn actions_follow_the_lifecycle(harness: Harness) {
    let owner = harness.owner.id;
    let project_id = harness.project.id;

    let draft = harness.overview.project_overview(owner, project_id).await.unwrap();
    assert!(draft.actions.create_proposal);
    assert!(!draft.actions.create_contract);
    assert!(draft.proposal.is_none());

    let contract = harness.sign_contract().await;
    harness.store.set_task_count(project_id, 3).unwrap();
    let signed = harness.overview.project_overview(owner, project_id).await.unwrap();
    assert_eq!(signed.project.status, ProjectStatus::InProgress);
    assert!(!signed.actions.create_proposal);
    assert!(!signed.actions.create_contract);
    assert!(signed.actions.pay);
    assert!(signed.actions.manage_tasks);
    assert!(!signed.actions.view_invoice);
    assert_eq!(signed.task_count, 3);

    let started = harness
        .payments
        .create_checkout(owner, project_id, contract.id)
        .await
        .unwrap();
    harness.gateway.mark_paid(&started.session_id, "pi_1").unwrap();
    harness.payments.check_status(&started.session_id).await.unwrap();

    let done = harness.overview.project_overview(owner, project_id).await.unwrap();
    assert_eq!(done.project.status, ProjectStatus::Completed);
    assert_eq!(done.payment.map(|p| p.status), Some(PaymentStatus::Completed));
    assert!(done.invoice.is_some());
    assert!(done.actions.view_invoice);
    assert!(!done.actions.manage_tasks);
}

#[rstest]
#[tokio::test]
async fn status_only_moves_forward(harness: Harness) {
    let owner = harness.owner.id;
    let mut seen = vec![harness.project_now().await.status];

    let client_id = harness.accept_proposal().await;
    seen.push(harness.project_now().await.status);

    let contract = harness
        .contracts
        .create(owner, harness.project.id, None)
        .await
        .unwrap();
    harness.contracts.send(owner, contract.id).await.unwrap();
    let token = client_id.to_string();
    harness
        .contracts
        .sign(contract.id, Some(&token), "Ana Souza", common::SIGNATURE)
        .await
        .unwrap();
    seen.push(harness.project_now().await.status);

    let started = harness
        .payments
        .create_checkout(owner, harness.project.id, contract.id)
        .await
        .unwrap();
    harness.gateway.mark_paid(&started.session_id, "pi_2").unwrap();
    harness.payments.check_status(&started.session_id).await.unwrap();
    harness.payments.check_status(&started.session_id).await.unwrap();
    seen.push(harness.project_now().await.status);

    assert_eq!(
        seen,
        [
            ProjectStatus::Draft,
            ProjectStatus::Accepted,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
        ]
    );
    let ranks: Vec<u8> = seen.iter().map(|s| s.rank().unwrap()).collect();
    assert!(ranks.windows(2).all(|w| w[0] < w[1]));
}
