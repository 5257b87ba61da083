//! Contract drafting, sending and signature.

mod common;

use assert_matches::assert_matches;
use common::{harness, Harness, BASE_URL, SIGNATURE};
use rstest::rstest;
use studio_core::error::CoreError;
use studio_core::status::{ContractStatus, ProjectStatus};
use studio_lifecycle::LifecycleError;

#[rstest]
#[tokio::test]
async fn contract_requires_accepted_proposal(harness: Harness) {
    let early = harness
        .contracts
        .create(harness.owner.id, harness.project.id, None)
        .await;
    assert_matches!(early, Err(LifecycleError::Core(CoreError::Conflict(_))));

    harness.send_proposal().await;
    let still_early = harness
        .contracts
        .create(harness.owner.id, harness.project.id, None)
        .await;
    assert_matches!(still_early, Err(LifecycleError::Core(CoreError::Conflict(_))));
}

#[rstest]
#[tokio::test]
async fn default_contract_names_the_client(harness: Harness) {
    harness.accept_proposal().await;
    let contract = harness
        .contracts
        .create(harness.owner.id, harness.project.id, None)
        .await
        .unwrap();

    assert_eq!(contract.status, ContractStatus::Draft);
    assert!(contract.content.contains("Email: c@x.com"));
    assert!(contract.content.contains("R$ 1.234,56"));

    let second = harness
        .contracts
        .create(harness.owner.id, harness.project.id, Some("Other".into()))
        .await;
    assert_matches!(second, Err(LifecycleError::Core(CoreError::Conflict(_))));
}

#[rstest]
#[tokio::test]
async fn send_returns_sign_link_and_freezes_content(harness: Harness) {
    let client_id = harness.accept_proposal().await;
    let contract = harness
        .contracts
        .create(harness.owner.id, harness.project.id, Some("Terms".into()))
        .await
        .unwrap();
    let updated = harness
        .contracts
        .update(harness.owner.id, contract.id, "Better terms")
        .await
        .unwrap();
    assert_eq!(updated.content, "Better terms");

    let sent = harness
        .contracts
        .send(harness.owner.id, contract.id)
        .await
        .unwrap();
    assert_eq!(sent.contract.status, ContractStatus::Sent);
    assert_eq!(
        sent.link,
        format!("{BASE_URL}/contracts/{}/sign?token={client_id}", contract.id)
    );

    let edit = harness
        .contracts
        .update(harness.owner.id, contract.id, "Sneaky change")
        .await;
    assert_matches!(edit, Err(LifecycleError::Core(CoreError::Conflict(_))));
}

#[rstest]
#[tokio::test]
async fn signing_starts_the_project(harness: Harness) {
    let (contract, client_id) = harness.send_contract().await;
    let token = client_id.to_string();

    let view = harness.contracts.view(contract.id, Some(&token)).await.unwrap();
    assert!(view.can_sign);

    let signed = harness
        .contracts
        .sign(contract.id, Some(&token), "  Ana Souza ", SIGNATURE)
        .await
        .unwrap();
    assert_eq!(signed.contract.status, ContractStatus::Signed);
    assert_eq!(signed.contract.signer_name.as_deref(), Some("Ana Souza"));
    assert_eq!(signed.contract.signature_data.as_deref(), Some(SIGNATURE));
    assert_eq!(signed.contract.signed_at, Some(common::now()));
    assert_eq!(signed.project.status, ProjectStatus::InProgress);

    let twice = harness
        .contracts
        .sign(contract.id, Some(&token), "Ana Souza", SIGNATURE)
        .await;
    assert_matches!(twice, Err(LifecycleError::Core(CoreError::Conflict(_))));
}

#[rstest]
#[case(Some(""))]
#[case(None)]
#[tokio::test]
async fn signing_rejects_bad_tokens(harness: Harness, #[case] token: Option<&str>) {
    let (contract, _) = harness.send_contract().await;
    let result = harness
        .contracts
        .sign(contract.id, token, "Ana Souza", SIGNATURE)
        .await;
    assert_matches!(result, Err(LifecycleError::Core(CoreError::Forbidden(_))));
    assert_eq!(harness.project_now().await.status, ProjectStatus::Accepted);
}

#[rstest]
#[case("", SIGNATURE)]
#[case("Ana Souza", "")]
#[case("Ana Souza", "data:image/jpeg;base64,AAAA")]
#[tokio::test]
async fn signing_validates_name_and_image(
    harness: Harness,
    #[case] name: &str,
    #[case] image: &str,
) {
    let (contract, client_id) = harness.send_contract().await;
    let token = client_id.to_string();
    let result = harness
        .contracts
        .sign(contract.id, Some(&token), name, image)
        .await;
    assert_matches!(result, Err(LifecycleError::Core(CoreError::Validation(_))));

    let contract = harness.contracts.get(harness.owner.id, contract.id).await.unwrap();
    assert_eq!(contract.status, ContractStatus::Sent);
}

#[rstest]
#[tokio::test]
async fn draft_contract_cannot_be_signed(harness: Harness) {
    let client_id = harness.accept_proposal().await;
    let contract = harness
        .contracts
        .create(harness.owner.id, harness.project.id, None)
        .await
        .unwrap();
    let token = client_id.to_string();

    let view = harness.contracts.view(contract.id, Some(&token)).await.unwrap();
    assert!(!view.can_sign);
    let result = harness
        .contracts
        .sign(contract.id, Some(&token), "Ana Souza", SIGNATURE)
        .await;
    assert_matches!(result, Err(LifecycleError::Core(CoreError::Conflict(_))));
}
