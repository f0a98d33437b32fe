//! Initial load, sign-out, revocation and logo replacement.

use std::time::Duration;

use rolegate_domain::Role;

use crate::config::ClientConfig;
use crate::infrastructure::ports::CredentialStore;
use crate::use_cases::session::{SignUpRequest, WorkflowError};
use crate::view::View;

use super::{blob_url, logo, TestClient};

#[tokio::test]
async fn loading_clears_once_without_a_session() {
    let mut client = TestClient::new();
    assert!(client.snapshot().loading_initial_session);
    assert_eq!(client.app.view(), View::Loading);

    client.start();
    let state = client
        .wait_for("initial check", |s| !s.loading_initial_session)
        .await;
    assert!(state.session.is_none());

    client
        .workflow()
        .sign_up(SignUpRequest::new("a@x.test", "secret123", Role::Admin))
        .await
        .unwrap();
    client.wait_for_session().await;
    assert!(!client.snapshot().loading_initial_session);
}

#[tokio::test]
async fn loading_clears_once_with_an_existing_session() {
    let mut client = TestClient::new();
    let existing = client
        .backend
        .credentials
        .register("a@x.test", "secret123")
        .await
        .unwrap();

    client.start();
    let state = client
        .wait_for("initial check", |s| !s.loading_initial_session)
        .await;

    assert_eq!(state.session.map(|s| s.user_id), Some(existing.user_id));
}

#[tokio::test]
async fn session_without_profile_document_has_no_role() {
    let mut client = TestClient::new();
    client
        .backend
        .credentials
        .register("orphan@x.test", "secret123")
        .await
        .unwrap();

    client.start();
    let state = client
        .wait_for("initial check", |s| !s.loading_initial_session)
        .await;

    assert!(state.is_authenticated());
    assert_eq!(state.role(), None);
    assert_eq!(state.role_label(), "");
    assert_eq!(client.app.view(), View::ProfileIncomplete);
}

#[tokio::test]
async fn sign_out_without_session_is_a_no_op() {
    let client = TestClient::started().await;

    client.workflow().sign_out().await.unwrap();

    let state = client.snapshot();
    assert!(state.session.is_none());
    assert_eq!(state.role_label(), "");
}

#[tokio::test]
async fn sign_out_returns_to_sign_in_view() {
    let mut client = TestClient::started().await;
    client
        .workflow()
        .sign_up(SignUpRequest::new("a@x.test", "secret123", Role::Student).with_name("Ann"))
        .await
        .unwrap();
    client
        .wait_for("student role", |s| {
            s.is_authenticated() && s.role() == Some(Role::Student)
        })
        .await;

    client.workflow().sign_out().await.unwrap();

    let state = client.wait_for_signed_out().await;
    assert_eq!(state.role(), None);
    assert!(matches!(client.app.view(), View::SignIn(_)));
}

#[tokio::test]
async fn server_side_revocation_signs_the_client_out() {
    let mut client = TestClient::started().await;
    client
        .workflow()
        .sign_up(SignUpRequest::new("a@x.test", "secret123", Role::Admin))
        .await
        .unwrap();
    client.wait_for_session().await;

    client.backend.credentials.revoke();

    let state = client.wait_for_signed_out().await;
    assert!(state.profile.is_none());
}

#[tokio::test]
async fn logo_upload_updates_document_and_view() {
    let mut client = TestClient::started().await;
    client
        .workflow()
        .sign_up(SignUpRequest::new("owner@acme.test", "secret123", Role::Admin).with_name("Acme"))
        .await
        .unwrap();
    let user_id = client.wait_for_session().await;

    let profile = client
        .workflow()
        .upload_logo(logo("new.png"))
        .await
        .unwrap();

    assert_eq!(profile.logo_url, Some(blob_url("logos/new.png")));
    let stored = client.backend.profiles.raw(&user_id).unwrap();
    assert_eq!(stored["companyName"], "Acme");
    assert_eq!(stored["companyLogo"], blob_url("logos/new.png"));
    match client.app.view() {
        View::AdminHome(card) => assert_eq!(card.logo_url, Some(blob_url("logos/new.png"))),
        other => panic!("expected admin home, got {other:?}"),
    }
}

#[tokio::test]
async fn logo_upload_requires_a_session() {
    let client = TestClient::started().await;

    let result = client.workflow().upload_logo(logo("x.png")).await;

    assert!(matches!(result, Err(WorkflowError::NoSession)));
    assert!(client.backend.blobs.is_empty());
}

#[tokio::test]
async fn custom_logo_prefix_is_used() {
    let mut client = TestClient::with_config(ClientConfig {
        logo_prefix: "avatars".into(),
        request_timeout: Some(Duration::from_secs(1)),
        ..ClientConfig::default()
    });
    client.start();

    client
        .workflow()
        .sign_up(
            SignUpRequest::new("ann@school.test", "secret123", Role::Student)
                .with_logo(logo("ann.png")),
        )
        .await
        .unwrap();

    let user_id = client.wait_for_session().await;
    assert!(client.backend.blobs.get("avatars/ann.png").is_some());
    assert_eq!(
        client.backend.profiles.raw(&user_id).unwrap()["studentLogo"],
        blob_url("avatars/ann.png")
    );
}
