//! RoleGate client - walkthrough against the in-memory backend.
//!
//! Signs up an admin with a logo, signs out, signs back in and logs the view
//! selected at each step.

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolegate_client::config::{load_dotenv_from_repo_root, ClientConfig};
use rolegate_client::use_cases::session::SignUpRequest;
use rolegate_client::use_cases::AuthState;
use rolegate_client::App;
use rolegate_domain::{LogoFile, Role};

const STEP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rolegate_client=debug,rolegate_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RoleGate client");

    let config = ClientConfig::from_env();
    tracing::info!(
        logo_prefix = %config.logo_prefix,
        blob_base_url = %config.blob_base_url,
        request_timeout_ms = ?config.request_timeout.map(|t| t.as_millis()),
        "Configuration loaded"
    );

    let (app, _backend) = App::in_memory(config);
    let listener = app.start();
    let mut state = app.session.watch();

    wait_until(&mut state, "initial session", |s| !s.loading_initial_session).await?;
    tracing::info!(view = app.view().name(), "Ready");

    let logo =
        LogoFile::new("acme.png", vec![0x89, 0x50, 0x4e, 0x47])?.with_content_type("image/png");
    let request = SignUpRequest::new("owner@acme.test", "correct-horse", Role::Admin)
        .with_name("Acme")
        .with_logo(logo);
    let profile = app
        .session
        .sign_up(request)
        .await
        .context("sign-up failed")?;
    tracing::info!(role = %profile.role, logo = ?profile.logo_url, "Signed up");
    wait_until(&mut state, "admin home", |s| {
        s.is_authenticated() && s.role() == Some(Role::Admin)
    })
    .await?;
    tracing::info!(view = app.view().name(), "After sign-up");

    app.session.sign_out().await?;
    wait_until(&mut state, "sign-out", |s| !s.is_authenticated()).await?;
    tracing::info!(view = app.view().name(), "After sign-out");

    app.session.set_has_account(true);
    app.session.set_email("owner@acme.test");
    app.session.set_password("correct-horse");
    app.session.submit().await.context("sign-in failed")?;
    wait_until(&mut state, "profile restore", |s| s.role().is_some()).await?;
    tracing::info!(view = app.view().name(), "After sign-in");

    listener.shutdown();
    tracing::info!("Done");
    Ok(())
}

async fn wait_until(
    state: &mut tokio::sync::watch::Receiver<AuthState>,
    step: &str,
    predicate: impl FnMut(&AuthState) -> bool,
) -> anyhow::Result<()> {
    tokio::time::timeout(STEP_TIMEOUT, state.wait_for(predicate))
        .await
        .with_context(|| format!("timed out waiting for {step}"))?
        .with_context(|| format!("state channel closed waiting for {step}"))?;
    Ok(())
}
