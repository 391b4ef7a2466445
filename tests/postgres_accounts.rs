//! Account store and signup flow against a real Postgres container.
//! Skipped when no container runtime is available.

mod common;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION},
    },
};
use common::TestDb;
use std::sync::Arc;
use tower::ServiceExt;
use typoreporter::{
    api::{
        self,
        handlers::signup::{MessageSource, SignupConfig, SignupState},
    },
    store::{AccountRepository, NewAccount, PgAccountRepository, SaveOutcome, VerificationType},
};
use url::form_urlencoded;

fn new_account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        verification_type: VerificationType::Email,
    }
}

#[tokio::test]
async fn save_find_and_count() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let accounts = PgAccountRepository::new(db.pool.clone());

    assert_eq!(accounts.count().await?, 0);
    accounts.ping().await?;

    let outcome = accounts
        .save(new_account("ada", "ada@example.com"))
        .await?;
    let created = match outcome {
        SaveOutcome::Created(account) => account,
        SaveOutcome::Duplicate => anyhow::bail!("expected a new account"),
    };

    let found = accounts
        .find_by_email("ada@example.com")
        .await?
        .context("account found")?;
    assert_eq!(found, created);
    assert_eq!(found.verification_type, VerificationType::Email);
    assert_eq!(accounts.count().await?, 1);

    assert!(accounts.find_by_email("nobody@example.com").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn unique_index_ignores_email_case() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let accounts = PgAccountRepository::new(db.pool.clone());

    let first = accounts.save(new_account("first", "case@example.com")).await?;
    assert!(matches!(first, SaveOutcome::Created(_)));

    let second = accounts.save(new_account("second", "CASE@example.com")).await?;
    assert!(matches!(second, SaveOutcome::Duplicate));
    assert_eq!(accounts.count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn concurrent_saves_create_one_account() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let accounts = PgAccountRepository::new(db.pool.clone());

    let (one, two) = tokio::join!(
        accounts.save(new_account("one", "race@example.com")),
        accounts.save(new_account("two", "race@example.com")),
    );
    let outcomes = [one?, two?];
    let created = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, SaveOutcome::Created(_)))
        .count();

    assert_eq!(created, 1);
    assert_eq!(accounts.count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn schema_can_be_applied_twice() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };

    typoreporter::store::apply_schema(&db.pool).await?;

    Ok(())
}

#[tokio::test]
async fn signup_flow_stores_lowercase_email_once() -> Result<()> {
    let Ok(db) = TestDb::new().await else {
        return Ok(());
    };
    let accounts = Arc::new(PgAccountRepository::new(db.pool.clone()));
    let state = SignupState::new(
        SignupConfig::new(),
        accounts.clone(),
        MessageSource::builtin()?,
    );
    let app = api::app(Arc::new(state));

    let submit = |username: &'static str, email: &'static str, password: &'static str| {
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs([
                ("username", username),
                ("email", email),
                ("password", password),
                ("confirmPassword", password),
                ("_csrf", "token"),
            ])
            .finish();
        Request::post("/signup")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(COOKIE, "XSRF-TOKEN=token")
            .body(Body::from(body))
    };

    let response = app
        .clone()
        .oneshot(submit(
            "model_upper_case",
            "EMAIL_ADDRESS@GOOGLE.COM",
            "password",
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
        Some("/")
    );
    assert_eq!(accounts.count().await?, 1);
    assert!(accounts
        .find_by_email("EMAIL_ADDRESS@GOOGLE.COM")
        .await?
        .is_none());
    let stored = accounts
        .find_by_email("email_address@google.com")
        .await?
        .context("canonical email stored")?;
    assert_eq!(stored.username, "model_upper_case");

    let response = app
        .clone()
        .oneshot(submit(
            "model_lower_case",
            "email_address@google.com",
            "different-password",
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(accounts.count().await?, 1);

    let response = app
        .oneshot(submit("no_tld", "test@test", "password")?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(accounts.find_by_email("test@test").await?.is_none());
    assert_eq!(accounts.count().await?, 1);

    Ok(())
}
