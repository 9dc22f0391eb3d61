//! End-to-end user checks against the quote service.
//!
//! Each workflow is a straight sequence of requests that stops at the first
//! failed expectation.

use crate::domain::{NewUser, UserEmail, UserLogin, UserUpdate};
use crate::quote_client::{QuoteClient, QuoteClientError, UserDetails};
use crate::utils::error_chain_fmt;
use secrecy::{ExposeSecret, Secret};

/// A user created on the quote service for the duration of a check.
#[derive(Debug)]
pub struct UserFixture {
    pub login: UserLogin,
    pub email: UserEmail,
    pub password: Secret<String>,
    pub token: Secret<String>,
}

#[derive(thiserror::Error)]
pub enum WorkflowError {
    #[error("Failed to {step}.")]
    Request {
        step: &'static str,
        #[source]
        source: QuoteClientError,
    },
    #[error("`{field}` mismatch: expected `{expected}`, got `{actual}`.")]
    Mismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },
    #[error("The user token is identical to the user's {field}.")]
    IndistinctToken { field: &'static str },
}

impl std::fmt::Debug for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn request_failed(step: &'static str) -> impl FnOnce(QuoteClientError) -> WorkflowError {
    move |source| WorkflowError::Request { step, source }
}

fn ensure_field(field: &'static str, expected: &str, actual: &str) -> Result<(), WorkflowError> {
    if expected == actual {
        Ok(())
    } else {
        Err(WorkflowError::Mismatch {
            field,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

fn ensure_details(
    details: &UserDetails,
    login: &UserLogin,
    email: &UserEmail,
) -> Result<(), WorkflowError> {
    ensure_field("login", login.as_ref(), &details.login)?;
    ensure_field(
        "account_details.email",
        email.as_ref(),
        &details.account_details.email,
    )
}

/// Creates `new_user` and checks the session the service hands back.
#[tracing::instrument(
    name = "Creating a user fixture",
    skip(client, new_user),
    fields(login = %new_user.login)
)]
pub async fn create_user(
    client: &QuoteClient,
    new_user: NewUser,
) -> Result<UserFixture, WorkflowError> {
    let created = client
        .create_user(&new_user)
        .await
        .map_err(request_failed("create the user"))?;
    ensure_field("login", new_user.login.as_ref(), &created.login)?;

    let token = created.token.expose_secret();
    if token == new_user.login.as_ref() {
        return Err(WorkflowError::IndistinctToken { field: "login" });
    }
    if token == new_user.email.as_ref() {
        return Err(WorkflowError::IndistinctToken { field: "email" });
    }

    tracing::info!("User created");
    Ok(UserFixture {
        login: new_user.login,
        email: new_user.email,
        password: new_user.password,
        token: created.token,
    })
}

/// Reads the user back and checks it echoes the fixture's login and email.
#[tracing::instrument(
    name = "Verifying a user read",
    skip(client, fixture),
    fields(login = %fixture.login)
)]
pub async fn verify_read(
    client: &QuoteClient,
    fixture: &UserFixture,
) -> Result<UserDetails, WorkflowError> {
    let details = client
        .get_user(&fixture.login, &fixture.token)
        .await
        .map_err(request_failed("get the user"))?;
    ensure_details(&details, &fixture.login, &fixture.email)?;
    Ok(details)
}

/// Moves the user to `update`'s login and email, then reads it twice at the
/// new path. The old path is left alone.
#[tracing::instrument(
    name = "Verifying a user update",
    skip(client, fixture, update),
    fields(login = %fixture.login, new_login = %update.login)
)]
pub async fn verify_update(
    client: &QuoteClient,
    fixture: UserFixture,
    update: UserUpdate,
) -> Result<UserFixture, WorkflowError> {
    client
        .update_user(&fixture.login, &fixture.token, &update)
        .await
        .map_err(request_failed("update the user"))?;

    let updated = UserFixture {
        login: update.login,
        email: update.email,
        ..fixture
    };

    let first = verify_read(client, &updated).await?;
    let second = verify_read(client, &updated).await?;
    ensure_field("login", &first.login, &second.login)?;
    ensure_field(
        "account_details.email",
        &first.account_details.email,
        &second.account_details.email,
    )?;

    tracing::info!("User updated");
    Ok(updated)
}
