use crate::domain::{NewUser, UserLogin, UserUpdate};
use crate::utils::error_chain_fmt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;

/// Header carrying the per-user session token.
pub const USER_TOKEN_HEADER: &str = "User-Token";

#[derive(Clone, Debug)]
pub struct QuoteClient {
    base_url: String,
    http_client: Client,
    api_key: Secret<String>,
}

#[derive(serde::Serialize)]
struct UserEnvelope<T> {
    user: T,
}

#[derive(serde::Serialize)]
struct CreateUserRequest<'a> {
    login: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(serde::Serialize)]
struct UpdateUserRequest<'a> {
    login: &'a str,
    email: &'a str,
}

#[derive(serde::Deserialize)]
struct CreateUserResponse {
    #[serde(rename = "User-Token")]
    user_token: Option<String>,
    login: Option<String>,
}

// Failures the service reports inside a 200 body
#[derive(serde::Deserialize)]
struct ServiceErrorBody {
    error_code: i64,
    #[serde(default)]
    message: String,
}

/// Session issued by the quote service for a freshly created user.
#[derive(Debug)]
pub struct CreatedUser {
    /// Login as echoed back by the service.
    pub login: String,
    pub token: Secret<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct UserDetails {
    pub login: String,
    pub account_details: AccountDetails,
    #[serde(default)]
    pub pic_url: Option<String>,
    #[serde(default)]
    pub public_favorites_count: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub pro: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct AccountDetails {
    pub email: String,
    #[serde(default)]
    pub private_favorites_count: Option<u64>,
}

#[derive(thiserror::Error)]
pub enum QuoteClientError {
    #[error("Failed to complete the request to the quote service.")]
    Transport(#[from] reqwest::Error),
    #[error("The quote service answered with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("The quote service reported error {code} ({message}): {body}")]
    Service {
        code: i64,
        message: String,
        body: String,
    },
    #[error("The response has no `{field}`: {body}")]
    MissingField { field: &'static str, body: String },
    #[error("The response body does not have the expected shape: {body}")]
    InvalidBody {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl std::fmt::Debug for QuoteClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl QuoteClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http_client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(
                AUTHORIZATION,
                format!("Token token=\"{}\"", self.api_key.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/json")
    }

    fn user_url(&self, login: &UserLogin) -> String {
        format!("{}/users/{}", self.base_url, login.as_ref())
    }

    #[tracing::instrument(
        name = "Creating a quote service user",
        skip(self, new_user),
        fields(login = %new_user.login)
    )]
    pub async fn create_user(&self, new_user: &NewUser) -> Result<CreatedUser, QuoteClientError> {
        let url = format!("{}/users", self.base_url);
        let request_body = UserEnvelope {
            user: CreateUserRequest {
                login: new_user.login.as_ref(),
                email: new_user.email.as_ref(),
                password: new_user.password.expose_secret(),
            },
        };
        let response = self
            .authorized(self.http_client.post(&url))
            .json(&request_body)
            .send()
            .await?;
        let body = success_body(response).await?;
        let created: CreateUserResponse = decode(&body)?;

        let token = created
            .user_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| QuoteClientError::MissingField {
                field: USER_TOKEN_HEADER,
                body: body.clone(),
            })?;
        let login = created
            .login
            .ok_or(QuoteClientError::MissingField {
                field: "login",
                body,
            })?;

        Ok(CreatedUser {
            login,
            token: Secret::new(token),
        })
    }

    #[tracing::instrument(name = "Fetching a quote service user", skip(self, token))]
    pub async fn get_user(
        &self,
        login: &UserLogin,
        token: &Secret<String>,
    ) -> Result<UserDetails, QuoteClientError> {
        let response = self
            .authorized(self.http_client.get(self.user_url(login)))
            .header(USER_TOKEN_HEADER, token.expose_secret())
            .send()
            .await?;
        let body = success_body(response).await?;
        decode(&body)
    }

    #[tracing::instrument(
        name = "Updating a quote service user",
        skip(self, token, update),
        fields(new_login = %update.login)
    )]
    pub async fn update_user(
        &self,
        login: &UserLogin,
        token: &Secret<String>,
        update: &UserUpdate,
    ) -> Result<(), QuoteClientError> {
        let request_body = UserEnvelope {
            user: UpdateUserRequest {
                login: update.login.as_ref(),
                email: update.email.as_ref(),
            },
        };
        let response = self
            .authorized(self.http_client.put(self.user_url(login)))
            .header(USER_TOKEN_HEADER, token.expose_secret())
            .json(&request_body)
            .send()
            .await?;
        success_body(response).await?;
        Ok(())
    }
}

// Anything but a 200 carrying no `error_code` is a failure.
async fn success_body(response: Response) -> Result<String, QuoteClientError> {
    let status = response.status();
    let body = response.text().await?;
    if status != StatusCode::OK {
        tracing::error!(%status, %body, "Unexpected status from the quote service");
        return Err(QuoteClientError::UnexpectedStatus { status, body });
    }
    if let Ok(error) = serde_json::from_str::<ServiceErrorBody>(&body) {
        tracing::error!(code = error.error_code, %body, "The quote service reported an error");
        return Err(QuoteClientError::Service {
            code: error.error_code,
            message: error.message,
            body,
        });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, QuoteClientError> {
    serde_json::from_str(body).map_err(|source| QuoteClientError::InvalidBody {
        source,
        body: body.to_string(),
    })
}
