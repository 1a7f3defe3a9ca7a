//! REST client for the external auth provider.
//!
//! The provider is a hosted GoTrue-style service: password sign-in,
//! email sign-up with a redirect target, token-scoped sign-out. Every
//! call carries the project `apikey` header; authenticated calls add a
//! bearer token. Session persistence is the caller's business; this
//! client only exchanges credentials for sessions.

use serde::{Deserialize, Serialize};

use quizmaker_core::types::UserId;

/// Where the auth provider lives and which project key to present.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider base URL, e.g. `https://project.supabase.co`.
    pub url: String,
    /// Project anon key, sent as the `apikey` header.
    pub anon_key: String,
}

/// HTTP client for the auth provider.
pub struct AuthClient {
    client: reqwest::Client,
    config: AuthConfig,
}

/// Errors from the auth boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected the call.
    #[error("{message}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// The provider's own message where one was given.
        message: String,
    },
}

/// The signed-in user as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// A live session: bearer token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    email: &'a str,
}

/// Failure body shapes the provider uses, depending on the endpoint.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AuthClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange email/password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let endpoint = format!("{}/auth/v1/token?grant_type=password", self.config.url);
        let response = self
            .client
            .post(&endpoint)
            .header("apikey", &self.config.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Register a new user. The provider sends a confirmation email
    /// pointing at `redirect_to`.
    ///
    /// Depending on project settings the returned session may lack an
    /// access token until the email is confirmed.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<Session, AuthError> {
        let endpoint = format!(
            "{}/auth/v1/signup?redirect_to={}",
            self.config.url, redirect_to
        );
        let response = self
            .client
            .post(&endpoint)
            .header("apikey", &self.config.anon_key)
            .json(&SignUpRequest { email, password })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Resend the signup confirmation email for an unconfirmed account.
    pub async fn resend_verification_email(&self, email: &str) -> Result<(), AuthError> {
        let endpoint = format!("{}/auth/v1/resend", self.config.url);
        let response = self
            .client
            .post(&endpoint)
            .header("apikey", &self.config.anon_key)
            .json(&ResendRequest {
                kind: "signup",
                email,
            })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let endpoint = format!("{}/auth/v1/logout", self.config.url);
        let response = self
            .client
            .post(&endpoint)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Fetch the user behind an access token (session validity check).
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let endpoint = format!("{}/auth/v1/user", self.config.url);
        let response = self
            .client
            .get(&endpoint)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider {
                status: status.as_u16(),
                message: provider_message(status.as_u16(), &body),
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AuthError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Pick the most specific message out of a provider failure body.
fn provider_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ProviderErrorBody>(body) {
        for candidate in [parsed.error_description, parsed.msg, parsed.message] {
            if let Some(message) = candidate {
                if !message.is_empty() {
                    return message;
                }
            }
        }
    }
    format!("Authentication failed: {status}")
}
