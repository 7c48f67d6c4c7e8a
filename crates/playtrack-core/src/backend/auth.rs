//! Email/password authentication against the hosted backend.

use serde_json::{json, Value};
use url::Url;

use crate::error::{ApiError, AuthError, CoreError, Result};

use super::BackendSession;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Auth client for the backend-as-a-service.
pub struct AuthClient {
    base: Url,
    http: reqwest::Client,
    rt: tokio::runtime::Runtime,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CoreError::Api(ApiError::InvalidUrl(e.to_string())))?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CoreError::Api(e.into()))?;
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CoreError::Api(ApiError::Runtime(e.to_string())))?;
        Ok(Self { base, http, rt })
    }

    /// Create an account and store the returned session.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<BackendSession> {
        self.authenticate("auth/signup", email, password)
    }

    /// Log in and store the returned session.
    pub fn log_in(&self, email: &str, password: &str) -> Result<BackendSession> {
        self.authenticate("auth/login", email, password)
    }

    /// Drop the stored session.
    pub fn log_out(&self) -> Result<()> {
        BackendSession::clear()?;
        Ok(())
    }

    fn authenticate(&self, path: &str, email: &str, password: &str) -> Result<BackendSession> {
        let url = self
            .base
            .join(path)
            .map_err(|e| CoreError::Api(ApiError::InvalidUrl(e.to_string())))?;
        tracing::debug!(%url, "backend auth request");

        let body: Value = self
            .rt
            .block_on(async {
                let resp = self
                    .http
                    .post(url)
                    .json(&json!({"email": email, "password": password}))
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(ApiError::Http {
                        status: status.as_u16(),
                    });
                }
                Ok::<_, ApiError>(resp.json().await?)
            })
            .map_err(|e| match e {
                ApiError::Http { status } if status == 401 || status == 403 => {
                    CoreError::Auth(AuthError::CredentialsRejected(format!("HTTP {status}")))
                }
                other => CoreError::Api(other),
            })?;

        // Some deployments wrap the payload in a data envelope.
        let payload = body.get("data").unwrap_or(&body);
        let token = payload["token"].as_str().unwrap_or_default();
        let user_id = payload["user_id"].as_str().unwrap_or_default();
        if token.is_empty() || user_id.is_empty() {
            return Err(AuthError::BadResponse("missing token or user_id".into()).into());
        }

        let session = BackendSession {
            token: token.to_string(),
            user_id: user_id.to_string(),
            email: email.to_string(),
        };
        session.save()?;
        Ok(session)
    }
}
