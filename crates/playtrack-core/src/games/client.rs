//! HTTP client for the remote stats backend.
//!
//! The backend is an opaque JSON service. Responses come in one of two
//! envelopes -- `{ "data": {...} }` or `{ "success": bool, "data": {...} }` --
//! and this client unwraps either. No auth headers, no retries; a timeout
//! is the only protection against a stuck request.

use serde_json::Value;
use url::Url;

use crate::error::ApiError;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Blocking JSON client over a private tokio runtime.
///
/// The core API is synchronous; callers don't need an ambient runtime.
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    rt: tokio::runtime::Runtime,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Runtime(e.to_string()))?;
        Ok(Self { base, http, rt })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// GET `path` and unwrap the response envelope.
    pub fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        tracing::debug!(%url, "stats backend request");

        let body: Value = self.rt.block_on(async {
            let resp = self.http.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(ApiError::Http {
                    status: status.as_u16(),
                });
            }
            Ok::<_, ApiError>(resp.json().await?)
        })?;

        unwrap_envelope(body)
    }
}

/// Unwrap `{ data }` / `{ success, data }` envelopes. A bare payload is
/// passed through; `success: false` is a rejection.
pub fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    let Some(obj) = body.as_object() else {
        return Ok(body);
    };

    if let Some(success) = obj.get("success").and_then(Value::as_bool) {
        if !success {
            let message = obj
                .get("error")
                .or_else(|| obj.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("request unsuccessful")
                .to_string();
            return Err(ApiError::Rejected(message));
        }
    }

    match obj.get("data") {
        Some(data) => Ok(data.clone()),
        None => Ok(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_plain_data_envelope() {
        let v = unwrap_envelope(json!({"data": {"wins": 3}})).unwrap();
        assert_eq!(v["wins"], 3);
    }

    #[test]
    fn unwraps_success_envelope() {
        let v = unwrap_envelope(json!({"success": true, "data": {"wins": 3}})).unwrap();
        assert_eq!(v["wins"], 3);
    }

    #[test]
    fn success_false_is_rejected() {
        let err = unwrap_envelope(json!({"success": false, "error": "no such player"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "no such player"));
    }

    #[test]
    fn bare_payload_passes_through() {
        let v = unwrap_envelope(json!({"wins": 3})).unwrap();
        assert_eq!(v["wins"], 3);
    }

    #[test]
    fn fetches_and_unwraps_over_http() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/dota2/profile/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"profile": {"personaname": "dendi"}}}"#)
            .create();

        let client = ApiClient::new(&server.url()).unwrap();
        let v = client.get_json("/dota2/profile/42").unwrap();
        assert_eq!(v["profile"]["personaname"], "dendi");
        mock.assert();
    }

    #[test]
    fn http_error_surfaces_status() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/osrs/hiscores/nobody")
            .with_status(404)
            .create();

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.get_json("/osrs/hiscores/nobody").unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404 }));
    }
}
