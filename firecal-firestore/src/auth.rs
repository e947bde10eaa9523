//! OAuth2 service-account token exchange.
//!
//! Builds the signed JWT assertion and trades it for a bearer token at the
//! key's `token_uri`. Single-shot: one token per run, no refresh loop.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use firecal_core::error::{ExportError, ExportResult};

use crate::credentials::ServiceAccountKey;

/// OAuth scope covering Firestore reads.
const SCOPE: &str = "https://www.googleapis.com/auth/datastore";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime in seconds (the maximum Google accepts).
const ASSERTION_LIFETIME: i64 = 3600;

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Sign the JWT assertion for the given key.
fn build_assertion(key: &ServiceAccountKey) -> ExportResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| ExportError::Retrieval(format!("Invalid private key: {e}")))?;

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|e| ExportError::Retrieval(format!("Failed to sign token assertion: {e}")))
}

/// Exchange the service-account key for a bearer token.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> ExportResult<String> {
    let assertion = build_assertion(key)?;
    let params = [("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())];

    let response = http
        .post(&key.token_uri)
        .form(&params)
        .send()
        .await
        .map_err(|e| ExportError::Retrieval(format!("Token request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ExportError::Retrieval(format!(
            "Token request failed: HTTP {status} - {body}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| ExportError::Retrieval(format!("Invalid token response: {e}")))?;

    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_private_keys_are_rejected_before_any_request() {
        let key = ServiceAccountKey {
            project_id: Some("demo-project".to_string()),
            client_email: "exporter@demo-project.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };

        let err = build_assertion(&key).unwrap_err();
        assert!(matches!(err, ExportError::Retrieval(_)));
    }
}
