use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The fields of a Google service-account key file we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(blob: &str) -> Result<Self, String> {
        serde_json::from_str(blob).map_err(|e| format!("Invalid service account credentials: {e}"))
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, now: DateTime<Utc>) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: key.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        }
    }
}

/// Sign the RS256 assertion exchanged for an access token.
pub fn encode_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String, String> {
    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| format!("Invalid service account private key: {e}"))?;

    encode(
        &Header::new(Algorithm::RS256),
        &AssertionClaims::new(key, now),
        &signing_key,
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub async fn fetch_access_token(
    client: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String, String> {
    let assertion = encode_assertion(key, Utc::now())?;

    let resp = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await
        .map_err(|e| format!("Token request failed: {e}"))?;

    let status = resp.status();
    if !status.is_success() {
        let body = truncated_body(resp).await;
        return Err(format!("Token request returned {status}: {body}"));
    }

    resp.json::<TokenResponse>()
        .await
        .map(|t| t.access_token)
        .map_err(|e| format!("Invalid token response: {e}"))
}

pub(crate) async fn truncated_body(resp: reqwest::Response) -> String {
    resp.text()
        .await
        .unwrap_or_default()
        .chars()
        .take(1024)
        .collect()
}
