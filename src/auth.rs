use std::fmt;

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::AuthConfig,
    crypto::ecdsa::MessageSignature,
    error::{AuthError, Result},
    signer::Signer,
};

const LOGIN_PHRASE_PATH: &str = "/id/loginphrase";
const VERIFY_LOGIN_PATH: &str = "/id/verifylogin";
const STATUS_SUCCESS: &str = "success";

/// Header value proving control of a ZelID, accepted by the service after a
/// successful `verifylogin`
///
/// Format: `zelid=<id>&signature=<percent-encoded base64>&loginPhrase=<phrase>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AuthHeader {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Assemble the header string for a signed login phrase
///
/// Only the signature is percent-encoded. `zelid` and `login_phrase` are
/// copied verbatim, which is what the verification service expects.
///
/// # Example
/// ```rust
/// use zelid_auth::build_auth_header;
///
/// let header = build_auth_header("u1", "ab+c/d==", "phraseABC");
/// assert_eq!(header.as_str(), "zelid=u1&signature=ab%2Bc%2Fd%3D%3D&loginPhrase=phraseABC");
/// ```
pub fn build_auth_header(zelid: &str, signature_b64: &str, login_phrase: &str) -> AuthHeader {
    AuthHeader(format!(
        "zelid={}&signature={}&loginPhrase={}",
        zelid,
        urlencoding::encode(signature_b64),
        login_phrase
    ))
}

/// Body of `POST /id/verifylogin`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyLoginRequest<'a> {
    login_phrase: &'a str,
    zelid: &'a str,
    signature: &'a str,
}

/// Envelope shared by the service's JSON responses
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Human-readable detail from `data`, either a string or `data.message`
    fn message(&self) -> Option<String> {
        match &self.data {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    }

    fn into_success(self) -> Result<Self> {
        if self.status == STATUS_SUCCESS {
            Ok(self)
        } else {
            let message = self.message();
            Err(AuthError::VerificationFailed {
                status: self.status,
                message,
            })
        }
    }
}

/// Client for the ZelID login handshake
///
/// Each call is independent: the client holds no key material and no
/// per-login state, so one instance can serve concurrent logins.
///
/// # Example
/// ```rust,no_run
/// use zelid_auth::{AuthClient, AuthConfig};
/// use secrecy::SecretString;
///
/// # async fn run() -> zelid_auth::Result<()> {
/// let client = AuthClient::new(AuthConfig::default())?;
/// let key = SecretString::new("L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ".to_string());
///
/// let phrase = client.login_phrase().await?;
/// let header = client.get_auth_header("1ZelIdAddress", &key, &phrase).await?;
/// println!("zelidauth: {}", header);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AuthClient {
    http: Client,
    config: AuthConfig,
    signer: Signer,
}

impl AuthClient {
    /// Create a client for the configured service, signing for Bitcoin mainnet
    ///
    /// # Errors
    /// - `InvalidConfig` - The configuration fails [`AuthConfig::validate`]
    /// - `NetworkError` - The HTTP client could not be built
    pub fn new(config: AuthConfig) -> Result<Self> {
        Self::with_signer(config, Signer::bitcoin())
    }

    pub fn with_signer(config: AuthConfig, signer: Signer) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AuthError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config,
            signer,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Ask the service for a fresh login phrase
    ///
    /// # Errors
    /// - `Timeout` / `NetworkError` - Transport failure or unexpected body
    /// - `VerificationFailed` - The service answered with a non-success status
    pub async fn login_phrase(&self) -> Result<String> {
        let url = self.config.endpoint(LOGIN_PHRASE_PATH);
        debug!(%url, "requesting login phrase");

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "login phrase request failed");
            AuthError::from(e)
        })?;
        let body = read_envelope(response).await?.into_success()?;

        match body.data {
            Some(serde_json::Value::String(phrase)) if !phrase.is_empty() => Ok(phrase),
            _ => Err(AuthError::NetworkError(
                "login phrase response has no phrase".to_string(),
            )),
        }
    }

    /// Submit a signed login phrase to `/id/verifylogin`
    ///
    /// # Errors
    /// - `Timeout` / `NetworkError` - Transport failure or unexpected body
    /// - `VerificationFailed` - `status` was anything but `"success"`
    pub async fn verify_login(
        &self,
        zelid: &str,
        signature: &MessageSignature,
        login_phrase: &str,
    ) -> Result<()> {
        let url = self.config.endpoint(VERIFY_LOGIN_PATH);
        let signature = signature.to_base64();
        let request = VerifyLoginRequest {
            login_phrase,
            zelid,
            signature: &signature,
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, zelid, error = %e, "verifylogin request failed");
                AuthError::from(e)
            })?;

        match read_envelope(response).await?.into_success() {
            Ok(_) => {
                debug!(zelid, "login verified");
                Ok(())
            }
            Err(e) => {
                warn!(zelid, error = %e, "login rejected");
                Err(e)
            }
        }
    }

    /// Sign `login_phrase`, have the service verify it, and return the header
    ///
    /// Signing completes before any request is made; a signing failure
    /// returns `SigningFailed` without touching the network. The header is
    /// only returned once the service reports `"success"`.
    pub async fn get_auth_header(
        &self,
        zelid: &str,
        private_key_wif: &SecretString,
        login_phrase: &str,
    ) -> Result<AuthHeader> {
        let signature = self
            .signer
            .sign(login_phrase, private_key_wif.expose_secret())?;
        let header = build_auth_header(zelid, &signature.to_base64(), login_phrase);

        self.verify_login(zelid, &signature, login_phrase).await?;
        Ok(header)
    }

    /// Fetch a login phrase and complete the handshake in one call
    pub async fn login(&self, zelid: &str, private_key_wif: &SecretString) -> Result<AuthHeader> {
        let phrase = self.login_phrase().await?;
        self.get_auth_header(zelid, private_key_wif, &phrase).await
    }
}

async fn read_envelope(response: Response) -> Result<ApiResponse> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::NetworkError(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.chars().take(200).collect::<String>()
        )));
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::NetworkError(format!("malformed response body: {e}")))
}
