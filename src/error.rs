use std::fmt;

/// Errors produced while turning a WIF key and a message into a signature
///
/// Detail strings describe what was wrong with the input; they never carry
/// the key itself or anything derived from it.
///
/// # Example
/// ```rust
/// use zelid_auth::{sign_message, SigningError};
///
/// match sign_message("hello", "not-a-wif") {
///     Ok(signature) => println!("Signature: {}", signature),
///     Err(SigningError::InvalidKey(msg)) => println!("Bad key: {}", msg),
///     Err(e) => println!("Other error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The WIF string does not decode to a usable private key
    ///
    /// This error occurs when:
    /// - The string is not valid Base58
    /// - The Base58Check checksum does not match
    /// - The payload length is neither 33 nor 34 bytes
    /// - The version byte does not match the network's WIF byte
    /// - The scalar is zero or outside the curve order
    InvalidKey(String),

    /// Digest or signature computation failed unexpectedly
    AlgorithmFailure(String),

    /// A signature could not be parsed, recovered or verified
    ///
    /// Only returned by the verification helpers, never by signing.
    InvalidSignature(String),
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigningError::InvalidKey(msg) => write!(f, "Invalid private key: {msg}"),
            SigningError::AlgorithmFailure(msg) => write!(f, "Signing failed: {msg}"),
            SigningError::InvalidSignature(msg) => write!(f, "Invalid signature: {msg}"),
        }
    }
}

impl std::error::Error for SigningError {}

/// Errors produced by the login handshake against the verification service
///
/// # Example
/// ```rust,no_run
/// use zelid_auth::{AuthClient, AuthConfig, AuthError};
/// use secrecy::SecretString;
///
/// # async fn run() {
/// let client = AuthClient::new(AuthConfig::default()).unwrap();
/// let key = SecretString::new("L1aW4aubDFB7yfras2S1mN3bqg9nwySY8nkoLmJebSLD5BWv3ENZ".to_string());
/// match client.get_auth_header("1ZelId", &key, "phrase").await {
///     Ok(header) => println!("{}", header),
///     Err(AuthError::VerificationFailed { status, .. }) => println!("Rejected: {}", status),
///     Err(AuthError::Timeout) => println!("Service did not answer in time"),
///     Err(e) => println!("Other error: {}", e),
/// }
/// # }
/// ```
#[derive(Debug)]
pub enum AuthError {
    /// The login phrase could not be signed; no request was sent
    SigningFailed(SigningError),

    /// Transport-level failure
    ///
    /// This error occurs when:
    /// - The connection could not be established
    /// - The service answered with a non-2xx status
    /// - The response body is not the expected JSON
    NetworkError(String),

    /// The service did not answer within the configured timeout
    Timeout,

    /// The service answered, but the status was not `"success"`
    VerificationFailed {
        status: String,
        message: Option<String>,
    },

    /// The client configuration is unusable (bad URL, bad timeout value)
    InvalidConfig(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::SigningFailed(e) => write!(f, "Signing the login phrase failed: {e}"),
            AuthError::NetworkError(msg) => write!(f, "Network error: {msg}"),
            AuthError::Timeout => write!(f, "Verification request timed out"),
            AuthError::VerificationFailed {
                status,
                message: Some(message),
            } => write!(f, "Login verification failed ({status}): {message}"),
            AuthError::VerificationFailed {
                status,
                message: None,
            } => write!(f, "Login verification failed with status '{status}'"),
            AuthError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::SigningFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SigningError> for AuthError {
    fn from(e: SigningError) -> Self {
        AuthError::SigningFailed(e)
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AuthError::Timeout
        } else {
            AuthError::NetworkError(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
