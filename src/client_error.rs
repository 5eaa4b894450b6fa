/// Various errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A configuration value was rejected, or a value needed by the call was never configured.
    #[error("{0}")]
    InvalidArgument(String),

    /// The service still rejected the request after the access token was refreshed once.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request never produced a response (connection, TLS, timeout, ...).
    #[error("request failed: {0}")]
    RemoteTransport(#[from] reqwest::Error),

    /// The service answered with a non-success status other than a recoverable 401.
    #[error("remote service responded with status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// The service answered, but had nothing usable to offer.
    #[error("{0}")]
    RemoteUnavailable(String),

    /// No persisted credential matches the client's refresh token.
    #[error("token not found in the credential store")]
    CredentialNotFound,

    /// The OAuth grant response did not carry an access token.
    #[error("failed to refresh the access token: {0}")]
    TokenRefreshFailed(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error("token cipher error: {0}")]
    Cipher(String),
}

impl ClientError {
    /// True for any failure talking to the remote service that is not an authorization problem.
    pub fn is_remote_transport(&self) -> bool {
        match self {
            ClientError::RemoteTransport(_) | ClientError::RemoteStatus { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
