use crate::client_error::ClientError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default network timeout for API requests, in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// CRM object categories whose schema the client can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Contact,
    Lead,
    Account,
}

impl ObjectType {
    pub const ALL: [ObjectType; 3] = [ObjectType::Contact, ObjectType::Lead, ObjectType::Account];

    /// Name of the object in the remote API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Contact => "Contact",
            ObjectType::Lead => "Lead",
            ObjectType::Account => "Account",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .iter()
            .copied()
            .find(|object_type| object_type.as_str() == value)
            .ok_or_else(|| {
                ClientError::InvalidArgument(format!(
                    "invalid type `{}`. Allowed types are: Contact, Lead, and Account.",
                    value
                ))
            })
    }
}

/// Connection parameters for a single CRM integration.
///
/// The value is immutable: every `with_*` step hands back a new configuration, so a
/// half-configured value is never shared with a running client.
///
/// ```
/// use salesforce_fields::ClientConfig;
///
/// let config = ClientConfig::new("https://example.my.salesforce.com", "access", "refresh")
///     .with_api_version("60.0")
///     .with_object_type("Lead")
///     .unwrap();
///
/// assert_eq!(config.api_version(), Some("60.0"));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    domain: String,
    access_token: String,
    refresh_token: String,
    object_type: Option<ObjectType>,
    api_version: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration from the instance domain and the integration's tokens.
    ///
    /// `refresh_token` is kept in the form it is stored at rest; it is only decrypted when
    /// a refresh actually happens.
    pub fn new(
        domain: impl Into<String>,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> ClientConfig {
        let domain = domain.into().trim_end_matches('/').to_string();

        ClientConfig {
            domain,
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            object_type: None,
            api_version: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }

    /// Set the API version used for describe calls, e.g. `"60.0"`. The format is not checked.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> ClientConfig {
        self.api_version = Some(api_version.into());
        self
    }

    /// Set the object type by its API name. Only `Contact`, `Lead` and `Account` are accepted.
    pub fn with_object_type(self, object_type: &str) -> Result<ClientConfig, ClientError> {
        let object_type = object_type.parse()?;

        Ok(self.with_object(object_type))
    }

    pub fn with_object(mut self, object_type: ObjectType) -> ClientConfig {
        self.object_type = Some(object_type);
        self
    }

    /// Set the timeout applied to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> ClientConfig {
        self.timeout = timeout;
        self
    }

    pub(crate) fn with_access_token(mut self, access_token: String) -> ClientConfig {
        self.access_token = access_token;
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn object_type(&self) -> Option<ObjectType> {
        self.object_type
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Credentials of the connected app used for the refresh-token grant.
///
/// These are handed to the client explicitly; they can be deserialized from whatever
/// configuration source the enclosing application uses.
#[derive(Clone, Deserialize)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl OAuthCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> OAuthCredentials {
        OAuthCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// Keep the secret out of debug output and logs.
impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
