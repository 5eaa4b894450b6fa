use crate::cache::{fields_cache_key, FieldCache, FIELDS_CACHE_TTL};
use crate::client_error::{ClientError, Result};
use crate::config::{ClientConfig, OAuthCredentials};
use crate::credentials::{CredentialStore, PlainTextCipher, TokenCipher};
use crate::response::{ApiErrorResponse, DescribeResponse, FieldSet, VersionDescriptor};
use crate::token_record::TokenRecord;
use crate::version;
use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Client for the schema endpoints of one CRM integration.
///
/// Every authenticated call that is answered with 401 refreshes the access token once
/// and is re-issued once; a second 401 fails the call.
pub struct Client {
    config: ClientConfig,
    oauth: OAuthCredentials,
    store: Arc<dyn CredentialStore>,
    cache: Arc<dyn FieldCache>,
    cipher: Arc<dyn TokenCipher>,
}

impl Client {
    /// Create a new client. No request is made until a method needs one.
    pub fn new(
        config: ClientConfig,
        oauth: OAuthCredentials,
        store: Arc<dyn CredentialStore>,
        cache: Arc<dyn FieldCache>,
    ) -> Client {
        Client {
            config,
            oauth,
            store,
            cache,
            cipher: Arc::new(PlainTextCipher),
        }
    }

    /// Use `cipher` to decrypt the refresh token and encrypt refreshed access tokens.
    pub fn with_cipher(mut self, cipher: Arc<dyn TokenCipher>) -> Client {
        self.cipher = cipher;
        self
    }
}

impl Client {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the current access token.
    pub fn access_token(&self) -> &str {
        self.config.access_token()
    }

    /// Get an abbreviated version of the access token, safe to log.
    pub fn abbreviated_access_token(&self) -> String {
        let token: Vec<char> = self.config.access_token().chars().collect();

        if token.len() <= 13 {
            return String::from("****");
        }

        let prefix: String = token[..9].iter().collect();
        let suffix: String = token[token.len() - 4..].iter().collect();

        format!("{}..{}", prefix, suffix)
    }
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    grant_type: &'a str,
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

impl Client {
    fn http(&self) -> Result<reqwest::blocking::Client> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout())
            .build()?;

        Ok(client)
    }

    fn send_get(&self, url: &str) -> Result<Response> {
        let response = self
            .http()?
            .get(url)
            .bearer_auth(self.config.access_token())
            .send()?;

        Ok(response)
    }

    /// GET `url` with the bearer token, refreshing and retrying once on 401.
    fn get_authorized<T: DeserializeOwned>(&mut self, url: &str) -> Result<T> {
        let mut response = self.send_get(url)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            log::info!(
                "access token {} rejected for {}, refreshing",
                self.abbreviated_access_token(),
                url
            );

            self.refresh_access_token()?;
            response = self.send_get(url)?;

            if response.status() == StatusCode::UNAUTHORIZED {
                let body = response.text().unwrap_or_default();
                log::warn!("request to {} still unauthorized after token refresh", url);

                return Err(ClientError::AuthenticationFailed(ApiErrorResponse::summarize(&body)));
            }
        }

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            log::warn!("request to {} failed with status {}", url, status);

            return Err(ClientError::RemoteStatus {
                status: status.as_u16(),
                body: ApiErrorResponse::summarize(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Get the newest API version the instance supports, e.g. `"60.0"`.
    pub fn latest_api_version(&mut self) -> Result<String> {
        let url = format!("{}/services/data", self.config.domain());
        let versions: Vec<VersionDescriptor> = self.get_authorized(&url)?;

        match version::latest(&versions) {
            Some(latest) => Ok(latest.to_string()),
            None => Err(ClientError::RemoteUnavailable(String::from(
                "Unable to retrieve API versions.",
            ))),
        }
    }

    /// Look up the newest API version and use it for subsequent describe calls.
    pub fn discover_api_version(&mut self) -> Result<String> {
        let latest = self.latest_api_version()?;

        self.config = self.config.clone().with_api_version(latest.clone());
        log::debug!("using API version {}", latest);

        Ok(latest)
    }

    /// Get the custom and standard fields of the configured object type.
    ///
    /// Results are cached per integration and object type for an hour.
    pub fn fields(&mut self, integration_id: u64) -> Result<FieldSet> {
        let object_type = self.config.object_type().ok_or_else(|| {
            ClientError::InvalidArgument(String::from("object type is not configured"))
        })?;
        let key = fields_cache_key(integration_id, object_type);

        if let Some(fields) = self.cache.get(&key) {
            log::debug!("serving {} from cache", key);
            return Ok(fields);
        }

        let api_version = self
            .config
            .api_version()
            .ok_or_else(|| ClientError::InvalidArgument(String::from("API version is not configured")))?;
        let url = format!(
            "{}/services/data/v{}/sobjects/{}/describe",
            self.config.domain(),
            api_version,
            object_type
        );

        let description: DescribeResponse = self.get_authorized(&url)?;
        let fields: FieldSet = description.fields.into_iter().collect();

        log::debug!(
            "described {}: {} custom, {} default fields",
            object_type,
            fields.custom.len(),
            fields.default.len()
        );
        self.cache.put(&key, fields.clone(), FIELDS_CACHE_TTL);

        Ok(fields)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On success the persisted credential and the client's own token are both updated.
    /// Nothing is changed when the grant fails or no persisted credential matches.
    pub fn refresh_access_token(&mut self) -> Result<String> {
        let refresh_token = self.cipher.decrypt(self.config.refresh_token())?;
        let body = serde_urlencoded::to_string(RefreshGrant {
            grant_type: "refresh_token",
            refresh_token: &refresh_token,
            client_id: &self.oauth.client_id,
            client_secret: &self.oauth.client_secret,
        })?;
        let url = format!("{}/services/oauth2/token", self.config.domain());

        let response = self
            .http()?
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()?;
        let status = response.status();
        let raw_response = response.text()?;

        let record: TokenRecord = match serde_json::from_str(&raw_response) {
            Ok(record) => record,
            Err(_) if !status.is_success() => {
                return Err(ClientError::RemoteStatus {
                    status: status.as_u16(),
                    body: raw_response,
                });
            }
            Err(error) => return Err(error.into()),
        };

        let access_token = match record.usable_access_token() {
            Some(access_token) => access_token.to_string(),
            None => {
                log::warn!("token refresh rejected with status {}", status);
                return Err(ClientError::TokenRefreshFailed(record.failure_reason()));
            }
        };

        let credential = self
            .store
            .find_by_refresh_token(self.config.refresh_token())?
            .ok_or(ClientError::CredentialNotFound)?;
        let sealed = self.cipher.encrypt(&access_token)?;
        self.store.update_access_token(credential.id, &sealed)?;

        self.config = self.config.clone().with_access_token(access_token.clone());
        log::info!(
            "refreshed access token for credential {}: {}",
            credential.id,
            self.abbreviated_access_token()
        );

        Ok(access_token)
    }
}
