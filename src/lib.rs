//! # salesforce-fields
//!
//! Library to read field metadata from the Salesforce REST API on behalf of a stored
//! integration.
//!
//! The client discovers the newest API version, describes the `Contact`, `Lead` or `Account`
//! object, and splits its fields into custom and standard ones. Expired access tokens are
//! refreshed once per call through the OAuth refresh-token grant, and the refreshed token is
//! written back to the application's credential store. Described fields are cached per
//! integration for an hour.
//!
//! ### Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use salesforce_fields::{
//!     Client, ClientConfig, CredentialRecord, MemoryCredentialStore, MemoryFieldCache,
//!     OAuthCredentials,
//! };
//!
//! let store = Arc::new(MemoryCredentialStore::new());
//! store.insert(CredentialRecord {
//!     id: 1,
//!     access_token: String::from("YOUR_ACCESS_TOKEN"),
//!     refresh_token: String::from("YOUR_REFRESH_TOKEN"),
//! });
//!
//! let config = ClientConfig::new(
//!     "https://example.my.salesforce.com",
//!     "YOUR_ACCESS_TOKEN",
//!     "YOUR_REFRESH_TOKEN",
//! )
//! .with_object_type("Contact")
//! .unwrap();
//!
//! let mut client = Client::new(
//!     config,
//!     OAuthCredentials::new("YOUR_CLIENT_ID", "YOUR_CLIENT_SECRET"),
//!     store,
//!     Arc::new(MemoryFieldCache::new()),
//! );
//!
//! client.discover_api_version().unwrap();
//! let fields = client.fields(1).unwrap();
//!
//! for (name, label) in &fields.custom {
//!     println!("{}: {}", name, label);
//! }
//! ```

extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate serde_urlencoded;

pub mod cache;
mod client_error;
mod client;
mod config;
mod credentials;
pub mod response;
mod token_record;
mod version;

pub use cache::{FieldCache, MemoryFieldCache, FIELDS_CACHE_TTL};
pub use client::Client;
pub use client_error::{ClientError, Result};
pub use config::{ClientConfig, OAuthCredentials, ObjectType, DEFAULT_TIMEOUT};
pub use credentials::{
    CredentialRecord, CredentialStore, MemoryCredentialStore, PlainTextCipher, TokenCipher,
};
pub use response::{FieldDescriptor, FieldSet};
pub use token_record::TokenRecord;
