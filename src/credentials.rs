//! Collaborators holding the integration's persisted tokens.

use crate::client_error::Result;
use parking_lot::Mutex;

/// A persisted token pair. Both tokens are in their at-rest form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: u64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Storage for integration credentials, owned by the enclosing application.
pub trait CredentialStore: Send + Sync {
    /// Find the record whose stored refresh token equals `refresh_token`.
    fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<CredentialRecord>>;

    /// Replace the stored access token of record `id`. `access_token` is already encrypted.
    fn update_access_token(&self, id: u64, access_token: &str) -> Result<()>;
}

/// Encryption applied to tokens at rest.
pub trait TokenCipher: Send + Sync {
    fn encrypt(&self, plain: &str) -> Result<String>;

    fn decrypt(&self, sealed: &str) -> Result<String>;
}

/// Cipher for stores that keep tokens in clear text, or encrypt them on their own.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextCipher;

impl TokenCipher for PlainTextCipher {
    fn encrypt(&self, plain: &str) -> Result<String> {
        Ok(plain.to_string())
    }

    fn decrypt(&self, sealed: &str) -> Result<String> {
        Ok(sealed.to_string())
    }
}

/// In-process `CredentialStore`.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    records: Mutex<Vec<CredentialRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> MemoryCredentialStore {
        MemoryCredentialStore::default()
    }

    /// Add a record, replacing any existing record with the same id.
    pub fn insert(&self, record: CredentialRecord) {
        let mut records = self.records.lock();

        records.retain(|existing| existing.id != record.id);
        records.push(record);
    }

    pub fn get(&self, id: u64) -> Option<CredentialRecord> {
        self.records
            .lock()
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<CredentialRecord>> {
        Ok(self
            .records
            .lock()
            .iter()
            .find(|record| record.refresh_token == refresh_token)
            .cloned())
    }

    fn update_access_token(&self, id: u64, access_token: &str) -> Result<()> {
        // A record deleted since lookup is left deleted.
        if let Some(record) = self.records.lock().iter_mut().find(|record| record.id == id) {
            record.access_token = access_token.to_string();
        }

        Ok(())
    }
}
