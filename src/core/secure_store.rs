//! Durable, confidential key/value storage for session credentials.
//!
//! The session layer only ever needs three operations over small strings, so
//! the platform keychain is hidden behind the [`SecureStore`] capability
//! trait. Tests (and platforms without a keychain service) inject
//! [`MemoryStore`] instead.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use keyring::Entry;

pub type StoreError = Box<dyn Error + Send + Sync>;

const KEYRING_SERVICE: &str = "nullclaw";

/// Minimal contract the session layer requires from credential storage.
///
/// Values must survive process restarts and must not be readable by code
/// outside this module's implementations.
pub trait SecureStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Describes failures when attempting to access the system keyring.
///
/// Recoverable errors indicate that the credential backend was temporarily
/// unavailable (for example when the keychain service is locked or
/// inaccessible). Permanent errors surface the underlying cause directly so
/// callers can report them to the user.
#[derive(Debug)]
pub enum KeyringAccessError {
    Recoverable(keyring::Error),
    Permanent(keyring::Error),
}

impl KeyringAccessError {
    fn inner(&self) -> &keyring::Error {
        match self {
            KeyringAccessError::Recoverable(err) | KeyringAccessError::Permanent(err) => err,
        }
    }

    /// Returns true when the error represents a temporary outage of the
    /// platform keyring backend.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeyringAccessError::Recoverable(_))
    }
}

impl From<keyring::Error> for KeyringAccessError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::PlatformFailure(_) | keyring::Error::NoStorageAccess(_) => {
                KeyringAccessError::Recoverable(err)
            }
            other => KeyringAccessError::Permanent(other),
        }
    }
}

impl fmt::Display for KeyringAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner())
    }
}

impl Error for KeyringAccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.inner())
    }
}

/// [`SecureStore`] backed by the platform keychain.
///
/// Each key becomes a keyring entry under one fixed service name, so the
/// stored values live alongside the user's other credentials and inherit the
/// platform's at-rest encryption.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<Entry, StoreError> {
        Entry::new(KEYRING_SERVICE, key)
            .map_err(|err| Box::new(KeyringAccessError::from(err)) as StoreError)
    }
}

impl SecureStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entry = Self::entry(key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(Box::new(KeyringAccessError::from(err))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let entry = Self::entry(key)?;
        entry
            .set_password(value)
            .map_err(|err| Box::new(KeyringAccessError::from(err)) as StoreError)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let entry = Self::entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(Box::new(KeyringAccessError::from(err))),
        }
    }
}

/// In-process [`SecureStore`] holding values in a mutex-guarded map.
///
/// Not durable and not confidential; intended for tests and as a fallback on
/// targets without a keychain service.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }
}

fn poisoned() -> StoreError {
    "memory store lock poisoned".into()
}
