//! The session store: the single owner of persisted session state.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info, warn};

use campus_core::Result;
use campus_core::traits::KeyValueStore;
use campus_core::types::{LanguageCode, Module, ThemeMode};
use campus_core::{AccessToken, RefreshToken};

use crate::memory::MemoryStore;

/// Storage keys. Nothing outside this module reads or writes them directly.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const SELECTED_MODULE: &str = "selectedModule";
    pub const THEME_MODE: &str = "themeMode";
    pub const LANGUAGE: &str = "language";
}

/// Access/refresh tokens, the selected module and display preferences,
/// persisted in a [`KeyValueStore`].
///
/// Reads never fail: unavailable or corrupt storage is logged and treated
/// as "no session". Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A session store that is not persisted anywhere.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "session storage unavailable, treating as absent");
                None
            }
        }
    }

    fn read_parsed<T: FromStr>(&self, key: &str) -> Option<T>
    where
        T::Err: fmt::Display,
    {
        let raw = self.read(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable stored value");
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.read(keys::ACCESS_TOKEN).map(AccessToken::new)
    }

    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.read(keys::REFRESH_TOKEN).map(RefreshToken::new)
    }

    pub fn has_session(&self) -> bool {
        self.access_token().is_some()
    }

    /// Store a new credential pair, replacing both stored tokens in one
    /// write. On error the previous pair is left in place.
    ///
    /// A `None` refresh token removes the stored one.
    pub fn set_credentials(&self, access: &AccessToken, refresh: Option<&RefreshToken>) -> Result<()> {
        self.backend.apply(&[
            (keys::ACCESS_TOKEN, Some(access.as_str())),
            (keys::REFRESH_TOKEN, refresh.map(RefreshToken::as_str)),
        ])?;
        debug!(has_refresh = refresh.is_some(), "stored session credentials");
        Ok(())
    }

    /// Store the credentials of a new login together with its module.
    pub fn start_session(
        &self,
        access: &AccessToken,
        refresh: Option<&RefreshToken>,
        module: Module,
    ) -> Result<()> {
        self.backend.apply(&[
            (keys::ACCESS_TOKEN, Some(access.as_str())),
            (keys::REFRESH_TOKEN, refresh.map(RefreshToken::as_str)),
            (keys::SELECTED_MODULE, Some(module.as_str())),
        ])?;
        debug!(has_refresh = refresh.is_some(), %module, "stored new session");
        Ok(())
    }

    /// Remove both tokens and the selected module.
    ///
    /// Best effort: a storage failure is logged, never returned.
    pub fn clear(&self) {
        let result = self.backend.remove_all(&[
            keys::ACCESS_TOKEN,
            keys::REFRESH_TOKEN,
            keys::SELECTED_MODULE,
        ]);
        match result {
            Ok(()) => info!("session cleared"),
            Err(e) => warn!(error = %e, "failed to clear session storage"),
        }
    }

    pub fn selected_module(&self) -> Option<Module> {
        self.read_parsed(keys::SELECTED_MODULE)
    }

    pub fn set_selected_module(&self, module: Module) -> Result<()> {
        self.backend.set(keys::SELECTED_MODULE, module.as_str())
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.read_parsed(keys::THEME_MODE).unwrap_or_default()
    }

    pub fn set_theme_mode(&self, mode: ThemeMode) -> Result<()> {
        self.backend.set(keys::THEME_MODE, mode.as_str())
    }

    pub fn language(&self) -> LanguageCode {
        self.read_parsed(keys::LANGUAGE).unwrap_or_default()
    }

    pub fn set_language(&self, language: &LanguageCode) -> Result<()> {
        self.backend.set(keys::LANGUAGE, language.as_str())
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_session", &self.has_session())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::error::{Error, StorageError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage(StorageError::Io {
                message: "quota exceeded".into(),
            }))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage(StorageError::Io {
                message: "quota exceeded".into(),
            }))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::Storage(StorageError::Io {
                message: "quota exceeded".into(),
            }))
        }
    }

    /// Writes to `refreshToken` fail; everything else works.
    #[derive(Default)]
    struct RefreshWriteFails {
        inner: MemoryStore,
    }

    impl KeyValueStore for RefreshWriteFails {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if key == keys::REFRESH_TOKEN && value != "r1" {
                return Err(Error::Storage(StorageError::Io {
                    message: "disk full".into(),
                }));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_set_credentials_keeps_previous_pair() {
        let store = SessionStore::new(RefreshWriteFails::default());
        store
            .set_credentials(&AccessToken::new("a1"), Some(&RefreshToken::new("r1")))
            .unwrap();

        let result = store.set_credentials(&AccessToken::new("a2"), Some(&RefreshToken::new("r2")));

        assert!(result.is_err());
        assert_eq!(store.access_token(), Some(AccessToken::new("a1")));
        assert_eq!(store.refresh_token(), Some(RefreshToken::new("r1")));
    }

    #[test]
    fn start_session_stores_tokens_and_module() {
        let store = SessionStore::in_memory();
        store
            .start_session(&AccessToken::new("a1"), None, Module::Education)
            .unwrap();
        assert_eq!(store.access_token(), Some(AccessToken::new("a1")));
        assert!(store.refresh_token().is_none());
        assert_eq!(store.selected_module(), Some(Module::Education));
    }

    #[test]
    fn credentials_round_trip() {
        let store = SessionStore::in_memory();
        assert!(!store.has_session());

        store
            .set_credentials(&AccessToken::new("a1"), Some(&RefreshToken::new("r1")))
            .unwrap();
        assert_eq!(store.access_token(), Some(AccessToken::new("a1")));
        assert_eq!(store.refresh_token(), Some(RefreshToken::new("r1")));
    }

    #[test]
    fn set_credentials_without_refresh_drops_old_refresh() {
        let store = SessionStore::in_memory();
        store
            .set_credentials(&AccessToken::new("a1"), Some(&RefreshToken::new("r1")))
            .unwrap();
        store.set_credentials(&AccessToken::new("a2"), None).unwrap();
        assert_eq!(store.access_token(), Some(AccessToken::new("a2")));
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn clear_removes_tokens_and_module_but_keeps_preferences() {
        let store = SessionStore::in_memory();
        store
            .set_credentials(&AccessToken::new("a1"), Some(&RefreshToken::new("r1")))
            .unwrap();
        store.set_selected_module(Module::Hostel).unwrap();
        store.set_theme_mode(ThemeMode::Dark).unwrap();

        store.clear();

        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(store.selected_module().is_none());
        assert_eq!(store.theme_mode(), ThemeMode::Dark);
    }

    #[test]
    fn unavailable_storage_reads_as_no_session() {
        let store = SessionStore::new(BrokenStore);
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert_eq!(store.language(), LanguageCode::default());
        assert!(store.set_selected_module(Module::Library).is_err());
        store.clear();
    }

    #[test]
    fn unreadable_values_fall_back_to_defaults() {
        let backend = MemoryStore::new();
        backend.set(keys::THEME_MODE, "neon").unwrap();
        backend.set(keys::SELECTED_MODULE, "canteen").unwrap();
        let store = SessionStore::new(backend);
        assert_eq!(store.theme_mode(), ThemeMode::Light);
        assert!(store.selected_module().is_none());
    }

    #[test]
    fn debug_hides_tokens() {
        let store = SessionStore::in_memory();
        store.set_credentials(&AccessToken::new("secret-token"), None).unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains("secret-token"));
    }
}
