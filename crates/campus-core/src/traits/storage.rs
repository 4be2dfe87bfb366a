//! Durable key-value storage trait.

use crate::Result;

/// One change in a batch: `Some(value)` stores, `None` removes.
pub type Change<'a> = (&'a str, Option<&'a str>);

/// A flat string-to-string store that survives restarts.
///
/// Implementations are shared between concurrent requests, so every method
/// takes `&self`.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Applies every change or none of them.
    ///
    /// The default applies changes one by one and, when one fails, puts
    /// back the previous values of those already applied. Backends that can
    /// write a batch in one step should override it.
    fn apply(&self, changes: &[Change<'_>]) -> Result<()> {
        let mut applied: Vec<(&str, Option<String>)> = Vec::with_capacity(changes.len());
        for &(key, value) in changes {
            let previous = self.get(key)?;
            let result = match value {
                Some(value) => self.set(key, value),
                None => self.remove(key),
            };
            if let Err(e) = result {
                for (key, previous) in applied.into_iter().rev() {
                    // Rollback is best effort; the original error is returned.
                    let _ = match previous {
                        Some(value) => self.set(key, &value),
                        None => self.remove(key),
                    };
                }
                return Err(e);
            }
            applied.push((key, previous));
        }
        Ok(())
    }

    /// Removes several keys at once.
    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        let changes: Vec<Change<'_>> = keys.iter().map(|key| (*key, None)).collect();
        self.apply(&changes)
    }
}
