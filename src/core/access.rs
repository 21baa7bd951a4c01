// Point operations: fetch, defaulted get, pop, and the get-and-update primitive.
use crate::core::error::{Error, ErrorKind};
use crate::core::table::Table;

/// Control value a `get_and_update` transform hands back to the table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Update<V> {
    /// Store `value` under the key; the call returns `get`.
    Set { get: Option<V>, value: V },
    /// Remove the key; the call returns the value that was present.
    Pop,
}

/// Atomic single-key operations over an ordered table.
pub trait Access<K, V> {
    /// Looks up `key`, failing with `ErrorKind::NotFound` when absent.
    fn fetch(&self, key: &K) -> Result<V, Error>;

    /// Looks up `key`, substituting `default` when absent. Never errors.
    fn get_or(&self, key: &K, default: V) -> V;

    /// Atomically removes and returns the prior value, `None` when absent.
    fn pop(&self, key: &K) -> Option<V>;

    /// Reads the current value, applies `transform`, and commits its verdict
    /// in one indivisible step. See [`Update`] for the two verdicts.
    ///
    /// The transform runs under the table's write lock and must not call back
    /// into the same table.
    fn get_and_update<F>(&self, key: K, transform: F) -> Result<Option<V>, Error>
    where
        F: FnOnce(Option<&V>) -> Update<V>;

    /// Fallible form of `get_and_update`. A transform error surfaces as
    /// `ErrorKind::InvalidUpdate` before the write path is touched, leaving
    /// the table unchanged.
    fn try_get_and_update<F>(&self, key: K, transform: F) -> Result<Option<V>, Error>
    where
        F: FnOnce(Option<&V>) -> Result<Update<V>, Error>;
}

impl<K: Ord + Clone, V: Clone> Access<K, V> for Table<K, V> {
    fn fetch(&self, key: &K) -> Result<V, Error> {
        self.get(key)
            .ok_or_else(|| Error::new(ErrorKind::NotFound).with_message("no entry for key"))
    }

    fn get_or(&self, key: &K, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    fn pop(&self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn get_and_update<F>(&self, key: K, transform: F) -> Result<Option<V>, Error>
    where
        F: FnOnce(Option<&V>) -> Update<V>,
    {
        self.try_get_and_update(key, |current| Ok(transform(current)))
    }

    fn try_get_and_update<F>(&self, key: K, transform: F) -> Result<Option<V>, Error>
    where
        F: FnOnce(Option<&V>) -> Result<Update<V>, Error>,
    {
        let mut entries = self.write();
        let verdict = transform(entries.get(&key)).map_err(|source| {
            Error::new(ErrorKind::InvalidUpdate)
                .with_message("transform returned neither an update nor a pop signal")
                .with_source(source)
        })?;
        match verdict {
            Update::Set { get, value } => {
                entries.insert(key, value);
                Ok(get)
            }
            Update::Pop => Ok(entries.remove(&key)),
        }
    }
}
