//! Record store
//!
//! A thin typed layer over an embedded `sled` database:
//! - One tree per logical table
//! - Rows are JSON-encoded, keyed by their string id
//! - Single writes are atomic, batches are not

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Logical tables, one `sled` tree each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Game,
    Funding,
    Player,
    Players,
    Areas,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Game => "game",
            Table::Funding => "funding",
            Table::Player => "player",
            Table::Players => "players",
            Table::Areas => "areas",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type stored in exactly one table
pub trait Record: Serialize + DeserializeOwned {
    const TABLE: Table;

    /// Primary key of this row
    fn key(&self) -> &str;
}

/// Handle to the record store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    db: sled::Db,
}

impl Store {
    /// Open (or create) a store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path.as_ref())?;
        log::info!("Opened record store at {}", path.as_ref().display());
        Ok(Self { db })
    }

    /// Store that lives only as long as the handle (tests, dry runs)
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    fn tree(&self, table: Table) -> Result<sled::Tree> {
        Ok(self.db.open_tree(table.as_str())?)
    }

    /// Write a row, replacing any row with the same key
    pub fn execute<T: Record>(&self, row: &T) -> Result<()> {
        let bytes = serde_json::to_vec(row)?;
        self.tree(T::TABLE)?.insert(row.key(), bytes)?;
        Ok(())
    }

    pub fn fetch_one<T: Record>(&self, key: &str) -> Result<Option<T>> {
        match self.tree(T::TABLE)?.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Read back a row that was just written. Absence means the store lost it.
    pub fn fetch_written<T: Record>(&self, key: &str) -> Result<T> {
        self.fetch_one::<T>(key)?.ok_or_else(|| Error::Missing {
            table: T::TABLE,
            id: key.to_string(),
        })
    }

    /// Iterate every row of a table in key order
    pub fn scan<T: Record>(&self) -> Result<impl Iterator<Item = Result<T>>> {
        let rows = self.tree(T::TABLE)?.iter().values();
        Ok(rows.map(|row| -> Result<T> {
            let bytes = row?;
            Ok(serde_json::from_slice(&bytes)?)
        }))
    }

    pub fn fetch_all<T: Record>(&self) -> Result<Vec<T>> {
        self.scan::<T>()?.collect()
    }

    /// All rows matching `pred`. Full scan.
    pub fn fetch_where<T, F>(&self, mut pred: F) -> Result<Vec<T>>
    where
        T: Record,
        F: FnMut(&T) -> bool,
    {
        let mut out = Vec::new();
        for row in self.scan::<T>()? {
            let row = row?;
            if pred(&row) {
                out.push(row);
            }
        }
        Ok(out)
    }

    /// First row (in key order) matching `pred`
    pub fn fetch_first_where<T, F>(&self, mut pred: F) -> Result<Option<T>>
    where
        T: Record,
        F: FnMut(&T) -> bool,
    {
        for row in self.scan::<T>()? {
            let row = row?;
            if pred(&row) {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// Remove a row. Returns whether it existed.
    pub fn delete<T: Record>(&self, key: &str) -> Result<bool> {
        Ok(self.tree(T::TABLE)?.remove(key)?.is_some())
    }

    /// Number of rows in a table
    pub fn count<T: Record>(&self) -> Result<usize> {
        Ok(self.tree(T::TABLE)?.len())
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

/// Alphabet for row ids (URL-safe base64 digits)
const ID_ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Length of generated row ids
pub const ID_LEN: usize = 22;

/// Random URL-safe row id
pub fn short_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Record for Note {
        const TABLE: Table = Table::Game;

        fn key(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_execute_and_fetch_one() {
        let store = Store::temporary().unwrap();
        store.execute(&note("a", "first")).unwrap();

        assert_eq!(store.fetch_one::<Note>("a").unwrap(), Some(note("a", "first")));
        assert_eq!(store.fetch_one::<Note>("b").unwrap(), None);

        // Same key replaces
        store.execute(&note("a", "second")).unwrap();
        assert_eq!(store.fetch_one::<Note>("a").unwrap().unwrap().body, "second");
        assert_eq!(store.count::<Note>().unwrap(), 1);
    }

    #[test]
    fn test_fetch_written_missing() {
        let store = Store::temporary().unwrap();
        let err = store.fetch_written::<Note>("nope").unwrap_err();
        assert!(matches!(err, Error::Missing { table: Table::Game, .. }));
    }

    #[test]
    fn test_fetch_where_and_delete() {
        let store = Store::temporary().unwrap();
        store.execute(&note("a", "keep")).unwrap();
        store.execute(&note("b", "drop")).unwrap();
        store.execute(&note("c", "keep")).unwrap();

        let kept = store.fetch_where::<Note, _>(|n| n.body == "keep").unwrap();
        assert_eq!(kept.len(), 2);

        let first = store.fetch_first_where::<Note, _>(|n| n.body == "drop").unwrap();
        assert_eq!(first.map(|n| n.id), Some("b".to_string()));

        assert!(store.delete::<Note>("b").unwrap());
        assert!(!store.delete::<Note>("b").unwrap());
        assert_eq!(store.fetch_all::<Note>().unwrap().len(), 2);
    }

    #[test]
    fn test_short_id_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        let a = short_id(&mut rng);
        let b = short_id(&mut rng);
        assert_eq!(a.len(), ID_LEN);
        assert_ne!(a, b);
        assert!(a.bytes().all(|c| ID_ALPHABET.contains(&c)));
    }
}
