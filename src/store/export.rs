//! Bulk export of the whole directory.

use pgp::composed::SignedPublicKey;
use rusqlite::params;

use crate::error::Result;
use crate::internal::parse_keyring;

use super::store::Store;

/// Export service streaming every stored key back out.
pub struct KeyExporter<'a> {
    store: &'a Store,
}

impl<'a> KeyExporter<'a> {
    /// Create an exporter over the given store.
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Start a bulk export of every stored key.
    ///
    /// Snapshots the stored row ids up front, then loads and parses one
    /// packets blob per [`next`](Iterator::next) call. The full directory
    /// is never buffered and no statement stays open between pulls.
    ///
    /// # Example
    /// ```no_run
    /// use keydir::{KeyExporter, Store};
    ///
    /// let store = Store::open("keys.db").unwrap();
    /// for keyring in KeyExporter::new(&store).export().unwrap() {
    ///     let keyring = keyring.unwrap();
    ///     println!("{} key(s)", keyring.len());
    /// }
    /// ```
    pub fn export(&self) -> Result<Export<'a>> {
        let mut stmt = self.store.conn().prepare("SELECT id FROM keys")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut ids: Vec<i64> = Vec::new();
        for row in rows {
            ids.push(row?);
        }

        log::debug!("exporting {} key(s)", ids.len());

        Ok(Export {
            store: self.store,
            ids: ids.into_iter(),
            failed: false,
        })
    }
}

/// Pull-based iterator over every stored key.
///
/// Yields one parsed keyring per stored key. The first failure is yielded
/// as an error and ends the sequence; the iterator is fused afterwards.
pub struct Export<'a> {
    store: &'a Store,
    ids: std::vec::IntoIter<i64>,
    failed: bool,
}

impl Export<'_> {
    fn fetch(&self, key_id: i64) -> Result<Vec<SignedPublicKey>> {
        let packets: Vec<u8> = self.store.conn().query_row(
            "SELECT packets FROM keys WHERE id = ?1",
            params![key_id],
            |row| row.get(0),
        )?;

        parse_keyring(&packets)
    }
}

impl Iterator for Export<'_> {
    type Item = Result<Vec<SignedPublicKey>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let key_id = self.ids.next()?;
        match self.fetch(key_id) {
            Ok(keyring) => Some(Ok(keyring)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
