//! SQLite-backed storage for the key directory.
//!
//! This module persists OpenPGP keys with the metadata an HKP front end
//! queries: fingerprints, key ids, timestamps and user identities. The
//! [`Store`] handle owns the database session; the service types borrow
//! it for the actual operations.
//!
//! # Features
//!
//! - **Lookup**: full keys ([`KeyLookup::get`]) or summary records
//!   ([`KeyLookup::index`]) by fingerprint, key id, or free text
//! - **Import**: one key with all of its identities, all-or-nothing
//!   ([`KeyImporter::import`])
//! - **Export**: pull-based iteration over the whole directory
//!   ([`KeyExporter::export`])
//! - **WKD**: per-identity address hashes for Web Key Directory lookups
//!
//! # Basic Usage
//!
//! ```no_run
//! use keydir::{KeyImporter, KeyLookup, Store};
//!
//! let store = Store::open("directory.db").unwrap();
//!
//! // Import a parsed certificate
//! # let entity = unimplemented!();
//! KeyImporter::new(&store).import(&entity).unwrap();
//!
//! // Any identity substring finds it again
//! let keys = KeyLookup::new(&store).get("alice").unwrap();
//! println!("{} key(s)", keys.len());
//! ```
//!
//! # Searching
//!
//! ```no_run
//! use keydir::{KeyLookup, Store};
//!
//! let store = Store::open("directory.db").unwrap();
//! let lookup = KeyLookup::new(&store);
//!
//! // Exact forms carry a 0x prefix
//! let by_fingerprint = lookup.get("0x1234567890ABCDEF1234567890ABCDEF12345678").unwrap();
//! let by_key_id = lookup.get("0x1234567890ABCDEF").unwrap();
//!
//! // Everything else matches identity names
//! let by_name = lookup.index("alice@example.com").unwrap();
//! ```
//!
//! # Bulk Export
//!
//! ```no_run
//! use keydir::{KeyExporter, Store};
//!
//! let store = Store::open("directory.db").unwrap();
//! for keyring in KeyExporter::new(&store).export().unwrap() {
//!     let keyring = keyring.unwrap();
//!     println!("exported {} key(s)", keyring.len());
//! }
//! ```
//!
//! # In-Memory Store for Testing
//!
//! ```
//! use keydir::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! assert_eq!(store.count().unwrap(), 0);
//! ```

mod export;
mod import;
mod lookup;
mod schema;
mod store;

pub use export::*;
pub use import::*;
pub use lookup::*;
pub use store::*;
