//! Cart persistence.
//!
//! The cart survives restarts through a single named slot: one JSON file
//! holding the serialized line collection. Every mutation overwrites the
//! slot unconditionally; there is no batching, no debounce, and no version
//! field. Reads fail soft: a missing or unparsable slot is an empty cart,
//! never an error surfaced to the visitor.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tiendita_core::{CartLine, Price, ProductId};

/// Wire shape of one persisted line: `{id, name, price, quantity}`.
///
/// `price` round-trips as a decimal string, so quantities and amounts come
/// back exactly as written.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    id: ProductId,
    name: String,
    price: Price,
    quantity: u32,
}

impl From<&CartLine> for StoredLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product_id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        Self {
            product_id: stored.id,
            name: stored.name,
            price: stored.price,
            quantity: stored.quantity,
        }
    }
}

/// File-backed store for the single cart slot.
#[derive(Debug, Clone)]
pub struct CartFileStore {
    path: PathBuf,
}

impl CartFileStore {
    /// Create a store writing to the given slot path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The slot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the slot with the full line collection.
    ///
    /// Writes a temporary file next to the slot and renames it into place,
    /// so a crash mid-write leaves the previous snapshot intact. Parent
    /// directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` if the slot cannot be written. Callers log and
    /// continue; a failed write is never fatal to the session.
    pub fn save(&self, lines: &[CartLine]) -> io::Result<()> {
        let stored: Vec<StoredLine> = lines.iter().map(StoredLine::from).collect();
        let json = serde_json::to_vec_pretty(&stored).map_err(io::Error::other)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }

    /// Read the slot back, or an empty collection if it is missing or does
    /// not parse. Never raises to the caller.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(slot = %self.path.display(), "no persisted cart slot");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(slot = %self.path.display(), error = %e, "failed to read cart slot");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<StoredLine>>(&bytes) {
            Ok(stored) => stored.into_iter().map(CartLine::from).collect(),
            Err(e) => {
                tracing::warn!(
                    slot = %self.path.display(),
                    error = %e,
                    "cart slot did not parse, starting with an empty cart"
                );
                Vec::new()
            }
        }
    }
}
