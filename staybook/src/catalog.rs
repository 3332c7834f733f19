//! Reference room catalogs.
//!
//! [`StaticCatalog`] holds rooms in memory. [`YamlCatalog`] reads a rooms
//! file on every lookup, so edits to the file are picked up by the next
//! quote without affecting reservations already made.
//!
//! A rooms file looks like:
//!
//! ```yaml
//! rooms:
//!   - id: "101"
//!     name: Garden double
//!     nightly_price: 120000
//!     capacity: 2
//!     options:
//!       - id: breakfast
//!         name: Breakfast
//!         price: 15000
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collaborators::RoomCatalog;
use crate::error::{Error, Result};
use crate::pricing::{RoomId, RoomOfferingSnapshot};

const COLLABORATOR: &str = "room catalog";

fn missing_room(id: &RoomId) -> Error {
    Error::RoomUnavailable {
        room_id: id.to_string(),
        reason: "no such room in the catalog".to_string(),
    }
}

/// An in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    rooms: BTreeMap<RoomId, RoomOfferingSnapshot>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room, builder style.
    #[must_use]
    pub fn with_room(mut self, room: RoomOfferingSnapshot) -> Self {
        self.insert(room);
        self
    }

    /// Adds or replaces a room, returning the previous offering.
    pub fn insert(&mut self, room: RoomOfferingSnapshot) -> Option<RoomOfferingSnapshot> {
        self.rooms.insert(room.id.clone(), room)
    }
}

impl RoomCatalog for StaticCatalog {
    fn room_offering(&self, id: &RoomId) -> Result<RoomOfferingSnapshot> {
        self.rooms.get(id).cloned().ok_or_else(|| missing_room(id))
    }

    fn rooms(&self) -> Result<Vec<RoomOfferingSnapshot>> {
        Ok(self.rooms.values().cloned().collect())
    }
}

/// The contents of a rooms file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Every room on offer.
    #[serde(default)]
    pub rooms: Vec<RoomOfferingSnapshot>,
}

impl CatalogFile {
    /// Parses and validates a rooms file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for malformed YAML and
    /// [`Error::Validation`] for an invalid room or a repeated room id.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: Self = serde_yaml::from_str(contents)?;
        file.validate()?;
        Ok(file)
    }

    /// Reads and validates a rooms file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`CatalogFile::parse`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = BTreeMap::new();
        for (index, room) in self.rooms.iter().enumerate() {
            room.validate()?;
            if let Some(first) = seen.insert(&room.id, index) {
                return Err(Error::Validation {
                    field: format!("rooms[{index}].id"),
                    message: format!("room id '{}' already used by rooms[{first}]", room.id),
                });
            }
        }
        Ok(())
    }
}

/// A catalog backed by a rooms file.
#[derive(Debug, Clone)]
pub struct YamlCatalog {
    path: PathBuf,
}

impl YamlCatalog {
    /// Creates a catalog reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the rooms file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<CatalogFile> {
        CatalogFile::load(&self.path).map_err(|e| {
            log::debug!("catalog {} unreadable: {e}", self.path.display());
            Error::upstream(COLLABORATOR, format!("{}: {e}", self.path.display()))
        })
    }
}

impl RoomCatalog for YamlCatalog {
    fn room_offering(&self, id: &RoomId) -> Result<RoomOfferingSnapshot> {
        self.load()?
            .rooms
            .into_iter()
            .find(|room| &room.id == id)
            .ok_or_else(|| missing_room(id))
    }

    fn rooms(&self) -> Result<Vec<RoomOfferingSnapshot>> {
        Ok(self.load()?.rooms)
    }
}
