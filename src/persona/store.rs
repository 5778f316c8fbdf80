// src/persona/store.rs
// Read-only catalogue of personality records, loaded once at startup

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::record::{identifier_for, PersonalityRecord};
use crate::error::PersonaError;

#[derive(Debug, Clone)]
enum Entry {
    Loaded(Arc<PersonalityRecord>),
    Malformed(String),
}

/// Every record is parsed when the store is opened and never touched again,
/// so a store can be shared between sessions behind an `Arc` without locks.
///
/// Identifiers are kept in lexical order; that order is the discovery order
/// used to pick a default personality.
#[derive(Debug, Clone, Default)]
pub struct PersonalityStore {
    root: Option<PathBuf>,
    entries: BTreeMap<String, Entry>,
}

impl PersonalityStore {
    /// Scan `dir` for `*.json` records.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersonaError> {
        let dir = dir.as_ref();
        let id = dir.display().to_string();
        let read_dir = std::fs::read_dir(dir).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => PersonaError::NotFound(id.clone()),
            _ => PersonaError::Io {
                id: id.clone(),
                source,
            },
        })?;

        let mut entries = BTreeMap::new();
        for dir_entry in read_dir {
            let path = match dir_entry {
                Ok(e) => e.path(),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let identifier = identifier_for(&path);
            let entry = match PersonalityRecord::from_path(&path) {
                Ok(record) => {
                    debug!("Loaded personality '{}' ({})", identifier, record.name);
                    Entry::Loaded(Arc::new(record))
                }
                Err(e) => {
                    warn!("Ignoring personality file {}: {}", path.display(), e);
                    Entry::Malformed(e.to_string())
                }
            };
            entries.insert(identifier, entry);
        }

        let store = Self {
            root: Some(dir.to_path_buf()),
            entries,
        };
        info!(
            "Loaded personalities from {}: {:?}",
            dir.display(),
            store.list_available()
        );
        Ok(store)
    }

    /// Build a store from records that are already in memory.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (S, PersonalityRecord)>,
        S: Into<String>,
    {
        let entries = records
            .into_iter()
            .map(|(id, record)| (id.into(), Entry::Loaded(Arc::new(record))))
            .collect();
        Self {
            root: None,
            entries,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn load(&self, identifier: &str) -> Result<Arc<PersonalityRecord>, PersonaError> {
        match self.entries.get(identifier) {
            Some(Entry::Loaded(record)) => Ok(Arc::clone(record)),
            Some(Entry::Malformed(reason)) => Err(PersonaError::Malformed {
                id: identifier.to_string(),
                reason: reason.clone(),
            }),
            None => Err(PersonaError::NotFound(identifier.to_string())),
        }
    }

    /// Loadable identifiers, in discovery order.
    pub fn list_available(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Loaded(_)))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn default_identifier(&self) -> Option<String> {
        self.list_available().into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.list_available().is_empty()
    }
}
