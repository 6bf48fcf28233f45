//! Participant persistence.
//!
//! The whole roster is written on every change and read once at startup.
//! A missing or unreadable entry falls back to the default roster; failures
//! never reach the user.

use crate::error::WheelResult;
use crate::palette::color_for_index;
use crate::types::Participant;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Fixed key the roster is stored under
pub const STORE_KEY: &str = "lucky_spin_participants";

/// Roster used on first start or when stored data is corrupt
pub const DEFAULT_NAMES: [&str; 4] = ["An", "Bình", "Chi", "Dũng"];

/// Read-whole/write-whole storage for the roster
pub trait ParticipantStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> WheelResult<Option<Vec<Participant>>>;

    fn save(&self, participants: &[Participant]) -> WheelResult<()>;
}

pub fn default_participants() -> Vec<Participant> {
    DEFAULT_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| Participant::new(*name, color_for_index(i)))
        .collect()
}

/// Load the stored roster, substituting the default list when it is missing
/// or cannot be decoded
pub fn load_or_default(store: &dyn ParticipantStore) -> Vec<Participant> {
    match store.load() {
        Ok(Some(participants)) => {
            tracing::info!(count = participants.len(), "Loaded stored participants");
            participants
        }
        Ok(None) => {
            tracing::info!("No stored participants, using defaults");
            default_participants()
        }
        Err(e) => {
            tracing::warn!("Failed to load participants: {}, using defaults", e);
            default_participants()
        }
    }
}

/// Stores the roster as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/lucky_spin_participants.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", STORE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ParticipantStore for JsonFileStore {
    fn load(&self) -> WheelResult<Option<Vec<Participant>>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, participants: &[Participant]) -> WheelResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling file first so a crash never leaves half a roster
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string(participants)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the serialized roster in memory, for tests and embedded hosts that
/// persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored value, valid or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().map(|raw| raw.clone()).unwrap_or(None)
    }
}

impl ParticipantStore for MemoryStore {
    fn load(&self) -> WheelResult<Option<Vec<Participant>>> {
        match self.raw() {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, participants: &[Participant]) -> WheelResult<()> {
        let json = serde_json::to_string(participants)?;
        if let Ok(mut raw) = self.raw.lock() {
            *raw = Some(json);
        }
        Ok(())
    }
}
