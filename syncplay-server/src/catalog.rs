//! Read-only track catalog
//!
//! Loaded once at process start from a JSON file (an array of tracks) and
//! never mutated. The hub uses it to resolve client-submitted track ids to
//! canonical metadata; the REST layer serves it verbatim.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::info;

use syncplay_common::Track;

use crate::error::{Error, Result};

/// Immutable catalog of available tracks.
pub struct Catalog {
    tracks: Vec<Track>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// Duplicate ids keep the first occurrence; later entries with the same
    /// id are unreachable by lookup but still listed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        let tracks: Vec<Track> = serde_json::from_str(&raw).map_err(|e| {
            Error::Catalog(format!("failed to parse {}: {}", path.display(), e))
        })?;

        info!("Loaded catalog with {} tracks from {}", tracks.len(), path.display());
        Ok(Self::from_tracks(tracks))
    }

    /// Build a catalog from an in-memory track list (tests, seeding).
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut by_id = HashMap::with_capacity(tracks.len());
        for (i, track) in tracks.iter().enumerate() {
            by_id.entry(track.id.clone()).or_insert(i);
        }
        Self { tracks, by_id }
    }

    /// All known tracks, catalog order.
    pub fn all(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by id.
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.by_id.get(id).map(|&i| &self.tracks[i])
    }

    /// Number of tracks in the catalog.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
