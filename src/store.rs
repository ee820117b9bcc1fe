// src/store.rs
//! In-memory profile and event store, seeded from a JSON file at start-up.
//!
//! Seed format:
//! ```json
//! { "profiles": [ { "id": "acme", ... } ], "events": [ { "id": "evt-1", ... } ] }
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::{Event, Profile};

pub const DEFAULT_SEED_PATH: &str = "config/seed.json";
pub const ENV_RELEVANCE_SEED_PATH: &str = "RELEVANCE_SEED_PATH";

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default)]
    profiles: Vec<Profile>,
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Default, Clone)]
pub struct Store {
    profiles: HashMap<String, Profile>,
    events: Vec<Event>,
}

impl Store {
    pub fn new(profiles: Vec<Profile>, events: Vec<Event>) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { profiles, events }
    }

    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        let seed: SeedFile = serde_json::from_str(s).context("invalid seed json")?;
        Ok(Self::new(seed.profiles, seed.events))
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json_str(&content)
    }

    /// `RELEVANCE_SEED_PATH` must exist if set; the default path may be absent (empty store).
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit = std::env::var(ENV_RELEVANCE_SEED_PATH).ok();
        let path = explicit
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SEED_PATH));

        if explicit.is_none() && !path.exists() {
            info!("no seed file found, starting with an empty store");
            return Ok(Self::default());
        }

        let store = Self::from_path(&path)?;
        info!(
            path = %path.display(),
            profiles = store.profiles.len(),
            events = store.events.len(),
            "seeded store"
        );
        Ok(store)
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.get(id)
    }

    /// Events whose status is "active" (case-insensitive).
    pub fn active_events(&self) -> Vec<Event> {
        self.events.iter().filter(|e| e.is_active()).cloned().collect()
    }

    pub fn profile_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
