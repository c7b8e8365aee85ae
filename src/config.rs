//! Configuration handling for the TUI

use crate::state::forms::{CollaboratorSchema, DEFAULT_DEPARTMENTS};
use crate::store::DEFAULT_ADDRESS;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the record store address
pub const STORE_ADDRESS_ENV: &str = "COLLAB_STORE_ADDRESS";

/// Collection holding collaborator records
pub const DEFAULT_COLLECTION: &str = "collaborators";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Record store address
    pub store_address: Option<String>,
    /// Collection name used for collaborators
    pub collection: Option<String>,
    /// Department options offered by the wizard
    pub departments: Option<Vec<String>>,
    /// Keep records in memory instead of talking to a remote store
    pub memory_store: Option<bool>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "collaborators", "collaborators-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Store address: environment first, then the config file, then the default
    pub fn store_address(&self) -> String {
        self.resolve_store_address(std::env::var(STORE_ADDRESS_ENV).ok())
    }

    fn resolve_store_address(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|a| !a.trim().is_empty())
            .or_else(|| self.store_address.clone())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
    }

    pub fn collection(&self) -> &str {
        self.collection
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLLECTION)
    }

    /// Configured departments with blanks and duplicates removed, or the defaults
    pub fn departments(&self) -> Vec<String> {
        let mut departments: Vec<String> = Vec::new();
        for department in self.departments.iter().flatten() {
            let department = department.trim();
            if !department.is_empty() && !departments.iter().any(|d| d == department) {
                departments.push(department.to_string());
            }
        }
        if departments.is_empty() {
            DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()
        } else {
            departments
        }
    }

    pub fn use_memory_store(&self) -> bool {
        self.memory_store.unwrap_or(false)
    }

    /// Validation schema built from the configured departments
    pub fn schema(&self) -> CollaboratorSchema {
        CollaboratorSchema::new(self.departments())
    }
}
