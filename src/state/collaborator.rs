//! Collaborator records as exchanged with the record store

use serde::{Deserialize, Serialize};

/// A collaborator persisted in the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Store-assigned identifier
    pub id: String,
    pub title: String,
    pub email: String,
    pub department: String,
    pub active: bool,
    /// Avatar reference, when the store has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Collaborator {
    /// Build a stored record from an inserted payload and its new id
    pub fn from_new(id: String, record: NewCollaborator) -> Self {
        Self {
            id,
            title: record.title,
            email: record.email,
            department: record.department,
            active: record.active,
            avatar: None,
        }
    }

    /// Up to two uppercase initials taken from the title
    pub fn initials(&self) -> String {
        self.title
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// The exact four-field payload sent on insert; the id is never supplied here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollaborator {
    pub title: String,
    pub email: String,
    pub department: String,
    pub active: bool,
}
