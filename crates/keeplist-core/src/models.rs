//! Data model for Google Keep takeout notes.
//!
//! A takeout export is a directory of JSON files, one note per file. The
//! schema is loose: exported notes routinely omit fields (a list-only note
//! has no `textContent`, an unlabeled note has no `labels`), so every field
//! defaults rather than failing the parse.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One parsed Google Keep note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeepNote {
    /// Note title; frequently empty in takeout exports.
    pub title: String,
    /// Plain-text body.
    pub text_content: String,
    /// HTML rendering of the body. Carried through but never parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content_html: Option<String>,
    /// Attachments referenced by relative path.
    pub attachments: Vec<Attachment>,
    /// Labels in source order.
    pub labels: Vec<Label>,
    /// Whether the note was archived in Keep.
    pub is_archived: bool,
    /// Creation time, microseconds since the Unix epoch.
    pub created_timestamp_usec: i64,
    /// Last-edit time, microseconds since the Unix epoch.
    pub user_edited_timestamp_usec: i64,
}

/// A file attached to a note, relative to the takeout root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    pub file_path: String,
    pub mimetype: String,
}

/// A Keep label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub name: String,
}

impl KeepNote {
    /// Parse a note from a takeout JSON string.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Read and parse a note from a takeout JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Whether the note carries a non-empty title of its own.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Creation time as a UTC datetime, if the timestamp is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.created_timestamp_usec)
    }

    /// Last-edit time as a UTC datetime, if the timestamp is representable.
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.user_edited_timestamp_usec)
    }
}
