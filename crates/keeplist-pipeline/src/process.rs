//! The note → delivered item orchestrator.
//!
//! One migrator processes one note at a time: resolve and upload
//! attachments (best effort), normalize labels, synthesize a title when the
//! note has none, assemble the body, and hand the pair to the inbox client.
//! Failures stay inside the per-note boundary; the batch always continues.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use keeplist_core::{KeepNote, Result};
use keeplist_delivery::{InboxClient, InboxResponse};

use crate::attachments::{resolve_attachment, AttachmentStore};
use crate::labels::hashtag_line;
use crate::title::compose_title;

/// Where the hashtag line ends up in the delivered item.
///
/// The tool historically shipped both behaviors; `Title` is the current
/// one and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagPlacement {
    /// Hashtags appended to the delivered title.
    #[default]
    Title,
    /// Hashtags appended to the note body as a final block.
    Body,
}

impl fmt::Display for TagPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagPlacement::Title => write!(f, "title"),
            TagPlacement::Body => write!(f, "body"),
        }
    }
}

impl std::str::FromStr for TagPlacement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(TagPlacement::Title),
            "body" => Ok(TagPlacement::Body),
            _ => Err(format!("Invalid tag placement: {}", s)),
        }
    }
}

/// Why a note was skipped instead of delivered.
#[derive(Debug, Clone)]
pub enum SkipReason {
    /// The note is archived in the source system.
    Archived,
    /// The file could not be parsed as a note.
    Parse(String),
    /// Delivery failed after the client gave up.
    Delivery(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Archived => write!(f, "archived"),
            SkipReason::Parse(msg) => write!(f, "parse failure: {}", msg),
            SkipReason::Delivery(msg) => write!(f, "delivery failure: {}", msg),
        }
    }
}

/// Result of processing one note file.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The note reached the inbox.
    Delivered,
    /// The note was skipped; the run continues.
    Skipped(SkipReason),
}

/// Per-run progress counters.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    started: Instant,
}

impl RunStats {
    /// Start counting a run over `total` discovered notes.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            skipped: 0,
            started: Instant::now(),
        }
    }

    /// Record an outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Delivered => self.processed += 1,
            Outcome::Skipped(_) => self.skipped += 1,
        }
    }

    /// Seconds elapsed since the run started.
    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// One-line summary for end-of-run reporting.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} notes processed, {} skipped in {}s",
            self.processed,
            self.total,
            self.skipped,
            self.elapsed_secs()
        )
    }
}

/// Assemble the delivered note body: text, then an optional attachments
/// block, then (for body tag placement) the hashtag line.
pub fn compose_body(text: &str, attachment_links: &[String], hashtags: &str) -> String {
    let mut body = text.to_string();

    if !attachment_links.is_empty() {
        body.push_str("\n\nAttachments:\n");
        body.push_str(&attachment_links.join("\n"));
    }

    if !hashtags.is_empty() {
        if body.is_empty() {
            body.push_str(hashtags);
        } else {
            body.push_str("\n\n");
            body.push_str(hashtags);
        }
    }

    body
}

/// Migrates parsed notes into the inbox.
pub struct Migrator {
    client: InboxClient,
    store: Option<Arc<dyn AttachmentStore>>,
    base_dir: PathBuf,
    tag_placement: TagPlacement,
}

impl Migrator {
    /// Create a migrator for a takeout directory.
    pub fn new(client: InboxClient, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            store: None,
            base_dir: base_dir.into(),
            tag_placement: TagPlacement::default(),
        }
    }

    /// Attach an object storage collaborator for attachment uploads.
    pub fn with_store(mut self, store: Arc<dyn AttachmentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set where the hashtag line is placed.
    pub fn with_tag_placement(mut self, placement: TagPlacement) -> Self {
        self.tag_placement = placement;
        self
    }

    /// The underlying inbox client (for statistics reporting).
    pub fn client(&self) -> &InboxClient {
        &self.client
    }

    /// Process one note file. Never fails the batch: parse failures,
    /// archived notes, and delivery failures all come back as `Skipped`.
    pub async fn process_file(&self, path: &Path) -> Outcome {
        let note = match KeepNote::from_file(path) {
            Ok(note) => note,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse note");
                return Outcome::Skipped(SkipReason::Parse(e.to_string()));
            }
        };

        if note.is_archived {
            debug!(path = %path.display(), "Ignoring archived note");
            return Outcome::Skipped(SkipReason::Archived);
        }

        match self.deliver_note(&note, path).await {
            Ok(_) => Outcome::Delivered,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to deliver note");
                Outcome::Skipped(SkipReason::Delivery(e.to_string()))
            }
        }
    }

    /// Transform one parsed note and deliver it.
    pub async fn deliver_note(&self, note: &KeepNote, source_path: &Path) -> Result<InboxResponse> {
        let links = self.upload_attachments(note).await;
        let hashtags = hashtag_line(&note.labels);

        let embed_in_title = self.tag_placement == TagPlacement::Title;
        let title = compose_title(note, source_path, &hashtags, embed_in_title);
        let body_hashtags = if embed_in_title { "" } else { hashtags.as_str() };
        let body = compose_body(&note.text_content, &links, body_hashtags);

        self.client.add_to_inbox(&title, &body).await
    }

    /// Upload a note's attachments, best effort. A missing file or a
    /// failed upload drops that attachment only.
    async fn upload_attachments(&self, note: &KeepNote) -> Vec<String> {
        let Some(store) = &self.store else {
            if !note.attachments.is_empty() {
                debug!(
                    count = note.attachments.len(),
                    "Storage not configured, skipping attachments"
                );
            }
            return Vec::new();
        };

        let mut links = Vec::new();
        for attachment in &note.attachments {
            let resolved = match resolve_attachment(&self.base_dir, &attachment.file_path) {
                Ok(path) => path,
                Err(e) => {
                    warn!(error = %e, "Failed to find attachment file");
                    continue;
                }
            };

            match store.upload(&resolved).await {
                Ok(url) => links.push(format!("[{}]({})", attachment.file_path, url)),
                Err(e) => {
                    warn!(error = %e, file = %attachment.file_path, "Failed to upload attachment");
                }
            }
        }
        links
    }
}
