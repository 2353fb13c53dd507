use std::fmt;

use crate::version::{normalize, CompatibilityTable};

/// Subtitles hosted directly on Addic7ed carry this attribution; they get
/// priority over more popular candidates mirrored from elsewhere.
pub const FEATURED_VIA: &str = "http://addic7ed.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Completed,
    /// Work in progress; carries the raw status text (e.g. "80.5% Completed").
    Incomplete(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Completed => write!(f, "Completed"),
            Status::Incomplete(raw) => write!(f, "{raw}"),
        }
    }
}

/// One subtitle offer as scraped from an episode page, before any field
/// normalization.
#[derive(Debug, Default, Clone)]
pub struct RawSubtitle {
    pub version: Option<String>,
    pub language: String,
    pub status: String,
    pub url: String,
    pub via: Option<String>,
    pub downloads: Option<String>,
}

/// One candidate subtitle for an episode. The version is normalized once at
/// construction and never touched again; only `url` may be rewritten later.
#[derive(Debug, Clone)]
pub struct Subtitle {
    pub version: String,
    pub language: String,
    pub status: Status,
    pub url: String,
    pub via: Option<String>,
    pub downloads: u64,
}

impl Subtitle {
    pub fn new(raw: RawSubtitle) -> Self {
        let status = if raw.status.trim() == "Completed" {
            Status::Completed
        } else {
            Status::Incomplete(raw.status.trim().to_string())
        };
        Subtitle {
            version: normalize(raw.version.as_deref()),
            language: raw.language,
            status,
            url: raw.url,
            via: raw.via,
            // Missing or garbled counters count as zero downloads.
            downloads: raw
                .downloads
                .as_deref()
                .and_then(|d| d.trim().parse().ok())
                .unwrap_or(0),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    pub fn is_featured(&self) -> bool {
        self.via.as_deref() == Some(FEATURED_VIA)
    }

    /// Whether this candidate can be used for a release labelled
    /// `target_version` (already normalized).
    pub fn works_for(&self, target_version: &str, table: &CompatibilityTable) -> bool {
        self.is_completed() && table.compatible(&self.version, target_version)
    }

    /// Whether this candidate should replace the current best pick. A
    /// featured incumbent is never displaced; equal download counts keep the
    /// incumbent, so the first candidate seen wins ties.
    pub fn can_replace(&self, other: Option<&Subtitle>, table: &CompatibilityTable) -> bool {
        if !self.is_completed() {
            return false;
        }
        let Some(other) = other else {
            return true;
        };
        self.language == other.language
            && table.compatible(&self.version, &other.version)
            && self.is_more_popular_than(other)
    }

    fn is_more_popular_than(&self, other: &Subtitle) -> bool {
        if other.is_featured() {
            return false;
        }
        self.downloads > other.downloads
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t->\t{} ({}, {}) [{} downloads]",
            self.url, self.version, self.language, self.status, self.downloads
        )?;
        if let Some(via) = &self.via {
            write!(f, " (via {via})")?;
        }
        Ok(())
    }
}
