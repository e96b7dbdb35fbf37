//! Live-selling session models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broadcast state of a live-selling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    Upcoming,
    Live,
    Ended,
}

impl LiveStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Ended => "ended",
        }
    }

    /// Human-readable label for status badges.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Live => "Live",
            Self::Ended => "Ended",
        }
    }
}

/// A live-selling session row.
#[derive(Debug, Clone, Deserialize)]
pub struct Live {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub scheduled_at: Timestamp,
    pub status: LiveStatus,
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
}

/// A product featured in a live session.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveProduct {
    pub live_id: Uuid,
    pub product_id: Uuid,
}

/// Insert/update payload for a live session.
#[derive(Debug, Clone, Serialize)]
pub struct NewLive {
    pub title: String,
    pub slug: String,
    pub scheduled_at: Timestamp,
    pub status: LiveStatus,
    pub cover_image: Option<String>,
}

/// Derives a URL slug from a session title.
#[must_use]
pub fn slug_from_title(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
