//! Output file naming for export batches.
//!
//! Every artifact of one batch is named
//! `{yyyyMMdd_HHmmss}_{index:02}_{slug}.{ext}`:
//!
//! - `20260114_093012_00_bw.png`
//! - `20260114_093012_01_sepia.png`
//! - `20260114_093012_02_glow_effect.mp4`
//!
//! The timestamp is shared by the whole batch and the index follows selection
//! order, so names within a batch never collide even when two slugs do.

use std::fmt;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use sha2::{Digest, Sha256};

use crate::filters::FilterId;

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Hex digits of the SHA-256 kept for hashed slugs
const HASH_SLUG_LEN: usize = 16;

/// Wall-clock second shared by every job of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BatchStamp(NaiveDateTime);

impl BatchStamp {
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for BatchStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

/// Kind of artifact a batch produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// File extension of exported artifacts
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "png",
            MediaKind::Video => "mp4",
        }
    }

    /// Classify an input file by extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "mp4" | "mov" | "mkv" | "avi" | "webm" | "m4v" => Some(MediaKind::Video),
            "png" | "jpg" | "jpeg" => Some(MediaKind::Image),
            _ => None,
        }
    }
}

/// Filesystem-safe slug for a filter; never empty, always the same for the
/// same identifier
pub fn slug(filter: &FilterId) -> String {
    match filter.known_slug() {
        Some(known) => known.to_string(),
        None => sanitize(filter.token()),
    }
}

/// Slug for identifiers outside the known set
///
/// Whitespace runs become one underscore and everything that is not an ASCII
/// letter, digit or underscore is dropped. When nothing survives, the slug is
/// a truncated SHA-256 of the raw identifier.
fn sanitize(raw: &str) -> String {
    let sanitized: String = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if !sanitized.is_empty() {
        return sanitized;
    }

    let digest = Sha256::digest(raw.as_bytes());
    format!("{:x}", digest)[..HASH_SLUG_LEN].to_string()
}

/// `{stamp}_{index:02}_{slug}.{ext}`
pub fn output_file_name(stamp: &BatchStamp, index: usize, slug: &str, kind: MediaKind) -> String {
    format!("{}_{:02}_{}.{}", stamp, index, slug, kind.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> BatchStamp {
        let datetime = NaiveDate::from_ymd_opt(2026, 1, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 12))
            .unwrap();
        BatchStamp::from_datetime(datetime)
    }

    fn is_safe(slug: &str) -> bool {
        !slug.is_empty() && slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    #[test]
    fn test_known_slugs() {
        assert_eq!(slug(&FilterId::Grayscale), "bw");
        assert_eq!(slug(&FilterId::None), "no_filter");
        assert_eq!(slug(&FilterId::Sepia), "sepia");
    }

    #[test]
    fn test_unknown_slug_is_sanitized() {
        assert_eq!(slug(&FilterId::parse("  glow   effect! ")), "glow_effect");
        assert_eq!(slug(&FilterId::parse("mix_2")), "mix_2");
        assert!(is_safe(&slug(&FilterId::parse("über-cool filter"))));
    }

    #[test]
    fn test_non_ascii_identifier_falls_back_to_hash() {
        let first = slug(&FilterId::parse("хол"));
        let second = slug(&FilterId::parse("хол"));
        let other = slug(&FilterId::parse("теп"));

        assert!(is_safe(&first));
        assert_eq!(first.len(), HASH_SLUG_LEN);
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn test_hash_slug_is_sha256_prefix() {
        assert_eq!(slug(&FilterId::parse("!!!")), "e84c538e7fe25073");
    }

    #[test]
    fn test_whitespace_only_identifier_gets_slug() {
        assert!(is_safe(&slug(&FilterId::parse("   "))));
    }

    #[test]
    fn test_output_file_name_format() {
        assert_eq!(
            output_file_name(&stamp(), 0, "bw", MediaKind::Image),
            "20260114_093012_00_bw.png"
        );
        assert_eq!(
            output_file_name(&stamp(), 7, "vintage", MediaKind::Video),
            "20260114_093012_07_vintage.mp4"
        );
    }

    #[test]
    fn test_media_kind_from_path() {
        assert_eq!(MediaKind::from_path("clip.MP4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_path("shot.jpeg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_path("notes.txt"), None);
        assert_eq!(MediaKind::from_path("noext"), None);
    }
}
