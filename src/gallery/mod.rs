//! Gallery grid model: built from a listing, rebuilt from scratch on every
//! fetch, never patched in place.

use crate::api::models::{GalleryEntry, GalleryListing, PaletteId};
use crate::palette::{swatches, Swatch};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const NAIVE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const NAIVE_FRACTION: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const NAIVE_SPACED: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DISPLAY: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryCard {
    pub id: PaletteId,
    pub swatches: Vec<Swatch>,
    pub quote: String,
    pub timestamp: String,
    pub label: Option<String>,
}

impl GalleryCard {
    pub fn from_entry(entry: &GalleryEntry) -> Self {
        let label = match (&entry.emotion_type, &entry.analysis_method) {
            (Some(e), Some(m)) => Some(format!("{e} ({m})")),
            (Some(e), None) => Some(e.clone()),
            (None, Some(m)) => Some(m.clone()),
            (None, None) => None,
        };
        Self {
            id: entry.id.clone(),
            swatches: swatches(&entry.color_list()),
            quote: format!("\"{}\"", entry.input_text),
            timestamp: entry
                .created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GalleryGrid {
    #[default]
    NotLoaded,
    Cards { total: usize, cards: Vec<GalleryCard> },
    Failed(String),
}

impl GalleryGrid {
    pub const LOAD_ERROR: &'static str = "Could not load the gallery";

    /// Full rebuild from a listing, preserving server order.
    pub fn rebuild(listing: &GalleryListing) -> Self {
        GalleryGrid::Cards {
            total: listing.total,
            cards: listing.entries.iter().map(GalleryCard::from_entry).collect(),
        }
    }

    pub fn failed() -> Self {
        GalleryGrid::Failed(Self::LOAD_ERROR.to_string())
    }

    pub fn cards(&self) -> &[GalleryCard] {
        match self {
            GalleryGrid::Cards { cards, .. } => cards,
            _ => &[],
        }
    }
}

/// Orders gallery refreshes. Refreshes are never coalesced or cancelled;
/// a response is only applied when no newer one has been applied already.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshSequence {
    issued: u64,
    applied: u64,
}

impl RefreshSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Returns false for a response older than the last applied one.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq < self.applied {
            return false;
        }
        self.applied = seq;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.applied < self.issued
    }
}

/// Formats a backend timestamp for display; unparseable input is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .and_then(|dt| dt.format(DISPLAY).ok())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339) {
        return Some(PrimitiveDateTime::new(dt.date(), dt.time()));
    }
    [NAIVE, NAIVE_FRACTION, NAIVE_SPACED]
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(raw, fmt).ok())
}
