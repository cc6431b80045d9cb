//! Body-weight trend and progress gallery views.

use crate::{MediaType, ProgressMedia, WeightEntry};

/// Trailing window for the weight chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimeFrame {
    #[default]
    Week,
    Month,
}

impl TimeFrame {
    /// Number of most recent entries shown
    pub fn entries(self) -> usize {
        match self {
            TimeFrame::Week => 7,
            TimeFrame::Month => 30,
        }
    }
}

/// Start/current weight and the change between them
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightSummary {
    pub start: f64,
    pub current: f64,
    /// Positive when weight has gone down
    pub loss: f64,
}

/// Summarize weight history. Order is insertion order, not date order.
pub fn weight_summary(entries: &[WeightEntry]) -> WeightSummary {
    let start = entries.first().map(|e| e.weight).unwrap_or(0.0);
    let current = entries.last().map(|e| e.weight).unwrap_or(0.0);
    WeightSummary {
        start,
        current,
        loss: start - current,
    }
}

/// The trailing slice of entries for a chart window
pub fn weight_window(entries: &[WeightEntry], frame: TimeFrame) -> &[WeightEntry] {
    let keep = frame.entries().min(entries.len());
    &entries[entries.len() - keep..]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MediaFilter {
    #[default]
    All,
    Photos,
    Videos,
}

pub fn filter_media(gallery: &[ProgressMedia], filter: MediaFilter) -> Vec<&ProgressMedia> {
    gallery
        .iter()
        .filter(|m| match filter {
            MediaFilter::All => true,
            MediaFilter::Photos => m.media_type == MediaType::Image,
            MediaFilter::Videos => m.media_type == MediaType::Video,
        })
        .collect()
}
