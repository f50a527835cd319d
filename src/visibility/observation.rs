use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Visible fraction a region must reach before it counts as intersecting.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Opaque handle to a renderable region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(Uuid);

impl RegionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverOptions {
    pub threshold: f64,
    /// Grows (positive) or shrinks (negative) the bottom edge of the viewport,
    /// as a percentage of its height.
    pub root_margin_bottom_pct: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin_bottom_pct: 0.0,
        }
    }
}

impl ObserverOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn with_root_margin_bottom(mut self, pct: f64) -> Self {
        self.root_margin_bottom_pct = pct;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityObservation {
    pub target: RegionId,
    pub is_intersecting: bool,
    pub ratio: f64,
    pub threshold: f64,
}

impl VisibilityObservation {
    /// A zero threshold still requires some overlap; otherwise the visible
    /// ratio has to reach the threshold.
    pub fn from_ratio(target: RegionId, ratio: f64, threshold: f64) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        let is_intersecting = if threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= threshold
        };

        Self {
            target,
            is_intersecting,
            ratio,
            threshold,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ObserveError {
    #[error("viewport intersection observation is unavailable")]
    Unavailable,
    #[error("region {0} is already observed")]
    AlreadyObserved(RegionId),
}

pub type ObservationStream = mpsc::UnboundedReceiver<VisibilityObservation>;

/// Subscribe/unsubscribe facility that reports visibility changes of regions.
///
/// Implementations push a fresh observation whenever layout or scrolling
/// moves a region across its threshold; consumers never poll.
pub trait VisibilitySource {
    fn observe(
        &mut self,
        region: RegionId,
        options: ObserverOptions,
    ) -> Result<ObservationStream, ObserveError>;

    fn unobserve(&mut self, region: RegionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_at_threshold_counts_as_intersecting() {
        let region = RegionId::new();
        assert!(VisibilityObservation::from_ratio(region, 0.1, 0.1).is_intersecting);
        assert!(!VisibilityObservation::from_ratio(region, 0.09, 0.1).is_intersecting);
    }

    #[test]
    fn zero_threshold_needs_some_overlap() {
        let region = RegionId::new();
        assert!(!VisibilityObservation::from_ratio(region, 0.0, 0.0).is_intersecting);
        assert!(VisibilityObservation::from_ratio(region, 0.01, 0.0).is_intersecting);
    }

    #[test]
    fn threshold_is_clamped_to_unit_range() {
        assert_eq!(ObserverOptions::with_threshold(1.7).threshold, 1.0);
        assert_eq!(ObserverOptions::with_threshold(-0.2).threshold, 0.0);
    }
}
