use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::observation::{
    ObservationStream, ObserveError, ObserverOptions, RegionId, VisibilityObservation,
    VisibilitySource,
};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Vertical extent of a region in page coordinates. Horizontal overflow never
/// hides a section on this page, so only the scroll axis is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

struct TrackedRegion {
    options: ObserverOptions,
    rect: Option<Rect>,
    last_intersecting: Option<bool>,
    tx: mpsc::UnboundedSender<VisibilityObservation>,
}

/// Scroll-driven viewport that reports threshold crossings of observed
/// regions, the way a browser intersection observer does.
///
/// The first evaluation after a region is placed always reports; after that
/// only changes of `is_intersecting` are pushed.
pub struct ScrollViewport {
    height: f64,
    scroll_y: f64,
    available: bool,
    regions: HashMap<RegionId, TrackedRegion>,
}

impl ScrollViewport {
    pub fn new(height: f64) -> Self {
        Self {
            height: height.max(0.0),
            scroll_y: 0.0,
            available: true,
            regions: HashMap::new(),
        }
    }

    /// A viewport without intersection support; every `observe` call fails.
    pub fn unavailable(height: f64) -> Self {
        Self {
            available: false,
            ..Self::new(height)
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn observed_count(&self) -> usize {
        self.regions.len()
    }

    /// Record the layout of a region. Unobserved regions are ignored.
    pub fn place(&mut self, region: RegionId, rect: Rect) {
        let (height, scroll_y) = (self.height, self.scroll_y);
        if let Some(tracked) = self.regions.get_mut(&region) {
            tracked.rect = Some(rect);
            if !evaluate(region, tracked, height, scroll_y) {
                self.regions.remove(&region);
            }
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
        self.reevaluate();
    }

    pub fn resize(&mut self, height: f64) {
        self.height = height.max(0.0);
        self.reevaluate();
    }

    fn reevaluate(&mut self) {
        let (height, scroll_y) = (self.height, self.scroll_y);
        self.regions
            .retain(|region, tracked| evaluate(*region, tracked, height, scroll_y));
    }
}

impl VisibilitySource for ScrollViewport {
    fn observe(
        &mut self,
        region: RegionId,
        options: ObserverOptions,
    ) -> Result<ObservationStream, ObserveError> {
        if !self.available {
            return Err(ObserveError::Unavailable);
        }
        if self.regions.contains_key(&region) {
            return Err(ObserveError::AlreadyObserved(region));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.regions.insert(
            region,
            TrackedRegion {
                options,
                rect: None,
                last_intersecting: None,
                tx,
            },
        );
        Ok(rx)
    }

    fn unobserve(&mut self, region: RegionId) {
        self.regions.remove(&region);
    }
}

/// Visible fraction of `rect` inside the viewport window starting at
/// `scroll_y`, after applying the bottom root margin.
pub fn intersection_ratio(rect: Rect, viewport_height: f64, scroll_y: f64, options: &ObserverOptions) -> f64 {
    let root_top = scroll_y;
    let root_bottom =
        scroll_y + viewport_height + viewport_height * options.root_margin_bottom_pct / 100.0;
    if root_bottom <= root_top {
        return 0.0;
    }

    if rect.height == 0.0 {
        return if rect.top >= root_top && rect.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }

    let overlap = rect.bottom().min(root_bottom) - rect.top.max(root_top);
    (overlap.max(0.0) / rect.height).clamp(0.0, 1.0)
}

// Returns false once the subscriber is gone so the caller can drop the region.
fn evaluate(region: RegionId, tracked: &mut TrackedRegion, height: f64, scroll_y: f64) -> bool {
    if tracked.tx.is_closed() {
        log_debug!("region {} has no subscriber; forgetting it", region);
        return false;
    }
    let Some(rect) = tracked.rect else {
        return true;
    };

    let ratio = intersection_ratio(rect, height, scroll_y, &tracked.options);
    let observation = VisibilityObservation::from_ratio(region, ratio, tracked.options.threshold);
    if tracked.last_intersecting == Some(observation.is_intersecting) {
        return true;
    }

    tracked.last_intersecting = Some(observation.is_intersecting);
    log_debug!(
        "region {} intersecting={} ratio={:.2}",
        region,
        observation.is_intersecting,
        ratio
    );
    tracked.tx.send(observation).is_ok()
}
