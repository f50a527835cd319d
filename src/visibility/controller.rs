use serde::{Deserialize, Serialize};

use super::observation::{ObserverOptions, RegionId, VisibilityObservation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RevealState {
    Hidden,
    Revealed,
}

impl Default for RevealState {
    fn default() -> Self {
        RevealState::Hidden
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RevealMode {
    /// Reveals on the first entry and ignores everything after.
    OneShot,
    /// Reveals on every entry and hides again on exit.
    Toggle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RevealAction {
    Reveal,
    Hide,
}

/// Pure reveal state machine for one region.
///
/// The render layer derives styling from [`RevealState`]; this type only
/// decides which transition, if any, an observation causes.
#[derive(Debug, Clone)]
pub struct RevealController {
    region: RegionId,
    mode: RevealMode,
    options: ObserverOptions,
    state: RevealState,
    attached: bool,
}

impl RevealController {
    pub fn new(region: RegionId, mode: RevealMode, options: ObserverOptions) -> Self {
        Self {
            region,
            mode,
            options,
            state: RevealState::Hidden,
            attached: true,
        }
    }

    /// Controller for a region whose visibility cannot be observed: content is
    /// shown straight away and no further transitions happen.
    pub fn fail_open(region: RegionId, mode: RevealMode, options: ObserverOptions) -> Self {
        Self {
            region,
            mode,
            options,
            state: RevealState::Revealed,
            attached: false,
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == RevealState::Revealed
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn handle(&mut self, observation: &VisibilityObservation) -> Option<RevealAction> {
        if !self.attached || observation.target != self.region {
            return None;
        }

        match (self.state, observation.is_intersecting, self.mode) {
            (RevealState::Hidden, true, _) => {
                self.state = RevealState::Revealed;
                Some(RevealAction::Reveal)
            }
            (RevealState::Revealed, false, RevealMode::Toggle) => {
                self.state = RevealState::Hidden;
                Some(RevealAction::Hide)
            }
            _ => None,
        }
    }

    /// Stop reacting to observations. The last state is kept for rendering.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}
