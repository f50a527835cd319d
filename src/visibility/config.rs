use serde::{Deserialize, Serialize};

use super::observation::{ObserverOptions, DEFAULT_THRESHOLD};

/// Tunables for scroll reveals across the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    /// Visible fraction that triggers a reveal
    pub threshold: f64,

    /// Bottom root margin for the projects grid, in percent of viewport height
    pub projects_root_margin_bottom_pct: f64,

    /// Extra transition delay per project card position
    pub stagger_step_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            projects_root_margin_bottom_pct: -10.0,
            stagger_step_ms: 100,
        }
    }
}

impl RevealConfig {
    pub fn section_options(&self) -> ObserverOptions {
        ObserverOptions::with_threshold(self.threshold)
    }

    pub fn projects_options(&self) -> ObserverOptions {
        self.section_options()
            .with_root_margin_bottom(self.projects_root_margin_bottom_pct)
    }
}
