use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderConfig {
    /// Scroll offset past which the header turns solid
    pub scroll_threshold_px: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 50.0,
        }
    }
}

/// Fixed page header: solid background once scrolled, collapsible menu on
/// small screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderState {
    #[serde(skip)]
    config: HeaderConfig,
    scrolled: bool,
    menu_open: bool,
}

impl HeaderState {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns true when the scrolled flag flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.config.scroll_threshold_px;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Follow a navigation link; the mobile menu closes behind it.
    pub fn navigate(&mut self, anchor: &str) -> String {
        self.menu_open = false;
        format!("#{}", anchor.trim_start_matches('#'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_solid_past_threshold() {
        let mut header = HeaderState::new(HeaderConfig::default());
        assert!(!header.on_scroll(50.0));
        assert!(header.on_scroll(51.0));
        assert!(header.is_scrolled());
        assert!(!header.on_scroll(400.0));
        assert!(header.on_scroll(0.0));
    }

    #[test]
    fn navigation_closes_menu() {
        let mut header = HeaderState::new(HeaderConfig::default());
        header.toggle_menu();
        assert!(header.is_menu_open());
        assert_eq!(header.navigate("apply"), "#apply");
        assert!(!header.is_menu_open());
    }
}
