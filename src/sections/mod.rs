pub mod comparison;
pub mod page;
pub mod projects;
pub mod stagger;

use serde::{Deserialize, Serialize};

use crate::visibility::{ObserverOptions, RevealConfig, RevealMode};

pub use comparison::{ComparisonRow, ComparisonTable, ExpandState, Support};
pub use page::{Page, PageEvent};
pub use projects::{Project, ProjectsShowcase};
pub use stagger::{card_delay, CardReveal, StaggeredCard, StaggeredReveal};

/// Page sections in document order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Hero,
    About,
    Services,
    AiAgents,
    Projects,
    Methodology,
    Comparison,
    Cta,
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Services,
        SectionKind::AiAgents,
        SectionKind::Projects,
        SectionKind::Methodology,
        SectionKind::Comparison,
        SectionKind::Cta,
    ];

    /// Fragment the navigation links jump to, for sections that have one.
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            SectionKind::About => Some("about"),
            SectionKind::Services => Some("services"),
            SectionKind::Methodology => Some("methodology"),
            SectionKind::Cta => Some("apply"),
            _ => None,
        }
    }

    /// Only the chat section hides again, so its demo can replay.
    pub fn reveal_mode(self) -> RevealMode {
        match self {
            SectionKind::AiAgents => RevealMode::Toggle,
            _ => RevealMode::OneShot,
        }
    }

    pub fn observer_options(self, config: &RevealConfig) -> ObserverOptions {
        match self {
            SectionKind::Projects => config.projects_options(),
            _ => config.section_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_chat_section_toggles() {
        let toggling: Vec<SectionKind> = SectionKind::ALL
            .into_iter()
            .filter(|kind| kind.reveal_mode() == RevealMode::Toggle)
            .collect();
        assert_eq!(toggling, vec![SectionKind::AiAgents]);
    }

    #[test]
    fn projects_shrink_the_bottom_margin() {
        let config = RevealConfig::default();
        assert_eq!(
            SectionKind::Projects.observer_options(&config).root_margin_bottom_pct,
            -10.0
        );
        assert_eq!(SectionKind::Hero.observer_options(&config).root_margin_bottom_pct, 0.0);
        assert_eq!(SectionKind::Hero.observer_options(&config).threshold, 0.1);
    }
}
