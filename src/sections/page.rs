use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::mpsc;
use url::Url;

use crate::conversation::{ConversationDriver, ConversationScript};
use crate::lead::{LeadForm, UtmParams};
use crate::settings::SiteSettings;
use crate::visibility::{
    RegionId, RevealAction, RevealBinding, RevealController, RevealState, VisibilitySource,
};
use crate::widgets::{HeaderState, Marquee};

use super::comparison::ComparisonTable;
use super::projects::ProjectsShowcase;
use super::stagger::{CardReveal, StaggeredReveal};
use super::SectionKind;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

const HERO_BENEFITS: [&str; 8] = [
    "Redução de 70% nos custos operacionais",
    "Aumento de 45% na satisfação do cliente",
    "Automação de 85% das tarefas repetitivas",
    "ROI positivo em 3 meses",
    "Disponibilidade 24/7",
    "Escalabilidade imediata",
    "Integração com sistemas existentes",
    "Análise de dados em tempo real",
];

/// Reveal transitions for the render layer, in the order they happened.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageEvent {
    Section {
        section: SectionKind,
        action: RevealAction,
    },
    Card(CardReveal),
}

struct MountedSection {
    kind: SectionKind,
    binding: RevealBinding,
}

/// The landing page with every section mounted.
///
/// Each section owns its reveal binding; the AI agents section also owns the
/// conversation demo, which plays while the section is on screen.
///
/// Reveal events queue up until the host takes them with [`drain_events`] or
/// [`next_event`]. The queue is unbounded, so a host that mounts a page must
/// keep draining it. Dropping the page stops every observation; use
/// [`unmount`] to also wait for the tasks to finish.
///
/// [`drain_events`]: Page::drain_events
/// [`next_event`]: Page::next_event
/// [`unmount`]: Page::unmount
pub struct Page {
    sections: Vec<MountedSection>,
    cards: Vec<RevealBinding>,
    conversation: ConversationDriver,
    events: mpsc::UnboundedReceiver<PageEvent>,
    pub header: HeaderState,
    pub marquee: Marquee,
    pub comparison: ComparisonTable,
    pub projects: ProjectsShowcase,
    pub lead_form: LeadForm,
}

impl Page {
    /// Mount all sections against `source`. Must run inside a tokio runtime.
    /// `landing_url` is the address the page was opened with; its UTM
    /// parameters are captured once for the lead form.
    pub fn mount<S>(source: &mut S, settings: &SiteSettings, landing_url: Option<&Url>) -> Self
    where
        S: VisibilitySource + ?Sized,
    {
        let (events_tx, events) = mpsc::unbounded_channel();
        let conversation = ConversationDriver::spawn(
            ConversationScript::agent_demo(),
            settings.conversation.clone(),
        );

        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| {
                let controller = RevealController::new(
                    RegionId::new(),
                    kind.reveal_mode(),
                    kind.observer_options(&settings.reveal),
                );
                let tx = events_tx.clone();
                let feed = (kind == SectionKind::AiAgents).then(|| conversation.feed());

                let binding = RevealBinding::bind(source, controller, move |transition| {
                    if let Some(feed) = &feed {
                        if !feed.send(transition.action == RevealAction::Reveal) {
                            log_error!("conversation driver stopped; dropping visibility change");
                        }
                    }
                    let _ = tx.send(PageEvent::Section {
                        section: kind,
                        action: transition.action,
                    });
                });
                MountedSection { kind, binding }
            })
            .collect();

        let projects = ProjectsShowcase::default();
        let grid = StaggeredReveal::new(
            projects.projects().len(),
            Duration::from_millis(settings.reveal.stagger_step_ms),
            settings.reveal.projects_options(),
        );
        let cards = grid
            .cards()
            .map(|(card, controller)| {
                let tx = events_tx.clone();
                RevealBinding::bind(source, controller, move |transition| {
                    let _ = tx.send(PageEvent::Card(card.reveal(transition.action)));
                })
            })
            .collect();

        let utm = landing_url.map(UtmParams::from_url).unwrap_or_default();
        log_info!("page mounted ({} sections, {} cards)", SectionKind::ALL.len(), projects.projects().len());

        Self {
            sections,
            cards,
            conversation,
            events,
            header: HeaderState::new(settings.header.clone()),
            marquee: Marquee::new(HERO_BENEFITS),
            comparison: ComparisonTable::default(),
            projects,
            lead_form: LeadForm::new(utm),
        }
    }

    pub fn region(&self, kind: SectionKind) -> Option<RegionId> {
        self.mounted(kind).map(|section| section.binding.region())
    }

    pub fn card_regions(&self) -> Vec<RegionId> {
        self.cards.iter().map(RevealBinding::region).collect()
    }

    pub fn section_state(&self, kind: SectionKind) -> Option<RevealState> {
        self.mounted(kind).map(|section| section.binding.state())
    }

    pub fn card_states(&self) -> Vec<RevealState> {
        self.cards.iter().map(RevealBinding::state).collect()
    }

    pub fn conversation(&self) -> &ConversationDriver {
        &self.conversation
    }

    /// Next reveal event, waiting if none is queued.
    pub async fn next_event(&mut self) -> Option<PageEvent> {
        self.events.recv().await
    }

    /// Reveal events queued so far.
    pub fn drain_events(&mut self) -> Vec<PageEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }

    /// Tear the page down: stop observing every region and stop the chat.
    pub async fn unmount<S>(mut self, source: &mut S) -> Result<()>
    where
        S: VisibilitySource + ?Sized,
    {
        for section in &mut self.sections {
            section.binding.unbind(source).await?;
        }
        for card in &mut self.cards {
            card.unbind(source).await?;
        }
        self.conversation.shutdown().await?;
        log_info!("page unmounted");
        Ok(())
    }

    fn mounted(&self, kind: SectionKind) -> Option<&MountedSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}
