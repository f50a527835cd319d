use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use crate::{
    conversation::PlaybackPhase,
    lead::{Field, LogNavigator},
    sections::{Page, SectionKind},
    settings::SiteSettings,
    visibility::{Rect, RevealState, ScrollViewport},
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

const VIEWPORT_HEIGHT: f64 = 900.0;
const SECTION_HEIGHT: f64 = 1100.0;
const SCROLL_STEP: f64 = 450.0;
const FRAME: Duration = Duration::from_millis(16);

fn emit<T: Serialize>(event: &str, payload: &T) {
    match serde_json::to_string(payload) {
        Ok(json) => println!("{{\"event\":\"{event}\",\"payload\":{json}}}"),
        Err(err) => log_warn!("failed to serialize {event}: {err}"),
    }
}

fn lay_out(page: &Page, viewport: &mut ScrollViewport) {
    let mut projects_top = 0.0;
    for (position, kind) in SectionKind::ALL.into_iter().enumerate() {
        let top = position as f64 * SECTION_HEIGHT;
        if kind == SectionKind::Projects {
            projects_top = top;
        }
        if let Some(region) = page.region(kind) {
            viewport.place(region, Rect::new(top, SECTION_HEIGHT));
        }
    }

    // Three cards per row below the section heading.
    for (index, region) in page.card_regions().into_iter().enumerate() {
        let row = (index / 3) as f64;
        viewport.place(region, Rect::new(projects_top + 300.0 + row * 480.0, 450.0));
    }
}

/// Scroll through the whole page once, play the chat demo, browse a project
/// and submit the lead form. Every state change is printed as a JSON line.
pub async fn walkthrough(settings: SiteSettings, landing_url: Option<Url>) -> Result<()> {
    let mut viewport = ScrollViewport::new(VIEWPORT_HEIGHT);
    let mut page = Page::mount(&mut viewport, &settings, landing_url.as_ref());
    lay_out(&page, &mut viewport);

    let mut snapshots = page.conversation().subscribe();
    let page_bottom = SectionKind::ALL.len() as f64 * SECTION_HEIGHT;
    let mut scroll_y = 0.0;

    while scroll_y <= page_bottom {
        viewport.scroll_to(scroll_y);
        if page.header.on_scroll(scroll_y) {
            emit("header", &page.header);
        }
        tokio::time::sleep(FRAME).await;

        for event in page.drain_events() {
            emit("reveal", &event);
        }

        if page.section_state(SectionKind::AiAgents) == Some(RevealState::Revealed)
            && snapshots.borrow().phase != PlaybackPhase::Finished
        {
            log_info!("chat demo on screen at scroll {}", scroll_y);
            loop {
                snapshots
                    .changed()
                    .await
                    .context("conversation driver stopped")?;
                let snapshot = snapshots.borrow_and_update().clone();
                emit("conversation", &snapshot);
                if snapshot.phase == PlaybackPhase::Finished {
                    break;
                }
            }
        }

        scroll_y += SCROLL_STEP;
    }

    emit("marquee", &page.marquee.animation());

    if let Some(mut tooltip) = page
        .comparison
        .rows()
        .get(1)
        .and_then(|row| row.freelancers.tooltip())
    {
        tooltip.hover_enter();
        emit("tooltip", &tooltip);
    }
    emit("comparison", &page.comparison.toggle(2));
    emit("comparison", &page.comparison.toggle(5));
    emit("comparison", &page.comparison.toggle(5));

    if let Some(project) = page.projects.open_details(0) {
        emit("projectOpened", project);
    }
    page.projects.modal_mut().on_key("Escape");
    emit("projectClosed", &page.projects.modal_title());

    page.lead_form.set_field(Field::Name, "Maria Silva");
    page.lead_form.set_field(Field::Email, "maria@empresa");
    page.lead_form.set_field(Field::Phone, "11999998888");
    let mut navigator = LogNavigator::default();
    if let Err(err) = page.lead_form.submit(&settings.redirect, &mut navigator) {
        log_info!("lead rejected: {err}");
        emit("leadErrors", page.lead_form.errors());
    }

    page.lead_form.set_field(Field::Email, "maria@empresa.com.br");
    let url = page
        .lead_form
        .submit(&settings.redirect, &mut navigator)
        .context("lead submission failed")?;
    emit("leadRedirect", &url.as_str());

    page.unmount(&mut viewport).await
}
