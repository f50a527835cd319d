use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::controller::{RevealAction, RevealController, RevealState};
use super::observation::{ObservationStream, RegionId, VisibilitySource};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RevealTransition {
    pub region: RegionId,
    pub action: RevealAction,
}

/// Live subscription tying a [`RevealController`] to a visibility source.
///
/// Every transition is handed to `on_transition`; after [`unbind`] the
/// callback is never invoked again. Dropping the binding cancels the loop
/// too, and the source forgets the region once the stream is gone.
///
/// [`unbind`]: RevealBinding::unbind
pub struct RevealBinding {
    region: RegionId,
    handle: Option<JoinHandle<RevealController>>,
    cancel_token: Option<CancellationToken>,
    state_rx: watch::Receiver<RevealState>,
}

impl RevealBinding {
    pub fn bind<S, F>(source: &mut S, controller: RevealController, mut on_transition: F) -> Self
    where
        S: VisibilitySource + ?Sized,
        F: FnMut(RevealTransition) + Send + 'static,
    {
        let region = controller.region();

        match source.observe(region, controller.options()) {
            Ok(stream) => {
                let (state_tx, state_rx) = watch::channel(controller.state());
                let cancel_token = CancellationToken::new();
                let handle = tokio::spawn(reveal_loop(
                    controller,
                    stream,
                    state_tx,
                    cancel_token.clone(),
                    on_transition,
                ));

                Self {
                    region,
                    handle: Some(handle),
                    cancel_token: Some(cancel_token),
                    state_rx,
                }
            }
            Err(err) => {
                log_warn!("cannot observe region {}: {}; revealing immediately", region, err);
                let controller =
                    RevealController::fail_open(region, controller.mode(), controller.options());
                on_transition(RevealTransition {
                    region,
                    action: RevealAction::Reveal,
                });
                let (_state_tx, state_rx) = watch::channel(controller.state());

                Self {
                    region,
                    handle: None,
                    cancel_token: None,
                    state_rx,
                }
            }
        }
    }

    pub fn region(&self) -> RegionId {
        self.region
    }

    pub fn state(&self) -> RevealState {
        *self.state_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RevealState> {
        self.state_rx.clone()
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop observing and wait for the reveal loop to exit.
    pub async fn unbind<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: VisibilitySource + ?Sized,
    {
        source.unobserve(self.region);

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            let mut controller = handle
                .await
                .with_context(|| format!("reveal loop for region {} failed to join", self.region))?;
            controller.detach();
        }
        Ok(())
    }
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}

async fn reveal_loop<F>(
    mut controller: RevealController,
    mut stream: ObservationStream,
    state_tx: watch::Sender<RevealState>,
    cancel_token: CancellationToken,
    mut on_transition: F,
) -> RevealController
where
    F: FnMut(RevealTransition) + Send + 'static,
{
    let region = controller.region();

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_debug!("reveal loop for region {} cancelled", region);
                break;
            }
            observation = stream.recv() => {
                let Some(observation) = observation else {
                    log_debug!("observation stream for region {} closed", region);
                    break;
                };

                if let Some(action) = controller.handle(&observation) {
                    log_info!("region {} {:?}", region, action);
                    let _ = state_tx.send(controller.state());
                    on_transition(RevealTransition { region, action });
                }
            }
        }
    }

    controller.detach();
    controller
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::visibility::{ObserverOptions, Rect, RevealMode, ScrollViewport};

    fn recorder() -> (Arc<Mutex<Vec<RevealAction>>>, impl FnMut(RevealTransition) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = seen.clone();
            move |transition: RevealTransition| seen.lock().unwrap().push(transition.action)
        };
        (seen, sink)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn one_shot_binding_reveals_once_across_scrolls() {
        let mut viewport = ScrollViewport::new(1000.0);
        let region = RegionId::new();
        let controller =
            RevealController::new(region, RevealMode::OneShot, ObserverOptions::default());
        let (seen, sink) = recorder();
        let mut binding = RevealBinding::bind(&mut viewport, controller, sink);

        viewport.place(region, Rect::new(1200.0, 400.0));
        viewport.scroll_to(600.0);
        viewport.scroll_to(0.0);
        viewport.scroll_to(600.0);
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![RevealAction::Reveal]);
        assert_eq!(binding.state(), RevealState::Revealed);
        binding.unbind(&mut viewport).await.unwrap();
    }

    #[tokio::test]
    async fn toggle_binding_reports_every_crossing() {
        let mut viewport = ScrollViewport::new(1000.0);
        let region = RegionId::new();
        let controller =
            RevealController::new(region, RevealMode::Toggle, ObserverOptions::default());
        let (seen, sink) = recorder();
        let mut binding = RevealBinding::bind(&mut viewport, controller, sink);

        viewport.place(region, Rect::new(0.0, 400.0));
        viewport.scroll_to(2000.0);
        viewport.scroll_to(0.0);
        settle().await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![RevealAction::Reveal, RevealAction::Hide, RevealAction::Reveal]
        );
        binding.unbind(&mut viewport).await.unwrap();
    }

    #[tokio::test]
    async fn nothing_fires_after_unbind() {
        let mut viewport = ScrollViewport::new(1000.0);
        let region = RegionId::new();
        let controller =
            RevealController::new(region, RevealMode::Toggle, ObserverOptions::default());
        let (seen, sink) = recorder();
        let mut binding = RevealBinding::bind(&mut viewport, controller, sink);

        binding.unbind(&mut viewport).await.unwrap();
        viewport.place(region, Rect::new(0.0, 400.0));
        settle().await;

        assert!(seen.lock().unwrap().is_empty());
        assert!(!binding.is_live());
    }

    #[tokio::test]
    async fn dropped_binding_releases_its_region() {
        let mut viewport = ScrollViewport::new(1000.0);
        let region = RegionId::new();
        let controller =
            RevealController::new(region, RevealMode::Toggle, ObserverOptions::default());
        let (seen, sink) = recorder();
        let binding = RevealBinding::bind(&mut viewport, controller, sink);
        assert_eq!(viewport.observed_count(), 1);

        drop(binding);
        settle().await;
        viewport.place(region, Rect::new(0.0, 400.0));

        assert_eq!(viewport.observed_count(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_source_fails_open() {
        let mut viewport = ScrollViewport::unavailable(1000.0);
        let region = RegionId::new();
        let controller =
            RevealController::new(region, RevealMode::OneShot, ObserverOptions::default());
        let (seen, sink) = recorder();
        let binding = RevealBinding::bind(&mut viewport, controller, sink);

        assert_eq!(*seen.lock().unwrap(), vec![RevealAction::Reveal]);
        assert_eq!(binding.state(), RevealState::Revealed);
        assert!(!binding.is_live());
    }
}
