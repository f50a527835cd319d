use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::config::ConversationTiming;
use super::player::{ConversationPlayer, PlayerEvent};
use super::scheduler::{TimerTick, TokioScheduler};
use super::script::{ConversationScript, Message};
use super::state::PlaybackPhase;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

const EVENT_CAPACITY: usize = 64;

/// What the chat widget renders at a given moment.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSnapshot {
    pub messages: Vec<Message>,
    pub is_typing: bool,
    pub cursor: usize,
    pub total: usize,
    pub phase: PlaybackPhase,
    pub updated_at: DateTime<Utc>,
}

impl ConversationSnapshot {
    fn capture(player: &ConversationPlayer<TokioScheduler>) -> Self {
        let state = player.state();
        Self {
            messages: state.played.clone(),
            is_typing: state.is_typing,
            cursor: state.cursor,
            total: player.script().len(),
            phase: state.phase,
            updated_at: Utc::now(),
        }
    }
}

/// Handle used by the host section to report its visibility.
#[derive(Debug, Clone)]
pub struct VisibilityFeed {
    tx: mpsc::UnboundedSender<bool>,
}

impl VisibilityFeed {
    /// Returns false once the driver has shut down.
    pub fn send(&self, visible: bool) -> bool {
        self.tx.send(visible).is_ok()
    }
}

/// Runs a [`ConversationPlayer`] on the tokio runtime, gated by a visibility
/// feed, and publishes a snapshot after every change.
pub struct ConversationDriver {
    feed: VisibilityFeed,
    snapshots: watch::Receiver<ConversationSnapshot>,
    events: broadcast::Sender<PlayerEvent>,
    handle: Option<JoinHandle<()>>,
    cancel_token: CancellationToken,
}

impl ConversationDriver {
    pub fn spawn(script: ConversationScript, timing: ConversationTiming) -> Self {
        let (scheduler, ticks) = TokioScheduler::channel();
        let player = ConversationPlayer::new(script, timing, scheduler);

        let (visibility_tx, visibility_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(ConversationSnapshot::capture(&player));
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(drive(
            player,
            visibility_rx,
            ticks,
            snapshot_tx,
            events_tx.clone(),
            cancel_token.clone(),
        ));

        Self {
            feed: VisibilityFeed { tx: visibility_tx },
            snapshots: snapshot_rx,
            events: events_tx,
            handle: Some(handle),
            cancel_token,
        }
    }

    pub fn feed(&self) -> VisibilityFeed {
        self.feed.clone()
    }

    pub fn set_visible(&self, visible: bool) -> bool {
        self.feed.send(visible)
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.snapshots.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Stop the player; pending delays are cancelled with it.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.cancel_token.cancel();
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("conversation driver task failed to join")?;
        }
        Ok(())
    }
}

impl Drop for ConversationDriver {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn drive(
    mut player: ConversationPlayer<TokioScheduler>,
    mut visibility: mpsc::UnboundedReceiver<bool>,
    mut ticks: mpsc::UnboundedReceiver<TimerTick>,
    snapshots: watch::Sender<ConversationSnapshot>,
    events: broadcast::Sender<PlayerEvent>,
    cancel_token: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_debug!("conversation driver cancelled");
                break;
            }
            visible = visibility.recv() => {
                let Some(visible) = visible else {
                    break;
                };
                player.on_visibility(visible)
            }
            tick = ticks.recv() => {
                let Some(tick) = tick else {
                    break;
                };
                player.on_tick(tick)
            }
        };

        if let Some(event) = event {
            if let PlayerEvent::MessageRevealed { message, remaining } = &event {
                log_info!("revealed message {} ({} remaining)", message.id, remaining);
            }
            let _ = snapshots.send(ConversationSnapshot::capture(&player));
            let _ = events.send(event);
        }
    }

    player.reset();
}
