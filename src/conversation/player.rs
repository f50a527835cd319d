use serde::Serialize;

use super::config::ConversationTiming;
use super::scheduler::{Scheduler, TickKind, TimerTick};
use super::script::{ConversationScript, Message, Role};
use super::state::{PlaybackPhase, PlaybackState};

const ENABLE_LOGS: bool = false;

use crate::{log_debug, log_warn};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerEvent {
    #[serde(rename_all = "camelCase")]
    TypingStarted { next_id: u32, sender: Role },
    #[serde(rename_all = "camelCase")]
    MessageRevealed { message: Message, remaining: usize },
    Reset,
}

/// Replays a [`ConversationScript`] with role-dependent typing delays.
///
/// Time only moves through [`on_tick`]: the player asks its scheduler for one
/// delay at a time and advances when that tick comes back. Every reset bumps
/// a generation counter so ticks from an earlier run are dropped even if the
/// scheduler already delivered them.
///
/// [`on_tick`]: ConversationPlayer::on_tick
pub struct ConversationPlayer<S: Scheduler> {
    script: ConversationScript,
    timing: ConversationTiming,
    scheduler: S,
    state: PlaybackState,
    started: bool,
    generation: u64,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> ConversationPlayer<S> {
    pub fn new(script: ConversationScript, timing: ConversationTiming, scheduler: S) -> Self {
        Self {
            script,
            timing,
            scheduler,
            state: PlaybackState::new(),
            started: false,
            generation: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn script(&self) -> &ConversationScript {
        &self.script
    }

    pub fn timing(&self) -> &ConversationTiming {
        &self.timing
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin playback from the first message. Ignored while a run is already
    /// in progress or has not been reset since it last ran.
    pub fn start(&mut self) -> Option<PlayerEvent> {
        if self.started || self.state.cursor != 0 {
            log_debug!("conversation start ignored: already started");
            return None;
        }

        self.started = true;
        if self.script.is_empty() {
            self.state.phase = PlaybackPhase::Finished;
            return None;
        }

        self.begin_typing()
    }

    /// Drive the player with visibility of its host section.
    pub fn on_visibility(&mut self, visible: bool) -> Option<PlayerEvent> {
        if visible {
            self.start()
        } else if self.started || self.state != PlaybackState::default() {
            self.reset();
            Some(PlayerEvent::Reset)
        } else {
            None
        }
    }

    /// Step function for elapsed delays.
    pub fn on_tick(&mut self, tick: TimerTick) -> Option<PlayerEvent> {
        if tick.generation != self.generation || self.pending.is_none() {
            log_debug!(
                "dropping stale {:?} tick (generation {} != {})",
                tick.kind,
                tick.generation,
                self.generation
            );
            return None;
        }
        self.pending = None;

        match (tick.kind, self.state.phase) {
            (TickKind::Reveal, PlaybackPhase::Typing) => {
                let message = self.state.reveal_next(&self.script)?;
                let remaining = self.script.len() - self.state.cursor;
                if remaining > 0 {
                    self.arm(self.timing.pause(), TickKind::Resume);
                }
                Some(PlayerEvent::MessageRevealed { message, remaining })
            }
            (TickKind::Resume, PlaybackPhase::Pausing) => self.begin_typing(),
            (kind, phase) => {
                log_warn!("unexpected {:?} tick in {:?} phase", kind, phase);
                None
            }
        }
    }

    /// Drop all progress and cancel the outstanding delay so a later
    /// [`start`](ConversationPlayer::start) plays from the top.
    pub fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.generation = self.generation.wrapping_add(1);
        self.started = false;
        self.state.reset();
    }

    fn begin_typing(&mut self) -> Option<PlayerEvent> {
        // Delay is chosen by the sender of the message about to appear.
        let next = self.script.get(self.state.cursor)?;
        let (next_id, sender) = (next.id, next.sender);

        self.state.begin_typing();
        self.arm(self.timing.typing_delay(sender), TickKind::Reveal);
        Some(PlayerEvent::TypingStarted { next_id, sender })
    }

    fn arm(&mut self, delay: std::time::Duration, kind: TickKind) {
        if let Some(previous) = self.pending.take() {
            self.scheduler.cancel(previous);
        }
        let tick = TimerTick {
            generation: self.generation,
            kind,
        };
        self.pending = Some(self.scheduler.schedule(delay, tick));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::conversation::scheduler::ManualScheduler;

    fn player() -> ConversationPlayer<ManualScheduler> {
        ConversationPlayer::new(
            ConversationScript::agent_demo(),
            ConversationTiming::default(),
            ManualScheduler::new(),
        )
    }

    fn advance(player: &mut ConversationPlayer<ManualScheduler>, ms: u64) -> Vec<PlayerEvent> {
        let ticks = player.scheduler_mut().advance(Duration::from_millis(ms));
        ticks
            .into_iter()
            .filter_map(|tick| player.on_tick(tick))
            .collect()
    }

    fn run_to_end(player: &mut ConversationPlayer<ManualScheduler>) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        while let Some(wait) = player.scheduler().next_due_in() {
            events.extend(advance(player, wait.as_millis() as u64));
        }
        events
    }

    #[test]
    fn reveals_every_message_in_order_with_typing_around_each() {
        let mut player = player();
        let script_ids: Vec<u32> = player.script().messages().iter().map(|m| m.id).collect();

        assert!(player.start().is_some());
        let mut revealed = Vec::new();
        while let Some(wait) = player.scheduler().next_due_in() {
            let before = player.state().clone();
            let events = advance(&mut player, wait.as_millis() as u64);
            for event in events {
                if let PlayerEvent::MessageRevealed { message, .. } = event {
                    assert!(before.is_typing, "typing must precede message {}", message.id);
                    assert!(!player.state().is_typing);
                    revealed.push(message.id);
                }
            }
        }

        assert_eq!(revealed, script_ids);
        assert_eq!(player.state().cursor, 3);
        assert_eq!(player.state().phase, PlaybackPhase::Finished);
        assert!(!player.has_pending_timer());
    }

    #[test]
    fn typing_delay_follows_the_upcoming_sender() {
        let mut player = player();
        player.start();

        // Agent message first: 2000ms of typing.
        assert!(advance(&mut player, 1999).is_empty());
        assert_eq!(advance(&mut player, 1).len(), 1);
        assert_eq!(player.state().cursor, 1);

        // 1000ms pause, then 1000ms typing for the user message.
        let events = advance(&mut player, 1000);
        assert_eq!(
            events,
            vec![PlayerEvent::TypingStarted {
                next_id: 2,
                sender: Role::User
            }]
        );
        assert!(advance(&mut player, 999).is_empty());
        assert_eq!(advance(&mut player, 1).len(), 1);
        assert_eq!(player.state().cursor, 2);
    }

    #[test]
    fn played_is_always_a_script_prefix() {
        let mut player = player();
        player.start();
        while let Some(wait) = player.scheduler().next_due_in() {
            advance(&mut player, wait.as_millis() as u64);
            let cursor = player.state().cursor;
            assert_eq!(player.state().played, player.script().messages()[..cursor].to_vec());
        }
    }

    #[test]
    fn second_start_while_playing_is_ignored() {
        let mut player = player();
        assert!(player.start().is_some());
        assert!(player.start().is_none());
        assert_eq!(player.scheduler().pending_count(), 1);
    }

    #[test]
    fn reset_with_pending_timer_leaves_no_ghost_message() {
        let mut player = player();
        player.start();
        advance(&mut player, 1500);
        assert!(player.state().is_typing);

        player.reset();
        assert_eq!(player.scheduler().pending_count(), 0);
        assert!(advance(&mut player, 10_000).is_empty());
        assert_eq!(*player.state(), PlaybackState::default());
    }

    #[test]
    fn late_tick_from_previous_run_is_dropped() {
        let mut player = player();
        player.start();
        let stale = TimerTick {
            generation: player.generation(),
            kind: TickKind::Reveal,
        };
        player.reset();
        player.start();

        assert!(player.on_tick(stale).is_none());
        assert!(player.state().played.is_empty());
        assert!(player.state().is_typing);
    }

    #[test]
    fn reentry_restarts_from_the_first_message() {
        let mut player = player();
        player.on_visibility(true);
        advance(&mut player, 2000);
        advance(&mut player, 1000);
        advance(&mut player, 1000);
        assert_eq!(player.state().cursor, 2);

        assert_eq!(player.on_visibility(false), Some(PlayerEvent::Reset));
        assert!(player.state().played.is_empty());

        let restart = player.on_visibility(true);
        assert_eq!(
            restart,
            Some(PlayerEvent::TypingStarted {
                next_id: 1,
                sender: Role::Agent
            })
        );
        let events = run_to_end(&mut player);
        let first = events.iter().find_map(|event| match event {
            PlayerEvent::MessageRevealed { message, .. } => Some(message.id),
            _ => None,
        });
        assert_eq!(first, Some(1));
        assert_eq!(player.state().cursor, 3);
    }

    #[test]
    fn finished_run_does_not_restart_without_reset() {
        let mut player = player();
        player.start();
        run_to_end(&mut player);
        assert!(player.start().is_none());
        assert_eq!(player.state().cursor, 3);
    }

    #[test]
    fn exit_before_any_entry_is_a_no_op() {
        let mut player = player();
        assert_eq!(player.on_visibility(false), None);
        assert_eq!(player.generation(), 0);
    }

    #[test]
    fn empty_script_finishes_immediately() {
        let script = ConversationScript::new(Vec::new()).unwrap();
        let mut player =
            ConversationPlayer::new(script, ConversationTiming::default(), ManualScheduler::new());
        assert!(player.start().is_none());
        assert_eq!(player.state().phase, PlaybackPhase::Finished);
        assert!(!player.has_pending_timer());
    }
}
