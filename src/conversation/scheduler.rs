use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TickKind {
    /// Typing delay elapsed; the next message is due.
    Reveal,
    /// Pause after a message elapsed; typing starts again.
    Resume,
}

/// Payload delivered back to the player when a scheduled delay elapses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerTick {
    pub generation: u64,
    pub kind: TickKind,
}

/// Delay facility used by the conversation player.
///
/// A scheduled tick is delivered back to the player's step function unless
/// it is cancelled first.
pub trait Scheduler {
    type Handle;

    fn schedule(&mut self, delay: Duration, tick: TimerTick) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Scheduler backed by tokio sleeps. Ticks arrive on the receiver returned by
/// [`TokioScheduler::channel`]; cancelling aborts the sleeping task.
///
/// `schedule` must be called from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerTick>,
}

impl TokioScheduler {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TimerTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&mut self, delay: Duration, tick: TimerTick) -> Self::Handle {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(tick);
        })
    }

    fn cancel(&mut self, handle: Self::Handle) {
        handle.abort();
    }
}

/// Virtual-clock scheduler for hosts that step time themselves.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<(u64, Duration, TimerTick)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending tick, if any.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(_, due, _)| due.saturating_sub(self.now))
            .min()
    }

    /// Move the clock forward and return the ticks that came due, earliest
    /// first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTick> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<(u64, Duration, TimerTick)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.1 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(id, at, _)| (*at, *id));
        due.into_iter().map(|(_, _, tick)| tick).collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&mut self, delay: Duration, tick: TimerTick) -> Self::Handle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push((id, self.now + delay, tick));
        id
    }

    fn cancel(&mut self, handle: Self::Handle) {
        self.pending.retain(|(id, _, _)| *id != handle);
    }
}
