pub mod config;
pub mod driver;
pub mod player;
pub mod scheduler;
pub mod script;
pub mod state;

pub use config::ConversationTiming;
pub use driver::{ConversationDriver, ConversationSnapshot, VisibilityFeed};
pub use player::{ConversationPlayer, PlayerEvent};
pub use scheduler::{ManualScheduler, Scheduler, TickKind, TimerTick, TokioScheduler};
pub use script::{ConversationScript, Message, Role};
pub use state::{PlaybackPhase, PlaybackState};
