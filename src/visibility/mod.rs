pub mod binding;
pub mod config;
pub mod controller;
pub mod observation;
pub mod viewport;

pub use binding::{RevealBinding, RevealTransition};
pub use config::RevealConfig;
pub use controller::{RevealAction, RevealController, RevealMode, RevealState};
pub use observation::{
    ObservationStream, ObserveError, ObserverOptions, RegionId, VisibilityObservation,
    VisibilitySource, DEFAULT_THRESHOLD,
};
pub use viewport::{Rect, ScrollViewport};
