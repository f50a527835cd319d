pub mod header;
pub mod marquee;
pub mod modal;
pub mod tooltip;

pub use header::{HeaderConfig, HeaderState};
pub use marquee::{Marquee, MarqueeDirection, MarqueeSpeed};
pub use modal::Modal;
pub use tooltip::Tooltip;
