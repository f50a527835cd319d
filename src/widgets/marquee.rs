use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MarqueeSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl MarqueeSpeed {
    /// Time for one full pass of the item track.
    pub fn loop_duration(self) -> Duration {
        match self {
            MarqueeSpeed::Slow => Duration::from_secs(40),
            MarqueeSpeed::Normal => Duration::from_secs(30),
            MarqueeSpeed::Fast => Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MarqueeDirection {
    #[default]
    Left,
    Right,
}

impl MarqueeDirection {
    pub fn animation_direction(self) -> &'static str {
        match self {
            MarqueeDirection::Left => "normal",
            MarqueeDirection::Right => "reverse",
        }
    }
}

/// Endless ticker of short benefit lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Marquee {
    pub items: Vec<String>,
    pub speed: MarqueeSpeed,
    pub direction: MarqueeDirection,
}

impl Marquee {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            speed: MarqueeSpeed::default(),
            direction: MarqueeDirection::default(),
        }
    }

    pub fn with_speed(mut self, speed: MarqueeSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_direction(mut self, direction: MarqueeDirection) -> Self {
        self.direction = direction;
        self
    }

    /// CSS `animation` shorthand for each copy of the track.
    pub fn animation(&self) -> String {
        format!(
            "marquee {}s linear infinite {}",
            self.speed.loop_duration().as_secs(),
            self.direction.animation_direction()
        )
    }

    /// Items as laid out on screen: the list twice, so the loop has no seam.
    pub fn track(&self) -> impl Iterator<Item = &str> {
        self.items.iter().chain(self.items.iter()).map(String::as_str)
    }
}
