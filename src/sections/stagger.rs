use std::time::Duration;

use serde::Serialize;

use crate::visibility::{ObserverOptions, RegionId, RevealAction, RevealController, RevealMode};

/// Transition delay for the card at `index`; later cards start later.
pub fn card_delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardReveal {
    pub index: usize,
    pub action: RevealAction,
    pub delay_ms: u64,
}

/// Position of a card in the grid and the delay that position earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggeredCard {
    pub index: usize,
    pub delay: Duration,
}

impl StaggeredCard {
    pub fn reveal(&self, action: RevealAction) -> CardReveal {
        CardReveal {
            index: self.index,
            action,
            delay_ms: self.delay.as_millis() as u64,
        }
    }
}

/// Builds one-shot reveal controllers for a grid of cards, each delayed by
/// its position. The controllers are handed to bindings; the grid keeps no
/// reveal state of its own.
#[derive(Debug, Clone)]
pub struct StaggeredReveal {
    step: Duration,
    options: ObserverOptions,
    regions: Vec<RegionId>,
}

impl StaggeredReveal {
    pub fn new(count: usize, step: Duration, options: ObserverOptions) -> Self {
        Self {
            step,
            options,
            regions: (0..count).map(|_| RegionId::new()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        card_delay(index, self.step)
    }

    /// Every card paired with a fresh controller for its region.
    pub fn cards(&self) -> impl Iterator<Item = (StaggeredCard, RevealController)> + '_ {
        self.regions.iter().enumerate().map(|(index, region)| {
            let card = StaggeredCard {
                index,
                delay: self.delay_for(index),
            };
            let controller = RevealController::new(*region, RevealMode::OneShot, self.options);
            (card, controller)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::VisibilityObservation;

    #[test]
    fn delays_grow_with_position() {
        let step = Duration::from_millis(100);
        let delays: Vec<Duration> = (0..4).map(|i| card_delay(i, step)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300)
            ]
        );
    }

    #[test]
    fn cards_carry_their_region_and_delay() {
        let grid = StaggeredReveal::new(3, Duration::from_millis(100), ObserverOptions::default());
        let third = grid.regions()[2];
        let (card, mut controller) = grid.cards().nth(2).unwrap();

        assert_eq!(controller.region(), third);
        assert_eq!(controller.mode(), RevealMode::OneShot);

        let seen = VisibilityObservation::from_ratio(third, 0.6, 0.1);
        let action = controller.handle(&seen).unwrap();
        assert_eq!(
            card.reveal(action),
            CardReveal {
                index: 2,
                action: RevealAction::Reveal,
                delay_ms: 200
            }
        );
        assert_eq!(controller.handle(&seen), None);
    }

    #[test]
    fn empty_grid_has_no_cards() {
        let grid = StaggeredReveal::new(0, Duration::from_millis(100), ObserverOptions::default());
        assert!(grid.is_empty());
        assert_eq!(grid.cards().count(), 0);
    }
}
