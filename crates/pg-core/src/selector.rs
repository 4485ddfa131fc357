use rand::Rng;

use crate::history::History;

/// Highest national dex number known to the catalog.
pub const DEFAULT_MAX_ID: u32 = 1025;

/// Redraws allowed when a draw hits the history.
pub const DEFAULT_REDRAWS: u32 = 5;

/// Draws ids uniformly from `[1, max_id]`, redrawing a bounded number of
/// times when the draw was picked recently.
///
/// Repeat avoidance is best effort: once the retry budget is spent, or when
/// the history already covers the whole range, the last draw is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    max_id: u32,
    redraws: u32,
}

impl Selector {
    /// A selector over `[1, max_id]`. A `max_id` of zero is treated as one.
    pub fn new(max_id: u32) -> Self {
        Self {
            max_id: max_id.max(1),
            redraws: DEFAULT_REDRAWS,
        }
    }

    /// Set the redraw budget.
    pub fn with_redraws(mut self, redraws: u32) -> Self {
        self.redraws = redraws;
        self
    }

    /// Upper bound of the id range.
    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// Draw the next id.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R, history: &History) -> u32 {
        let mut pick = rng.random_range(1..=self.max_id);
        if history.distinct_in_range(self.max_id) >= self.max_id as usize {
            return pick;
        }

        for _ in 0..self.redraws {
            if !history.contains(pick) {
                break;
            }
            pick = rng.random_range(1..=self.max_id);
        }
        pick
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ID)
    }
}
