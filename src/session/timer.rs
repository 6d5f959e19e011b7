//! Second-granularity countdowns driven by the session's external clock.
//!
//! Every countdown carries the generation it was armed in. A countdown whose
//! generation no longer matches the session's current generation is stale —
//! it belongs to a question or lifeline that has since been replaced — and
//! must be discarded instead of fired.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    generation: u64,
}

impl Countdown {
    pub fn new(seconds: u32, generation: u64) -> Self {
        Self {
            remaining: seconds,
            generation,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stale(&self, current_generation: u64) -> bool {
        self.generation != current_generation
    }

    /// Advance one second. Returns true when the countdown elapses on this
    /// tick; further ticks after that keep returning false.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let mut countdown = Countdown::new(2, 0);
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn staleness_tracks_generation() {
        let countdown = Countdown::new(5, 3);
        assert!(!countdown.is_stale(3));
        assert!(countdown.is_stale(4));
    }
}
