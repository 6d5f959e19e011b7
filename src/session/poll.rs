//! The simulated audience poll behind the audience lifeline.

use rand::seq::SliceRandom;
use rand::Rng;

pub const OPTION_COUNT: usize = 4;

/// Vote tally for the four options of the current question. Finalization
/// always yields whole percentages summing to exactly 100; a poll with zero
/// votes finalizes to the uniform 25/25/25/25 distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudiencePoll {
    votes: [u32; OPTION_COUNT],
}

impl AudiencePoll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vote. Out-of-range options are ignored.
    pub fn record_vote(&mut self, option: usize) {
        if let Some(slot) = self.votes.get_mut(option) {
            *slot += 1;
        }
    }

    pub fn total_votes(&self) -> u32 {
        self.votes.iter().sum()
    }

    pub fn votes(&self) -> [u32; OPTION_COUNT] {
        self.votes
    }

    /// Convert the tally into percentages using largest-remainder rounding so
    /// the result sums to exactly 100.
    pub fn finalize(&self) -> [u8; OPTION_COUNT] {
        let total = self.total_votes();
        if total == 0 {
            return [25; OPTION_COUNT];
        }

        let mut percentages = [0u8; OPTION_COUNT];
        let mut remainders: Vec<(usize, u32)> = Vec::with_capacity(OPTION_COUNT);
        let mut allocated: u32 = 0;
        for (i, &votes) in self.votes.iter().enumerate() {
            let scaled = votes * 100;
            percentages[i] = (scaled / total) as u8;
            allocated += u32::from(percentages[i]);
            remainders.push((i, scaled % total));
        }

        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut leftover = 100 - allocated;
        for (i, _) in remainders {
            if leftover == 0 {
                break;
            }
            percentages[i] += 1;
            leftover -= 1;
        }
        percentages
    }
}

/// A random crowd distribution summing to 100, used when a poll result is
/// needed without a live voting session.
pub fn synthetic_poll() -> [u8; OPTION_COUNT] {
    let mut rng = rand::thread_rng();
    let mut percentages = [0u8; OPTION_COUNT];
    let mut remaining: u8 = 100;
    for slot in percentages.iter_mut().take(OPTION_COUNT - 1) {
        let share = rng.gen_range(0..=remaining);
        *slot = share;
        remaining -= share;
    }
    percentages[OPTION_COUNT - 1] = remaining;
    percentages.shuffle(&mut rng);
    percentages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_votes_finalizes_uniform() {
        assert_eq!(AudiencePoll::new().finalize(), [25, 25, 25, 25]);
    }

    #[test]
    fn percentages_always_sum_to_100() {
        let tallies: [[u32; 4]; 5] = [
            [1, 1, 1, 0],
            [3, 3, 3, 1],
            [7, 0, 0, 0],
            [1, 2, 3, 4],
            [33, 33, 33, 1],
        ];
        for votes in tallies {
            let mut poll = AudiencePoll::new();
            for (option, &count) in votes.iter().enumerate() {
                for _ in 0..count {
                    poll.record_vote(option);
                }
            }
            let percentages = poll.finalize();
            let sum: u32 = percentages.iter().map(|&p| u32::from(p)).sum();
            assert_eq!(sum, 100, "votes {votes:?} gave {percentages:?}");
        }
    }

    #[test]
    fn out_of_range_votes_are_ignored() {
        let mut poll = AudiencePoll::new();
        poll.record_vote(9);
        assert_eq!(poll.total_votes(), 0);
    }

    #[test]
    fn synthetic_poll_sums_to_100() {
        for _ in 0..100 {
            let percentages = synthetic_poll();
            let sum: u32 = percentages.iter().map(|&p| u32::from(p)).sum();
            assert_eq!(sum, 100);
        }
    }
}
