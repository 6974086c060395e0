//! Session state
//!
//! A [`Session`] owns one configured game together with its round
//! counter, current standing and bounded history. All mutation goes
//! through `&mut self`; there is no shared or global state.

use std::collections::VecDeque;
use serde::Serialize;
use crate::error::EngineError;
use crate::game::{play_round, Game, RoundOutcome};
use crate::random::RandomSource;

/// Newest-first list of outcomes, bounded to a fixed length
#[derive(Clone, Debug, PartialEq)]
pub struct History<T> {
    limit: usize,
    entries: VecDeque<T>,
}

impl<T> History<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::with_capacity(limit),
        }
    }

    /// Insert at the front, evicting the oldest entries past the limit
    pub fn push(&mut self, entry: T) {
        self.entries.push_front(entry);
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&T> {
        self.entries.front()
    }

    /// Entries, newest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Serialize> Serialize for History<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

/// Read-only view of a session for rendering
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct Snapshot<'a, G: Game> {
    pub game: &'static str,
    pub round: u32,
    pub standing: G::Standing,
    pub history: &'a History<RoundOutcome<G>>,
}

/// One play session of a configured game
#[derive(Debug)]
pub struct Session<G: Game> {
    game: G,
    round: u32,
    standing: G::Standing,
    history: History<RoundOutcome<G>>,
}

impl<G: Game> Session<G> {
    pub fn new(game: G) -> Self {
        let standing = game.opening();
        Self {
            game,
            round: 0,
            standing,
            history: History::new(G::HISTORY_LIMIT),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Mutable access to the game's configuration
    ///
    /// Changes take effect from the next round; totals are kept.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// Rounds played since the last reset
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn standing(&self) -> &G::Standing {
        &self.standing
    }

    pub fn history(&self) -> &History<RoundOutcome<G>> {
        &self.history
    }

    pub fn snapshot(&self) -> Snapshot<'_, G> {
        Snapshot {
            game: self.game.name(),
            round: self.round,
            standing: self.standing,
            history: &self.history,
        }
    }

    /// Play one round and fold its outcome into the session
    ///
    /// On `InvalidAction` nothing changes: counter, standing and history
    /// are left exactly as they were.
    pub fn play(&mut self, action: G::Action, rng: &mut dyn RandomSource) -> Result<RoundOutcome<G>, EngineError> {
        let outcome = play_round(&self.game, self.round, &self.standing, action, rng)?;
        self.round = outcome.round;
        self.standing = outcome.standing;
        self.history.push(outcome);
        Ok(outcome)
    }

    /// Play `n` rounds with the same action
    ///
    /// The action is validated once up front, so a batch either runs in
    /// full or not at all. Returns outcomes oldest first.
    pub fn auto_play(
        &mut self,
        n: u32,
        action: G::Action,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<RoundOutcome<G>>, EngineError> {
        let action = self.game.validate(action)?;
        let mut outcomes = Vec::with_capacity(n as usize);
        for _ in 0..n {
            outcomes.push(self.play(action, rng)?);
        }
        Ok(outcomes)
    }

    /// Back to round 0 with the opening standing and an empty history
    pub fn reset(&mut self) -> Snapshot<'_, G> {
        log::info!("{}: reset after {} rounds", self.game.name(), self.round);
        self.round = 0;
        self.standing = self.game.opening();
        self.history.clear();
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_newest_first_and_bounded() {
        let mut h = History::new(3);
        for i in 1..=5 {
            h.push(i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3]);
        assert_eq!(h.latest(), Some(&5));
    }

    #[test]
    fn test_history_clear() {
        let mut h = History::new(2);
        h.push("a");
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.limit(), 2);
    }

    #[test]
    fn test_history_serializes_as_list() {
        let mut h = History::new(5);
        h.push(1);
        h.push(2);
        assert_eq!(serde_json::to_string(&h).unwrap(), "[2,1]");
    }
}
