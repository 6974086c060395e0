//! Ultimatum Game
//!
//! The player proposes how much of a fixed endowment to offer; a
//! simulated responder accepts with a probability that rises steeply
//! around a third of the pot.

use serde::{Deserialize, Serialize};
use crate::config::{InputRange, Setting};
use crate::error::EngineError;
use crate::game::{Game, Settlement, Totals};
use crate::payoff::ultimatum_split;
use crate::policy::LogisticResponder;
use crate::random::RandomSource;

/// Amount split each round
pub const ENDOWMENT: f64 = 100.0;

/// Rows kept in the Ultimatum history table
pub const ULTIMATUM_HISTORY_LIMIT: usize = 100;

/// Responder's decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Responder's decision together with the probability it drew against
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub acceptance_probability: f64,
}

/// Probability the responder drew against
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AcceptanceReport {
    pub acceptance_probability: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UltimatumGame {
    endowment: f64,
    responder: LogisticResponder,
}

impl UltimatumGame {
    pub fn new() -> Self {
        Self::with_responder(ENDOWMENT, LogisticResponder::STANDARD)
    }

    pub fn with_responder(endowment: f64, responder: LogisticResponder) -> Self {
        Self { endowment, responder }
    }

    pub fn endowment(&self) -> f64 {
        self.endowment
    }

    pub fn acceptance_probability(&self, offer: f64) -> f64 {
        self.responder.acceptance_probability(offer)
    }

    /// Parse the page's offer percentage into an offer fraction
    pub fn parse_offer(raw: &str) -> (f64, Setting) {
        let setting = InputRange::PERCENT.apply(raw);
        (setting.fraction(), setting)
    }
}

impl Default for UltimatumGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for UltimatumGame {
    /// Offer as a fraction of the endowment
    type Action = f64;
    type Response = Decision;
    type Standing = Totals;
    type Report = AcceptanceReport;

    const HISTORY_LIMIT: usize = ULTIMATUM_HISTORY_LIMIT;

    fn name(&self) -> &'static str {
        "Ultimatum Game"
    }

    fn validate(&self, offer: f64) -> Result<f64, EngineError> {
        crate::config::unit_fraction(offer).ok_or_else(|| EngineError::invalid_action(self.name(), offer))
    }

    fn opening(&self) -> Totals {
        Totals::default()
    }

    fn respond(&self, offer: &f64, _: &Totals, rng: &mut dyn RandomSource) -> Decision {
        let (accepted, acceptance_probability) = self.responder.decide(*offer, rng);
        let verdict = if accepted { Verdict::Accepted } else { Verdict::Rejected };
        Decision { verdict, acceptance_probability }
    }

    fn settle(
        &self,
        offer: &f64,
        decision: &Decision,
        standing: &Totals,
    ) -> Result<Settlement<Totals, AcceptanceReport>, EngineError> {
        let payoffs = ultimatum_split(*offer, decision.verdict.is_accepted(), self.endowment);
        Ok(Settlement {
            payoffs,
            standing: standing.add(payoffs),
            report: AcceptanceReport {
                acceptance_probability: decision.acceptance_probability,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::Payoffs;
    use crate::random::{ScriptedRng, SeededRng};
    use crate::session::Session;

    #[test]
    fn test_accepted_offer_splits_endowment() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = ScriptedRng::new([0.0]);
        let outcome = session.play(0.25, &mut rng).unwrap();
        assert_eq!(outcome.response.verdict, Verdict::Accepted);
        assert_eq!(outcome.payoffs, Payoffs::new(75.0, 25.0));
        assert_eq!(outcome.standing, Totals { player: 75.0, opponent: 25.0 });
    }

    #[test]
    fn test_report_carries_the_probability_drawn_against() {
        let game = UltimatumGame::new();
        let mut session = Session::new(game);
        let mut rng = ScriptedRng::new([0.9, 0.96]);
        let expected = game.acceptance_probability(0.5);

        let accepted = session.play(0.5, &mut rng).unwrap();
        assert_eq!(accepted.response.verdict, Verdict::Accepted);
        assert_eq!(accepted.response.acceptance_probability, expected);
        assert_eq!(accepted.report.acceptance_probability, expected);

        let rejected = session.play(0.5, &mut rng).unwrap();
        assert_eq!(rejected.response.verdict, Verdict::Rejected);
        assert_eq!(rejected.report.acceptance_probability, expected);
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn test_rejected_offer_pays_nothing() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = ScriptedRng::new([0.99]);
        let outcome = session.play(0.25, &mut rng).unwrap();
        assert_eq!(outcome.response.verdict, Verdict::Rejected);
        assert_eq!(outcome.payoffs, Payoffs::ZERO);
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn test_full_offer_always_accepted() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = SeededRng::from_u64(11);
        for _ in 0..200 {
            let outcome = session.play(1.0, &mut rng).unwrap();
            assert!(outcome.response.verdict.is_accepted());
            assert_eq!(outcome.report.acceptance_probability, 1.0);
        }
    }

    #[test]
    fn test_offer_is_clamped() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = ScriptedRng::new([0.5]);
        let outcome = session.play(1.5, &mut rng).unwrap();
        assert_eq!(outcome.action, 1.0);
        let outcome = session.play(-0.3, &mut rng).unwrap();
        assert_eq!(outcome.action, 0.0);
        assert_eq!(outcome.report.acceptance_probability, 0.01);
    }

    #[test]
    fn test_nan_offer_is_invalid() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = ScriptedRng::new([0.5]);
        assert!(matches!(
            session.play(f64::NAN, &mut rng),
            Err(EngineError::InvalidAction { .. })
        ));
        assert_eq!(session.round(), 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_parse_offer() {
        let (offer, setting) = UltimatumGame::parse_offer("40");
        assert_eq!(offer, 0.4);
        assert!(setting.issue.is_none());
        let (offer, setting) = UltimatumGame::parse_offer("lots");
        assert_eq!(offer, 0.5);
        assert!(setting.issue.is_some());
    }

    #[test]
    fn test_auto_play_runs_to_completion() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = SeededRng::from_u64(4);
        let outcomes = session.auto_play(20, 0.4, &mut rng).unwrap();
        assert_eq!(outcomes.len(), 20);
        assert_eq!(outcomes.first().map(|o| o.round), Some(1));
        assert_eq!(outcomes.last().map(|o| o.round), Some(20));
        assert_eq!(session.round(), 20);
    }

    #[test]
    fn test_auto_play_rejects_before_playing() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = SeededRng::from_u64(4);
        assert!(session.auto_play(5, f64::NAN, &mut rng).is_err());
        assert_eq!(session.round(), 0);
    }

    #[test]
    fn test_history_keeps_last_hundred() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = SeededRng::from_u64(8);
        session.auto_play(130, 0.5, &mut rng).unwrap();
        let history = session.history();
        assert_eq!(history.len(), 100);
        assert_eq!(history.latest().map(|o| o.round), Some(130));
        assert_eq!(history.iter().last().map(|o| o.round), Some(31));
    }

    #[test]
    fn test_totals_match_history_sum() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = SeededRng::from_u64(21);
        session.auto_play(50, 0.35, &mut rng).unwrap();
        let (p, o) = session
            .history()
            .iter()
            .fold((0.0, 0.0), |(p, o), r| (p + r.payoffs.player, o + r.payoffs.opponent));
        assert!((session.standing().player - p).abs() < 1e-9);
        assert!((session.standing().opponent - o).abs() < 1e-9);
    }

    #[test]
    fn test_reset_after_auto_play() {
        let mut session = Session::new(UltimatumGame::new());
        let mut rng = SeededRng::from_u64(2);
        session.auto_play(5, 0.5, &mut rng).unwrap();
        session.reset();
        assert_eq!(session.round(), 0);
        assert_eq!(*session.standing(), Totals::default());
        assert!(session.history().is_empty());
    }
}
