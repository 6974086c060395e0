//! Round execution engine
//!
//! Every demo is a [`Game`]: a configured value that knows its legal
//! actions, how the opponent responds, and how a round is settled. The
//! engine itself ([`play_round`]) is shared by all of them.

use core::fmt::Debug;
use serde::Serialize;
use crate::error::EngineError;
use crate::payoff::Payoffs;
use crate::random::RandomSource;

/// A configured two-player game
pub trait Game {
    /// What the player submits each round
    type Action: Copy + Debug + PartialEq + Serialize;
    /// What the opponent answers with (move, decision, or investment)
    type Response: Copy + Debug + PartialEq + Serialize;
    /// Running totals or wealth carried between rounds
    type Standing: Copy + Debug + PartialEq + Serialize;
    /// Extra per-round detail kept in history
    type Report: Copy + Debug + PartialEq + Serialize;

    /// Maximum number of outcomes kept in session history
    const HISTORY_LIMIT: usize;

    /// Display name, used in errors and logs
    fn name(&self) -> &'static str;

    /// Check the action against the legal set, normalizing it if needed
    /// (continuous fractions are clamped into `[0, 1]`)
    fn validate(&self, action: Self::Action) -> Result<Self::Action, EngineError>;

    /// Standing at the start of a session
    fn opening(&self) -> Self::Standing;

    /// Opponent's response for this round
    fn respond(
        &self,
        action: &Self::Action,
        standing: &Self::Standing,
        rng: &mut dyn RandomSource,
    ) -> Self::Response;

    /// Payoffs, next standing and report for a validated action and response
    ///
    /// Lookups fail fast with `InvalidAction` instead of defaulting to a
    /// zero payoff.
    fn settle(
        &self,
        action: &Self::Action,
        response: &Self::Response,
        standing: &Self::Standing,
    ) -> Result<Settlement<Self::Standing, Self::Report>, EngineError>;
}

/// Result of settling one round
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settlement<S, R> {
    pub payoffs: Payoffs,
    pub standing: S,
    pub report: R,
}

/// Result of a single round
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct RoundOutcome<G: Game> {
    /// 1-based round number
    pub round: u32,
    pub action: G::Action,
    pub response: G::Response,
    pub payoffs: Payoffs,
    /// Standing after this round
    pub standing: G::Standing,
    pub report: G::Report,
}

impl<G: Game> Clone for RoundOutcome<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: Game> Copy for RoundOutcome<G> {}

impl<G: Game> PartialEq for RoundOutcome<G> {
    fn eq(&self, other: &Self) -> bool {
        self.round == other.round
            && self.action == other.action
            && self.response == other.response
            && self.payoffs == other.payoffs
            && self.standing == other.standing
            && self.report == other.report
    }
}

impl<G: Game> Debug for RoundOutcome<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoundOutcome")
            .field("round", &self.round)
            .field("action", &self.action)
            .field("response", &self.response)
            .field("payoffs", &self.payoffs)
            .field("standing", &self.standing)
            .field("report", &self.report)
            .finish()
    }
}

/// Play one round
///
/// # Arguments
/// * `game` - Configured game (payoff table/formula and opponent policy)
/// * `rounds_played` - Rounds completed so far in this session
/// * `standing` - Standing before the round
/// * `action` - Player's action
/// * `rng` - Source for the opponent's draw
///
/// # Returns
/// The round outcome; its `standing` is the new standing. Fails only on an
/// illegal action. Nothing is written anywhere, so a failed call leaves the
/// caller's state untouched.
pub fn play_round<G: Game>(
    game: &G,
    rounds_played: u32,
    standing: &G::Standing,
    action: G::Action,
    rng: &mut dyn RandomSource,
) -> Result<RoundOutcome<G>, EngineError> {
    let action = game.validate(action)?;
    let response = game.respond(&action, standing, rng);
    let settlement = game.settle(&action, &response, standing)?;
    let round = rounds_played + 1;

    log::debug!(
        "{} round {}: {:?} vs {:?} -> ({}, {})",
        game.name(),
        round,
        action,
        response,
        settlement.payoffs.player,
        settlement.payoffs.opponent,
    );

    Ok(RoundOutcome {
        round,
        action,
        response,
        payoffs: settlement.payoffs,
        standing: settlement.standing,
        report: settlement.report,
    })
}

/// Running totals for games scored by accumulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Totals {
    pub player: f64,
    pub opponent: f64,
}

impl Totals {
    pub fn add(&self, payoffs: Payoffs) -> Self {
        Self {
            player: self.player + payoffs.player,
            opponent: self.opponent + payoffs.opponent,
        }
    }
}
