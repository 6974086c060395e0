//! The four symmetric 2×2 demos
//!
//! Battle of the Sexes, Chicken, Prisoner's Dilemma and Stag Hunt differ
//! only in their payoff table and in which move the opponent's single
//! probability knob refers to.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::config::{InputRange, Setting};
use crate::error::EngineError;
use crate::game::{Game, Settlement, Totals};
use crate::payoff::{BestReply, ExpectedPayoff, Move, PayoffMatrix};
use crate::policy::Bernoulli;
use crate::random::RandomSource;

/// Rows kept in the history table of a 2×2 demo
pub const MATRIX_HISTORY_LIMIT: usize = 20;

/// Which 2×2 game is being played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    BattleOfSexes,
    Chicken,
    PrisonersDilemma,
    StagHunt,
}

impl MatrixKind {
    pub const ALL: [MatrixKind; 4] = [
        MatrixKind::BattleOfSexes,
        MatrixKind::Chicken,
        MatrixKind::PrisonersDilemma,
        MatrixKind::StagHunt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MatrixKind::BattleOfSexes => "Battle of the Sexes",
            MatrixKind::Chicken => "Chicken",
            MatrixKind::PrisonersDilemma => "Prisoner's Dilemma",
            MatrixKind::StagHunt => "Stag Hunt",
        }
    }

    /// Identifier used by the page adapter
    pub fn id(&self) -> &'static str {
        match self {
            MatrixKind::BattleOfSexes => "battle_of_sexes",
            MatrixKind::Chicken => "chicken",
            MatrixKind::PrisonersDilemma => "prisoners_dilemma",
            MatrixKind::StagHunt => "stag_hunt",
        }
    }

    pub fn table(&self) -> PayoffMatrix {
        match self {
            MatrixKind::BattleOfSexes => PayoffMatrix::battle_of_sexes(),
            MatrixKind::Chicken => PayoffMatrix::chicken(),
            MatrixKind::PrisonersDilemma => PayoffMatrix::prisoners_dilemma(),
            MatrixKind::StagHunt => PayoffMatrix::stag_hunt(),
        }
    }

    /// Column of the move the opponent plays with the configured
    /// probability (Opera, Straight, Cooperate, Stag)
    pub fn primary_column(&self) -> usize {
        match self {
            MatrixKind::BattleOfSexes => 1,
            MatrixKind::Chicken => 1,
            MatrixKind::PrisonersDilemma => 0,
            MatrixKind::StagHunt => 0,
        }
    }
}

impl FromStr for MatrixKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatrixKind::ALL
            .into_iter()
            .find(|k| k.id() == s.trim())
            .ok_or_else(|| format!("unknown game: {}", s))
    }
}

/// A 2×2 game with a Bernoulli opponent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixGame {
    kind: MatrixKind,
    table: PayoffMatrix,
    primary_col: usize,
    opponent: Bernoulli,
}

impl MatrixGame {
    /// Game with the opponent's primary-move probability at 50%
    pub fn new(kind: MatrixKind) -> Self {
        Self::with_probability(kind, 0.5)
    }

    pub fn with_probability(kind: MatrixKind, probability: f64) -> Self {
        Self {
            kind,
            table: kind.table(),
            primary_col: kind.primary_column(),
            opponent: Bernoulli::new(probability),
        }
    }

    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    pub fn table(&self) -> &PayoffMatrix {
        &self.table
    }

    /// Move the probability knob refers to
    pub fn primary(&self) -> Move {
        self.table.moves[self.primary_col]
    }

    pub fn secondary(&self) -> Move {
        self.table.moves[1 - self.primary_col]
    }

    /// Probability that the opponent plays the primary move
    pub fn probability(&self) -> f64 {
        self.opponent.probability()
    }

    /// Apply the page's percentage input for the opponent's primary move
    ///
    /// Totals are not reset; the new probability applies from the next
    /// round.
    pub fn apply_probability(&mut self, raw: &str) -> Setting {
        let setting = InputRange::PERCENT.apply(raw);
        self.opponent = Bernoulli::new(setting.fraction());
        log::info!(
            "{}: P({}) = {:.2}",
            self.kind.name(),
            self.primary(),
            self.opponent.probability()
        );
        setting
    }

    /// Expected payoff of each player move at the current probability
    pub fn expected_payoffs(&self) -> [ExpectedPayoff; 2] {
        self.table.expected_payoffs(self.primary_col, self.probability())
    }

    /// Best reply at the current probability
    pub fn best_reply(&self) -> BestReply {
        self.table.best_reply(self.primary_col, self.probability())
    }
}

impl Game for MatrixGame {
    type Action = Move;
    type Response = Move;
    type Standing = Totals;
    type Report = ();

    const HISTORY_LIMIT: usize = MATRIX_HISTORY_LIMIT;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn validate(&self, action: Move) -> Result<Move, EngineError> {
        if self.table.contains(action) {
            Ok(action)
        } else {
            Err(EngineError::invalid_action(self.name(), action))
        }
    }

    fn opening(&self) -> Totals {
        Totals::default()
    }

    fn respond(&self, _: &Move, _: &Totals, rng: &mut dyn RandomSource) -> Move {
        if self.opponent.sample(rng) {
            self.primary()
        } else {
            self.secondary()
        }
    }

    fn settle(&self, action: &Move, response: &Move, standing: &Totals) -> Result<Settlement<Totals, ()>, EngineError> {
        let payoffs = self.table.payoff(self.name(), *action, *response)?;
        Ok(Settlement {
            payoffs,
            standing: standing.add(payoffs),
            report: (),
        })
    }
}
