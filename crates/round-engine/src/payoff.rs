//! Payoff tables and payoff formulas
//!
//! All functions here are pure. The four 2×2 games share [`PayoffMatrix`];
//! the Ultimatum split and the Cobb–Douglas production used by the
//! Labor–Capital game are closed-form.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::EngineError;

/// A move in one of the 2×2 games
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Baseball,
    Opera,
    Swerve,
    Straight,
    Cooperate,
    Defect,
    Stag,
    Hare,
}

impl Move {
    pub const ALL: [Move; 8] = [
        Move::Baseball,
        Move::Opera,
        Move::Swerve,
        Move::Straight,
        Move::Cooperate,
        Move::Defect,
        Move::Stag,
        Move::Hare,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Move::Baseball => "Baseball",
            Move::Opera => "Opera",
            Move::Swerve => "Swerve",
            Move::Straight => "Straight",
            Move::Cooperate => "Cooperate",
            Move::Defect => "Defect",
            Move::Stag => "Stag",
            Move::Hare => "Hare",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a move label, case-insensitively
impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Move::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::invalid_action("2x2 game", s))
    }
}

/// Payoffs awarded to (player, opponent) for one round
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payoffs {
    pub player: f64,
    pub opponent: f64,
}

impl Payoffs {
    pub const ZERO: Payoffs = Payoffs { player: 0.0, opponent: 0.0 };

    pub const fn new(player: f64, opponent: f64) -> Self {
        Self { player, opponent }
    }
}

/// Fixed payoff table of a 2×2 game
///
/// `cells[i][j]` is the payoff when the player picks `moves[i]` and the
/// opponent picks `moves[j]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    pub moves: [Move; 2],
    pub cells: [[Payoffs; 2]; 2],
}

impl PayoffMatrix {
    pub fn battle_of_sexes() -> Self {
        Self {
            moves: [Move::Baseball, Move::Opera],
            cells: [
                [Payoffs::new(2.0, 1.0), Payoffs::new(0.0, 0.0)],
                [Payoffs::new(0.0, 0.0), Payoffs::new(1.0, 2.0)],
            ],
        }
    }

    pub fn chicken() -> Self {
        Self {
            moves: [Move::Swerve, Move::Straight],
            cells: [
                [Payoffs::new(2.0, 2.0), Payoffs::new(1.0, 3.0)],
                [Payoffs::new(3.0, 1.0), Payoffs::new(-10.0, -10.0)],
            ],
        }
    }

    pub fn prisoners_dilemma() -> Self {
        Self {
            moves: [Move::Cooperate, Move::Defect],
            cells: [
                [Payoffs::new(3.0, 3.0), Payoffs::new(0.0, 5.0)],
                [Payoffs::new(5.0, 0.0), Payoffs::new(1.0, 1.0)],
            ],
        }
    }

    pub fn stag_hunt() -> Self {
        Self {
            moves: [Move::Stag, Move::Hare],
            cells: [
                [Payoffs::new(4.0, 4.0), Payoffs::new(0.0, 3.0)],
                [Payoffs::new(3.0, 0.0), Payoffs::new(2.0, 2.0)],
            ],
        }
    }

    /// Row/column index of a move, if it belongs to this table
    pub fn index_of(&self, m: Move) -> Option<usize> {
        self.moves.iter().position(|x| *x == m)
    }

    pub fn contains(&self, m: Move) -> bool {
        self.index_of(m).is_some()
    }

    /// Look up payoffs for (player move, opponent move)
    pub fn payoff(&self, game: &'static str, player: Move, opponent: Move) -> Result<Payoffs, EngineError> {
        let i = self
            .index_of(player)
            .ok_or_else(|| EngineError::invalid_action(game, player))?;
        let j = self
            .index_of(opponent)
            .ok_or_else(|| EngineError::invalid_action(game, opponent))?;
        Ok(self.cells[i][j])
    }

    /// Expected player payoff of each move when the opponent plays the
    /// move in column `col` with probability `p`
    pub fn expected_payoffs(&self, col: usize, p: f64) -> [ExpectedPayoff; 2] {
        let p = p.clamp(0.0, 1.0);
        [0, 1].map(|i| ExpectedPayoff {
            action: self.moves[i],
            value: p * self.cells[i][col].player + (1.0 - p) * self.cells[i][1 - col].player,
        })
    }

    /// Player's best reply to that same mixed opponent
    pub fn best_reply(&self, col: usize, p: f64) -> BestReply {
        let [a, b] = self.expected_payoffs(col, p);
        if (a.value - b.value).abs() < INDIFFERENCE_TOLERANCE {
            BestReply::Indifferent
        } else if a.value > b.value {
            BestReply::Move(a.action)
        } else {
            BestReply::Move(b.action)
        }
    }
}

/// Expected payoffs closer than this are treated as a tie
pub const INDIFFERENCE_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExpectedPayoff {
    pub action: Move,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BestReply {
    Move(Move),
    Indifferent,
}

/// Ultimatum split of `endowment` for a given offer fraction
///
/// Returns (proposer, responder). A rejected offer pays nothing.
pub fn ultimatum_split(offer: f64, accepted: bool, endowment: f64) -> Payoffs {
    if accepted {
        Payoffs::new((1.0 - offer) * endowment, offer * endowment)
    } else {
        Payoffs::ZERO
    }
}

/// Cobb–Douglas output `A · L^α · K^(1−α)`
pub fn cobb_douglas(productivity: f64, elasticity: f64, labor: f64, capital: f64) -> f64 {
    productivity * labor.powf(elasticity) * capital.powf(1.0 - elasticity)
}

/// Split output between labor and capital
///
/// Returns (labor, capital) where labor takes `share` of `output` and
/// capital takes the remainder.
pub fn split_output(output: f64, share: f64) -> Payoffs {
    let labor = share * output;
    Payoffs::new(labor, output - labor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(a: f64, b: f64) -> Payoffs {
        Payoffs::new(a, b)
    }

    #[test]
    fn test_prisoners_dilemma_matrix() {
        let m = PayoffMatrix::prisoners_dilemma();
        let g = "Prisoner's Dilemma";
        assert_eq!(m.payoff(g, Move::Cooperate, Move::Cooperate).unwrap(), p(3.0, 3.0));
        assert_eq!(m.payoff(g, Move::Cooperate, Move::Defect).unwrap(), p(0.0, 5.0));
        assert_eq!(m.payoff(g, Move::Defect, Move::Cooperate).unwrap(), p(5.0, 0.0));
        assert_eq!(m.payoff(g, Move::Defect, Move::Defect).unwrap(), p(1.0, 1.0));
    }

    #[test]
    fn test_chicken_matrix() {
        let m = PayoffMatrix::chicken();
        let g = "Chicken";
        assert_eq!(m.payoff(g, Move::Swerve, Move::Swerve).unwrap(), p(2.0, 2.0));
        assert_eq!(m.payoff(g, Move::Swerve, Move::Straight).unwrap(), p(1.0, 3.0));
        assert_eq!(m.payoff(g, Move::Straight, Move::Swerve).unwrap(), p(3.0, 1.0));
        assert_eq!(m.payoff(g, Move::Straight, Move::Straight).unwrap(), p(-10.0, -10.0));
    }

    #[test]
    fn test_battle_of_sexes_matrix() {
        let m = PayoffMatrix::battle_of_sexes();
        let g = "Battle of the Sexes";
        assert_eq!(m.payoff(g, Move::Baseball, Move::Baseball).unwrap(), p(2.0, 1.0));
        assert_eq!(m.payoff(g, Move::Baseball, Move::Opera).unwrap(), p(0.0, 0.0));
        assert_eq!(m.payoff(g, Move::Opera, Move::Baseball).unwrap(), p(0.0, 0.0));
        assert_eq!(m.payoff(g, Move::Opera, Move::Opera).unwrap(), p(1.0, 2.0));
    }

    #[test]
    fn test_stag_hunt_matrix() {
        let m = PayoffMatrix::stag_hunt();
        let g = "Stag Hunt";
        assert_eq!(m.payoff(g, Move::Stag, Move::Stag).unwrap(), p(4.0, 4.0));
        assert_eq!(m.payoff(g, Move::Stag, Move::Hare).unwrap(), p(0.0, 3.0));
        assert_eq!(m.payoff(g, Move::Hare, Move::Stag).unwrap(), p(3.0, 0.0));
        assert_eq!(m.payoff(g, Move::Hare, Move::Hare).unwrap(), p(2.0, 2.0));
    }

    #[test]
    fn test_foreign_move_is_rejected() {
        let m = PayoffMatrix::chicken();
        let err = m.payoff("Chicken", Move::Cooperate, Move::Swerve).unwrap_err();
        assert_eq!(err, EngineError::invalid_action("Chicken", "Cooperate"));
        assert!(m.payoff("Chicken", Move::Swerve, Move::Hare).is_err());
    }

    #[test]
    fn test_move_parsing() {
        assert_eq!("opera".parse::<Move>().unwrap(), Move::Opera);
        assert_eq!(" Straight ".parse::<Move>().unwrap(), Move::Straight);
        assert!("Rock".parse::<Move>().is_err());
    }

    #[test]
    fn test_chicken_expected_payoffs() {
        // E[Straight] = 3 - 13p, E[Swerve] = 2 - p
        let m = PayoffMatrix::chicken();
        let [swerve, straight] = m.expected_payoffs(1, 0.5);
        assert_eq!(swerve.action, Move::Swerve);
        assert!((swerve.value - 1.5).abs() < 1e-12);
        assert!((straight.value - (-3.5)).abs() < 1e-12);
        assert_eq!(m.best_reply(1, 0.5), BestReply::Move(Move::Swerve));
        assert_eq!(m.best_reply(1, 0.0), BestReply::Move(Move::Straight));
    }

    #[test]
    fn test_chicken_indifference_point() {
        // 3 - 13p = 2 - p  =>  p = 1/12
        let m = PayoffMatrix::chicken();
        assert_eq!(m.best_reply(1, 1.0 / 12.0), BestReply::Indifferent);
    }

    #[test]
    fn test_ultimatum_split() {
        assert_eq!(ultimatum_split(0.25, true, 100.0), p(75.0, 25.0));
        assert_eq!(ultimatum_split(0.25, false, 100.0), Payoffs::ZERO);
        assert_eq!(ultimatum_split(1.0, true, 100.0), p(0.0, 100.0));
    }

    #[test]
    fn test_cobb_douglas_symmetric() {
        let y = cobb_douglas(2.0, 0.5, 50.0, 50.0);
        assert!((y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_cobb_douglas_zero_input() {
        assert_eq!(cobb_douglas(2.0, 0.5, 0.0, 50.0), 0.0);
        assert_eq!(cobb_douglas(2.0, 0.3, 50.0, 0.0), 0.0);
    }

    #[test]
    fn test_split_output_sums_to_output() {
        let s = split_output(80.0, 0.25);
        assert_eq!(s, p(20.0, 60.0));
    }
}
