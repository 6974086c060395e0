//! Round Engine for two-player game theory demos
//!
//! One generic engine drives six classic demos:
//! - Battle of the Sexes, Chicken, Prisoner's Dilemma, Stag Hunt ([`MatrixGame`])
//! - Ultimatum Game ([`UltimatumGame`])
//! - Labor–Capital bargaining ([`LaborCapitalGame`])
//!
//! This crate is compiled to:
//! - Native (library and tests)
//! - WASM (page adapter, `wasm` feature)

mod config;
mod error;
mod game;
mod labor_capital;
mod matrix;
mod payoff;
mod policy;
mod random;
mod session;
mod ultimatum;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{InputRange, Setting};
pub use error::{ConfigIssue, EngineError};
pub use game::{play_round, Game, RoundOutcome, Settlement, Totals};
pub use labor_capital::{
    Investment, LaborCapitalGame, LaborCapitalParams, LaborCapitalPreset, LaborMove, ParamReport,
    Production, RawLaborCapitalParams, Wealth, LABOR_CAPITAL_HISTORY_LIMIT,
};
pub use matrix::{MatrixGame, MatrixKind, MATRIX_HISTORY_LIMIT};
pub use payoff::{
    cobb_douglas, split_output, ultimatum_split, BestReply, ExpectedPayoff, Move, PayoffMatrix,
    Payoffs,
};
pub use policy::{Bernoulli, FixedInvestor, LogisticResponder};
pub use random::{RandomSource, ScriptedRng, SeededRng};
pub use session::{History, Session, Snapshot};
pub use ultimatum::{AcceptanceReport, Decision, UltimatumGame, Verdict, ENDOWMENT, ULTIMATUM_HISTORY_LIMIT};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limits() {
        assert_eq!(<MatrixGame as Game>::HISTORY_LIMIT, 20);
        assert_eq!(<UltimatumGame as Game>::HISTORY_LIMIT, 100);
        assert_eq!(<LaborCapitalGame as Game>::HISTORY_LIMIT, 100);
    }

    #[test]
    fn test_independent_sessions_do_not_share_state() {
        let mut a = Session::new(MatrixGame::new(MatrixKind::PrisonersDilemma));
        let b = Session::new(MatrixGame::new(MatrixKind::PrisonersDilemma));
        let mut rng = SeededRng::from_u64(1);
        a.play(Move::Defect, &mut rng).unwrap();
        assert_eq!(a.round(), 1);
        assert_eq!(b.round(), 0);
        assert!(b.history().is_empty());
    }

    #[test]
    fn test_same_seed_same_session() {
        let play = |seed| {
            let mut session = Session::new(MatrixGame::new(MatrixKind::StagHunt));
            let mut rng = SeededRng::from_u64(seed);
            session.auto_play(30, Move::Hare, &mut rng).unwrap();
            session.history().iter().map(|o| o.response).collect::<Vec<_>>()
        };
        assert_eq!(play(17), play(17));
        assert_ne!(play(17), play(18));
    }
}
