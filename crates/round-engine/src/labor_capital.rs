//! Labor–Capital bargaining game
//!
//! Each round labor invests part of its wealth and proposes its share of
//! the output; capital invests a fixed fraction of its own wealth and
//! always accepts. Output follows Cobb–Douglas:
//!
//! ```text
//! L  = WL · invest            K  = WC · capital_invest
//! Y  = A · L^α · K^(1−α)
//! WL' = (WL − L) + share · Y  WC' = (WC − K) + (1 − share) · Y
//! ```
//!
//! The game comes in two presets. Under [`LaborCapitalPreset::AdvancedPanel`]
//! capital's invest percentage is set together with the other parameters
//! and only changes when they are re-applied. Under
//! [`LaborCapitalPreset::CapitalSlider`] it is a live knob that may move
//! between rounds.

use serde::{Deserialize, Serialize};
use crate::config::{unit_fraction, InputRange, Setting};
use crate::error::EngineError;
use crate::game::{Game, Settlement};
use crate::payoff::{cobb_douglas, split_output};
use crate::policy::FixedInvestor;
use crate::random::RandomSource;
use crate::session::Session;

/// Rows kept in the Labor–Capital history table
pub const LABOR_CAPITAL_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborCapitalPreset {
    AdvancedPanel,
    CapitalSlider,
}

impl LaborCapitalPreset {
    pub fn name(&self) -> &'static str {
        match self {
            LaborCapitalPreset::AdvancedPanel => "advanced panel",
            LaborCapitalPreset::CapitalSlider => "capital slider",
        }
    }

    /// Identifier used by the page (`advanced_panel`, `capital_slider`)
    pub fn id(&self) -> &'static str {
        match self {
            LaborCapitalPreset::AdvancedPanel => "advanced_panel",
            LaborCapitalPreset::CapitalSlider => "capital_slider",
        }
    }
}

impl std::str::FromStr for LaborCapitalPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LaborCapitalPreset::AdvancedPanel, LaborCapitalPreset::CapitalSlider]
            .into_iter()
            .find(|p| p.id() == s.trim())
            .ok_or_else(|| format!("Unknown Labor-Capital preset: {}", s))
    }
}

/// Labor's move: both values are fractions in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaborMove {
    /// Fraction of labor's wealth put into production
    pub invest: f64,
    /// Fraction of output labor claims
    pub share: f64,
}

impl LaborMove {
    pub fn new(invest: f64, share: f64) -> Self {
        Self { invest, share }
    }

    /// Build a move from the page's two percentage inputs
    pub fn parse(invest_raw: &str, share_raw: &str) -> (Self, [Setting; 2]) {
        let invest = InputRange::PERCENT.apply(invest_raw);
        let share = InputRange::PERCENT.apply(share_raw);
        (Self::new(invest.fraction(), share.fraction()), [invest, share])
    }
}

/// Wealth of each side
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wealth {
    pub labor: f64,
    pub capital: f64,
}

/// Capital's side of the round
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Investment {
    pub fraction: f64,
    pub amount: f64,
    /// Capital never rejects a split
    pub accepted: bool,
}

/// Production detail for one round
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Production {
    pub wealth_before: Wealth,
    pub labor_invested: f64,
    pub capital_invested: f64,
    pub output: f64,
    pub productivity: f64,
    pub elasticity: f64,
    pub labor_share: f64,
}

/// Effective parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaborCapitalParams {
    pub start_labor: f64,
    pub start_capital: f64,
    /// Total factor productivity `A`
    pub productivity: f64,
    /// Output elasticity of labor `α`, strictly inside (0, 1)
    pub elasticity: f64,
    /// Fraction of its wealth capital invests each round
    pub capital_invest: f64,
}

impl Default for LaborCapitalParams {
    fn default() -> Self {
        Self {
            start_labor: InputRange::WEALTH.default,
            start_capital: InputRange::WEALTH.default,
            productivity: InputRange::PRODUCTIVITY.default,
            elasticity: InputRange::ELASTICITY.default,
            capital_invest: InputRange::PERCENT.default / 100.0,
        }
    }
}

/// Parameters as typed into the page; missing fields count as empty
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLaborCapitalParams {
    pub start_labor: String,
    pub start_capital: String,
    pub productivity: String,
    pub elasticity: String,
    pub capital_invest_pct: String,
}

/// Effective value of every parameter after applying raw input
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ParamReport {
    pub start_labor: Setting,
    pub start_capital: Setting,
    pub productivity: Setting,
    pub elasticity: Setting,
    pub capital_invest_pct: Setting,
}

impl LaborCapitalParams {
    pub fn from_raw(raw: &RawLaborCapitalParams) -> (Self, ParamReport) {
        let report = ParamReport {
            start_labor: InputRange::WEALTH.apply(&raw.start_labor),
            start_capital: InputRange::WEALTH.apply(&raw.start_capital),
            productivity: InputRange::PRODUCTIVITY.apply(&raw.productivity),
            elasticity: InputRange::ELASTICITY.apply(&raw.elasticity),
            capital_invest_pct: InputRange::PERCENT.apply(&raw.capital_invest_pct),
        };
        let params = Self {
            start_labor: report.start_labor.value,
            start_capital: report.start_capital.value,
            productivity: report.productivity.value,
            elasticity: report.elasticity.value,
            capital_invest: report.capital_invest_pct.fraction(),
        };
        (params, report)
    }

    /// Bring programmatic values into their valid ranges
    pub fn clamped(self) -> Self {
        Self {
            start_labor: InputRange::WEALTH.clamp(self.start_labor),
            start_capital: InputRange::WEALTH.clamp(self.start_capital),
            productivity: InputRange::PRODUCTIVITY.clamp(self.productivity),
            elasticity: InputRange::ELASTICITY.clamp(self.elasticity),
            capital_invest: InputRange::FRACTION.clamp(self.capital_invest),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaborCapitalGame {
    preset: LaborCapitalPreset,
    params: LaborCapitalParams,
    capital: FixedInvestor,
}

impl LaborCapitalGame {
    pub fn new(preset: LaborCapitalPreset) -> Self {
        Self::with_params(preset, LaborCapitalParams::default())
    }

    pub fn with_params(preset: LaborCapitalPreset, params: LaborCapitalParams) -> Self {
        let params = params.clamped();
        Self {
            preset,
            params,
            capital: FixedInvestor::new(params.capital_invest),
        }
    }

    pub fn preset(&self) -> LaborCapitalPreset {
        self.preset
    }

    pub fn params(&self) -> &LaborCapitalParams {
        &self.params
    }

    /// Move capital's invest percentage between rounds
    ///
    /// Only the capital-slider preset allows this; the advanced panel
    /// changes it through [`Session::apply_params`].
    pub fn set_capital_invest(&mut self, raw: &str) -> Result<Setting, EngineError> {
        if self.preset != LaborCapitalPreset::CapitalSlider {
            return Err(EngineError::LockedParameter {
                parameter: "capital invest percentage",
                preset: self.preset.name(),
            });
        }
        let setting = InputRange::PERCENT.apply(raw);
        self.params.capital_invest = setting.fraction();
        self.capital = FixedInvestor::new(self.params.capital_invest);
        Ok(setting)
    }
}

impl Game for LaborCapitalGame {
    type Action = LaborMove;
    type Response = Investment;
    type Standing = Wealth;
    type Report = Production;

    const HISTORY_LIMIT: usize = LABOR_CAPITAL_HISTORY_LIMIT;

    fn name(&self) -> &'static str {
        "Labor-Capital"
    }

    fn validate(&self, action: LaborMove) -> Result<LaborMove, EngineError> {
        match (unit_fraction(action.invest), unit_fraction(action.share)) {
            (Some(invest), Some(share)) => Ok(LaborMove { invest, share }),
            _ => Err(EngineError::invalid_action(
                self.name(),
                format!("invest={} share={}", action.invest, action.share),
            )),
        }
    }

    fn opening(&self) -> Wealth {
        Wealth {
            labor: self.params.start_labor,
            capital: self.params.start_capital,
        }
    }

    fn respond(&self, _: &LaborMove, wealth: &Wealth, _: &mut dyn RandomSource) -> Investment {
        Investment {
            fraction: self.capital.fraction(),
            amount: self.capital.invest(wealth.capital),
            accepted: true,
        }
    }

    fn settle(
        &self,
        action: &LaborMove,
        investment: &Investment,
        wealth: &Wealth,
    ) -> Result<Settlement<Wealth, Production>, EngineError> {
        let labor_invested = wealth.labor * action.invest;
        let capital_invested = investment.amount;
        let output = cobb_douglas(
            self.params.productivity,
            self.params.elasticity,
            labor_invested,
            capital_invested,
        );
        let payoffs = split_output(output, action.share);

        Ok(Settlement {
            payoffs,
            standing: Wealth {
                labor: (wealth.labor - labor_invested) + payoffs.player,
                capital: (wealth.capital - capital_invested) + payoffs.opponent,
            },
            report: Production {
                wealth_before: *wealth,
                labor_invested,
                capital_invested,
                output,
                productivity: self.params.productivity,
                elasticity: self.params.elasticity,
                labor_share: action.share,
            },
        })
    }
}

impl Session<LaborCapitalGame> {
    /// Re-read every parameter from raw input, then reset the session
    pub fn apply_params(&mut self, raw: &RawLaborCapitalParams) -> ParamReport {
        let (params, report) = LaborCapitalParams::from_raw(raw);
        let preset = self.game().preset();
        *self.game_mut() = LaborCapitalGame::with_params(preset, params);
        log::info!(
            "labor-capital params applied: A={} alpha={} capital invest={}",
            params.productivity,
            params.elasticity,
            params.capital_invest
        );
        self.reset();
        report
    }

    /// Re-read only the starting wealth fields, then reset the session
    ///
    /// Productivity, elasticity and capital's invest fraction are kept.
    pub fn reset_wealth(&mut self, start_labor_raw: &str, start_capital_raw: &str) -> [Setting; 2] {
        let labor = InputRange::WEALTH.apply(start_labor_raw);
        let capital = InputRange::WEALTH.apply(start_capital_raw);
        let game = self.game_mut();
        game.params.start_labor = labor.value;
        game.params.start_capital = capital.value;
        log::info!("labor-capital wealth reset: labor={} capital={}", labor.value, capital.value);
        self.reset();
        [labor, capital]
    }
}
