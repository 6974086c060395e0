//! WASM bindings for the demo pages
//!
//! Each page holds one demo object. Outcomes, snapshots and history are
//! handed back as plain JS objects; raw field text goes in as strings and
//! the effective (clamped) value comes back for display.

#![cfg(feature = "wasm")]

use serde::Serialize;
use wasm_bindgen::prelude::*;
use crate::{
    LaborCapitalGame, LaborCapitalPreset, LaborMove, MatrixGame, MatrixKind, Move,
    RawLaborCapitalParams, SeededRng, Session, UltimatumGame,
};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Seed from the page's `Math.random()` when no seed is given
fn page_rng(seed: Option<u64>) -> SeededRng {
    let seed = seed.unwrap_or_else(|| {
        let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
        (hi << 32) | lo
    });
    SeededRng::from_u64(seed)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// One of the four 2×2 demos
#[wasm_bindgen]
pub struct MatrixDemo {
    session: Session<MatrixGame>,
    rng: SeededRng,
}

#[wasm_bindgen]
impl MatrixDemo {
    /// `game` is one of `battle_of_sexes`, `chicken`, `prisoners_dilemma`,
    /// `stag_hunt`
    #[wasm_bindgen(constructor)]
    pub fn new(game: &str, seed: Option<u64>) -> Result<MatrixDemo, JsError> {
        let kind: MatrixKind = game.parse().map_err(|e: String| JsError::new(&e))?;
        Ok(Self {
            session: Session::new(MatrixGame::new(kind)),
            rng: page_rng(seed),
        })
    }

    /// Apply the probability field; returns the effective percentage
    pub fn apply_probability(&mut self, raw: &str) -> f64 {
        self.session.game_mut().apply_probability(raw).value
    }

    /// Expected payoff of each move and the best reply
    pub fn expectations(&self) -> Result<JsValue, JsError> {
        #[derive(Serialize)]
        struct Expectations {
            expected: [crate::ExpectedPayoff; 2],
            best_reply: crate::BestReply,
        }
        let game = self.session.game();
        to_js(&Expectations {
            expected: game.expected_payoffs(),
            best_reply: game.best_reply(),
        })
    }

    pub fn play(&mut self, action: &str) -> Result<JsValue, JsError> {
        let action: Move = action.parse().map_err(|e: crate::EngineError| JsError::new(&e.to_string()))?;
        let outcome = self
            .session
            .play(action, &mut self.rng)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcome)
    }

    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.session.reset())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.snapshot())
    }
}

/// Ultimatum Game demo
#[wasm_bindgen]
pub struct UltimatumDemo {
    session: Session<UltimatumGame>,
    rng: SeededRng,
}

#[wasm_bindgen]
impl UltimatumDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> UltimatumDemo {
        Self {
            session: Session::new(UltimatumGame::new()),
            rng: page_rng(seed),
        }
    }

    /// Effective offer percentage for the raw field text
    pub fn effective_offer(raw: &str) -> f64 {
        UltimatumGame::parse_offer(raw).1.value
    }

    pub fn acceptance_probability(&self, offer_pct: f64) -> f64 {
        self.session.game().acceptance_probability(offer_pct / 100.0)
    }

    pub fn play(&mut self, offer_raw: &str) -> Result<JsValue, JsError> {
        let (offer, _) = UltimatumGame::parse_offer(offer_raw);
        let outcome = self
            .session
            .play(offer, &mut self.rng)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcome)
    }

    /// Play `n` rounds at the same offer; returns outcomes oldest first
    pub fn auto(&mut self, n: u32, offer_raw: &str) -> Result<JsValue, JsError> {
        let (offer, _) = UltimatumGame::parse_offer(offer_raw);
        let outcomes = self
            .session
            .auto_play(n, offer, &mut self.rng)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcomes)
    }

    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.session.reset())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.snapshot())
    }
}

/// Labor–Capital demo
#[wasm_bindgen]
pub struct LaborCapitalDemo {
    session: Session<LaborCapitalGame>,
    rng: SeededRng,
}

#[wasm_bindgen]
impl LaborCapitalDemo {
    /// `preset` is `advanced_panel` or `capital_slider`
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<LaborCapitalDemo, JsError> {
        let preset: LaborCapitalPreset = preset.parse().map_err(|e: String| JsError::new(&e))?;
        Ok(Self {
            session: Session::new(LaborCapitalGame::new(preset)),
            // capital never draws
            rng: SeededRng::from_u64(0),
        })
    }

    /// Apply the parameter panel (JSON of raw field strings) and reset
    pub fn apply_params(&mut self, params_json: &str) -> Result<JsValue, JsError> {
        let raw: RawLaborCapitalParams = serde_json::from_str(params_json)
            .map_err(|e| JsError::new(&format!("Invalid params: {}", e)))?;
        to_js(&self.session.apply_params(&raw))
    }

    /// Capital slider preset only; returns the effective percentage
    pub fn set_capital_invest(&mut self, raw: &str) -> Result<f64, JsError> {
        self.session
            .game_mut()
            .set_capital_invest(raw)
            .map(|s| s.value)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn play(&mut self, invest_raw: &str, share_raw: &str) -> Result<JsValue, JsError> {
        let (action, _) = LaborMove::parse(invest_raw, share_raw);
        let outcome = self
            .session
            .play(action, &mut self.rng)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcome)
    }

    pub fn auto(&mut self, n: u32, invest_raw: &str, share_raw: &str) -> Result<JsValue, JsError> {
        let (action, _) = LaborMove::parse(invest_raw, share_raw);
        let outcomes = self
            .session
            .auto_play(n, action, &mut self.rng)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&outcomes)
    }

    /// Re-read the starting wealth fields and reset, keeping the other parameters
    pub fn reset(&mut self, start_labor_raw: &str, start_capital_raw: &str) -> Result<JsValue, JsError> {
        #[derive(Serialize)]
        struct WealthReset<'a> {
            settings: [crate::Setting; 2],
            snapshot: crate::Snapshot<'a, LaborCapitalGame>,
        }
        let settings = self.session.reset_wealth(start_labor_raw, start_capital_raw);
        to_js(&WealthReset {
            settings,
            snapshot: self.session.snapshot(),
        })
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.snapshot())
    }
}
