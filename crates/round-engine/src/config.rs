//! Parsing and clamping of raw configuration input
//!
//! Every knob a demo page exposes (opponent probability, offer, invest
//! and share percentages, productivity, elasticity, starting wealth) is
//! described by an [`InputRange`]. Applying raw text to a range never
//! fails: non-numeric input falls back to the range default and
//! out-of-range input is clamped to the nearest bound.

use serde::{Deserialize, Serialize};
use crate::error::ConfigIssue;

/// Inclusive bounds and fallback for one configuration knob
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// Effective value after applying raw input to an [`InputRange`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Setting {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<ConfigIssue>,
}

impl Setting {
    pub fn exact(value: f64) -> Self {
        Self { value, issue: None }
    }

    /// Percentage setting as a fraction in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        self.value / 100.0
    }
}

impl InputRange {
    /// Percentage knobs: opponent probability, offer, invest/share
    pub const PERCENT: InputRange = InputRange { min: 0.0, max: 100.0, default: 50.0 };

    /// Fractions set programmatically rather than typed as percentages
    pub const FRACTION: InputRange = InputRange { min: 0.0, max: 1.0, default: 0.5 };

    /// Starting wealth for either side of the Labor–Capital game
    pub const WEALTH: InputRange = InputRange { min: 0.0, max: 1e9, default: 100.0 };

    /// Total factor productivity `A`
    pub const PRODUCTIVITY: InputRange = InputRange { min: 0.0, max: 1e6, default: 2.0 };

    /// Output elasticity of labor `α`, kept strictly inside (0, 1)
    pub const ELASTICITY: InputRange = InputRange { min: 0.001, max: 0.999, default: 0.5 };

    /// Apply raw text input (as typed into a page field)
    ///
    /// Empty, whitespace-only, non-numeric and non-finite input count as
    /// missing.
    pub fn apply(&self, raw: &str) -> Setting {
        let parsed = raw.trim().parse::<f64>().ok();
        self.apply_number(parsed)
    }

    /// Apply an already-numeric input, `None` meaning missing
    pub fn apply_number(&self, raw: Option<f64>) -> Setting {
        match raw {
            Some(v) if v.is_finite() => {
                if v < self.min {
                    self.clamped(v, self.min)
                } else if v > self.max {
                    self.clamped(v, self.max)
                } else {
                    Setting::exact(v)
                }
            }
            _ => {
                log::warn!("non-numeric config input, using default {}", self.default);
                Setting {
                    value: self.default,
                    issue: Some(ConfigIssue::InvalidInput { default: self.default }),
                }
            }
        }
    }

    /// Clamp a value without reporting, for values that are already trusted
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_finite() {
            v.clamp(self.min, self.max)
        } else {
            self.default
        }
    }

    fn clamped(&self, requested: f64, bound: f64) -> Setting {
        log::warn!("config input {} out of range [{}, {}], clamped to {}", requested, self.min, self.max, bound);
        Setting {
            value: bound,
            issue: Some(ConfigIssue::OutOfRange { requested, bound }),
        }
    }
}

/// Clamp a fraction into `[0, 1]`, rejecting NaN
pub(crate) fn unit_fraction(v: f64) -> Option<f64> {
    if v.is_nan() {
        None
    } else {
        Some(v.clamp(0.0, 1.0))
    }
}
