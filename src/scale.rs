//! Visual scale selection for charts.
//!
//! `auto` picks a scale from the spread of the plotted magnitudes:
//!
//! | max / min positive | scale  |
//! |--------------------|--------|
//! | below 50           | linear |
//! | 50 up to 5000      | mid    |
//! | 5000 and above     | log    |
//!
//! `mid` is an inverse-hyperbolic-sine compression: linear near zero and
//! logarithmic for large values, so it tolerates zeros where `log` cannot.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spread at which `auto` leaves the linear scale.
pub const MID_RATIO: f64 = 50.0;
/// Spread at which `auto` switches to the logarithmic scale.
pub const LOG_RATIO: f64 = 5000.0;

/// Requested scale mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    Linear,
    Mid,
    Log,
    #[default]
    Auto,
}

impl ScaleMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Mid => "mid",
            Self::Log => "log",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "mid" => Ok(Self::Mid),
            "log" => Ok(Self::Log),
            "auto" => Ok(Self::Auto),
            other => Err(ReportError::Config(format!(
                "unknown scale '{other}' (expected linear, mid, log, or auto)"
            ))),
        }
    }
}

/// A resolved scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Linear,
    Mid,
    Log,
}

impl Scale {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Mid => "mid",
            Self::Log => "log",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Smallest strictly positive finite value.
fn min_positive(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .min_by(f64::total_cmp)
}

/// Resolve a scale mode against a set of magnitudes.
///
/// Non-finite values are ignored. The result does not depend on the order of
/// `values`.
#[must_use]
pub fn select_scale(values: &[f64], mode: ScaleMode) -> Scale {
    match mode {
        ScaleMode::Linear => Scale::Linear,
        ScaleMode::Mid => Scale::Mid,
        ScaleMode::Log => Scale::Log,
        ScaleMode::Auto => {
            let Some(min) = min_positive(values) else {
                return Scale::Linear;
            };
            let max = values
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .fold(min, f64::max);
            let ratio = max / min;
            if ratio >= LOG_RATIO {
                Scale::Log
            } else if ratio >= MID_RATIO {
                Scale::Mid
            } else {
                Scale::Linear
            }
        }
    }
}

/// Forward and inverse value mapping for a resolved scale.
///
/// Charts draw in transformed space on a linear axis and label ticks with the
/// inverse mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    scale: Scale,
    /// Width of the near-linear region of the `mid` scale.
    linear_width: f64,
}

impl ScaleTransform {
    /// Build a transform whose `mid` linear region is the smallest positive
    /// value in the data (1.0 when there is none).
    #[must_use]
    pub fn for_values(scale: Scale, values: &[f64]) -> Self {
        Self {
            scale,
            linear_width: min_positive(values).unwrap_or(1.0),
        }
    }

    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Map a data value into drawing space. `None` when the value cannot be
    /// placed on the scale (non-finite, or non-positive under `log`).
    #[must_use]
    pub fn forward(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self.scale {
            Scale::Linear => Some(value),
            Scale::Mid => Some((value / self.linear_width).asinh()),
            Scale::Log => (value > 0.0).then(|| value.log10()),
        }
    }

    /// Map a drawing-space coordinate back to a data value.
    #[must_use]
    pub fn inverse(&self, coord: f64) -> f64 {
        match self.scale {
            Scale::Linear => coord,
            Scale::Mid => coord.sinh() * self.linear_width,
            Scale::Log => 10f64.powf(coord),
        }
    }

    /// Axis caption suffix, empty for linear.
    #[must_use]
    pub const fn axis_suffix(&self) -> &'static str {
        match self.scale {
            Scale::Linear => "",
            Scale::Mid => " (asinh scale)",
            Scale::Log => " (log scale)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_pass_through() {
        let values = [1.0, 1_000_000.0];
        assert_eq!(select_scale(&values, ScaleMode::Linear), Scale::Linear);
        assert_eq!(select_scale(&values, ScaleMode::Mid), Scale::Mid);
        assert_eq!(select_scale(&[0.0], ScaleMode::Log), Scale::Log);
    }

    #[test]
    fn auto_examples() {
        assert_eq!(select_scale(&[1.0, 1.0, 1.2], ScaleMode::Auto), Scale::Linear);
        assert_eq!(select_scale(&[1.0, 100.0], ScaleMode::Auto), Scale::Mid);
        assert_eq!(select_scale(&[1.0, 10_000.0], ScaleMode::Auto), Scale::Log);
        assert_eq!(select_scale(&[0.0, 0.0, 0.0], ScaleMode::Auto), Scale::Linear);
        assert_eq!(select_scale(&[], ScaleMode::Auto), Scale::Linear);
    }

    #[test]
    fn auto_boundaries() {
        assert_eq!(select_scale(&[1.0, 49.9], ScaleMode::Auto), Scale::Linear);
        assert_eq!(select_scale(&[1.0, 50.0], ScaleMode::Auto), Scale::Mid);
        assert_eq!(select_scale(&[1.0, 4999.0], ScaleMode::Auto), Scale::Mid);
        assert_eq!(select_scale(&[1.0, 5000.0], ScaleMode::Auto), Scale::Log);
    }

    #[test]
    fn auto_ignores_zero_and_non_finite() {
        assert_eq!(
            select_scale(&[0.0, 2.0, f64::NAN, f64::INFINITY, 4.0], ScaleMode::Auto),
            Scale::Linear
        );
    }

    #[test]
    fn scale_mode_parses() {
        assert_eq!("MID".parse::<ScaleMode>().unwrap(), ScaleMode::Mid);
        assert!("cubic".parse::<ScaleMode>().is_err());
    }

    #[test]
    fn transforms_round_trip() {
        for scale in [Scale::Linear, Scale::Mid, Scale::Log] {
            let t = ScaleTransform::for_values(scale, &[0.5, 20.0]);
            for v in [0.5, 3.0, 20.0] {
                let back = t.inverse(t.forward(v).unwrap());
                assert!((back - v).abs() < 1e-9, "{scale}: {v} -> {back}");
            }
        }
    }

    #[test]
    fn log_rejects_non_positive() {
        let t = ScaleTransform::for_values(Scale::Log, &[1.0]);
        assert_eq!(t.forward(0.0), None);
        assert_eq!(t.forward(100.0), Some(2.0));
        let mid = ScaleTransform::for_values(Scale::Mid, &[1.0]);
        assert_eq!(mid.forward(0.0), Some(0.0));
    }
}
