//! Parameter domains and the search space they assemble into.

use serde::{Deserialize, Serialize};

use crate::errors::TuneResult;
use crate::config_error;

/// Tolerance for floating accumulation error when walking a range.
const RANGE_EPSILON: f64 = 1e-9;

/// The scalar type of a parameter domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Float,
    Int,
    Bool,
}

/// A concrete scalar value drawn from a parameter domain.
///
/// The kind is carried with the value so command rendering can stay
/// kind-preserving (an `Int` never grows a decimal point, a `Float`
/// keeps one even when whole, a `Bool` renders as `true`/`false`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Float(_) => ParamKind::Float,
            Self::Int(_) => ParamKind::Int,
            Self::Bool(_) => ParamKind::Bool,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Whole floats keep their decimal point so a Float(3.0)
            // stays distinguishable from an Int(3) on the command line.
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// One named parameter dimension: an ordered, non-empty, homogeneous
/// value domain. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    values: Vec<ParamValue>,
}

impl ParamSpec {
    /// Build a domain from an explicit value list, inferring the kind:
    /// `Bool` if all values are booleans, `Int` if all are integral,
    /// otherwise `Float` (integers coerced).
    pub fn from_list(name: impl Into<String>, values: Vec<ParamValue>) -> TuneResult<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(config_error!("no values for parameter '{name}'"));
        }
        let all_bool = values.iter().all(|v| matches!(v, ParamValue::Bool(_)));
        let all_int = values.iter().all(|v| matches!(v, ParamValue::Int(_)));
        let all_numeric = values
            .iter()
            .all(|v| matches!(v, ParamValue::Int(_) | ParamValue::Float(_)));

        let (kind, values) = if all_bool {
            (ParamKind::Bool, values)
        } else if all_int {
            (ParamKind::Int, values)
        } else if all_numeric {
            let coerced = values
                .into_iter()
                .map(|v| match v {
                    ParamValue::Int(i) => ParamValue::Float(i as f64),
                    other => other,
                })
                .collect();
            (ParamKind::Float, coerced)
        } else {
            return Err(config_error!(
                "parameter '{name}' mixes boolean and numeric values"
            ));
        };

        Ok(Self { name, kind, values })
    }

    /// Build an arithmetic progression `start, start+step, ...` while the
    /// running value stays within `end` plus a small epsilon. Float values
    /// are rounded to 6 decimals, Int values to the nearest integer.
    pub fn from_range(
        name: impl Into<String>,
        start: f64,
        end: f64,
        step: f64,
        kind: ParamKind,
    ) -> TuneResult<Self> {
        let name = name.into();
        if step <= 0.0 {
            return Err(config_error!(
                "parameter '{name}': range step must be positive, got {step}"
            ));
        }
        if matches!(kind, ParamKind::Bool) {
            return Err(config_error!("parameter '{name}': ranges cannot be boolean"));
        }

        let mut values = Vec::new();
        let mut current = start;
        while current <= end + RANGE_EPSILON {
            values.push(match kind {
                ParamKind::Int => ParamValue::Int(current.round() as i64),
                _ => ParamValue::Float(round6(current)),
            });
            current += step;
        }
        if values.is_empty() {
            return Err(config_error!(
                "parameter '{name}': range [{start}, {end}] produces no values"
            ));
        }
        Ok(Self { name, kind, values })
    }

    /// Build `num_points` values spaced evenly in log10 space between
    /// `start` and `end`, endpoints inclusive.
    pub fn from_logspace(
        name: impl Into<String>,
        start: f64,
        end: f64,
        num_points: usize,
    ) -> TuneResult<Self> {
        let name = name.into();
        if start <= 0.0 || end <= 0.0 {
            return Err(config_error!(
                "parameter '{name}': logspace bounds must be positive"
            ));
        }
        if num_points < 2 {
            return Err(config_error!(
                "parameter '{name}': logspace needs at least 2 points"
            ));
        }

        let lo = start.log10();
        let hi = end.log10();
        let values = (0..num_points)
            .map(|i| {
                let t = i as f64 / (num_points - 1) as f64;
                ParamValue::Float(round6(10f64.powf(lo + t * (hi - lo))))
            })
            .collect();
        Ok(Self {
            name,
            kind: ParamKind::Float,
            values,
        })
    }

    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// The full search space: parameter specs in declaration order, names
/// unique. Built once per run, never mutated during the search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchSpace {
    params: Vec<ParamSpec>,
}

impl SearchSpace {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a spec. A spec with an already-declared name replaces the old
    /// one in place, keeping its declaration position (inline overrides
    /// shadow file-defined specs without reordering the space).
    pub fn insert(&mut self, spec: ParamSpec) {
        match self.params.iter_mut().find(|p| p.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.params.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Specs in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Total number of grid points, `None` on overflow.
    pub fn grid_size(&self) -> Option<usize> {
        let mut total: usize = 1;
        for param in &self.params {
            total = total.checked_mul(param.len())?;
        }
        Some(total)
    }
}
