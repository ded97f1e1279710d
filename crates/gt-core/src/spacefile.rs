//! Declarative search-space files.
//!
//! A space file is a JSON object mapping parameter names to one of three
//! domain forms:
//!
//! ```json
//! {
//!     "coalition": { "values": [2.0, 3.0, 4.0] },
//!     "min_pts":   { "range": { "start": 5, "end": 11, "step": 2, "type": "int" } },
//!     "ratio":     { "logspace": { "start": 0.1, "end": 0.6, "num_points": 4 } }
//! }
//! ```
//!
//! Parameter order in the file is declaration order in the space.

use std::path::Path;

use serde::Deserialize;

use crate::config_error;
use crate::errors::TuneResult;
use crate::space::{ParamKind, ParamSpec, ParamValue};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpaceEntry {
    Values { values: Vec<serde_json::Value> },
    Range { range: RangeDef },
    Logspace { logspace: LogspaceDef },
}

#[derive(Debug, Deserialize)]
struct RangeDef {
    start: f64,
    end: f64,
    step: f64,
    #[serde(rename = "type", default)]
    kind: RangeKind,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RangeKind {
    Int,
    #[default]
    Float,
}

#[derive(Debug, Deserialize)]
struct LogspaceDef {
    start: f64,
    end: f64,
    num_points: usize,
}

/// Load parameter specs from a declarative file, in file order.
pub fn load_space_file(path: &Path) -> TuneResult<Vec<ParamSpec>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| config_error!("cannot read search-space file {}: {e}", path.display()))?;
    let root: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| config_error!("malformed search-space file {}: {e}", path.display()))?;

    let entries = root.as_object().ok_or_else(|| {
        config_error!(
            "search-space file {} must be a JSON object of parameter entries",
            path.display()
        )
    })?;

    let mut specs = Vec::with_capacity(entries.len());
    for (name, raw) in entries {
        let entry: SpaceEntry = serde_json::from_value(raw.clone())
            .map_err(|e| config_error!("parameter '{name}': unrecognized domain form: {e}"))?;
        specs.push(entry_to_spec(name, entry)?);
    }
    Ok(specs)
}

fn entry_to_spec(name: &str, entry: SpaceEntry) -> TuneResult<ParamSpec> {
    match entry {
        SpaceEntry::Values { values } => {
            let values = values
                .iter()
                .map(|v| json_scalar(name, v))
                .collect::<TuneResult<Vec<_>>>()?;
            ParamSpec::from_list(name, values)
        }
        SpaceEntry::Range { range } => {
            let kind = match range.kind {
                RangeKind::Int => ParamKind::Int,
                RangeKind::Float => ParamKind::Float,
            };
            ParamSpec::from_range(name, range.start, range.end, range.step, kind)
        }
        SpaceEntry::Logspace { logspace } => {
            ParamSpec::from_logspace(name, logspace.start, logspace.end, logspace.num_points)
        }
    }
}

fn json_scalar(name: &str, value: &serde_json::Value) -> TuneResult<ParamValue> {
    match value {
        serde_json::Value::Bool(b) => Ok(ParamValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(ParamValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(ParamValue::Float(f))
            } else {
                Err(config_error!("parameter '{name}': value {n} out of range"))
            }
        }
        other => Err(config_error!(
            "parameter '{name}': expected scalar value, got {other}"
        )),
    }
}
