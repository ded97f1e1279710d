//! Assembles a [`SearchSpace`] from a declarative file and inline
//! comma-separated overrides. Overrides replace file-defined specs of the
//! same name; an empty resolved space is a fatal configuration error.

use std::path::PathBuf;

use crate::config_error;
use crate::errors::TuneResult;
use crate::space::{ParamSpec, ParamValue, SearchSpace};
use crate::spacefile::load_space_file;

#[derive(Debug, Default)]
pub struct SearchSpaceBuilder {
    file: Option<PathBuf>,
    overrides: Vec<(String, String)>,
}

impl SearchSpaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Register an inline `name -> comma-separated values` override.
    /// Overrides are applied after the file, in the order given.
    pub fn with_override(mut self, name: impl Into<String>, csv: impl Into<String>) -> Self {
        self.overrides.push((name.into(), csv.into()));
        self
    }

    pub fn build(self) -> TuneResult<SearchSpace> {
        let mut space = SearchSpace::new();

        if let Some(path) = &self.file {
            for spec in load_space_file(path)? {
                space.insert(spec);
            }
        }
        for (name, csv) in &self.overrides {
            let values = parse_value_list(name, csv)?;
            space.insert(ParamSpec::from_list(name.clone(), values)?);
        }

        if space.is_empty() {
            return Err(config_error!(
                "search space is empty: provide --search-space or at least one parameter flag"
            ));
        }
        Ok(space)
    }
}

/// Parse a comma-separated value list. Each token is typed as a boolean
/// (`true`/`false`), an integer, or a float, in that order.
pub fn parse_value_list(name: &str, csv: &str) -> TuneResult<Vec<ParamValue>> {
    let mut values = Vec::new();
    for token in csv.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = if let Ok(b) = token.parse::<bool>() {
            ParamValue::Bool(b)
        } else if let Ok(i) = token.parse::<i64>() {
            ParamValue::Int(i)
        } else if let Ok(f) = token.parse::<f64>() {
            ParamValue::Float(f)
        } else {
            return Err(config_error!(
                "invalid value '{token}' for parameter '{name}': expected a comma-separated list of scalars"
            ));
        };
        values.push(value);
    }
    if values.is_empty() {
        return Err(config_error!("no values for parameter '{name}'"));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ParamKind;
    use std::io::Write;

    #[test]
    fn inline_only_space() {
        let space = SearchSpaceBuilder::new()
            .with_override("min_pts", "5,7,9,11")
            .with_override("ratio", "0.2, 0.35, 0.5")
            .build()
            .unwrap();

        let names: Vec<&str> = space.names().collect();
        assert_eq!(names, vec!["min_pts", "ratio"]);
        assert_eq!(space.get("min_pts").unwrap().kind, ParamKind::Int);
        assert_eq!(space.get("ratio").unwrap().kind, ParamKind::Float);
        assert_eq!(space.grid_size(), Some(12));
    }

    #[test]
    fn override_replaces_file_spec() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "coalition": { "values": [2.0, 3.0, 4.0] },
                "min_pts": { "values": [5, 7] }
            }"#,
        )
        .unwrap();

        let space = SearchSpaceBuilder::new()
            .with_file(file.path())
            .with_override("coalition", "9.5")
            .build()
            .unwrap();

        // Replacement keeps the file's declaration position.
        let names: Vec<&str> = space.names().collect();
        assert_eq!(names, vec!["coalition", "min_pts"]);
        assert_eq!(
            space.get("coalition").unwrap().values(),
            &[ParamValue::Float(9.5)]
        );
    }

    #[test]
    fn empty_space_is_fatal() {
        let err = SearchSpaceBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("search space is empty"));
    }

    #[test]
    fn bad_token_is_rejected() {
        assert!(parse_value_list("ratio", "0.2,banana").is_err());
    }

    #[test]
    fn bool_tokens() {
        let values = parse_value_list("use_cache", "true,false").unwrap();
        assert_eq!(values, vec![ParamValue::Bool(true), ParamValue::Bool(false)]);
    }

    #[test]
    fn blank_tokens_are_skipped() {
        let values = parse_value_list("x", "1,,2,").unwrap();
        assert_eq!(values, vec![ParamValue::Int(1), ParamValue::Int(2)]);
    }
}
