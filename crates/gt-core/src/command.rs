//! Rendering of trial invocations from a base command template.
//!
//! The template is structured (program + base arguments) and per-trial
//! flags are appended as discrete argv entries, so no shell is involved
//! and no quoting ambiguity arises.

use std::collections::HashMap;

use crate::config_error;
use crate::errors::TuneResult;
use crate::space::{ParamValue, SearchSpace};

/// Parsed base command: the program to run plus its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    base_args: Vec<String>,
}

impl CommandTemplate {
    /// Split a template string on whitespace into program + arguments.
    pub fn parse(template: &str) -> TuneResult<Self> {
        let mut parts = template.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| config_error!("evaluation command template is empty"))?;
        Ok(Self {
            program,
            base_args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn base_args(&self) -> &[String] {
        &self.base_args
    }

    /// Render one `--flag value` pair per parameter, in the space's
    /// declared order. Flag names are the parameter names with
    /// underscores replaced by hyphens.
    pub fn trial_args(
        &self,
        space: &SearchSpace,
        params: &HashMap<String, ParamValue>,
    ) -> Vec<String> {
        let mut args = Vec::with_capacity(params.len() * 2);
        for spec in space.params() {
            if let Some(value) = params.get(&spec.name) {
                args.push(flag_name(&spec.name));
                args.push(value.to_string());
            }
        }
        args
    }

    /// Single-line rendering of the full invocation, for dry-run output
    /// and the reported best command.
    pub fn render_line(&self, space: &SearchSpace, params: &HashMap<String, ParamValue>) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.base_args.iter().cloned());
        parts.extend(self.trial_args(space, params));
        parts.join(" ")
    }
}

fn flag_name(name: &str) -> String {
    format!("--{}", name.replace('_', "-"))
}
