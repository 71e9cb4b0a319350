use std::env;

use crate::policy::SeparatorPolicy;

pub const SEPARATORS_ENV: &str = "FLATNS_SEPARATORS";
pub const ROOT_MODULE_ENV: &str = "FLATNS_ROOT_MODULE";

pub const DEFAULT_BOUNDARY_MARKER: char = '_';
pub const DEFAULT_ROOT_MODULE: &str = "emacs";

/// A set, non-blank override, trimmed. Blank values count as unset.
fn override_value(raw: Option<String>) -> Option<String> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn separators_from(raw: Option<String>) -> Option<SeparatorPolicy> {
    override_value(raw).and_then(|chars| SeparatorPolicy::new(&chars))
}

pub fn separators_from_env() -> Option<SeparatorPolicy> {
    separators_from(env::var(SEPARATORS_ENV).ok())
}

pub fn root_module_from_env() -> Option<String> {
    override_value(env::var(ROOT_MODULE_ENV).ok())
}

/// Settings shared by every node of one namespace tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Policy of the root node.
    pub separators: SeparatorPolicy,
    /// Character that marks a boundary inside attribute labels.
    pub boundary_marker: char,
    /// First segment of dotted module paths handled by `ModuleFinder`.
    pub root_module: String,
}

impl ResolverOptions {
    /// Defaults without consulting the environment.
    pub fn builtin() -> Self {
        Self {
            separators: SeparatorPolicy::default(),
            boundary_marker: DEFAULT_BOUNDARY_MARKER,
            root_module: DEFAULT_ROOT_MODULE.to_string(),
        }
    }

    pub fn with_separators(mut self, separators: SeparatorPolicy) -> Self {
        self.separators = separators;
        self
    }

    pub fn with_boundary_marker(mut self, marker: char) -> Self {
        self.boundary_marker = marker;
        self
    }

    pub fn with_root_module(mut self, name: impl Into<String>) -> Self {
        self.root_module = name.into();
        self
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            separators: separators_from_env().unwrap_or(builtin.separators),
            root_module: root_module_from_env().unwrap_or(builtin.root_module),
            ..builtin
        }
    }
}
