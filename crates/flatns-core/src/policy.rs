use std::fmt;

use once_cell::sync::Lazy;

pub const DEFAULT_SEPARATORS: &str = "-/:|";

static DEFAULT_POLICY: Lazy<SeparatorPolicy> = Lazy::new(|| SeparatorPolicy {
    chars: DEFAULT_SEPARATORS.chars().collect(),
});

/// Ordered set of characters that may stand for a path boundary.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SeparatorPolicy {
    chars: Vec<char>,
}

impl SeparatorPolicy {
    /// Builds a policy from `chars` in order, dropping repeats. Returns `None`
    /// when no character is left.
    pub fn new(chars: &str) -> Option<Self> {
        let mut out: Vec<char> = Vec::with_capacity(chars.len());
        for c in chars.chars() {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(Self { chars: out })
        }
    }

    pub fn single(c: char) -> Self {
        Self { chars: vec![c] }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Each separator repeated `run` times, in policy order.
    pub fn spellings(&self, run: usize) -> Vec<String> {
        self.chars
            .iter()
            .map(|c| std::iter::repeat(*c).take(run).collect())
            .collect()
    }
}

impl Default for SeparatorPolicy {
    fn default() -> Self {
        DEFAULT_POLICY.clone()
    }
}

impl fmt::Debug for SeparatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeparatorPolicy({:?})", self.to_string())
    }
}

impl fmt::Display for SeparatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
