//! Prefix groups and the rules that turn a label into new groups.

use std::borrow::Cow;

use im::Vector;

use crate::policy::SeparatorPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Literal,
    Separator,
}

/// One slot of a path: equally ranked spellings of a single increment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrefixGroup {
    kind: GroupKind,
    alternatives: Vec<String>,
}

impl PrefixGroup {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: GroupKind::Literal,
            alternatives: vec![text.into()],
        }
    }

    pub fn separator(policy: &SeparatorPolicy, run: usize) -> Self {
        Self {
            kind: GroupKind::Separator,
            alternatives: policy.spellings(run),
        }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    fn ends_alphanumeric(&self) -> bool {
        !self.alternatives.is_empty()
            && self
                .alternatives
                .iter()
                .all(|alt| alt.chars().last().is_some_and(char::is_alphanumeric))
    }

    /// The separator a lone non-alphanumeric spelling commits its successors to.
    fn pinned_separator(&self) -> Option<char> {
        match self.alternatives.as_slice() {
            [only] => only.chars().last().filter(|c| !c.is_alphanumeric()),
            _ => None,
        }
    }
}

enum Run<'a> {
    Boundary(usize),
    Text(&'a str),
}

fn split_runs(label: &str, marker: char) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut chars = label.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c == marker {
            let mut count = 1;
            while chars.next_if(|(_, next)| *next == marker).is_some() {
                count += 1;
            }
            runs.push(Run::Boundary(count));
        } else {
            let mut end = start + c.len_utf8();
            while let Some((idx, next)) = chars.next_if(|(_, next)| *next != marker) {
                end = idx + next.len_utf8();
            }
            runs.push(Run::Text(&label[start..end]));
        }
    }
    runs
}

/// Groups for an attribute-style label appended to `parent`.
///
/// A label that follows an alphanumeric ending gets a boundary marker in
/// front, so two literal segments never run together. When the parent ends in
/// a single non-alphanumeric spelling, a leading boundary run only expands to
/// that character.
pub fn extend_with_label(
    parent: &Vector<PrefixGroup>,
    label: &str,
    policy: &SeparatorPolicy,
    marker: char,
) -> Vector<PrefixGroup> {
    let last = parent.last();
    let label: Cow<'_, str> = match last {
        Some(group) if group.ends_alphanumeric() => Cow::Owned(format!("{}{}", marker, label)),
        _ => Cow::Borrowed(label),
    };
    let mut leading = last
        .and_then(PrefixGroup::pinned_separator)
        .map(SeparatorPolicy::single);

    let mut groups = parent.clone();
    for run in split_runs(&label, marker) {
        let group = match run {
            Run::Boundary(count) => {
                PrefixGroup::separator(leading.as_ref().unwrap_or(policy), count)
            }
            Run::Text(text) => PrefixGroup::literal(text),
        };
        leading = None;
        groups.push_back(group);
    }
    groups
}

/// Groups for an index-style literal: appended verbatim, no escaping or
/// separator expansion.
pub fn extend_with_literal(parent: &Vector<PrefixGroup>, literal: &str) -> Vector<PrefixGroup> {
    let mut groups = parent.clone();
    groups.push_back(PrefixGroup::literal(literal));
    groups
}
