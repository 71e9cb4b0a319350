use im::Vector;

use crate::path::PrefixGroup;

/// Every identifier a path can spell, as a lazy odometer over its groups.
///
/// The root-most group turns fastest and the leaf-most slowest; each reading
/// is concatenated root to leaf. A path without groups spells only `""`.
/// Iteration ends when the odometer wraps, so deep paths whose spelling count
/// does not fit in a `usize` still enumerate (without an exact size hint).
#[derive(Clone, Debug)]
pub struct Candidates<'a> {
    groups: &'a Vector<PrefixGroup>,
    digits: Vec<usize>,
    remaining: Option<usize>,
    exhausted: bool,
}

impl<'a> Candidates<'a> {
    pub fn new(groups: &'a Vector<PrefixGroup>) -> Self {
        let remaining = groups
            .iter()
            .try_fold(1usize, |acc, group| acc.checked_mul(group.len()));
        Self {
            groups,
            digits: vec![0; groups.len()],
            remaining,
            exhausted: groups.iter().any(PrefixGroup::is_empty),
        }
    }

    fn current(&self) -> String {
        let mut out = String::new();
        for (group, digit) in self.groups.iter().zip(&self.digits) {
            out.push_str(&group.alternatives()[*digit]);
        }
        out
    }

    /// Steps the odometer. False once every digit has wrapped back to zero.
    fn advance(&mut self) -> bool {
        for (group, digit) in self.groups.iter().zip(self.digits.iter_mut()) {
            *digit += 1;
            if *digit < group.len() {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let name = self.current();
        self.remaining = self.remaining.map(|n| n.saturating_sub(1));
        self.exhausted = !self.advance();
        Some(name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.exhausted, self.remaining) {
            (true, _) => (0, Some(0)),
            (false, Some(n)) => (n, Some(n)),
            (false, None) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SeparatorPolicy;

    #[test]
    fn empty_path_spells_empty_name() {
        let groups = Vector::new();
        assert_eq!(Candidates::new(&groups).collect::<Vec<_>>(), vec![String::new()]);
    }

    #[test]
    fn root_most_group_turns_fastest() {
        let policy = SeparatorPolicy::new("-/").expect("non-empty policy");
        let groups: Vector<PrefixGroup> = vec![
            PrefixGroup::literal("a"),
            PrefixGroup::separator(&policy, 1),
            PrefixGroup::literal("b"),
            PrefixGroup::separator(&policy, 1),
            PrefixGroup::literal("c"),
        ]
        .into_iter()
        .collect();
        let names: Vec<String> = Candidates::new(&groups).collect();
        assert_eq!(names, vec!["a-b-c", "a/b-c", "a-b/c", "a/b/c"]);
    }

    #[test]
    fn uncountable_paths_still_enumerate() {
        let policy = SeparatorPolicy::default();
        let mut groups = Vector::new();
        for idx in 0..40 {
            groups.push_back(PrefixGroup::literal(format!("s{}", idx)));
            groups.push_back(PrefixGroup::separator(&policy, 1));
        }
        let mut candidates = Candidates::new(&groups);
        assert_eq!(candidates.size_hint(), (usize::MAX, None));
        let first = candidates.next().expect("first spelling");
        assert!(first.starts_with("s0-s1-s2-"));
        assert!(candidates.next().expect("second spelling").starts_with("s0/s1-"));
    }

    #[test]
    fn length_is_known_up_front() {
        let groups: Vector<PrefixGroup> = vec![
            PrefixGroup::separator(&SeparatorPolicy::default(), 1),
            PrefixGroup::separator(&SeparatorPolicy::default(), 2),
        ]
        .into_iter()
        .collect();
        let candidates = Candidates::new(&groups);
        assert_eq!(candidates.size_hint(), (16, Some(16)));
        assert_eq!(candidates.count(), 16);
    }
}
