use std::fmt::Display;

/// One of the three sides being merged.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub enum Revision {
    Base,
    Left,
    Right,
}

impl Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Revision::Base => "Base",
            Revision::Left => "Left",
            Revision::Right => "Right",
        })
    }
}

/// A set of [Revision]s, used to track which revisions a merged node or
/// subtree is present in (or unchanged with respect to).
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash, Default)]
pub struct RevisionSet {
    base: bool,
    left: bool,
    right: bool,
}

impl RevisionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, revision: Revision) {
        self.set(revision, true);
    }

    pub fn with(mut self, revision: Revision) -> Self {
        self.add(revision);
        self
    }

    pub fn set(&mut self, revision: Revision, present: bool) {
        match revision {
            Revision::Base => self.base = present,
            Revision::Left => self.left = present,
            Revision::Right => self.right = present,
        }
    }

    pub fn contains(self, revision: Revision) -> bool {
        match revision {
            Revision::Base => self.base,
            Revision::Left => self.left,
            Revision::Right => self.right,
        }
    }

    pub fn len(self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(self) -> bool {
        !(self.base || self.left || self.right)
    }

    pub fn is_full(self) -> bool {
        self.base && self.left && self.right
    }

    /// Checked conversion to a non-empty revision set.
    pub fn as_nonempty(self) -> Option<RevisionNESet> {
        if self.is_empty() {
            None
        } else {
            Some(RevisionNESet(self))
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Revision> {
        std::iter::empty()
            .chain(self.base.then_some(Revision::Base))
            .chain(self.left.then_some(Revision::Left))
            .chain(self.right.then_some(Revision::Right))
    }
}

impl Display for RevisionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/{}{}{}/",
            if self.base { "B" } else { "." },
            if self.left { "L" } else { "." },
            if self.right { "R" } else { "." }
        )
    }
}

/// A [RevisionSet] which is statically known to be non-empty.
///
/// Every node visited by the interpreter has at least one originating
/// revision, so this is expressed as a type-level invariant instead of a
/// runtime check repeated at every call site.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct RevisionNESet(RevisionSet);

impl std::ops::Deref for RevisionNESet {
    type Target = RevisionSet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl RevisionNESet {
    pub fn singleton(revision: Revision) -> Self {
        Self(RevisionSet::new().with(revision))
    }

    pub fn add(&mut self, revision: Revision) {
        self.0.add(revision);
    }

    pub fn with(self, revision: Revision) -> Self {
        Self(self.0.with(revision))
    }

    pub fn set(self) -> RevisionSet {
        self.0
    }

    /// Any revision present, preferring the one most likely to reflect an edit.
    pub fn any(self) -> Revision {
        self.0
            .iter()
            .next()
            .expect("RevisionNESet is unexpectedly empty")
    }
}

impl Display for RevisionNESet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revision_set_tracks_membership() {
        let mut set = RevisionSet::new();
        assert!(set.is_empty());
        set.add(Revision::Left);
        set.add(Revision::Right);
        assert!(set.contains(Revision::Left));
        assert!(!set.contains(Revision::Base));
        assert!(!set.is_full());
        set.add(Revision::Base);
        assert!(set.is_full());
    }

    #[test]
    fn nonempty_rejects_empty_set() {
        assert!(RevisionSet::new().as_nonempty().is_none());
        assert!(RevisionSet::new().with(Revision::Base).as_nonempty().is_some());
    }
}
