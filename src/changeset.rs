//! The merged PCS change set and content store (`spec.md` §3, components 2
//! and 3): the input this crate's core consumes from the (external) PCS
//! extraction step.

use rustc_hash::FxHashSet;

use crate::{
    content::ContentCandidate,
    multimap::MultiMap,
    node::Node,
    pcs::{PCS, PCSNode},
};

/// A set of [PCS] triples, indexed by parent/predecessor/successor for
/// retrieval, plus the content candidates contributed for each node.
///
/// Structural conflicts are not stored as a separate precomputed map:
/// because the indices below already let us find, in O(1) amortised time,
/// every triple sharing a parent/predecessor/successor with a given triple,
/// conflict classification (`spec.md` §3's predecessor/successor/root
/// conflict classes) is derived on demand from [`ChangeSet::inconsistent_triples`]
/// rather than duplicated as separate state that could drift out of sync
/// with `pcsSet`.
#[derive(Debug, Default)]
pub struct ChangeSet<'a> {
    successors: MultiMap<PCSNode<'a>, PCS<'a>>,
    predecessors: MultiMap<PCSNode<'a>, PCS<'a>>,
    parents: MultiMap<PCSNode<'a>, PCS<'a>>,
    contents: MultiMap<Node<'a>, ContentCandidate>,
}

impl<'a> ChangeSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pcs: PCS<'a>) {
        self.successors.insert(pcs.successor, pcs);
        self.predecessors.insert(pcs.predecessor, pcs);
        self.parents.insert(pcs.parent, pcs);
    }

    pub fn add_content(&mut self, node: Node<'a>, candidate: ContentCandidate) {
        self.contents.insert(node, candidate);
    }

    pub fn contents_for(&self, node: Node<'a>) -> &FxHashSet<ContentCandidate> {
        self.contents.get(&node)
    }

    /// All triples sharing `parent`, keyed by predecessor, used to walk the
    /// PCS chain for a given parent from the start-of-list sentinel.
    pub fn children_of(&self, parent: &PCSNode<'a>) -> impl Iterator<Item = &PCS<'a>> {
        self.parents.get(parent).iter()
    }

    /// Triples whose successor matches `successor`, across all parents:
    /// used to find predecessor-conflict partners.
    pub fn by_successor(&self, successor: &PCSNode<'a>) -> impl Iterator<Item = &PCS<'a>> {
        self.successors.get(successor).iter()
    }

    /// Triples whose predecessor matches `predecessor`, across all parents:
    /// used to find successor-conflict partners.
    pub fn by_predecessor(&self, predecessor: &PCSNode<'a>) -> impl Iterator<Item = &PCS<'a>> {
        self.predecessors.get(predecessor).iter()
    }

    /// Every triple that conflicts with `pcs`, classified per `spec.md` §3.
    pub fn inconsistent_triples<'s>(&'s self, pcs: &PCS<'a>) -> impl Iterator<Item = &'s PCS<'a>> {
        self.parents
            .get(&pcs.parent)
            .iter()
            .filter(move |other| {
                *other != pcs
                    && (pcs.is_predecessor_conflict_with(other)
                        || pcs.is_successor_conflict_with(other))
            })
            .chain(self.other_roots(pcs))
    }

    /// Triples that place either endpoint of `pcs` under a different
    /// parent: a root conflict.
    pub fn other_roots<'s>(&'s self, pcs: &PCS<'a>) -> impl Iterator<Item = &'s PCS<'a>> {
        let mut results = Vec::new();
        if pcs.predecessor.is_node() {
            results.extend(
                self.predecessors
                    .get(&pcs.predecessor)
                    .iter()
                    .chain(self.successors.get(&pcs.predecessor).iter())
                    .filter(|other| other.parent != pcs.parent),
            );
        }
        if pcs.successor.is_node() {
            results.extend(
                self.predecessors
                    .get(&pcs.successor)
                    .iter()
                    .chain(self.successors.get(&pcs.successor).iter())
                    .filter(|other| other.parent != pcs.parent),
            );
        }
        results.into_iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PCS<'a>> {
        self.predecessors.values()
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }
}
