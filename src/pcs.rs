use std::fmt::Display;

use crate::{node::Node, revision::RevisionNESet, revision::Revision};

/// A component of a [PCS] triple: either a real node, or one of the virtual
/// sentinels that bracket every parent's child list (and the tree itself).
#[derive(Debug, Copy, Clone)]
pub enum PCSNode<'a> {
    /// The synthetic root of the whole document, `⊥`.
    VirtualRoot,
    /// Sentinel marking the start of a child list, `⊣`.
    LeftMarker,
    /// A real node, carrying the set of revisions it is present in.
    Node {
        revisions: RevisionNESet,
        node: Node<'a>,
    },
    /// Sentinel marking the end of a child list, `⊢`.
    RightMarker,
}

impl PartialEq for PCSNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PCSNode::VirtualRoot, PCSNode::VirtualRoot)
            | (PCSNode::LeftMarker, PCSNode::LeftMarker)
            | (PCSNode::RightMarker, PCSNode::RightMarker) => true,
            (PCSNode::Node { node: a, .. }, PCSNode::Node { node: b, .. }) => a == b,
            _ => false,
        }
    }
}
impl Eq for PCSNode<'_> {}

impl std::hash::Hash for PCSNode<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            PCSNode::VirtualRoot => 0u8.hash(state),
            PCSNode::LeftMarker => 1u8.hash(state),
            PCSNode::RightMarker => 2u8.hash(state),
            PCSNode::Node { node, .. } => {
                3u8.hash(state);
                node.hash(state);
            }
        }
    }
}

impl<'a> PCSNode<'a> {
    pub fn is_node(&self) -> bool {
        matches!(self, PCSNode::Node { .. })
    }

    pub fn as_node(&self) -> Option<Node<'a>> {
        match self {
            PCSNode::Node { node, .. } => Some(*node),
            _ => None,
        }
    }
}

impl Display for PCSNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PCSNode::VirtualRoot => write!(f, "\u{22a5}"),
            PCSNode::LeftMarker => write!(f, "\u{22a3}"),
            PCSNode::Node { node, .. } => write!(f, "{node}"),
            PCSNode::RightMarker => write!(f, "\u{22a2}"),
        }
    }
}

/// A PCS triple, recording that under `parent`, `predecessor` is immediately
/// followed by `successor`, as asserted by `revision`.
#[derive(Debug, Copy, Clone)]
pub struct PCS<'a> {
    pub parent: PCSNode<'a>,
    pub predecessor: PCSNode<'a>,
    pub successor: PCSNode<'a>,
    pub revision: Revision,
}

impl PartialEq for PCS<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent
            && self.predecessor == other.predecessor
            && self.successor == other.successor
    }
}
impl Eq for PCS<'_> {}

impl std::hash::Hash for PCS<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        self.predecessor.hash(state);
        self.successor.hash(state);
    }
}

impl Display for PCS<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.parent, self.predecessor, self.successor, self.revision
        )
    }
}

impl<'a> PCS<'a> {
    /// §3: same successor reached from different predecessors, same parent.
    pub fn is_predecessor_conflict_with(&self, other: &PCS<'a>) -> bool {
        self.parent == other.parent
            && self.successor == other.successor
            && self.predecessor != other.predecessor
    }

    /// §3: same predecessor followed by different successors, same parent.
    pub fn is_successor_conflict_with(&self, other: &PCS<'a>) -> bool {
        self.parent == other.parent
            && self.predecessor == other.predecessor
            && self.successor != other.successor
    }

    /// §3: a node appears under two different parents. Fatal.
    pub fn is_root_conflict_with(&self, other: &PCS<'a>) -> bool {
        self.parent != other.parent
            && ((self.predecessor.is_node() && self.predecessor == other.predecessor)
                || (self.successor.is_node() && self.successor == other.successor)
                || (self.predecessor.is_node() && self.predecessor == other.successor)
                || (self.successor.is_node() && self.successor == other.predecessor))
    }
}
