//! Metadata annotations attached to merged elements (`spec.md` §6): the
//! contract this core exposes to a downstream pretty-printer.

use crate::{
    conflict::{GlobalConflictMap, LocalConflictMap, StructuralConflict},
    content::ContentConflict,
    element::Element,
    revision::Revision,
};

/// The metadata bundle attached to a single merged element.
#[derive(Debug, Clone)]
pub struct NodeMetadata<'a> {
    /// `ORIGINAL_NODE`: reference to the element this clone originated
    /// from, so a pretty-printer can retrieve original text.
    pub original_node: &'a Element<'a>,
    /// `SINGLE_REVISION`: set iff this node's whole subtree comes from
    /// exactly one revision.
    pub single_revision: Option<Revision>,
    /// `CONTENT_CONFLICT`: unresolved attribute disagreements on this node.
    pub content_conflicts: Vec<ContentConflict>,
    /// `STRUCTURAL_CONFLICT`: set only on placeholder siblings emitted for
    /// an unresolved ordering disagreement.
    pub structural_conflict: Option<StructuralConflict<'a>>,
    /// `LOCAL_CONFLICT_MAP`: per-token textual alternatives local to this
    /// node (MODIFIER visibility, OPERATOR_KIND, IS_UPPER).
    pub local_conflict_map: LocalConflictMap,
    /// `GLOBAL_CONFLICT_MAP`: read-only snapshot of the run-wide sentinel
    /// dictionary, attached to every visited node.
    pub global_conflict_map: GlobalConflictMap,
    /// `COMMENT_CONFLICT`: the conflict-marked raw text of a comment whose
    /// line-based merge did not resolve cleanly.
    pub comment_conflict: Option<String>,
}

impl<'a> NodeMetadata<'a> {
    pub fn new(original_node: &'a Element<'a>, global_conflict_map: GlobalConflictMap) -> Self {
        Self {
            original_node,
            single_revision: None,
            content_conflicts: Vec::new(),
            structural_conflict: None,
            local_conflict_map: LocalConflictMap::default(),
            global_conflict_map,
            comment_conflict: None,
        }
    }

    pub fn has_content_conflict(&self) -> bool {
        !self.content_conflicts.is_empty()
    }

    pub fn has_structural_conflict(&self) -> bool {
        self.structural_conflict.is_some()
    }

    pub fn has_any_conflict(&self) -> bool {
        self.has_content_conflict() || self.has_structural_conflict() || self.comment_conflict.is_some()
    }
}
