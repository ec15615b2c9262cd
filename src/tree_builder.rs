//! Tree builder & role resolver (`spec.md` §4.3): turns a visited original
//! node into a merged clone, resolves which syntactic role it occupies
//! under its new parent, and inserts it respecting that role's container
//! semantics.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    changeset::ChangeSet,
    content::RoledValues,
    content_merger::ContentMerger,
    element::{ChildRole, Element, ElementId, RoleSchema, SlotKind},
    error::MergeError,
    metadata::NodeMetadata,
    node::Node,
    revision::Revision,
    settings::MergeSettings,
    tree_mapping::TreeMapping,
};

/// A container slot under a merged node, holding its children with the
/// insertion discipline `spec.md` §4.3 specifies per [`SlotKind`].
#[derive(Debug)]
pub enum MergedSlot<'a> {
    Single(Option<Box<MergedNode<'a>>>),
    Sequence(Vec<MergedNode<'a>>),
    Set(Vec<MergedNode<'a>>),
    KeyedMap(Vec<(String, MergedNode<'a>)>),
}

impl<'a> MergedSlot<'a> {
    fn empty(kind: SlotKind) -> Self {
        match kind {
            SlotKind::Single => MergedSlot::Single(None),
            SlotKind::Sequence => MergedSlot::Sequence(Vec::new()),
            SlotKind::Set => MergedSlot::Set(Vec::new()),
            SlotKind::KeyedMap => MergedSlot::KeyedMap(Vec::new()),
        }
    }
}

/// A node of the merged output tree: a shallow clone of some original
/// element (or, for a structural-conflict placeholder, of whichever side's
/// element was chosen to carry the metadata), carrying reconciled content
/// and its own children, keyed by the role they occupy under it.
#[derive(Debug)]
pub struct MergedNode<'a> {
    pub content: RoledValues,
    pub metadata: NodeMetadata<'a>,
    pub slots: FxHashMap<ChildRole, MergedSlot<'a>>,
}

impl<'a> MergedNode<'a> {
    fn empty(metadata: NodeMetadata<'a>, content: RoledValues) -> Self {
        Self {
            content,
            metadata,
            slots: FxHashMap::default(),
        }
    }

    pub fn slot(&self, role: ChildRole) -> Option<&MergedSlot<'a>> {
        self.slots.get(&role)
    }
}

/// Owns the state that must survive across one whole tree-building run: the
/// content merger (sentinel counter and global dictionary), and the set of
/// originals already visited, used to detect move conflicts.
pub struct TreeBuilder {
    content_merger: ContentMerger,
    visited: FxHashSet<ElementId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            content_merger: ContentMerger::new(),
            visited: FxHashSet::default(),
        }
    }

    pub fn content_merger(&mut self) -> &mut ContentMerger {
        &mut self.content_merger
    }

    /// `visit(parent, origNode)`, minus the actual insertion into `parent`
    /// (left to the caller via [`insert_child`], since the caller is in a
    /// better position to know which already-under-construction node is
    /// `parent`).
    pub fn visit<'a>(
        &mut self,
        node: Node<'a>,
        changeset: &ChangeSet<'a>,
        base_left: &dyn TreeMapping<'a>,
        base_right: &dyn TreeMapping<'a>,
        settings: &MergeSettings,
    ) -> Result<(ChildRole, MergedNode<'a>), MergeError> {
        if !self.visited.insert(node.element().id) {
            return Err(MergeError::MoveConflict {
                node: node.to_string(),
            });
        }

        let content_result = self
            .content_merger
            .merge_node(changeset.contents_for(node), settings)?;
        let role = resolve_role(node, base_left, base_right)?;

        let mut metadata = NodeMetadata::new(node.element(), self.content_merger.global_snapshot());
        metadata.content_conflicts = content_result.conflicts;
        metadata.local_conflict_map = content_result.local_conflict_map;
        metadata.comment_conflict = content_result.comment_conflict;

        Ok((role, MergedNode::empty(metadata, content_result.merged)))
    }

    /// `visitConflicting(parent, leftNodes, rightNodes)`.
    pub fn visit_conflicting<'a>(
        &self,
        left_originals: &[&'a Element<'a>],
        right_originals: &[&'a Element<'a>],
    ) -> (ChildRole, MergedNode<'a>) {
        let placeholder_source = left_originals
            .first()
            .or_else(|| right_originals.first())
            .expect("a structural conflict must have at least one non-empty side");

        let mut metadata = NodeMetadata::new(placeholder_source, self.content_merger.global_snapshot());
        metadata.structural_conflict = Some(crate::conflict::StructuralConflict {
            left: left_originals.to_vec(),
            right: right_originals.to_vec(),
        });

        (
            placeholder_source.native_role,
            MergedNode::empty(metadata, RoledValues::default()),
        )
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Inserts `child` into `parent` under `role`, preserving the container
/// semantics of that role's slot kind.
pub fn insert_child<'a>(
    parent: &mut MergedNode<'a>,
    schema: &dyn RoleSchema,
    role: ChildRole,
    child: MergedNode<'a>,
) -> Result<(), MergeError> {
    let slot_kind = schema.slot_kind(role);
    let slot = parent
        .slots
        .entry(role)
        .or_insert_with(|| MergedSlot::empty(slot_kind));

    match slot {
        MergedSlot::Single(existing) => {
            *existing = Some(Box::new(child));
        }
        MergedSlot::Sequence(items) | MergedSlot::Set(items) => items.push(child),
        MergedSlot::KeyedMap(items) => {
            let key = child.metadata.original_node.annotation_key.ok_or_else(|| {
                MergeError::MissingAnnotationKey {
                    node: child.metadata.original_node.id.0.to_string(),
                }
            })?;
            items.retain(|(existing_key, _)| existing_key != key);
            items.push((key.to_string(), child));
        }
    }
    Ok(())
}

/// **Role resolution** (`spec.md` §4.3): a node may nominally have up to two
/// syntactic roles after editing (its own and the BASE counterpart's, since
/// a genuine three-way disagreement on role would already surface as a
/// structural conflict). `origNode`'s own role, plus whichever other-side
/// role(s) a BASE counterpart leads us to, are collected as candidates; the
/// BASE role itself is then subtracted from the whole set (not just one
/// occurrence of it), so that a role shared with BASE cancels out — leaving
/// either nothing (the role never changed; fall back to BASE's role) or the
/// single distinct role the node was moved to.
fn resolve_role<'a>(
    node: Node<'a>,
    base_left: &dyn TreeMapping<'a>,
    base_right: &dyn TreeMapping<'a>,
) -> Result<ChildRole, MergeError> {
    let mut candidates = vec![node.native_role()];

    let base_role = match node.revision() {
        Revision::Base => {
            if let Some(left_match) = base_left.get_src(node.element()) {
                candidates.push(left_match.native_role);
            }
            if let Some(right_match) = base_right.get_src(node.element()) {
                candidates.push(right_match.native_role);
            }
            Some(node.native_role())
        }
        Revision::Left => base_left
            .get_dst(node.element())
            .map(|base_match| base_match.native_role),
        Revision::Right => base_right
            .get_dst(node.element())
            .map(|base_match| base_match.native_role),
    };

    if let Some(base_role) = base_role {
        subtract_role(&mut candidates, base_role);
    }

    let mut unique = Vec::new();
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }

    match unique.as_slice() {
        [role] => Ok(*role),
        _ => Err(MergeError::UnresolvedRole {
            node: node.to_string(),
            candidates: unique.iter().map(ToString::to_string).collect(),
        }),
    }
}

/// Removes every occurrence of `role` from `candidates`. If that empties the
/// set, the node's role never diverged from BASE's, so BASE's role is
/// restored as the (sole) answer.
fn subtract_role(candidates: &mut Vec<ChildRole>, role: ChildRole) {
    candidates.retain(|candidate| *candidate != role);
    if candidates.is_empty() {
        candidates.push(role);
    }
}
