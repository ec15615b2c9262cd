//! PCS interpreter (`spec.md` §4.2): walks the PCS relation from the virtual
//! root down, materialising children in order, delegating to the content
//! merger per node, and invoking the conflict classifier on disagreements.

use log::{debug, trace};

use crate::{
    changeset::ChangeSet,
    element::{ChildRole, Element, RoleSchema},
    error::MergeError,
    pcs::{PCSNode, PCS},
    revision::{Revision, RevisionSet},
    settings::MergeSettings,
    tree_builder::{insert_child, MergedNode, TreeBuilder},
    tree_mapping::TreeMapping,
};

/// Output of a full interpreter run.
pub struct MergeOutput<'a> {
    pub merged_root: MergedNode<'a>,
    pub has_conflicts: bool,
}

/// Orchestrates one merge run: owns the [`TreeBuilder`] and the
/// accumulated conflict flag.
pub struct Interpreter {
    builder: TreeBuilder,
    has_conflicts: bool,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            builder: TreeBuilder::new(),
            has_conflicts: false,
        }
    }

    /// `interpret(changeSet, baseLeft, baseRight) -> (mergedRoot, hasConflicts)`.
    pub fn interpret<'a>(
        &mut self,
        changeset: &ChangeSet<'a>,
        base_left: &dyn TreeMapping<'a>,
        base_right: &dyn TreeMapping<'a>,
        schema: &dyn RoleSchema,
        settings: &MergeSettings,
    ) -> Result<MergeOutput<'a>, MergeError> {
        self.preflight_root_conflicts(changeset)?;

        let (root_child, _) = self.traverse(
            PCSNode::VirtualRoot,
            changeset,
            base_left,
            base_right,
            schema,
            settings,
        )?;

        let (_, merged_root) = root_child.ok_or(MergeError::EmptyVirtualRoot)?;

        Ok(MergeOutput {
            merged_root,
            has_conflicts: self.has_conflicts,
        })
    }

    /// Pre-flight scan (§4.2): fail fatally on any root conflict before
    /// doing any traversal work.
    fn preflight_root_conflicts(&self, changeset: &ChangeSet<'_>) -> Result<(), MergeError> {
        for pcs in changeset.iter() {
            if let Some(other) = changeset
                .other_roots(pcs)
                .find(|other| pcs.is_root_conflict_with(other))
            {
                return Err(MergeError::RootConflict {
                    node: pcs.successor.to_string(),
                    first: pcs.parent.to_string(),
                    second: other.parent.to_string(),
                });
            }
        }
        Ok(())
    }

    /// `traverse(currentRoot)`, restructured for ownership: instead of
    /// mutating an already-inserted clone once its subtree's combined
    /// revision set is known (as the reference pseudocode does), each node
    /// is fully built bottom-up and returned to its caller, who performs
    /// the insertion. The resulting tree and metadata are identical; only
    /// the order of "build" vs. "attach" is swapped to fit borrowed,
    /// owned data instead of a mutable graph.
    fn traverse<'a>(
        &mut self,
        current: PCSNode<'a>,
        changeset: &ChangeSet<'a>,
        base_left: &dyn TreeMapping<'a>,
        base_right: &dyn TreeMapping<'a>,
        schema: &dyn RoleSchema,
        settings: &MergeSettings,
    ) -> Result<(Option<(ChildRole, MergedNode<'a>)>, RevisionSet), MergeError> {
        let mut revisions = RevisionSet::new();
        let mut own: Option<(ChildRole, MergedNode<'a>)> = None;

        if let PCSNode::Node { node, .. } = current {
            revisions.add(node.revision());
            for candidate in changeset.contents_for(node) {
                revisions.add(candidate.revision);
            }
            trace!("visiting {node}");
            let visited = self.builder.visit(node, changeset, base_left, base_right, settings)?;
            if visited.1.metadata.has_any_conflict() {
                self.has_conflicts = true;
            }
            own = Some(visited);
        }

        if changeset.children_of(&current).next().is_none() {
            return Ok((own, revisions));
        }

        let mut built_children: Vec<(ChildRole, MergedNode<'a>)> = Vec::new();
        let mut cursor = PCSNode::LeftMarker;

        loop {
            let matches: Vec<PCS<'a>> = changeset
                .by_predecessor(&cursor)
                .filter(|pcs| pcs.parent == current)
                .copied()
                .collect();

            match matches.len() {
                0 => break,
                1 => {
                    let triple = matches[0];
                    revisions.add(triple.revision);
                    let next = triple.successor;
                    if matches!(next, PCSNode::RightMarker) {
                        break;
                    }
                    let (child, child_revisions) =
                        self.traverse(next, changeset, base_left, base_right, schema, settings)?;
                    self.absorb_child(&mut revisions, &mut built_children, child, child_revisions);
                    cursor = next;
                }
                _ => {
                    debug!("successor conflict at {cursor}, {} candidates", matches.len());
                    revisions.add(Revision::Left);
                    revisions.add(Revision::Right);
                    let (left_triple, right_triple) = identify_sides(&matches)?;
                    let (closing, conflict_children, contributed) = self.traverse_conflict(
                        current,
                        &left_triple,
                        &right_triple,
                        changeset,
                        base_left,
                        base_right,
                        schema,
                        settings,
                    )?;
                    built_children.extend(conflict_children);
                    for revision in contributed.iter() {
                        revisions.add(revision);
                    }
                    if matches!(closing, PCSNode::RightMarker) {
                        break;
                    }
                    let (child, child_revisions) = self.traverse(
                        closing,
                        changeset,
                        base_left,
                        base_right,
                        schema,
                        settings,
                    )?;
                    self.absorb_child(&mut revisions, &mut built_children, child, child_revisions);
                    cursor = closing;
                }
            }
        }

        match &mut own {
            Some((_, parent)) => {
                for (role, child) in built_children {
                    insert_child(parent, schema, role, child)?;
                }
            }
            None => {
                // The virtual root itself: there is nothing to insert into,
                // so the single expected child becomes the merge output.
                if let Some(first) = built_children.into_iter().next() {
                    own = Some(first);
                }
            }
        }

        Ok((own, revisions))
    }

    fn absorb_child<'a>(
        &self,
        revisions: &mut RevisionSet,
        built_children: &mut Vec<(ChildRole, MergedNode<'a>)>,
        child: Option<(ChildRole, MergedNode<'a>)>,
        child_revisions: RevisionSet,
    ) {
        for revision in child_revisions.iter() {
            revisions.add(revision);
        }
        if let Some((role, mut node)) = child {
            if child_revisions.len() == 1 {
                node.metadata.single_revision = child_revisions.iter().next();
            }
            built_children.push((role, node));
        }
    }

    /// `traverseConflict`, with the cursor trick of the reference pseudocode
    /// replaced by directly returning the point both sides agree again
    /// (see [`Self::traverse`]'s doc comment for why).
    #[allow(clippy::too_many_arguments)]
    fn traverse_conflict<'a>(
        &mut self,
        parent: PCSNode<'a>,
        left_triple: &PCS<'a>,
        right_triple: &PCS<'a>,
        changeset: &ChangeSet<'a>,
        base_left: &dyn TreeMapping<'a>,
        base_right: &dyn TreeMapping<'a>,
        schema: &dyn RoleSchema,
        settings: &MergeSettings,
    ) -> Result<(PCSNode<'a>, Vec<(ChildRole, MergedNode<'a>)>, RevisionSet), MergeError> {
        let (left_seq, left_closing) = extract_conflict_sequence(parent, left_triple, changeset)?;
        let (right_seq, right_closing) = extract_conflict_sequence(parent, right_triple, changeset)?;
        let closing = if left_seq.is_empty() { right_closing } else { left_closing };

        let left_elements: Vec<&'a Element<'a>> = left_seq
            .iter()
            .filter_map(PCSNode::as_node)
            .map(|node| node.element())
            .collect();
        let right_elements: Vec<&'a Element<'a>> = right_seq
            .iter()
            .filter_map(PCSNode::as_node)
            .map(|node| node.element())
            .collect();

        let auto_resolvable = settings.auto_resolve_type_members
            && left_elements
                .iter()
                .chain(right_elements.iter())
                .all(|element| element.native_role == ChildRole::TypeMember);

        let mut built = Vec::new();
        let mut contributed = RevisionSet::new();

        if auto_resolvable {
            for node in left_seq.into_iter().chain(right_seq) {
                let (child, child_revisions) =
                    self.traverse(node, changeset, base_left, base_right, schema, settings)?;
                self.absorb_child(&mut contributed, &mut built, child, child_revisions);
            }
        } else {
            self.has_conflicts = true;
            let (role, placeholder) = self.builder.visit_conflicting(&left_elements, &right_elements);
            built.push((role, placeholder));
            contributed.add(Revision::Left);
            contributed.add(Revision::Right);
        }

        Ok((closing, built, contributed))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        content::{ContentCandidate, ContentRole, ContentValue, Modifier, ModifierCategory, ModifierSet},
        element::{ChildRole, DefaultRoleSchema, Element},
        revision::RevisionNESet,
        tree_builder::MergedSlot,
        tree_mapping::TableTreeMapping,
    };

    /// Wraps `element` as a PCS node originating from `revision`.
    fn wrap<'a>(revision: Revision, element: &'a Element<'a>) -> PCSNode<'a> {
        PCSNode::Node {
            revisions: RevisionNESet::singleton(revision),
            node: Node::new(revision, element),
        }
    }

    /// Builds a changeset for a virtual root with a single, unconflicted
    /// child `el`, contributed by `revision`.
    fn single_child_changeset<'a>(el: &'a Element<'a>, revision: Revision) -> ChangeSet<'a> {
        let mut cs = ChangeSet::new();
        let child = wrap(revision, el);
        cs.add(PCS {
            parent: PCSNode::VirtualRoot,
            predecessor: PCSNode::LeftMarker,
            successor: child,
            revision,
        });
        cs.add(PCS {
            parent: PCSNode::VirtualRoot,
            predecessor: child,
            successor: PCSNode::RightMarker,
            revision,
        });
        cs
    }

    fn run<'a>(changeset: &ChangeSet<'a>) -> MergeOutput<'a> {
        let base_left = TableTreeMapping::new();
        let base_right = TableTreeMapping::new();
        let schema = DefaultRoleSchema;
        let settings = MergeSettings::default();
        Interpreter::new()
            .interpret(changeset, &base_left, &base_right, &schema, &settings)
            .expect("interpretation should succeed")
    }

    fn sequence<'a, 'b>(node: &'b MergedNode<'a>, role: ChildRole) -> &'b [MergedNode<'a>] {
        match node.slot(role) {
            Some(MergedSlot::Sequence(items) | MergedSlot::Set(items)) => items,
            _ => &[],
        }
    }

    /// `merge(B, B, B)` is structurally equal to `B`, with no conflicts and
    /// the whole tree marked `SINGLE_REVISION = Base` (`spec.md` §8).
    #[test]
    fn identical_tree_on_all_three_sides_round_trips() {
        let el = Element::new(1, ChildRole::Statement);
        let mut cs = single_child_changeset(&el, Revision::Base);
        let node = Node::new(Revision::Base, &el);
        cs.add_content(node, ContentCandidate::new(ContentRole::Name, ContentValue::Text("foo".into()), Revision::Base));

        let output = run(&cs);
        assert!(!output.has_conflicts);
        assert_eq!(
            output.merged_root.content.get(ContentRole::Name),
            Some(&ContentValue::Text("foo".into()))
        );
        assert_eq!(output.merged_root.metadata.single_revision, Some(Revision::Base));
    }

    /// `merge(B, X, B)`: only LEFT touched the node, so the standard
    /// three-way rule takes LEFT's value and reports no conflict.
    #[test]
    fn base_vs_one_edited_side_takes_the_edit_with_no_conflict() {
        let el = Element::new(1, ChildRole::Statement);
        let mut cs = single_child_changeset(&el, Revision::Base);
        let node = Node::new(Revision::Base, &el);
        cs.add_content(node, ContentCandidate::new(ContentRole::Name, ContentValue::Text("foo".into()), Revision::Base));
        cs.add_content(node, ContentCandidate::new(ContentRole::Name, ContentValue::Text("bar".into()), Revision::Left));

        let output = run(&cs);
        assert!(!output.has_conflicts);
        assert_eq!(
            output.merged_root.content.get(ContentRole::Name),
            Some(&ContentValue::Text("bar".into()))
        );
    }

    /// Scenario 1 (`spec.md` §8): BASE `foo`, LEFT renames to `bar`, RIGHT
    /// to `baz`. The merged identifier is sentinel `__SPORK_CONFLICT_0`,
    /// registered in the global conflict map.
    #[test]
    fn rename_conflict_allocates_a_sentinel() {
        let el = Element::new(1, ChildRole::TypeMember);
        let mut cs = single_child_changeset(&el, Revision::Base);
        let node = Node::new(Revision::Base, &el);
        cs.add_content(node, ContentCandidate::new(ContentRole::Name, ContentValue::Text("foo".into()), Revision::Base));
        cs.add_content(node, ContentCandidate::new(ContentRole::Name, ContentValue::Text("bar".into()), Revision::Left));
        cs.add_content(node, ContentCandidate::new(ContentRole::Name, ContentValue::Text("baz".into()), Revision::Right));

        let output = run(&cs);
        assert!(output.has_conflicts);
        assert_eq!(
            output.merged_root.content.get(ContentRole::Name),
            Some(&ContentValue::Text("__SPORK_CONFLICT_0".into()))
        );
        assert_eq!(
            output.merged_root.metadata.global_conflict_map.get("__SPORK_CONFLICT_0"),
            Some(&("bar".to_string(), "baz".to_string()))
        );
    }

    fn modifier(token: &str, category: ModifierCategory) -> ModifierCandidate {
        ModifierCandidate { token: token.to_string(), category }
    }

    struct ModifierCandidate {
        token: String,
        category: ModifierCategory,
    }

    fn modifiers_candidate(revision: Revision, tokens: &[ModifierCandidate]) -> ContentCandidate {
        let set = ModifierSet(
            tokens
                .iter()
                .map(|m| Modifier { token: m.token.clone(), category: m.category })
                .collect(),
        );
        ContentCandidate::new(ContentRole::Modifier, ContentValue::Modifiers(set), revision)
    }

    /// Scenario 2 (`spec.md` §8): non-visibility modifiers union cleanly.
    #[test]
    fn modifier_sets_union_non_visibility_tokens() {
        let el = Element::new(1, ChildRole::TypeMember);
        let mut cs = single_child_changeset(&el, Revision::Base);
        let node = Node::new(Revision::Base, &el);
        cs.add_content(
            node,
            modifiers_candidate(Revision::Base, &[modifier("final", ModifierCategory::Kind)]),
        );
        cs.add_content(
            node,
            modifiers_candidate(
                Revision::Left,
                &[modifier("final", ModifierCategory::Kind), modifier("static", ModifierCategory::Kind)],
            ),
        );
        cs.add_content(
            node,
            modifiers_candidate(
                Revision::Right,
                &[modifier("final", ModifierCategory::Kind), modifier("synchronized", ModifierCategory::Kind)],
            ),
        );

        let output = run(&cs);
        assert!(!output.has_conflicts);
        let ContentValue::Modifiers(merged) = output.merged_root.content.get(ContentRole::Modifier).unwrap() else {
            panic!("expected a modifier set");
        };
        let tokens: Vec<&str> = merged.0.iter().map(|m| m.token.as_str()).collect();
        assert!(tokens.contains(&"final"));
        assert!(tokens.contains(&"static"));
        assert!(tokens.contains(&"synchronized"));
    }

    /// Scenario 3 (`spec.md` §8): BASE `public`, LEFT `private`, RIGHT
    /// `protected`. Merged modifiers carry `private`; the alternative is
    /// recorded locally, not as a hard conflict.
    #[test]
    fn visibility_disagreement_is_a_local_conflict_not_a_hard_one() {
        let el = Element::new(1, ChildRole::TypeMember);
        let mut cs = single_child_changeset(&el, Revision::Base);
        let node = Node::new(Revision::Base, &el);
        cs.add_content(
            node,
            modifiers_candidate(Revision::Base, &[modifier("public", ModifierCategory::Visibility)]),
        );
        cs.add_content(
            node,
            modifiers_candidate(Revision::Left, &[modifier("private", ModifierCategory::Visibility)]),
        );
        cs.add_content(
            node,
            modifiers_candidate(Revision::Right, &[modifier("protected", ModifierCategory::Visibility)]),
        );

        let output = run(&cs);
        assert!(!output.has_conflicts);
        let ContentValue::Modifiers(merged) = output.merged_root.content.get(ContentRole::Modifier).unwrap() else {
            panic!("expected a modifier set");
        };
        assert_eq!(merged.visibility().map(|m| m.token.as_str()), Some("private"));
        assert_eq!(
            output.merged_root.metadata.local_conflict_map.get("private"),
            Some(&("private".to_string(), "protected".to_string()))
        );
    }

    /// Scenario 4 (`spec.md` §8): overlapping edits to a comment body fail
    /// to merge cleanly and fall back to conflict-marked text.
    #[test]
    fn comment_conflict_falls_back_to_conflict_marked_text() {
        let el = Element::new(1, ChildRole::Comment);
        let mut cs = single_child_changeset(&el, Revision::Base);
        let node = Node::new(Revision::Base, &el);
        cs.add_content(
            node,
            ContentCandidate::new(
                ContentRole::CommentContent,
                ContentValue::Comment { text: "old".into(), raw: "old line\n".into() },
                Revision::Base,
            ),
        );
        cs.add_content(
            node,
            ContentCandidate::new(
                ContentRole::CommentContent,
                ContentValue::Comment { text: "left".into(), raw: "old line\nnew-left\n".into() },
                Revision::Left,
            ),
        );
        cs.add_content(
            node,
            ContentCandidate::new(
                ContentRole::CommentContent,
                ContentValue::Comment { text: "right".into(), raw: "old line\nnew-right\n".into() },
                Revision::Right,
            ),
        );

        let output = run(&cs);
        assert!(output.has_conflicts);
        assert!(output.merged_root.metadata.comment_conflict.is_some());
    }

    /// Scenario 5 (`spec.md` §8): BASE `[m1]`, LEFT `[m1, m2]`, RIGHT
    /// `[m1, m3]`. All three nodes play TYPE_MEMBER, so the structural
    /// conflict auto-resolves by concatenation: `[m1, m2, m3]`.
    #[test]
    fn type_member_insertions_auto_resolve_by_concatenation() {
        let class_el = Element::new(1, ChildRole::Body);
        let m1 = Element::new(2, ChildRole::TypeMember);
        let m2 = Element::new(3, ChildRole::TypeMember);
        let m3 = Element::new(4, ChildRole::TypeMember);

        let mut cs = ChangeSet::new();
        let class_node = wrap(Revision::Base, &class_el);
        let m1_node = wrap(Revision::Base, &m1);
        let m2_node = wrap(Revision::Left, &m2);
        let m3_node = wrap(Revision::Right, &m3);

        // virtual root -> class_el -> class_el
        cs.add(PCS { parent: PCSNode::VirtualRoot, predecessor: PCSNode::LeftMarker, successor: class_node, revision: Revision::Base });
        cs.add(PCS { parent: PCSNode::VirtualRoot, predecessor: class_node, successor: PCSNode::RightMarker, revision: Revision::Base });

        // class_el's children: base has [m1]; left inserts m2 after m1; right inserts m3 after m1.
        cs.add(PCS { parent: class_node, predecessor: PCSNode::LeftMarker, successor: m1_node, revision: Revision::Base });
        cs.add(PCS { parent: class_node, predecessor: m1_node, successor: m2_node, revision: Revision::Left });
        cs.add(PCS { parent: class_node, predecessor: m2_node, successor: PCSNode::RightMarker, revision: Revision::Left });
        cs.add(PCS { parent: class_node, predecessor: m1_node, successor: m3_node, revision: Revision::Right });
        cs.add(PCS { parent: class_node, predecessor: m3_node, successor: PCSNode::RightMarker, revision: Revision::Right });

        let output = run(&cs);
        assert!(!output.has_conflicts);
        let members = sequence(&output.merged_root, ChildRole::TypeMember);
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].metadata.original_node.id, m1.id);
        assert_eq!(members[1].metadata.original_node.id, m2.id);
        assert_eq!(members[2].metadata.original_node.id, m3.id);
    }

    /// Scenario 6 (`spec.md` §8): BASE `[s1, s3]`, LEFT `[s1, sL, s3]`,
    /// RIGHT `[s1, sR, s3]`. Statements aren't TYPE_MEMBER, so no
    /// auto-resolution applies: a placeholder carrying `STRUCTURAL_CONFLICT`
    /// is inserted between `s1` and `s3`.
    #[test]
    fn conflicting_statement_insertions_yield_a_structural_conflict_placeholder() {
        let block_el = Element::new(1, ChildRole::Body);
        let s1 = Element::new(2, ChildRole::Statement);
        let s3 = Element::new(3, ChildRole::Statement);
        let s_left = Element::new(4, ChildRole::Statement);
        let s_right = Element::new(5, ChildRole::Statement);

        let mut cs = ChangeSet::new();
        let block_node = wrap(Revision::Base, &block_el);
        let s1_node = wrap(Revision::Base, &s1);
        let s3_node = wrap(Revision::Base, &s3);
        let s_left_node = wrap(Revision::Left, &s_left);
        let s_right_node = wrap(Revision::Right, &s_right);

        cs.add(PCS { parent: PCSNode::VirtualRoot, predecessor: PCSNode::LeftMarker, successor: block_node, revision: Revision::Base });
        cs.add(PCS { parent: PCSNode::VirtualRoot, predecessor: block_node, successor: PCSNode::RightMarker, revision: Revision::Base });

        cs.add(PCS { parent: block_node, predecessor: PCSNode::LeftMarker, successor: s1_node, revision: Revision::Base });
        cs.add(PCS { parent: block_node, predecessor: s1_node, successor: s_left_node, revision: Revision::Left });
        cs.add(PCS { parent: block_node, predecessor: s_left_node, successor: s3_node, revision: Revision::Left });
        cs.add(PCS { parent: block_node, predecessor: s1_node, successor: s_right_node, revision: Revision::Right });
        cs.add(PCS { parent: block_node, predecessor: s_right_node, successor: s3_node, revision: Revision::Right });
        cs.add(PCS { parent: block_node, predecessor: s3_node, successor: PCSNode::RightMarker, revision: Revision::Base });

        let output = run(&cs);
        assert!(output.has_conflicts);
        let statements = sequence(&output.merged_root, ChildRole::Statement);
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].metadata.original_node.id, s1.id);
        let placeholder = &statements[1];
        let conflict = placeholder.metadata.structural_conflict.as_ref().expect("expected a structural conflict");
        assert_eq!(conflict.left, vec![&s_left]);
        assert_eq!(conflict.right, vec![&s_right]);
        assert_eq!(statements[2].metadata.original_node.id, s3.id);
    }

    /// A node reachable from two different parents is a root conflict
    /// (`spec.md` §3), caught by the pre-flight scan before any traversal.
    #[test]
    fn root_conflict_aborts_before_traversal() {
        let parent1 = Element::new(10, ChildRole::Body);
        let parent2 = Element::new(11, ChildRole::Body);
        let child = Element::new(12, ChildRole::Statement);

        let mut cs = ChangeSet::new();
        let parent1_node = wrap(Revision::Left, &parent1);
        let parent2_node = wrap(Revision::Right, &parent2);
        let child_node = wrap(Revision::Left, &child);

        cs.add(PCS { parent: parent1_node, predecessor: PCSNode::LeftMarker, successor: child_node, revision: Revision::Left });
        cs.add(PCS { parent: parent2_node, predecessor: PCSNode::LeftMarker, successor: child_node, revision: Revision::Right });

        let base_left = TableTreeMapping::new();
        let base_right = TableTreeMapping::new();
        let schema = DefaultRoleSchema;
        let settings = MergeSettings::default();
        let result = Interpreter::new().interpret(&cs, &base_left, &base_right, &schema, &settings);
        assert!(matches!(result, Err(MergeError::RootConflict { .. })));
    }
}

/// Splits a successor-conflict pair of triples into (left-originated,
/// right-originated), by their revision tag.
fn identify_sides<'a>(matches: &[PCS<'a>]) -> Result<(PCS<'a>, PCS<'a>), MergeError> {
    let left = matches.iter().find(|pcs| pcs.revision == Revision::Left).copied();
    let right = matches.iter().find(|pcs| pcs.revision == Revision::Right).copied();
    match (left, right) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(MergeError::UnterminatedConflictRegion {
            start: matches
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }),
    }
}

/// Follows successor pointers from `start` until a predecessor conflict is
/// encountered, returning the unique nodes found and the successor both
/// sides converge on (`spec.md` §4.2's conflict-sequence extraction).
fn extract_conflict_sequence<'a>(
    parent: PCSNode<'a>,
    start: &PCS<'a>,
    changeset: &ChangeSet<'a>,
) -> Result<(Vec<PCSNode<'a>>, PCSNode<'a>), MergeError> {
    let mut sequence = Vec::new();
    let mut current = *start;

    loop {
        let successor = current.successor;
        let has_rival = changeset
            .by_successor(&successor)
            .any(|other| other.parent == parent && other.predecessor != current.predecessor);
        if has_rival {
            return Ok((sequence, successor));
        }
        if matches!(successor, PCSNode::RightMarker) {
            return Err(MergeError::UnterminatedConflictRegion {
                start: start.to_string(),
            });
        }
        sequence.push(successor);

        let next = changeset
            .by_predecessor(&successor)
            .find(|pcs| pcs.parent == parent)
            .ok_or_else(|| MergeError::UnterminatedConflictRegion {
                start: start.to_string(),
            })?;
        current = *next;
    }
}
