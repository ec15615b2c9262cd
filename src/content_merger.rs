//! Content merger (`spec.md` §4.1): reconciles the candidate attribute
//! values contributed for a single node into a merged attribute set plus a
//! list of unresolved content conflicts.

use std::rc::Rc;

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    conflict::{format_sentinel, GlobalConflictMap, LocalConflictMap},
    content::{
        ContentCandidate, ContentConflict, ContentRole, ContentValue, Modifier, ModifierSet,
        OperatorValue, RoledValues,
    },
    error::MergeError,
    line_merge::{merge_comment_text, LineMergeOutcome},
    revision::Revision,
    settings::MergeSettings,
};

/// Result of reconciling every role contributed for one node.
#[derive(Debug, Clone, Default)]
pub struct NodeContentResult {
    pub merged: RoledValues,
    pub conflicts: Vec<ContentConflict>,
    pub local_conflict_map: LocalConflictMap,
    pub comment_conflict: Option<String>,
}

impl NodeContentResult {
    pub fn has_content_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Owns the monotonic sentinel counter and the global conflict dictionary
/// for one merge run (`spec.md` §5: these belong to a single interpreter
/// instance, never to process-wide state).
#[derive(Debug, Default)]
pub struct ContentMerger {
    next_sentinel: usize,
    global: FxHashMap<String, (String, String)>,
}

impl ContentMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A read-only snapshot of the dictionary so far, attached to every
    /// visited node under `GLOBAL_CONFLICT_MAP`.
    pub fn global_snapshot(&self) -> GlobalConflictMap {
        Rc::new(self.global.clone())
    }

    fn allocate_sentinel(&mut self, left: String, right: String) -> String {
        let sentinel = format_sentinel(self.next_sentinel);
        self.next_sentinel += 1;
        self.global.insert(sentinel.clone(), (left, right));
        sentinel
    }

    /// Reconciles every role present in `candidates` for a single node.
    pub fn merge_node(
        &mut self,
        candidates: &FxHashSet<ContentCandidate>,
        settings: &MergeSettings,
    ) -> Result<NodeContentResult, MergeError> {
        let mut by_role: FxHashMap<ContentRole, Vec<&ContentCandidate>> = FxHashMap::default();
        for candidate in candidates {
            by_role.entry(candidate.role).or_default().push(candidate);
        }

        let mut roles: Vec<ContentRole> = by_role.keys().copied().collect();
        roles.sort();

        let mut result = NodeContentResult::default();

        for role in roles {
            let mut present = by_role.remove(&role).expect("role collected from its own keys");
            // Determinism (§4.1): iterate in BASE, LEFT, RIGHT order.
            present.sort_by_key(|c| c.revision);

            let base = present.iter().find(|c| c.revision == Revision::Base).copied();
            let left = present.iter().find(|c| c.revision == Revision::Left).copied();
            let right = present.iter().find(|c| c.revision == Revision::Right).copied();

            let all_agree = present
                .windows(2)
                .all(|w| w[0].value.content_eq(&w[1].value));

            if present.len() == 1 || all_agree {
                result.merged.push(role, present[0].value.clone());
                continue;
            }

            match (base, left, right) {
                (Some(_), Some(l), None) => {
                    result.merged.push(role, l.value.clone());
                }
                (Some(_), None, Some(r)) => {
                    result.merged.push(role, r.value.clone());
                }
                (Some(b), Some(l), Some(r)) => {
                    if l.value.content_eq(&b.value) {
                        result.merged.push(role, r.value.clone());
                    } else if r.value.content_eq(&b.value) {
                        result.merged.push(role, l.value.clone());
                    } else {
                        self.resolve_disagreement(role, Some(b), l, r, settings, &mut result)?;
                    }
                }
                (None, Some(l), Some(r)) => {
                    self.resolve_disagreement(role, None, l, r, settings, &mut result)?;
                }
                _ => unreachable!(
                    "a disagreeing role with 2+ candidates always has at least two present sides"
                ),
            }
        }

        Ok(result)
    }

    /// Both LEFT and RIGHT differ from BASE (or BASE is absent) and from
    /// each other: apply the role-specific sub-policy.
    fn resolve_disagreement(
        &mut self,
        role: ContentRole,
        base: Option<&ContentCandidate>,
        left: &ContentCandidate,
        right: &ContentCandidate,
        settings: &MergeSettings,
        result: &mut NodeContentResult,
    ) -> Result<(), MergeError> {
        match role {
            ContentRole::Name | ContentRole::Value => {
                let left_text = as_text(&left.value, role)?;
                let right_text = as_text(&right.value, role)?;
                let sentinel = self.allocate_sentinel(left_text, right_text);
                result.merged.push(role, ContentValue::Text(sentinel));
                result.conflicts.push(ContentConflict {
                    role,
                    left: left.clone(),
                    right: right.clone(),
                    base: base.cloned(),
                });
            }
            ContentRole::CommentContent => {
                let (_, left_raw) = as_comment(&left.value, role)?;
                let (_, right_raw) = as_comment(&right.value, role)?;
                let base_raw = base
                    .map(|b| as_comment(&b.value, role))
                    .transpose()?
                    .map(|(_, raw)| raw)
                    .unwrap_or_default();

                match merge_comment_text(&base_raw, left_raw, right_raw, settings) {
                    LineMergeOutcome::Clean(text) => {
                        result.merged.push(
                            role,
                            ContentValue::Comment {
                                text: text.clone(),
                                raw: text,
                            },
                        );
                    }
                    LineMergeOutcome::Conflicted { marked } => {
                        result.merged.push(
                            role,
                            ContentValue::Comment {
                                text: marked.clone(),
                                raw: marked.clone(),
                            },
                        );
                        result.comment_conflict = Some(marked);
                    }
                }
            }
            ContentRole::Modifier => {
                let left_set = as_modifiers(&left.value, role)?;
                let right_set = as_modifiers(&right.value, role)?;
                let merged_set = merge_modifier_sets(left_set, right_set, &mut result.local_conflict_map);
                result.merged.push(role, ContentValue::Modifiers(merged_set));
            }
            ContentRole::OperatorKind => {
                let left_op = as_operator(&left.value, role)?;
                let right_op = as_operator(&right.value, role)?;
                if left_op.category != right_op.category {
                    return Err(MergeError::UnhandledContentConflictRole { role });
                }
                let mut left_symbol = left_op.symbol.clone();
                let mut right_symbol = right_op.symbol.clone();
                if left_op.is_compound_assignment {
                    left_symbol.push('=');
                    right_symbol.push('=');
                }
                result
                    .local_conflict_map
                    .insert(left_symbol.clone(), (left_symbol, right_symbol));
                result.merged.push(role, ContentValue::Operator(left_op.clone()));
            }
            ContentRole::IsUpper => {
                let left_bool = as_bool(&left.value, role)?;
                let right_bool = as_bool(&right.value, role)?;
                let left_keyword = render_is_upper(left_bool);
                let right_keyword = render_is_upper(right_bool);
                result.local_conflict_map.insert(
                    left_keyword.to_string(),
                    (left_keyword.to_string(), right_keyword.to_string()),
                );
                result.merged.push(role, ContentValue::Bool(left_bool));
            }
        }
        Ok(())
    }
}

/// Renders `IS_UPPER` as the keyword it controls in a wildcard bound: `true`
/// is an upper bound (`extends`), `false` a lower bound (`super`).
fn render_is_upper(is_upper: bool) -> &'static str {
    if is_upper {
        "extends"
    } else {
        "super"
    }
}

fn merge_modifier_sets(left: &ModifierSet, right: &ModifierSet, local: &mut LocalConflictMap) -> ModifierSet {
    let mut tokens: Vec<Modifier> = left
        .non_visibility()
        .chain(right.non_visibility())
        .cloned()
        .unique()
        .collect();

    let visibility = match (left.visibility(), right.visibility()) {
        (Some(lv), Some(rv)) => {
            if lv.token != rv.token {
                local.insert(lv.token.clone(), (lv.token.clone(), rv.token.clone()));
            }
            Some(lv.clone())
        }
        (Some(lv), None) => Some(lv.clone()),
        (None, Some(rv)) => {
            local.insert(String::new(), (String::new(), rv.token.clone()));
            Some(rv.clone())
        }
        (None, None) => None,
    };

    if let Some(visibility) = visibility {
        tokens.insert(0, visibility);
    }
    ModifierSet(tokens)
}

fn as_text(value: &ContentValue, role: ContentRole) -> Result<String, MergeError> {
    match value {
        ContentValue::Text(text) => Ok(text.clone()),
        _ => Err(MergeError::UnhandledContentConflictRole { role }),
    }
}

fn as_comment<'v>(value: &'v ContentValue, role: ContentRole) -> Result<(&'v str, &'v str), MergeError> {
    match value {
        ContentValue::Comment { text, raw } => Ok((text.as_str(), raw.as_str())),
        _ => Err(MergeError::UnhandledContentConflictRole { role }),
    }
}

fn as_modifiers(value: &ContentValue, role: ContentRole) -> Result<&ModifierSet, MergeError> {
    match value {
        ContentValue::Modifiers(set) => Ok(set),
        _ => Err(MergeError::UnhandledContentConflictRole { role }),
    }
}

fn as_operator(value: &ContentValue, role: ContentRole) -> Result<&OperatorValue, MergeError> {
    match value {
        ContentValue::Operator(op) => Ok(op),
        _ => Err(MergeError::UnhandledContentConflictRole { role }),
    }
}

fn as_bool(value: &ContentValue, role: ContentRole) -> Result<bool, MergeError> {
    match value {
        ContentValue::Bool(b) => Ok(*b),
        _ => Err(MergeError::UnhandledContentConflictRole { role }),
    }
}
