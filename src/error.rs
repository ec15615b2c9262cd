use thiserror::Error;

use crate::content::ContentRole;

/// Fatal input-integrity errors (`spec.md` §6/§7). These indicate a
/// malformed change set or tree mapping produced upstream, not a condition
/// the core can recover from: the interpreter aborts and unwinds as soon as
/// one is detected.
#[derive(Debug, Error, PartialEq)]
pub enum MergeError {
    #[error("root conflict: node {node} appears under two different parents ({first} and {second})")]
    RootConflict {
        node: String,
        first: String,
        second: String,
    },

    #[error("move conflict: node {node} was reached from two different parents during traversal")]
    MoveConflict { node: String },

    #[error(
        "structural conflict region starting at {start} reached the end of the child list \
         without finding a closing predecessor conflict"
    )]
    UnterminatedConflictRegion { start: String },

    #[error("content-conflict policy exhausted for role {role}: no reconciliation rule applies")]
    UnhandledContentConflictRole { role: ContentRole },

    #[error("could not locate the annotation key node {node} was originally bound under")]
    MissingAnnotationKey { node: String },

    #[error("role resolution for node {node} did not reduce to exactly one role (candidates: {candidates:?})")]
    UnresolvedRole { node: String, candidates: Vec<String> },

    #[error("the virtual root must have exactly one child, but none was found")]
    EmptyVirtualRoot,
}
