//! A 3DM-style Parent-Child-Successor (PCS) merge interpreter.
//!
//! ## Overview
//!
//! This crate implements the core of a structured three-way merge tool for
//! typed object-oriented syntax trees: given a merged PCS change set (plus
//! two tree matchings relating it back to BASE), it reconstructs a concrete
//! merged syntax tree, detects structural conflicts between orderings and
//! content conflicts between attribute values, and annotates the output
//! with per-node metadata that a downstream pretty-printer can use to
//! render conflicts textually.
//!
//! The front-end that parses source text into syntax trees, the tree
//! matcher that produces BASE↔LEFT/BASE↔RIGHT correspondences, the PCS
//! extraction step that builds the [`ChangeSet`] this crate consumes, and
//! pretty-printing of the annotated output are all out of scope: this
//! crate is the interpreter in between.
//!
//! ## Using as a library
//!
//! The entry point is [`Interpreter::interpret`]. Callers assemble a
//! [`ChangeSet`] (typically via a PCS extractor run over three matched
//! trees), two [`TreeMapping`] implementations, a [`RoleSchema`] describing
//! the target language's container slots, and a [`MergeSettings`], then
//! drive the interpreter once per merge.

pub mod changeset;
pub mod conflict;
pub mod content;
pub mod content_merger;
pub mod element;
pub mod error;
pub mod interpreter;
pub mod line_merge;
pub mod metadata;
pub(crate) mod multimap;
pub mod node;
pub mod pcs;
pub mod revision;
pub mod settings;
pub mod tree_builder;
pub mod tree_mapping;

pub use changeset::ChangeSet;
pub use content::{ContentCandidate, ContentConflict, ContentRole, ContentValue, RoledValues};
pub use conflict::StructuralConflict;
pub use element::{ChildRole, DefaultRoleSchema, Element, ElementId, RoleSchema, SlotKind};
pub use error::MergeError;
pub use interpreter::{Interpreter, MergeOutput};
pub use metadata::NodeMetadata;
pub use node::Node;
pub use pcs::{PCSNode, PCS};
pub use revision::Revision;
pub use settings::MergeSettings;
pub use tree_builder::{MergedNode, MergedSlot};
pub use tree_mapping::{TableTreeMapping, TreeMapping};
