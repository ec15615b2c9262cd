//! The node model of the external, parsed syntax tree.
//!
//! The front-end that turns source text into a typed object-oriented syntax
//! tree is out of scope for this crate (see `spec.md` §1): it is an external
//! collaborator. What it hands us is a tree of [`Element`]s. This module
//! defines the minimal shape of such a tree that the PCS interpreter needs in
//! order to do its job: stable identity, an ordered list of children, and the
//! syntactic slot ("role") each element nominally occupies under its parent.
//!
//! A production deployment plugs in its own front-end's node type here; the
//! interpreter, content merger and tree builder are agnostic to what concrete
//! shape `Element` has, the same way the teacher crate's PCS/changeset/
//! tree-builder modules are agnostic to which tree-sitter grammar produced
//! the nodes they operate on.

use std::fmt::Display;

/// Stable identity for an [`Element`], assigned once at construction time by
/// the front-end (e.g. a monotonic counter, or an arena index). Two elements
/// are the same node iff they have the same id; this realises the "pointer
/// equality" identity semantics of `spec.md` §3 without relying on raw
/// pointer comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// The syntactic slot an element occupies under its parent: which attribute
/// or child-list of the parent this element fills. This is the "role" of
/// §4.3 (role resolution / container insertion), distinct from the
/// attribute-value "role" tag of [`crate::content::ContentRole`] used by the
/// content merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChildRole {
    /// A top-level member of a type declaration (field, method, nested type).
    TypeMember,
    /// A statement in a block body.
    Statement,
    /// A formal parameter of a callable.
    Parameter,
    /// An import/use declaration.
    Import,
    /// A key/value entry of an annotation argument list.
    AnnotationEntry,
    /// The superclass slot of a type declaration (single).
    Superclass,
    /// A superinterface entry (sequence).
    SuperInterface,
    /// The body slot of a type/method/block.
    Body,
    /// The name identifier slot.
    Name,
    /// A free-standing comment.
    Comment,
    /// Any other, language-defined role, named for diagnostics.
    Other(&'static str),
}

impl Display for ChildRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChildRole::TypeMember => write!(f, "TYPE_MEMBER"),
            ChildRole::Statement => write!(f, "STATEMENT"),
            ChildRole::Parameter => write!(f, "PARAMETER"),
            ChildRole::Import => write!(f, "IMPORT"),
            ChildRole::AnnotationEntry => write!(f, "ANNOTATION_ENTRY"),
            ChildRole::Superclass => write!(f, "SUPERCLASS"),
            ChildRole::SuperInterface => write!(f, "SUPER_INTERFACE"),
            ChildRole::Body => write!(f, "BODY"),
            ChildRole::Name => write!(f, "NAME"),
            ChildRole::Comment => write!(f, "COMMENT"),
            ChildRole::Other(name) => write!(f, "{name}"),
        }
    }
}

/// How the slot for a given [`ChildRole`] under a parent accepts new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// At most one child occupies this role; a later write overwrites an
    /// earlier one.
    Single,
    /// An ordered list of children; new children are appended in traversal
    /// order.
    Sequence,
    /// An unordered collection; new children are added (order is preserved
    /// for determinism, but is not semantically meaningful).
    Set,
    /// A mapping keyed by the textual key the element was originally bound
    /// under (e.g. annotation `key = value` pairs).
    KeyedMap,
}

/// Associates a [`ChildRole`] with the container semantics of its slot.
/// Stands in for the language-specific schema a real front-end would supply
/// (analogous to the teacher's `LangProfile`/`CommutativeParent`).
pub trait RoleSchema {
    fn slot_kind(&self, role: ChildRole) -> SlotKind;
}

/// A reference schema covering the roles defined by [`ChildRole`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRoleSchema;

impl RoleSchema for DefaultRoleSchema {
    fn slot_kind(&self, role: ChildRole) -> SlotKind {
        match role {
            ChildRole::TypeMember | ChildRole::Statement | ChildRole::Parameter => {
                SlotKind::Sequence
            }
            ChildRole::Import => SlotKind::Sequence,
            ChildRole::SuperInterface => SlotKind::Set,
            ChildRole::AnnotationEntry => SlotKind::KeyedMap,
            ChildRole::Superclass | ChildRole::Body | ChildRole::Name | ChildRole::Comment => {
                SlotKind::Single
            }
            ChildRole::Other(_) => SlotKind::Sequence,
        }
    }
}

/// A node of the external, parsed syntax tree.
///
/// Content (identifiers, modifiers, operator kinds, ...) is deliberately not
/// stored here: per `spec.md` §3, candidate attribute values live in the
/// `ChangeSet`'s content store, keyed by [`crate::node::Node`]. `Element`
/// only carries the shape of the tree: identity, ordering, and the slot it
/// occupies under its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub id: ElementId,
    /// The role this element nominally occupies under its own parent, as
    /// produced by the front-end that parsed it.
    pub native_role: ChildRole,
    /// If `native_role` is [`ChildRole::AnnotationEntry`], the textual key
    /// this element was bound under in its original annotation parent.
    pub annotation_key: Option<&'static str>,
    pub children: Vec<&'a Element<'a>>,
}

impl<'a> Element<'a> {
    pub fn new(id: u64, native_role: ChildRole) -> Self {
        Self {
            id: ElementId(id),
            native_role,
            annotation_key: None,
            children: Vec::new(),
        }
    }

    pub fn with_annotation_key(mut self, key: &'static str) -> Self {
        self.annotation_key = Some(key);
        self
    }

    pub fn with_children(mut self, children: Vec<&'a Element<'a>>) -> Self {
        self.children = children;
        self
    }
}
