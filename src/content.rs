//! The content store (`spec.md` §3, component 3) and the typed attribute
//! values it holds.

use crate::revision::Revision;

/// Which syntactic attribute a [`ContentCandidate`] fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentRole {
    Name,
    Value,
    CommentContent,
    Modifier,
    OperatorKind,
    IsUpper,
}

impl std::fmt::Display for ContentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentRole::Name => "NAME",
            ContentRole::Value => "VALUE",
            ContentRole::CommentContent => "COMMENT_CONTENT",
            ContentRole::Modifier => "MODIFIER",
            ContentRole::OperatorKind => "OPERATOR_KIND",
            ContentRole::IsUpper => "IS_UPPER",
        };
        f.write_str(s)
    }
}

/// Which syntactic category a modifier token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierCategory {
    Visibility,
    Kind,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifier {
    pub token: String,
    pub category: ModifierCategory,
}

/// The set of modifier tokens on a declaration, already categorised into
/// visibility/kind/other, as required by the MODIFIER reconciliation rule
/// of `spec.md` §4.1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(pub Vec<Modifier>);

impl ModifierSet {
    pub fn visibility(&self) -> Option<&Modifier> {
        self.0
            .iter()
            .find(|m| m.category == ModifierCategory::Visibility)
    }

    pub fn non_visibility(&self) -> impl Iterator<Item = &Modifier> {
        self.0
            .iter()
            .filter(|m| m.category != ModifierCategory::Visibility)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorCategory {
    Arithmetic,
    Relational,
    Logical,
    Bitwise,
    Shift,
    Assignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorValue {
    pub category: OperatorCategory,
    pub symbol: String,
    /// Whether the enclosing node is a compound-assignment operator; if so,
    /// the textual conflict alternatives get `=` appended, per `spec.md`
    /// §4.1.
    pub is_compound_assignment: bool,
}

/// The typed payload of a [`ContentCandidate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentValue {
    Text(String),
    Modifiers(ModifierSet),
    Operator(OperatorValue),
    Bool(bool),
    /// A comment body. `text` is the value used for equality/three-way
    /// comparisons; `raw` is the original textual form (required by the
    /// line-based comment merge, which needs the raw text rather than any
    /// parsed representation of it).
    Comment { text: String, raw: String },
}

impl ContentValue {
    /// Best-effort equality used by the three-way "two revisions agree"
    /// rule. Comments compare by their raw text, since that's the level at
    /// which "agreement" matters for this role.
    pub fn content_eq(&self, other: &ContentValue) -> bool {
        match (self, other) {
            (ContentValue::Text(a), ContentValue::Text(b)) => a == b,
            (ContentValue::Modifiers(a), ContentValue::Modifiers(b)) => a == b,
            (ContentValue::Operator(a), ContentValue::Operator(b)) => a == b,
            (ContentValue::Bool(a), ContentValue::Bool(b)) => a == b,
            (ContentValue::Comment { raw: a, .. }, ContentValue::Comment { raw: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }
}

/// One candidate assignment of a value to a role on a node, contributed by
/// one revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentCandidate {
    pub role: ContentRole,
    pub value: ContentValue,
    pub revision: Revision,
}

impl ContentCandidate {
    pub fn new(role: ContentRole, value: ContentValue, revision: Revision) -> Self {
        Self {
            role,
            value,
            revision,
        }
    }
}

/// The reconciled attribute set of a merged node: a sequence of
/// `(role, value)` pairs, in the order roles were reconciled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoledValues(pub Vec<(ContentRole, ContentValue)>);

impl RoledValues {
    pub fn push(&mut self, role: ContentRole, value: ContentValue) {
        self.0.push((role, value));
    }

    pub fn get(&self, role: ContentRole) -> Option<&ContentValue> {
        self.0.iter().find(|(r, _)| *r == role).map(|(_, v)| v)
    }
}

/// An unresolved disagreement on the value of a role, surfaced to the
/// caller via the `CONTENT_CONFLICT` metadata key.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentConflict {
    pub role: ContentRole,
    pub left: ContentCandidate,
    pub right: ContentCandidate,
    pub base: Option<ContentCandidate>,
}
