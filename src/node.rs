use std::{fmt::Display, hash::Hash};

use crate::{element::Element, revision::Revision};

/// A wrapper around an element of a parsed tree, carrying the revision it
/// originated from.
///
/// Two wrappers are equal iff they wrap the same element instance: identity
/// is by the element's [`crate::element::ElementId`], not by its content, so
/// mutating a clone's attributes never changes which node it is. List-edge
/// sentinels (start/end of a child list) and the virtual root are *not*
/// represented here: they do not wrap any `Element`, so they live as their
/// own variants of [`crate::pcs::PCSNode`] instead of boolean flags on this
/// type, mirroring how the teacher crate's `PCSNode` enum keeps its
/// `VirtualRoot`/`LeftMarker`/`RightMarker` sentinels out of the node type
/// that wraps real AST nodes.
#[derive(Debug, Copy, Clone)]
pub struct Node<'a> {
    element: &'a Element<'a>,
    revision: Revision,
}

impl<'a> Node<'a> {
    pub fn new(revision: Revision, element: &'a Element<'a>) -> Self {
        Self { element, revision }
    }

    pub fn element(&self) -> &'a Element<'a> {
        self.element
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn native_role(&self) -> crate::element::ChildRole {
        self.element.native_role
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.element.id == other.element.id
    }
}

impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.element.id.hash(state);
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.element.id.0, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ChildRole, Element};

    #[test]
    fn identity_is_by_element_not_content() {
        let a = Element::new(1, ChildRole::Name);
        let b = Element::new(1, ChildRole::Name);
        let na = Node::new(Revision::Base, &a);
        let nb = Node::new(Revision::Base, &b);
        // same id, different instances: still equal, because identity is
        // defined purely by id, mirroring pointer-equality of the same
        // logical slot across a matched cluster.
        assert_eq!(na, nb);

        let c = Element::new(2, ChildRole::Name);
        let nc = Node::new(Revision::Base, &c);
        assert_ne!(na, nc);
    }
}
