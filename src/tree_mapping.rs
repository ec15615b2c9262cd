use crate::element::Element;

/// The BASE↔LEFT or BASE↔RIGHT node correspondence produced by the
/// (external, out of scope) tree matcher.
///
/// `get_src` maps a node in the "source" tree of the mapping (e.g. BASE) to
/// its counterpart in the "destination" tree (e.g. LEFT); `get_dst` is its
/// inverse. Both return `None` when the node has no counterpart (it was
/// inserted or deleted relative to the other side).
pub trait TreeMapping<'a> {
    fn get_src(&self, node: &'a Element<'a>) -> Option<&'a Element<'a>>;
    fn get_dst(&self, node: &'a Element<'a>) -> Option<&'a Element<'a>>;
}

/// A [`TreeMapping`] backed by two explicit lookup tables, useful for tests
/// and for front-ends that compute the full correspondence up front.
#[derive(Debug, Default, Clone)]
pub struct TableTreeMapping<'a> {
    src_to_dst: rustc_hash::FxHashMap<crate::element::ElementId, &'a Element<'a>>,
    dst_to_src: rustc_hash::FxHashMap<crate::element::ElementId, &'a Element<'a>>,
}

impl<'a> TableTreeMapping<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, src: &'a Element<'a>, dst: &'a Element<'a>) {
        self.src_to_dst.insert(src.id, dst);
        self.dst_to_src.insert(dst.id, src);
    }
}

impl<'a> TreeMapping<'a> for TableTreeMapping<'a> {
    fn get_src(&self, node: &'a Element<'a>) -> Option<&'a Element<'a>> {
        self.src_to_dst.get(&node.id).copied()
    }

    fn get_dst(&self, node: &'a Element<'a>) -> Option<&'a Element<'a>> {
        self.dst_to_src.get(&node.id).copied()
    }
}
