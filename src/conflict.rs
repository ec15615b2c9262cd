use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::element::Element;

/// Two ordered sequences of nodes that could not be reconciled into a
/// single order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralConflict<'a> {
    pub left: Vec<&'a Element<'a>>,
    pub right: Vec<&'a Element<'a>>,
}

/// `token -> (leftText, rightText)`, attached per-node under the
/// `LOCAL_CONFLICT_MAP` metadata key.
pub type LocalConflictMap = FxHashMap<String, (String, String)>;

/// `sentinel -> (leftText, rightText)`, the run-wide dictionary snapshot
/// attached under `GLOBAL_CONFLICT_MAP` to every visited node. Shared via
/// [`Rc`] rather than cloned, since the interpreter is single-threaded and
/// the dictionary only grows monotonically during one run.
pub type GlobalConflictMap = Rc<FxHashMap<String, (String, String)>>;

/// Prefix of a content-conflict sentinel; the full sentinel is
/// `{SENTINEL_PREFIX}{n}`, `n` starting at 0 and incrementing per distinct
/// sentinel allocated in one merge run.
pub const SENTINEL_PREFIX: &str = "__SPORK_CONFLICT_";

pub fn format_sentinel(n: usize) -> String {
    format!("{SENTINEL_PREFIX}{n}")
}
