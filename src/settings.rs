/// Parameters controlling the interpreter's behaviour at points where
/// `spec.md` leaves room for configuration.
#[derive(Debug, Clone)]
pub struct MergeSettings {
    /// Number of characters used for conflict markers (`<<<<<<<` etc.) in
    /// the line-based fallback used to reconcile `COMMENT_CONTENT`.
    pub conflict_marker_size: usize,
    /// Whether to auto-resolve structural conflicts among TYPE_MEMBER
    /// children by concatenation (`spec.md` §4.2's documented, known
    /// non-commutative approximation). Disabling this makes every such
    /// disagreement surface as an explicit structural conflict instead.
    pub auto_resolve_type_members: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            conflict_marker_size: 7,
            auto_resolve_type_members: true,
        }
    }
}
