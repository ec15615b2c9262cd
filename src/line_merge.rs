//! Line-based three-way merge fallback used to reconcile `COMMENT_CONTENT`
//! (`spec.md` §4.1), the one place this crate's non-goal of "merging at the
//! line-text level" is deliberately narrowed down to.

use diffy_imara::{Algorithm, ConflictStyle, MergeOptions};

use crate::settings::MergeSettings;

/// Outcome of merging the raw text of a comment body across three revisions.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMergeOutcome {
    /// The merge produced a result with no residual conflict markers.
    Clean(String),
    /// The merge could not reconcile every hunk; `marked` carries the
    /// conflict-marked textual result, to be stored under the
    /// `COMMENT_CONFLICT` metadata key.
    Conflicted { marked: String },
}

/// Runs a line-based three-way merge over raw comment text using the
/// histogram diff algorithm, the same tool the teacher crate reaches for to
/// merge whole files at the line level.
pub fn merge_comment_text(base: &str, left: &str, right: &str, settings: &MergeSettings) -> LineMergeOutcome {
    let result = MergeOptions::new()
        .set_conflict_marker_length(settings.conflict_marker_size)
        .set_conflict_style(ConflictStyle::Merge)
        .set_algorithm(Algorithm::Histogram)
        .merge(base, left, right);

    match result {
        Ok(merged) => LineMergeOutcome::Clean(merged),
        Err(marked) => LineMergeOutcome::Conflicted { marked },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_overlapping_edits_merge_cleanly() {
        let base = "old line\n";
        let left = "old line\nnew-left\n";
        let right = "old line\nnew-left\n";
        let outcome = merge_comment_text(base, left, right, &MergeSettings::default());
        assert_eq!(outcome, LineMergeOutcome::Clean(left.to_string()));
    }

    #[test]
    fn overlapping_edits_produce_a_conflict() {
        let base = "old line\n";
        let left = "old line\nnew-left\n";
        let right = "old line\nnew-right\n";
        let outcome = merge_comment_text(base, left, right, &MergeSettings::default());
        match outcome {
            LineMergeOutcome::Conflicted { marked } => {
                assert!(marked.contains("<<<<<<<"));
                assert!(marked.contains("new-left"));
                assert!(marked.contains("new-right"));
            }
            LineMergeOutcome::Clean(_) => panic!("expected a conflict"),
        }
    }
}
