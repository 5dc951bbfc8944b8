//! Correction pipeline: ask the engine for edits and apply them.

use ortho_core::{error::OrthoError, message::ProposedEdit, traits::GrammarEngine};
use tracing::debug;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
}

impl Correction {
    /// Exact string comparison; any difference counts.
    pub fn changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// Check `text` with `engine` and apply every proposed edit.
///
/// Engine failures propagate untouched.
pub async fn correct(engine: &dyn GrammarEngine, text: &str) -> Result<Correction, OrthoError> {
    let edits = engine.check(text).await?;
    let corrected = apply_edits(text, &edits);
    Ok(Correction {
        original: text.to_string(),
        corrected,
    })
}

/// Apply `edits` to `text` in one pass, highest start offset first, so each
/// replacement leaves the offsets of the remaining ones intact.
///
/// Edits that overlap an already-applied one, run past the end, or split a
/// char are skipped. Edits sharing a start offset land in the text in engine
/// order, so they are applied last-reported first.
pub fn apply_edits(text: &str, edits: &[ProposedEdit]) -> String {
    if edits.is_empty() {
        return text.to_string();
    }

    let mut ordered: Vec<&ProposedEdit> = edits.iter().rev().collect();
    ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut out = text.to_string();
    let mut floor = text.len();
    for edit in ordered {
        let span = edit.span.clone();
        if span.start > span.end
            || span.end > floor
            || !text.is_char_boundary(span.start)
            || !text.is_char_boundary(span.end)
        {
            debug!(
                "skipping edit {:?} -> {:?} (overlaps or out of bounds)",
                span, edit.replacement
            );
            continue;
        }
        debug!(
            "applying {:?} -> {:?} (rule: {})",
            span,
            edit.replacement,
            edit.rule_id.as_deref().unwrap_or("-")
        );
        out.replace_range(span.clone(), &edit.replacement);
        floor = span.start;
    }
    out
}
