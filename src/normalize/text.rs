//! Rich text wire runs to domain runs.

use crate::api::responses::RichTextWire;
use crate::types::TextRun;

pub(crate) fn to_runs(wire: Vec<RichTextWire>) -> Vec<TextRun> {
    wire.into_iter()
        .map(|run| TextRun::styled(run.plain_text, run.annotations))
        .collect()
}

/// All runs' plain text, concatenated.
pub(crate) fn plain_text(wire: &[RichTextWire]) -> String {
    wire.iter().map(|run| run.plain_text.as_str()).collect()
}
