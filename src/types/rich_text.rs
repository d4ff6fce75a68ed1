use serde::{Deserialize, Serialize};

/// Inline style flags attached to one run of text.
///
/// Built once per run during normalization and never mutated afterwards;
/// [`AnnotationSet::union`] returns a new set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationSet {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

impl AnnotationSet {
    /// A set with every flag off.
    pub const PLAIN: AnnotationSet = AnnotationSet {
        bold: false,
        italic: false,
        strikethrough: false,
        underline: false,
        code: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    /// Flags active in either set.
    pub fn union(&self, other: &AnnotationSet) -> AnnotationSet {
        AnnotationSet {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            strikethrough: self.strikethrough || other.strikethrough,
            underline: self.underline || other.underline,
            code: self.code || other.code,
        }
    }
}

/// One contiguous piece of text sharing a single annotation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub annotations: AnnotationSet,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: AnnotationSet::PLAIN,
        }
    }

    pub fn styled(text: impl Into<String>, annotations: AnnotationSet) -> Self {
        Self {
            text: text.into(),
            annotations,
        }
    }
}

/// Ordered runs making up a block's text.
///
/// The block's plain `text` is the concatenation of the runs, and its
/// annotation sequence lines up 1:1 with them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![TextRun::plain(text)])
    }

    /// Folds every run into one, keeping only the first run's formatting.
    pub fn collapsed(runs: Vec<TextRun>) -> Self {
        let annotations = runs
            .first()
            .map(|run| run.annotations)
            .unwrap_or_default();
        let text: String = runs.into_iter().map(|run| run.text).collect();
        if text.is_empty() {
            return Self::default();
        }
        Self::new(vec![TextRun::styled(text, annotations)])
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Concatenation of every run's text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn annotations(&self) -> Vec<AnnotationSet> {
        self.runs.iter().map(|run| run.annotations).collect()
    }

    /// Formatting of the first run, plain when there is none.
    pub fn primary_annotations(&self) -> AnnotationSet {
        self.runs
            .first()
            .map(|run| run.annotations)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }
}
