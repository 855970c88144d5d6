use std::fs;
use std::path::Path;

use crate::error::SourceError;

/// Directive token marking a stage-selection line.
const MARKER: &str = "#shader";

// ── Stage kind ────────────────────────────────────────────────────────────

/// One shader compilation unit within the pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    /// Lowercase stage name, as used in marker lines and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
        }
    }
}

// ── Source bundle ─────────────────────────────────────────────────────────

/// Per-stage source text produced by splitting one combined file.
///
/// Always contains exactly one string per stage: partial or malformed input
/// yields empty-but-present fragments, never a missing field, so downstream
/// compilation always has a defined string per stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBundle {
    pub vertex: String,
    pub fragment: String,
}

impl SourceBundle {
    /// Returns the source text accumulated for `kind`.
    pub fn stage(&self, kind: StageKind) -> &str {
        match kind {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, kind: StageKind) -> &mut String {
        match kind {
            StageKind::Vertex => &mut self.vertex,
            StageKind::Fragment => &mut self.fragment,
        }
    }
}

// ── Splitting ─────────────────────────────────────────────────────────────

/// Splits a combined shader source into per-stage fragments.
///
/// A line containing `#shader` is a marker: `vertex` selects the vertex stage
/// (checked first, so it wins when both keywords appear on one line),
/// `fragment` selects the fragment stage, and a marker with neither keyword
/// leaves the current stage unchanged. Marker lines never appear in any
/// fragment. Every other line is appended verbatim plus a trailing newline to
/// the current stage; lines before the first recognized marker are dropped.
/// A repeated marker for an already-seen stage continues accumulating into
/// that stage's fragment, so multiple blocks concatenate in file order.
pub fn split_str(src: &str) -> SourceBundle {
    let mut bundle = SourceBundle::default();
    let mut current: Option<StageKind> = None;

    for line in src.lines() {
        if line.contains(MARKER) {
            if line.contains("vertex") {
                current = Some(StageKind::Vertex);
            } else if line.contains("fragment") {
                current = Some(StageKind::Fragment);
            }
        } else if let Some(kind) = current {
            let slot = bundle.stage_mut(kind);
            slot.push_str(line);
            slot.push('\n');
        }
    }

    bundle
}

/// Reads `path` and splits its contents with [`split_str`].
pub fn split_file(path: impl AsRef<Path>) -> Result<SourceBundle, SourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SourceError::new(path, source))?;
    Ok(split_str(&text))
}
