//! The bidirectional synthetic-range ↔ template-range correspondence (§4.3).
//!
//! Ranges are keyed by the literal byte offsets the emitter assigns while
//! printing the synthetic program text — the "concatenating token text"
//! variant the spec allows, chosen here because this crate always re-derives
//! the synthetic program from the same AST in the same traversal order, so
//! offset-keying survives re-emission without needing node identity.

use serde::{Deserialize, Serialize};

use crate::template_ast::TemplateRange;

/// A byte range `[start, end)` into the synthetic program buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthRange {
    pub start: u32,
    pub end: u32,
}

impl SynthRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    fn contains(&self, pos: u32) -> bool {
        pos >= self.start && pos < self.end
    }

    fn len(&self) -> u32 {
        self.end - self.start
    }
}

struct Entry {
    synth: SynthRange,
    template: TemplateRange,
}

/// The source map populated as a side effect of the transform (§4.1, §4.2).
pub struct SourceMap {
    entries: Vec<Entry>,
    template_len: u32,
}

impl SourceMap {
    pub fn new(template_len: u32) -> Self {
        Self {
            entries: Vec::new(),
            template_len,
        }
    }

    /// Record that `synth` corresponds to `template`. Called by the emitter
    /// whenever it finishes printing a node that carries a range.
    pub fn record(&mut self, synth: SynthRange, template: TemplateRange) {
        if template.is_empty() {
            // An empty template range carries no useful diagnostic locus;
            // skip it so `mapBack` never "finds" a degenerate match.
            return;
        }
        self.entries.push(Entry { synth, template });
    }

    /// `mapBack` (§4.3): find the innermost stamped entry whose synthetic
    /// range contains `pos` and maps to a non-empty template range. Falls
    /// back to the sentinel `[0, 0)` at the start of the template if no
    /// entry matches, per §4.4 ("never drop a diagnostic silently").
    pub fn map_back(&self, pos: u32) -> TemplateRange {
        self.entries
            .iter()
            .filter(|e| e.synth.contains(pos))
            // innermost = smallest synthetic span among those that contain pos.
            .min_by_key(|e| e.synth.len())
            .map(|e| e.template)
            .unwrap_or_else(|| TemplateRange::new(0, 0))
    }

    /// Whether `map_back` found a real entry for `pos`, as opposed to
    /// falling back to the sentinel. Exposed so the diagnostic mapper can
    /// distinguish "anchored at offset 0 because the template starts there"
    /// from "anchored at offset 0 because nothing matched".
    pub fn has_mapping(&self, pos: u32) -> bool {
        self.entries.iter().any(|e| e.synth.contains(pos))
    }

    pub fn template_len(&self) -> u32 {
        self.template_len
    }
}
