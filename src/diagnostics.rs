//! Diagnostic Mapper (§4.4).
//!
//! Translates raw diagnostics from the downstream type checker — reported
//! against synthetic-program coordinates — into template coordinates, using
//! the [`SourceMap`] built by the Template Transformer.

use serde::{Deserialize, Serialize};

use crate::source_map::{SourceMap, SynthRange};
use crate::template_ast::TemplateRange;

/// Whether a raw diagnostic came from the checker's syntactic or semantic
/// pass. Only semantic diagnostics are ever surfaced (§4.4 policy); modeling
/// this as a field rather than assuming the caller already filtered keeps
/// that policy enforceable and testable in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    Semantic,
    Syntactic,
}

/// A diagnostic as reported by the downstream type checker, in synthetic
/// program coordinates (§4.4 input contract).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiagnostic {
    pub kind: DiagnosticKind,
    pub span: SynthRange,
    /// Chained messages (e.g. a diagnostic with related sub-messages),
    /// flattened with a newline separator per §4.4.
    pub messages: Vec<String>,
    pub code: u32,
}

/// The unconditional severity this crate ever emits — the template type
/// check has no warning tier (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Error,
}

/// A diagnostic in template coordinates, ready for the host editor (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDiagnostic {
    pub range: TemplateRange,
    pub severity: Severity,
    pub message: String,
    pub code: u32,
    pub source: String,
}

/// Map `raw` diagnostics to template coordinates using `map`, dropping
/// syntactic diagnostics entirely (§4.4 policy).
pub fn map_diagnostics(raw: &[RawDiagnostic], map: &SourceMap, source: &str) -> Vec<TemplateDiagnostic> {
    raw.iter()
        .filter(|d| d.kind == DiagnosticKind::Semantic)
        .map(|d| {
            let range = map.map_back(d.span.start);
            TemplateDiagnostic {
                range,
                severity: Severity::Error,
                message: d.messages.join("\n"),
                code: d.code,
                source: source.to_string(),
            }
        })
        .collect()
}
