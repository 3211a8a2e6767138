//! Validation Session & Type-Checker Trait Boundary (§4.5, §4.6).
//!
//! The session is the single synchronous entry point a language server calls
//! on every document change. The concrete type-checking engine is out of
//! scope (§1) and modeled only as a trait so this crate never depends on it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::diagnostics::{map_diagnostics, RawDiagnostic, TemplateDiagnostic};
use crate::options::TemplateCheckOptions;
use crate::template_ast::TemplateNode;
use crate::transformer::transform_template;

/// Identifies the synthetic "shadow" document a template's synthetic
/// program is pushed to inside the downstream type checker (§4.5, §5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShadowDocumentId(pub String);

impl ShadowDocumentId {
    /// Derive a shadow id from a component file path, per the "same logical
    /// path with a suffix" convention in §5.
    pub fn for_component_path(path: &str) -> Self {
        Self(format!("{path}.__vls_shadow.ts"))
    }
}

/// The external collaborator this crate depends on but does not implement
/// (§4.6): a session-scoped view onto the host's type-checking engine.
pub trait SemanticDiagnosticsSource {
    fn update_shadow(&mut self, shadow_path: &ShadowDocumentId, text: &str);
    fn semantic_diagnostics(&self, shadow_path: &ShadowDocumentId) -> Vec<RawDiagnostic>;
}

/// The latest text-document snapshot handed to a single `validate` call
/// (§6 "Input to the core").
pub struct TemplateDocument {
    pub ast: Vec<TemplateNode>,
    pub source_len: u32,
}

/// A document version shared between the host event loop and a session,
/// used for cooperative cancellation (§5). Cloning shares the same counter;
/// the host bumps it as new text arrives. `validate` is handed the version
/// number that `document` corresponds to and compares it against the live
/// counter at each yield point: if the live value has moved on, a newer
/// snapshot has already superseded this one.
#[derive(Clone)]
pub struct DocumentVersion(Arc<AtomicU64>);

impl DocumentVersion {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU64::new(0)))
    }

    /// Record that a newer document snapshot has arrived and return its
    /// version number, for the host to pass alongside that snapshot.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for DocumentVersion {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns, per component file, the latest synthetic program and source map,
/// plus a handle to the type-checker trait boundary (§4.5).
pub struct ValidationSession<S: SemanticDiagnosticsSource> {
    shadow_path: ShadowDocumentId,
    options: TemplateCheckOptions,
    version: DocumentVersion,
    checker: S,
}

impl<S: SemanticDiagnosticsSource> ValidationSession<S> {
    pub fn new(component_path: &str, options: TemplateCheckOptions, version: DocumentVersion, checker: S) -> Self {
        Self {
            shadow_path: ShadowDocumentId::for_component_path(component_path),
            options,
            version,
            checker,
        }
    }

    /// The single synchronous entry point (§4.5). `as_of` is the version
    /// number `document` corresponds to; if a newer version has since
    /// arrived (per `self.version`), this call short-circuits to an empty
    /// result at the next yield point rather than invoking the type checker
    /// with stale content. Recomputes the synthetic program unconditionally
    /// on every call; does not attempt incremental reuse of previous output
    /// (§4.5 final paragraph).
    pub fn validate(&mut self, document: TemplateDocument, as_of: u64) -> Vec<TemplateDiagnostic> {
        let result = transform_template(&document.ast, document.source_len, &self.options);

        // Yield point 1: between transform and the shadow-document push.
        if self.version.current() != as_of {
            return Vec::new();
        }

        self.checker.update_shadow(&self.shadow_path, &result.program_text);
        let raw = self.checker.semantic_diagnostics(&self.shadow_path);

        // Yield point 2: between the type-check request and mapping back.
        if self.version.current() != as_of {
            return Vec::new();
        }

        map_diagnostics(&raw, &result.source_map, &self.options.diagnostic_source)
    }
}
