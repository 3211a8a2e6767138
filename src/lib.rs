//! # sfc-template-check
//!
//! The template interpolation transform at the core of a Vue-SFC-style
//! template type-checking language server, implemented in Rust using the
//! oxc compiler toolchain.
//!
//! Given a parsed SFC template AST, this crate rewrites every template
//! expression into a synthetic TypeScript-flavored program — free
//! identifiers become `this.x` property accesses, directives become calls
//! to four reserved helper functions — and maintains a bidirectional source
//! map so diagnostics produced against that synthetic program by a
//! downstream type checker can be mapped back to template coordinates.
//! The concrete type-checking engine itself is out of scope: this crate
//! models that boundary as a trait ([`session::SemanticDiagnosticsSource`])
//! and ships only a deterministic in-memory test double.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfc_template_check::options::TemplateCheckOptions;
//! use sfc_template_check::session::{DocumentVersion, SemanticDiagnosticsSource, TemplateDocument, ValidationSession};
//!
//! let options = TemplateCheckOptions::default();
//! let version = DocumentVersion::new();
//! let as_of = version.current();
//! let mut session = ValidationSession::new("App.vue", options, version, my_checker);
//! let diagnostics = session.validate(document, as_of);
//! ```
//!
//! ## Architecture
//!
//! The transformation happens in a few cooperating pieces:
//!
//! 1. **Expression Parser & Scope Injector** ([`expr_parser`]): parses one
//!    template expression substring at a time and rewrites its free
//!    identifiers against a [`scope::Scope`].
//! 2. **Template Transformer** ([`transformer`]): walks the template AST,
//!    building the synthetic call tree (elements, iteration, event
//!    handlers) out of the rewritten expressions.
//! 3. **Emitter** ([`emitter`]): prints the synthetic AST ([`synth`]) to
//!    text, stamping a [`source_map::SourceMap`] entry per node.
//! 4. **Diagnostic Mapper** ([`diagnostics`]): maps semantic diagnostics
//!    from the downstream checker back to template coordinates.
//! 5. **Validation Session** ([`session`]): the single synchronous entry
//!    point a language server calls on every document change.
//!
//! ## Modules
//!
//! - [`template_ast`]: the input template AST shape.
//! - [`scope`]: immutable lexical scope used by the rewriter.
//! - [`expr_parser`]: expression parsing and identifier rewriting.
//! - [`synth`]: the synthetic-program AST.
//! - [`emitter`]: printing the synthetic AST to text plus a source map.
//! - [`source_map`]: the bidirectional range correspondence.
//! - [`transformer`]: the top-level template-to-synthetic-program walk.
//! - [`diagnostics`]: mapping downstream diagnostics back to the template.
//! - [`session`]: the validation session and the type-checker trait boundary.
//! - [`options`]: configuration (re-exported as [`TemplateCheckOptions`]).
//! - [`error`]: the internal invariant-violation taxonomy.
//! - [`utils`]: small shared predicates.

pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod expr_parser;
pub mod options;
pub mod scope;
pub mod session;
pub mod source_map;
pub mod synth;
pub mod template_ast;
pub mod transformer;
pub mod utils;

pub use diagnostics::{RawDiagnostic, Severity, TemplateDiagnostic};
pub use error::TransformIssue;
pub use options::{HelperNames, TemplateCheckOptions};
pub use session::{DocumentVersion, SemanticDiagnosticsSource, ShadowDocumentId, TemplateDocument, ValidationSession};
pub use source_map::SourceMap;
pub use transformer::{transform_template, TransformResult};
