//! Internal invariant-violation taxonomy.
//!
//! These never cross the public `validate` boundary as `Result`s — §7 of the
//! design treats them as a logging concern, not a user-visible error tier.
//! They exist as a typed enum (rather than ad-hoc `tracing::warn!` strings)
//! so call sites can match on *which* invariant was violated when deciding
//! what neutral placeholder to substitute.

use thiserror::Error;

/// An internal invariant violation encountered while transforming a template.
///
/// Every variant corresponds to a point in §4 where the transform cannot make
/// sense of the input it was handed and falls back to a neutral synthetic
/// node. Constructing one does not stop the transform; it is reported via
/// [`report`](Self::report) and the caller substitutes a placeholder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformIssue {
    /// The expression parser did not yield a single top-level expression
    /// statement for the wrapped `"(" + expr + ")"` input.
    #[error("expression at offset {offset} did not parse to a single expression: {snippet:?}")]
    UnparsableExpression { offset: u32, snippet: String },

    /// An event-handler statement body contained something other than an
    /// expression statement.
    #[error("non-expression statement in handler body at offset {offset}")]
    NonExpressionStatement { offset: u32 },

    /// A template AST node appeared in a position the transformer does not
    /// model (e.g. a directive argument shape it does not recognize).
    #[error("unsupported construct at offset {offset}: {what}")]
    UnsupportedConstruct { offset: u32, what: String },
}

impl TransformIssue {
    /// Report this issue through the `tracing` internal-error channel.
    ///
    /// Always emitted under the `"template_transform"` target per §7, so a
    /// consuming language server can filter on it independently of its own
    /// logging.
    pub fn report(&self) {
        tracing::warn!(target: "template_transform", issue = %self, "internal invariant violation");
    }
}
