//! Configuration for the template interpolation transform.

use serde::{Deserialize, Serialize};

/// Reserved helper identifiers emitted into the synthetic program.
///
/// Kept as a struct (rather than four free constants) so a deployment can
/// remap the prefix without the transform caring about the concrete names at
/// every call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperNames {
    pub render: String,
    pub component: String,
    pub iteration: String,
    pub listener: String,
}

impl HelperNames {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            render: format!("{prefix}RenderHelper"),
            component: format!("{prefix}ComponentHelper"),
            iteration: format!("{prefix}IterationHelper"),
            listener: format!("{prefix}ListenerHelper"),
        }
    }
}

impl Default for HelperNames {
    fn default() -> Self {
        Self::with_prefix("__vls")
    }
}

/// Configuration for the template interpolation transform.
///
/// Mirrors the shape of the transform-options idiom already established for
/// this kind of crate: a single `serde`-(de)serializable struct with a
/// `Default` impl and a small set of `with_*` builders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateCheckOptions {
    /// Prefix used to derive the four reserved helper identifiers.
    pub helper_prefix: String,

    /// Additional ambient globals recognized in template scope, appended to
    /// the built-in list in §3 (e.g. a project-wide component registry).
    pub extra_globals: Vec<String>,

    /// The fixed `source` string attached to every emitted diagnostic so the
    /// editor groups them as template diagnostics.
    pub diagnostic_source: String,

    /// When set (test/CI builds), internal invariant violations panic
    /// instead of only being logged and neutralized. Never enable this in a
    /// language-server process serving real editors.
    pub escalate_internal_warnings: bool,
}

impl Default for TemplateCheckOptions {
    fn default() -> Self {
        Self {
            helper_prefix: String::from("__vls"),
            extra_globals: Vec::new(),
            diagnostic_source: String::from("sfc-template-check"),
            escalate_internal_warnings: false,
        }
    }
}

impl TemplateCheckOptions {
    /// Create options with a custom helper identifier prefix.
    pub fn with_helper_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.helper_prefix = prefix.into();
        self
    }

    /// Append additional ambient globals recognized inside templates.
    pub fn with_extra_globals(mut self, globals: impl IntoIterator<Item = String>) -> Self {
        self.extra_globals.extend(globals);
        self
    }

    pub(crate) fn helper_names(&self) -> HelperNames {
        HelperNames::with_prefix(&self.helper_prefix)
    }
}
