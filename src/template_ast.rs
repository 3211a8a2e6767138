//! The template AST as handed to this crate by the external SFC parser (§3).
//!
//! These types model the *input*: a tree the host language server built from
//! parsing the template block. This crate never constructs them except in
//! its own tests; production callers build them from their own parser's
//! output (out of scope per §1).

use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into the template buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRange {
    pub start: u32,
    pub end: u32,
}

impl TemplateRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// A raw, not-yet-parsed script expression: a substring of the template
/// buffer plus its absolute byte offset. Parsing happens lazily, the first
/// time the Template Transformer needs its synthetic form (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptExpression {
    pub source: String,
    pub offset: u32,
}

impl ScriptExpression {
    pub fn new(source: impl Into<String>, offset: u32) -> Self {
        Self {
            source: source.into(),
            offset,
        }
    }

    pub fn range(&self) -> TemplateRange {
        TemplateRange::new(self.offset, self.offset + self.source.len() as u32)
    }
}

/// A single binder produced by destructuring one `v-for` left-hand-side
/// position or one arrow-function parameter. Unlike `ScriptExpression`, a
/// pattern's own text is parsed together with the parameter list it belongs
/// to (§4.1 "parenthesized-arrow trick"), so only the binder names matter
/// here, along with the range of the *whole* pattern list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationExpression {
    /// The raw text of the binder patterns (e.g. `"item"`, `"(item, index)"`).
    pub left: String,
    pub right: ScriptExpression,
    pub left_offset: u32,
}

/// The body of an event handler: a sequence of statements, given as raw
/// template text (parsed lazily, like `ScriptExpression`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventHandlerBody {
    pub source: String,
    pub offset: u32,
}

/// A directive's argument, e.g. the `key` in `v-bind:key="value"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Static { name: String },
    Dynamic { expression: Option<ScriptExpression> },
}

/// The value bound to a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    Expression(ScriptExpression),
    Iteration(IterationExpression),
    EventHandler(EventHandlerBody),
}

/// Which built-in directive kind an attribute name denotes, per the
/// classification predicates in §4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Bind,
    On,
    For,
    Slot,
    SlotScope,
    Other,
}

impl DirectiveKind {
    pub fn classify(name: &str) -> Self {
        match name {
            "bind" => Self::Bind,
            "on" => Self::On,
            "for" => Self::For,
            "slot" => Self::Slot,
            "slot-scope" => Self::SlotScope,
            _ => Self::Other,
        }
    }
}

/// A single attribute on an element, either a plain string attribute or a
/// directive with an optional argument and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Plain {
        name: String,
        value: Option<String>,
    },
    Directive {
        name: String,
        argument: Option<Argument>,
        value: Option<DirectiveValue>,
    },
}

/// A template AST node, per §3. Every variant carries the byte range of the
/// node in the template buffer, populated by the external parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    Element {
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<TemplateNode>,
        local_variables: Vec<String>,
        range: TemplateRange,
    },
    ExpressionContainer {
        expression: Option<ScriptExpression>,
        range: TemplateRange,
    },
    Text {
        value: String,
        range: TemplateRange,
    },
}

impl TemplateNode {
    pub fn range(&self) -> TemplateRange {
        match self {
            TemplateNode::Element { range, .. }
            | TemplateNode::ExpressionContainer { range, .. }
            | TemplateNode::Text { range, .. } => *range,
        }
    }
}
