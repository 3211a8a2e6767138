//! The synthetic-program AST (§3, §4).
//!
//! This is *not* a reuse of `oxc_ast`'s node types: the synthetic program is
//! built by this crate from scratch and only ever needs to be printed, never
//! re-parsed by us, so a small tagged-variant tree purpose-built for that is
//! simpler than wrangling allocator-backed `oxc_ast` nodes for trees we
//! invent ourselves. `oxc_ast`/`oxc_parser` are used on the *input* side
//! (parsing template-authored expression text, see `expr_parser`).
//!
//! Every variant that can be the locus of a diagnostic carries an optional
//! [`TemplateRange`] (see `range stamping`, §4.1); object literals never
//! carry one, matching the spec's "purely structural" rule.

use crate::template_ast::TemplateRange;

/// A property of a synthetic object literal.
#[derive(Debug, Clone)]
pub enum ObjectProp {
    /// `key: value`, key is a plain string (quoted at print time).
    KeyValue {
        key: String,
        key_range: Option<TemplateRange>,
        value: SynthExpr,
    },
    /// `[keyExpr]: value`
    Computed { key: SynthExpr, value: SynthExpr },
    /// `...expr`
    Spread(SynthExpr),
}

/// A synthetic expression node.
#[derive(Debug, Clone)]
pub enum SynthExpr {
    /// A raw identifier, used only for scope-bound names and `this` — never
    /// for a rewritten free identifier (those become `ThisProp`).
    Ident { name: String, range: Option<TemplateRange> },
    /// `this.<name>` — the rewrite target for a free identifier.
    ThisProp { name: String, range: Option<TemplateRange> },
    /// `(object).property`
    Member {
        object: Box<SynthExpr>,
        property: String,
        range: Option<TemplateRange>,
    },
    /// `(object)[key]`
    Computed {
        object: Box<SynthExpr>,
        key: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    /// A unary/update operator: `typeof e`, `!e`, `e++`, `++e`, ...
    Unary {
        op: String,
        prefix: bool,
        arg: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    Binary {
        op: String,
        left: Box<SynthExpr>,
        right: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    Assign {
        op: String,
        left: Box<SynthExpr>,
        right: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    Conditional {
        test: Box<SynthExpr>,
        consequent: Box<SynthExpr>,
        alternate: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    Call {
        callee: Box<SynthExpr>,
        args: Vec<SynthExpr>,
        range: Option<TemplateRange>,
    },
    Object {
        props: Vec<ObjectProp>,
        // intentionally no range: object literals are purely structural (§4.1).
    },
    Array {
        /// `None` models an elision (`[a, , b]`).
        elements: Vec<Option<SynthExpr>>,
        range: Option<TemplateRange>,
    },
    Spread {
        argument: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    /// A concise arrow `(params) => body`. Used both for user-authored arrow
    /// expressions and for the synthetic iteration/listener callbacks built
    /// by the Template Transformer.
    Arrow {
        params: Vec<String>,
        body: Box<SynthExpr>,
        range: Option<TemplateRange>,
    },
    /// `function (params: Type...) { statements }`, used for the
    /// `listenerHelper` callback (§4.2).
    Function {
        params: Vec<(String, Option<String>)>,
        body: Vec<SynthStmt>,
        range: Option<TemplateRange>,
    },
    TemplateLiteral {
        quasis: Vec<String>,
        expressions: Vec<SynthExpr>,
        range: Option<TemplateRange>,
    },
    /// A literal whose own text is reproduced verbatim (numbers, strings,
    /// booleans, `null`, regexes). Per §9 "synthetic-vs-real position
    /// hygiene", literals that were not themselves rewritten carry no
    /// template range — the sentinel `(-1, -1)` described in §4.1 is simply
    /// the absence of a recorded source-map entry for this node.
    Literal { text: String },
    /// A synthetic string literal built by the transformer itself (element
    /// tag names, text nodes, the empty-string placeholder for failures).
    /// Carries a range when it is stamped from user-authored text (e.g. a
    /// `Text` node), and none when purely synthetic (e.g. the tag-name
    /// string of `componentHelper`'s first argument is structural).
    StringLiteral { value: String, range: Option<TemplateRange> },
}

impl SynthExpr {
    pub fn range(&self) -> Option<TemplateRange> {
        match self {
            SynthExpr::Ident { range, .. }
            | SynthExpr::ThisProp { range, .. }
            | SynthExpr::Member { range, .. }
            | SynthExpr::Computed { range, .. }
            | SynthExpr::Unary { range, .. }
            | SynthExpr::Binary { range, .. }
            | SynthExpr::Assign { range, .. }
            | SynthExpr::Conditional { range, .. }
            | SynthExpr::Call { range, .. }
            | SynthExpr::Array { range, .. }
            | SynthExpr::Spread { range, .. }
            | SynthExpr::Arrow { range, .. }
            | SynthExpr::Function { range, .. }
            | SynthExpr::TemplateLiteral { range, .. }
            | SynthExpr::StringLiteral { range, .. } => *range,
            SynthExpr::Object { .. } | SynthExpr::Literal { .. } => None,
        }
    }

    /// The empty-string literal substituted on §4.1/§7 failure paths.
    pub fn empty_placeholder() -> Self {
        SynthExpr::StringLiteral {
            value: String::new(),
            range: None,
        }
    }
}

/// A statement inside a synthetic `listenerHelper` function body. Per §4.2,
/// every statement in an event-handler body must be an expression
/// statement; anything else becomes `Neutral`.
#[derive(Debug, Clone)]
pub enum SynthStmt {
    Expression(SynthExpr),
    /// Substituted for a non-expression statement the transform does not
    /// model (§7: internal invariant violation, neutralized).
    Neutral,
}
