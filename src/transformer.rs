//! Template Transformer (§4.2).
//!
//! Walks a parsed template AST and emits the synthetic expression sequence
//! described in §3/§4.2: elements become `componentHelper` calls, iteration
//! wraps its element in `iterationHelper`, event handlers become
//! `listenerHelper` calls or are emitted directly, and text/interpolations
//! become literals and parsed expressions respectively.

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

use crate::error::TransformIssue;
use crate::expr_parser::{parse_expr, parse_iteration_params};
use crate::options::{HelperNames, TemplateCheckOptions};
use crate::scope::Scope;
use crate::source_map::SourceMap;
use crate::synth::{ObjectProp, SynthExpr, SynthStmt};
use crate::template_ast::{Argument, Attribute, DirectiveKind, DirectiveValue, EventHandlerBody, ScriptExpression, TemplateNode, TemplateRange};
use crate::utils::is_class_or_style;
use crate::emitter::Emitter;

/// The result of transforming a template into a synthetic program.
pub struct TransformResult {
    pub program_text: String,
    pub source_map: SourceMap,
    /// Internal invariant violations encountered along the way (§7). Already
    /// reported via `tracing` as they occurred; exposed here too so tests
    /// and callers that want to assert on them don't need a subscriber.
    pub issues: Vec<TransformIssue>,
}

fn ident(name: String) -> SynthExpr {
    SynthExpr::Ident { name, range: None }
}

/// Transform the top-level children of a template into a synthetic program
/// wrapped in `renderHelper(children)` (§3, §4.2 "Top-level").
pub fn transform_template(
    children: &[TemplateNode],
    source_len: u32,
    options: &TemplateCheckOptions,
) -> TransformResult {
    let scope = Scope::root(options.extra_globals.iter().cloned());
    let helpers = options.helper_names();
    let mut issues = Vec::new();

    let synth_children: Vec<Option<SynthExpr>> = children
        .iter()
        .map(|node| Some(transform_node(node, &scope, &helpers, &mut issues)))
        .collect();

    let render_call = SynthExpr::Call {
        callee: Box::new(ident(helpers.render.clone())),
        args: vec![SynthExpr::Array {
            elements: synth_children,
            range: None,
        }],
        range: None,
    };

    let mut emitter = Emitter::new(source_len);
    emitter.emit(&render_call);
    let (program_text, source_map) = emitter.finish();

    if options.escalate_internal_warnings {
        if let Some(issue) = issues.first() {
            panic!("internal invariant violation escalated by configuration: {issue}");
        }
    }

    TransformResult {
        program_text,
        source_map,
        issues,
    }
}

fn transform_node(
    node: &TemplateNode,
    scope: &Scope,
    helpers: &HelperNames,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    match node {
        TemplateNode::Text { value, range } => SynthExpr::StringLiteral {
            value: value.clone(),
            range: Some(*range),
        },
        TemplateNode::ExpressionContainer { expression, .. } => match expression {
            Some(expr) => parse_expr(expr, scope, issues),
            None => SynthExpr::empty_placeholder(),
        },
        TemplateNode::Element {
            name,
            attributes,
            children,
            local_variables,
            range,
        } => transform_element(name, attributes, children, local_variables, *range, scope, helpers, issues),
    }
}

fn transform_element(
    name: &str,
    attributes: &[Attribute],
    children: &[TemplateNode],
    locals: &[String],
    elem_range: TemplateRange,
    scope: &Scope,
    helpers: &HelperNames,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    let scope_with_locals = scope.extend(locals.iter().cloned());

    // Find the iteration directive, if any, and resolve its binders first:
    // per §8's shadowing property, iteration binders must already be visible
    // to sibling attributes and children, not just to the wrapping callback
    // (see DESIGN.md for the resolution of this ordering detail).
    let for_directive = attributes.iter().find_map(|attr| match attr {
        Attribute::Directive {
            name,
            value: Some(DirectiveValue::Iteration(iter)),
            ..
        } if DirectiveKind::classify(name) == DirectiveKind::For => Some(iter),
        _ => None,
    });

    let (iteration_params, body_scope) = match for_directive {
        Some(iter) => {
            let params = parse_iteration_params(&iter.left, iter.left_offset, issues);
            let extended = scope_with_locals.extend(params.iter().cloned());
            (Some(params), extended)
        }
        None => (None, scope_with_locals),
    };

    let attribute_data = build_attribute_data(attributes, &body_scope, helpers, issues);
    let synth_children: Vec<Option<SynthExpr>> = children
        .iter()
        .map(|c| Some(transform_node(c, &body_scope, helpers, issues)))
        .collect();

    let element_call = SynthExpr::Call {
        callee: Box::new(ident(helpers.component.clone())),
        args: vec![
            SynthExpr::StringLiteral {
                value: name.to_string(),
                range: None,
            },
            attribute_data,
            SynthExpr::Array {
                elements: synth_children,
                range: None,
            },
        ],
        range: Some(elem_range),
    };

    match (for_directive, iteration_params) {
        (Some(iter), Some(params)) => {
            // Iteration source is resolved under the *original* scope `S`,
            // not `S'` — iteration binders are in scope only inside the
            // element (§4.2).
            let source_expr = parse_expr(&iter.right, scope, issues);
            SynthExpr::Call {
                callee: Box::new(ident(helpers.iteration.clone())),
                args: vec![
                    source_expr,
                    SynthExpr::Arrow {
                        params,
                        body: Box::new(element_call),
                        range: Some(elem_range),
                    },
                ],
                range: Some(elem_range),
            }
        }
        _ => element_call,
    }
}

/// Build the `{ props, on, directives }` attribute data object (§4.2).
fn build_attribute_data(
    attributes: &[Attribute],
    scope: &Scope,
    helpers: &HelperNames,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    let mut props: Vec<ObjectProp> = Vec::new();
    let mut on: Vec<ObjectProp> = Vec::new();
    let mut directives: Vec<SynthExpr> = Vec::new();

    for attr in attributes {
        match attr {
            Attribute::Plain { name, value } => {
                if is_class_or_style(name) {
                    continue;
                }
                let value_expr = match value {
                    Some(v) => SynthExpr::StringLiteral {
                        value: v.clone(),
                        range: None,
                    },
                    None => SynthExpr::Literal {
                        text: "true".to_string(),
                    },
                };
                props.push(ObjectProp::KeyValue {
                    key: name.clone(),
                    key_range: None,
                    value: value_expr,
                });
            }
            Attribute::Directive { name, argument, value } => {
                match DirectiveKind::classify(name) {
                    // Handled entirely by the caller; never contributes here.
                    DirectiveKind::For => {}
                    // Deliberately skipped per the invariant in §3.
                    DirectiveKind::Slot | DirectiveKind::SlotScope => {}
                    DirectiveKind::Bind => {
                        let value_expr = match value {
                            Some(DirectiveValue::Expression(e)) => parse_expr(e, scope, issues),
                            _ => SynthExpr::Literal {
                                text: "true".to_string(),
                            },
                        };
                        push_argument_target(&mut props, argument, value_expr, scope, issues);
                    }
                    DirectiveKind::On => {
                        let handler_expr = build_event_handler(value, scope, helpers, issues);
                        push_argument_target(&mut on, argument, handler_expr, scope, issues);
                    }
                    DirectiveKind::Other => {
                        if let Some(Argument::Dynamic {
                            expression: Some(e),
                        }) = argument
                        {
                            directives.push(parse_expr(e, scope, issues));
                        }
                        if let Some(DirectiveValue::Expression(e)) = value {
                            directives.push(parse_expr(e, scope, issues));
                        }
                    }
                }
            }
        }
    }

    SynthExpr::Object {
        props: vec![
            ObjectProp::KeyValue {
                key: "props".to_string(),
                key_range: None,
                value: SynthExpr::Object { props },
            },
            ObjectProp::KeyValue {
                key: "on".to_string(),
                key_range: None,
                value: SynthExpr::Object { props: on },
            },
            ObjectProp::KeyValue {
                key: "directives".to_string(),
                key_range: None,
                value: SynthExpr::Array {
                    elements: directives.into_iter().map(Some).collect(),
                    range: None,
                },
            },
        ],
    }
}

/// Apply the "Argument-name rules" (§4.2) to attach `value_expr` to `target`.
fn push_argument_target(
    target: &mut Vec<ObjectProp>,
    argument: &Option<Argument>,
    value_expr: SynthExpr,
    scope: &Scope,
    issues: &mut Vec<TransformIssue>,
) {
    match argument {
        None => target.push(ObjectProp::Spread(value_expr)),
        Some(Argument::Static { name }) => target.push(ObjectProp::KeyValue {
            key: name.clone(),
            key_range: None,
            value: value_expr,
        }),
        Some(Argument::Dynamic {
            expression: Some(key_expr),
        }) => target.push(ObjectProp::Computed {
            key: parse_expr(key_expr, scope, issues),
            value: value_expr,
        }),
        Some(Argument::Dynamic { expression: None }) => {
            target.push(ObjectProp::Spread(SynthExpr::Object { props: Vec::new() }))
        }
    }
}

/// Build the synthetic expression for an `on`-directive value (§4.2 "Event
/// handler body").
fn build_event_handler(
    value: &Option<DirectiveValue>,
    scope: &Scope,
    helpers: &HelperNames,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    match value {
        Some(DirectiveValue::Expression(e)) => parse_expr(e, scope, issues),
        Some(DirectiveValue::EventHandler(body)) => build_listener(body, scope, helpers, issues),
        _ => SynthExpr::empty_placeholder(),
    }
}

fn build_listener(
    body: &EventHandlerBody,
    scope: &Scope,
    helpers: &HelperNames,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true);
    let parser = Parser::new(&allocator, &body.source, source_type);
    let parsed = parser.parse();

    if !parsed.errors.is_empty() {
        let issue = TransformIssue::UnparsableExpression {
            offset: body.offset,
            snippet: body.source.clone(),
        };
        issue.report();
        issues.push(issue);
        return SynthExpr::empty_placeholder();
    }

    let body_scope = scope.extend_event_body();
    let mut statements = Vec::new();

    for stmt in &parsed.program.body {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                let span = expr_stmt.expression.span();
                let text = &body.source[span.start as usize..span.end as usize];
                let script_expr = ScriptExpression::new(text.to_string(), body.offset + span.start);
                statements.push(SynthStmt::Expression(parse_expr(&script_expr, &body_scope, issues)));
            }
            other => {
                let issue = TransformIssue::NonExpressionStatement {
                    offset: body.offset + other.span().start,
                };
                issue.report();
                issues.push(issue);
                statements.push(SynthStmt::Neutral);
            }
        }
    }

    SynthExpr::Call {
        callee: Box::new(ident(helpers.listener.clone())),
        args: vec![
            ident("this".to_string()),
            SynthExpr::Function {
                params: vec![("$event".to_string(), Some("Event".to_string()))],
                body: statements,
                range: Some(body.range()),
            },
        ],
        range: Some(body.range()),
    }
}

impl EventHandlerBody {
    fn range(&self) -> TemplateRange {
        TemplateRange::new(self.offset, self.offset + self.source.len() as u32)
    }
}
