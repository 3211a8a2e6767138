//! Expression Parser & Scope Injector (§4.1).
//!
//! Parses a raw template expression substring with `oxc_parser`, then walks
//! the resulting `oxc_ast` tree, rewriting every free identifier not bound in
//! the current [`Scope`] into a `this.<name>` property access and producing
//! our own [`SynthExpr`] tree (never `oxc_ast` nodes — see `synth`'s module
//! doc for why).

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    self, ArrayExpressionElement, Argument as OxcArgument, AssignmentTarget, BindingPattern,
    BindingPatternKind, Expression, ObjectPropertyKind, PropertyKey,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};

use crate::error::TransformIssue;
use crate::scope::Scope;
use crate::synth::{ObjectProp, SynthExpr};
use crate::template_ast::{ScriptExpression, TemplateRange};

/// Parse and rewrite a raw expression substring (§4.1 contract).
///
/// `issues` collects internal invariant violations encountered along the
/// way (§7); the transform always returns a usable `SynthExpr`, substituting
/// the empty-string placeholder on failure.
pub fn parse_expr(expr: &ScriptExpression, scope: &Scope, issues: &mut Vec<TransformIssue>) -> SynthExpr {
    let wrapped = format!("({})", expr.source);
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true);
    let parser = Parser::new(&allocator, &wrapped, source_type);

    match parser.parse_expression() {
        Ok(parsed) => rewrite(&parsed, scope, expr.offset, issues),
        Err(_) => {
            let issue = TransformIssue::UnparsableExpression {
                offset: expr.offset,
                snippet: expr.source.clone(),
            };
            issue.report();
            issues.push(issue);
            SynthExpr::empty_placeholder()
        }
    }
}

/// Parse a `v-for` left-hand side (`"item"`, `"(item, index)"`, `"{a, b}"`,
/// ...) the same way a concise arrow's parameter list would be parsed (§4.2
/// "parseParams"), returning the binder names introduced into scope.
pub fn parse_iteration_params(left: &str, offset: u32, issues: &mut Vec<TransformIssue>) -> Vec<String> {
    let wrapped = format!("({}) => 0", left);
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true);
    let parser = Parser::new(&allocator, &wrapped, source_type);

    match parser.parse_expression() {
        Ok(Expression::ArrowFunctionExpression(arrow)) => {
            let mut names = Vec::new();
            for param in &arrow.params.items {
                collect_pattern_names(&param.pattern, &mut names);
            }
            names
        }
        _ => {
            let issue = TransformIssue::UnparsableExpression {
                offset,
                snippet: left.to_string(),
            };
            issue.report();
            issues.push(issue);
            Vec::new()
        }
    }
}

fn to_template_range(span: Span, base_offset: u32) -> TemplateRange {
    // The wrapped input is `"(" + original + ")"`, so every span is shifted
    // by exactly one character relative to the original template substring.
    let start = span.start.saturating_sub(1);
    let end = span.end.saturating_sub(1);
    TemplateRange::new(base_offset + start, base_offset + end)
}

fn unsupported(issues: &mut Vec<TransformIssue>, offset: u32, what: &str) -> SynthExpr {
    let issue = TransformIssue::UnsupportedConstruct {
        offset,
        what: what.to_string(),
    };
    issue.report();
    issues.push(issue);
    SynthExpr::empty_placeholder()
}

fn rewrite(expr: &Expression, scope: &Scope, base_offset: u32, issues: &mut Vec<TransformIssue>) -> SynthExpr {
    match expr {
        Expression::Identifier(id) => rewrite_ident(id.name.as_str(), id.span, scope, base_offset),
        Expression::ParenthesizedExpression(paren) => {
            rewrite(&paren.expression, scope, base_offset, issues)
        }
        Expression::StaticMemberExpression(member) => SynthExpr::Member {
            object: Box::new(rewrite(&member.object, scope, base_offset, issues)),
            property: member.property.name.to_string(),
            range: Some(to_template_range(member.span, base_offset)),
        },
        Expression::ComputedMemberExpression(member) => SynthExpr::Computed {
            object: Box::new(rewrite(&member.object, scope, base_offset, issues)),
            key: Box::new(rewrite(&member.expression, scope, base_offset, issues)),
            range: Some(to_template_range(member.span, base_offset)),
        },
        Expression::PrivateFieldExpression(private) => SynthExpr::Member {
            object: Box::new(rewrite(&private.object, scope, base_offset, issues)),
            property: format!("#{}", private.field.name),
            range: Some(to_template_range(private.span, base_offset)),
        },
        Expression::UnaryExpression(unary) => SynthExpr::Unary {
            op: unary.operator.as_str().to_string(),
            prefix: true,
            arg: Box::new(rewrite(&unary.argument, scope, base_offset, issues)),
            range: Some(to_template_range(unary.span, base_offset)),
        },
        Expression::UpdateExpression(update) => SynthExpr::Unary {
            op: update.operator.as_str().to_string(),
            prefix: update.prefix,
            arg: Box::new(rewrite_simple_target(&update.argument, scope, base_offset, issues)),
            range: Some(to_template_range(update.span, base_offset)),
        },
        Expression::BinaryExpression(binary) => SynthExpr::Binary {
            op: binary.operator.as_str().to_string(),
            left: Box::new(rewrite(&binary.left, scope, base_offset, issues)),
            right: Box::new(rewrite(&binary.right, scope, base_offset, issues)),
            range: Some(to_template_range(binary.span, base_offset)),
        },
        Expression::LogicalExpression(logical) => SynthExpr::Binary {
            op: logical.operator.as_str().to_string(),
            left: Box::new(rewrite(&logical.left, scope, base_offset, issues)),
            right: Box::new(rewrite(&logical.right, scope, base_offset, issues)),
            range: Some(to_template_range(logical.span, base_offset)),
        },
        Expression::AssignmentExpression(assign) => SynthExpr::Assign {
            op: assign.operator.as_str().to_string(),
            left: Box::new(rewrite_assignment_target(&assign.left, scope, base_offset, issues)),
            right: Box::new(rewrite(&assign.right, scope, base_offset, issues)),
            range: Some(to_template_range(assign.span, base_offset)),
        },
        Expression::ConditionalExpression(cond) => SynthExpr::Conditional {
            test: Box::new(rewrite(&cond.test, scope, base_offset, issues)),
            consequent: Box::new(rewrite(&cond.consequent, scope, base_offset, issues)),
            alternate: Box::new(rewrite(&cond.alternate, scope, base_offset, issues)),
            range: Some(to_template_range(cond.span, base_offset)),
        },
        Expression::CallExpression(call) => {
            let args = call
                .arguments
                .iter()
                .map(|arg| rewrite_argument(arg, scope, base_offset, issues))
                .collect();
            SynthExpr::Call {
                callee: Box::new(rewrite(&call.callee, scope, base_offset, issues)),
                args,
                range: Some(to_template_range(call.span, base_offset)),
            }
        }
        Expression::ObjectExpression(obj) => {
            let props = obj
                .properties
                .iter()
                .map(|prop| rewrite_object_prop(prop, scope, base_offset, issues))
                .collect();
            SynthExpr::Object { props }
        }
        Expression::ArrayExpression(arr) => {
            let elements = arr
                .elements
                .iter()
                .map(|elem| rewrite_array_element(elem, scope, base_offset, issues))
                .collect();
            SynthExpr::Array {
                elements,
                range: Some(to_template_range(arr.span, base_offset)),
            }
        }
        Expression::ArrowFunctionExpression(arrow) => {
            let mut names = Vec::new();
            for param in &arrow.params.items {
                collect_pattern_names(&param.pattern, &mut names);
            }
            let inner_scope = scope.extend(names.iter().cloned());
            let body = if arrow.expression {
                arrow
                    .body
                    .statements
                    .first()
                    .and_then(|stmt| match stmt {
                        ast::Statement::ExpressionStatement(expr_stmt) => Some(rewrite(
                            &expr_stmt.expression,
                            &inner_scope,
                            base_offset,
                            issues,
                        )),
                        _ => None,
                    })
                    .unwrap_or_else(SynthExpr::empty_placeholder)
            } else {
                // Block-bodied arrow: best-effort, rewrite each expression
                // statement under the extended scope and keep the last value
                // (arrows used as directive operands in templates are
                // concise in practice; this path still rewrites identifiers
                // rather than silently emitting unrewritten text).
                let mut last = SynthExpr::empty_placeholder();
                for stmt in &arrow.body.statements {
                    if let ast::Statement::ExpressionStatement(expr_stmt) = stmt {
                        last = rewrite(&expr_stmt.expression, &inner_scope, base_offset, issues);
                    }
                }
                last
            };
            SynthExpr::Arrow {
                params: names,
                body: Box::new(body),
                range: Some(to_template_range(arrow.span, base_offset)),
            }
        }
        Expression::TemplateLiteral(template) => {
            let quasis = template.quasis.iter().map(|q| q.value.raw.to_string()).collect();
            let expressions = template
                .expressions
                .iter()
                .map(|e| rewrite(e, scope, base_offset, issues))
                .collect();
            SynthExpr::TemplateLiteral {
                quasis,
                expressions,
                range: Some(to_template_range(template.span, base_offset)),
            }
        }
        Expression::ThisExpression(_) => SynthExpr::Ident {
            name: "this".to_string(),
            range: None,
        },
        Expression::NumericLiteral(lit) => SynthExpr::Literal {
            text: lit.raw.map(|r| r.to_string()).unwrap_or_else(|| lit.value.to_string()),
        },
        Expression::StringLiteral(lit) => SynthExpr::Literal {
            text: lit
                .raw
                .map(|r| r.to_string())
                .unwrap_or_else(|| serde_json::to_string(lit.value.as_str()).unwrap_or_default()),
        },
        Expression::BooleanLiteral(lit) => SynthExpr::Literal {
            text: lit.value.to_string(),
        },
        Expression::NullLiteral(_) => SynthExpr::Literal {
            text: "null".to_string(),
        },
        Expression::BigIntLiteral(lit) => SynthExpr::Literal {
            text: lit.raw.to_string(),
        },
        Expression::RegExpLiteral(lit) => SynthExpr::Literal {
            text: lit.raw.map(|r| r.to_string()).unwrap_or_else(|| "/(?:)/".to_string()),
        },
        // Constructs not modeled by §4.1's rewrite table (classes, yield,
        // await, sequence expressions, tagged templates, ...): neutralized
        // per §7 rather than emitted unrewritten, since they may contain
        // free identifiers we'd otherwise fail to resolve against `this`.
        other => unsupported(issues, to_template_range(other.span(), base_offset).start, "unmodeled expression kind"),
    }
}

/// For `++x`/`x--`, the argument is a "simple assignment target" (identifier
/// or member expression), not a general expression; reuse the same rewrite
/// rules by delegating to the relevant arm directly.
fn rewrite_simple_target(
    target: &ast::SimpleAssignmentTarget,
    scope: &Scope,
    base_offset: u32,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    match target {
        ast::SimpleAssignmentTarget::AssignmentTargetIdentifier(id) => {
            rewrite_ident(id.name.as_str(), id.span, scope, base_offset)
        }
        ast::SimpleAssignmentTarget::StaticMemberExpression(member) => SynthExpr::Member {
            object: Box::new(rewrite(&member.object, scope, base_offset, issues)),
            property: member.property.name.to_string(),
            range: Some(to_template_range(member.span, base_offset)),
        },
        ast::SimpleAssignmentTarget::ComputedMemberExpression(member) => SynthExpr::Computed {
            object: Box::new(rewrite(&member.object, scope, base_offset, issues)),
            key: Box::new(rewrite(&member.expression, scope, base_offset, issues)),
            range: Some(to_template_range(member.span, base_offset)),
        },
        other => unsupported(issues, to_template_range(other.span(), base_offset).start, "unmodeled update target"),
    }
}

fn rewrite_assignment_target(
    target: &AssignmentTarget,
    scope: &Scope,
    base_offset: u32,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    match target {
        AssignmentTarget::AssignmentTargetIdentifier(id) => {
            rewrite_ident(id.name.as_str(), id.span, scope, base_offset)
        }
        AssignmentTarget::StaticMemberExpression(member) => SynthExpr::Member {
            object: Box::new(rewrite(&member.object, scope, base_offset, issues)),
            property: member.property.name.to_string(),
            range: Some(to_template_range(member.span, base_offset)),
        },
        AssignmentTarget::ComputedMemberExpression(member) => SynthExpr::Computed {
            object: Box::new(rewrite(&member.object, scope, base_offset, issues)),
            key: Box::new(rewrite(&member.expression, scope, base_offset, issues)),
            range: Some(to_template_range(member.span, base_offset)),
        },
        // Destructuring assignment targets never occur for the directive
        // operands this crate type-checks (event-handler statement bodies).
        other => unsupported(issues, to_template_range(other.span(), base_offset).start, "destructuring assignment target"),
    }
}

fn rewrite_ident(name: &str, span: Span, scope: &Scope, base_offset: u32) -> SynthExpr {
    let range = Some(to_template_range(span, base_offset));
    if scope.contains(name) {
        SynthExpr::Ident {
            name: name.to_string(),
            range,
        }
    } else {
        SynthExpr::ThisProp {
            name: name.to_string(),
            range,
        }
    }
}

fn rewrite_argument(
    arg: &OxcArgument,
    scope: &Scope,
    base_offset: u32,
    issues: &mut Vec<TransformIssue>,
) -> SynthExpr {
    match arg {
        OxcArgument::SpreadElement(spread) => SynthExpr::Spread {
            argument: Box::new(rewrite(&spread.argument, scope, base_offset, issues)),
            range: Some(to_template_range(spread.span, base_offset)),
        },
        _ => arg
            .as_expression()
            .map(|e| rewrite(e, scope, base_offset, issues))
            .unwrap_or_else(SynthExpr::empty_placeholder),
    }
}

fn rewrite_array_element(
    elem: &ArrayExpressionElement,
    scope: &Scope,
    base_offset: u32,
    issues: &mut Vec<TransformIssue>,
) -> Option<SynthExpr> {
    match elem {
        ArrayExpressionElement::Elision(_) => None,
        ArrayExpressionElement::SpreadElement(spread) => Some(SynthExpr::Spread {
            argument: Box::new(rewrite(&spread.argument, scope, base_offset, issues)),
            range: Some(to_template_range(spread.span, base_offset)),
        }),
        _ => elem.as_expression().map(|e| rewrite(e, scope, base_offset, issues)),
    }
}

/// The literal text of a non-computed key that is itself a literal
/// expression (`{ "foo": 1 }`, `{ 42: 1 }`) rather than a bare identifier.
fn static_key_text(expr: &Expression, base_offset: u32) -> (String, Option<TemplateRange>) {
    match expr {
        Expression::StringLiteral(s) => (s.value.to_string(), Some(to_template_range(s.span, base_offset))),
        Expression::NumericLiteral(n) => (
            n.raw.map(|r| r.to_string()).unwrap_or_else(|| n.value.to_string()),
            Some(to_template_range(n.span, base_offset)),
        ),
        other => (format!("{:?}", other.span()), None),
    }
}

fn rewrite_object_prop(
    prop: &ObjectPropertyKind,
    scope: &Scope,
    base_offset: u32,
    issues: &mut Vec<TransformIssue>,
) -> ObjectProp {
    match prop {
        ObjectPropertyKind::ObjectProperty(p) => {
            if p.computed {
                let key_expr = match &p.key {
                    PropertyKey::StaticIdentifier(id) => SynthExpr::Literal {
                        text: id.name.to_string(),
                    },
                    PropertyKey::PrivateIdentifier(id) => SynthExpr::Literal {
                        text: format!("#{}", id.name),
                    },
                    PropertyKey::Expression(e) => rewrite(e, scope, base_offset, issues),
                };
                return ObjectProp::Computed {
                    key: key_expr,
                    value: rewrite(&p.value, scope, base_offset, issues),
                };
            }

            if p.shorthand {
                // `{x}` expands to `{x: this.x}` when `x` isn't in scope,
                // left as `{x: x}` otherwise (§4.1).
                if let PropertyKey::StaticIdentifier(id) = &p.key {
                    let name = id.name.as_str();
                    let range = Some(to_template_range(id.span, base_offset));
                    let value = if scope.contains(name) {
                        SynthExpr::Ident {
                            name: name.to_string(),
                            range,
                        }
                    } else {
                        SynthExpr::ThisProp {
                            name: name.to_string(),
                            range,
                        }
                    };
                    return ObjectProp::KeyValue {
                        key: name.to_string(),
                        key_range: None,
                        value,
                    };
                }
            }

            let (key_text, key_range) = match &p.key {
                PropertyKey::StaticIdentifier(id) => {
                    (id.name.to_string(), Some(to_template_range(id.span, base_offset)))
                }
                PropertyKey::PrivateIdentifier(id) => (format!("#{}", id.name), None),
                PropertyKey::Expression(e) => static_key_text(e, base_offset),
            };

            ObjectProp::KeyValue {
                key: key_text,
                key_range,
                value: rewrite(&p.value, scope, base_offset, issues),
            }
        }
        ObjectPropertyKind::SpreadProperty(spread) => {
            ObjectProp::Spread(rewrite(&spread.argument, scope, base_offset, issues))
        }
    }
}

/// Collect the binder names introduced by an arrow parameter / binding
/// element pattern (§4.1 "Pattern binders").
pub fn collect_pattern_names(pattern: &BindingPattern, out: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => out.push(id.name.to_string()),
        BindingPatternKind::ObjectPattern(obj) => {
            for prop in &obj.properties {
                // `{ b: c }` introduces `c`, not `b` — `prop.value` is
                // already the bound-name side regardless of shorthand.
                collect_pattern_names(&prop.value, out);
            }
            if let Some(rest) = &obj.rest {
                collect_pattern_names(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(arr) => {
            for elem in arr.elements.iter().flatten() {
                collect_pattern_names(elem, out);
            }
            if let Some(rest) = &arr.rest {
                collect_pattern_names(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => {
            collect_pattern_names(&assign.left, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::print_expr;

    fn rewrite_source(source: &str, scope: &Scope) -> String {
        let expr = ScriptExpression::new(source, 0);
        let mut issues = Vec::new();
        let synth = parse_expr(&expr, scope, &mut issues);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        print_expr(&synth, source.len() as u32).0
    }

    #[test]
    fn free_identifier_becomes_this_property() {
        let scope = Scope::root(std::iter::empty());
        assert_eq!(rewrite_source("msg", &scope), "this.msg");
    }

    #[test]
    fn scoped_identifier_is_left_bare() {
        let scope = Scope::root(std::iter::empty()).extend(["item".to_string()]);
        assert_eq!(rewrite_source("item", &scope), "item");
    }

    #[test]
    fn builtin_global_is_left_bare() {
        let scope = Scope::root(std::iter::empty());
        assert_eq!(rewrite_source("Math.max(1, 2)", &scope), "((Math).max)(1, 2)");
    }

    #[test]
    fn member_access_rewrites_only_the_object() {
        let scope = Scope::root(std::iter::empty());
        assert_eq!(rewrite_source("user.name", &scope), "(this.user).name");
    }

    #[test]
    fn arrow_parameter_shadows_outer_scope() {
        let scope = Scope::root(std::iter::empty());
        assert_eq!(
            rewrite_source("items.map(x => x.id)", &scope),
            "((this.items).map)((x) => ((x).id))"
        );
    }

    #[test]
    fn object_shorthand_expands_free_identifier() {
        let scope = Scope::root(std::iter::empty());
        assert_eq!(rewrite_source("{ baz }", &scope), "{ \"baz\": this.baz }");
    }

    #[test]
    fn numeric_literal_survives_verbatim() {
        let scope = Scope::root(std::iter::empty());
        assert_eq!(rewrite_source("123", &scope), "123");
    }

    #[test]
    fn unparsable_expression_reports_issue_and_yields_placeholder() {
        let scope = Scope::root(std::iter::empty());
        let expr = ScriptExpression::new("{{{", 0);
        let mut issues = Vec::new();
        let synth = parse_expr(&expr, &scope, &mut issues);
        assert!(!issues.is_empty());
        assert!(matches!(synth, SynthExpr::StringLiteral { ref value, .. } if value.is_empty()));
    }

    #[test]
    fn iteration_params_collects_destructured_names() {
        let mut issues = Vec::new();
        let names = parse_iteration_params("(item, index)", 0, &mut issues);
        assert_eq!(names, vec!["item".to_string(), "index".to_string()]);
        assert!(issues.is_empty());
    }

    #[test]
    fn iteration_params_collects_object_pattern_names() {
        let mut issues = Vec::new();
        let names = parse_iteration_params("{ id, name: label }", 0, &mut issues);
        assert_eq!(names, vec!["id".to_string(), "label".to_string()]);
        assert!(issues.is_empty());
    }
}
