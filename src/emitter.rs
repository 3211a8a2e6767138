//! Prints a [`SynthExpr`] tree into synthetic program text, recording a
//! [`SourceMap`] entry for every node that carries a template range (§3, §4.3).
//!
//! The synthetic AST is never fed back into `oxc_ast` — it only needs to be
//! handed to the downstream type checker as text, so printing is a direct
//! recursive walk that concatenates token text into a buffer, tracking the
//! buffer offsets spanned by each node as it goes (the "concatenating token
//! text" source-map variant described in §3/§4.3).

use crate::source_map::{SourceMap, SynthRange};
use crate::synth::{ObjectProp, SynthExpr, SynthStmt};

pub struct Emitter {
    buf: String,
    map: SourceMap,
}

impl Emitter {
    pub fn new(template_len: u32) -> Self {
        Self {
            buf: String::new(),
            map: SourceMap::new(template_len),
        }
    }

    pub fn finish(self) -> (String, SourceMap) {
        (self.buf, self.map)
    }

    fn pos(&self) -> u32 {
        self.buf.len() as u32
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn write_quoted(&mut self, value: &str) {
        // Reuse serde_json's string escaping rather than hand-rolling it —
        // a JSON string literal is always a valid JS string literal too.
        let quoted = serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string());
        self.write(&quoted);
    }

    /// Emit `expr`, returning the synthetic-buffer span it occupied. Records
    /// a source-map entry for that span iff `expr` carries a template range.
    pub fn emit(&mut self, expr: &SynthExpr) -> SynthRange {
        let start = self.pos();
        self.emit_inner(expr);
        let span = SynthRange::new(start, self.pos());
        if let Some(range) = expr.range() {
            self.map.record(span, range);
        }
        span
    }

    fn emit_inner(&mut self, expr: &SynthExpr) {
        match expr {
            SynthExpr::Ident { name, .. } => self.write(name),
            SynthExpr::ThisProp { name, .. } => {
                self.write("this.");
                self.write(name);
            }
            SynthExpr::Member { object, property, .. } => {
                self.write("(");
                self.emit(object);
                self.write(").");
                self.write(property);
            }
            SynthExpr::Computed { object, key, .. } => {
                self.write("(");
                self.emit(object);
                self.write(")[");
                self.emit(key);
                self.write("]");
            }
            SynthExpr::Unary { op, prefix, arg, .. } => {
                let word_operator = op.chars().next().is_some_and(|c| c.is_alphabetic());
                if *prefix {
                    self.write(op);
                    if word_operator {
                        self.write(" ");
                    }
                    self.write("(");
                    self.emit(arg);
                    self.write(")");
                } else {
                    self.write("(");
                    self.emit(arg);
                    self.write(")");
                    self.write(op);
                }
            }
            SynthExpr::Binary { op, left, right, .. } => {
                self.write("(");
                self.emit(left);
                self.write(") ");
                self.write(op);
                self.write(" (");
                self.emit(right);
                self.write(")");
            }
            SynthExpr::Assign { op, left, right, .. } => {
                self.write("(");
                self.emit(left);
                self.write(") ");
                self.write(op);
                self.write(" (");
                self.emit(right);
                self.write(")");
            }
            SynthExpr::Conditional {
                test,
                consequent,
                alternate,
                ..
            } => {
                self.write("(");
                self.emit(test);
                self.write(") ? (");
                self.emit(consequent);
                self.write(") : (");
                self.emit(alternate);
                self.write(")");
            }
            SynthExpr::Call { callee, args, .. } => {
                self.write("(");
                self.emit(callee);
                self.write(")(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit(arg);
                }
                self.write(")");
            }
            SynthExpr::Object { props } => {
                self.write("{ ");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_object_prop(prop);
                }
                self.write(" }");
            }
            SynthExpr::Array { elements, .. } => {
                self.write("[");
                for (i, elem) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if let Some(e) = elem {
                        self.emit(e);
                    }
                }
                self.write("]");
            }
            SynthExpr::Spread { argument, .. } => {
                self.write("...");
                self.emit(argument);
            }
            SynthExpr::Arrow { params, body, .. } => {
                self.write("(");
                self.write(&params.join(", "));
                self.write(") => (");
                self.emit(body);
                self.write(")");
            }
            SynthExpr::Function { params, body, .. } => {
                self.write("function (");
                for (i, (name, ty)) in params.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(name);
                    if let Some(ty) = ty {
                        self.write(": ");
                        self.write(ty);
                    }
                }
                self.write(") {\n");
                for stmt in body {
                    match stmt {
                        SynthStmt::Expression(e) => {
                            self.emit(e);
                            self.write(";\n");
                        }
                        SynthStmt::Neutral => self.write(";\n"),
                    }
                }
                self.write("}");
            }
            SynthExpr::TemplateLiteral { quasis, expressions, .. } => {
                self.write("`");
                for (i, quasi) in quasis.iter().enumerate() {
                    self.write(quasi);
                    if let Some(expr) = expressions.get(i) {
                        self.write("${");
                        self.emit(expr);
                        self.write("}");
                    }
                }
                self.write("`");
            }
            SynthExpr::Literal { text } => self.write(text),
            SynthExpr::StringLiteral { value, .. } => self.write_quoted(value),
        }
    }

    fn emit_object_prop(&mut self, prop: &ObjectProp) {
        match prop {
            ObjectProp::KeyValue {
                key,
                key_range,
                value,
            } => {
                let key_start = self.pos();
                self.write_quoted(key);
                let key_span = SynthRange::new(key_start, self.pos());
                if let Some(range) = key_range {
                    self.map.record(key_span, *range);
                }
                self.write(": ");
                self.emit(value);
            }
            ObjectProp::Computed { key, value } => {
                self.write("[");
                self.emit(key);
                self.write("]: ");
                self.emit(value);
            }
            ObjectProp::Spread(expr) => {
                self.write("...");
                self.emit(expr);
            }
        }
    }
}

/// Print a standalone expression (used by tests and anywhere a full program
/// wrapper is not wanted) and return its text plus the resulting source map.
pub fn print_expr(expr: &SynthExpr, template_len: u32) -> (String, SourceMap) {
    let mut emitter = Emitter::new(template_len);
    emitter.emit(expr);
    emitter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_ast::TemplateRange;

    #[test]
    fn conditional_parenthesizes_all_three_arms() {
        let expr = SynthExpr::Conditional {
            test: Box::new(SynthExpr::Ident {
                name: "ok".to_string(),
                range: None,
            }),
            consequent: Box::new(SynthExpr::Literal { text: "1".to_string() }),
            alternate: Box::new(SynthExpr::Literal { text: "2".to_string() }),
            range: None,
        };
        let (text, _) = print_expr(&expr, 10);
        assert_eq!(text, "(ok) ? (1) : (2)");
    }

    #[test]
    fn array_preserves_elisions() {
        let expr = SynthExpr::Array {
            elements: vec![Some(SynthExpr::Literal { text: "1".to_string() }), None, Some(SynthExpr::Literal { text: "3".to_string() })],
            range: None,
        };
        let (text, _) = print_expr(&expr, 10);
        assert_eq!(text, "[1, , 3]");
    }

    #[test]
    fn spread_writes_ellipsis_prefix() {
        let expr = SynthExpr::Spread {
            argument: Box::new(SynthExpr::Ident {
                name: "rest".to_string(),
                range: None,
            }),
            range: None,
        };
        let (text, _) = print_expr(&expr, 10);
        assert_eq!(text, "...rest");
    }

    #[test]
    fn string_literal_is_json_quoted() {
        let expr = SynthExpr::StringLiteral {
            value: "has \"quotes\" in it".to_string(),
            range: None,
        };
        let (text, _) = print_expr(&expr, 30);
        assert_eq!(text, "\"has \\\"quotes\\\" in it\"");
    }

    #[test]
    fn ranged_node_records_a_source_map_entry() {
        let range = TemplateRange::new(5, 12);
        let expr = SynthExpr::ThisProp {
            name: "msg".to_string(),
            range: Some(range),
        };
        let (text, map) = print_expr(&expr, 20);
        assert_eq!(text, "this.msg");
        assert_eq!(map.map_back(0), range);
    }

    #[test]
    fn object_literal_never_carries_its_own_range_but_keys_can() {
        let key_range = TemplateRange::new(1, 4);
        let expr = SynthExpr::Object {
            props: vec![ObjectProp::KeyValue {
                key: "foo".to_string(),
                key_range: Some(key_range),
                value: SynthExpr::Literal { text: "1".to_string() },
            }],
        };
        let (text, map) = print_expr(&expr, 20);
        assert_eq!(text, "{ \"foo\": 1 }");
        // position 2 falls inside the quoted "foo" key text.
        assert_eq!(map.map_back(2), key_range);
    }
}
