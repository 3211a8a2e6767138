//! Black-box coverage of the six concrete end-to-end scenarios in §8,
//! exercised against the in-memory `SemanticDiagnosticsSource` test double
//! since the concrete type-checking engine is out of scope.

use std::cell::RefCell;

use sfc_template_check::diagnostics::{DiagnosticKind, RawDiagnostic};
use sfc_template_check::options::TemplateCheckOptions;
use sfc_template_check::session::{
    DocumentVersion, SemanticDiagnosticsSource, ShadowDocumentId, TemplateDocument, ValidationSession,
};
use sfc_template_check::source_map::SynthRange;
use sfc_template_check::template_ast::{
    Argument, Attribute, DirectiveValue, EventHandlerBody, IterationExpression, ScriptExpression, TemplateNode,
    TemplateRange,
};

/// A deterministic test double standing in for the downstream type checker
/// (§4.6): reports exactly the diagnostics handed to it, against whatever
/// shadow text it was last pushed.
struct FakeChecker {
    last_shadow_text: RefCell<String>,
    diagnostics: Vec<RawDiagnostic>,
}

impl FakeChecker {
    fn new(diagnostics: Vec<RawDiagnostic>) -> Self {
        Self {
            last_shadow_text: RefCell::new(String::new()),
            diagnostics,
        }
    }
}

impl SemanticDiagnosticsSource for FakeChecker {
    fn update_shadow(&mut self, _shadow_path: &ShadowDocumentId, text: &str) {
        *self.last_shadow_text.borrow_mut() = text.to_string();
    }

    fn semantic_diagnostics(&self, _shadow_path: &ShadowDocumentId) -> Vec<RawDiagnostic> {
        self.diagnostics.clone()
    }
}

fn run(ast: Vec<TemplateNode>, source_len: u32, raw_diagnostics_fn: impl FnOnce(&str) -> Vec<RawDiagnostic>) -> Vec<sfc_template_check::TemplateDiagnostic> {
    let options = TemplateCheckOptions::default();
    let probe = sfc_template_check::transform_template(&ast, source_len, &options);
    let raw = raw_diagnostics_fn(&probe.program_text);

    let checker = FakeChecker::new(raw);
    let version = DocumentVersion::new();
    let as_of = version.current();
    let mut session = ValidationSession::new("Comp.vue", options, version, checker);
    let document = TemplateDocument { ast, source_len };
    session.validate(document, as_of)
}

fn span_of(program_text: &str, needle: &str) -> SynthRange {
    let pos = program_text.find(needle).unwrap_or_else(|| panic!("{needle:?} not found in {program_text:?}"));
    SynthRange::new(pos as u32, (pos + needle.len()) as u32)
}

#[test]
fn scenario_1_missing_property_in_interpolation() {
    // `<p>{{ messaage }}</p>`, with `messaage` at template columns 8..16
    // (here modeled simply as a flat byte offset, since this crate's API is
    // byte-range based rather than line/column based).
    let source = "{{ messaage }}";
    let expr = ScriptExpression::new("messaage", 3);
    let ast = vec![TemplateNode::ExpressionContainer {
        expression: Some(expr),
        range: TemplateRange::new(0, source.len() as u32),
    }];

    let diagnostics = run(ast, source.len() as u32, |text| {
        vec![RawDiagnostic {
            kind: DiagnosticKind::Semantic,
            span: span_of(text, "messaage"),
            messages: vec!["Property 'messaage' does not exist on type 'Component'.".to_string()],
            code: 2339,
        }]
    });

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, TemplateRange::new(3, 11));
    assert!(diagnostics[0].message.starts_with("Property 'messaage' does not exist on type"));
}

#[test]
fn scenario_2_iteration_variable_shadows_without_error_on_bare_use() {
    // `<ul><li v-for="item in items">{{ item.notExists }}</li></ul>`
    let iter = IterationExpression {
        left: "item".to_string(),
        right: ScriptExpression::new("items", 15),
        left_offset: 8,
    };
    let li = TemplateNode::Element {
        name: "li".to_string(),
        attributes: vec![Attribute::Directive {
            name: "for".to_string(),
            argument: None,
            value: Some(DirectiveValue::Iteration(iter)),
        }],
        children: vec![TemplateNode::ExpressionContainer {
            expression: Some(ScriptExpression::new("item.notExists", 31)),
            range: TemplateRange::new(28, 49),
        }],
        local_variables: vec![],
        range: TemplateRange::new(4, 55),
    };
    let ast = vec![TemplateNode::Element {
        name: "ul".to_string(),
        attributes: vec![],
        children: vec![li],
        local_variables: vec![],
        range: TemplateRange::new(0, 59),
    }];

    let diagnostics = run(ast, 59, |text| {
        assert!(!text.contains("this.item"), "iteration binder must not be rewritten to this.item");
        vec![RawDiagnostic {
            kind: DiagnosticKind::Semantic,
            span: span_of(text, "notExists"),
            messages: vec!["Property 'notExists' does not exist on type 'string'.".to_string()],
            code: 2339,
        }]
    });

    // The diagnostic's synthetic span falls inside the printed
    // `(item).notExists` text, whose innermost stamped entry is the whole
    // member expression's template range (31, the start of "item", through
    // 45, the end of "notExists") — not just the property name's own
    // sub-span, since property-name identifiers are not separately stamped.
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].range, TemplateRange::new(31, 45));
}

#[test]
fn scenario_3_object_literal_binding_static_key_and_value_both_checked() {
    // `<div :class="{ foo: true, bar: baz }">`, `bar` static key at (3,9..12),
    // `baz` value identifier at (4,4..7).
    let bind = Attribute::Directive {
        name: "bind".to_string(),
        argument: Some(Argument::Static { name: "class".to_string() }),
        value: Some(DirectiveValue::Expression(ScriptExpression::new(
            "{ foo: true, bar: baz }",
            10,
        ))),
    };
    let ast = vec![TemplateNode::Element {
        name: "div".to_string(),
        attributes: vec![bind],
        children: vec![],
        local_variables: vec![],
        range: TemplateRange::new(0, 45),
    }];

    let diagnostics = run(ast, 45, |text| {
        vec![
            RawDiagnostic {
                kind: DiagnosticKind::Semantic,
                span: span_of(text, "\"bar\""),
                messages: vec!["Object literal may only specify known properties, and 'bar' does not exist on type".to_string()],
                code: 2353,
            },
            RawDiagnostic {
                kind: DiagnosticKind::Semantic,
                span: span_of(text, "this.baz"),
                messages: vec!["Property 'baz' does not exist on type 'Component'.".to_string()],
                code: 2339,
            },
        ]
    });

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().any(|d| d.message.contains("'bar'")));
    assert!(diagnostics.iter().any(|d| d.message.contains("'baz'")));
}

#[test]
fn scenario_4_event_handler_typing() {
    let click = Attribute::Directive {
        name: "on".to_string(),
        argument: Some(Argument::Static { name: "click".to_string() }),
        value: Some(DirectiveValue::EventHandler(EventHandlerBody {
            source: "onClick(123)".to_string(),
            offset: 10,
        })),
    };
    let input = Attribute::Directive {
        name: "on".to_string(),
        argument: Some(Argument::Static { name: "input".to_string() }),
        value: Some(DirectiveValue::EventHandler(EventHandlerBody {
            source: "num = 'test'".to_string(),
            offset: 40,
        })),
    };
    let focus = Attribute::Directive {
        name: "on".to_string(),
        argument: Some(Argument::Static { name: "focus".to_string() }),
        value: Some(DirectiveValue::EventHandler(EventHandlerBody {
            source: "notExist()".to_string(),
            offset: 70,
        })),
    };

    let ast = vec![TemplateNode::Element {
        name: "input".to_string(),
        attributes: vec![click, input, focus],
        children: vec![],
        local_variables: vec![],
        range: TemplateRange::new(0, 90),
    }];

    let diagnostics = run(ast, 90, |text| {
        vec![
            RawDiagnostic {
                kind: DiagnosticKind::Semantic,
                span: span_of(text, "123"),
                messages: vec!["Argument of type '123' is not assignable to parameter of type 'string'.".to_string()],
                code: 2345,
            },
            RawDiagnostic {
                kind: DiagnosticKind::Semantic,
                span: span_of(text, "'test'"),
                messages: vec!["Type '\"test\"' is not assignable to type 'number'.".to_string()],
                code: 2322,
            },
            RawDiagnostic {
                kind: DiagnosticKind::Semantic,
                span: span_of(text, "notExist"),
                messages: vec!["Property 'notExist' does not exist on type 'Component'.".to_string()],
                code: 2339,
            },
        ]
    });

    assert_eq!(diagnostics.len(), 3);
    assert!(diagnostics.iter().any(|d| d.message.starts_with("Argument of type '123'")));
    assert!(diagnostics.iter().any(|d| d.message.starts_with("Type '\"test\"'")));
    assert!(diagnostics.iter().any(|d| d.message.starts_with("Property 'notExist'")));
}

#[test]
fn scenario_5_dynamic_directive_argument_each_occurrence_independently_reported() {
    // `<div v-bind:[notExist]="notExist">`
    let bind = Attribute::Directive {
        name: "bind".to_string(),
        argument: Some(Argument::Dynamic {
            expression: Some(ScriptExpression::new("notExist", 13)),
        }),
        value: Some(DirectiveValue::Expression(ScriptExpression::new("notExist", 24))),
    };
    let ast = vec![TemplateNode::Element {
        name: "div".to_string(),
        attributes: vec![bind],
        children: vec![],
        local_variables: vec![],
        range: TemplateRange::new(0, 40),
    }];

    let diagnostics = run(ast, 40, |text| {
        let occurrences: Vec<usize> = text.match_indices("this.notExist").map(|(i, _)| i).collect();
        assert!(occurrences.len() >= 2, "expected the dynamic key and the bound value both rewritten");
        occurrences
            .into_iter()
            .map(|start| RawDiagnostic {
                kind: DiagnosticKind::Semantic,
                span: SynthRange::new((start + 5) as u32, (start + 13) as u32),
                messages: vec!["Property 'notExist' does not exist on type 'Component'.".to_string()],
                code: 2339,
            })
            .collect()
    });

    assert!(diagnostics.len() >= 2);
    for d in &diagnostics {
        assert!(d.message.starts_with("Property 'notExist' does not exist"));
    }
}

#[test]
fn scenario_6_no_spurious_diagnostics_for_static_attributes() {
    let ast = vec![TemplateNode::Element {
        name: "div".to_string(),
        attributes: vec![
            Attribute::Plain {
                name: "class".to_string(),
                value: Some("x".to_string()),
            },
            Attribute::Plain {
                name: "style".to_string(),
                value: Some("color:red".to_string()),
            },
            Attribute::Plain {
                name: "data-foo".to_string(),
                value: Some("bar".to_string()),
            },
        ],
        children: vec![],
        local_variables: vec![],
        range: TemplateRange::new(0, 60),
    }];

    let diagnostics = run(ast, 60, |text| {
        assert!(!text.contains("this."), "no free identifiers expected from purely static attributes");
        Vec::new()
    });
    assert!(diagnostics.is_empty());
}
