//! Target class assembly.
//!
//! Members are written in a fixed order so the same input always produces
//! the same text:
//!
//! 1. `static propTypes` / `static defaultProps`
//! 2. the constructor seeding `this.state`
//! 3. computed getters and setters, in declaration order
//! 4. handlers, in source order
//! 5. lifecycle methods, in table order

use crate::accumulator::{Bucket, EmittedMethod, MethodKind, TranslationAccumulator};
use crate::emit::{property_key, reindent, MEMBER_INDENT};
use crate::error::TransformError;
use crate::lifecycle::Lifecycle;
use crate::rewrite::Rewriter;
use crate::script::Script;
use crate::state::{ComponentState, PropDecl};
use swc_common::Spanned;
use swc_ecma_ast::{Expr, ImportDecl, ImportSpecifier, ModuleExportName};

const REACT_IMPORT: &str = "import React, { Component } from 'react';";
const PROP_TYPES_IMPORT: &str = "import PropTypes from 'prop-types';";

/// Indentation of statements in a member body and of static object fields.
const BODY_INDENT: &str = "    ";
/// Indentation of the fields of the initial state object.
const STATE_FIELD_INDENT: &str = "      ";

/// Writes the target module: imports followed by the class declaration.
pub fn assemble(
    class_name: &str,
    state: &ComponentState,
    accumulator: &TranslationAccumulator,
    script: &Script,
) -> Result<String, TransformError> {
    let rewriter = Rewriter::new(state, script);
    let (react_import, superclass) = component_binding(&accumulator.imports);

    let mut out = String::new();
    if let Some(import) = react_import {
        out.push_str(import);
        out.push('\n');
    }
    if !state.props.is_empty() && !imports_from(&accumulator.imports, "prop-types") {
        out.push_str(PROP_TYPES_IMPORT);
        out.push('\n');
    }
    for import in &accumulator.imports {
        out.push_str(script.slice(import.span));
        out.push('\n');
    }
    out.push('\n');

    let mut members = Vec::new();
    members.extend(prop_types(state));
    members.extend(default_props(state, script));
    members.extend(constructor(state, &rewriter)?);
    for (name, computed) in &state.computeds {
        let getter = rewriter
            .with_instance_alias(computed.getter.instance_param())
            .rewrite_method(&computed.getter)?;
        members.push(
            EmittedMethod {
                kind: MethodKind::Getter,
                name: name.clone(),
                params: String::new(),
                body: getter.body,
                is_async: false,
                is_generator: false,
            }
            .render(MEMBER_INDENT),
        );

        if let Some(setter) = &computed.setter {
            let setter = rewriter.rewrite_method(setter)?;
            let params = if setter.params.is_empty() {
                "value".to_string()
            } else {
                setter.params
            };
            members.push(
                EmittedMethod {
                    kind: MethodKind::Setter,
                    name: name.clone(),
                    params,
                    body: setter.body,
                    is_async: false,
                    is_generator: false,
                }
                .render(MEMBER_INDENT),
            );
        }
    }

    let buckets = std::iter::once(Bucket::Handlers).chain(Lifecycle::ALL.map(Bucket::Lifecycle));
    for bucket in buckets {
        members.extend(
            accumulator
                .methods(bucket)
                .iter()
                .map(|method| method.render(MEMBER_INDENT)),
        );
    }

    out.push_str(&format!(
        "export default class {class_name} extends {superclass} {{\n"
    ));
    if !members.is_empty() {
        out.push_str(&members.join("\n\n"));
        out.push('\n');
    }
    out.push_str("}\n");
    Ok(out)
}

/// The superclass to extend and, when the source binds none, the import to add.
fn component_binding(imports: &[ImportDecl]) -> (Option<&'static str>, String) {
    let react = imports
        .iter()
        .filter(|import| import.src.value.as_str() == Some("react"));

    let mut namespace = None;
    for import in react {
        for specifier in &import.specifiers {
            match specifier {
                ImportSpecifier::Named(named) => {
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                        Some(ModuleExportName::Str(name)) => name.value.to_string_lossy().into_owned(),
                        None => named.local.sym.to_string(),
                    };
                    if imported == "Component" {
                        return (None, named.local.sym.to_string());
                    }
                }
                ImportSpecifier::Default(default) => {
                    namespace.get_or_insert_with(|| default.local.sym.to_string());
                }
                ImportSpecifier::Namespace(star) => {
                    namespace.get_or_insert_with(|| star.local.sym.to_string());
                }
            }
        }
    }

    match namespace {
        Some(react) => (None, format!("{react}.Component")),
        None => (Some(REACT_IMPORT), "Component".to_string()),
    }
}

fn imports_from(imports: &[ImportDecl], source: &str) -> bool {
    imports
        .iter()
        .any(|import| import.src.value.as_str() == Some(source))
}

/// `name = {\n  field,\n};` at member indentation.
fn static_object(name: &str, fields: &[String]) -> String {
    format!(
        "{MEMBER_INDENT}static {name} = {{\n{}\n{MEMBER_INDENT}}};",
        fields.join(",\n")
    )
}

fn prop_types(state: &ComponentState) -> Option<String> {
    if state.props.is_empty() {
        return None;
    }
    let fields: Vec<String> = state
        .props
        .iter()
        .map(|(name, decl)| format!("{BODY_INDENT}{}: {}", property_key(name), prop_type(decl)))
        .collect();
    Some(static_object("propTypes", &fields))
}

/// The `PropTypes` validator for a declaration.
pub(crate) fn prop_type(decl: &PropDecl) -> String {
    let mut validator = match decl.types.as_slice() {
        [] => "PropTypes.any".to_string(),
        [single] => type_checker(single),
        many => format!(
            "PropTypes.oneOfType([{}])",
            many.iter()
                .map(|constructor| type_checker(constructor))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    if decl.required {
        validator.push_str(".isRequired");
    }
    validator
}

fn type_checker(constructor: &str) -> String {
    let checker = match constructor {
        "String" => "string",
        "Number" => "number",
        "Boolean" => "bool",
        "Array" => "array",
        "Object" => "object",
        "Function" => "func",
        "Symbol" => "symbol",
        other => return format!("PropTypes.instanceOf({other})"),
    };
    format!("PropTypes.{checker}")
}

fn default_props(state: &ComponentState, script: &Script) -> Option<String> {
    let fields: Vec<String> = state
        .props
        .iter()
        .filter_map(|(name, decl)| {
            let default = decl.default.as_deref()?;
            let text = script.slice(default.span());
            // Non-function props take their default from a factory.
            let is_factory = matches!(default, Expr::Fn(_) | Expr::Arrow(_))
                && !decl.types.iter().any(|ty| ty.as_str() == "Function");
            let value = if is_factory {
                format!("({text})()")
            } else {
                text.to_string()
            };
            Some(format!(
                "{BODY_INDENT}{}: {}",
                property_key(name),
                reindent(&value, BODY_INDENT)
            ))
        })
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(static_object("defaultProps", &fields))
    }
}

fn constructor(
    state: &ComponentState,
    rewriter: &Rewriter<'_>,
) -> Result<Option<String>, TransformError> {
    if state.data.is_empty() {
        return Ok(None);
    }

    let rewriter = rewriter.with_instance_alias(state.data_alias.as_deref());
    let mut out = format!("{MEMBER_INDENT}constructor(props) {{\n{BODY_INDENT}super(props);\n");
    for stmt in &state.data_statements {
        let text = rewriter.rewrite(stmt, stmt.span())?;
        out.push_str(BODY_INDENT);
        out.push_str(&reindent(&text, BODY_INDENT));
        out.push('\n');
    }

    let mut fields = Vec::with_capacity(state.data.len());
    for (name, init) in &state.data {
        let value = rewriter.rewrite_expr(init)?;
        fields.push(format!(
            "{STATE_FIELD_INDENT}{}: {}",
            property_key(name),
            reindent(&value, STATE_FIELD_INDENT)
        ));
    }
    out.push_str(&format!(
        "{BODY_INDENT}this.state = {{\n{}\n{BODY_INDENT}}};\n",
        fields.join(",\n")
    ));
    out.push_str(MEMBER_INDENT);
    out.push('}');
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::translate;
    use crate::classify::classify_methods;
    use crate::component::find_component_object;
    use crate::script::ScriptSyntax;
    use crate::state::{collect_state, CollectOptions};
    use pretty_assertions::assert_eq;
    use smol_str::SmolStr;

    fn assemble_source(source: &str) -> String {
        let script = Script::parse(source, ScriptSyntax::default(), 0).unwrap();
        let component = find_component_object(script.module()).unwrap();
        let mut notices = Vec::new();
        let state =
            collect_state(component, &script, CollectOptions::default(), &mut notices).unwrap();
        let classified = classify_methods(component, &state);
        let accumulator = translate(&classified, &state, &script, None, &mut notices).unwrap();
        assemble("Test", &state, &accumulator, &script).unwrap()
    }

    #[test]
    fn test_empty_component() {
        assert_eq!(
            assemble_source("export default {}"),
            "import React, { Component } from 'react';\n\nexport default class Test extends Component {\n}\n"
        );
    }

    #[test]
    fn test_reuses_source_react_import() {
        let out = assemble_source("import React from 'react'\nexport default { methods: { a() {} } }");
        assert_eq!(
            out,
            "import React from 'react'\n\nexport default class Test extends React.Component {\n  a() {}\n}\n"
        );

        let out = assemble_source(
            "import React, { Component as Base } from 'react'\nexport default {}",
        );
        assert!(out.contains("extends Base {"));
        assert!(!out.contains(REACT_IMPORT));
    }

    #[test]
    fn test_props_and_defaults() {
        let out = assemble_source(
            "export default {
  props: {
    title: { type: String, required: true },
    items: { type: Array, default: () => [] },
    onPick: { type: Function, default: () => {} },
    size: [Number, String],
    size2: { default: 1 },
  },
}",
        );
        assert_eq!(
            out,
            "import React, { Component } from 'react';
import PropTypes from 'prop-types';

export default class Test extends Component {
  static propTypes = {
    title: PropTypes.string.isRequired,
    items: PropTypes.array,
    onPick: PropTypes.func,
    size: PropTypes.oneOfType([PropTypes.number, PropTypes.string]),
    size2: PropTypes.any
  };

  static defaultProps = {
    items: (() => [])(),
    onPick: () => {},
    size2: 1
  };
}
"
        );
    }

    #[test]
    fn test_constructor_with_statements() {
        let out = assemble_source(
            "export default {
  props: ['start'],
  data() {
    const base = this.start * 2
    return { total: base, label: 'x' }
  },
}",
        );
        assert!(out.contains(
            "  constructor(props) {
    super(props);
    const base = this.props.start * 2
    this.state = {
      total: base,
      label: 'x'
    };
  }"
        ));
    }

    #[test]
    fn test_getters_and_setters() {
        let out = assemble_source(
            "export default {
  data() { return { first: 'a' } },
  computed: {
    name: {
      get() { return this.first },
      set(v) { this.first = v },
    },
  },
}",
        );
        assert!(out.contains("  get name() { return this.state.first }\n\n  set name(v) { this.state.first = v }"));
    }

    #[test]
    fn test_lifecycle_methods_in_table_order() {
        let out = assemble_source(
            "export default { beforeDestroy() {}, mounted() {}, created() {}, methods: { z() {} } }",
        );
        let order: Vec<usize> = ["z()", "componentWillMount()", "componentDidMount()", "componentWillUnmount()"]
            .iter()
            .map(|member| out.find(member).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_instance_parameter_of_getters_and_data() {
        let out = assemble_source(
            "export default {
  props: ['start'],
  data: vm => ({ n: vm.start }),
  computed: {
    d: vm => vm.n * 2,
    e(self) { return self.d + this.n },
  },
}",
        );
        assert!(out.contains("    this.state = {\n      n: this.props.start\n    };"));
        assert!(out.contains("  get d() {\n    return this.state.n * 2;\n  }"));
        assert!(out.contains("  get e() { return this.d + this.state.n }"));
        assert!(!out.contains("vm"));
    }

    #[test]
    fn test_early_returning_data_leaves_no_constructor() {
        let out = assemble_source(
            "export default { props: ['big'], data() { if (this.big) return { n: 10 }; return { n: 1 } } }",
        );
        assert!(!out.contains("constructor"));
        assert!(!out.contains("return { n: 10 }"));
    }

    #[test]
    fn test_prop_type_mapping() {
        let decl = |types: &[&str], required| PropDecl {
            types: types.iter().map(|ty| SmolStr::new(ty)).collect(),
            required,
            default: None,
        };
        assert_eq!(prop_type(&decl(&["Boolean"], false)), "PropTypes.bool");
        assert_eq!(prop_type(&decl(&["Symbol"], true)), "PropTypes.symbol.isRequired");
        assert_eq!(prop_type(&decl(&["Date"], false)), "PropTypes.instanceOf(Date)");
        assert_eq!(prop_type(&decl(&[], true)), "PropTypes.any.isRequired");
    }
}
