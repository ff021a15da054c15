//! Component state collection.
//!
//! Reads the declarative slots of the options object (`name`, `props`,
//! `data`, `computed`, `components`) into a [`ComponentState`]. Collection
//! runs once, before any method is classified, because rewriting needs the
//! complete set of prop, data and computed names.

use crate::component::{entries, entry, string_literal, unparen, EntryValue, Method, MethodBody};
use crate::error::TransformError;
use crate::notice::Notice;
use crate::script::Script;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::fmt;
use swc_common::Spanned;
use swc_ecma_ast::{ArrowExpr, Class, Expr, Function, Lit, ObjectLit, ReturnStmt, Stmt};
use swc_ecma_visit::{Visit, VisitWith};

/// The slot an identifier was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `props`
    Prop,
    /// `data`
    Data,
    /// `computed`
    Computed,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Slot::Prop => "props",
            Slot::Data => "data",
            Slot::Computed => "computed",
        })
    }
}

/// A declared input property.
#[derive(Debug, Clone, Default)]
pub struct PropDecl {
    /// Constructor names from `type` (`String`, `Number`, ...). Empty when untyped.
    pub types: Vec<SmolStr>,
    /// `required: true`
    pub required: bool,
    /// The `default` expression.
    pub default: Option<Box<Expr>>,
}

/// A derived value.
#[derive(Debug, Clone)]
pub struct Computed {
    /// The getter function.
    pub getter: Method,
    /// The optional setter from `{ get, set }` form.
    pub setter: Option<Method>,
}

/// The canonical model of a component's declared slots.
#[derive(Debug, Clone, Default)]
pub struct ComponentState {
    /// The `name` option, if declared.
    pub name: Option<String>,
    /// Input properties.
    pub props: IndexMap<SmolStr, PropDecl>,
    /// Local state fields and their initializers.
    pub data: IndexMap<SmolStr, Box<Expr>>,
    /// Statements preceding `return { ... }` in the data function.
    pub data_statements: Vec<Stmt>,
    /// The data function's first parameter, bound to the instance.
    pub data_alias: Option<SmolStr>,
    /// Derived values.
    pub computeds: IndexMap<SmolStr, Computed>,
    /// Registered sub-components, tag name to referenced expression.
    pub components: IndexMap<SmolStr, String>,
}

impl ComponentState {
    /// Returns the slot `name` belongs to.
    pub fn slot_of(&self, name: &str) -> Option<Slot> {
        if self.props.contains_key(name) {
            Some(Slot::Prop)
        } else if self.data.contains_key(name) {
            Some(Slot::Data)
        } else if self.computeds.contains_key(name) {
            Some(Slot::Computed)
        } else {
            None
        }
    }

    fn claim(&self, name: &SmolStr, slot: Slot) -> Result<(), TransformError> {
        match self.slot_of(name) {
            Some(first) if first != slot => Err(TransformError::SlotConflict {
                name: name.clone(),
                first,
                second: slot,
            }),
            _ => Ok(()),
        }
    }
}

/// Collection options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Whether the `components` registry is read (single-file documents only).
    pub collect_components: bool,
}

/// Populates a [`ComponentState`] from the component options object.
///
/// Unknown shapes inside a slot are reported as notices. The only error is
/// an identifier declared in more than one slot.
pub fn collect_state(
    component: &ObjectLit,
    script: &Script,
    options: CollectOptions,
    notices: &mut Vec<Notice>,
) -> Result<ComponentState, TransformError> {
    let mut state = ComponentState {
        name: entry(component, "name").and_then(|value| match value {
            EntryValue::Expr(expr) => string_literal(expr),
            _ => None,
        }),
        ..Default::default()
    };

    collect_props(component, &mut state)?;
    collect_data(component, script, &mut state, notices)?;
    collect_computed(component, script, &mut state, notices)?;
    if options.collect_components {
        collect_components(component, script, &mut state);
    }

    tracing::debug!(
        props = state.props.len(),
        data = state.data.len(),
        computeds = state.computeds.len(),
        components = state.components.len(),
        "collected component state"
    );
    Ok(state)
}

fn collect_props(component: &ObjectLit, state: &mut ComponentState) -> Result<(), TransformError> {
    let Some(EntryValue::Expr(props)) = entry(component, "props") else {
        return Ok(());
    };

    match unparen(props) {
        // props: ['title', 'count']
        Expr::Array(array) => {
            for elem in array.elems.iter().flatten() {
                if let Some(name) = string_literal(&elem.expr) {
                    let name = SmolStr::new(name);
                    state.claim(&name, Slot::Prop)?;
                    state.props.insert(name, PropDecl::default());
                }
            }
        }
        // props: { title: String, count: { type: Number, default: 0 } }
        Expr::Object(object) => {
            for (name, value, _) in entries(object) {
                state.claim(&name, Slot::Prop)?;
                let decl = match value {
                    EntryValue::Expr(expr) => prop_decl(expr),
                    _ => PropDecl::default(),
                };
                state.props.insert(name, decl);
            }
        }
        _ => {}
    }
    Ok(())
}

fn prop_decl(expr: &Expr) -> PropDecl {
    match unparen(expr) {
        Expr::Object(options) => {
            let mut decl = PropDecl::default();
            for (key, value, _) in entries(options) {
                let EntryValue::Expr(value) = value else {
                    continue;
                };
                match key.as_str() {
                    "type" => decl.types = constructor_names(value),
                    "required" => {
                        decl.required = matches!(unparen(value), Expr::Lit(Lit::Bool(b)) if b.value)
                    }
                    "default" => decl.default = Some(Box::new(value.clone())),
                    _ => {}
                }
            }
            decl
        }
        other => PropDecl {
            types: constructor_names(other),
            ..Default::default()
        },
    }
}

/// `String` or `[String, Number]`.
fn constructor_names(expr: &Expr) -> Vec<SmolStr> {
    match unparen(expr) {
        Expr::Ident(ident) => vec![SmolStr::new(&*ident.sym)],
        Expr::Array(array) => array
            .elems
            .iter()
            .flatten()
            .filter_map(|elem| match unparen(&elem.expr) {
                Expr::Ident(ident) => Some(SmolStr::new(&*ident.sym)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn collect_data(
    component: &ObjectLit,
    script: &Script,
    state: &mut ComponentState,
    notices: &mut Vec<Notice>,
) -> Result<(), TransformError> {
    let Some((name, value, span)) = entries(component)
        .into_iter()
        .find(|(name, _, _)| name.as_str() == "data")
    else {
        return Ok(());
    };
    let Some(data) = Method::from_entry(name, value, span) else {
        notices.push(Notice::info(
            "The data option must be a function; it is left out".to_string(),
            script.line_col(span.lo),
        ));
        return Ok(());
    };

    let (statements, returned) = match &data.body {
        MethodBody::Block(block) => {
            let Some(index) = block
                .stmts
                .iter()
                .position(|stmt| matches!(stmt, Stmt::Return(ret) if ret.arg.is_some()))
            else {
                return Ok(());
            };
            let Stmt::Return(ret) = &block.stmts[index] else {
                return Ok(());
            };
            let statements = &block.stmts[..index];
            if statements.iter().any(contains_return) {
                notices.push(Notice::info(
                    "The data function returns early; it is left out".to_string(),
                    script.line_col(span.lo),
                ));
                return Ok(());
            }
            (statements.to_vec(), ret.arg.as_deref())
        }
        MethodBody::Expr(expr) => (Vec::new(), Some(expr.as_ref())),
        MethodBody::Empty => return Ok(()),
    };

    let Some(Expr::Object(fields)) = returned.map(unparen) else {
        notices.push(Notice::info(
            "The data function does not return an object literal; it is left out".to_string(),
            script.line_col(span.lo),
        ));
        return Ok(());
    };

    for (name, value, _) in entries(fields) {
        state.claim(&name, Slot::Data)?;
        let init = match value {
            EntryValue::Expr(expr) => Box::new(expr.clone()),
            EntryValue::Shorthand(ident) => Box::new(Expr::Ident(ident.clone())),
            EntryValue::Method(_) => {
                notices.push(Notice::info(
                    format!("The data field `{name}` is a method; it is left out"),
                    script.line_col(fields.span().lo),
                ));
                continue;
            }
        };
        state.data.insert(name, init);
    }
    state.data_statements = statements;
    state.data_alias = data.instance_param().map(SmolStr::new);
    Ok(())
}

/// Whether `stmt` returns from the enclosing function.
fn contains_return(stmt: &Stmt) -> bool {
    let mut finder = ReturnFinder::default();
    stmt.visit_with(&mut finder);
    finder.found
}

#[derive(Default)]
struct ReturnFinder {
    found: bool,
}

impl Visit for ReturnFinder {
    fn visit_return_stmt(&mut self, _: &ReturnStmt) {
        self.found = true;
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_arrow_expr(&mut self, _: &ArrowExpr) {}

    fn visit_class(&mut self, _: &Class) {}
}

fn collect_computed(
    component: &ObjectLit,
    script: &Script,
    state: &mut ComponentState,
    notices: &mut Vec<Notice>,
) -> Result<(), TransformError> {
    let Some(EntryValue::Expr(computed)) = entry(component, "computed") else {
        return Ok(());
    };
    let Expr::Object(computed) = unparen(computed) else {
        return Ok(());
    };

    for (name, value, span) in entries(computed) {
        let definition = match Method::from_entry(name.clone(), value, span) {
            Some(getter) => Some(Computed {
                getter,
                setter: None,
            }),
            None => accessor_pair(&name, value),
        };

        let Some(definition) = definition else {
            notices.push(Notice::info(
                format!("The computed `{name}` has no getter; it is left out"),
                script.line_col(span.lo),
            ));
            continue;
        };
        state.claim(&name, Slot::Computed)?;
        state.computeds.insert(name, definition);
    }
    Ok(())
}

/// `name: { get() { ... }, set(value) { ... } }`
fn accessor_pair(name: &SmolStr, value: EntryValue<'_>) -> Option<Computed> {
    let EntryValue::Expr(expr) = value else {
        return None;
    };
    let Expr::Object(object) = unparen(expr) else {
        return None;
    };

    let mut getter = None;
    let mut setter = None;
    for (key, value, span) in entries(object) {
        let slot = match key.as_str() {
            "get" => &mut getter,
            "set" => &mut setter,
            _ => continue,
        };
        *slot = Method::from_entry(name.clone(), value, span);
    }

    Some(Computed {
        getter: getter?,
        setter,
    })
}

fn collect_components(component: &ObjectLit, script: &Script, state: &mut ComponentState) {
    let Some(EntryValue::Expr(components)) = entry(component, "components") else {
        return;
    };
    let Expr::Object(components) = unparen(components) else {
        return;
    };

    for (tag, value, _) in entries(components) {
        let target = match value {
            EntryValue::Shorthand(ident) => ident.sym.to_string(),
            EntryValue::Expr(expr) => script.slice(expr.span()).to_string(),
            EntryValue::Method(function) => script.slice(function.span).to_string(),
        };
        state.components.insert(tag, target);
    }
}
