//! `this.<name>` rewriting.
//!
//! Every member access rooted at the component instance is redirected to the
//! location it lives at on the class component:
//!
//! | declared in | source          | output                |
//! |-------------|-----------------|-----------------------|
//! | `props`     | `this.title`    | `this.props.title`    |
//! | `data`      | `this.count`    | `this.state.count`    |
//! | `computed`  | `this.double()` | `this.double`         |
//!
//! Names declared nowhere (handlers, `$emit`, `$refs`, ...) are left alone.
//! Functions and classes that rebind `this` are not descended into, unless
//! the function is bound with `.bind(this)`. Arrow functions are.

use crate::component::{unparen, Method, MethodBody};
use crate::emit::{apply_edits, opens_params, params_end, Edit};
use crate::error::TransformError;
use crate::script::Script;
use crate::state::{ComponentState, Slot};
use smol_str::SmolStr;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Class, Expr, Function, GetterProp, Ident, MemberExpr, MemberProp,
    MethodProp, OptCall, SetterProp,
};
use swc_ecma_visit::{Visit, VisitWith};

/// Rewrites instance member accesses against a collected [`ComponentState`].
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    state: &'a ComponentState,
    script: &'a Script,
    instance_alias: Option<&'a str>,
}

/// A method after rewriting: parameter list and body as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenFunction {
    /// Parameter list without the surrounding parentheses.
    pub params: String,
    /// The body including its braces.
    pub body: String,
}

impl<'a> Rewriter<'a> {
    /// Creates a rewriter.
    pub fn new(state: &'a ComponentState, script: &'a Script) -> Self {
        Self {
            state,
            script,
            instance_alias: None,
        }
    }

    /// Treats `alias` as another name for the instance.
    ///
    /// Vue passes the instance as the first argument of `data` and of
    /// computed getters (`double: vm => vm.count * 2`); `vm.count` is
    /// rewritten like `this.count` and a bare `vm` becomes `this`.
    pub fn with_instance_alias(self, alias: Option<&'a str>) -> Self {
        Self {
            instance_alias: alias,
            ..self
        }
    }

    /// Rewrites the source text of `node`, which spans `span`.
    pub fn rewrite<N>(&self, node: &N, span: Span) -> Result<String, TransformError>
    where
        N: for<'v> VisitWith<ThisAccessVisitor<'v>>,
    {
        let range = self.script.range(span);
        let mut visitor = self.visitor();
        node.visit_with(&mut visitor);
        visitor.finish(range)
    }

    /// Rewrites the source text of an expression.
    pub fn rewrite_expr(&self, expr: &Expr) -> Result<String, TransformError> {
        self.rewrite(expr, expr.span())
    }

    /// Rewrites a method's parameters and body.
    ///
    /// Expression-bodied arrows get a block body returning the expression.
    pub fn rewrite_method(&self, method: &Method) -> Result<RewrittenFunction, TransformError> {
        let params = match (method.params.first(), method.params.last()) {
            (Some(first), Some(last)) => {
                let text = self.script.text();
                let start = self.script.offset(first.span().lo);
                let last_end = self.script.offset(last.span().hi);
                let end = if opens_params(text, start) {
                    params_end(text, start).unwrap_or(last_end)
                } else {
                    last_end
                };
                let mut visitor = self.visitor();
                for param in &method.params {
                    param.visit_with(&mut visitor);
                }
                visitor.finish(start..end)?
            }
            _ => String::new(),
        };

        let body = match &method.body {
            MethodBody::Block(block) => self.rewrite(block, block.span)?,
            MethodBody::Expr(expr) => format!("{{\n  return {};\n}}", self.rewrite_expr(expr)?),
            MethodBody::Empty => "{}".to_string(),
        };

        Ok(RewrittenFunction { params, body })
    }

    fn visitor(&self) -> ThisAccessVisitor<'a> {
        ThisAccessVisitor {
            state: self.state,
            script: self.script,
            instance_alias: self.instance_alias,
            edits: Vec::new(),
            error: None,
        }
    }
}

/// Collects the edits for one rewrite.
#[derive(Debug)]
pub struct ThisAccessVisitor<'a> {
    state: &'a ComponentState,
    script: &'a Script,
    instance_alias: Option<&'a str>,
    edits: Vec<Edit>,
    error: Option<TransformError>,
}

/// The receiver of an instance member access.
#[derive(Debug, Clone, Copy)]
enum Receiver {
    /// `this`
    This(Span),
    /// The instance parameter of `data` or a computed getter.
    Alias(Span),
}

impl<'a> ThisAccessVisitor<'a> {
    fn finish(self, range: std::ops::Range<usize>) -> Result<String, TransformError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(apply_edits(self.script.text(), range, self.edits)),
        }
    }

    fn slot(&self, name: &str) -> Option<Slot> {
        self.state.slot_of(name)
    }

    fn is_alias(&self, ident: &Ident) -> bool {
        self.instance_alias == Some(&*ident.sym)
    }

    /// `this.<name>` or `<alias>.<name>`
    fn instance_member<'m>(&self, member: &'m MemberExpr) -> Option<(Receiver, &'m str)> {
        let MemberProp::Ident(prop) = &member.prop else {
            return None;
        };
        match member.obj.as_ref() {
            Expr::This(this) => Some((Receiver::This(this.span), &*prop.sym)),
            Expr::Ident(ident) if self.is_alias(ident) => {
                Some((Receiver::Alias(ident.span), &*prop.sym))
            }
            _ => None,
        }
    }

    /// Points `receiver` at the location of a member declared in `slot`.
    fn redirect(&mut self, receiver: Receiver, slot: Option<Slot>) {
        match receiver {
            Receiver::This(span) => {
                let container = match slot {
                    Some(Slot::Prop) => ".props",
                    Some(Slot::Data) => ".state",
                    Some(Slot::Computed) | None => return,
                };
                self.edits
                    .push(Edit::insert(self.script.offset(span.hi), container));
            }
            Receiver::Alias(span) => {
                let target = match slot {
                    Some(Slot::Prop) => "this.props",
                    Some(Slot::Data) => "this.state",
                    Some(Slot::Computed) | None => "this",
                };
                self.edits.push(Edit::replace(
                    self.script.offset(span.lo),
                    self.script.offset(span.hi),
                    target,
                ));
            }
        }
    }

    /// Handles a call of a computed member. Returns `false` when `callee` is
    /// not one.
    fn computed_call(&mut self, callee: &Expr, has_args: bool, call_span: Span) -> bool {
        let Expr::Member(member) = callee else {
            return false;
        };
        let Some((receiver, name)) = self.instance_member(member) else {
            return false;
        };
        if self.slot(name) != Some(Slot::Computed) {
            return false;
        }

        if !has_args {
            // A getter has no call syntax: drop `()` or `?.()`.
            self.redirect(receiver, Some(Slot::Computed));
            self.edits.push(Edit::delete(
                self.script.offset(member.span.hi),
                self.script.offset(call_span.hi),
            ));
        } else if self.error.is_none() {
            let (line, column) = self.script.line_col(call_span.lo);
            self.error = Some(TransformError::ComputedCalledWithArguments {
                name: SmolStr::new(name),
                line,
                column,
            });
        }
        true
    }
}

/// `function () { ... }.bind(this)`
fn function_bound_to_this(call: &CallExpr) -> Option<&Function> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Member(member) = callee.as_ref() else {
        return None;
    };
    let MemberProp::Ident(prop) = &member.prop else {
        return None;
    };
    let bound_to_this = call
        .args
        .first()
        .is_some_and(|arg| matches!(unparen(&arg.expr), Expr::This(_)));
    match unparen(&member.obj) {
        Expr::Fn(fn_expr) if &*prop.sym == "bind" && bound_to_this => Some(&fn_expr.function),
        _ => None,
    }
}

impl Visit for ThisAccessVisitor<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) if self.is_alias(ident) => {
                self.redirect(Receiver::Alias(ident.span), None);
            }
            _ => expr.visit_children_with(self),
        }
    }

    fn visit_member_expr(&mut self, member: &MemberExpr) {
        let Some((receiver, name)) = self.instance_member(member) else {
            member.visit_children_with(self);
            return;
        };
        let slot = self.slot(name);
        self.redirect(receiver, slot);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if let Some(function) = function_bound_to_this(call) {
            function.visit_children_with(self);
            for arg in call.args.iter().skip(1) {
                arg.visit_with(self);
            }
            return;
        }

        let handled = match &call.callee {
            Callee::Expr(callee) => self.computed_call(callee, !call.args.is_empty(), call.span),
            _ => false,
        };
        if !handled {
            call.visit_children_with(self);
        }
    }

    fn visit_opt_call(&mut self, call: &OptCall) {
        if !self.computed_call(&call.callee, !call.args.is_empty(), call.span) {
            call.visit_children_with(self);
        }
    }

    fn visit_function(&mut self, _: &Function) {}

    fn visit_class(&mut self, _: &Class) {}

    fn visit_method_prop(&mut self, _: &MethodProp) {}

    fn visit_getter_prop(&mut self, _: &GetterProp) {}

    fn visit_setter_prop(&mut self, _: &SetterProp) {}
}
