//! Locating the component options object and reading its entries.

use smol_str::SmolStr;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, Decl, Expr, Function, Ident, Lit, Module, ModuleDecl,
    ModuleItem, ObjectLit, Pat, Prop, PropName, PropOrSpread, Stmt,
};

/// Finds the options object exported as the default export.
///
/// Recognises:
/// - `export default { ... }`
/// - `export default Vue.extend({ ... })` and `defineComponent({ ... })`
/// - `const Comp = { ... }; export default Comp`
pub fn find_component_object(module: &Module) -> Option<&ObjectLit> {
    module.body.iter().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
            object_from_expr(module, &export.expr)
        }
        _ => None,
    })
}

fn object_from_expr<'a>(module: &'a Module, expr: &'a Expr) -> Option<&'a ObjectLit> {
    match expr {
        Expr::Object(object) => Some(object),
        Expr::Paren(paren) => object_from_expr(module, &paren.expr),
        Expr::Call(call) => call
            .args
            .first()
            .filter(|arg| arg.spread.is_none())
            .and_then(|arg| object_from_expr(module, &arg.expr)),
        Expr::Ident(ident) => top_level_binding(module, ident)
            .and_then(|init| object_from_expr(module, init)),
        _ => None,
    }
}

fn top_level_binding<'a>(module: &'a Module, ident: &Ident) -> Option<&'a Expr> {
    module.body.iter().find_map(|item| {
        let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
            return None;
        };
        var.decls.iter().find_map(|decl| match &decl.name {
            Pat::Ident(binding) if binding.id.sym == ident.sym => decl.init.as_deref(),
            _ => None,
        })
    })
}

/// Returns the key of an object entry as a plain string.
pub(crate) fn prop_name_str(key: &PropName) -> Option<SmolStr> {
    match key {
        PropName::Ident(ident) => Some(SmolStr::new(&*ident.sym)),
        PropName::Str(value) => Some(SmolStr::new(value.value.to_string_lossy())),
        PropName::Num(num) => Some(SmolStr::new(num.value.to_string())),
        _ => None,
    }
}

/// The value side of an object entry.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EntryValue<'a> {
    /// `key() { ... }`
    Method(&'a Function),
    /// `key: expr`
    Expr(&'a Expr),
    /// `{ key }`
    Shorthand(&'a Ident),
}

/// Lists the named entries of an object literal.
///
/// Spreads, accessors and computed keys are skipped.
pub(crate) fn entries(object: &ObjectLit) -> Vec<(SmolStr, EntryValue<'_>, Span)> {
    object
        .props
        .iter()
        .filter_map(|prop| {
            let PropOrSpread::Prop(prop) = prop else {
                return None;
            };
            match prop.as_ref() {
                Prop::Method(method) => Some((
                    prop_name_str(&method.key)?,
                    EntryValue::Method(&method.function),
                    prop.span(),
                )),
                Prop::KeyValue(kv) => Some((
                    prop_name_str(&kv.key)?,
                    EntryValue::Expr(&kv.value),
                    prop.span(),
                )),
                Prop::Shorthand(ident) => Some((
                    SmolStr::new(&*ident.sym),
                    EntryValue::Shorthand(ident),
                    ident.span,
                )),
                _ => None,
            }
        })
        .collect()
}

/// Looks up an entry by key.
pub(crate) fn entry<'a>(object: &'a ObjectLit, key: &str) -> Option<EntryValue<'a>> {
    entries(object)
        .into_iter()
        .find(|(name, _, _)| name.as_str() == key)
        .map(|(_, value, _)| value)
}

/// Strips parentheses around an expression.
pub(crate) fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        other => other,
    }
}

/// Returns the string value of a string literal expression.
pub(crate) fn string_literal(expr: &Expr) -> Option<String> {
    match unparen(expr) {
        Expr::Lit(Lit::Str(value)) => Some(value.value.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// The body of a function-like member.
#[derive(Debug, Clone)]
pub enum MethodBody {
    /// `{ ... }`
    Block(BlockStmt),
    /// The expression body of an arrow function.
    Expr(Box<Expr>),
    /// A bodiless declaration (TypeScript overload signature).
    Empty,
}

/// A function-like member of the component object: an object method, a
/// `function` expression value, or an arrow function value.
#[derive(Debug, Clone)]
pub struct Method {
    /// The entry key.
    pub name: SmolStr,
    /// Parameter patterns.
    pub params: Vec<Pat>,
    /// The body.
    pub body: MethodBody,
    /// `async` modifier.
    pub is_async: bool,
    /// `*` modifier.
    pub is_generator: bool,
    /// Span of the whole entry.
    pub span: Span,
}

impl Method {
    pub(crate) fn from_function(name: SmolStr, function: &Function, span: Span) -> Self {
        Self {
            name,
            params: function.params.iter().map(|param| param.pat.clone()).collect(),
            body: function
                .body
                .clone()
                .map(MethodBody::Block)
                .unwrap_or(MethodBody::Empty),
            is_async: function.is_async,
            is_generator: function.is_generator,
            span,
        }
    }

    pub(crate) fn from_arrow(name: SmolStr, arrow: &ArrowExpr, span: Span) -> Self {
        Self {
            name,
            params: arrow.params.clone(),
            body: match arrow.body.as_ref() {
                BlockStmtOrExpr::BlockStmt(block) => MethodBody::Block(block.clone()),
                BlockStmtOrExpr::Expr(expr) => MethodBody::Expr(expr.clone()),
            },
            is_async: arrow.is_async,
            is_generator: arrow.is_generator,
            span,
        }
    }

    /// The name of a plain identifier first parameter.
    pub fn instance_param(&self) -> Option<&str> {
        match self.params.first() {
            Some(Pat::Ident(binding)) => Some(&*binding.id.sym),
            _ => None,
        }
    }

    /// Builds a method from an entry when its value is function-like.
    pub(crate) fn from_entry(name: SmolStr, value: EntryValue<'_>, span: Span) -> Option<Self> {
        match value {
            EntryValue::Method(function) => Some(Self::from_function(name, function, span)),
            EntryValue::Expr(expr) => match unparen(expr) {
                Expr::Fn(fn_expr) => Some(Self::from_function(name, &fn_expr.function, span)),
                Expr::Arrow(arrow) => Some(Self::from_arrow(name, arrow, span)),
                _ => None,
            },
            EntryValue::Shorthand(_) => None,
        }
    }
}
