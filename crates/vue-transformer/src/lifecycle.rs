//! Lifecycle hook mapping.

use crate::accumulator::{EmittedMethod, MethodKind};
use crate::component::Method;
use crate::error::TransformError;
use crate::rewrite::Rewriter;
use crate::template::render_body;
use smol_str::SmolStr;
use std::fmt;

/// A supported source lifecycle hook.
///
/// Variants are declared in table order, which is also the order the
/// target methods are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lifecycle {
    /// `created` → `componentWillMount`
    Created,
    /// `mounted` → `componentDidMount`
    Mounted,
    /// `updated` → `componentDidUpdate`
    Updated,
    /// `beforeDestroy` → `componentWillUnmount`
    BeforeDestroy,
    /// `errorCaptured` → `componentDidCatch`
    ErrorCaptured,
    /// `render` → `render`
    Render,
}

impl Lifecycle {
    /// Every hook, in table order.
    pub const ALL: [Lifecycle; 6] = [
        Lifecycle::Created,
        Lifecycle::Mounted,
        Lifecycle::Updated,
        Lifecycle::BeforeDestroy,
        Lifecycle::ErrorCaptured,
        Lifecycle::Render,
    ];

    /// Looks up a hook by its source name.
    pub fn from_hook(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|hook| hook.hook_name() == name)
    }

    /// The source hook name.
    pub fn hook_name(self) -> &'static str {
        match self {
            Lifecycle::Created => "created",
            Lifecycle::Mounted => "mounted",
            Lifecycle::Updated => "updated",
            Lifecycle::BeforeDestroy => "beforeDestroy",
            Lifecycle::ErrorCaptured => "errorCaptured",
            Lifecycle::Render => "render",
        }
    }

    /// The target class method name.
    pub fn target_method(self) -> &'static str {
        match self {
            Lifecycle::Created => "componentWillMount",
            Lifecycle::Mounted => "componentDidMount",
            Lifecycle::Updated => "componentDidUpdate",
            Lifecycle::BeforeDestroy => "componentWillUnmount",
            Lifecycle::ErrorCaptured => "componentDidCatch",
            Lifecycle::Render => "render",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}

/// Translates a lifecycle hook into its target method.
///
/// `render` loses its parameters (the target render takes none). When
/// `template` is given, the render body returns the markup instead of the
/// hand-written script body.
pub fn map_hook(
    lifecycle: Lifecycle,
    method: &Method,
    rewriter: &Rewriter<'_>,
    template: Option<&str>,
) -> Result<EmittedMethod, TransformError> {
    let (params, body) = match (lifecycle, template) {
        (Lifecycle::Render, Some(markup)) => (String::new(), render_body(markup)),
        (Lifecycle::Render, None) => (String::new(), rewriter.rewrite_method(method)?.body),
        _ => {
            let rewritten = rewriter.rewrite_method(method)?;
            (rewritten.params, rewritten.body)
        }
    };

    Ok(EmittedMethod {
        kind: MethodKind::Method,
        name: SmolStr::new_static(lifecycle.target_method()),
        params,
        body,
        is_async: method.is_async,
        is_generator: method.is_generator,
    })
}
