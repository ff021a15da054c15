//! Translation of classified methods into target class members.

use crate::classify::{ClassifiedMethod, MethodRole};
use crate::emit::{property_key, reindent};
use crate::error::TransformError;
use crate::lifecycle::{map_hook, Lifecycle};
use crate::notice::Notice;
use crate::rewrite::Rewriter;
use crate::script::Script;
use crate::state::ComponentState;
use crate::template::render_body;
use indexmap::IndexMap;
use smol_str::SmolStr;
use swc_ecma_ast::ImportDecl;

/// Where a translated method is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Plain handlers.
    Handlers,
    /// The target method of a lifecycle hook.
    Lifecycle(Lifecycle),
}

impl Bucket {
    /// The bucket name: `methods` or the target method name.
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Handlers => "methods",
            Bucket::Lifecycle(lifecycle) => lifecycle.target_method(),
        }
    }
}

/// The kind of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

/// A class member ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedMethod {
    pub kind: MethodKind,
    pub name: SmolStr,
    /// Parameter list without parentheses.
    pub params: String,
    /// Body including braces, with the original formatting.
    pub body: String,
    pub is_async: bool,
    pub is_generator: bool,
}

impl EmittedMethod {
    /// Writes the member at `indent`.
    pub(crate) fn render(&self, indent: &str) -> String {
        let mut out = String::from(indent);
        if self.is_async {
            out.push_str("async ");
        }
        match self.kind {
            MethodKind::Getter => out.push_str("get "),
            MethodKind::Setter => out.push_str("set "),
            MethodKind::Method => {}
        }
        if self.is_generator {
            out.push('*');
        }
        out.push_str(&property_key(&self.name));
        out.push('(');
        out.push_str(&self.params);
        out.push_str(") ");
        out.push_str(&reindent(&self.body, indent));
        out
    }
}

/// Everything translated from the script, keyed for assembly.
#[derive(Debug, Clone, Default)]
pub struct TranslationAccumulator {
    /// Source imports, in order.
    pub imports: Vec<ImportDecl>,
    /// Translated methods per bucket.
    pub class_methods: IndexMap<Bucket, Vec<EmittedMethod>>,
}

impl TranslationAccumulator {
    /// The methods collected in `bucket`.
    pub fn methods(&self, bucket: Bucket) -> &[EmittedMethod] {
        self.class_methods
            .get(&bucket)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn push(&mut self, bucket: Bucket, method: EmittedMethod) {
        self.class_methods.entry(bucket).or_default().push(method);
    }
}

/// Rewrites handlers and lifecycle hooks into their buckets.
///
/// Unsupported methods are reported and left out. With a `template`, a
/// `render` method returning the markup is added when the script has none.
pub fn translate(
    classified: &[ClassifiedMethod],
    state: &ComponentState,
    script: &Script,
    template: Option<&str>,
    notices: &mut Vec<Notice>,
) -> Result<TranslationAccumulator, TransformError> {
    let rewriter = Rewriter::new(state, script);
    let mut accumulator = TranslationAccumulator {
        imports: script.imports(),
        ..Default::default()
    };

    for ClassifiedMethod { site, role } in classified {
        let method = &site.method;
        match role {
            MethodRole::Handler => {
                let rewritten = rewriter.rewrite_method(method)?;
                accumulator.push(
                    Bucket::Handlers,
                    EmittedMethod {
                        kind: MethodKind::Method,
                        name: method.name.clone(),
                        params: rewritten.params,
                        body: rewritten.body,
                        is_async: method.is_async,
                        is_generator: method.is_generator,
                    },
                );
            }
            MethodRole::LifecycleHook(lifecycle) => {
                let emitted = map_hook(*lifecycle, method, &rewriter, template)?;
                accumulator.push(Bucket::Lifecycle(*lifecycle), emitted);
            }
            MethodRole::DerivedValue => {}
            MethodRole::Unsupported(name) => {
                tracing::warn!(method = %name, "skipping unsupported method");
                notices.push(Notice::info(
                    format!("The {name} method may not be supported now"),
                    script.line_col(method.span.lo),
                ));
            }
        }
    }

    let render = Bucket::Lifecycle(Lifecycle::Render);
    let has_render = accumulator.class_methods.contains_key(&render);
    if let Some(markup) = template.filter(|_| !has_render) {
        accumulator.push(
            render,
            EmittedMethod {
                kind: MethodKind::Method,
                name: SmolStr::new_static(Lifecycle::Render.target_method()),
                params: String::new(),
                body: render_body(markup),
                is_async: false,
                is_generator: false,
            },
        );
    }

    for (bucket, methods) in &accumulator.class_methods {
        tracing::debug!(bucket = bucket.name(), methods = methods.len(), "filled bucket");
    }
    Ok(accumulator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_methods;
    use crate::component::find_component_object;
    use crate::script::ScriptSyntax;
    use crate::state::{collect_state, CollectOptions};
    use pretty_assertions::assert_eq;

    fn translate_source(
        source: &str,
        template: Option<&str>,
    ) -> (TranslationAccumulator, Vec<Notice>) {
        let script = Script::parse(source, ScriptSyntax::default(), 0).unwrap();
        let component = find_component_object(script.module()).unwrap();
        let mut notices = Vec::new();
        let state =
            collect_state(component, &script, CollectOptions::default(), &mut notices).unwrap();
        let classified = classify_methods(component, &state);
        let accumulator = translate(&classified, &state, &script, template, &mut notices).unwrap();
        (accumulator, notices)
    }

    fn names(methods: &[EmittedMethod]) -> Vec<&str> {
        methods.iter().map(|method| method.name.as_str()).collect()
    }

    #[test]
    fn test_fills_buckets() {
        let (accumulator, notices) = translate_source(
            "import a from 'a'
export default {
  data() { return { n: 0 } },
  methods: { inc() { this.n++ }, reset: function () { this.n = 0 } },
  mounted() { this.inc() },
  beforeDestroy() {},
}",
            None,
        );
        assert!(notices.is_empty());
        assert_eq!(accumulator.imports.len(), 1);
        assert_eq!(names(accumulator.methods(Bucket::Handlers)), ["inc", "reset"]);
        assert_eq!(
            accumulator.methods(Bucket::Handlers)[0].body,
            "{ this.state.n++ }"
        );
        assert_eq!(
            names(accumulator.methods(Bucket::Lifecycle(Lifecycle::Mounted))),
            ["componentDidMount"]
        );
        assert_eq!(
            names(accumulator.methods(Bucket::Lifecycle(Lifecycle::BeforeDestroy))),
            ["componentWillUnmount"]
        );
        assert!(accumulator
            .methods(Bucket::Lifecycle(Lifecycle::Created))
            .is_empty());
    }

    #[test]
    fn test_unsupported_methods_are_reported_and_dropped() {
        let (accumulator, notices) = translate_source(
            "export default {\n  methods: { go() {} },\n  watch() { this.go() },\n}",
            None,
        );
        assert_eq!(notices.len(), 1);
        assert_eq!(
            notices[0].to_string(),
            "[info] 3:3 The watch method may not be supported now"
        );
        let translated: Vec<&str> = accumulator
            .class_methods
            .values()
            .flat_map(|methods| names(methods))
            .collect();
        assert_eq!(translated, ["go"]);
    }

    #[test]
    fn test_render_params_are_dropped() {
        let (accumulator, _) =
            translate_source("export default { render(h) { return h('div') } }", None);
        let render = &accumulator.methods(Bucket::Lifecycle(Lifecycle::Render))[0];
        assert_eq!(render.params, "");
        assert_eq!(render.body, "{ return h('div') }");
    }

    #[test]
    fn test_template_replaces_render_body() {
        let (accumulator, _) = translate_source(
            "export default { render(h) { return h('div') } }",
            Some("<p>{ msg }</p>"),
        );
        let render = accumulator.methods(Bucket::Lifecycle(Lifecycle::Render));
        assert_eq!(render.len(), 1);
        assert_eq!(render[0].body, "{\n  return (\n    <p>{ msg }</p>\n  );\n}");
    }

    #[test]
    fn test_template_synthesises_render() {
        let (accumulator, _) = translate_source("export default {}", Some("<br/>"));
        let render = accumulator.methods(Bucket::Lifecycle(Lifecycle::Render));
        assert_eq!(names(render), ["render"]);
    }

    #[test]
    fn test_renders_members() {
        let method = EmittedMethod {
            kind: MethodKind::Method,
            name: SmolStr::new("load"),
            params: "id".to_string(),
            body: "{\n      return id\n    }".to_string(),
            is_async: true,
            is_generator: false,
        };
        assert_eq!(method.render("  "), "  async load(id) {\n    return id\n  }");

        let getter = EmittedMethod {
            kind: MethodKind::Getter,
            name: SmolStr::new("full-name"),
            params: String::new(),
            body: "{ return 1 }".to_string(),
            is_async: false,
            is_generator: false,
        };
        assert_eq!(getter.render("  "), "  get 'full-name'() { return 1 }");
    }
}
