//! Method classification.
//!
//! Every function-like member of the component object is visited once and
//! given a [`MethodRole`]. Nothing is rewritten here; translation consumes
//! the classified list afterwards.

use crate::component::{entries, unparen, EntryValue, Method};
use crate::lifecycle::Lifecycle;
use crate::state::ComponentState;
use smol_str::SmolStr;
use swc_ecma_ast::{Expr, ObjectLit};

/// Slot holding plain handlers.
const HANDLERS_SLOT: &str = "methods";

/// Slots whose functions are not component methods.
const SKIPPED_SLOTS: &[&str] = &["props", "components"];

/// A method together with the slot that encloses it.
#[derive(Debug, Clone)]
pub struct MethodSite {
    /// The method.
    pub method: Method,
    /// Key of the enclosing slot; `None` for members of the component object itself.
    pub slot: Option<SmolStr>,
}

/// What a method turns into on the target class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodRole {
    /// A plain method, declared under `methods`.
    Handler,
    /// A lifecycle hook with a fixed target method.
    LifecycleHook(Lifecycle),
    /// `data` or a computed; already handled by state collection.
    DerivedValue,
    /// Nothing the converter knows how to translate.
    Unsupported(SmolStr),
}

/// A method site and its role.
#[derive(Debug, Clone)]
pub struct ClassifiedMethod {
    /// The method site.
    pub site: MethodSite,
    /// The role it was given.
    pub role: MethodRole,
}

/// Lists the method sites of the component object in source order.
///
/// Sites are the function-like members of the object itself, and those one
/// level inside an object-valued slot (`methods`, `computed`, `watch`, ...).
pub fn method_sites(component: &ObjectLit) -> Vec<MethodSite> {
    let mut sites = Vec::new();

    for (key, value, span) in entries(component) {
        if let Some(method) = Method::from_entry(key.clone(), value, span) {
            sites.push(MethodSite { method, slot: None });
            continue;
        }
        if SKIPPED_SLOTS.contains(&key.as_str()) {
            continue;
        }
        let EntryValue::Expr(expr) = value else {
            continue;
        };
        let Expr::Object(slot) = unparen(expr) else {
            continue;
        };

        sites.extend(
            entries(slot)
                .into_iter()
                .filter_map(|(name, value, span)| Method::from_entry(name, value, span))
                .map(|method| MethodSite {
                    method,
                    slot: Some(key.clone()),
                }),
        );
    }

    sites
}

/// Classifies method `name` found in `slot`.
///
/// The checks run in order: the handlers slot wins over lifecycle names,
/// which win over `data` and computeds.
pub fn classify(name: &str, slot: Option<&str>, state: &ComponentState) -> MethodRole {
    if slot == Some(HANDLERS_SLOT) {
        MethodRole::Handler
    } else if let Some(lifecycle) = Lifecycle::from_hook(name) {
        MethodRole::LifecycleHook(lifecycle)
    } else if name == "data" || state.computeds.contains_key(name) {
        MethodRole::DerivedValue
    } else {
        MethodRole::Unsupported(SmolStr::new(name))
    }
}

/// Classifies every method site of the component object.
pub fn classify_methods(component: &ObjectLit, state: &ComponentState) -> Vec<ClassifiedMethod> {
    method_sites(component)
        .into_iter()
        .map(|site| {
            let role = classify(&site.method.name, site.slot.as_deref(), state);
            tracing::debug!(
                method = %site.method.name,
                slot = site.slot.as_deref().unwrap_or("-"),
                role = ?role,
                "classified method"
            );
            ClassifiedMethod { site, role }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::find_component_object;
    use crate::script::{Script, ScriptSyntax};
    use crate::state::{collect_state, CollectOptions};
    use pretty_assertions::assert_eq;

    fn classified(source: &str) -> Vec<(String, MethodRole)> {
        let script = Script::parse(source, ScriptSyntax::default(), 0).unwrap();
        let component = find_component_object(script.module()).unwrap();
        let state =
            collect_state(component, &script, CollectOptions::default(), &mut Vec::new()).unwrap();
        classify_methods(component, &state)
            .into_iter()
            .map(|method| (method.site.method.name.to_string(), method.role))
            .collect()
    }

    #[test]
    fn test_classifies_every_role() {
        let roles = classified(
            "export default {
              data() { return { count: 0 } },
              computed: { double() { return this.count * 2 } },
              methods: { inc() { this.count++ } },
              mounted() {},
              watch() {},
            }",
        );
        assert_eq!(
            roles,
            vec![
                ("data".to_string(), MethodRole::DerivedValue),
                ("double".to_string(), MethodRole::DerivedValue),
                ("inc".to_string(), MethodRole::Handler),
                (
                    "mounted".to_string(),
                    MethodRole::LifecycleHook(Lifecycle::Mounted)
                ),
                (
                    "watch".to_string(),
                    MethodRole::Unsupported(SmolStr::new("watch"))
                ),
            ]
        );
    }

    #[test]
    fn test_handlers_slot_wins_over_lifecycle_names() {
        let roles = classified("export default { methods: { created() {}, render: () => 1 } }");
        assert_eq!(
            roles,
            vec![
                ("created".to_string(), MethodRole::Handler),
                ("render".to_string(), MethodRole::Handler),
            ]
        );
    }

    #[test]
    fn test_lifecycle_hooks_in_any_function_form() {
        let roles = classified(
            "export default { created: function () {}, updated: () => {}, beforeDestroy() {} }",
        );
        let roles: Vec<_> = roles.into_iter().map(|(_, role)| role).collect();
        assert_eq!(
            roles,
            vec![
                MethodRole::LifecycleHook(Lifecycle::Created),
                MethodRole::LifecycleHook(Lifecycle::Updated),
                MethodRole::LifecycleHook(Lifecycle::BeforeDestroy),
            ]
        );
    }

    #[test]
    fn test_prop_functions_are_not_sites() {
        let roles = classified(
            "export default { props: { list: { type: Array, default: () => [] } }, components: { x() {} } }",
        );
        assert!(roles.is_empty());
    }

    #[test]
    fn test_watcher_entries_are_unsupported() {
        let roles = classified("export default { watch: { count(value) {} } }");
        assert_eq!(
            roles,
            vec![(
                "count".to_string(),
                MethodRole::Unsupported(SmolStr::new("count"))
            )]
        );
    }

    #[test]
    fn test_classify_without_state() {
        let state = ComponentState::default();
        assert_eq!(classify("data", None, &state), MethodRole::DerivedValue);
        assert_eq!(
            classify("render", None, &state),
            MethodRole::LifecycleHook(Lifecycle::Render)
        );
        assert_eq!(classify("save", Some("methods"), &state), MethodRole::Handler);
        assert_eq!(
            classify("save", None, &state),
            MethodRole::Unsupported(SmolStr::new("save"))
        );
    }
}
