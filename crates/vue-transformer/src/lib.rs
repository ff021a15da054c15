//! Vue options-object components to React class components.
//!
//! The transform runs in separate passes over an explicit per-call state:
//! - Collecting the declarative slots (`props`, `data`, `computed`, `components`)
//! - Classifying every method (handler, lifecycle hook, derived value, unsupported)
//! - Rewriting `this.<name>` accesses and translating methods into buckets
//! - Assembling the class declaration in a fixed member order
//!
//! # Example
//!
//! ```
//! use vue_transformer::{transform, TransformOptions};
//!
//! let source = r#"
//! export default {
//!   name: 'counter',
//!   data() { return { count: 0 } },
//!   methods: { inc() { this.count++ } },
//! }
//! "#;
//!
//! let result = transform(source, TransformOptions::default()).unwrap();
//! assert_eq!(result.component_name, "Counter");
//! assert!(result.script.contains("inc() { this.state.count++ }"));
//! ```

mod accumulator;
mod assemble;
mod classify;
mod component;
mod emit;
mod error;
mod lifecycle;
mod naming;
mod notice;
mod rewrite;
mod script;
mod state;
mod template;
mod transform;

pub use accumulator::{Bucket, EmittedMethod, MethodKind, TranslationAccumulator};
pub use classify::{classify, ClassifiedMethod, MethodRole, MethodSite};
pub use error::TransformError;
pub use lifecycle::Lifecycle;
pub use naming::class_name;
pub use notice::{Notice, Severity};
pub use state::{ComponentState, Slot};
pub use template::escape_template;
pub use transform::{transform, SourceMode, TransformOptions, TransformResult};
