//! kotfix-rules: Kotlin inspection rule implementations
//!
//! Available rules:
//! - accessor_override: Flag properties whose `override` modifier binds to
//!   nothing but whose accessor names collide with `getX`/`isX`/`setX`
//!   methods of a Java supertype, with a fix that rewrites the property
//!   into explicit accessor functions

pub mod accessor_override;
pub mod registry;

pub use accessor_override::{check_accessor_override, AccessorOverrideRule, PropertyToAccessors};
pub use registry::{Rule, RuleRegistry};
