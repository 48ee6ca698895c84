//! JSON conformance engine
//!
//! Two structurally parallel halves over the same schema entities:
//!
//! - [`validate`]: a streaming check of an arbitrary JSON payload against a
//!   [`Param`](crate::schema::Param) tree, reporting
//!   [`FormatError`](crate::core::FormatError)s located by field path.
//! - [`generate`]: fabrication of a schema-conformant JSON sample, used for
//!   mock responses and documentation examples.
//!
//! Both are pure over immutable schema data and safe to run from many
//! workers at once.

pub mod generate;
pub mod token;
pub mod validate;

pub use generate::{generate, GenerateOptions};
pub use validate::validate;
