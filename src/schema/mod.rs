//! The document schema: typed entities and their validation rules
//!
//! Pure data plus predicates, no I/O. Entities are created by the codec
//! during decode, validated there, and immutable afterwards; the JSON
//! conformance engine shares them read-only.

pub mod callback;
pub mod description;
pub mod param;
pub mod request;
pub mod types;

pub use callback::Callback;
pub use description::Description;
pub use param::{duplicate_enums, duplicate_items, Enum, Param};
pub use request::{Example, Request};
pub use types::{Semver, Status, Type};
