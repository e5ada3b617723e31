//! Call-time support for generated example-value functions.
//!
//! Everything in this crate executes inside the generated artifact,
//! not at generation time: the serializable runtime schema, the union
//! compatibility scorer and weighted selector, and the structural
//! merge that folds caller-supplied partial values over synthesized
//! defaults.
//!
//! All random decisions take an explicit `rand::Rng` handle; there is
//! no process-global RNG state, so two seeded generation calls on
//! separate threads cannot interfere as long as each carries its own
//! handle.

pub mod compat;
pub mod error;
pub mod merge;
pub mod schema;
pub mod select;

pub use compat::{
    CompatibilityOptions, CompatibilityResult, calculate_compatibility,
    calculate_union_member_compatibility, is_compatible,
};
pub use error::RuntimeError;
pub use merge::{ArrayMergeMode, MergeOptions, Provided, merge};
pub use schema::{
    ArrayElementsSchema, ArraySchema, LiteralSchema, ObjectSchema, PrimitiveSchema, PrimitiveType,
    PropertyInfo, ReferenceSchema, RuntimeSchema, SchemaLiteral, UnionSchema,
};
pub use select::{SelectOptions, UnionMember, choose_union_index, select_from_union};
