//! Entity model for mocksmith.
//!
//! This crate defines the closed set of tagged variants representing a
//! parsed, resolved type graph, as produced by an external front-end
//! (a type-checker traversal) and consumed by the codegen dispatch
//! engine. Entities are pure data: immutable once built, serializable,
//! with no behavior beyond well-formedness validation.

pub mod entity;
pub mod error;
pub mod validation;

pub use entity::{
    AliasEntity, ArrayElements, ArrayEntity, DeclarationEntity, Entity, EnumEntity, FileEntity,
    LiteralValue, ObjectEntity, ObjectPropertyEntity, ReferenceEntity, UnionEntity,
};
pub use error::{EntityError, Result};
pub use validation::{ValidationFinding, validate_file};
