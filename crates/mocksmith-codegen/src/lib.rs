//! Lowering of entity trees into example-value generator modules.
//!
//! A [`FileEntity`](mocksmith_entity::FileEntity) goes in, a
//! [`GeneratedModule`] comes out: one generator function per
//! declaration, an import manifest, and a synthesis program that
//! [`GeneratedModule::generate`] interprets with an explicit seeded
//! RNG. Identifier hints decide which faker each string leaf uses,
//! and union members are scored against caller data through the
//! runtime crate's compatibility scorer.

pub mod context;
pub mod dispatch;
pub mod errors;
pub mod eval;
mod fakes;
pub mod hints;
pub mod imports;
pub mod module;
pub mod program;
pub mod schema;

pub use context::Context;
pub use dispatch::{function_name, lower_declaration, synthesize};
pub use errors::{CodegenError, EvalError};
pub use eval::{GenerateOptions, Seed};
pub use hints::{Hint, HintKind, NamePart};
pub use imports::{ConsolidatedImport, ImportRecorder, ImportSpecifier, NamedImport};
pub use module::{CodegenOptions, codegen_file};
pub use program::{
    FakeKind, GeneratedFunction, GeneratedModule, Passthrough, PropertyInit, SynthExpr,
    UnionBranch,
};
pub use schema::entity_to_schema;
