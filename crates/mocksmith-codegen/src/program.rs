//! Intermediate form of a generated module.
//!
//! Lowering does not emit text: it produces a small synthesis program
//! per declaration, which the evaluator interprets against a caller's
//! partial data and RNG. The program is what a printed artifact would
//! contain, minus the syntax.

use serde_json::Value;

use mocksmith_runtime::RuntimeSchema;

use crate::imports::ConsolidatedImport;

/// One synthesis step. Evaluation of an expression yields a JSON
/// value, or nothing for [`SynthExpr::Undefined`].
#[derive(Debug, Clone, PartialEq)]
pub enum SynthExpr {
    /// A fixed value, emitted verbatim.
    Literal(Value),
    /// The explicit absence of a value. Distinct from `Literal(null)`;
    /// inside an object it means the property is left out.
    Undefined,
    /// A faked value drawn from the RNG.
    Fake(FakeKind),
    Object(Vec<PropertyInit>),
    /// Fixed-arity sequence, one expression per slot.
    Tuple(Vec<SynthExpr>),
    /// Repeated element with a caller-overridable length.
    Many {
        element: Box<SynthExpr>,
        /// Property of the provided root value whose array length
        /// overrides the random count; `None` means the root itself.
        length_from: Option<String>,
    },
    /// Weighted pick among alternatives, biased by provided data.
    Union(Vec<UnionBranch>),
    /// Invocation of another generated function, by function name.
    /// Partial data is never forwarded through these calls.
    Call(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInit {
    pub name: String,
    pub value: SynthExpr,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionBranch {
    pub schema: RuntimeSchema,
    pub body: SynthExpr,
}

/// The catalog of fakeable leaf values. Hint resolution happens at
/// lowering time, so each variant maps to exactly one faker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeKind {
    Alpha,
    Int,
    Bool,
    FirstName,
    MiddleName,
    LastName,
    FullName,
    CompanyName,
    CurrencyCode,
    Uuid,
    Url,
    Avatar,
    DateTime,
}

/// How caller-provided data interacts with the synthesized default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passthrough {
    /// Deep-merge provided data over the synthesized value.
    Merge,
    /// Provided data is returned verbatim; synthesis only runs when
    /// nothing usable was provided. Used for union declarations.
    Verbatim,
    /// Like `Verbatim`, but an explicitly provided undefined is also
    /// honored. Used when undefined is a member of the declared type.
    VerbatimOrUndefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFunction {
    /// Callable name, e.g. `generateUser`.
    pub name: String,
    /// The declaration this function synthesizes values for.
    pub type_name: String,
    pub root: SynthExpr,
    pub passthrough: Passthrough,
    /// Optional property names eligible for random omission. Empty
    /// when omission is disabled or the root is not an object.
    pub omittable_properties: Vec<String>,
}

/// Lowered form of one source file: its generator functions plus the
/// consolidated imports a printed artifact would carry.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedModule {
    /// Output module name derived from the source file name.
    pub name: String,
    /// Path of the source file the declarations came from.
    pub source_path: String,
    pub imports: Vec<ConsolidatedImport>,
    pub functions: Vec<GeneratedFunction>,
}

impl GeneratedModule {
    pub fn function(&self, name: &str) -> Option<&GeneratedFunction> {
        self.functions.iter().find(|function| function.name == name)
    }
}
