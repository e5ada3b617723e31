use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A node in the resolved type graph.
///
/// This is a strictly finite closed sum type: every consumer must
/// handle every variant exhaustively. The serialized form uses a
/// `type` discriminator so trees round-trip against the front-end's
/// discriminated-union output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Entity {
    String,
    Number,
    Boolean,
    Any,
    Unknown,
    Never,
    Anonymous,
    EnumLiteral,
    BooleanLiteral { value: bool },
    Literal { value: LiteralValue },
    Array(ArrayEntity),
    Object(ObjectEntity),
    ObjectProperty(ObjectPropertyEntity),
    Union(UnionEntity),
    Alias(AliasEntity),
    Reference(ReferenceEntity),
    Enum(EnumEntity),
    Intersection,
    Utility,
    Declaration(DeclarationEntity),
    File(FileEntity),
}

impl Entity {
    /// The variant tag, as it appears in serialized trees. Used for
    /// diagnostics only; dispatch always goes through a full match.
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::String => "string",
            Entity::Number => "number",
            Entity::Boolean => "boolean",
            Entity::Any => "any",
            Entity::Unknown => "unknown",
            Entity::Never => "never",
            Entity::Anonymous => "anonymous",
            Entity::EnumLiteral => "enumLiteral",
            Entity::BooleanLiteral { .. } => "booleanLiteral",
            Entity::Literal { .. } => "literal",
            Entity::Array(_) => "array",
            Entity::Object(_) => "object",
            Entity::ObjectProperty(_) => "objectProperty",
            Entity::Union(_) => "union",
            Entity::Alias(_) => "alias",
            Entity::Reference(_) => "reference",
            Entity::Enum(_) => "enum",
            Entity::Intersection => "intersection",
            Entity::Utility => "utility",
            Entity::Declaration(_) => "declaration",
            Entity::File(_) => "file",
        }
    }
}

/// Value carried by a `literal` entity.
///
/// `BigInt` exists because the front-end can produce it; synthesis
/// rejects it as unsupported rather than degrading silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum LiteralValue {
    Null,
    Undefined,
    Number(f64),
    String(String),
    BigInt(i64),
}

impl LiteralValue {
    pub fn kind(&self) -> &'static str {
        match self {
            LiteralValue::Null => "null",
            LiteralValue::Undefined => "undefined",
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
            LiteralValue::BigInt(_) => "bigint",
        }
    }
}

/// Array or tuple shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArrayEntity {
    pub readonly: bool,
    /// Tuples carry one entity per slot in declared order; plain
    /// arrays carry a single element entity shared by all slots.
    pub tuple: bool,
    pub elements: ArrayElements,
}

/// Element storage for [`ArrayEntity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ArrayElements {
    Shared(Box<Entity>),
    Slots(Vec<Entity>),
}

/// A keyed structure with ordered properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectEntity {
    pub properties: Vec<ObjectPropertyEntity>,
}

/// A single named property of an object entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectPropertyEntity {
    pub name: String,
    pub property: Box<Entity>,
    pub optional: bool,
}

/// An ordered set of alternative shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UnionEntity {
    pub values: Vec<Entity>,
}

/// A named pointer to another declaration, not yet resolved to a
/// concrete shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AliasEntity {
    pub alias: String,
}

/// A resolved back-edge to a named declaration. References are the
/// only legal cycle in an entity tree; they are resolved by calling
/// the referenced declaration's generated function, never by inlining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceEntity {
    pub reference: String,
}

/// Degenerate enum shape; generators render a fixed placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumEntity {
    pub properties: Vec<ObjectPropertyEntity>,
}

/// A top-level named type binding. Declarations are never nested
/// inside another entity as a value; each one becomes exactly one
/// generated public entry-point function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DeclarationEntity {
    pub name: String,
    pub exported: bool,
    pub declaration: Box<Entity>,
}

/// Root container, one per source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileEntity {
    pub name: String,
    pub path: String,
    pub type_declarations: Vec<DeclarationEntity>,
}
