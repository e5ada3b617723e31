use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializable projection of an entity, embedded into the generated
/// artifact so union members can be scored against caller data long
/// after the original entity tree is gone.
///
/// The call-time scorer only ever sees this type, never an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RuntimeSchema {
    Object(ObjectSchema),
    Array(ArraySchema),
    Union(UnionSchema),
    Literal(LiteralSchema),
    Primitive(PrimitiveSchema),
    Reference(ReferenceSchema),
}

/// Object shape: named property schemas plus explicit required and
/// optional name lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    pub properties: BTreeMap<String, PropertyInfo>,
    pub required_properties: Vec<String>,
    pub optional_properties: Vec<String>,
}

/// Schema and optionality of one object property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PropertyInfo {
    pub schema: RuntimeSchema,
    pub optional: bool,
}

/// Array shape, preserving the tuple / plain-array distinction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArraySchema {
    pub tuple: bool,
    pub elements: ArrayElementsSchema,
    #[serde(default)]
    pub readonly: bool,
}

/// Element storage for [`ArraySchema`]: one shared schema for plain
/// arrays, one schema per slot for tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ArrayElementsSchema {
    Shared(Box<RuntimeSchema>),
    Slots(Vec<RuntimeSchema>),
}

/// Nested union of member schemas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UnionSchema {
    pub members: Vec<RuntimeSchema>,
}

/// Exact-value schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LiteralSchema {
    pub value: SchemaLiteral,
}

/// Literal values representable in a runtime schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum SchemaLiteral {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
}

impl SchemaLiteral {
    /// Whether this literal admits absent data. `null` and `undefined`
    /// are indistinguishable at the value level.
    pub fn is_nullish(&self) -> bool {
        matches!(self, SchemaLiteral::Null | SchemaLiteral::Undefined)
    }

    /// Exact value equality against runtime data.
    pub fn matches(&self, data: &Value) -> bool {
        match self {
            SchemaLiteral::Null | SchemaLiteral::Undefined => data.is_null(),
            SchemaLiteral::Bool(expected) => data.as_bool() == Some(*expected),
            SchemaLiteral::Number(expected) => data.as_f64() == Some(*expected),
            SchemaLiteral::String(expected) => data.as_str() == Some(expected.as_str()),
        }
    }
}

/// Primitive runtime-type schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveSchema {
    pub primitive_type: PrimitiveType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    Any,
    Unknown,
}

/// Unresolved name-only schema; scored as a neutral pass because the
/// target's shape is not available at call time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferenceSchema {
    pub reference: String,
}
