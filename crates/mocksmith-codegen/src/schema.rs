use std::collections::BTreeMap;

use mocksmith_entity::{ArrayElements, Entity, LiteralValue};
use mocksmith_runtime::{
    ArrayElementsSchema, ArraySchema, LiteralSchema, ObjectSchema, PrimitiveSchema, PrimitiveType,
    PropertyInfo, ReferenceSchema, RuntimeSchema, SchemaLiteral, UnionSchema,
};

/// Project an entity onto its runtime schema.
///
/// This is a total function: entities with no call-time shape
/// (intersections, utilities, enums) collapse to `any` rather than
/// failing, since the scorer treats `any` as always compatible.
pub fn entity_to_schema(entity: &Entity) -> RuntimeSchema {
    match entity {
        Entity::Object(object) => {
            let mut properties = BTreeMap::new();
            let mut required_properties = Vec::new();
            let mut optional_properties = Vec::new();

            for property in &object.properties {
                properties.insert(
                    property.name.clone(),
                    PropertyInfo {
                        schema: entity_to_schema(&property.property),
                        optional: property.optional,
                    },
                );
                if property.optional {
                    optional_properties.push(property.name.clone());
                } else {
                    required_properties.push(property.name.clone());
                }
            }

            RuntimeSchema::Object(ObjectSchema {
                properties,
                required_properties,
                optional_properties,
            })
        }
        Entity::Array(array) => {
            let elements = match &array.elements {
                ArrayElements::Shared(element) => {
                    ArrayElementsSchema::Shared(Box::new(entity_to_schema(element)))
                }
                ArrayElements::Slots(slots) => {
                    ArrayElementsSchema::Slots(slots.iter().map(entity_to_schema).collect())
                }
            };
            RuntimeSchema::Array(ArraySchema {
                tuple: array.tuple,
                elements,
                readonly: array.readonly,
            })
        }
        Entity::Union(union) => RuntimeSchema::Union(UnionSchema {
            members: union.values.iter().map(entity_to_schema).collect(),
        }),
        Entity::Literal { value } => RuntimeSchema::Literal(LiteralSchema {
            value: literal_to_schema(value),
        }),
        Entity::BooleanLiteral { value } => RuntimeSchema::Literal(LiteralSchema {
            value: SchemaLiteral::Bool(*value),
        }),
        Entity::String => primitive(PrimitiveType::String),
        Entity::Number => primitive(PrimitiveType::Number),
        Entity::Boolean => primitive(PrimitiveType::Boolean),
        Entity::Any => primitive(PrimitiveType::Any),
        Entity::Unknown => primitive(PrimitiveType::Unknown),
        Entity::Reference(reference) => RuntimeSchema::Reference(ReferenceSchema {
            reference: reference.reference.clone(),
        }),
        Entity::Alias(alias) => RuntimeSchema::Reference(ReferenceSchema {
            reference: alias.alias.clone(),
        }),
        // Wrappers project through to what they wrap.
        Entity::Declaration(declaration) => entity_to_schema(&declaration.declaration),
        Entity::ObjectProperty(property) => entity_to_schema(&property.property),
        // No call-time shape.
        Entity::Anonymous
        | Entity::Never
        | Entity::EnumLiteral
        | Entity::Enum(_)
        | Entity::Utility
        | Entity::Intersection
        | Entity::File(_) => primitive(PrimitiveType::Any),
    }
}

fn primitive(primitive_type: PrimitiveType) -> RuntimeSchema {
    RuntimeSchema::Primitive(PrimitiveSchema { primitive_type })
}

fn literal_to_schema(value: &LiteralValue) -> SchemaLiteral {
    match value {
        LiteralValue::Null => SchemaLiteral::Null,
        LiteralValue::Undefined => SchemaLiteral::Undefined,
        LiteralValue::Number(number) => SchemaLiteral::Number(*number),
        LiteralValue::String(string) => SchemaLiteral::String(string.clone()),
        LiteralValue::BigInt(number) => SchemaLiteral::Number(*number as f64),
    }
}
