//! Exhaustive lowering of entities to synthesis programs.
//!
//! Every entity variant has exactly one arm here; adding a variant to
//! the model fails compilation until this match learns about it.

use heck::ToUpperCamelCase;
use serde_json::{Number, Value, json};
use tracing::{trace, warn};

use mocksmith_entity::{ArrayElements, DeclarationEntity, Entity, LiteralValue};

use crate::context::Context;
use crate::errors::CodegenError;
use crate::hints::{Hint, HintKind, NamePart};
use crate::imports::{ImportRecorder, ImportSpecifier, NamedImport};
use crate::module::CodegenOptions;
use crate::program::{
    FakeKind, GeneratedFunction, Passthrough, PropertyInit, SynthExpr, UnionBranch,
};
use crate::schema::entity_to_schema;

/// Name of the runtime support package a printed artifact would
/// import `merge` and `selectFromUnion` from.
const RUNTIME_SPECIFIER: &str = "mocksmith-runtime";

pub fn function_name(declaration_name: &str) -> String {
    format!("generate{}", declaration_name.to_upper_camel_case())
}

/// Lower one declaration into its generated function.
pub fn lower_declaration<'a>(
    declaration: &'a DeclarationEntity,
    file_context: &Context<'a>,
    options: &CodegenOptions,
    imports: &mut ImportRecorder,
) -> Result<GeneratedFunction, CodegenError> {
    trace!(declaration = %declaration.name, kind = declaration.declaration.kind(), "lowering declaration");

    imports.record(ImportSpecifier {
        specifier: file_context.file().path.clone(),
        named: vec![NamedImport {
            name: declaration.name.clone(),
            type_only: true,
        }],
        clause: None,
        type_only: false,
    });

    let can_be_undefined = match declaration.declaration.as_ref() {
        Entity::Union(union) => union.values.iter().any(|value| {
            matches!(
                value,
                Entity::Literal {
                    value: LiteralValue::Undefined
                }
            )
        }),
        _ => false,
    };

    let passthrough = if can_be_undefined {
        Passthrough::VerbatimOrUndefined
    } else if matches!(declaration.declaration.as_ref(), Entity::Union(_)) {
        Passthrough::Verbatim
    } else {
        imports.record(ImportSpecifier {
            specifier: RUNTIME_SPECIFIER.to_string(),
            named: vec![NamedImport {
                name: "merge".to_string(),
                type_only: false,
            }],
            clause: None,
            type_only: false,
        });
        Passthrough::Merge
    };

    let at_declaration = file_context.descend_declaration(declaration);
    // Union declarations keep the surrounding identifier; everything
    // else anchors provided-length lookups on the declaration itself.
    let at_declaration = match passthrough {
        Passthrough::Verbatim => at_declaration,
        _ => at_declaration.with_closest_identifier(&declaration.name),
    };
    let body_context = at_declaration.descend(&declaration.declaration);
    let root = synthesize(&declaration.declaration, &body_context, imports)?;

    let omittable_properties = match declaration.declaration.as_ref() {
        Entity::Object(object) if options.exact_optional_properties => object
            .properties
            .iter()
            .filter(|property| property.optional)
            .map(|property| property.name.clone())
            .collect(),
        _ => Vec::new(),
    };

    Ok(GeneratedFunction {
        name: function_name(&declaration.name),
        type_name: declaration.name.clone(),
        root,
        passthrough,
        omittable_properties,
    })
}

/// Lower one entity at an already-descended context.
pub fn synthesize<'a>(
    entity: &'a Entity,
    context: &Context<'a>,
    imports: &mut ImportRecorder,
) -> Result<SynthExpr, CodegenError> {
    match entity {
        Entity::String => Ok(SynthExpr::Fake(string_fake(context.hints()))),
        Entity::Number => Ok(SynthExpr::Fake(FakeKind::Int)),
        Entity::Boolean => Ok(SynthExpr::Fake(FakeKind::Bool)),
        // The literal's value is ignored and a coin flip generated
        // instead; callers pin the value through provided data.
        Entity::BooleanLiteral { .. } => Ok(SynthExpr::Fake(FakeKind::Bool)),
        Entity::Literal { value } => lower_literal(value),

        // Placeholder leaves name themselves, so an unexpected one in
        // output is traceable to its entity kind.
        Entity::Any => Ok(placeholder(entity, json!("any"))),
        Entity::Unknown => Ok(placeholder(entity, json!("unknown"))),
        Entity::Never => Ok(placeholder(entity, json!("never"))),
        Entity::Anonymous => Ok(placeholder(entity, json!("anonymous"))),
        Entity::EnumLiteral => Ok(placeholder(entity, json!("enumLiteral"))),
        Entity::Enum(_) => Ok(placeholder(entity, json!("enum"))),
        Entity::Intersection => Ok(placeholder(entity, json!({ "intersection": true }))),
        Entity::Utility => Ok(placeholder(entity, json!({ "utility": true }))),

        Entity::Array(array) => match &array.elements {
            ArrayElements::Shared(element) => {
                let declaration = context.parent_declaration().ok_or_else(|| {
                    CodegenError::MissingDeclarationContext("array of shared elements".to_string())
                })?;
                let length_from = context
                    .closest_identifier()
                    .filter(|name| *name != declaration.name)
                    .map(str::to_string);
                let inner = context.descend(element);
                Ok(SynthExpr::Many {
                    element: Box::new(synthesize(element, &inner, imports)?),
                    length_from,
                })
            }
            ArrayElements::Slots(slots) => {
                let elements = slots
                    .iter()
                    .map(|slot| synthesize(slot, &context.descend(slot), imports))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SynthExpr::Tuple(elements))
            }
        },

        Entity::Object(object) => {
            let properties = object
                .properties
                .iter()
                .map(|property| {
                    let at_property = context.descend_property(property);
                    let at_value = at_property
                        .with_closest_identifier(&property.name)
                        .descend(&property.property);
                    Ok(PropertyInit {
                        name: property.name.clone(),
                        value: synthesize(&property.property, &at_value, imports)?,
                        optional: property.optional,
                    })
                })
                .collect::<Result<Vec<_>, CodegenError>>()?;
            Ok(SynthExpr::Object(properties))
        }

        Entity::ObjectProperty(property) => {
            let at_value = context
                .with_closest_identifier(&property.name)
                .descend(&property.property);
            synthesize(&property.property, &at_value, imports)
        }

        Entity::Union(union) => {
            imports.record(ImportSpecifier {
                specifier: RUNTIME_SPECIFIER.to_string(),
                named: vec![NamedImport {
                    name: "selectFromUnion".to_string(),
                    type_only: false,
                }],
                clause: None,
                type_only: false,
            });
            let branches = union
                .values
                .iter()
                .map(|value| {
                    Ok(UnionBranch {
                        schema: entity_to_schema(value),
                        body: synthesize(value, &context.descend(value), imports)?,
                    })
                })
                .collect::<Result<Vec<_>, CodegenError>>()?;
            Ok(SynthExpr::Union(branches))
        }

        // Aliases and references resolve through the target's own
        // generated function; provided data stops here.
        Entity::Alias(alias) => Ok(SynthExpr::Call(function_name(&alias.alias))),
        Entity::Reference(reference) => {
            if reference.reference == "Date" {
                Ok(SynthExpr::Fake(FakeKind::DateTime))
            } else {
                Ok(SynthExpr::Call(function_name(&reference.reference)))
            }
        }

        // Declarations and files in value position mean the caller
        // skipped validation; refuse rather than guess a value.
        Entity::Declaration(_) | Entity::File(_) => {
            Err(CodegenError::UnexpectedNode(entity.kind().to_string()))
        }
    }
}

fn placeholder(entity: &Entity, value: Value) -> SynthExpr {
    warn!(kind = entity.kind(), "no generator for entity, synthesizing placeholder");
    SynthExpr::Literal(value)
}

fn lower_literal(value: &LiteralValue) -> Result<SynthExpr, CodegenError> {
    match value {
        LiteralValue::Null => Ok(SynthExpr::Literal(Value::Null)),
        LiteralValue::Undefined => Ok(SynthExpr::Undefined),
        LiteralValue::String(string) => Ok(SynthExpr::Literal(Value::String(string.clone()))),
        LiteralValue::Number(number) => Number::from_f64(*number)
            .map(|number| SynthExpr::Literal(Value::Number(number)))
            .ok_or_else(|| CodegenError::UnsupportedLiteral(format!("non-finite number {number}"))),
        LiteralValue::BigInt(number) => Err(CodegenError::UnsupportedLiteral(format!(
            "bigint {number}"
        ))),
    }
}

/// Resolve which faker a string leaf uses, from the hints visible at
/// the leaf.
fn string_fake(hints: &[Hint]) -> FakeKind {
    let name_hint = hints.iter().find_map(|hint| match hint.kind {
        HintKind::Name(part) if hint.level <= 1 => Some((part, hint.level)),
        _ => None,
    });
    if let Some((part, level)) = name_hint {
        let company_flavored = hints
            .iter()
            .any(|hint| hint.kind == HintKind::Company && hint.level >= level);
        if company_flavored {
            return FakeKind::CompanyName;
        }
        return match part {
            NamePart::First => FakeKind::FirstName,
            NamePart::Middle => FakeKind::MiddleName,
            NamePart::Last => FakeKind::LastName,
            NamePart::Full | NamePart::Generic => FakeKind::FullName,
        };
    }

    if hints
        .iter()
        .any(|hint| hint.kind == HintKind::CurrencyCode && hint.level <= 1)
    {
        return FakeKind::CurrencyCode;
    }
    if hints
        .iter()
        .any(|hint| hint.kind == HintKind::Id && hint.level == 1)
    {
        return FakeKind::Uuid;
    }
    if let Some(url) = hints
        .iter()
        .find(|hint| hint.kind == HintKind::Url && hint.level <= 1)
    {
        let avatar_nearby = hints
            .iter()
            .any(|hint| hint.kind == HintKind::Avatar && hint.level <= url.level + 2);
        return if avatar_nearby {
            FakeKind::Avatar
        } else {
            FakeKind::Url
        };
    }
    if hints
        .iter()
        .any(|hint| hint.kind == HintKind::Avatar && hint.level <= 3)
    {
        return FakeKind::Avatar;
    }
    FakeKind::Alpha
}
