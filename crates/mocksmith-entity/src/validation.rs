use std::collections::BTreeSet;

use crate::entity::{ArrayElements, Entity, FileEntity};
use crate::error::{EntityError, Result};

/// Soft validation finding for a file entity.
///
/// Findings do not fail validation: an alias or reference may point at
/// a declaration living in another source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFinding {
    pub code: &'static str,
    pub message: String,
}

/// Validate internal consistency of a file entity.
///
/// This checks:
/// - duplicate declaration names
/// - `declaration` / `file` variants nested inside a value position
/// - dangling `alias`/`reference` targets (reported as findings)
pub fn validate_file(file: &FileEntity) -> Result<Vec<ValidationFinding>> {
    let mut names = BTreeSet::new();
    for declaration in &file.type_declarations {
        if !names.insert(declaration.name.as_str()) {
            return Err(EntityError::Invalid(format!(
                "duplicate declaration name: {}.{}",
                file.name, declaration.name
            )));
        }
    }

    let mut findings = Vec::new();
    for declaration in &file.type_declarations {
        walk_value(
            &declaration.declaration,
            &declaration.name,
            &names,
            &mut findings,
        )?;
    }

    Ok(findings)
}

fn walk_value(
    entity: &Entity,
    declaration_name: &str,
    names: &BTreeSet<&str>,
    findings: &mut Vec<ValidationFinding>,
) -> Result<()> {
    match entity {
        Entity::Declaration(_) | Entity::File(_) => {
            return Err(EntityError::Invalid(format!(
                "'{}' nested inside declaration '{}'",
                entity.kind(),
                declaration_name
            )));
        }
        Entity::Alias(alias) => {
            if !names.contains(alias.alias.as_str()) {
                findings.push(dangling("dangling_alias", &alias.alias, declaration_name));
            }
        }
        Entity::Reference(reference) => {
            // `Date` is a built-in, synthesized directly.
            if reference.reference != "Date" && !names.contains(reference.reference.as_str()) {
                findings.push(dangling(
                    "dangling_reference",
                    &reference.reference,
                    declaration_name,
                ));
            }
        }
        Entity::Array(array) => match &array.elements {
            ArrayElements::Shared(element) => {
                walk_value(element, declaration_name, names, findings)?;
            }
            ArrayElements::Slots(slots) => {
                for slot in slots {
                    walk_value(slot, declaration_name, names, findings)?;
                }
            }
        },
        Entity::Object(object) => {
            for property in &object.properties {
                walk_value(&property.property, declaration_name, names, findings)?;
            }
        }
        Entity::ObjectProperty(property) => {
            walk_value(&property.property, declaration_name, names, findings)?;
        }
        Entity::Union(union) => {
            for value in &union.values {
                walk_value(value, declaration_name, names, findings)?;
            }
        }
        Entity::Enum(enum_entity) => {
            for property in &enum_entity.properties {
                walk_value(&property.property, declaration_name, names, findings)?;
            }
        }
        Entity::String
        | Entity::Number
        | Entity::Boolean
        | Entity::Any
        | Entity::Unknown
        | Entity::Never
        | Entity::Anonymous
        | Entity::EnumLiteral
        | Entity::BooleanLiteral { .. }
        | Entity::Literal { .. }
        | Entity::Intersection
        | Entity::Utility => {}
    }
    Ok(())
}

fn dangling(code: &'static str, target: &str, declaration_name: &str) -> ValidationFinding {
    ValidationFinding {
        code,
        message: format!("'{target}' not declared in this file (used by '{declaration_name}')"),
    }
}
