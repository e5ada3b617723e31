use mocksmith_entity::{DeclarationEntity, Entity, FileEntity, ObjectPropertyEntity};

use crate::hints::{Hint, identifier_hints};

/// Traversal state carried down the entity tree.
///
/// A context is never mutated in place: every step of the walk derives
/// a new one, so sibling subtrees cannot observe each other's hints.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    file: &'a FileEntity,
    parent_declaration: Option<&'a DeclarationEntity>,
    closest_identifier: Option<&'a str>,
    hints: Vec<Hint>,
}

impl<'a> Context<'a> {
    pub fn for_file(file: &'a FileEntity) -> Self {
        Self {
            file,
            parent_declaration: None,
            closest_identifier: None,
            hints: Vec::new(),
        }
    }

    pub fn file(&self) -> &'a FileEntity {
        self.file
    }

    pub fn parent_declaration(&self) -> Option<&'a DeclarationEntity> {
        self.parent_declaration
    }

    pub fn closest_identifier(&self) -> Option<&'a str> {
        self.closest_identifier
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Derive the context for stepping into `entity`.
    ///
    /// Hints age by one level, except through arrays and unions which
    /// are transparent wrappers around the value actually synthesized.
    /// Named entities then run the identifier rules and plant their
    /// hints at level 0, in front of the inherited ones.
    pub fn descend(&self, entity: &'a Entity) -> Self {
        match entity {
            Entity::ObjectProperty(property) => self.descend_property(property),
            Entity::Declaration(declaration) => self.descend_declaration(declaration),
            _ => {
                let transparent = matches!(entity, Entity::Array(_) | Entity::Union(_));
                let hints = if transparent {
                    self.hints.clone()
                } else {
                    self.hints.iter().map(|hint| hint.aged()).collect()
                };
                Self {
                    file: self.file,
                    parent_declaration: self.parent_declaration,
                    closest_identifier: self.closest_identifier,
                    hints,
                }
            }
        }
    }

    /// Step into a named object property: hints age and the property
    /// name runs the identifier rules.
    pub fn descend_property(&self, property: &'a ObjectPropertyEntity) -> Self {
        self.descend_named(&property.name, self.parent_declaration)
    }

    /// Step into a top-level declaration, which also becomes the
    /// enclosing declaration for everything beneath it.
    pub fn descend_declaration(&self, declaration: &'a DeclarationEntity) -> Self {
        self.descend_named(&declaration.name, Some(declaration))
    }

    fn descend_named(
        &self,
        name: &'a str,
        parent_declaration: Option<&'a DeclarationEntity>,
    ) -> Self {
        let aged: Vec<Hint> = self.hints.iter().map(|hint| hint.aged()).collect();
        let mut hints = identifier_hints(name, &aged);
        hints.extend(aged);
        Self {
            file: self.file,
            parent_declaration,
            closest_identifier: self.closest_identifier,
            hints,
        }
    }

    /// Derive a context remembering `name` as the nearest identifier,
    /// used for provided-length lookups under arrays.
    pub fn with_closest_identifier(&self, name: &'a str) -> Self {
        Self {
            file: self.file,
            parent_declaration: self.parent_declaration,
            closest_identifier: Some(name),
            hints: self.hints.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::HintKind;
    use mocksmith_entity::{ArrayElements, ArrayEntity, ObjectPropertyEntity};

    fn file() -> FileEntity {
        FileEntity {
            name: "models".to_string(),
            path: "./models.ts".to_string(),
            type_declarations: vec![],
        }
    }

    #[test]
    fn hints_age_when_descending_and_stay_through_arrays() {
        let file = file();
        let property = Entity::ObjectProperty(ObjectPropertyEntity {
            name: "userId".to_string(),
            property: Box::new(Entity::String),
            optional: false,
        });
        let array = Entity::Array(ArrayEntity {
            readonly: false,
            tuple: false,
            elements: ArrayElements::Shared(Box::new(Entity::String)),
        });

        let at_property = Context::for_file(&file).descend(&property);
        let id_level = |context: &Context| {
            context
                .hints()
                .iter()
                .find(|hint| hint.kind == HintKind::Id)
                .map(|hint| hint.level)
        };
        assert_eq!(id_level(&at_property), Some(0));

        let through_array = at_property.descend(&array);
        assert_eq!(id_level(&through_array), Some(0));

        let at_leaf = through_array.descend(&Entity::String);
        assert_eq!(id_level(&at_leaf), Some(1));
    }

    #[test]
    fn sibling_contexts_do_not_share_planted_hints() {
        let file = file();
        let root = Context::for_file(&file);
        let id_property = Entity::ObjectProperty(ObjectPropertyEntity {
            name: "id".to_string(),
            property: Box::new(Entity::String),
            optional: false,
        });
        let plain_property = Entity::ObjectProperty(ObjectPropertyEntity {
            name: "title".to_string(),
            property: Box::new(Entity::String),
            optional: false,
        });

        let with_id = root.descend(&id_property);
        assert!(with_id.hints().iter().any(|hint| hint.kind == HintKind::Id));

        let sibling = root.descend(&plain_property);
        assert!(sibling.hints().is_empty());
    }
}
