use serde_json::{Value, json};

use mocksmith_codegen::{CodegenOptions, GenerateOptions, Seed, codegen_file};
use mocksmith_entity::{
    ArrayElements, ArrayEntity, DeclarationEntity, Entity, FileEntity, LiteralValue, ObjectEntity,
    ObjectPropertyEntity, ReferenceEntity, UnionEntity,
};
use mocksmith_runtime::Provided;

fn declaration(name: &str, declaration: Entity) -> DeclarationEntity {
    DeclarationEntity {
        name: name.to_string(),
        exported: true,
        declaration: Box::new(declaration),
    }
}

fn property(name: &str, entity: Entity) -> ObjectPropertyEntity {
    ObjectPropertyEntity {
        name: name.to_string(),
        property: Box::new(entity),
        optional: false,
    }
}

fn optional_property(name: &str, entity: Entity) -> ObjectPropertyEntity {
    ObjectPropertyEntity {
        optional: true,
        ..property(name, entity)
    }
}

fn object(properties: Vec<ObjectPropertyEntity>) -> Entity {
    Entity::Object(ObjectEntity { properties })
}

fn file(declarations: Vec<DeclarationEntity>) -> FileEntity {
    FileEntity {
        name: "models".to_string(),
        path: "./models.ts".to_string(),
        type_declarations: declarations,
    }
}

fn string_literal(value: &str) -> Entity {
    Entity::Literal {
        value: LiteralValue::String(value.to_string()),
    }
}

fn seeded(seed: u64) -> GenerateOptions {
    GenerateOptions {
        seed: Some(Seed::Single(seed)),
        ..GenerateOptions::default()
    }
}

fn user_file() -> FileEntity {
    file(vec![declaration(
        "User",
        object(vec![
            property("id", Entity::String),
            property("name", Entity::String),
            property("age", Entity::Number),
            property(
                "tags",
                Entity::Array(ArrayEntity {
                    readonly: false,
                    tuple: false,
                    elements: ArrayElements::Shared(Box::new(Entity::String)),
                }),
            ),
        ]),
    )])
}

#[test]
fn seeded_generation_is_deterministic() {
    let module = codegen_file(&user_file(), &CodegenOptions::default()).expect("lowers");

    let first = module
        .generate("generateUser", Provided::Absent, &seeded(48))
        .expect("generates");
    let second = module
        .generate("generateUser", Provided::Absent, &seeded(48))
        .expect("generates");
    assert_eq!(first, second);

    let other_seed = module
        .generate("generateUser", Provided::Absent, &seeded(49))
        .expect("generates");
    assert_ne!(first, other_seed);
}

#[test]
fn seed_sequences_fold_into_one_seed() {
    let module = codegen_file(&user_file(), &CodegenOptions::default()).expect("lowers");
    let options = GenerateOptions {
        seed: Some(Seed::Sequence(vec![48, 7])),
        ..GenerateOptions::default()
    };

    let first = module
        .generate("generateUser", Provided::Absent, &options)
        .expect("generates");
    let second = module
        .generate("generateUser", Provided::Absent, &options)
        .expect("generates");
    assert_eq!(first, second);
}

#[test]
fn provided_partial_data_wins_over_synthesized_fields() {
    let module = codegen_file(&user_file(), &CodegenOptions::default()).expect("lowers");

    let result = module
        .generate(
            "generateUser",
            Provided::Value(json!({"name": "John Doe"})),
            &seeded(48),
        )
        .expect("generates")
        .expect("has a value");

    assert_eq!(result["name"], json!("John Doe"));
    assert!(result["id"].is_string());
    assert!(result["age"].is_number());
    assert!(result["tags"].is_array());
}

#[test]
fn unknown_functions_are_an_error() {
    let module = codegen_file(&user_file(), &CodegenOptions::default()).expect("lowers");
    let result = module.generate("generateGhost", Provided::Absent, &seeded(1));
    assert!(result.is_err());
}

#[test]
fn provided_arrays_pin_the_synthesized_length() {
    let module = codegen_file(&user_file(), &CodegenOptions::default()).expect("lowers");

    let result = module
        .generate(
            "generateUser",
            Provided::Value(json!({"tags": ["alpha", "beta"]})),
            &seeded(3),
        )
        .expect("generates")
        .expect("has a value");

    let tags = result["tags"].as_array().expect("tags is an array");
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0], json!("alpha"));
    assert_eq!(tags[1], json!("beta"));
}

#[test]
fn union_declarations_return_provided_values_verbatim() {
    let module = codegen_file(
        &file(vec![declaration(
            "Status",
            Entity::Union(UnionEntity {
                values: vec![string_literal("active"), string_literal("inactive")],
            }),
        )]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    let provided = module
        .generate(
            "generateStatus",
            Provided::Value(json!("paused")),
            &seeded(1),
        )
        .expect("generates")
        .expect("has a value");
    assert_eq!(provided, json!("paused"));

    let synthesized = module
        .generate("generateStatus", Provided::Absent, &seeded(1))
        .expect("generates")
        .expect("has a value");
    assert!(synthesized == json!("active") || synthesized == json!("inactive"));
}

#[test]
fn undefined_members_make_explicit_undefined_a_valid_result() {
    let module = codegen_file(
        &file(vec![declaration(
            "MaybeName",
            Entity::Union(UnionEntity {
                values: vec![
                    Entity::String,
                    Entity::Literal {
                        value: LiteralValue::Undefined,
                    },
                ],
            }),
        )]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    let explicit = module
        .generate("generateMaybeName", Provided::Undefined, &seeded(1))
        .expect("generates");
    assert_eq!(explicit, None);

    let pinned = module
        .generate(
            "generateMaybeName",
            Provided::Value(json!("Ada")),
            &seeded(1),
        )
        .expect("generates");
    assert_eq!(pinned, Some(json!("Ada")));

    // Absent input synthesizes: either a string or nothing, depending
    // on which member the seed picks.
    let synthesized = module
        .generate("generateMaybeName", Provided::Absent, &seeded(7))
        .expect("generates");
    if let Some(value) = synthesized {
        assert!(value.is_string());
    }
}

#[test]
fn references_synthesize_through_their_own_functions() {
    let module = codegen_file(
        &file(vec![
            declaration(
                "Friend",
                object(vec![
                    property("id", Entity::String),
                    property("name", Entity::String),
                ]),
            ),
            declaration(
                "User",
                object(vec![
                    property("id", Entity::String),
                    property(
                        "friend",
                        Entity::Reference(ReferenceEntity {
                            reference: "Friend".to_string(),
                        }),
                    ),
                ]),
            ),
        ]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    let result = module
        .generate("generateUser", Provided::Absent, &seeded(5))
        .expect("generates")
        .expect("has a value");

    let friend = result["friend"].as_object().expect("friend is an object");
    assert!(friend["id"].is_string());
    assert!(friend["name"].is_string());
}

#[test]
fn provided_nested_data_still_merges_over_referenced_values() {
    let module = codegen_file(
        &file(vec![
            declaration("Friend", object(vec![property("name", Entity::String)])),
            declaration(
                "User",
                object(vec![property(
                    "friend",
                    Entity::Reference(ReferenceEntity {
                        reference: "Friend".to_string(),
                    }),
                )]),
            ),
        ]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    let result = module
        .generate(
            "generateUser",
            Provided::Value(json!({"friend": {"name": "Grace"}})),
            &seeded(5),
        )
        .expect("generates")
        .expect("has a value");

    assert_eq!(result["friend"]["name"], json!("Grace"));
}

#[test]
fn date_references_produce_timestamps() {
    let module = codegen_file(
        &file(vec![declaration(
            "Event",
            object(vec![property(
                "createdAt",
                Entity::Reference(ReferenceEntity {
                    reference: "Date".to_string(),
                }),
            )]),
        )]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    let result = module
        .generate("generateEvent", Provided::Absent, &seeded(2))
        .expect("generates")
        .expect("has a value");

    let stamp = result["createdAt"].as_str().expect("timestamp string");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
}

#[test]
fn union_object_members_synthesize_completely() {
    // Whichever member the draw lands on, its required properties are
    // all filled in.
    let guest = object(vec![property("email", Entity::String)]);
    let admin = object(vec![
        property("email", Entity::String),
        property("role", Entity::String),
    ]);
    let module = codegen_file(
        &file(vec![declaration(
            "Account",
            Entity::Union(UnionEntity {
                values: vec![guest, admin],
            }),
        )]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    for seed in 0..16 {
        let result = module
            .generate("generateAccount", Provided::Absent, &seeded(seed))
            .expect("generates")
            .expect("has a value");
        assert!(result["email"].is_string());
    }
}

#[test]
fn exact_optional_semantics_sometimes_omit_optional_properties() {
    let options = CodegenOptions {
        exact_optional_properties: true,
        ..CodegenOptions::default()
    };
    let module = codegen_file(
        &file(vec![declaration(
            "Profile",
            object(vec![
                property("id", Entity::String),
                optional_property("nickname", Entity::String),
            ]),
        )]),
        &options,
    )
    .expect("lowers");

    let mut present = 0;
    let mut absent = 0;
    for seed in 0..32 {
        let result = module
            .generate("generateProfile", Provided::Absent, &seeded(seed))
            .expect("generates")
            .expect("has a value");
        assert!(result["id"].is_string());
        match result.get("nickname") {
            Some(Value::String(_)) => present += 1,
            None => absent += 1,
            other => panic!("unexpected nickname value: {other:?}"),
        }
    }
    assert!(present > 0, "nickname was never synthesized");
    assert!(absent > 0, "nickname was never omitted");
}

#[test]
fn optional_properties_are_always_synthesized_without_exact_semantics() {
    let module = codegen_file(
        &file(vec![declaration(
            "Profile",
            object(vec![
                property("id", Entity::String),
                optional_property("nickname", Entity::String),
            ]),
        )]),
        &CodegenOptions::default(),
    )
    .expect("lowers");

    for seed in 0..8 {
        let result = module
            .generate("generateProfile", Provided::Absent, &seeded(seed))
            .expect("generates")
            .expect("has a value");
        assert!(result.get("nickname").is_some());
    }
}

#[test]
fn opt_out_behaves_like_absent_for_merged_declarations() {
    let module = codegen_file(&user_file(), &CodegenOptions::default()).expect("lowers");

    let opted_out = module
        .generate("generateUser", Provided::OptOut, &seeded(48))
        .expect("generates");
    let absent = module
        .generate("generateUser", Provided::Absent, &seeded(48))
        .expect("generates");
    assert_eq!(opted_out, absent);
}
