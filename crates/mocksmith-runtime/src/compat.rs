use serde_json::Value;

use crate::schema::{
    ArrayElementsSchema, ArraySchema, ObjectSchema, PrimitiveSchema, PrimitiveType, RuntimeSchema,
    UnionSchema,
};

/// Tuning knobs for compatibility scoring.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityOptions {
    /// Extra points for each matching optional property.
    pub optional_property_bonus: f64,
    /// Per-nesting-level decay factor applied to nested bonuses.
    pub nested_depth_penalty: f64,
    /// Score assigned when data carries properties the schema does
    /// not know about.
    pub incompatible_penalty: f64,
}

impl Default for CompatibilityOptions {
    fn default() -> Self {
        Self {
            optional_property_bonus: 5.0,
            nested_depth_penalty: 0.9,
            incompatible_penalty: -1000.0,
        }
    }
}

/// Outcome of scoring one schema against one piece of data.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityResult {
    pub compatible: bool,
    pub score: f64,
    pub incompatible_properties: Vec<String>,
    pub missing_required_properties: Vec<String>,
    pub details: Option<String>,
}

impl CompatibilityResult {
    fn plain(compatible: bool, score: f64) -> Self {
        Self {
            compatible,
            score,
            incompatible_properties: Vec::new(),
            missing_required_properties: Vec::new(),
            details: None,
        }
    }

    fn with_details(compatible: bool, score: f64, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::plain(compatible, score)
        }
    }
}

/// How absent data and partially-filled objects are judged.
///
/// `Strict` is plain validation. `UnionMember` relaxes the rules for
/// selecting among union alternatives: missing required keys can be
/// filled in by the member's generator later, so they lower the score
/// instead of disqualifying, and absent data is always extendable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Strict,
    UnionMember,
}

/// Check whether data validates against a schema.
pub fn is_compatible(schema: &RuntimeSchema, data: &Value) -> bool {
    calculate_compatibility(schema, data, &CompatibilityOptions::default()).compatible
}

/// Score data against a schema under strict validation rules.
pub fn calculate_compatibility(
    schema: &RuntimeSchema,
    data: &Value,
    options: &CompatibilityOptions,
) -> CompatibilityResult {
    score(schema, data, options, Mode::Strict)
}

/// Score data against a union member's schema under the relaxed
/// selection rules.
pub fn calculate_union_member_compatibility(
    schema: &RuntimeSchema,
    data: &Value,
    options: &CompatibilityOptions,
) -> CompatibilityResult {
    score(schema, data, options, Mode::UnionMember)
}

fn score(
    schema: &RuntimeSchema,
    data: &Value,
    options: &CompatibilityOptions,
    mode: Mode,
) -> CompatibilityResult {
    if data.is_null() {
        if let RuntimeSchema::Literal(literal) = schema
            && literal.value.is_nullish()
        {
            return CompatibilityResult::plain(true, 100.0);
        }
        return match mode {
            Mode::Strict => {
                CompatibilityResult::with_details(false, 0.0, "data is null/undefined")
            }
            Mode::UnionMember => {
                CompatibilityResult::with_details(true, 50.0, "no data provided - can be extended")
            }
        };
    }

    match schema {
        RuntimeSchema::Object(object) => match mode {
            Mode::Strict => object_compatibility(object, data, options),
            Mode::UnionMember => object_union_compatibility(object, data, options),
        },
        RuntimeSchema::Array(array) => array_compatibility(array, data, options),
        RuntimeSchema::Union(union) => union_compatibility(union, data, options),
        RuntimeSchema::Literal(literal) => {
            if literal.value.matches(data) {
                CompatibilityResult::with_details(true, 100.0, "literal match")
            } else {
                CompatibilityResult::with_details(false, 0.0, "literal mismatch")
            }
        }
        RuntimeSchema::Primitive(primitive) => primitive_compatibility(primitive, data),
        RuntimeSchema::Reference(_) => {
            CompatibilityResult::with_details(true, 50.0, "reference type - assumed compatible")
        }
    }
}

fn object_compatibility(
    schema: &ObjectSchema,
    data: &Value,
    options: &CompatibilityOptions,
) -> CompatibilityResult {
    let Some(data_object) = data.as_object() else {
        return CompatibilityResult::with_details(false, 0.0, "data is not an object");
    };

    if let Some(result) = reject_unknown_properties(schema, data_object, options) {
        return result;
    }

    let missing: Vec<String> = schema
        .required_properties
        .iter()
        .filter(|name| !data_object.contains_key(*name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return CompatibilityResult {
            compatible: false,
            score: 0.0,
            incompatible_properties: Vec::new(),
            missing_required_properties: missing,
            details: Some("missing required properties".to_string()),
        };
    }

    let mut score_total = 100.0;
    let matching_optional = schema
        .optional_properties
        .iter()
        .filter(|name| data_object.contains_key(*name))
        .count();
    score_total += matching_optional as f64 * options.optional_property_bonus;

    let mut nested_compatible = true;
    let nested_options = decay(options);
    for (name, value) in data_object {
        let Some(info) = schema.properties.get(name) else {
            continue;
        };
        let nested = score(&info.schema, value, &nested_options, Mode::Strict);
        if !nested.compatible {
            nested_compatible = false;
        }
        score_total += nested.score * options.nested_depth_penalty * 0.1;
    }

    CompatibilityResult::plain(
        nested_compatible,
        if nested_compatible { score_total } else { 0.0 },
    )
}

fn object_union_compatibility(
    schema: &ObjectSchema,
    data: &Value,
    options: &CompatibilityOptions,
) -> CompatibilityResult {
    let Some(data_object) = data.as_object() else {
        return CompatibilityResult::with_details(false, 0.0, "data is not an object");
    };

    if let Some(result) = reject_unknown_properties(schema, data_object, options) {
        return result;
    }

    // Missing required keys do not disqualify here: the member's
    // generator can fill them in after selection.
    let mut score_total = 100.0;

    let matching_required = schema
        .required_properties
        .iter()
        .filter(|name| data_object.contains_key(*name))
        .count();
    score_total += matching_required as f64 * 10.0;

    let matching_optional = schema
        .optional_properties
        .iter()
        .filter(|name| data_object.contains_key(*name))
        .count();
    score_total += matching_optional as f64 * options.optional_property_bonus;

    if matching_required == schema.required_properties.len() {
        score_total += 50.0;
    }

    let missing_required = schema.required_properties.len() - matching_required;
    score_total -= missing_required as f64 * 5.0;

    let nested_options = decay(options);
    for (name, value) in data_object {
        let Some(info) = schema.properties.get(name) else {
            continue;
        };
        let nested = score(&info.schema, value, &nested_options, Mode::UnionMember);
        if !nested.compatible {
            return CompatibilityResult::with_details(false, 0.0, "property type incompatibility");
        }
        // Nested fit sweetens the score but must not dominate it.
        score_total += (nested.score * 0.01).min(2.0);
    }

    CompatibilityResult::plain(true, score_total)
}

fn reject_unknown_properties(
    schema: &ObjectSchema,
    data_object: &serde_json::Map<String, Value>,
    options: &CompatibilityOptions,
) -> Option<CompatibilityResult> {
    let incompatible: Vec<String> = data_object
        .keys()
        .filter(|name| {
            !schema.required_properties.contains(name) && !schema.optional_properties.contains(name)
        })
        .cloned()
        .collect();

    if incompatible.is_empty() {
        return None;
    }

    Some(CompatibilityResult {
        compatible: false,
        score: options.incompatible_penalty,
        incompatible_properties: incompatible,
        missing_required_properties: Vec::new(),
        details: Some("unknown properties for this schema".to_string()),
    })
}

fn array_compatibility(
    schema: &ArraySchema,
    data: &Value,
    options: &CompatibilityOptions,
) -> CompatibilityResult {
    let Some(items) = data.as_array() else {
        return CompatibilityResult::with_details(false, 0.0, "data is not an array");
    };

    match (&schema.elements, schema.tuple) {
        (ArrayElementsSchema::Slots(slots), _) => {
            if items.len() > slots.len() {
                return CompatibilityResult::with_details(
                    false,
                    0.0,
                    format!("tuple too long: expected max {}, got {}", slots.len(), items.len()),
                );
            }

            let mut score_total = 100.0;
            let mut all_compatible = true;
            for (item, slot) in items.iter().zip(slots) {
                let result = score(slot, item, options, Mode::Strict);
                if !result.compatible {
                    all_compatible = false;
                }
                score_total += result.score * options.nested_depth_penalty * 0.1;
            }

            CompatibilityResult::plain(
                all_compatible,
                if all_compatible { score_total } else { 0.0 },
            )
        }
        (ArrayElementsSchema::Shared(element), _) => {
            let mut score_total = 100.0;
            for item in items {
                let result = score(element, item, options, Mode::Strict);
                if !result.compatible {
                    return CompatibilityResult::with_details(
                        false,
                        0.0,
                        "array element incompatibility",
                    );
                }
                score_total += result.score * options.nested_depth_penalty * 0.01;
            }
            CompatibilityResult::plain(true, score_total)
        }
    }
}

fn union_compatibility(
    schema: &UnionSchema,
    data: &Value,
    options: &CompatibilityOptions,
) -> CompatibilityResult {
    let mut best = CompatibilityResult::with_details(false, 0.0, "no union member matched");

    for member in &schema.members {
        let result = score(member, data, options, Mode::Strict);
        if result.compatible && result.score >= 100.0 {
            return result;
        }
        if result.score > best.score {
            best = result;
        }
    }

    best
}

fn primitive_compatibility(schema: &PrimitiveSchema, data: &Value) -> CompatibilityResult {
    let matched = match schema.primitive_type {
        PrimitiveType::String => data.is_string(),
        // NaN cannot appear in serde_json numbers, but a parsed f64
        // could still round-trip through as_f64.
        PrimitiveType::Number => data.as_f64().map(|value| !value.is_nan()).unwrap_or(false),
        PrimitiveType::Boolean => data.is_boolean(),
        PrimitiveType::Any | PrimitiveType::Unknown => true,
    };

    CompatibilityResult::plain(matched, if matched { 100.0 } else { 0.0 })
}

fn decay(options: &CompatibilityOptions) -> CompatibilityOptions {
    CompatibilityOptions {
        optional_property_bonus: options.optional_property_bonus * options.nested_depth_penalty,
        ..*options
    }
}
