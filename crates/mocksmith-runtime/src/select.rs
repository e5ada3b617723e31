use rand::Rng;
use serde_json::Value;
use tracing::trace;

use crate::compat::{CompatibilityOptions, calculate_union_member_compatibility};
use crate::error::RuntimeError;
use crate::schema::RuntimeSchema;

/// One selectable alternative of a union, paired with the payload to
/// hand back when it wins.
#[derive(Debug, Clone)]
pub struct UnionMember<T> {
    pub schema: RuntimeSchema,
    pub name: Option<String>,
    pub value: T,
}

#[derive(Debug, Clone, Copy)]
pub struct SelectOptions {
    /// Fall back to a uniform draw over all members when nothing
    /// scores as compatible.
    pub fallback_to_random: bool,
    /// Members scoring below this are never selected.
    pub min_compatibility_score: f64,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            fallback_to_random: true,
            min_compatibility_score: 0.0,
        }
    }
}

/// Pick a union member index, biased by how well `provided` fits each
/// member's schema.
///
/// Without data (or with null data) every member is equally likely.
/// With data, members are scored under the relaxed union-member rules,
/// incompatible ones are filtered out, and one survivor is drawn with
/// probability proportional to its score.
pub fn choose_union_index<R: Rng + ?Sized>(
    schemas: &[RuntimeSchema],
    provided: Option<&Value>,
    options: &SelectOptions,
    rng: &mut R,
) -> Result<usize, RuntimeError> {
    if schemas.is_empty() {
        return Err(RuntimeError::EmptyUnion);
    }

    let data = match provided {
        Some(value) if !value.is_null() => value,
        _ => return Ok(rng.random_range(0..schemas.len())),
    };

    let compat_options = CompatibilityOptions::default();
    let scored: Vec<(usize, f64)> = schemas
        .iter()
        .enumerate()
        .map(|(index, schema)| {
            let result = calculate_union_member_compatibility(schema, data, &compat_options);
            trace!(index, score = result.score, compatible = result.compatible, "scored union member");
            (index, result.compatible, result.score)
        })
        .filter(|(_, compatible, score)| *compatible && *score >= options.min_compatibility_score)
        .map(|(index, _, score)| (index, score))
        .collect();

    if scored.is_empty() {
        if options.fallback_to_random {
            return Ok(rng.random_range(0..schemas.len()));
        }
        return Err(RuntimeError::NoCompatibleMember);
    }

    let total: f64 = scored.iter().map(|(_, score)| score).sum();
    if total <= 0.0 {
        let position = rng.random_range(0..scored.len());
        return Ok(scored[position].0);
    }

    let draw = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, score) in &scored {
        cumulative += score;
        if draw <= cumulative {
            return Ok(*index);
        }
    }

    // Floating point drift can leave the draw past the last bucket.
    Ok(scored[scored.len() - 1].0)
}

/// Select a member and return its payload in one step.
pub fn select_from_union<T, R: Rng + ?Sized>(
    members: Vec<UnionMember<T>>,
    provided: Option<&Value>,
    options: &SelectOptions,
    rng: &mut R,
) -> Result<T, RuntimeError> {
    let schemas: Vec<RuntimeSchema> = members.iter().map(|member| member.schema.clone()).collect();
    let index = choose_union_index(&schemas, provided, options, rng)?;
    let member = members
        .into_iter()
        .nth(index)
        .ok_or(RuntimeError::EmptyUnion)?;
    if let Some(name) = &member.name {
        trace!(member = name.as_str(), "selected union member");
    }
    Ok(member.value)
}
