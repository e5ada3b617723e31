//! Interpretation of synthesis programs.
//!
//! Mirrors what a printed artifact would do at call time: seed an RNG,
//! synthesize the default value, then fold the caller's partial data
//! over it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{Map, Value};
use tracing::debug;

use mocksmith_runtime::{
    ArrayMergeMode, MergeOptions, Provided, RuntimeSchema, SelectOptions, choose_union_index, merge,
};

use crate::errors::EvalError;
use crate::fakes::fake_value;
use crate::program::{GeneratedFunction, GeneratedModule, Passthrough, SynthExpr};

/// Deterministic seed for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Single(u64),
    /// Multiple seeds folded into one; useful for deriving a call
    /// seed from a test seed plus a case index.
    Sequence(Vec<u64>),
}

impl Seed {
    // FNV-1a fold so sequences spread over the seed space instead of
    // just summing.
    fn fold(&self) -> u64 {
        match self {
            Seed::Single(seed) => *seed,
            Seed::Sequence(seeds) => seeds.iter().fold(0xcbf29ce484222325, |hash, seed| {
                (hash ^ seed).wrapping_mul(0x100000001b3)
            }),
        }
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Seed::Single(seed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Seed the RNG for reproducible output; unseeded calls draw the
    /// seed from the OS.
    pub seed: Option<Seed>,
    pub select: SelectOptions,
    pub array_merge_mode: ArrayMergeMode,
}

impl GeneratedModule {
    /// Run one generated function against caller-provided data.
    ///
    /// `Ok(None)` means the function produced no value, which only
    /// happens when the declared type admits undefined and the caller
    /// explicitly provided it.
    pub fn generate(
        &self,
        function_name: &str,
        provided: Provided,
        options: &GenerateOptions,
    ) -> Result<Option<Value>, EvalError> {
        let function = self
            .function(function_name)
            .ok_or_else(|| EvalError::UnknownFunction(function_name.to_string()))?;

        let mut rng = match &options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.fold()),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        debug!(
            function = function_name,
            seeded = options.seed.is_some(),
            "generating value"
        );
        self.run(function, provided, options, &mut rng)
    }

    fn run(
        &self,
        function: &GeneratedFunction,
        provided: Provided,
        options: &GenerateOptions,
        rng: &mut ChaCha8Rng,
    ) -> Result<Option<Value>, EvalError> {
        match function.passthrough {
            Passthrough::VerbatimOrUndefined => match provided {
                Provided::Value(value) => Ok(Some(value)),
                Provided::Undefined => Ok(None),
                Provided::Absent | Provided::OptOut => {
                    self.eval(&function.root, None, options, rng)
                }
            },
            Passthrough::Verbatim => match provided {
                Provided::Value(value) if !value.is_null() => Ok(Some(value)),
                _ => self.eval(&function.root, None, options, rng),
            },
            Passthrough::Merge => {
                let mut synthesized = {
                    let provided_data = match &provided {
                        Provided::Value(value) => Some(value),
                        _ => None,
                    };
                    self.eval(&function.root, provided_data, options, rng)?
                }
                .unwrap_or(Value::Null);

                if !function.omittable_properties.is_empty() {
                    omit_random_optionals(&mut synthesized, &function.omittable_properties, rng);
                }

                let merge_options = MergeOptions {
                    prefer_undefined_source: false,
                    array_merge_mode: options.array_merge_mode,
                };
                Ok(merge(synthesized, provided, &merge_options))
            }
        }
    }

    fn eval(
        &self,
        expr: &SynthExpr,
        provided_root: Option<&Value>,
        options: &GenerateOptions,
        rng: &mut ChaCha8Rng,
    ) -> Result<Option<Value>, EvalError> {
        match expr {
            SynthExpr::Literal(value) => Ok(Some(value.clone())),
            SynthExpr::Undefined => Ok(None),
            SynthExpr::Fake(kind) => Ok(Some(fake_value(*kind, rng))),
            SynthExpr::Object(properties) => {
                let mut object = Map::new();
                for property in properties {
                    // Undefined-valued properties are left out.
                    if let Some(value) =
                        self.eval(&property.value, provided_root, options, rng)?
                    {
                        object.insert(property.name.clone(), value);
                    }
                }
                Ok(Some(Value::Object(object)))
            }
            SynthExpr::Tuple(slots) => {
                let mut items = Vec::with_capacity(slots.len());
                for slot in slots {
                    let value = self
                        .eval(slot, provided_root, options, rng)?
                        .unwrap_or(Value::Null);
                    items.push(value);
                }
                Ok(Some(Value::Array(items)))
            }
            SynthExpr::Many {
                element,
                length_from,
            } => {
                let provided_length = provided_root
                    .and_then(|root| match length_from {
                        Some(property) => root.get(property),
                        None => Some(root),
                    })
                    .and_then(Value::as_array)
                    .map(Vec::len);
                let count = match provided_length {
                    Some(length) => length,
                    None => rng.random_range(0..=42),
                };

                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    let value = self
                        .eval(element, provided_root, options, rng)?
                        .unwrap_or(Value::Null);
                    items.push(value);
                }
                Ok(Some(Value::Array(items)))
            }
            SynthExpr::Union(branches) => {
                let schemas: Vec<RuntimeSchema> =
                    branches.iter().map(|branch| branch.schema.clone()).collect();
                let index =
                    choose_union_index(&schemas, provided_root, &options.select, rng)?;
                self.eval(&branches[index].body, provided_root, options, rng)
            }
            SynthExpr::Call(function_name) => {
                let callee = self
                    .function(function_name)
                    .ok_or_else(|| EvalError::UnknownFunction(function_name.clone()))?;
                // Partial data never crosses a generated-function
                // call; the callee synthesizes from scratch.
                self.run(callee, Provided::Absent, options, rng)
            }
        }
    }
}

// Remove a random subset of the omittable properties, mirroring the
// behavior of types compiled with exact optional property semantics
// where a missing key differs from an undefined one.
fn omit_random_optionals(value: &mut Value, omittable: &[String], rng: &mut ChaCha8Rng) {
    let Some(object) = value.as_object_mut() else {
        return;
    };

    let mut pool: Vec<&String> = omittable.iter().collect();
    let omit_count = rng.random_range(0..=pool.len());
    for _ in 0..omit_count {
        let position = rng.random_range(0..pool.len());
        let name = pool.swap_remove(position);
        object.remove(name);
    }
}
