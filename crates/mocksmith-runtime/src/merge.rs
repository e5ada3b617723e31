use serde_json::Value;

/// Caller input for one generated function call.
///
/// JSON cannot tell "the caller passed nothing" apart from "the caller
/// passed null", and the opt-out marker is not a value at all, so the
/// states are spelled out instead of being encoded as magic sentinels.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Provided {
    /// The caller did not pass the argument.
    #[default]
    Absent,
    /// The caller explicitly passed undefined.
    Undefined,
    /// The caller asked for a synthesized value.
    OptOut,
    /// A concrete (possibly partial) value to fold over the defaults.
    Value(Value),
}

impl Provided {
    pub fn is_absent(&self) -> bool {
        matches!(self, Provided::Absent | Provided::Undefined)
    }
}

impl From<Value> for Provided {
    fn from(value: Value) -> Self {
        Provided::Value(value)
    }
}

/// How arrays combine when both sides carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMergeMode {
    /// Merge element-by-element; indices only one side has pass
    /// through unchanged.
    #[default]
    Spread,
    /// The source array wins wholesale.
    Replace,
}

#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Whether an absent/undefined source at the root yields no value
    /// (true) or falls back to the synthesized target (false). Applies
    /// to the root only; nested keys merge normally.
    pub prefer_undefined_source: bool,
    pub array_merge_mode: ArrayMergeMode,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            prefer_undefined_source: true,
            array_merge_mode: ArrayMergeMode::default(),
        }
    }
}

/// Fold caller-provided data over a synthesized default value.
///
/// Returns `None` only when the caller explicitly provided nothing and
/// `prefer_undefined_source` is set; every other path yields a value.
pub fn merge(target: Value, source: Provided, options: &MergeOptions) -> Option<Value> {
    match source {
        Provided::OptOut => Some(target),
        Provided::Absent | Provided::Undefined => {
            if options.prefer_undefined_source {
                None
            } else {
                Some(target)
            }
        }
        Provided::Value(value) => Some(merge_values(target, value, options)),
    }
}

// Deep merge with the source taking precedence. Structured values of
// the same shape combine recursively; any shape mismatch means the
// source replaces the target outright (null included).
fn merge_values(target: Value, source: Value, options: &MergeOptions) -> Value {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            let mut merged = target_map;
            for (key, source_value) in source_map {
                let combined = match merged.remove(&key) {
                    Some(target_value) => merge_values(target_value, source_value, options),
                    None => source_value,
                };
                merged.insert(key, combined);
            }
            Value::Object(merged)
        }
        (Value::Array(target_items), Value::Array(source_items)) => {
            match options.array_merge_mode {
                ArrayMergeMode::Replace => Value::Array(source_items),
                ArrayMergeMode::Spread => {
                    let mut target_iter = target_items.into_iter();
                    let mut merged: Vec<Value> = source_items
                        .into_iter()
                        .map(|source_item| match target_iter.next() {
                            Some(target_item) => {
                                merge_values(target_item, source_item, options)
                            }
                            None => source_item,
                        })
                        .collect();
                    merged.extend(target_iter);
                    Value::Array(merged)
                }
            }
        }
        (_, source) => source,
    }
}
