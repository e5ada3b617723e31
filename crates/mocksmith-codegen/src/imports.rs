//! Import bookkeeping for generated modules.
//!
//! Every part of lowering that needs an external name records it
//! here; at the end the recorder folds duplicates, groups by
//! specifier, and resolves path specifiers relative to the output
//! module.

use std::path::{Component, Path};

/// One named binding pulled from a specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    pub name: String,
    pub type_only: bool,
}

/// A single recorded import request, before consolidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub specifier: String,
    pub named: Vec<NamedImport>,
    /// Default-import binding, if any.
    pub clause: Option<String>,
    pub type_only: bool,
}

/// One import line of the final artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedImport {
    pub specifier: String,
    pub default_import: Option<String>,
    /// Whole line hoisted to type-only because every named binding is.
    pub type_only: bool,
    pub named: Vec<NamedImport>,
}

#[derive(Debug, Default)]
pub struct ImportRecorder {
    imports: Vec<ImportSpecifier>,
}

impl ImportRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an import request; exact duplicates are dropped.
    pub fn record(&mut self, import: ImportSpecifier) {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    /// Fold the recorded requests into one import per specifier, in
    /// first-seen order. When `consolidate_type_imports` is set and
    /// every named binding of a group is type-only, the whole line is
    /// hoisted to type-only instead of each binding separately.
    pub fn consolidate(
        self,
        output_dir: &str,
        consolidate_type_imports: bool,
    ) -> Vec<ConsolidatedImport> {
        let mut order: Vec<String> = Vec::new();
        for import in &self.imports {
            if !order.contains(&import.specifier) {
                order.push(import.specifier.clone());
            }
        }

        order
            .into_iter()
            .map(|specifier| {
                let group: Vec<&ImportSpecifier> = self
                    .imports
                    .iter()
                    .filter(|import| import.specifier == specifier)
                    .collect();

                let named: Vec<NamedImport> = group
                    .iter()
                    .flat_map(|import| import.named.iter().cloned())
                    .collect();

                let all_type_only =
                    !named.is_empty() && named.iter().all(|import| import.type_only);
                let hoisted = consolidate_type_imports && all_type_only;

                let named = named
                    .into_iter()
                    .map(|import| NamedImport {
                        type_only: !hoisted && import.type_only,
                        ..import
                    })
                    .collect();

                ConsolidatedImport {
                    specifier: resolve_specifier(output_dir, &specifier),
                    default_import: group
                        .iter()
                        .find_map(|import| import.clause.clone()),
                    type_only: hoisted,
                    named,
                }
            })
            .collect()
    }
}

fn is_path(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/')
}

/// Rewrite a path specifier relative to the output directory and drop
/// the source extension; bare package specifiers pass through.
fn resolve_specifier(output_dir: &str, specifier: &str) -> String {
    if !is_path(specifier) {
        return specifier.to_string();
    }

    let mut relative = relative_path(Path::new(output_dir), Path::new(specifier));
    if !relative.starts_with('.') {
        relative = format!("./{relative}");
    }
    relative
        .strip_suffix(".ts")
        .map(str::to_string)
        .unwrap_or(relative)
}

fn relative_path(from_dir: &Path, target: &Path) -> String {
    let from: Vec<Component> = from_dir.components().collect();
    let to: Vec<Component> = target.components().collect();

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, type_only: bool) -> NamedImport {
        NamedImport {
            name: name.to_string(),
            type_only,
        }
    }

    #[test]
    fn exact_duplicates_are_recorded_once() {
        let mut recorder = ImportRecorder::new();
        let import = ImportSpecifier {
            specifier: "mocksmith-runtime".to_string(),
            named: vec![named("merge", false)],
            clause: None,
            type_only: false,
        };
        recorder.record(import.clone());
        recorder.record(import);

        let consolidated = recorder.consolidate("./out", true);
        assert_eq!(consolidated.len(), 1);
        assert_eq!(consolidated[0].named, vec![named("merge", false)]);
    }

    #[test]
    fn groups_merge_named_bindings_per_specifier() {
        let mut recorder = ImportRecorder::new();
        recorder.record(ImportSpecifier {
            specifier: "mocksmith-runtime".to_string(),
            named: vec![named("merge", false)],
            clause: None,
            type_only: false,
        });
        recorder.record(ImportSpecifier {
            specifier: "mocksmith-runtime".to_string(),
            named: vec![named("selectFromUnion", false)],
            clause: None,
            type_only: false,
        });

        let consolidated = recorder.consolidate("./out", true);
        assert_eq!(consolidated.len(), 1);
        assert_eq!(
            consolidated[0].named,
            vec![named("merge", false), named("selectFromUnion", false)]
        );
    }

    #[test]
    fn all_type_only_bindings_hoist_the_whole_line() {
        let mut recorder = ImportRecorder::new();
        recorder.record(ImportSpecifier {
            specifier: "./models.ts".to_string(),
            named: vec![named("User", true), named("Account", true)],
            clause: None,
            type_only: false,
        });

        let consolidated = recorder.consolidate("./out", true);
        assert!(consolidated[0].type_only);
        assert!(consolidated[0].named.iter().all(|import| !import.type_only));
    }

    #[test]
    fn mixed_bindings_keep_per_name_type_flags() {
        let mut recorder = ImportRecorder::new();
        recorder.record(ImportSpecifier {
            specifier: "./models.ts".to_string(),
            named: vec![named("User", true), named("STATUSES", false)],
            clause: None,
            type_only: false,
        });

        let consolidated = recorder.consolidate("./out", true);
        assert!(!consolidated[0].type_only);
        assert_eq!(
            consolidated[0].named,
            vec![named("User", true), named("STATUSES", false)]
        );
    }

    #[test]
    fn hoisting_can_be_disabled() {
        let mut recorder = ImportRecorder::new();
        recorder.record(ImportSpecifier {
            specifier: "./models.ts".to_string(),
            named: vec![named("User", true)],
            clause: None,
            type_only: false,
        });

        let consolidated = recorder.consolidate("./out", false);
        assert!(!consolidated[0].type_only);
        assert_eq!(consolidated[0].named, vec![named("User", true)]);
    }

    #[test]
    fn path_specifiers_resolve_relative_to_the_output_directory() {
        let mut recorder = ImportRecorder::new();
        recorder.record(ImportSpecifier {
            specifier: "./src/models.ts".to_string(),
            named: vec![named("User", true)],
            clause: None,
            type_only: false,
        });
        recorder.record(ImportSpecifier {
            specifier: "mocksmith-runtime".to_string(),
            named: vec![named("merge", false)],
            clause: None,
            type_only: false,
        });

        let consolidated = recorder.consolidate("./src/generated", true);
        assert_eq!(consolidated[0].specifier, "../models");
        assert_eq!(consolidated[1].specifier, "mocksmith-runtime");
    }
}
