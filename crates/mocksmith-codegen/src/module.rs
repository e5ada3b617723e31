use std::collections::HashSet;

use tracing::info;

use mocksmith_entity::FileEntity;

use crate::context::Context;
use crate::dispatch::{function_name, lower_declaration};
use crate::errors::CodegenError;
use crate::imports::ImportRecorder;
use crate::program::GeneratedModule;

#[derive(Debug, Clone)]
pub struct CodegenOptions {
    /// Prefix for generated module names, applied to the source file
    /// name.
    pub module_name_prefix: String,
    /// Hoist an import line to type-only when all its named bindings
    /// are type-only.
    pub consolidate_type_imports: bool,
    /// Randomly leave out optional properties instead of always
    /// synthesizing them. Matches types compiled with exact optional
    /// property semantics.
    pub exact_optional_properties: bool,
    /// Directory the generated module notionally lives in; path
    /// imports resolve relative to it.
    pub output_dir: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            module_name_prefix: "gen-".to_string(),
            consolidate_type_imports: true,
            exact_optional_properties: false,
            output_dir: ".".to_string(),
        }
    }
}

/// Lower one file entity into a generated module.
pub fn codegen_file(
    file: &FileEntity,
    options: &CodegenOptions,
) -> Result<GeneratedModule, CodegenError> {
    info!(
        file = %file.name,
        declarations = file.type_declarations.len(),
        "lowering file"
    );

    let mut seen: HashSet<String> = HashSet::new();
    for declaration in &file.type_declarations {
        if !seen.insert(function_name(&declaration.name)) {
            return Err(CodegenError::DuplicateFunction(function_name(
                &declaration.name,
            )));
        }
    }

    let context = Context::for_file(file);
    let mut imports = ImportRecorder::new();
    let functions = file
        .type_declarations
        .iter()
        .map(|declaration| lower_declaration(declaration, &context, options, &mut imports))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GeneratedModule {
        name: format!("{}{}", options.module_name_prefix, file.name),
        source_path: file.path.clone(),
        imports: imports.consolidate(&options.output_dir, options.consolidate_type_imports),
        functions,
    })
}
