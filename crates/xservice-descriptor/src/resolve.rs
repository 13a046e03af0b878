//! The resolver pass: package names for every file and type lookup
//!
//! Resolution runs once per request, before any code is generated. Its
//! result is immutable and shared by every file that is generated.

use crate::package::{deduce_generated_package, dependency_package_name, go_package_option};
use crate::registry::Registry;
use prost_types::FileDescriptorProto;
use tracing::debug;
use xservice_core::{GenError, GenResult, Import, TypeReference};

/// Everything the generator needs to know about the input files
#[derive(Debug, Clone)]
pub struct GenerationContext {
    files: Vec<FileDescriptorProto>,
    to_generate: Vec<usize>,
    generated_package: String,
    package_names: Vec<String>,
    import_paths: Vec<Option<String>>,
    registry: Registry,
}

/// Resolve package names and build the registry.
///
/// Files to generate share one deduced package; every other file is named
/// independently. A name in `files_to_generate` that matches no input file
/// is an error.
pub fn resolve(
    files: Vec<FileDescriptorProto>,
    files_to_generate: &[String],
) -> GenResult<GenerationContext> {
    let mut to_generate = Vec::with_capacity(files_to_generate.len());
    for name in files_to_generate {
        let index = files
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| GenError::UnknownFile(name.clone()))?;
        to_generate.push(index);
    }

    let generated: Vec<&FileDescriptorProto> = to_generate.iter().map(|i| &files[*i]).collect();
    let generated_package = deduce_generated_package(&generated)?;

    let package_names = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            if to_generate.contains(&i) {
                generated_package.clone()
            } else {
                dependency_package_name(file)
            }
        })
        .collect();
    let import_paths = files
        .iter()
        .map(|file| go_package_option(file).and_then(|option| option.import_path))
        .collect();

    let registry = Registry::new(&files);
    debug!(
        package = %generated_package,
        files = files.len(),
        generating = to_generate.len(),
        "resolved descriptor set"
    );
    Ok(GenerationContext {
        files,
        to_generate,
        generated_package,
        package_names,
        import_paths,
        registry,
    })
}

impl GenerationContext {
    /// Package shared by every generated file
    pub fn generated_package(&self) -> &str {
        &self.generated_package
    }

    pub fn files(&self) -> &[FileDescriptorProto] {
        &self.files
    }

    /// Indices of the files to generate, in request order
    pub fn to_generate(&self) -> &[usize] {
        &self.to_generate
    }

    pub fn file(&self, index: usize) -> GenResult<&FileDescriptorProto> {
        self.files.get(index).ok_or_else(|| {
            GenError::InternalInvariantViolation(format!("no input file at index {index}"))
        })
    }

    pub fn package_of(&self, file_index: usize) -> Option<&str> {
        self.package_names.get(file_index).map(String::as_str)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Go type of a message as written inside the generated package.
    ///
    /// Messages from another package are qualified with that package's
    /// name and carry its import when the import path is known.
    pub fn type_reference(&self, proto_name: &str) -> GenResult<TypeReference> {
        let definition = self.registry.message(proto_name)?;
        let go_name = definition.go_name();
        let package = self.package_of(definition.file_index).ok_or_else(|| {
            GenError::InternalInvariantViolation(format!(
                "message {proto_name} belongs to an unknown file"
            ))
        })?;
        if package == self.generated_package {
            return TypeReference::named(&go_name);
        }
        let import = self
            .import_paths
            .get(definition.file_index)
            .cloned()
            .flatten()
            .map(|path| {
                if path.rsplit('/').next() == Some(package) {
                    Import::new(path)
                } else {
                    Import::aliased(path, package)
                }
            });
        TypeReference::qualified(package, &go_name, import)
    }

    /// Spelling of [`type_reference`](Self::type_reference)
    pub fn type_name(&self, proto_name: &str) -> GenResult<String> {
        self.type_reference(proto_name).map(|ty| ty.name())
    }
}
