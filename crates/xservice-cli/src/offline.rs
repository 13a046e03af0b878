//! Generation from a serialized descriptor set, without protoc

use crate::plugin::generate;
use anyhow::{Context, Result};
use prost::Message;
use prost_types::FileDescriptorSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;
use xservice_generator::GenerationRequest;

/// Generate `files` (every file of the set when empty) into `out`, returning
/// the written paths
pub fn run(
    descriptor_set: &Path,
    out: &Path,
    files: Vec<String>,
    parameter: Option<String>,
) -> Result<Vec<PathBuf>> {
    let bytes = fs::read(descriptor_set)
        .with_context(|| format!("Failed to read descriptor set: {:?}", descriptor_set))?;
    let set = FileDescriptorSet::decode(bytes.as_slice())
        .with_context(|| format!("Failed to decode FileDescriptorSet: {:?}", descriptor_set))?;

    let files_to_generate = if files.is_empty() {
        set.file.iter().map(|file| file.name().to_string()).collect()
    } else {
        files
    };
    let generated = generate(GenerationRequest {
        files: set.file,
        files_to_generate,
        parameter,
    })?;

    let mut written = Vec::with_capacity(generated.len());
    for file in generated {
        let path = output_path(out, &file.name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&path, file.content)
            .with_context(|| format!("Failed to write generated file: {:?}", path))?;
        info!(path = %path.display(), "wrote generated file");
        written.push(path);
    }
    Ok(written)
}

/// Join a generated name onto `out`, refusing names that escape it
fn output_path(out: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let escapes = relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if escapes {
        anyhow::bail!("Generated file name escapes the output directory: {name}");
    }
    Ok(out.join(relative))
}
