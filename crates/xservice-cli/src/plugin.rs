//! The protoc plugin protocol

use anyhow::{Context, Result};
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use std::io::{Read, Write};
use tracing::{debug, error};
use xservice_core::{GenResult, LogLevel};
use xservice_generator::{GeneratedFile, GenerationRequest, Generator};
use xservice_logging::ReloadHandle;

/// Read one request from `input` and write the response to `output`
pub fn run(input: &mut impl Read, output: &mut impl Write) -> Result<()> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .context("Failed to read CodeGeneratorRequest from stdin")?;
    let request = CodeGeneratorRequest::decode(bytes.as_slice())
        .context("Failed to decode CodeGeneratorRequest")?;

    let response = respond(request)?;

    output
        .write_all(&response.encode_to_vec())
        .context("Failed to write CodeGeneratorResponse")?;
    output.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Generate for a decoded request.
///
/// Generation failures travel back to protoc in the response's `error`
/// field; only a request naming no files is rejected outright.
pub fn respond(request: CodeGeneratorRequest) -> Result<CodeGeneratorResponse> {
    if request.file_to_generate.is_empty() {
        anyhow::bail!("no files to generate");
    }
    debug!(
        files = request.file_to_generate.len(),
        compiler = ?request.compiler_version,
        "received plugin request"
    );

    let request = GenerationRequest {
        files: request.proto_file,
        files_to_generate: request.file_to_generate,
        parameter: request.parameter,
    };
    let supported_features = Some(Feature::Proto3Optional as u64);
    let response = match generate(request) {
        Ok(files) => CodeGeneratorResponse {
            supported_features,
            file: files.into_iter().map(response_file).collect(),
            ..Default::default()
        },
        Err(err) => {
            error!(code = err.error_code(), error = %err, "generation failed");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features,
                ..Default::default()
            }
        }
    };
    Ok(response)
}

/// Configure from the request parameter, apply its log level, then generate
pub(crate) fn generate(request: GenerationRequest) -> GenResult<Vec<GeneratedFile>> {
    let generator = Generator::for_request(&request)?;
    apply_log_level(generator.config().log_level());
    generator.generate(request)
}

fn apply_log_level(level: LogLevel) {
    match ReloadHandle::global().reload_level(level) {
        Ok(true) => debug!(%level, "applied configured log level"),
        Ok(false) => debug!("log level pinned by XSERVICE_LOG"),
        Err(err) => debug!(error = %err, "configured log level not applied"),
    }
}

fn response_file(file: GeneratedFile) -> File {
    File {
        name: Some(file.name),
        content: Some(file.content),
        ..Default::default()
    }
}
