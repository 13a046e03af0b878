//! Turning a generation request into Go files

use crate::VERSION;
use crate::client::client;
use crate::config::{GeneratorConfig, PathsMode};
use crate::descriptor::{descriptor_var, descriptor_var_name};
use crate::framework::Framework;
use crate::header::file_header;
use crate::interface::service_interface;
use crate::server::{ServerMetadata, server};
use crate::service::ServiceModel;
use prost_types::FileDescriptorProto;
use tracing::{debug, info, warn};
use xservice_codegen::GoFile;
use xservice_core::naming::go_file_name;
use xservice_core::{GenError, GenResult};
use xservice_descriptor::package::go_package_option;
use xservice_descriptor::{GenerationContext, resolve};

/// The decoded input of one generator run
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Every schema file of the run, dependencies included
    pub files: Vec<FileDescriptorProto>,
    /// Names of the files to generate code for, in output order
    pub files_to_generate: Vec<String>,
    /// Raw plugin parameter, `key=value` pairs separated by commas
    pub parameter: Option<String>,
}

/// One output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub content: String,
}

/// Generates Go stubs for every service of the requested files
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    framework: Framework,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            framework: Framework::new(config.framework.clone()),
            config,
        })
    }

    /// Generator configured from the request's own parameter
    pub fn for_request(request: &GenerationRequest) -> GenResult<Self> {
        let config = match &request.parameter {
            Some(parameter) => GeneratorConfig::from_parameter(parameter)?,
            None => GeneratorConfig::default(),
        };
        Self::new(config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve the descriptor set, then render each file to generate.
    ///
    /// Any failure aborts the whole run; no partial output is returned.
    /// Files without services produce no output.
    pub fn generate(&self, request: GenerationRequest) -> GenResult<Vec<GeneratedFile>> {
        let ctx = resolve(request.files, &request.files_to_generate)?;
        let mut generated = Vec::new();
        for &file_index in ctx.to_generate() {
            let file = ctx.file(file_index)?;
            if file.service.is_empty() {
                warn!(file = %file.name(), "file defines no services, nothing generated");
                continue;
            }
            let output = self.generate_file(&ctx, file_index, generated.len())?;
            info!(
                file = %output.name,
                bytes = output.content.len(),
                "generated file"
            );
            generated.push(output);
        }
        Ok(generated)
    }

    /// Render one file. `run_index` counts the files already generated in
    /// this run and numbers the embedded descriptor.
    fn generate_file(
        &self,
        ctx: &GenerationContext,
        file_index: usize,
        run_index: usize,
    ) -> GenResult<GeneratedFile> {
        let file = ctx.file(file_index)?;
        let mut go_file = GoFile::new(ctx.generated_package(), file.name())?;
        go_file.header_comment(file_header(ctx, file_index, run_index == 0, VERSION)?);
        for import in self.framework.imports() {
            go_file.add_import(import);
        }

        let descriptor_name = descriptor_var_name(run_index);
        let metadata = ServerMetadata {
            descriptor_var: &descriptor_name,
            version: VERSION,
        };
        let content_types = self.config.ordered_content_types();
        for service_index in 0..file.service.len() {
            let service =
                ServiceModel::resolve(ctx, file_index, service_index, &self.config.path_prefix)?;
            debug!(
                service = %service.name,
                methods = service.methods.len(),
                "generating service"
            );

            go_file.add_interface(service_interface(&service)?);
            if self.config.mode.emits_clients() {
                for content_type in &content_types {
                    let declarations = client(&service, &self.framework, *content_type)?;
                    go_file.add_func(declarations.constructor);
                    go_file.add_type_with_methods(declarations.structure);
                }
            }
            let declarations = server(&service, &self.framework, &content_types, &metadata)?;
            go_file.add_const(declarations.path_prefix);
            go_file.add_func(declarations.constructor);
            go_file.add_type_with_methods(declarations.structure);
        }
        go_file.add_var(descriptor_var(file, run_index)?);

        let content = String::from_utf8(go_file.render_and_format()?).map_err(|err| {
            GenError::InternalInvariantViolation(format!("generated source is not UTF-8: {err}"))
        })?;
        Ok(GeneratedFile {
            name: self.output_name(file, go_file.file_name()),
            content,
        })
    }

    fn output_name(&self, file: &FileDescriptorProto, source_relative: &str) -> String {
        if self.config.paths == PathsMode::SourceRelative {
            return source_relative.to_string();
        }
        match go_package_option(file).and_then(|option| option.import_path) {
            Some(import_path) => {
                let last = file.name().rsplit('/').next().unwrap_or_default();
                format!("{import_path}/{}", go_file_name(last))
            }
            None => source_relative.to_string(),
        }
    }
}

/// Generate with the configuration carried in the request's parameter
pub fn generate(request: GenerationRequest) -> GenResult<Vec<GeneratedFile>> {
    Generator::for_request(&request)?.generate(request)
}
