//! Message definitions and documentation comments of a descriptor set

use prost_types::{DescriptorProto, FileDescriptorProto};
use std::collections::BTreeMap;
use xservice_core::{GenError, GenResult};

/// Field numbers used in source location paths
mod path {
    pub const FILE_PACKAGE: i32 = 2;
    pub const FILE_MESSAGE: i32 = 4;
    pub const FILE_SERVICE: i32 = 6;
    pub const MESSAGE_NESTED: i32 = 3;
    pub const SERVICE_METHOD: i32 = 2;
}

/// Where a message is defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDefinition {
    /// Index of the defining file within the descriptor set
    pub file_index: usize,
    pub name: String,
    /// Names of the enclosing messages, outermost first
    pub lineage: Vec<String>,
    /// Source location path of the definition
    pub path: Vec<i32>,
}

impl MessageDefinition {
    /// Go type name: the lineage and the name joined by `_`
    pub fn go_name(&self) -> String {
        let mut parts = self.lineage.clone();
        parts.push(self.name.clone());
        parts.join("_")
    }
}

/// Lookup tables built once over every input file
#[derive(Debug, Clone, Default)]
pub struct Registry {
    messages: BTreeMap<String, MessageDefinition>,
    comments: Vec<BTreeMap<Vec<i32>, String>>,
}

impl Registry {
    pub fn new(files: &[FileDescriptorProto]) -> Self {
        let mut registry = Registry::default();
        for (file_index, file) in files.iter().enumerate() {
            let prefix = if file.package().is_empty() {
                String::new()
            } else {
                format!(".{}", file.package())
            };
            for (i, message) in file.message_type.iter().enumerate() {
                registry.register(
                    file_index,
                    &prefix,
                    message,
                    Vec::new(),
                    vec![path::FILE_MESSAGE, i as i32],
                );
            }
            registry.comments.push(leading_comments(file));
        }
        tracing::debug!(
            files = files.len(),
            messages = registry.messages.len(),
            "built message registry"
        );
        registry
    }

    fn register(
        &mut self,
        file_index: usize,
        prefix: &str,
        message: &DescriptorProto,
        lineage: Vec<String>,
        path: Vec<i32>,
    ) {
        let full_name = format!("{prefix}.{}", message.name());
        let mut nested_lineage = lineage.clone();
        nested_lineage.push(message.name().to_string());
        for (j, nested) in message.nested_type.iter().enumerate() {
            let mut nested_path = path.clone();
            nested_path.extend([path::MESSAGE_NESTED, j as i32]);
            self.register(file_index, &full_name, nested, nested_lineage.clone(), nested_path);
        }
        self.messages.insert(
            full_name,
            MessageDefinition {
                file_index,
                name: message.name().to_string(),
                lineage,
                path,
            },
        );
    }

    /// Definition of a fully qualified name such as `.example.Hello`
    pub fn message(&self, proto_name: &str) -> GenResult<&MessageDefinition> {
        self.messages
            .get(proto_name)
            .ok_or_else(|| GenError::UnknownMessage(proto_name.to_string()))
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Leading comment at a source location path.
    ///
    /// Fails with `EmptyComment` when nothing but whitespace is documented.
    pub fn leading_comment(&self, file_index: usize, path: &[i32]) -> GenResult<&str> {
        self.comments
            .get(file_index)
            .and_then(|comments| comments.get(path))
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenError::EmptyComment)
    }

    /// Comment attached to the `package` statement of a file
    pub fn file_comment(&self, file_index: usize) -> GenResult<&str> {
        self.leading_comment(file_index, &[path::FILE_PACKAGE])
    }

    pub fn message_comment(&self, definition: &MessageDefinition) -> GenResult<&str> {
        self.leading_comment(definition.file_index, &definition.path)
    }

    pub fn service_comment(&self, file_index: usize, service: usize) -> GenResult<&str> {
        self.leading_comment(file_index, &[path::FILE_SERVICE, service as i32])
    }

    pub fn method_comment(
        &self,
        file_index: usize,
        service: usize,
        method: usize,
    ) -> GenResult<&str> {
        self.leading_comment(
            file_index,
            &[path::FILE_SERVICE, service as i32, path::SERVICE_METHOD, method as i32],
        )
    }
}

fn leading_comments(file: &FileDescriptorProto) -> BTreeMap<Vec<i32>, String> {
    let Some(info) = &file.source_code_info else {
        return BTreeMap::new();
    };
    info.location
        .iter()
        .filter_map(|location| {
            let text = location.leading_comments.as_ref()?;
            Some((location.path.clone(), text.clone()))
        })
        .collect()
}

/// Comment text as lines: one trailing newline dropped and a single
/// leading space removed from every line.
///
/// Fails with `EmptyComment` when the text is blank.
pub fn prepare_comment(text: &str) -> GenResult<Vec<String>> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(GenError::EmptyComment);
    }
    Ok(text
        .split('\n')
        .map(|line| line.strip_prefix(' ').unwrap_or(line).to_string())
        .collect())
}
