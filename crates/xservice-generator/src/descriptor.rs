//! The compressed schema descriptor embedded in every generated file

use flate2::Compression;
use flate2::write::GzEncoder;
use prost::Message;
use prost_types::FileDescriptorProto;
use std::io::Write;
use xservice_codegen::{Comment, Var};
use xservice_core::{GenError, GenResult};

/// Name of the descriptor variable of the `index`th generated file
pub fn descriptor_var_name(index: usize) -> String {
    format!("xserviceFileDescriptor{index}")
}

/// The file descriptor without source info, serialized and gzipped at
/// best compression
pub fn compressed_descriptor(file: &FileDescriptorProto) -> GenResult<Vec<u8>> {
    let mut stripped = file.clone();
    stripped.source_code_info = None;
    let encoded = stripped.encode_to_vec();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(&encoded)
        .map_err(|err| GenError::Encode(err.to_string()))?;
    encoder
        .finish()
        .map_err(|err| GenError::Encode(err.to_string()))
}

/// `var xserviceFileDescriptor<N> = []byte{...}`
pub fn descriptor_var(file: &FileDescriptorProto, index: usize) -> GenResult<Var> {
    let data = compressed_descriptor(file)?;
    let mut comment = Comment::new();
    comment.line(format!("{} bytes of a gzipped FileDescriptorProto", data.len()));
    Ok(Var::bytes(&descriptor_var_name(index), &data)?.with_comment(comment))
}
