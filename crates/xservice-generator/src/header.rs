//! Comment block at the top of every generated file

use crate::service::comment_lines;
use xservice_codegen::Comment;
use xservice_core::GenResult;
use xservice_descriptor::GenerationContext;

/// Header of one generated file.
///
/// The first file of a run also documents the package: the leading
/// comment of its schema `package` statement and the list of files the
/// package was generated from.
pub(crate) fn file_header(
    ctx: &GenerationContext,
    file_index: usize,
    first_of_run: bool,
    version: &str,
) -> GenResult<Comment> {
    let file = ctx.file(file_index)?;
    let mut header = Comment::new();
    header
        .line(format!(
            "Code generated by protoc-gen-xservice {version}, DO NOT EDIT."
        ))
        .line(format!("source: {}", file.name()));
    if !first_of_run {
        return Ok(header);
    }

    header
        .line("")
        .line(format!(
            "Package {} is a generated stub package.",
            ctx.generated_package()
        ))
        .line(format!(
            "This code was generated with github.com/donutloop/xservice {version}"
        ));
    if let Some(lines) = comment_lines(ctx.registry().file_comment(file_index))? {
        header.line("");
        for line in lines {
            header.line(line.replace("*/", "* /"));
        }
    }
    header.line("").line("It is generated from these files:");
    for index in ctx.to_generate() {
        header.line(format!("\t{}", ctx.file(*index)?.name()));
    }
    Ok(header)
}
