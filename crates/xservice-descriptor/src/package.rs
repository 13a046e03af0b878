//! Go package names for schema files
//!
//! A file's package comes from its `go_package` option when present, else
//! from its schema package, else from its file name.

use prost_types::FileDescriptorProto;
use xservice_core::naming::{base_name, sanitize};
use xservice_core::{GenError, GenResult};

/// An interpreted `go_package` option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoPackageOption {
    /// Import path, present when the option contains a `/`
    pub import_path: Option<String>,
    pub name: String,
}

/// Interpret a `go_package` value.
///
/// A bare name has no import path. With a slash, the last element names
/// the package unless a `;name` suffix overrides it.
///
/// ```
/// use xservice_descriptor::package::parse_go_package;
///
/// let opt = parse_go_package("github.com/acme/api/v1;apiv1");
/// assert_eq!(opt.import_path.as_deref(), Some("github.com/acme/api/v1"));
/// assert_eq!(opt.name, "apiv1");
/// assert_eq!(parse_go_package("hello").name, "hello");
/// ```
pub fn parse_go_package(option: &str) -> GoPackageOption {
    let Some(slash) = option.rfind('/') else {
        return GoPackageOption {
            import_path: None,
            name: option.to_string(),
        };
    };
    match option.find(';') {
        Some(semicolon) => GoPackageOption {
            import_path: Some(option[..semicolon].to_string()),
            name: option[semicolon + 1..].to_string(),
        },
        None => GoPackageOption {
            import_path: Some(option.to_string()),
            name: option[slash + 1..].to_string(),
        },
    }
}

/// The file's `go_package` option, if set and non-empty
pub fn go_package_option(file: &FileDescriptorProto) -> Option<GoPackageOption> {
    let option = file.options.as_ref()?.go_package();
    if option.is_empty() {
        None
    } else {
        Some(parse_go_package(option))
    }
}

/// Package name of a file and whether it was set explicitly through
/// `go_package`
pub fn go_package_name(file: &FileDescriptorProto) -> (String, bool) {
    if let Some(option) = go_package_option(file) {
        return (option.name, true);
    }
    if !file.package().is_empty() {
        return (file.package().to_string(), false);
    }
    (file.name().to_string(), false)
}

/// The single package every file to generate shares.
///
/// Explicit `go_package` names must agree with each other and win over
/// everything else. Without any, the implicit names must agree.
pub fn deduce_generated_package(files: &[&FileDescriptorProto]) -> GenResult<String> {
    let mut deduced: Option<String> = None;
    for file in files {
        let (name, explicit) = go_package_name(file);
        if !explicit {
            continue;
        }
        let name = sanitize(base_name(&name));
        match &deduced {
            Some(first) if *first != name => {
                return Err(GenError::ConflictingPackageName {
                    setting: "go_package settings, must be the same",
                    first: first.clone(),
                    second: name,
                });
            }
            _ => deduced = Some(name),
        }
    }
    if let Some(name) = deduced {
        return Ok(name);
    }

    for file in files {
        let (name, _) = go_package_name(file);
        let name = sanitize(base_name(&name));
        match &deduced {
            Some(first) if *first != name => {
                return Err(GenError::ConflictingPackageName {
                    setting: "package names, must be the same or overridden with go_package",
                    first: first.clone(),
                    second: name,
                });
            }
            _ => deduced = Some(name),
        }
    }
    deduced.ok_or_else(|| {
        GenError::InternalInvariantViolation("no files to deduce a package from".to_string())
    })
}

/// Package name of a dependency file, decided on its own
pub fn dependency_package_name(file: &FileDescriptorProto) -> String {
    if let Some(option) = go_package_option(file) {
        return sanitize(&option.name);
    }
    if !file.package().is_empty() {
        return sanitize(file.package());
    }
    sanitize(base_name(file.name()))
}
