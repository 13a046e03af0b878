//! The HTTP wire contract generated services speak
//!
//! Requests are always `POST /<prefix>/<package>.<Service>/<Method>` with a
//! JSON or protobuf body; errors are always a JSON [`ErrorBody`] with the
//! status taken from [`ErrorCode::http_status`].
//!
//! The generator builds routes, media type checks and routing messages from
//! this module; the error table and [`ErrorBody`] describe what the runtime
//! framework answers with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Path segment that precedes every service name
pub const DEFAULT_PROTOCOL_PREFIX: &str = "xservice";

/// Header carrying the framework version
pub const VERSION_HEADER: &str = "XService-Version";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Meta key set by routing errors
pub const INVALID_ROUTE_META: &str = "xservice_invalid_route";

/// Go format of the error for any verb other than POST, with one `%q` verb
pub const UNSUPPORTED_METHOD_FORMAT: &str = "unsupported method %q (only POST is allowed)";

/// Go format of the error for a path no method is routed at
pub const NO_HANDLER_FORMAT: &str = "no handler for path %q";

/// Go format of the error for a `Content-Type` no encoding matches
pub const UNEXPECTED_CONTENT_TYPE_FORMAT: &str = "unexpected Content-Type: %q";

/// Expand one of the routing formats the way Go's `%q` does for printable
/// text
pub fn routing_message(format: &str, value: &str) -> String {
    format.replacen("%q", &format!("{value:?}"), 1)
}

/// `package.Service`, or just `Service` without a schema package
pub fn full_service_name(package: &str, service: &str) -> String {
    if package.is_empty() {
        service.to_string()
    } else {
        format!("{package}.{service}")
    }
}

/// Base path of a service, with trailing slash
pub fn path_prefix(prefix: &str, full_service_name: &str) -> String {
    format!("/{prefix}/{full_service_name}/")
}

/// Complete path of one method
pub fn method_path(prefix: &str, full_service_name: &str, method: &str) -> String {
    format!("{}{method}", path_prefix(prefix, full_service_name))
}

/// Payload encodings a generated service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Json,
    Protobuf,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Json, ContentType::Protobuf];

    pub fn media_type(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Protobuf => "application/protobuf",
        }
    }

    /// Suffix of the generated client type and request helper
    pub fn client_suffix(self) -> &'static str {
        match self {
            ContentType::Json => "JSON",
            ContentType::Protobuf => "Protobuffer",
        }
    }

    /// Pick the encoding named by a `Content-Type` header value.
    ///
    /// Parameters after `;` are ignored and the media type is compared
    /// case-insensitively.
    pub fn negotiate(header: &str) -> Option<ContentType> {
        let media = header.split(';').next().unwrap_or_default();
        let media = media.trim().to_ascii_lowercase();
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.media_type() == media)
    }
}

/// Error codes carried in the `code` field of an error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Canceled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    BadRoute,
    AlreadyExists,
    PermissionDenied,
    Unauthenticated,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    #[serde(rename = "")]
    NoError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 18] = [
        ErrorCode::Canceled,
        ErrorCode::Unknown,
        ErrorCode::InvalidArgument,
        ErrorCode::DeadlineExceeded,
        ErrorCode::NotFound,
        ErrorCode::BadRoute,
        ErrorCode::AlreadyExists,
        ErrorCode::PermissionDenied,
        ErrorCode::Unauthenticated,
        ErrorCode::ResourceExhausted,
        ErrorCode::FailedPrecondition,
        ErrorCode::Aborted,
        ErrorCode::OutOfRange,
        ErrorCode::Unimplemented,
        ErrorCode::Internal,
        ErrorCode::Unavailable,
        ErrorCode::DataLoss,
        ErrorCode::NoError,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Canceled => "canceled",
            ErrorCode::Unknown => "unknown",
            ErrorCode::InvalidArgument => "invalid_argument",
            ErrorCode::DeadlineExceeded => "deadline_exceeded",
            ErrorCode::NotFound => "not_found",
            ErrorCode::BadRoute => "bad_route",
            ErrorCode::AlreadyExists => "already_exists",
            ErrorCode::PermissionDenied => "permission_denied",
            ErrorCode::Unauthenticated => "unauthenticated",
            ErrorCode::ResourceExhausted => "resource_exhausted",
            ErrorCode::FailedPrecondition => "failed_precondition",
            ErrorCode::Aborted => "aborted",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::Unimplemented => "unimplemented",
            ErrorCode::Internal => "internal",
            ErrorCode::Unavailable => "unavailable",
            ErrorCode::DataLoss => "data_loss",
            ErrorCode::NoError => "",
        }
    }

    /// HTTP status written alongside an error of this code.
    ///
    /// `resource_exhausted` answers 403, not 429.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::Canceled => 408,
            ErrorCode::Unknown => 500,
            ErrorCode::InvalidArgument => 400,
            ErrorCode::DeadlineExceeded => 408,
            ErrorCode::NotFound => 404,
            ErrorCode::BadRoute => 404,
            ErrorCode::AlreadyExists => 409,
            ErrorCode::PermissionDenied => 403,
            ErrorCode::Unauthenticated => 401,
            ErrorCode::ResourceExhausted => 403,
            ErrorCode::FailedPrecondition => 412,
            ErrorCode::Aborted => 409,
            ErrorCode::OutOfRange => 400,
            ErrorCode::Unimplemented => 501,
            ErrorCode::Internal => 500,
            ErrorCode::Unavailable => 503,
            ErrorCode::DataLoss => 500,
            ErrorCode::NoError => 200,
        }
    }

    pub fn from_str_code(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub msg: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            meta: BTreeMap::new(),
        }
    }

    /// A `bad_route` error recording the offending method and path
    pub fn bad_route(msg: impl Into<String>, method: &str, path: &str) -> Self {
        let mut body = Self::new(ErrorCode::BadRoute, msg);
        body.meta
            .insert(INVALID_ROUTE_META.to_string(), format!("{method} {path}"));
        body
    }

    /// The routing error for any verb other than POST
    pub fn unsupported_method(method: &str, path: &str) -> Self {
        Self::bad_route(
            routing_message(UNSUPPORTED_METHOD_FORMAT, method),
            method,
            path,
        )
    }

    pub fn no_handler(method: &str, path: &str) -> Self {
        Self::bad_route(routing_message(NO_HANDLER_FORMAT, path), method, path)
    }

    pub fn unexpected_content_type(header: &str, method: &str, path: &str) -> Self {
        Self::bad_route(
            routing_message(UNEXPECTED_CONTENT_TYPE_FORMAT, header),
            method,
            path,
        )
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// A caller tried to set a header the framework owns
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("provided header cannot set {0}")]
pub struct ReservedHeaderError(pub &'static str);

/// Reject caller-supplied headers that would override `Content-Type` or
/// the version header. Header names compare case-insensitively.
pub fn check_custom_headers<'a, I>(names: I) -> Result<(), ReservedHeaderError>
where
    I: IntoIterator<Item = &'a str>,
{
    for name in names {
        if name.eq_ignore_ascii_case(CONTENT_TYPE_HEADER) {
            return Err(ReservedHeaderError(CONTENT_TYPE_HEADER));
        }
        if name.eq_ignore_ascii_case(VERSION_HEADER) {
            return Err(ReservedHeaderError(VERSION_HEADER));
        }
    }
    Ok(())
}
