use std::fmt;

use crate::field::HandlerKind;

/// Mount-tag grammar error
///
/// Returned by [`crate::tag::parse_tag`] when a tag is present but
/// malformed. An empty tag is not an error; it marks the field as
/// not-a-route and is skipped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// First token is neither the middleware marker nor a recognized verb
    UnknownVerb {
        /// The unrecognized token
        verb: String,
    },
    /// A verb token with no path after it
    MissingPath {
        /// The verb that was missing its path
        verb: String,
    },
    /// Route path does not start with `/`
    ///
    /// Group paths are joined by literal concatenation, so a relative path
    /// would silently fuse with the prefix.
    RelativePath {
        /// The offending path token
        path: String,
    },
    /// The middleware marker followed by extra tokens
    ///
    /// Middleware applies to the whole group and takes no path.
    MiddlewareWithPath {
        /// Everything after the marker
        rest: String,
    },
    /// More tokens than `<VERB> <path>`
    TrailingInput {
        /// Everything after the path
        rest: String,
    },
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::UnknownVerb { verb } => {
                write!(f, "unrecognized verb token '{}'", verb)
            }
            TagError::MissingPath { verb } => {
                write!(f, "verb '{}' declared with no path", verb)
            }
            TagError::RelativePath { path } => {
                write!(f, "route path '{}' must start with '/'", path)
            }
            TagError::MiddlewareWithPath { rest } => {
                write!(f, "middleware marker takes no path, found '{}'", rest)
            }
            TagError::TrailingInput { rest } => {
                write!(f, "unexpected input after path: '{}'", rest)
            }
        }
    }
}

impl std::error::Error for TagError {}

/// Fatal error of a controller registration pass
///
/// Every variant aborts the whole pass: there is no partial-field retry and
/// no fallback handler substitution. Registrations committed before the
/// failing field remain in the group (see `mount` for the no-rollback
/// contract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// A field carried a malformed mount tag
    Tag {
        /// Name of the field the tag was attached to
        field: String,
        /// The parse failure
        source: TagError,
    },
    /// The controller's manifest cannot be used as a shape
    ///
    /// Raised for an empty field name or a duplicate field name, either of
    /// which makes handler resolution ambiguous.
    InvalidManifest {
        /// What was wrong with the manifest
        detail: String,
    },
    /// Neither resolver tier yielded a usable handler
    ActionNotFound {
        /// Name of the field that resolved to nothing
        field: String,
    },
    /// The kinds declared, tagged, and resolved for a field disagree
    TypeMismatch {
        /// Name of the offending field
        field: String,
        /// The kind the field's declaration calls for
        expected: HandlerKind,
        /// The kind that was actually found
        found: HandlerKind,
    },
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::Tag { field, source } => {
                write!(f, "invalid mount tag on field '{}': {}", field, source)
            }
            MountError::InvalidManifest { detail } => {
                write!(f, "invalid controller manifest: {}", detail)
            }
            MountError::ActionNotFound { field } => {
                write!(f, "action not found: {}", field)
            }
            MountError::TypeMismatch {
                field,
                expected,
                found,
            } => {
                write!(
                    f,
                    "field and handler kinds do not match: '{}' declares {}, found {}",
                    field, expected, found
                )
            }
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MountError::Tag { source, .. } => Some(source),
            _ => None,
        }
    }
}
