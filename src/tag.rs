//! Mount-tag parsing.
//!
//! A mount tag is the single string annotation attached to a controller
//! field. The grammar is a flat token stream:
//!
//! - `""` (or whitespace) — the field is not a route or middleware; skipped.
//! - `USE` — register the field's handler as group-wide middleware.
//! - `<VERB> <path>` — register a route, e.g. `GET /` or `POST /items`.
//!
//! Anything else is a hard parse error. A tag has exactly one semantic
//! interpretation; malformed tags never degrade to a skip.

use std::collections::HashMap;

use http::Method;
use once_cell::sync::Lazy;

use crate::error::TagError;
use crate::field::HandlerKind;

/// Reserved marker registering a field as group-wide middleware.
pub const MIDDLEWARE_MARKER: &str = "USE";

/// Recognized verb tokens and the methods they map to.
///
/// Kept as a data table so the verb set can grow without touching the
/// parser.
static VERBS: Lazy<HashMap<&'static str, Method>> = Lazy::new(|| {
    HashMap::from([
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("PATCH", Method::PATCH),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("TRACE", Method::TRACE),
    ])
});

/// Parsed form of a mount tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTag {
    /// Register under a verb, at a path relative to the group prefix.
    Route {
        /// HTTP verb the route answers to
        method: Method,
        /// Path below the group prefix, starting with `/`
        path: String,
    },
    /// Register as middleware applied to the whole group.
    Middleware,
}

impl MountTag {
    /// The call contract this tag commits the field to.
    #[must_use]
    pub fn kind(&self) -> HandlerKind {
        match self {
            MountTag::Route { .. } => HandlerKind::Route,
            MountTag::Middleware => HandlerKind::Middleware,
        }
    }
}

/// Look up a verb token in the recognized set.
#[must_use]
pub fn recognized_verb(token: &str) -> Option<Method> {
    VERBS.get(token).cloned()
}

/// Parse one raw field tag.
///
/// Returns `Ok(None)` for an empty or all-whitespace tag: the field is not
/// part of the mount surface and the caller moves on. Every present but
/// malformed shape gets its own [`TagError`] variant.
pub fn parse_tag(raw: &str) -> Result<Option<MountTag>, TagError> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    let Some((&first, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    if first == MIDDLEWARE_MARKER {
        if !rest.is_empty() {
            return Err(TagError::MiddlewareWithPath {
                rest: rest.join(" "),
            });
        }
        return Ok(Some(MountTag::Middleware));
    }

    let Some(method) = recognized_verb(first) else {
        return Err(TagError::UnknownVerb {
            verb: first.to_string(),
        });
    };

    let path = match rest {
        [] => {
            return Err(TagError::MissingPath {
                verb: first.to_string(),
            })
        }
        [path] => *path,
        [_, extra @ ..] => {
            return Err(TagError::TrailingInput {
                rest: extra.join(" "),
            })
        }
    };

    if !path.starts_with('/') {
        return Err(TagError::RelativePath {
            path: path.to_string(),
        });
    }

    Ok(Some(MountTag::Route {
        method,
        path: path.to_string(),
    }))
}
