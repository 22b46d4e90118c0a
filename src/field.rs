//! Field descriptors: the per-field join of parsed tag metadata with the
//! field's declared name and kind.

use std::fmt;

use serde::Serialize;

use crate::error::TagError;
use crate::tag::{parse_tag, MountTag};

/// Suffix appended to a field name to derive its conventional action name.
///
/// A field `list` looks up the action `list_handler` before falling back to
/// the field's own value.
pub const HANDLER_SUFFIX: &str = "_handler";

/// Declared class of a controller field: which call contract its handler
/// satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    /// A verb-route handler
    Route,
    /// A group-wide middleware handler
    Middleware,
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Route => write!(f, "route"),
            HandlerKind::Middleware => write!(f, "middleware"),
        }
    }
}

/// One entry of a controller's mount manifest.
///
/// The manifest is ordered; entry order is registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Declared field name, the tier-2 lookup key
    pub name: String,
    /// Declared handler kind of the field
    pub kind: HandlerKind,
    /// Raw mount tag, possibly empty
    pub tag: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: HandlerKind, tag: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            kind,
            tag: tag.into(),
        }
    }
}

/// A field whose tag parsed to something mountable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Parsed tag
    pub tag: MountTag,
    /// Declared field name
    pub name: String,
    /// Declared handler kind
    pub kind: HandlerKind,
}

impl FieldDescriptor {
    /// Parse a manifest entry's tag and join it with the field declaration.
    ///
    /// Propagates the parser's legitimate skip as `Ok(None)`; a malformed
    /// tag is an error, never a skip.
    pub fn describe(field: &FieldSpec) -> Result<Option<Self>, TagError> {
        let Some(tag) = parse_tag(&field.tag)? else {
            return Ok(None);
        };
        Ok(Some(FieldDescriptor {
            tag,
            name: field.name.clone(),
            kind: field.kind,
        }))
    }

    /// Conventional action-table name: the field name with [`HANDLER_SUFFIX`].
    ///
    /// A pure function of the field name; collisions are left to resolver
    /// order.
    #[must_use]
    pub fn lookup_name(&self) -> String {
        format!("{}{}", self.name, HANDLER_SUFFIX)
    }
}
