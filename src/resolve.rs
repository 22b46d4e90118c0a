//! Two-tier handler resolution and the kind-compatibility check.

use serde::Serialize;
use tracing::debug;

use crate::controller::{Action, Controller};
use crate::error::MountError;
use crate::field::FieldDescriptor;
use crate::group::RouteGroup;

/// Which resolution tier produced a handler.
///
/// Recorded on every resolution so a surprising pick is diagnosable from
/// logs instead of from probing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedVia {
    /// Tier 1: the controller's action table, by conventional name
    Action,
    /// Tier 2: the field's own value
    Field,
}

/// A handler chosen for one field.
#[derive(Debug)]
pub struct Resolved<G: RouteGroup + ?Sized> {
    /// The handler value
    pub handler: Action<G>,
    /// The tier that found it
    pub via: ResolvedVia,
}

/// Find the handler for a described field.
///
/// Tier 1 looks up the conventional action name, tier 2 the original field
/// name. First match wins; a set field value never shadows an action-table
/// entry, and there is no fallback beyond the two tiers.
pub fn resolve<G, C>(descriptor: &FieldDescriptor, controller: &C) -> Result<Resolved<G>, MountError>
where
    G: RouteGroup + ?Sized,
    C: Controller<G> + ?Sized,
{
    let lookup = descriptor.lookup_name();

    if let Some(handler) = controller.action(&lookup) {
        debug!(field = %descriptor.name, action = %lookup, "handler resolved via action table");
        return Ok(Resolved {
            handler,
            via: ResolvedVia::Action,
        });
    }

    if let Some(handler) = controller.field_handler(&descriptor.name) {
        debug!(field = %descriptor.name, "handler resolved via field value");
        return Ok(Resolved {
            handler,
            via: ResolvedVia::Field,
        });
    }

    Err(MountError::ActionNotFound {
        field: descriptor.name.clone(),
    })
}

/// Verify the kinds a field declares, tags, and resolves to all agree.
///
/// The declared kind is the contract the controller author wrote; the
/// resolver may have found something structurally different, and the tag may
/// commit the field to the other call contract entirely. Either disagreement
/// would otherwise surface later as a bad registration inside the routing
/// group, so the pass is stopped here.
pub fn check_compatible<G: RouteGroup + ?Sized>(
    descriptor: &FieldDescriptor,
    resolved: &Resolved<G>,
) -> Result<(), MountError> {
    let found = resolved.handler.kind();
    if found != descriptor.kind {
        return Err(MountError::TypeMismatch {
            field: descriptor.name.clone(),
            expected: descriptor.kind,
            found,
        });
    }

    let contract = descriptor.tag.kind();
    if descriptor.kind != contract {
        return Err(MountError::TypeMismatch {
            field: descriptor.name.clone(),
            expected: contract,
            found: descriptor.kind,
        });
    }

    Ok(())
}
