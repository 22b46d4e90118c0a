//! The controller registration pass: the driver that walks a manifest and
//! commits one binding per tagged field, plus the dry-run variant.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::binding::Binding;
use crate::controller::Controller;
use crate::error::MountError;
use crate::field::{FieldDescriptor, FieldSpec, HandlerKind};
use crate::group::{GroupRouter, RouteGroup};
use crate::resolve::{check_compatible, resolve, ResolvedVia};
use crate::tag::MountTag;

/// Apply `controller` to `router`: open a group at the controller's path and
/// register one route or middleware per tagged manifest field, in declared
/// order.
///
/// The pass is fail-fast. The first error — malformed tag, unusable
/// manifest, unresolvable handler, kind mismatch — aborts it and is
/// returned; fields after the failing one are never processed. Nothing is
/// rolled back: registrations committed before the failure remain in the
/// group. Callers treat a mount error as a startup configuration defect,
/// not a recoverable condition, so the partial group is never served.
///
/// On success the populated group is returned.
pub fn mount<M, C>(controller: &C, router: &mut M) -> Result<M::Group, MountError>
where
    M: GroupRouter,
    C: Controller<M::Group> + ?Sized,
{
    let shape = controller_shape(controller)?;
    let prefix = controller.path().to_string();
    let mut group = router.group(&prefix);

    for field in &shape {
        if let Err(err) = apply_field(field, controller, &mut group, &prefix) {
            error!(field = %field.name, error = %err, "registration pass aborted");
            return Err(err);
        }
    }

    info!(path = %prefix, fields = shape.len(), "controller mounted");
    Ok(group)
}

/// Dry-run the registration pass without a routing group.
///
/// Runs the same parse, resolve, and compatibility steps as [`mount`], with
/// the same fail-fast semantics, but commits nothing. Useful as a startup
/// lint: the returned plan is exactly what a mount would register.
pub fn validate<G, C>(controller: &C) -> Result<MountPlan, MountError>
where
    G: RouteGroup + ?Sized,
    C: Controller<G> + ?Sized,
{
    let shape = controller_shape(controller)?;
    let mut bindings = Vec::new();

    for field in &shape {
        let Some(descriptor) = FieldDescriptor::describe(field).map_err(|source| {
            MountError::Tag {
                field: field.name.clone(),
                source,
            }
        })?
        else {
            continue;
        };

        let resolved = resolve(&descriptor, controller)?;
        check_compatible(&descriptor, &resolved)?;

        bindings.push(PlannedBinding {
            field: descriptor.name.clone(),
            via: resolved.via,
            contract: ContractMeta::from_tag(&descriptor.tag),
        });
    }

    Ok(MountPlan {
        path: controller.path().to_string(),
        bindings,
    })
}

/// Run one field through Parse → Descriptor → Resolve → Check → Bind →
/// Commit. `Ok` covers both a commit and the legitimate skip.
fn apply_field<G, C>(
    field: &FieldSpec,
    controller: &C,
    group: &mut G,
    prefix: &str,
) -> Result<(), MountError>
where
    G: RouteGroup + ?Sized,
    C: Controller<G> + ?Sized,
{
    let Some(descriptor) = FieldDescriptor::describe(field).map_err(|source| MountError::Tag {
        field: field.name.clone(),
        source,
    })?
    else {
        debug!(field = %field.name, "no mount tag, field skipped");
        return Ok(());
    };

    let resolved = resolve(&descriptor, controller)?;
    let via = resolved.via;
    let binding = Binding::new(&descriptor, resolved)?;
    binding.commit(group);

    match &descriptor.tag {
        MountTag::Route { method, path } => {
            info!(
                field = %descriptor.name,
                via = ?via,
                method = %method,
                path = %format!("{prefix}{path}"),
                "route registered"
            );
        }
        MountTag::Middleware => {
            info!(field = %descriptor.name, via = ?via, path = %prefix, "middleware registered");
        }
    }

    Ok(())
}

/// Derive and validate the controller's shape.
///
/// An empty or duplicate field name makes resolution ambiguous, so the pass
/// is rejected before any group is opened.
fn controller_shape<G, C>(controller: &C) -> Result<Vec<FieldSpec>, MountError>
where
    G: RouteGroup + ?Sized,
    C: Controller<G> + ?Sized,
{
    let shape = controller.manifest();

    let mut seen = HashSet::new();
    for field in &shape {
        if field.name.is_empty() {
            return Err(MountError::InvalidManifest {
                detail: "field with empty name".to_string(),
            });
        }
        if !seen.insert(field.name.clone()) {
            return Err(MountError::InvalidManifest {
                detail: format!("duplicate field name: {}", field.name),
            });
        }
    }

    Ok(shape)
}

/// Dry-run output of [`validate`]: the registrations a mount would commit.
#[derive(Debug, Clone, Serialize)]
pub struct MountPlan {
    /// The controller's group prefix
    pub path: String,
    /// Planned registrations, in commit order
    pub bindings: Vec<PlannedBinding>,
}

impl MountPlan {
    /// The plan as a JSON value, for diagnostics output.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// One planned registration.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedBinding {
    /// Field the binding came from
    pub field: String,
    /// Resolution tier that supplied the handler
    pub via: ResolvedVia,
    /// The call contract the commit would use
    pub contract: ContractMeta,
}

/// Serializable view of a binding's call contract.
#[derive(Debug, Clone, Serialize)]
pub struct ContractMeta {
    pub kind: HandlerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ContractMeta {
    fn from_tag(tag: &MountTag) -> Self {
        match tag {
            MountTag::Route { method, path } => ContractMeta {
                kind: HandlerKind::Route,
                method: Some(method.to_string()),
                path: Some(path.clone()),
            },
            MountTag::Middleware => ContractMeta {
                kind: HandlerKind::Middleware,
                method: None,
                path: None,
            },
        }
    }
}
