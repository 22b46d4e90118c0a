//! A validated handler paired with the registration call it will make.

use http::Method;

use crate::controller::Action;
use crate::error::MountError;
use crate::field::FieldDescriptor;
use crate::group::RouteGroup;
use crate::resolve::{check_compatible, Resolved};
use crate::tag::MountTag;

/// One ready-to-commit registration.
///
/// Constructing a binding runs the kind-compatibility check, so an existing
/// binding always commits cleanly. A binding is consumed by exactly one
/// registration call and not retained afterward.
pub enum Binding<G: RouteGroup + ?Sized> {
    /// Commits through [`RouteGroup::register_route`]
    Route {
        method: Method,
        path: String,
        handler: G::Route,
    },
    /// Commits through [`RouteGroup::register_middleware`]
    Middleware { handler: G::Middleware },
}

impl<G: RouteGroup + ?Sized> Binding<G> {
    /// Pair a resolved handler with the field's call contract.
    pub fn new(descriptor: &FieldDescriptor, resolved: Resolved<G>) -> Result<Self, MountError> {
        check_compatible(descriptor, &resolved)?;

        match (&descriptor.tag, resolved.handler) {
            (MountTag::Route { method, path }, Action::Route(handler)) => Ok(Binding::Route {
                method: method.clone(),
                path: path.clone(),
                handler,
            }),
            (MountTag::Middleware, Action::Middleware(handler)) => {
                Ok(Binding::Middleware { handler })
            }
            // check_compatible rejects mixed combinations before this point
            (_, handler) => Err(MountError::TypeMismatch {
                field: descriptor.name.clone(),
                expected: descriptor.tag.kind(),
                found: handler.kind(),
            }),
        }
    }

    /// Commit the binding: exactly one registration call on the group.
    pub fn commit(self, group: &mut G) {
        match self {
            Binding::Route {
                method,
                path,
                handler,
            } => group.register_route(method, &path, handler),
            Binding::Middleware { handler } => group.register_middleware(handler),
        }
    }
}
