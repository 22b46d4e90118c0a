//! The controller capability contract and the tagged handler value that
//! moves through the engine.

use std::fmt;

use crate::field::{FieldSpec, HandlerKind};
use crate::group::RouteGroup;

/// A handler value tagged with the call contract it satisfies.
///
/// Handlers are values of the target group's associated types; the engine
/// never looks inside them, only at the variant.
pub enum Action<G: RouteGroup + ?Sized> {
    /// A verb-route handler
    Route(G::Route),
    /// A group-wide middleware handler
    Middleware(G::Middleware),
}

impl<G: RouteGroup + ?Sized> Action<G> {
    /// The kind this handler value satisfies.
    #[must_use]
    pub fn kind(&self) -> HandlerKind {
        match self {
            Action::Route(_) => HandlerKind::Route,
            Action::Middleware(_) => HandlerKind::Middleware,
        }
    }
}

impl<G: RouteGroup + ?Sized> fmt::Debug for Action<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.kind()).finish()
    }
}

/// Capability a type needs to be mounted onto a routing group.
///
/// A controller exposes its path namespace, an ordered manifest of tagged
/// fields, and two name-keyed handler lookups — the resolver tiers. Both
/// lookups default to empty so an implementation only provides the style it
/// uses: handler methods registered in [`Controller::action`], pre-built
/// handler values surfaced through [`Controller::field_handler`], or a mix.
pub trait Controller<G: RouteGroup + ?Sized> {
    /// Namespace the controller's group is opened at, e.g. `/posts`.
    fn path(&self) -> &str;

    /// Ordered mount manifest, one entry per annotated field.
    ///
    /// Entry order is registration order.
    fn manifest(&self) -> Vec<FieldSpec>;

    /// Resolver tier 1: handlers keyed by conventional action name
    /// (the field name with [`crate::field::HANDLER_SUFFIX`]).
    fn action(&self, _name: &str) -> Option<Action<G>> {
        None
    }

    /// Resolver tier 2: handler values stored in fields, keyed by the
    /// original field name. `None` is the unset-field case.
    fn field_handler(&self, _name: &str) -> Option<Action<G>> {
        None
    }
}

/// Tier-1 action table for derived controllers.
///
/// `#[derive(Controller)]` cannot see a type's methods, so a derived
/// controller that wants method-style handlers opts in with
/// `#[mount(path = "...", actions)]` and implements this trait; the
/// generated [`Controller::action`] delegates here.
pub trait Actions<G: RouteGroup + ?Sized> {
    /// Look up a handler by conventional action name.
    fn action(&self, name: &str) -> Option<Action<G>>;
}
