//! Routing-group contracts: the narrow seam between the mount engine and
//! whatever router actually serves the routes.

use http::Method;

/// A path-prefixed bundle of routes and middleware.
///
/// The engine commits every binding through exactly one of these two entry
/// points. Route storage, matching, and dispatch are the implementer's
/// business; the group decides how its prefix combines with the registered
/// path.
pub trait RouteGroup {
    /// Handler type accepted by verb routes.
    type Route;
    /// Handler type accepted by group-wide middleware.
    type Middleware;

    /// Register a route for `method` at `path` (relative to the group
    /// prefix).
    fn register_route(&mut self, method: Method, path: &str, handler: Self::Route);

    /// Register middleware applied to the whole group.
    fn register_middleware(&mut self, handler: Self::Middleware);
}

/// Opens route groups at a path prefix.
pub trait GroupRouter {
    /// Group type handed back to the caller once populated.
    type Group: RouteGroup;

    /// Open a group whose routes live under `prefix`, e.g. `/posts`.
    fn group(&mut self, prefix: &str) -> Self::Group;
}
