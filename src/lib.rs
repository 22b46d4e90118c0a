//! # tagmount
//!
//! Declarative controller mounting: derive, validate, and bind routes and
//! middleware onto a web-routing group from a tag-annotated field manifest,
//! instead of registering them call by call.
//!
//! A controller declares one annotated field per route or middleware it
//! wants mounted. Each field carries a compact mount tag — `"GET /"`,
//! `"POST /items"`, `"USE"`, or empty for "not a route" — and the engine
//! walks the manifest in declared order, finds a handler for every tagged
//! field, checks the kinds line up, and commits one registration per field
//! against the routing group.
//!
//! ## Architecture
//!
//! The pipeline, leaf first:
//!
//! - **[`tag`]** — parses one tag string into route/middleware metadata
//! - **[`field`]** — joins tag metadata with the field's declared name and
//!   kind, and derives the conventional action name
//! - **[`mod@resolve`]** — two-tier handler lookup: action table by
//!   conventional name, then field value by original name; plus the
//!   kind-compatibility check
//! - **[`binding`]** — a validated handler paired with its registration
//!   call
//! - **[`mod@mount`]** — the driver: per-field loop, fail-fast abort semantics,
//!   and the dry-run [`validate`]
//! - **[`group`]** — the narrow contracts the engine registers through;
//!   routing, matching, and dispatch live on the other side of them
//! - **[`memory`]** — an in-memory recording implementation of those
//!   contracts for tests, examples, and adapter authors
//!
//! The engine has no HTTP semantics of its own: it never parses a request,
//! never serves a route, and returns before any traffic exists. Every error
//! it can produce is a startup-time configuration defect.
//!
//! ## Failure semantics
//!
//! A registration pass is all-or-nothing in intent but fail-fast in
//! mechanism: the first malformed tag, unresolvable handler, or kind
//! mismatch aborts the pass, and registrations already committed to the
//! group remain there (no rollback). Treat a [`MountError`] as fatal to
//! startup and the partial group is never observable.
//!
//! ## Quick start
//!
//! ```
//! use tagmount::{mount, Action, Controller, FieldSpec, HandlerKind, MemoryGroup, MemoryRouter};
//!
//! type RouteFn = fn() -> &'static str;
//! type Group = MemoryGroup<RouteFn, RouteFn>;
//!
//! struct Posts {
//!     list: Option<RouteFn>,
//! }
//!
//! impl Controller<Group> for Posts {
//!     fn path(&self) -> &str {
//!         "/posts"
//!     }
//!
//!     fn manifest(&self) -> Vec<FieldSpec> {
//!         vec![FieldSpec::new("list", HandlerKind::Route, "GET /")]
//!     }
//!
//!     fn field_handler(&self, name: &str) -> Option<Action<Group>> {
//!         match name {
//!             "list" => self.list.map(Action::Route),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let posts = Posts {
//!     list: Some(|| "all posts"),
//! };
//! let mut router: MemoryRouter<RouteFn, RouteFn> = MemoryRouter::new();
//! mount(&posts, &mut router).expect("mount posts controller");
//! assert_eq!(router.registrations().len(), 1);
//! ```
//!
//! Controllers can also be derived. `tagmount_macros` generates the
//! manifest, path accessor, and field lookup from the struct itself, so
//! declaration order and tag text live in one place:
//!
//! ```ignore
//! use tagmount_macros::Controller;
//!
//! #[derive(Controller)]
//! #[mount(path = "/posts")]
//! struct Posts {
//!     #[mount("GET /")]
//!     list: Option<RouteFn>,
//!     #[mount("POST /")]
//!     create: Option<RouteFn>,
//! }
//! ```
//!
//! Handler *methods* are the other resolution tier: a field `list` first
//! looks for an action named `list_handler` (see
//! [`field::HANDLER_SUFFIX`]), and only then falls back to the field's own
//! value. Hand-written controllers override [`Controller::action`]; derived
//! controllers opt in with `#[mount(path = "...", actions)]` and implement
//! [`Actions`].

pub mod binding;
pub mod controller;
pub mod error;
pub mod field;
pub mod group;
pub mod memory;
pub mod mount;
pub mod resolve;
pub mod tag;

pub use binding::Binding;
pub use controller::{Action, Actions, Controller};
pub use error::{MountError, TagError};
pub use field::{FieldDescriptor, FieldSpec, HandlerKind, HANDLER_SUFFIX};
pub use group::{GroupRouter, RouteGroup};
pub use memory::{MemoryEntry, MemoryGroup, MemoryRouter, Registration};
pub use mount::{mount, validate, ContractMeta, MountPlan, PlannedBinding};
pub use resolve::{check_compatible, resolve, Resolved, ResolvedVia};
pub use tag::{parse_tag, recognized_verb, MountTag, MIDDLEWARE_MARKER};
