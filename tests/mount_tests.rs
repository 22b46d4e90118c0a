//! End-to-end tests for the controller registration pass.
//!
//! # Test Coverage
//!
//! - Declared-order registration with untagged fields contributing nothing
//! - Group-wide middleware committed before later verb routes
//! - Fail-fast abort semantics: committed registrations remain, later
//!   fields are never processed (no rollback)
//! - Manifest shape validation
//! - The dry-run `validate` pass and its serialized plan

mod common;

use http::Method;
use tagmount::{
    mount, validate, Action, Controller, FieldSpec, HandlerKind, MemoryGroup, MemoryRouter,
    MountError, Registration, ResolvedVia, TagError,
};

type RouteFn = fn() -> &'static str;
type MwFn = fn() -> &'static str;
type Group = MemoryGroup<RouteFn, MwFn>;

fn list() -> &'static str {
    "list"
}

fn create() -> &'static str {
    "create"
}

fn auth() -> &'static str {
    "auth"
}

fn record() -> &'static str {
    "record"
}

struct Posts {
    auth: Option<RouteFn>,
    list: Option<RouteFn>,
    create: Option<RouteFn>,
}

impl Controller<Group> for Posts {
    fn path(&self) -> &str {
        "/posts"
    }

    fn manifest(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("auth", HandlerKind::Route, ""),
            FieldSpec::new("list", HandlerKind::Route, "GET /"),
            FieldSpec::new("create", HandlerKind::Route, "POST /"),
        ]
    }

    fn field_handler(&self, name: &str) -> Option<Action<Group>> {
        match name {
            "auth" => self.auth.map(Action::Route),
            "list" => self.list.map(Action::Route),
            "create" => self.create.map(Action::Route),
            _ => None,
        }
    }
}

fn posts() -> Posts {
    Posts {
        auth: Some(auth),
        list: Some(list),
        create: Some(create),
    }
}

#[test]
fn test_mount_registers_tagged_fields_in_declared_order() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();
    mount(&posts(), &mut router).unwrap();

    // The untagged auth field contributes nothing
    assert_eq!(
        router.registrations(),
        vec![
            Registration::Route {
                method: Method::GET,
                path: "/posts/".to_string()
            },
            Registration::Route {
                method: Method::POST,
                path: "/posts/".to_string()
            },
        ]
    );
}

#[test]
fn test_mount_returns_the_populated_group() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();
    let group = mount(&posts(), &mut router).unwrap();
    assert_eq!(group.prefix(), "/posts");
}

struct Metrics {
    record: Option<MwFn>,
    list: Option<RouteFn>,
}

impl Controller<Group> for Metrics {
    fn path(&self) -> &str {
        "/mw"
    }

    fn manifest(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("record", HandlerKind::Middleware, "USE"),
            FieldSpec::new("list", HandlerKind::Route, "GET /"),
        ]
    }

    fn field_handler(&self, name: &str) -> Option<Action<Group>> {
        match name {
            "record" => self.record.map(Action::Middleware),
            "list" => self.list.map(Action::Route),
            _ => None,
        }
    }
}

#[test]
fn test_middleware_commits_before_later_verb_routes() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();
    mount(
        &Metrics {
            record: Some(record),
            list: Some(list),
        },
        &mut router,
    )
    .unwrap();

    assert_eq!(
        router.registrations(),
        vec![
            Registration::Middleware,
            Registration::Route {
                method: Method::GET,
                path: "/mw/".to_string()
            },
        ]
    );
}

struct Broken;

impl Controller<Group> for Broken {
    fn path(&self) -> &str {
        "/broken"
    }

    fn manifest(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("list", HandlerKind::Route, "GET /"),
            FieldSpec::new("bad", HandlerKind::Route, "GET"),
            FieldSpec::new("create", HandlerKind::Route, "POST /"),
        ]
    }

    fn field_handler(&self, name: &str) -> Option<Action<Group>> {
        match name {
            "list" => Some(Action::Route(list as RouteFn)),
            "bad" | "create" => Some(Action::Route(create as RouteFn)),
            _ => None,
        }
    }
}

#[test]
fn test_malformed_tag_aborts_without_rollback() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();

    let err = mount(&Broken, &mut router).unwrap_err();
    assert_eq!(
        err,
        MountError::Tag {
            field: "bad".to_string(),
            source: TagError::MissingPath {
                verb: "GET".to_string()
            },
        }
    );

    // The field before the failure stays committed; the field after it was
    // never processed.
    assert_eq!(
        router.registrations(),
        vec![Registration::Route {
            method: Method::GET,
            path: "/broken/".to_string()
        }]
    );
}

#[test]
fn test_unresolvable_field_aborts_the_pass() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();
    let controller = Posts {
        auth: None,
        list: None,
        create: Some(create),
    };

    let err = mount(&controller, &mut router).unwrap_err();
    assert_eq!(
        err,
        MountError::ActionNotFound {
            field: "list".to_string()
        }
    );
    assert!(router.is_empty());
}

struct KindConfused {
    list: Option<MwFn>,
}

impl Controller<Group> for KindConfused {
    fn path(&self) -> &str {
        "/confused"
    }

    fn manifest(&self) -> Vec<FieldSpec> {
        vec![FieldSpec::new("list", HandlerKind::Route, "GET /")]
    }

    fn field_handler(&self, name: &str) -> Option<Action<Group>> {
        match name {
            "list" => self.list.map(Action::Middleware),
            _ => None,
        }
    }
}

#[test]
fn test_kind_mismatch_aborts_and_commits_nothing() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();

    let err = mount(&KindConfused { list: Some(record) }, &mut router).unwrap_err();
    assert_eq!(
        err,
        MountError::TypeMismatch {
            field: "list".to_string(),
            expected: HandlerKind::Route,
            found: HandlerKind::Middleware,
        }
    );
    assert!(router.is_empty());
}

struct Duplicated;

impl Controller<Group> for Duplicated {
    fn path(&self) -> &str {
        "/dup"
    }

    fn manifest(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("list", HandlerKind::Route, "GET /"),
            FieldSpec::new("list", HandlerKind::Route, "POST /"),
        ]
    }

    fn field_handler(&self, name: &str) -> Option<Action<Group>> {
        match name {
            "list" => Some(Action::Route(list as RouteFn)),
            _ => None,
        }
    }
}

#[test]
fn test_duplicate_field_names_reject_the_manifest() {
    common::init_tracing();
    let mut router: MemoryRouter<RouteFn, MwFn> = MemoryRouter::new();

    let err = mount(&Duplicated, &mut router).unwrap_err();
    assert_eq!(
        err,
        MountError::InvalidManifest {
            detail: "duplicate field name: list".to_string()
        }
    );
    assert!(router.is_empty());
}

#[test]
fn test_validate_plans_what_mount_would_commit() -> anyhow::Result<()> {
    common::init_tracing();
    let plan = validate::<Group, _>(&posts())?;

    assert_eq!(plan.path, "/posts");
    assert_eq!(plan.bindings.len(), 2);
    assert_eq!(plan.bindings[0].field, "list");
    assert_eq!(plan.bindings[0].via, ResolvedVia::Field);
    assert_eq!(plan.bindings[1].field, "create");

    let json = plan.to_json();
    assert_eq!(json["path"], "/posts");
    assert_eq!(json["bindings"][0]["contract"]["kind"], "route");
    assert_eq!(json["bindings"][0]["contract"]["method"], "GET");
    assert_eq!(json["bindings"][0]["contract"]["path"], "/");
    Ok(())
}

#[test]
fn test_validate_fails_fast_like_mount() {
    common::init_tracing();
    let err = validate::<Group, _>(&Broken).unwrap_err();
    assert_eq!(
        err,
        MountError::Tag {
            field: "bad".to_string(),
            source: TagError::MissingPath {
                verb: "GET".to_string()
            },
        }
    );
}
