#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Registry composition tests against the built-in module set.

use tally_kernel::modules::builtin_descriptors;
use tally_kernel::registry::{RegistryError, SETTINGS_PATH, compose};
use tally_kernel::view::AcceptAll;
use tally_sdk::prelude::*;
use tally_test_utils::test_module;

#[test]
fn test_builtin_modules_compose() {
    let registry = compose(builtin_descriptors()).expect("built-in modules compose");
    assert_eq!(registry.modules().len(), 8);
    assert_eq!(registry.modules().last().map(|m| m.id.clone()), Some(ModuleId::SETTINGS));
}

#[test]
fn test_nav_order_matches_registration() {
    let registry = compose(builtin_descriptors()).unwrap();
    let keys: Vec<_> = registry.nav_items().iter().map(|n| n.key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "dashboard",
            "clients",
            "projects",
            "timesheet",
            "invoices",
            "reports",
            "finance",
            "settings"
        ]
    );
}

#[test]
fn test_settings_pages_order() {
    let registry = compose(builtin_descriptors()).unwrap();
    let keys: Vec<_> = registry.settings_pages().iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["general", "profile", "invoice", "email", "finance"]);
    let orders: Vec<_> = registry.settings_pages().iter().map(|p| p.order).collect();
    assert_eq!(orders, vec![10, 20, 30, 40, 50]);
}

#[test]
fn test_settings_route_is_last_and_nested() {
    let registry = compose(builtin_descriptors()).unwrap();
    let last = registry.route_table().last().unwrap();
    assert_eq!(last.path, SETTINGS_PATH);
    assert_eq!(last.children.len(), 6);
    assert!(last.children[0].is_index());
}

#[test]
fn test_compose_is_idempotent() {
    let first = compose(builtin_descriptors()).unwrap();
    let second = compose(builtin_descriptors()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_module_rejected() {
    let err = compose(vec![test_module("clients").build(), test_module("clients").build()]).unwrap_err();
    assert_eq!(err, RegistryError::duplicate_module("clients"));
}

#[test]
fn test_duplicate_path_rejected() {
    let err = compose(vec![
        test_module("clients").build(),
        test_module("archive").at("/clients").build(),
    ])
    .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicatePath { ref path, .. } if path == "/clients"));
}

#[test]
fn test_ungated_toggleable_route_rejected() {
    let module = ModuleDescriptor::new(ModuleId::new("archive"))
        .toggleable(true)
        .route(RouteRecord::new("/archive").view(ViewRef::lazy("Archive")).requires_auth());
    let err = compose(vec![module]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::UngatedRoute {
            module: "archive".to_string(),
            path: "/archive".to_string(),
        }
    );
}

#[test]
fn test_nested_route_inherits_gate() {
    let registry = compose(vec![test_module("archive").toggleable().with_child("old").build()]).unwrap();
    let target = registry.resolve("/archive/old");
    assert!(target.requires_auth);
    assert_eq!(target.module_id, Some(ModuleId::new("archive")));
}

#[test]
fn test_resolve_prefers_static_segment_over_param() {
    let registry = compose(vec![
        test_module("projects").with_child("new").build(),
        test_module("tasks").at("/projects/:id").build(),
    ])
    .unwrap();
    assert_eq!(registry.resolve("/projects/new").pattern.as_deref(), Some("/projects/new"));
    let by_id = registry.resolve("/projects/42");
    assert_eq!(by_id.pattern.as_deref(), Some("/projects/:id"));
    assert_eq!(by_id.params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn test_resolve_index_child_carries_redirect() {
    let registry = compose(builtin_descriptors()).unwrap();
    let target = registry.resolve("/finance/");
    assert_eq!(target.redirect.as_deref(), Some("/finance/overview"));
    assert_eq!(target.module_id, Some(ModuleId::FINANCE));
}

#[test]
fn test_settings_pages_owned_by_settings_layout() {
    let registry = compose(builtin_descriptors()).unwrap();
    assert_eq!(registry.resolve("/settings/finance").module_id, Some(ModuleId::SETTINGS));
    assert_eq!(registry.resolve("/settings/general").module_id, Some(ModuleId::SETTINGS));
}

#[test]
fn test_unmatched_path_is_public() {
    let registry = compose(builtin_descriptors()).unwrap();
    let target = registry.resolve("/no/such/page");
    assert!(!target.requires_auth);
    assert!(target.module_id.is_none());
    assert!(target.pattern.is_none());
}

#[test]
fn test_check_views() {
    let registry = compose(builtin_descriptors()).unwrap();
    assert!(registry.check_views(&AcceptAll).is_ok());

    let reject_finance = |view: &ViewRef| !view.id.starts_with("finance/");
    let err = registry.check_views(&reject_finance).unwrap_err();
    assert!(matches!(err, RegistryError::UnresolvedView { ref module, .. } if module == "finance"));
}
