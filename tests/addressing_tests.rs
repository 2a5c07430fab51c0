//! Integration tests for the addressing tree.

use std::sync::Arc;
use std::thread;

use rest_tree::rest::{
    CollectionKind, Container, Nesting, PathElement, PathError, ResourceKind, Root,
};
use rest_tree::Host;

// === Memoization ===

#[test]
fn test_nested_twice_returns_same_container() {
    let root = Root::new();
    let gears = root.nested("widgets").unwrap().nested("gears").unwrap();

    let widgets = root.nested("widgets").unwrap();
    let again = widgets.nested("gears").unwrap();
    let looked_up = widgets.nested_with("gears", &Nesting::lookup()).unwrap();

    assert_eq!(gears, again);
    assert_eq!(gears, looked_up);
}

#[test]
fn test_cloned_root_shares_registry() {
    let root = Root::new();
    let clone = root.clone();
    let widgets = root.nested("widgets").unwrap();

    assert!(clone.ptr_eq(&root));
    assert_eq!(clone.nested_with("widgets", &Nesting::lookup()).unwrap(), widgets);
}

#[test]
fn test_children_lists_registered_keys_only() {
    let root = Root::new();
    root.nested("widgets").unwrap();
    root.nested("gadgets").unwrap();
    root.nested_with("ephemeral", &Nesting::new().register(false))
        .unwrap();

    assert_eq!(root.children(), vec!["gadgets".to_string(), "widgets".to_string()]);
}

// === Validation ===

#[test]
fn test_separator_keys_are_rejected_everywhere() {
    let root = Root::new();
    let widgets = root.nested("widgets").unwrap();

    for key in ["a/b", "/", "widgets/", "/42"] {
        assert!(matches!(
            root.nested(key),
            Err(PathError::KeyContainsSeparator { .. })
        ));
        assert!(matches!(
            widgets.nested_with(key, &Nesting::new().register(false)),
            Err(PathError::KeyContainsSeparator { .. })
        ));
        assert!(matches!(
            Container::new(&root, key, None, None, false),
            Err(PathError::KeyContainsSeparator { .. })
        ));
    }
}

#[test]
fn test_duplicate_names_offending_child() {
    let root = Root::new();
    let widgets = root.nested("widgets").unwrap();
    Container::new(&widgets, "gears", None, None, true).unwrap();

    let error = Container::new(&widgets, "gears", None, None, true).unwrap_err();
    assert_eq!(
        error,
        PathError::Duplicate {
            key: "gears".to_string(),
            parent: "/widgets".to_string(),
        }
    );
    assert!(error.to_string().contains("gears"));
}

#[test]
fn test_unregistered_construction_does_not_conflict() {
    let root = Root::new();
    root.nested("widgets").unwrap();

    let shadow = Container::new(&root, "widgets", None, None, false).unwrap();
    assert_eq!(shadow.path(), "/widgets");
    assert_ne!(shadow, root.nested("widgets").unwrap());
}

// === Locators ===

#[test]
fn test_collection_form_adds_one_separator() {
    let host = Host::new("https://api.example.com").unwrap();
    let root = Root::new();
    let mut node = root.nested("a").unwrap();

    for key in ["b", "c", "d"] {
        let locator = host.locator(&node);
        assert_eq!(locator.as_collection(), format!("{}/", locator.as_resource()));
        node = node.nested(key).unwrap();
    }

    let locator = host.locator(&root);
    assert_eq!(locator.as_collection(), locator.as_resource());
}

#[test]
fn test_locator_reflects_host_at_call_time() {
    let root = Root::new();
    let widgets = root.nested("widgets").unwrap();

    let staging = Host::new("https://staging.example.com").unwrap();
    let prod = Host::new("https://api.example.com/v2").unwrap();

    assert_eq!(
        staging.locator(&widgets).as_collection(),
        "https://staging.example.com/widgets/"
    );
    assert_eq!(
        prod.locator(&widgets).as_resource(),
        "https://api.example.com/v2/widgets"
    );
}

// === Resolution ===

#[test]
fn test_resolve_round_trip() {
    let root = Root::new();
    let mut walked = vec![root.nested("api").unwrap()];
    for key in ["v1", "widgets", "gears"] {
        let next = walked.last().unwrap().nested(key).unwrap();
        walked.push(next);
    }
    let target = walked.last().unwrap();
    assert_eq!(target.path(), "/api/v1/widgets/gears");

    let resolved: Vec<Container> = root
        .resolve(target.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(resolved, walked);
}

#[test]
fn test_resolve_is_restartable_per_call() {
    let root = Root::new();
    root.nested("widgets").unwrap();

    let first: Vec<_> = root.resolve("/widgets").unwrap().collect();
    let second: Vec<_> = root.resolve("/widgets").unwrap().collect();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

#[test]
fn test_resolve_from_nested_element_is_relative() {
    let root = Root::new();
    let widgets = root.nested("widgets").unwrap();
    let gears = widgets.nested("gears").unwrap();

    let resolved: Vec<Container> = widgets
        .resolve("gears")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(resolved, vec![gears]);
}

#[test]
fn test_resolve_edge_cases() {
    let root = Root::new();
    assert!(matches!(root.resolve(""), Err(PathError::EmptyPath)));
    assert_eq!(root.resolve("/").unwrap().count(), 0);

    let mut missing = root.resolve("/nowhere").unwrap();
    assert!(matches!(
        missing.next(),
        Some(Err(PathError::ContainerNotRegistered { .. }))
    ));
}

#[test]
fn test_resolve_with_binds_kinds_on_created_nodes() {
    let root = Root::new();
    let nesting = Nesting::new()
        .collection(CollectionKind::namespace())
        .resource(ResourceKind::Plain);

    for container in root.resolve_with("/api/v1", nesting).unwrap() {
        let container = container.unwrap();
        assert_eq!(container.resource_kind(), Some(ResourceKind::Plain));
        assert_eq!(container.collection_kind().unwrap().resource(), None);
    }
}

// === Concurrency ===

#[test]
fn test_concurrent_registration_keeps_one_child_per_key() {
    let root = Arc::new(Root::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let root = Arc::clone(&root);
            thread::spawn(move || {
                (0..16)
                    .map(|n| root.nested(&format!("k{}", (i + n) % 4)).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        for container in handle.join().unwrap() {
            let registered = root.nested_with(container.key(), &Nesting::lookup()).unwrap();
            assert_eq!(container, registered);
        }
    }

    assert_eq!(root.children().len(), 4);
}
