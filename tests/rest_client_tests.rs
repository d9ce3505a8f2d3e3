//! Integration tests for resource registration and tree addressing.
//!
//! These tests exercise the public registration API without touching the
//! network.

use rest_resource::rest::{join_url, resolve_template, RESERVED_NAMES};
use rest_resource::{
    ApiUrl, ClientConfig, ConfigError, DataType, Payload, RegisterError, Resource, RestClient,
};
use serde_json::json;

/// Creates a client rooted at the given API base URL.
fn create_client(api: &str) -> RestClient {
    RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new(api).unwrap())
            .build()
            .unwrap(),
    )
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_requires_api() {
    let result = ClientConfig::builder().data_type(DataType::Raw).build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "api" })
    ));
}

#[test]
fn test_config_data_type_parsed_from_string() {
    let data_type: DataType = "raw".parse().unwrap();
    let client = RestClient::new(
        ClientConfig::builder()
            .api(ApiUrl::new("https://api.example.com").unwrap())
            .data_type(data_type)
            .build()
            .unwrap(),
    );
    assert_eq!(client.config().data_type(), DataType::Raw);
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_registering_same_name_and_template_returns_identical_node() {
    let client = create_client("https://api.example.com");

    let first = client.register("/items/:id", "items").unwrap();
    let second = client.register("/items/:id", "items").unwrap();

    assert!(Resource::ptr_eq(&first, &second));
}

#[test]
fn test_registering_same_name_with_different_template_fails() {
    let client = create_client("https://api.example.com");
    client.register("/items/:id", "items").unwrap();

    let error = client.register("/things/:id", "items").unwrap_err();
    assert!(matches!(error, RegisterError::AlreadyRegistered { ref name, .. } if name == "items"));
    assert!(error.to_string().contains("has been registered"));
}

#[test]
fn test_reserved_names_always_fail_on_client_and_resource() {
    let client = create_client("https://api.example.com");
    let items = client.register("/items", "items").unwrap();

    for name in RESERVED_NAMES {
        assert!(matches!(
            client.register("/x", name),
            Err(RegisterError::ReservedName { .. })
        ));
        assert!(matches!(
            items.register("/x", name),
            Err(RegisterError::ReservedName { .. })
        ));
    }
    assert_eq!(client.resource_names(), vec!["items"]);
    assert!(items.resource_names().is_empty());
}

#[test]
fn test_dotted_names_are_rejected_so_lookup_stays_unambiguous() {
    let client = create_client("https://api.example.com");
    let users = client.register("/users/:id", "users").unwrap();

    assert!(matches!(
        client.register("/x", "users.keys"),
        Err(RegisterError::DottedName { .. })
    ));
    assert!(matches!(
        users.register("/x", "a.b"),
        Err(RegisterError::DottedName { .. })
    ));
    assert!(client.lookup("users.keys").is_none());
}

#[test]
fn test_conflicting_registration_leaves_original_intact() {
    let client = create_client("https://api.example.com");
    let original = client.register("/items/:id", "items").unwrap();
    let _ = client.register("/other", "items");

    let current = client.resource("items").unwrap();
    assert!(Resource::ptr_eq(&original, &current));
    assert_eq!(current.url_template(), "/items/:id");
}

#[test]
fn test_fluent_chaining_builds_nested_tree() {
    let client = create_client("https://gitlab.com/api/v3");

    let keys = client
        .register("/users/:id", "users")
        .and_then(|users| users.register("/users/:uid/keys", "keys"))
        .unwrap();

    assert_eq!(keys.qualified_name(), "users.keys");
    assert!(Resource::ptr_eq(&client.lookup("users.keys").unwrap(), &keys));
    assert_eq!(keys.parent().unwrap().name(), "users");
}

#[test]
fn test_every_node_reaches_the_same_client() {
    let client = create_client("https://gitlab.com/api/v3");
    let a = client.register("/a", "a").unwrap();
    let b = a.register("/b", "b").unwrap();
    let c = b.register("/c", "c").unwrap();

    for node in [&a, &b, &c] {
        assert!(std::ptr::eq(node.http_client(), client.http_client()));
    }
}

#[test]
fn test_resource_url_joins_base_and_own_template() {
    let client = create_client("https://gitlab.com/api/v3/");
    let users = client.register("/users/:id", "users").unwrap();
    let keys = users.register("//users/:uid/keys", "keys").unwrap();

    assert_eq!(users.url(), "https://gitlab.com/api/v3/users/:id");
    assert_eq!(keys.url(), "https://gitlab.com/api/v3/users/:uid/keys");
}

// ============================================================================
// URL helpers
// ============================================================================

#[test]
fn test_template_resolution_examples() {
    let template = "/users/:uid/keys";
    assert_eq!(
        resolve_template(template, &Payload::from(json!({"uid": 1596}))),
        "/users/1596/keys"
    );
    assert_eq!(
        resolve_template(template, &Payload::from(json!({}))),
        "/users//keys"
    );
}

#[test]
fn test_join_url_single_slash_regardless_of_input() {
    for (base, fragment) in [
        ("https://gitlab.com/api/v3/", "/users"),
        ("https://gitlab.com/api/v3", "users"),
        ("https://gitlab.com/api/v3//", "//users"),
    ] {
        assert_eq!(join_url(base, fragment), "https://gitlab.com/api/v3/users");
    }
}
