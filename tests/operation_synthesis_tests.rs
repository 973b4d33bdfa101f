//! Integration tests for resource declaration and operation synthesis.
//!
//! These tests go through the public API only: descriptors are declared,
//! registered, and their operations turned into requests.

use kazoo_api::clients::MockTransport;
use kazoo_api::rest::{
    ExtraView, MethodKind, OperationArgs, OperationKind, PathTemplate, Registry,
    ResourceDescriptor, Scope,
};
use kazoo_api::{ApiKey, ConfigError, HttpMethod, KazooClient, KazooConfig, KazooError};
use std::sync::Arc;

fn device_registry() -> Registry {
    Registry::from_descriptors([ResourceDescriptor::builder(
        "device",
        "/accounts/{account_id}/devices/{device_id}",
    )
    .build()
    .unwrap()])
    .unwrap()
}

// ============================================================================
// Path Templates
// ============================================================================

#[test]
fn test_required_args_and_object_arg_split_on_last_placeholder() {
    let cases = [
        ("/accounts/{account_id}", vec![], "account_id"),
        (
            "/accounts/{account_id}/devices/{device_id}",
            vec!["account_id"],
            "device_id",
        ),
        (
            "/accounts/{account_id}/phone_numbers/{phone_number}/docs/{filename}",
            vec!["account_id", "phone_number"],
            "filename",
        ),
    ];

    for (path, required, object) in cases {
        let template = PathTemplate::new(path);
        assert_eq!(template.required_args().unwrap(), required, "{path}");
        assert_eq!(template.object_arg().unwrap(), object, "{path}");
    }
}

#[test]
fn test_template_without_placeholder_is_configuration_error() {
    for path in ["/about", "/accounts", ""] {
        let result = ResourceDescriptor::builder("thing", path).build();
        assert!(
            matches!(result, Err(ConfigError::NoPathParameters { .. })),
            "{path}"
        );
    }
}

// ============================================================================
// Synthesis
// ============================================================================

#[test]
fn test_list_detail_and_object_view_synthesize_three_operations() {
    let descriptor = ResourceDescriptor::builder("queue", "/accounts/{account_id}/queues/{queue_id}")
        .methods(&[MethodKind::List, MethodKind::Detail])
        .extra_view(ExtraView::new("get_roster", "roster").scope(Scope::Object))
        .build()
        .unwrap();
    let registry = Registry::from_descriptors([descriptor]).unwrap();

    assert_eq!(registry.len(), 3);

    let roster = registry.operation("get_roster").unwrap();
    assert_eq!(roster.kind(), OperationKind::ExtraView(Scope::Object));
    assert!(roster.signature().contains(&"queue_id"));
}

#[test]
fn test_device_detail_round_trip() {
    let registry = device_registry();
    let detail = registry.operation("get_device").unwrap();

    let request = detail
        .build_request(&OperationArgs::with_params([
            ("account_id", "A1"),
            ("device_id", "D1"),
        ]))
        .unwrap();

    assert_eq!(request.path, "/accounts/A1/devices/D1");
    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.http_method.to_string(), "get");
}

#[test]
fn test_parameter_values_cannot_escape_their_segment() {
    let registry = device_registry();
    let detail = registry.operation("get_device").unwrap();

    let braces = detail
        .build_request(&OperationArgs::with_params([
            ("account_id", "A1"),
            ("device_id", "{x}"),
        ]))
        .unwrap();
    assert_eq!(braces.path, "/accounts/A1/devices/%7Bx%7D");

    let traversal = detail
        .build_request(&OperationArgs::with_params([
            ("account_id", "A1"),
            ("device_id", "D1/../../../about?x=#"),
        ]))
        .unwrap();
    assert_eq!(
        traversal.path,
        "/accounts/A1/devices/D1%2F..%2F..%2F..%2Fabout%3Fx%3D%23"
    );
    assert!(traversal.query.is_none());
}

#[test]
fn test_system_view_path_is_absolute() {
    let descriptor = ResourceDescriptor::builder("user", "/accounts/{account_id}/users/{user_id}")
        .extra_view(ExtraView::new("get_system_websockets", "websockets").scope(Scope::System))
        .build()
        .unwrap();
    let registry = Registry::from_descriptors([descriptor]).unwrap();
    let op = registry.operation("get_system_websockets").unwrap();

    for account_id in ["A1", "B2", "something-else"] {
        let request = op
            .build_request(&OperationArgs::new().param("account_id", account_id))
            .unwrap();
        assert_eq!(request.path, "/websockets");
    }
}

#[test]
fn test_json_table_matches_builder() {
    let from_json = Registry::from_json(
        r#"[{
            "name": "device",
            "path": "/accounts/{account_id}/devices/{device_id}",
            "extra_views": [
                "status",
                {"name": "reboot_device", "path": "sync", "scope": "object", "method": "post"}
            ]
        }]"#,
    )
    .unwrap();
    let from_builder = Registry::from_descriptors([ResourceDescriptor::builder(
        "device",
        "/accounts/{account_id}/devices/{device_id}",
    )
    .extra_view(ExtraView::from_path("status"))
    .extra_view(
        ExtraView::new("reboot_device", "sync")
            .method(HttpMethod::Post)
            .scope(Scope::Object),
    )
    .build()
    .unwrap()])
    .unwrap();

    let json_ops: Vec<_> = from_json.operations().collect();
    let builder_ops: Vec<_> = from_builder.operations().collect();
    assert_eq!(json_ops, builder_ops);
}

#[test]
fn test_json_table_with_bad_verb_is_rejected() {
    let result = Registry::from_json(
        r#"[{
            "name": "device",
            "path": "/accounts/{account_id}/devices/{device_id}",
            "extra_views": [{"name": "x", "path": "x", "method": "trace"}]
        }]"#,
    );

    assert!(matches!(result, Err(ConfigError::UnknownVerb { .. })));
}

// ============================================================================
// Missing Parameters
// ============================================================================

#[tokio::test]
async fn test_missing_object_param_fails_before_any_transport_call() {
    let transport = Arc::new(MockTransport::new());
    let config = KazooConfig::builder()
        .api_key(ApiKey::new("key-123").unwrap())
        .build()
        .unwrap();
    let client = KazooClient::with_transport(&config, device_registry(), transport.clone());

    let result = client
        .call("get_device", &OperationArgs::new().param("account_id", "A1"))
        .await;

    assert!(matches!(
        result,
        Err(KazooError::MissingParameter { name }) if name == "device_id"
    ));
    assert_eq!(transport.call_count(), 0);
}
