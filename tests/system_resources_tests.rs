//! Integration tests for the system resources bound in the registry.

use directus_api::resources::{Field, FieldType, RelationDefinition, Role, Settings, VersionedRole};
use directus_api::rest::ResourceError;
use directus_api::{AccessToken, Directus, DirectusConfig, HttpError, InstanceUrl, Nullable};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directus(server: &MockServer) -> Directus {
    let config = DirectusConfig::builder()
        .instance(InstanceUrl::new(server.uri()).unwrap())
        .token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap();
    Directus::new(&config).unwrap()
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

fn role_json() -> serde_json::Value {
    json!({
        "id": "r1",
        "name": "Editor",
        "icon": "edit",
        "description": null,
        "parent": null,
        "children": [],
        "users": [],
        "policies": [
            {"id": "a1", "policy": "p1"},
            {"id": "a2", "policy": "p2"}
        ]
    })
}

async fn mount_server_version(server: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/server/info"))
        .respond_with(ok(json!({"version": version})))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_roles_on_directus_11_expand_policy_rows() {
    let server = MockServer::start().await;
    mount_server_version(&server, "11.1.2").await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .and(query_param("fields[]", "policies.policy"))
        .and(query_param("limit", "-1"))
        .respond_with(ok(json!([role_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let roles = directus(&server)
        .roles()
        .list(&CancellationToken::new(), &[])
        .await
        .unwrap();

    assert_eq!(roles.len(), 1);
    let role = roles[0].as_v11().expect("directus 11 role");
    assert_eq!(role.policies, vec!["p1", "p2"]);
    assert_eq!(role.access_id("p2"), Some("a2"));
    assert!(role.parent.is_none());
}

#[tokio::test]
async fn test_roles_on_directus_10_use_legacy_shape() {
    let server = MockServer::start().await;
    mount_server_version(&server, "10.13.1").await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .and(query_param("limit", "-1"))
        .respond_with(ok(json!([
            {"id": "r10", "name": "Administrator", "icon": "verified", "admin_access": true, "app_access": true, "users": ["u1"]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let directus = directus(&server);
    let cancel = CancellationToken::new();
    let roles = directus.roles().list(&cancel, &[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let roles_request = requests
        .iter()
        .find(|request| request.url.path() == "/roles")
        .unwrap();
    assert!(!roles_request.url.query_pairs().any(|(key, _)| key == "fields[]"));

    assert!(roles[0].policies().is_none());
    let role = roles[0].as_v10().expect("directus 10 role");
    assert!(role.admin_access);
    assert_eq!(role.users.as_deref(), Some(&["u1".to_string()][..]));

    // The version is read once per client.
    assert_eq!(directus.roles().server_major_version(&cancel).await.unwrap(), 10);
}

#[tokio::test]
async fn test_role_update_sends_policy_alterations() {
    let server = MockServer::start().await;
    mount_server_version(&server, "11.0.0").await;
    Mock::given(method("GET"))
        .and(path("/roles/r1"))
        .respond_with(ok(role_json()))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/roles/r1"))
        .and(body_json(json!({
            "id": "r1",
            "icon": "edit",
            "name": "Editor",
            "policies": {
                "create": [{"policy": "p3"}],
                "delete": ["a1"]
            }
        })))
        .respond_with(ok(json!({
            "id": "r1",
            "name": "Editor",
            "policies": [{"id": "a2", "policy": "p2"}, {"id": "a3", "policy": "p3"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let directus = directus(&server);
    let cancel = CancellationToken::new();
    let VersionedRole::V11(mut role) = directus.roles().get(&cancel, "r1", &[]).await.unwrap()
    else {
        panic!("expected a directus 11 role");
    };
    role.policies.retain(|policy| policy != "p1");
    role.policies.push("p3".to_string());

    let saved = directus
        .roles()
        .update(&cancel, "r1", &VersionedRole::V11(role))
        .await
        .unwrap();

    let saved = saved.as_v11().unwrap();
    assert_eq!(saved.policies, vec!["p2", "p3"]);
    assert_eq!(saved.access_id("p3"), Some("a3"));
}

#[tokio::test]
async fn test_role_in_wrong_shape_is_rejected_before_sending() {
    let server = MockServer::start().await;
    mount_server_version(&server, "10.8.3").await;
    Mock::given(method("POST"))
        .and(path("/roles"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let error = directus(&server)
        .roles()
        .create(&CancellationToken::new(), &Role::new("Interns").into())
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::RoleShapeMismatch { expected: 10 }));
}

#[tokio::test]
async fn test_roles_on_hidden_version_are_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/info"))
        .respond_with(ok(json!({"project": {"project_name": "Docs"}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let error = directus(&server)
        .roles()
        .list(&CancellationToken::new(), &[])
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::UnsupportedVersion { version } if version.is_empty()));
}

#[tokio::test]
async fn test_role_delete_skips_version_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/info"))
        .respond_with(ok(json!({"version": "11.0.0"})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/roles/r1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    directus(&server)
        .roles()
        .delete(&CancellationToken::new(), "r1")
        .await
        .unwrap();
}

// ============================================================================
// Fields and relations
// ============================================================================

#[tokio::test]
async fn test_field_create_without_collection_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let field = Field {
        field: "title".to_string(),
        ..Field::default()
    };
    let error = directus(&server)
        .fields()
        .create(&CancellationToken::new(), &field)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ResourceError::MissingKey { resource: "field", key: "collection" }
    ));
}

#[tokio::test]
async fn test_field_create_posts_to_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fields/articles"))
        .and(body_json(json!({"collection": "articles", "field": "title", "type": "string"})))
        .respond_with(ok(json!({
            "collection": "articles",
            "field": "title",
            "type": "string",
            "meta": null,
            "schema": {"name": "title", "table": "articles", "data_type": "character varying", "is_nullable": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let field = Field {
        collection: "articles".to_string(),
        field: "title".to_string(),
        field_type: FieldType::STRING,
        ..Field::default()
    };
    let created = directus(&server)
        .fields()
        .create(&CancellationToken::new(), &field)
        .await
        .unwrap();

    assert!(created.meta.is_none());
    assert!(created.schema.is_some());
}

#[tokio::test]
async fn test_field_get_forbidden_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fields/articles/secret"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let error = directus(&server)
        .fields()
        .get(&CancellationToken::new(), "articles", "secret")
        .await
        .unwrap_err();

    match error {
        ResourceError::NotFound { collection, id } => {
            assert_eq!(collection, "fields");
            assert_eq!(id, "articles.secret");
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_field_list_for_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fields/articles"))
        .respond_with(ok(json!([
            {"collection": "articles", "field": "id", "type": "integer"},
            {"collection": "articles", "field": "translations", "type": "alias", "schema": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let fields = directus(&server)
        .fields()
        .list_collection(&CancellationToken::new(), "articles")
        .await
        .unwrap();

    assert_eq!(fields[0].field_type, FieldType::INTEGER);
    assert_eq!(fields[1].field_type, FieldType::ALIAS);
    assert!(fields[1].schema.is_none());
}

#[tokio::test]
async fn test_relation_create_posts_to_relations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/relations"))
        .and(body_json(json!({
            "collection": "articles",
            "field": "author",
            "related_collection": "directus_users"
        })))
        .respond_with(ok(json!({
            "collection": "articles",
            "field": "author",
            "related_collection": "directus_users",
            "meta": {"id": 12, "one_field": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let relation = RelationDefinition {
        collection: "articles".to_string(),
        field: "author".to_string(),
        related_collection: Nullable::new("directus_users".to_string()),
        ..RelationDefinition::default()
    };
    let created = directus(&server)
        .relations()
        .create(&CancellationToken::new(), &relation)
        .await
        .unwrap();

    assert_eq!(created.meta.and_then(|meta| meta.id), Some(12));
}

#[tokio::test]
async fn test_relation_delete_requires_field() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let error = directus(&server)
        .relations()
        .delete(&CancellationToken::new(), "articles", "")
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::MissingKey { .. }));
}

// ============================================================================
// Singletons
// ============================================================================

#[tokio::test]
async fn test_settings_get_and_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ok(json!({
            "project_name": "Docs",
            "project_url": null,
            "storage_asset_presets": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/settings"))
        .and(body_json(json!({"project_url": "https://docs.example.com"})))
        .respond_with(ok(json!({
            "project_name": "Docs",
            "project_url": "https://docs.example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let directus = directus(&server);
    let cancel = CancellationToken::new();
    let settings = directus.settings().get(&cancel, &[]).await.unwrap();
    assert!(settings.project_url.is_null());
    assert!(settings.unknown.contains_key("storage_asset_presets"));

    let updated: Settings = directus
        .settings()
        .update(&cancel, &json!({"project_url": "https://docs.example.com"}))
        .await
        .unwrap();
    assert_eq!(
        updated.project_url.value().map(String::as_str),
        Some("https://docs.example.com")
    );
}

#[tokio::test]
async fn test_singleton_update_with_no_content_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/items/home"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let home = directus(&server).singleton::<serde_json::Value>("home");
    let error = home
        .update(&CancellationToken::new(), &json!({"headline": "Hi"}))
        .await
        .unwrap_err();

    assert!(matches!(error, ResourceError::Http(HttpError::Empty { .. })));
}

#[tokio::test]
async fn test_server_info_reports_version() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/info"))
        .respond_with(ok(json!({
            "project": {"project_name": "Docs"},
            "version": "11.2.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = directus(&server)
        .server_info(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(info.version_major_minor(), Some((11, 2)));
    assert_eq!(info.unknown["project"]["project_name"], json!("Docs"));
}

// ============================================================================
// Other system collections
// ============================================================================

#[tokio::test]
async fn test_permissions_use_numeric_keys() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/permissions/17"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    directus(&server)
        .permissions()
        .delete(&CancellationToken::new(), 17)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_files_list_decodes_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files"))
        .respond_with(ok(json!([
            {"id": "f1", "type": "image/png", "folder": null, "uploaded_on": "2024-05-01T12:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let files = directus(&server)
        .files()
        .list(&CancellationToken::new(), &[])
        .await
        .unwrap();

    assert_eq!(files[0].mime_type.as_deref(), Some("image/png"));
    assert!(files[0].folder.is_null());
    assert!(files[0].uploaded_on.is_some());
}
