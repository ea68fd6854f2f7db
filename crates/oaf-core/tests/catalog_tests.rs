use oaf_core::analyzer::{EndpointCatalog, SpecAnalyzer};
use oaf_core::schema::{SchemaKind, SchemaType};
use oaf_core::HttpMethod;

const USERS_API: &str = include_str!("fixtures/users-api.yaml");

#[test]
fn load_users_api_yaml() {
    let catalog = EndpointCatalog::from_yaml(USERS_API).expect("should parse users-api.yaml");
    assert_eq!(catalog.len(), 7);

    let create = &catalog.endpoints()[1];
    assert_eq!(create.method, HttpMethod::Post);
    assert_eq!(create.operation_id, "createUser");
    assert!(create.requires_auth());
    assert_eq!(create.success_status(), 201);

    let body = create.request_schema.as_ref().expect("should have request schema");
    assert_eq!(body.required(), ["username".to_string(), "email".to_string()]);

    let names: Vec<&str> = body.properties().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["username", "email", "age", "role", "nickname"]);
}

#[test]
fn schema_constraints_survive_loading() {
    let catalog = EndpointCatalog::from_yaml(USERS_API).unwrap();
    let body = catalog.endpoints()[1].request_schema.as_ref().unwrap();
    let object = body.as_object().unwrap();

    match &object.properties["username"].kind {
        SchemaKind::String(s) => {
            assert_eq!(s.min_length, Some(3));
            assert_eq!(s.max_length, Some(20));
        }
        other => panic!("expected string, got {other:?}"),
    }

    match &object.properties["age"].kind {
        SchemaKind::Integer(n) => {
            assert_eq!(n.minimum, Some(18.0));
            assert_eq!(n.maximum, Some(120.0));
        }
        other => panic!("expected integer, got {other:?}"),
    }

    let role = &object.properties["role"];
    assert_eq!(role.default, Some(serde_json::json!("member")));
    assert_eq!(role.schema_type(), Some(SchemaType::String));
}

#[test]
fn path_parameters_and_fallbacks() {
    let catalog = EndpointCatalog::from_yaml(USERS_API).unwrap();
    let delete = catalog
        .endpoints()
        .iter()
        .find(|ep| ep.operation_id == "deleteUser")
        .expect("should have deleteUser");

    assert_eq!(delete.path_params(), vec!["id"]);
    assert_eq!(delete.success_status(), 204);
    assert!(delete.success_schema().is_none());
    assert!(delete.summary.is_none());
}

#[test]
fn authentication_flow_from_catalog() {
    let catalog = EndpointCatalog::from_yaml(USERS_API).unwrap();
    let flow = catalog
        .authentication_flow()
        .expect("login endpoint should be detected");
    assert_eq!(flow.operation_id, "login");
    assert_eq!(flow.credential_fields, vec!["username", "password"]);
    assert_eq!(flow.token_field, "token");
}

#[test]
fn catalog_round_trips_through_json() {
    let catalog = EndpointCatalog::from_yaml(USERS_API).unwrap();
    let json = serde_json::to_string(&catalog).unwrap();
    let reloaded = EndpointCatalog::from_json(&json).unwrap();
    assert_eq!(reloaded, catalog);
}
