//! Integration tests for record persistence and navigation.
//!
//! Covers create/update through collections and records, validation
//! rejections landing on the record, reload, and nested member fetches.

use comm_api::{
    ApiPassword, ApiToken, AttributeBag, BaseUrl, Connection, MemberValue, Resource,
    ResourceCollection, ResourceError, TypeRegistry,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_connection(server: &MockServer) -> Connection {
    let mut registry = TypeRegistry::new();
    registry.register("message").unwrap();
    registry.register("attachment").unwrap();

    Connection::new(
        ApiToken::new("token").unwrap(),
        ApiPassword::new("password").unwrap(),
        &BaseUrl::new(&server.uri()).unwrap(),
        registry,
    )
}

/// Mounts the standard two-message collection and fetches it.
async fn fetch_messages(server: &MockServer, connection: &Connection) -> ResourceCollection {
    Mock::given(method("GET"))
        .and(path("/api/messages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"id": 1, "body": "hi"}, {"id": 2, "body": "yo"}]
        })))
        .mount(server)
        .await;

    connection.lookup("messages").await.unwrap().many().unwrap()
}

// ============================================================================
// find_by_id Tests
// ============================================================================

#[tokio::test]
async fn test_find_by_id_fetches_member_path() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/2.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 2, "body": "yo"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let message = messages.find_by_id("2").await.unwrap();
    assert_eq!(message["body"], json!("yo"));
    // The found record navigates and saves against the collection's path.
    assert_eq!(message.collection_path(), "/messages");
    assert_eq!(message.resource_path(), Some("/messages/2".to_string()));
}

#[tokio::test]
async fn test_find_by_id_missing_record_is_not_found() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/9.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = messages.find_by_id("9").await.unwrap_err();
    assert!(matches!(error, ResourceError::NotFound { .. }));
}

#[tokio::test]
async fn test_find_by_id_rejects_collection_payload() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"id": 2, "body": "yo"}]
        })))
        .mount(&server)
        .await;

    let error = messages.find_by_id("2").await.unwrap_err();
    assert!(matches!(error, ResourceError::UnexpectedPayload { .. }));
}

#[tokio::test]
async fn test_first_matching_does_not_touch_the_network() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;
    let requests_before = server.received_requests().await.unwrap().len();

    let found = messages
        .first_matching(|m| m.read_attribute("body") == Some(&json!("yo")))
        .expect("a match");
    assert_eq!(found.id(), Some(&json!(2)));
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        requests_before
    );
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_posts_wrapped_body_and_adopts_response() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let mut messages = fetch_messages(&server, &connection).await;

    Mock::given(method("POST"))
        .and(path("/api/messages.json"))
        .and(body_json(json!({"message": {"body": "new"}})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 3, "body": "new"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let before = messages.len();
    let message = messages
        .create(AttributeBag::from_value(&json!({"body": "new"})))
        .await
        .unwrap();

    assert!(!message.is_new_record());
    assert_eq!(message.id(), Some(&json!(3)));
    assert!(message.errors().is_empty());
    assert_eq!(messages.len(), before + 1);
    assert_eq!(messages[before].id(), Some(&json!(3)));
}

#[tokio::test]
async fn test_create_rejection_lands_on_the_record() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let mut messages = fetch_messages(&server, &connection).await;

    Mock::given(method("POST"))
        .and(path("/api/messages.json"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"body": "can't be blank"})),
        )
        .mount(&server)
        .await;

    let before = messages.len();
    let message = messages
        .create(AttributeBag::from_value(&json!({"body": ""})))
        .await
        .unwrap();

    assert!(message.is_new_record());
    assert_eq!(
        message.errors().get("body"),
        Some(&"can't be blank".to_string())
    );
    // The submitted attributes survive for correction and re-save.
    assert_eq!(message["body"], json!(""));
    assert_eq!(messages.len(), before);
}

// ============================================================================
// Save and Reload Tests
// ============================================================================

#[tokio::test]
async fn test_save_persisted_record_puts_full_body() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("PUT"))
        .and(path("/api/messages/1.json"))
        .and(body_json(json!({"message": {"id": 1, "body": "edited"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "body": "edited"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut message = messages[0].clone();
    message.write_attribute("body", json!("edited"));

    assert!(message.save().await.unwrap());
    assert_eq!(message["body"], json!("edited"));
}

#[tokio::test]
async fn test_save_rejection_keeps_record_resavable() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("PUT"))
        .and(path("/api/messages/1.json"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"errors": {"body": ["is too long"]}})),
        )
        .mount(&server)
        .await;

    let mut message = messages[0].clone();
    message.write_attribute("body", json!("way too long"));

    assert!(!message.save().await.unwrap());
    assert_eq!(message.errors().get("body"), Some(&"is too long".to_string()));
    assert_eq!(message["body"], json!("way too long"));
    assert!(!message.is_new_record());
}

#[tokio::test]
async fn test_reload_replaces_attributes() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/1.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "body": "hi", "read": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut message = messages[0].clone();
    message.write_attribute("body", json!("local edit"));
    message.reload().await.unwrap();

    assert_eq!(message["body"], json!("hi"));
    assert_eq!(message["read"], json!(true));
}

#[tokio::test]
async fn test_reload_new_record_skips_the_network() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let kind = connection.registry().resolve("message").unwrap().clone();
    let mut message = Resource::new(
        connection,
        kind,
        AttributeBag::from_value(&json!({"body": "draft"})),
    );

    message.reload().await.unwrap();
    assert_eq!(message["body"], json!("draft"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reload_rejects_collection_payload() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [{"id": 1, "body": "hi"}]
        })))
        .mount(&server)
        .await;

    let mut message = messages[0].clone();
    let error = message.reload().await.unwrap_err();
    assert!(matches!(error, ResourceError::UnexpectedPayload { .. }));
    // The bag is untouched by the failed reload.
    assert_eq!(message["body"], json!("hi"));
}

// ============================================================================
// Nested Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_attribute_wins_without_network() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;
    let requests_before = server.received_requests().await.unwrap().len();

    let value = messages[0].member("body").await.unwrap();
    assert!(matches!(value, MemberValue::Attribute(v) if v == json!("hi")));
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        requests_before
    );
}

#[tokio::test]
async fn test_member_fetches_nested_collection() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    Mock::given(method("GET"))
        .and(path("/api/messages/1/attachments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attachments": [{"id": 10, "filename": "cat.png"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = messages[0].member("attachments").await.unwrap();
    let attachments = match value {
        MemberValue::Related(fetched) => fetched.many().expect("a collection"),
        other => panic!("expected a related fetch, got {other:?}"),
    };

    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0]["filename"], json!("cat.png"));
    // Nested members navigate under their parent's path.
    assert_eq!(attachments.collection_path(), "/messages/1/attachments");
}

#[tokio::test]
async fn test_member_on_new_record_needs_an_id() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let mut messages = fetch_messages(&server, &connection).await;

    Mock::given(method("POST"))
        .and(path("/api/messages.json"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"body": "required"})))
        .mount(&server)
        .await;

    let message = messages
        .create(AttributeBag::from_value(&json!({})))
        .await
        .unwrap();

    let error = message.member("attachments").await.unwrap_err();
    assert!(matches!(error, ResourceError::MissingId { .. }));
}

#[tokio::test]
async fn test_member_unknown_name_is_unresolved() {
    let server = MockServer::start().await;
    let connection = create_test_connection(&server);
    let messages = fetch_messages(&server, &connection).await;

    let error = messages[0].member("widgets").await.unwrap_err();
    assert!(matches!(error, ResourceError::UnresolvedName { ref name } if name == "widgets"));
}
