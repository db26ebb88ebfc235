//! Backend client tests against a mock server

use std::sync::Arc;

use manavault_api::{ApiError, BackendClient, Session};
use manavault_core::{CollectionCard, PriceField, ValueAggregator};
use manavault_http::{HttpClient, HttpClientTrait, HttpConfig, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "header.payload.signature";

fn http() -> Arc<dyn HttpClientTrait> {
    Arc::new(HttpClient::new(HttpConfig::fast()).unwrap())
}

fn client(server: &MockServer) -> BackendClient {
    BackendClient::new(http(), &server.uri(), Session::authenticated(TOKEN)).unwrap()
}

fn anonymous(server: &MockServer) -> BackendClient {
    BackendClient::new(http(), &server.uri(), Session::anonymous()).unwrap()
}

fn bolt() -> CollectionCard {
    CollectionCard {
        scryfall_id: "bolt-1".to_string(),
        name: "Lightning Bolt".to_string(),
        set_name: "Magic 2010".to_string(),
        image_url: "https://img.example/bolt.jpg".to_string(),
        price: Some(PriceField::Number(1.5)),
    }
}

#[tokio::test]
async fn test_login_posts_form_and_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("username=ana%40example.com&password=hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = anonymous(&server)
        .login("ana@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(token.access_token, TOKEN);
    assert_eq!(token.token_type, "bearer");
}

#[tokio::test]
async fn test_login_failure_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = anonymous(&server)
        .login("ana@example.com", "wrong")
        .await
        .unwrap_err();

    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(detail, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_register_sends_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({ "email": "ana@example.com", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "User created successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = anonymous(&server)
        .register("ana@example.com", "pw")
        .await
        .unwrap();
    assert_eq!(reply.message, "User created successfully");
}

#[tokio::test]
async fn test_password_reset_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/forgot-password"))
        .and(body_json(json!({ "email": "ana@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Password reset link sent to your email."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/reset-password"))
        .and(body_json(json!({ "token": "reset-token", "new_password": "new-pw" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Password reset successful" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = anonymous(&server);
    backend.forgot_password("ana@example.com").await.unwrap();
    let reply = backend.reset_password("reset-token", "new-pw").await.unwrap();
    assert_eq!(reply.message, "Password reset successful");
}

#[tokio::test]
async fn test_authenticated_calls_need_a_session() {
    let server = MockServer::start().await;
    let backend = anonymous(&server);

    assert!(matches!(backend.collection().await, Err(ApiError::NotAuthenticated)));
    assert!(matches!(backend.me().await, Err(ApiError::NotAuthenticated)));
    assert!(matches!(backend.decks().await, Err(ApiError::NotAuthenticated)));

    // Nothing reached the server
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_me_uses_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "ana@example.com" })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client(&server).me().await.unwrap();
    assert_eq!(profile.email, "ana@example.com");
}

#[tokio::test]
async fn test_collection_listing_and_totals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/collection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "1", "scryfall_id": "a", "name": "A", "set_name": "S", "image_url": "", "price": 3.5 },
            { "_id": "2", "scryfall_id": "b", "name": "B", "set_name": "S", "image_url": "" },
            { "_id": "3", "scryfall_id": "c", "name": "C", "set_name": "S", "image_url": "", "price": "not-a-number" },
            { "_id": "4", "scryfall_id": "d", "name": "D", "set_name": "S", "image_url": "", "price": 10.0 }
        ])))
        .mount(&server)
        .await;

    let collection = client(&server).collection().await.unwrap();
    let totals = ValueAggregator::aggregate(&collection);

    assert_eq!(totals.count, 4);
    assert_eq!(totals.display_total(), "$13.50 USD");
}

#[tokio::test]
async fn test_add_and_remove_collection_card() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/me/collection"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "scryfall_id": "bolt-1",
            "name": "Lightning Bolt",
            "set_name": "Magic 2010",
            "image_url": "https://img.example/bolt.jpg",
            "price": 1.5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Lightning Bolt added to your collection."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/me/collection/bolt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Card removed from your collection."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = client(&server);
    let added = backend.add_to_collection(&bolt()).await.unwrap();
    assert_eq!(added.message, "Lightning Bolt added to your collection.");

    let removed = backend.remove_from_collection("bolt-1").await.unwrap();
    assert_eq!(removed.message, "Card removed from your collection.");
}

#[tokio::test]
async fn test_remove_missing_card_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/me/collection/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Card not found in collection" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .remove_from_collection("ghost")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Card not found in collection"));
}

#[tokio::test]
async fn test_deck_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/me/decks"))
        .and(body_json(json!({ "name": "Burn", "cards": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "deck-1",
            "message": "Deck created successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/me/decks/deck-1"))
        .and(body_json(json!("Mono Red Burn")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Deck renamed successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/users/me/decks/deck-1/cards"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Lightning Bolt added to deck." })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me/decks/deck-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "deck-1",
            "name": "Mono Red Burn",
            "cards": [
                { "scryfall_id": "bolt-1", "name": "Lightning Bolt", "set_name": "Magic 2010", "image_url": "", "price": 1.5 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/me/decks/deck-1/cards/bolt-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Card removed from deck." })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/me/decks/deck-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Deck deleted successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = client(&server);

    let created = backend.create_deck("  Burn ").await.unwrap();
    let deck_id = created.id.unwrap();
    assert_eq!(deck_id, "deck-1");

    backend.rename_deck(&deck_id, " Mono Red Burn ").await.unwrap();
    backend.add_card_to_deck(&deck_id, &bolt()).await.unwrap();

    let deck = backend.deck(&deck_id).await.unwrap();
    assert_eq!(deck.name, "Mono Red Burn");
    assert_eq!(ValueAggregator::aggregate(&deck.cards).display_total(), "$1.50 USD");

    backend.remove_card_from_deck(&deck_id, "bolt-1").await.unwrap();
    backend.delete_deck(&deck_id).await.unwrap();
}

#[tokio::test]
async fn test_deck_listing_accepts_object_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/decks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": { "$oid": "65f0c0ffee" }, "name": "Storm", "cards": [] },
            { "_id": "plain-id", "name": "Burn" }
        ])))
        .mount(&server)
        .await;

    let decks = client(&server).decks().await.unwrap();
    let ids: Vec<_> = decks.iter().filter_map(|deck| deck.id.as_deref()).collect();
    assert_eq!(ids, vec!["65f0c0ffee", "plain-id"]);
}

#[tokio::test]
async fn test_blank_deck_name_is_rejected_locally() {
    let server = MockServer::start().await;
    let backend = client(&server);

    assert!(matches!(
        backend.rename_deck("deck-1", "   ").await,
        Err(ApiError::InvalidInput(_))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
