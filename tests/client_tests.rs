/// Endpoint tests for `PurrrClient` against an in-process mock HTTP server.
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use purrr_love_sdk::*;

fn client_for(server: &MockServer) -> PurrrClient {
    PurrrClient::new(ClientConfig::new(&server.uri()).with_api_key("test-key")).unwrap()
}

fn cat_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "species": "cat",
        "breed": "bengal",
        "personality_type": "playful",
        "mood": "happy",
        "level": 3,
        "experience": 250,
        "created_at": "2024-03-01T12:00:00Z"
    })
}

async fn mount(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Cats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_cats_sends_paging_and_decodes_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cats"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [cat_json(1, "Whiskers"), cat_json(2, "Mittens")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cats = client_for(&server).get_cats(10, 20).await.unwrap();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0].name, "Whiskers");
    assert_eq!(cats[1].personality_type, PersonalityType::Playful);
    assert_eq!(cats[0].health, 100);
    assert_eq!(
        cats[0].created_at,
        Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn get_cats_without_data_is_empty() {
    let server = MockServer::start().await;
    mount(&server, "GET", "/api/v1/cats", 200, json!({"success": true})).await;

    let cats = client_for(&server).get_cats(50, 0).await.unwrap();
    assert!(cats.is_empty());
}

#[tokio::test]
async fn get_cat_decodes_single_cat() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/api/v1/cats/7",
        200,
        json!({"data": cat_json(7, "Whiskers")}),
    )
    .await;

    let cat = client_for(&server).get_cat(7).await.unwrap();
    assert_eq!(cat.id, 7);
    assert_eq!(cat.mood, MoodState::Happy);
    assert_eq!(cat.level, 3);
}

#[tokio::test]
async fn get_cat_without_data_is_invalid_response() {
    let server = MockServer::start().await;
    mount(&server, "GET", "/api/v1/cats/7", 200, json!({})).await;

    let err = client_for(&server).get_cat(7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn get_cat_with_wrong_shape_is_invalid_response() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/api/v1/cats/7",
        200,
        json!({"data": {"id": "seven"}}),
    )
    .await;

    let err = client_for(&server).get_cat(7).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn create_cat_posts_wire_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cats"))
        .and(body_json(json!({
            "name": "Luna",
            "species": "cat",
            "personality_type": "curious",
            "breed": "maine_coon"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": cat_json(12, "Luna")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let new_cat =
        NewCat::new("Luna", "cat", PersonalityType::Curious).breed(CatBreed::MaineCoon);
    let cat = client_for(&server).create_cat(&new_cat).await.unwrap();
    assert_eq!(cat.id, 12);
}

#[tokio::test]
async fn update_cat_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/cats/7"))
        .and(body_json(json!({"name": "Sir Whiskers", "nickname": "Sir"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": cat_json(7, "Sir Whiskers")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut update = CatUpdate {
        name: Some("Sir Whiskers".into()),
        ..Default::default()
    };
    update.extra.insert("nickname".into(), json!("Sir"));
    let cat = client_for(&server).update_cat(7, &update).await.unwrap();
    assert_eq!(cat.name, "Sir Whiskers");
}

#[tokio::test]
async fn update_cat_rejects_empty_update_locally() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .update_cat(7, &CatUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_cat_accepts_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/cats/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete_cat(7).await.unwrap();
}

#[tokio::test]
async fn delete_cat_not_found_is_api_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "DELETE",
        "/api/v1/cats/404",
        404,
        json!({"error": {"message": "Cat not found"}}),
    )
    .await;

    let err = client_for(&server).delete_cat(404).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.message(), "Cat not found");
}

// ---------------------------------------------------------------------------
// Activities, VR, AI
// ---------------------------------------------------------------------------

#[tokio::test]
async fn play_with_cat_posts_game() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cats/7/play"))
        .and(body_json(json!({"game_type": "laser_pointer", "duration": 10})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"happiness_gain": 12}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .play_with_cat(7, GameType::LaserPointer, 10)
        .await
        .unwrap();
    assert_eq!(result, json!({"happiness_gain": 12}));
}

#[tokio::test]
async fn train_cat_posts_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cats/7/train"))
        .and(body_json(json!({"command": "sit", "difficulty": "easy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"learned": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).train_cat(7, "sit", "easy").await.unwrap();
    assert_eq!(result["learned"], json!(true));
}

#[tokio::test]
async fn care_for_cat_merges_extra_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cats/7/care"))
        .and(body_json(json!({
            "care_type": "feeding",
            "food_type": "premium_cat_food",
            "amount": "1_cup"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"hunger": 100}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = Params::new();
    params.insert("food_type".into(), json!("premium_cat_food"));
    params.insert("amount".into(), json!("1_cup"));

    let result = client_for(&server)
        .care_for_cat(7, CareType::Feeding, &params)
        .await
        .unwrap();
    assert_eq!(result["hunger"], json!(100));
}

#[tokio::test]
async fn explicit_field_overrides_conflicting_extra() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/vr/session-1/interact"))
        .and(body_json(json!({"interaction_type": "pet", "intensity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"purr": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = Params::new();
    params.insert("interaction_type".into(), json!("scratch"));
    params.insert("intensity".into(), json!(2));

    client_for(&server)
        .vr_interact("session-1", "pet", &params)
        .await
        .unwrap();
}

#[tokio::test]
async fn start_vr_session_posts_device() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cats/7/vr_interaction"))
        .and(body_json(json!({"vr_device": "webvr"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"session_id": "vr-1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server).start_vr_session(7, "webvr").await.unwrap();
    assert_eq!(session["session_id"], json!("vr-1"));
}

#[tokio::test]
async fn get_ai_insights_returns_payload() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/api/v1/cats/7/ai_learning",
        200,
        json!({"data": {"learning_rate": 0.4}}),
    )
    .await;

    let insights = client_for(&server).get_ai_insights(7).await.unwrap();
    assert_eq!(insights["learning_rate"], json!(0.4));
}

// ---------------------------------------------------------------------------
// Trading & shows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_trading_offers_forwards_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/trading/offers"))
        .and(query_param("currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{
            "id": 1,
            "seller_id": 5,
            "cat_id": 7,
            "price": 49.99
        }]})))
        .expect(1)
        .mount(&server)
        .await;

    let filters = QueryParams::new().push("currency", "USD");
    let offers = client_for(&server)
        .get_trading_offers(Some(&filters))
        .await
        .unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].price, dec!(49.99));
    assert_eq!(offers[0].status, "pending");
    assert_eq!(offers[0].currency, "USD");
}

#[tokio::test]
async fn create_trading_offer_posts_offer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/trading/offers"))
        .and(body_json(json!({
            "cat_id": 7,
            "price": 25.5,
            "description": "Loves laser pointers",
            "currency": "EUR"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {
            "id": 3,
            "seller_id": 5,
            "cat_id": 7,
            "price": 25.5,
            "currency": "EUR",
            "description": "Loves laser pointers"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let offer = NewTradingOffer::new(7, dec!(25.5))
        .description("Loves laser pointers")
        .currency("EUR");
    let created = client_for(&server).create_trading_offer(&offer).await.unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.currency, "EUR");
}

#[tokio::test]
async fn accept_trading_offer_posts_without_body() {
    let server = MockServer::start().await;
    mount(
        &server,
        "POST",
        "/api/v1/trading/offers/3/accept",
        200,
        json!({"data": {"trade_id": 11}}),
    )
    .await;

    let trade = client_for(&server).accept_trading_offer(3).await.unwrap();
    assert_eq!(trade["trade_id"], json!(11));
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn get_cat_shows_decodes_shows() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/api/v1/shows",
        200,
        json!({"data": [{
            "id": 2,
            "name": "Spring Show",
            "organizer_id": 1,
            "show_type": "beauty",
            "categories": ["fluffiest"],
            "start_date": "2024-04-01T09:00:00Z",
            "end_date": "2024-04-02T18:00:00Z",
            "entry_fee": 5
        }]}),
    )
    .await;

    let shows = client_for(&server).get_cat_shows(None).await.unwrap();
    assert_eq!(shows[0].status, "upcoming");
    assert_eq!(shows[0].max_participants, 100);
    assert_eq!(shows[0].entry_fee, dec!(5));
    assert!(!shows[0].is_full());
}

#[tokio::test]
async fn register_cat_for_show_posts_categories() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/shows/2/register"))
        .and(body_json(json!({
            "cat_id": 7,
            "show_id": 2,
            "categories": ["fluffiest", "agility"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"registered": true}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .register_cat_for_show(7, 2, &["fluffiest", "agility"])
        .await
        .unwrap();
    assert_eq!(result["registered"], json!(true));
}

// ---------------------------------------------------------------------------
// Multiplayer & health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_multiplayer_room_posts_room() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/multiplayer/join"))
        .and(body_json(json!({"cat_id": 7, "room_type": "playground"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
            "session_id": "mp-1",
            "room_type": "playground",
            "participants": []
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client_for(&server)
        .join_multiplayer_room(7, "playground")
        .await
        .unwrap();
    let session: MultiplayerSession = serde_json::from_value(payload).unwrap();
    assert_eq!(session.session_id, "mp-1");
    assert_eq!(session.max_participants, 20);
    assert_eq!(session.status, "active");
}

#[tokio::test]
async fn multiplayer_action_posts_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/multiplayer/mp-1/action"))
        .and(body_json(json!({"action_type": "chase", "target": 9})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ok": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = Params::new();
    params.insert("target".into(), json!(9));
    client_for(&server)
        .multiplayer_action("mp-1", "chase", &params)
        .await
        .unwrap();
}

#[tokio::test]
async fn register_health_device_posts_device_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/cats/7/health_monitoring"))
        .and(body_json(json!({"device_type": "collar", "device_name": "PurrTrack"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {
            "id": 4,
            "cat_id": 7,
            "device_type": "collar",
            "device_name": "PurrTrack",
            "device_data": {}
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let mut device = Params::new();
    device.insert("device_type".into(), json!("collar"));
    device.insert("device_name".into(), json!("PurrTrack"));
    let payload = client_for(&server)
        .register_health_device(7, &device)
        .await
        .unwrap();
    let registered: HealthDevice = serde_json::from_value(payload).unwrap();
    assert!(registered.active);
    assert_eq!(registered.device_name, "PurrTrack");
}

#[tokio::test]
async fn get_health_summary_sends_timeframe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cats/7/health"))
        .and(query_param("timeframe", "7d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"score": 92}})))
        .expect(1)
        .mount(&server)
        .await;

    let summary = client_for(&server).get_health_summary(7, "7d").await.unwrap();
    assert_eq!(summary["score"], json!(92));
}

// ---------------------------------------------------------------------------
// API keys & analytics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_key_lifecycle() {
    let server = MockServer::start().await;
    let key = json!({
        "id": 8,
        "name": "bot",
        "scopes": ["read", "write"],
        "expires_at": "2030-01-01T00:00:00Z"
    });
    mount(&server, "GET", "/api/v1/keys", 200, json!({"data": [key.clone()]})).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/keys"))
        .and(body_json(json!({"name": "bot", "scopes": ["read", "write"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": key})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/keys/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let keys = client.get_api_keys().await.unwrap();
    assert_eq!(keys[0].scopes, vec!["read", "write"]);
    assert!(keys[0].active);

    let created = client
        .create_api_key(&NewApiKey {
            name: "bot".into(),
            scopes: vec!["read".into(), "write".into()],
            expires_at: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, 8);
    assert!(!created.is_expired_at(Utc.with_ymd_and_hms(2029, 6, 1, 0, 0, 0).unwrap()));

    client.revoke_api_key(8).await.unwrap();
}

#[tokio::test]
async fn get_cat_analytics_repeats_metrics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/cats/7/analytics"))
        .and(query_param("timeframe", "30d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"plays": 14}})))
        .expect(1)
        .mount(&server)
        .await;

    let analytics = client_for(&server)
        .get_cat_analytics(7, "30d", &["plays", "care"])
        .await
        .unwrap();
    assert_eq!(analytics["plays"], json!(14));

    let requests = server.received_requests().await.unwrap();
    let metrics: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "metrics")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(metrics, vec!["plays", "care"]);
}

#[tokio::test]
async fn get_user_stats_returns_payload() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/api/v1/user/stats",
        200,
        json!({"data": {"cats": 3}}),
    )
    .await;

    let stats = client_for(&server).get_user_stats().await.unwrap();
    assert_eq!(stats["cats"], json!(3));
}

#[tokio::test]
async fn client_authenticate_rotates_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/stats"))
        .and(wiremock::matchers::header("X-API-Key", "second-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.authenticate("second-key").unwrap();
    client.get_user_stats().await.unwrap();
}

#[tokio::test]
async fn rate_limited_endpoint_reports_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/shows"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "15"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_cat_shows(None).await.unwrap_err();
    assert_eq!(err.retry_after(), Some(15));
}
