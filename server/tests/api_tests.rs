//! Integration tests for the booking HTTP surface.
//!
//! Each test drives the full router, middleware included, against a private
//! in-memory SQLite database with the migrations applied.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

use booking_server::routes::create_routes;
use booking_server::{db, AppState, Config};

const PAST: &str = "2001-05-21 21:30:00";
const FUTURE: &str = "2099-04-01 20:00:00";

async fn setup() -> (Router, SqlitePool) {
    let config = Config::in_memory();
    let pool = db::connect(&config)
        .await
        .expect("Should open in-memory database");
    db::migrate(&pool).await.expect("Should apply migrations");
    let app = create_routes(AppState::new(pool.clone(), config));
    (app, pool)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = serde_json::from_slice(&bytes).expect("Should parse JSON");
    (status, body)
}

async fn create_venue(app: &Router, name: &str, city: &str, state: &str) -> i64 {
    let body = format!(
        "name={name}&city={city}&state={state}&address=1015+Folsom+Street&genres=Jazz%2CBlues&seeking_talent=y"
    );
    let (status, json) = send(app, post_form("/venues/create", &body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

async fn create_artist(app: &Router, name: &str) -> i64 {
    let body = format!(
        "name={name}&city=San+Francisco&state=CA&genres=Rock+n+Roll&image_link=https%3A%2F%2Fimg.example%2Fa.jpg"
    );
    let (status, json) = send(app, post_form("/artists/create", &body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"]["id"].as_i64().unwrap()
}

async fn create_show(app: &Router, artist_id: i64, venue_id: i64, start: &str) -> (StatusCode, Value) {
    let body = format!(
        "artist_id={artist_id}&venue_id={venue_id}&start_time={}",
        start.replace(' ', "+")
    );
    send(app, post_form("/shows/create", &body)).await
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

// =============================================================================
// Home and fallbacks
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_home_summary() {
    let (app, _pool) = setup().await;
    let venue_id = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;
    let artist_id = create_artist(&app, "Guns+N+Petals").await;
    create_show(&app, artist_id, venue_id, FUTURE).await;
    create_show(&app, artist_id, venue_id, PAST).await;

    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["venue_count"], 1);
    assert_eq!(body["data"]["artist_count"], 1);
    assert_eq!(body["data"]["upcoming_show_count"], 1);
    assert_eq!(body["data"]["recent_venues"][0]["name"], "The Musical Hop");
}

#[tokio::test]
async fn test_unknown_path_is_not_found_envelope() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, get("/no/such/page")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_security_headers_present() {
    let (app, _pool) = setup().await;
    let response = app.oneshot(get("/health")).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.get("strict-transport-security").is_none());
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_create_venue_splits_genres() {
    let (app, pool) = setup().await;
    let body = "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street&genres=Jazz%2CBlues";

    let (status, json) = send(&app, post_form("/venues/create", body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Venue The Musical Hop was successfully listed!");
    assert_eq!(json["data"]["genres"], serde_json::json!(["Jazz", "Blues"]));
    assert_eq!(json["data"]["seeking_talent"], false);

    let stored: String = sqlx::query_scalar("SELECT genres FROM venues")
        .fetch_one(&pool)
        .await
        .unwrap();
    let genres: Vec<String> = serde_json::from_str(&stored).unwrap();
    assert_eq!(genres, vec!["Jazz", "Blues"]);
}

#[tokio::test]
async fn test_create_venue_missing_name_is_validation_error() {
    let (app, pool) = setup().await;
    let body = "city=San+Francisco&state=CA&address=1015+Folsom+Street";

    let (status, json) = send(&app, post_form("/venues/create", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(count(&pool, "venues").await, 0);
}

#[tokio::test]
async fn test_venue_listing_groups_by_area() {
    let (app, _pool) = setup().await;
    let hop = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;
    let pianos = create_venue(&app, "The+Dueling+Pianos+Bar", "New+York", "NY").await;
    let park = create_venue(&app, "Park+Square", "San+Francisco", "CA").await;
    let artist = create_artist(&app, "Guns+N+Petals").await;
    create_show(&app, artist, park, FUTURE).await;
    create_show(&app, artist, park, PAST).await;

    let (status, body) = send(&app, get("/venues")).await;

    assert_eq!(status, StatusCode::OK);
    let areas = body["data"]["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["city"], "San Francisco");
    assert_eq!(areas[0]["venues"][0]["id"], hop);
    assert_eq!(areas[0]["venues"][0]["num_upcoming_shows"], 0);
    assert_eq!(areas[0]["venues"][1]["id"], park);
    assert_eq!(areas[0]["venues"][1]["num_upcoming_shows"], 1);
    assert_eq!(areas[1]["state"], "NY");
    assert_eq!(areas[1]["venues"][0]["id"], pianos);
}

#[tokio::test]
async fn test_empty_venue_listing() {
    let (app, _pool) = setup().await;
    let (_, body) = send(&app, get("/venues")).await;
    assert_eq!(body["data"]["areas"], serde_json::json!([]));
}

#[tokio::test]
async fn test_search_venues() {
    let (app, _pool) = setup().await;
    create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;
    create_venue(&app, "The+Dueling+Pianos+Bar", "New+York", "NY").await;
    create_venue(&app, "Park+Square+Live+Music", "San+Francisco", "CA").await;

    let (status, body) = send(&app, post_form("/venues/search", "search_term=music")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);
    assert_eq!(body["data"]["search_term"], "music");

    let (_, body) = send(&app, post_form("/venues/search", "search_term=Hop")).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "The Musical Hop");

    let (_, body) = send(&app, post_form("/venues/search", "search_term=")).await;
    assert_eq!(body["data"]["count"], 3);

    let (_, body) = send(&app, post_form("/venues/search", "search_term=zzz")).await;
    assert_eq!(body["data"]["count"], 0);
    assert_eq!(body["data"]["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_venue_detail_splits_past_and_upcoming() {
    let (app, _pool) = setup().await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;
    let artist = create_artist(&app, "Guns+N+Petals").await;
    create_show(&app, artist, venue, PAST).await;
    create_show(&app, artist, venue, FUTURE).await;
    create_show(&app, artist, venue, "2098-01-01 10:00:00").await;

    let (status, body) = send(&app, get(&format!("/venues/{venue}"))).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["name"], "The Musical Hop");
    assert_eq!(data["past_shows_count"], 1);
    assert_eq!(data["upcoming_shows_count"], 2);
    assert_eq!(data["past_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(data["past_shows"][0]["start_time"], "2001-05-21T21:30:00Z");
    assert_eq!(data["upcoming_shows"][0]["start_time"], "2098-01-01T10:00:00Z");
    assert_eq!(
        data["upcoming_shows"][1]["artist_image_link"],
        "https://img.example/a.jpg"
    );
}

#[tokio::test]
async fn test_missing_venue_detail_is_not_found() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, get("/venues/404")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Venue 404 does not exist");
}

#[tokio::test]
async fn test_edit_venue_ignores_identifier_and_unknown_fields() {
    let (app, pool) = setup().await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;

    let body = "id=999&name=The+Musical+Hop+Annex&genres=Funk%2CSoul&is_admin=true";
    let (status, json) = send(&app, post_form(&format!("/venues/{venue}/edit"), body)).await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["id"], venue);
    assert_eq!(json["data"]["name"], "The Musical Hop Annex");
    assert_eq!(json["data"]["city"], "San Francisco");
    assert_eq!(json["data"]["genres"], serde_json::json!(["Funk", "Soul"]));
    assert_eq!(json["data"]["seeking_talent"], true);

    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM venues")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(ids, vec![venue]);
}

#[tokio::test]
async fn test_edit_venue_form() {
    let (app, _pool) = setup().await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;

    let (status, body) = send(&app, get(&format!("/venues/{venue}/edit"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["venue"]["name"], "The Musical Hop");
    assert_eq!(body["data"]["form"]["action"], format!("/venues/{venue}/edit"));

    let (status, _) = send(&app, get("/venues/77/edit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_missing_venue_is_not_found() {
    let (app, _pool) = setup().await;
    let (status, _) = send(&app, post_form("/venues/12/edit", "name=Ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_venue_is_tolerated() {
    let (app, pool) = setup().await;
    create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;

    let (status, body) = send(&app, delete("/venues/9999")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(count(&pool, "venues").await, 1);
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let (app, pool) = setup().await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;
    let artist = create_artist(&app, "Guns+N+Petals").await;
    create_show(&app, artist, venue, FUTURE).await;
    assert_eq!(count(&pool, "shows").await, 1);

    let (status, body) = send(&app, delete(&format!("/venues/{venue}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Venue {venue} was successfully deleted."));
    assert_eq!(count(&pool, "venues").await, 0);
    assert_eq!(count(&pool, "shows").await, 0);
    assert_eq!(count(&pool, "artists").await, 1);
}

#[tokio::test]
async fn test_create_venue_form_descriptor() {
    let (app, _pool) = setup().await;
    let (status, body) = send(&app, get("/venues/create")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["action"], "/venues/create");
    let fields = body["data"]["fields"].as_array().unwrap();
    let genres = fields.iter().find(|f| f["name"] == "genres").unwrap();
    assert_eq!(genres["kind"], "multi_select");
    assert!(genres["choices"].as_array().unwrap().contains(&Value::from("Jazz")));
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_artist_listing_and_search() {
    let (app, _pool) = setup().await;
    let petals = create_artist(&app, "Guns+N+Petals").await;
    create_artist(&app, "Matt+Quevedo").await;
    let sax = create_artist(&app, "The+Wild+Sax+Band").await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;
    create_show(&app, sax, venue, FUTURE).await;

    let (status, body) = send(&app, get("/artists")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["artists"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["artists"][0]["id"], petals);

    let (_, body) = send(&app, post_form("/artists/search", "search_term=A")).await;
    assert_eq!(body["data"]["count"], 3);

    let (_, body) = send(&app, post_form("/artists/search", "search_term=band")).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["data"][0]["id"], sax);
    assert_eq!(body["data"]["data"][0]["num_upcoming_shows"], 1);
}

#[tokio::test]
async fn test_artist_detail_lists_venues() {
    let (app, _pool) = setup().await;
    let artist = create_artist(&app, "Matt+Quevedo").await;
    let venue = create_venue(&app, "The+Dueling+Pianos+Bar", "New+York", "NY").await;
    create_show(&app, artist, venue, PAST).await;

    let (status, body) = send(&app, get(&format!("/artists/{artist}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["past_shows_count"], 1);
    assert_eq!(body["data"]["upcoming_shows_count"], 0);
    assert_eq!(body["data"]["past_shows"][0]["venue_id"], venue);
    assert_eq!(body["data"]["past_shows"][0]["venue_name"], "The Dueling Pianos Bar");
}

#[tokio::test]
async fn test_edit_and_delete_artist() {
    let (app, pool) = setup().await;
    let artist = create_artist(&app, "Matt+Quevedo").await;

    let (status, body) = send(
        &app,
        post_form(&format!("/artists/{artist}/edit"), "seeking_venue=y&phone=300-400-5000"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seeking_venue"], true);
    assert_eq!(body["data"]["phone"], "300-400-5000");
    assert_eq!(body["data"]["name"], "Matt Quevedo");

    let (status, _) = send(&app, delete(&format!("/artists/{artist}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count(&pool, "artists").await, 0);
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_create_and_list_shows() {
    let (app, _pool) = setup().await;
    let artist = create_artist(&app, "Guns+N+Petals").await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;

    let (status, body) = create_show(&app, artist, venue, FUTURE).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Show was successfully listed!");

    let (status, body) = send(&app, get("/shows")).await;
    assert_eq!(status, StatusCode::OK);
    let shows = body["data"]["shows"].as_array().unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0]["venue_name"], "The Musical Hop");
    assert_eq!(shows[0]["artist_name"], "Guns N Petals");
    assert_eq!(shows[0]["start_time"], "2099-04-01T20:00:00Z");
}

#[tokio::test]
async fn test_show_with_unknown_artist_is_rejected() {
    let (app, pool) = setup().await;
    let venue = create_venue(&app, "The+Musical+Hop", "San+Francisco", "CA").await;

    let (status, body) = create_show(&app, 4242, venue, FUTURE).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONSTRAINT_VIOLATION");
    assert_eq!(body["error"]["message"], "An error occurred. Show could not be listed.");
    assert_eq!(count(&pool, "shows").await, 0);
}

#[tokio::test]
async fn test_show_with_bad_start_time_is_validation_error() {
    let (app, pool) = setup().await;
    let (status, body) = send(
        &app,
        post_form("/shows/create", "artist_id=1&venue_id=1&start_time=tomorrow"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(count(&pool, "shows").await, 0);
}

// =============================================================================
// Malformed requests
// =============================================================================

#[tokio::test]
async fn test_create_venue_accepts_repeated_genres() {
    let (app, _pool) = setup().await;
    let body = "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street\
                &genres=Jazz&genres=Reggae&genres=Swing";

    let (status, json) = send(&app, post_form("/venues/create", body)).await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["genres"], serde_json::json!(["Jazz", "Reggae", "Swing"]));
}

#[tokio::test]
async fn test_edit_artist_accepts_repeated_genres() {
    let (app, _pool) = setup().await;
    let artist = create_artist(&app, "Guns+N+Petals").await;

    let (status, json) = send(
        &app,
        post_form(&format!("/artists/{artist}/edit"), "genres=Funk&genres=Soul"),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["genres"], serde_json::json!(["Funk", "Soul"]));
}

#[tokio::test]
async fn test_both_description_keys_prefer_seeking_description() {
    let (app, _pool) = setup().await;
    let body = "name=Park+Square&city=San+Francisco&state=CA&address=34+Whiskey+Moore+Ave\
                &description=Older+text&seeking_description=Looking+for+jazz+trios";

    let (status, json) = send(&app, post_form("/venues/create", body)).await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["data"]["seeking_description"], "Looking for jazz trios");
}

#[tokio::test]
async fn test_create_without_form_content_type_is_validation_error() {
    let (app, pool) = setup().await;
    let request = Request::builder()
        .method("POST")
        .uri("/venues/create")
        .body(Body::from("name=The+Musical+Hop"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(count(&pool, "venues").await, 0);
}

#[tokio::test]
async fn test_non_integer_id_is_not_found() {
    let (app, _pool) = setup().await;

    for request in [
        get("/venues/abc"),
        get("/artists/abc/edit"),
        delete("/venues/abc"),
        post_form("/artists/abc/edit", "name=Nobody"),
    ] {
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
