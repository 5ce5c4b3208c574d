use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::Reply;
use warp::Filter;

use backend::environment::Environment;
use backend::home::Home;
use backend::homes::HomesStore;
use backend::routes;
use backend::store::mock::MockBlob;
use backend::urls::Urls;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HomesResponse {
    homes: Vec<Home>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CountResponse {
    count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeletedResponse {
    id: String,
    deleted: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    operation: String,
    message: String,
}

fn make_environment() -> (Environment, Arc<MockBlob>) {
    let logger = Arc::new(slog::Logger::root(slog::Discard, slog::o!()));
    let blob = Arc::new(MockBlob::new());
    let homes = HomesStore::open(Box::new(blob.clone())).expect("open homes collection");
    let urls = Arc::new(Urls::new("http://localhost/", "homes"));

    let environment = Environment::new(logger, Arc::new(Mutex::new(homes)), urls);

    (environment, blob)
}

fn make_api(environment: &Environment) -> BoxedFilter<(impl Reply,)> {
    let logger = environment.logger.clone();

    routes::make_count_route(environment.clone())
        .or(routes::make_list_route(environment.clone()))
        .or(routes::make_create_route(environment.clone()))
        .or(routes::make_review_route(environment.clone()))
        .or(routes::make_donation_route(environment.clone()))
        .or(routes::make_visit_route(environment.clone()))
        .or(routes::make_update_route(environment.clone()))
        .or(routes::make_delete_route(environment.clone()))
        .or(routes::make_retrieve_route(environment.clone()))
        .recover(move |r| routes::format_rejection(logger.clone(), r))
        .boxed()
}

fn parse<T: serde::de::DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).expect("parse response as JSON")
}

fn new_home_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Sunshine",
        "location": "Nairobi",
        "children": 10,
        "capacity": 20,
        "donationGoal": 1000,
        "urgentNeeds": ["Food"],
        "contact": {
            "phone": "+254 700 000 000",
            "email": "info@sunshine.org",
            "address": "1 Hope Street"
        }
    })
}

async fn create_home(api: &BoxedFilter<(impl Reply + 'static,)>) -> Home {
    let response = warp::test::request()
        .method("POST")
        .path("/homes")
        .json(&new_home_body())
        .reply(api)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    parse(response.body())
}

#[tokio::test]
async fn listing_returns_the_seeded_homes() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request().path("/homes").reply(&api).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: HomesResponse = parse(response.body());
    assert_eq!(listed.homes.len(), 3);
    assert_eq!(listed.homes[0].name, "Sunshine Children's Home");
}

#[tokio::test]
async fn listing_filters_by_search_over_names_and_descriptions() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .path("/homes?search=HAVEN")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: HomesResponse = parse(response.body());
    assert_eq!(listed.homes.len(), 1);
    assert_eq!(listed.homes[0].name, "Hope Haven Orphanage");

    // "education" only appears in descriptions.
    let response = warp::test::request()
        .path("/homes?search=education")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: HomesResponse = parse(response.body());
    assert_eq!(listed.homes.len(), 2);
}

#[tokio::test]
async fn listing_filters_by_location() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .path("/homes?location=mombasa")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: HomesResponse = parse(response.body());
    assert_eq!(listed.homes.len(), 1);
    assert_eq!(listed.homes[0].name, "Hope Haven Orphanage");

    let response = warp::test::request()
        .path("/homes?search=home&location=kisumu")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: HomesResponse = parse(response.body());
    assert_eq!(listed.homes.len(), 1);
    assert_eq!(listed.homes[0].name, "Little Angels Home");

    let response = warp::test::request()
        .path("/homes?location=nowhere")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed: HomesResponse = parse(response.body());
    assert!(listed.homes.is_empty());
}

#[tokio::test]
async fn counting_reports_the_collection_size() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request().path("/homes/count").reply(&api).await;
    assert_eq!(response.status(), StatusCode::OK);

    let counted: CountResponse = parse(response.body());
    assert_eq!(counted.count, 3);
}

#[tokio::test]
async fn retrieval_finds_homes_by_id() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request().path("/homes/2").reply(&api).await;
    assert_eq!(response.status(), StatusCode::OK);

    let home: Home = parse(response.body());
    assert_eq!(home.name, "Hope Haven Orphanage");

    let response = warp::test::request()
        .path("/homes/no-such-id")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn creation_assigns_an_id_and_zeroes_the_counters() {
    let (environment, blob) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("POST")
        .path("/homes")
        .json(&new_home_body())
        .reply(&api)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let home: Home = parse(response.body());
    assert!(!home.id.is_empty());
    assert_eq!(home.donations_received, 0.0);
    assert_eq!(home.visits, 0);
    assert_eq!(home.rating, 0.0);
    assert!(home.reviews.is_empty());

    let location = response
        .headers()
        .get("location")
        .expect("location header")
        .to_str()
        .expect("location header as string");
    assert!(location.ends_with(&home.id));

    // the whole collection is written through on every mutation
    let persisted: Vec<Home> = parse(&blob.contents().expect("persisted collection"));
    assert_eq!(persisted.len(), 4);
}

#[tokio::test]
async fn updates_merge_shallowly() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("PUT")
        .path("/homes/1")
        .json(&serde_json::json!({ "capacity": 5 }))
        .reply(&api)
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let home: Home = parse(response.body());
    assert_eq!(home.capacity, 5);
    assert_eq!(home.name, "Sunshine Children's Home");
    assert!(home.children > home.capacity);
}

#[tokio::test]
async fn updating_a_missing_home_reports_not_found() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("PUT")
        .path("/homes/no-such-id")
        .json(&serde_json::json!({ "name": "X" }))
        .reply(&api)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ErrorResponse = parse(response.body());
    assert_eq!(error.operation, "update");
    assert!(error.message.contains("no-such-id"));
}

#[tokio::test]
async fn deletion_reports_whether_anything_was_removed() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("DELETE")
        .path("/homes/1")
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let deleted: DeletedResponse = parse(response.body());
    assert_eq!(deleted.id, "1");
    assert!(deleted.deleted);

    let response = warp::test::request()
        .method("DELETE")
        .path("/homes/1")
        .reply(&api)
        .await;
    let deleted: DeletedResponse = parse(response.body());
    assert!(!deleted.deleted);

    let response = warp::test::request().path("/homes/1").reply(&api).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reviews_recompute_the_rating() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let home = create_home(&api).await;

    let response = warp::test::request()
        .method("POST")
        .path(&format!("/homes/{}/reviews", home.id))
        .json(&serde_json::json!({
            "user": "Sarah",
            "rating": 5,
            "comment": "Great",
            "date": "2024-01-01"
        }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = warp::test::request()
        .method("POST")
        .path(&format!("/homes/{}/reviews", home.id))
        .json(&serde_json::json!({
            "user": "John",
            "rating": 3,
            "comment": "OK",
            "date": "2024-01-02"
        }))
        .reply(&api)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Home = parse(response.body());
    assert_eq!(updated.rating, 4.0);
    assert_eq!(updated.reviews.len(), 2);
}

#[tokio::test]
async fn out_of_range_ratings_are_rejected() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("POST")
        .path("/homes/1/reviews")
        .json(&serde_json::json!({
            "user": "Sarah",
            "rating": 6,
            "comment": "",
            "date": "2024-01-01"
        }))
        .reply(&api)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(response.body());
    assert_eq!(error.operation, "review");
}

#[tokio::test]
async fn donations_accumulate() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let home = create_home(&api).await;

    for _ in 0..2 {
        let response = warp::test::request()
            .method("POST")
            .path(&format!("/homes/{}/donations", home.id))
            .json(&serde_json::json!({ "amount": 500 }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = warp::test::request()
        .path(&format!("/homes/{}", home.id))
        .reply(&api)
        .await;
    let updated: Home = parse(response.body());
    assert!((updated.donations_received - 1000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn non_positive_donations_are_rejected() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("POST")
        .path("/homes/1/donations")
        .json(&serde_json::json!({ "amount": 0 }))
        .reply(&api)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = parse(response.body());
    assert_eq!(error.operation, "donation");
}

#[tokio::test]
async fn visits_increment_the_counter() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("POST")
        .path("/homes/1/visits")
        .json(&serde_json::json!({ "date": "2024-02-15" }))
        .reply(&api)
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let updated: Home = parse(response.body());
    assert_eq!(updated.visits, 128);
    assert_eq!(updated.available_visit_dates.len(), 4);
}

#[tokio::test]
async fn healthz_reports_build_info() {
    let (environment, _) = make_environment();
    let route = routes::admin::make_healthz_route(environment);

    let response = warp::test::request().path("/healthz").reply(&route).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = parse(response.body());
    assert!(body.get("version").is_some());
}

#[tokio::test]
async fn termination_requests_are_forwarded() {
    use futures::future::FutureExt;
    use tokio::sync::mpsc;

    let (environment, _) = make_environment();
    let (sender, mut receiver) = mpsc::channel::<()>(1);

    let terminate = Arc::new(move || {
        let sender = sender.clone();

        async move {
            sender.send(()).await.unwrap();
        }
        .boxed()
    });

    let route = routes::admin::make_termination_route(environment, terminate);

    let response = warp::test::request()
        .method("POST")
        .path("/terminate")
        .reply(&route)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(receiver.recv().await.is_some());
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let (environment, _) = make_environment();
    let api = make_api(&environment);

    let response = warp::test::request()
        .method("POST")
        .path("/homes")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&api)
        .await;

    assert!(response.status().is_client_error());
}
