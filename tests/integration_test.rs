// Integration tests for TrackX: artifact pipeline plus the REST surface
use actix_web::{test, web, App};
use serde_json::json;
use std::sync::Arc;
use trackx::prelude::*;
use trackx_storage::{save_catalog, save_features, save_model, CATALOG_FILE, FEATURES_FILE, MODEL_FILE};

fn sample_songs(n: usize) -> Vec<Song> {
    (0..n)
        .map(|i| {
            let artist = if i % 2 == 0 { "Alpha Band" } else { "Beta Group" };
            Song::new(format!("t{i}"))
                .with_track_name(format!("Track {i}"))
                .with_artist_name(artist)
                .with_genre("electronic")
        })
        .collect()
}

fn sample_features(n: usize) -> FeatureMatrix {
    let rows: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32 * 0.01]).collect();
    FeatureMatrix::from_rows(&rows).unwrap()
}

fn sample_library(n: usize) -> Arc<Library> {
    let features = sample_features(n);
    let index = Arc::new(BallTree::build(&features));
    let catalog = Arc::new(Catalog::new(sample_songs(n), features).unwrap());
    Arc::new(Library::from_parts(catalog, index).unwrap())
}

#[::core::prelude::v1::test]
fn test_artifact_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let features = sample_features(30);

    save_catalog(dir.path().join(CATALOG_FILE), &sample_songs(30)).unwrap();
    save_features(dir.path().join(FEATURES_FILE), &features).unwrap();
    save_model(dir.path().join(MODEL_FILE), &BallTree::build(&features)).unwrap();

    let library = Library::load(dir.path()).unwrap();
    assert_eq!(library.catalog().len(), 30);

    let recs = library.engine().recommend(&["t10".to_string()], 4);
    assert_eq!(recs.len(), 4);
    assert!(recs.iter().all(|r| r.track_id != "t10"));
    for pair in recs.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }

    let page = library.catalog().page(2, 10);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.songs[0].track_id, "t10");

    assert_eq!(library.catalog().search("alpha band").len(), 15);
}

#[::core::prelude::v1::test]
fn test_truncated_model_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let features = sample_features(5);

    save_catalog(dir.path().join(CATALOG_FILE), &sample_songs(5)).unwrap();
    save_features(dir.path().join(FEATURES_FILE), &features).unwrap();
    std::fs::write(dir.path().join(MODEL_FILE), b"not a model").unwrap();

    assert!(Library::load(dir.path()).is_err());
}

macro_rules! app {
    ($library:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($library))
                .configure(trackx_api::routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_recommendations_single_seed() {
    let app = app!(sample_library(50));

    let req = test::TestRequest::post()
        .uri("/recommendations")
        .set_json(json!({ "track_ids": "t0", "top_n": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["track_id"], "t1");
    assert!(recs.iter().all(|r| r["track_id"] != "t0"));
    assert!(recs[0]["similarity"].is_number());
}

#[actix_web::test]
async fn test_recommendations_seed_list_deduplicates() {
    let app = app!(sample_library(50));

    let req = test::TestRequest::post()
        .uri("/recommendations")
        .set_json(json!({ "track_ids": ["t0", "t1"], "top_n": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 5);

    let mut ids: Vec<&str> = recs.iter().map(|r| r["track_id"].as_str().unwrap()).collect();
    assert!(!ids.contains(&"t0") && !ids.contains(&"t1"));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5, "duplicate track in combined output");
}

#[actix_web::test]
async fn test_recommendations_unknown_seeds_are_not_found() {
    let app = app!(sample_library(10));

    let req = test::TestRequest::post()
        .uri("/recommendations")
        .set_json(json!({ "track_ids": ["nope", "also-nope"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "No valid track IDs found or no recommendations available."
    );
}

#[actix_web::test]
async fn test_recommendations_rejects_zero_top_n() {
    let app = app!(sample_library(10));

    let req = test::TestRequest::post()
        .uri("/recommendations")
        .set_json(json!({ "track_ids": "t1", "top_n": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_songs_defaults() {
    let app = app!(sample_library(50));

    let req = test::TestRequest::get().uri("/songs").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["total"], 50);
    assert_eq!(body["total_pages"], 3);
    assert_eq!(body["songs"].as_array().unwrap().len(), 20);
    assert_eq!(body["songs"][0]["track_id"], "t0");
}

#[actix_web::test]
async fn test_songs_page_beyond_range() {
    let app = app!(sample_library(50));

    let req = test::TestRequest::get()
        .uri("/songs?page=100&limit=20")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["page"], 100);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["total"], 50);
    assert_eq!(body["total_pages"], 3);
    assert!(body["songs"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_songs_validation() {
    let app = app!(sample_library(10));

    for uri in ["/songs?page=0", "/songs?limit=0", "/songs?limit=101"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::BAD_REQUEST,
            "expected 400 for {uri}"
        );
    }
}

#[actix_web::test]
async fn test_search_matches_either_name_field() {
    let app = app!(sample_library(10));

    let req = test::TestRequest::get()
        .uri("/search?query=BETA")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(results[0]["artist_name"], "Beta Group");
    assert!(results[0].get("genre").is_none(), "search hits carry three fields only");
}

#[actix_web::test]
async fn test_search_no_match_is_success() {
    let app = app!(sample_library(10));

    let req = test::TestRequest::get()
        .uri("/search?query=zzzzz")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["results"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_search_requires_query() {
    let app = app!(sample_library(10));

    for uri in ["/search", "/search?query="] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::BAD_REQUEST,
            "expected 400 for {uri}"
        );
    }
}
