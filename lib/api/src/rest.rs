use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use trackx_core::Recommendation;
use trackx_storage::Library;

/// Message returned when the engine has nothing to recommend
const NO_RECOMMENDATIONS: &str = "No valid track IDs found or no recommendations available.";

/// A seed list may arrive as a single string or an array of strings.
/// Normalized into one canonical `Vec<String>` before reaching the engine.
#[derive(Deserialize)]
#[serde(untagged)]
enum TrackIds {
    One(String),
    Many(Vec<String>),
}

impl TrackIds {
    fn into_vec(self) -> Vec<String> {
        match self {
            TrackIds::One(id) => vec![id],
            TrackIds::Many(ids) => ids,
        }
    }
}

#[derive(Deserialize)]
struct RecommendationRequest {
    track_ids: TrackIds,
    #[serde(default = "default_top_n")]
    top_n: usize,
}

fn default_top_n() -> usize {
    5
}

#[derive(Deserialize)]
struct SongsQuery {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

#[derive(Deserialize)]
struct SearchQuery {
    query: String,
}

#[derive(Serialize)]
struct SearchHit<'a> {
    track_id: &'a str,
    track_name: Option<&'a str>,
    artist_name: Option<&'a str>,
}

/// Static asset directory, shared with the index handler
#[derive(Clone)]
struct StaticDir(PathBuf);

pub struct RestApi;

impl RestApi {
    pub async fn start(
        library: Arc<Library>,
        static_dir: PathBuf,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(library.clone()))
                .app_data(web::Data::new(StaticDir(static_dir.clone())))
                .service(Files::new("/static", static_dir.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Route table, separated so tests can mount it without binding a socket
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/recommendations", web::post().to(recommend))
        .route("/songs", web::get().to(list_songs))
        .route("/search", web::get().to(search_songs));
}

async fn index(static_dir: web::Data<StaticDir>) -> ActixResult<NamedFile> {
    Ok(NamedFile::open_async(static_dir.0.join("index.html")).await?)
}

async fn recommend(
    library: web::Data<Arc<Library>>,
    req: web::Json<RecommendationRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();

    if req.top_n == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "top_n must be at least 1"
        })));
    }

    let seeds = req.track_ids.into_vec();
    let recommendations: Vec<Recommendation> = library.engine().recommend(&seeds, req.top_n);

    if recommendations.is_empty() {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": NO_RECOMMENDATIONS
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "recommendations": recommendations
    })))
}

async fn list_songs(
    library: web::Data<Arc<Library>>,
    query: web::Query<SongsQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();

    if query.page < 1 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "page must be at least 1"
        })));
    }
    if !(1..=100).contains(&query.limit) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "limit must be between 1 and 100"
        })));
    }

    Ok(HttpResponse::Ok().json(library.catalog().page(query.page, query.limit)))
}

async fn search_songs(
    library: web::Data<Arc<Library>>,
    query: web::Query<SearchQuery>,
) -> ActixResult<HttpResponse> {
    let query = query.into_inner();

    if query.query.is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "query must not be empty"
        })));
    }

    let results: Vec<SearchHit> = library
        .catalog()
        .search(&query.query)
        .into_iter()
        .map(|song| SearchHit {
            track_id: &song.track_id,
            track_name: song.track_name.as_deref(),
            artist_name: song.artist_name.as_deref(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "results": results
    })))
}
