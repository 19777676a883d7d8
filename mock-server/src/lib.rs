use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

/// 1x1 RGBA PNG served for every cover image.
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x78, 0xA6, 0x2C, 0xFD,
    0x1F, 0x00, 0x05, 0x3B, 0x02, 0x24, 0xE7, 0xB8, 0x12, 0xF3, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Creator {
    pub name: String,
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatorList {
    pub available: usize,
    pub returned: usize,
    pub items: Vec<Creator>,
}

impl CreatorList {
    pub fn new(items: Vec<Creator>) -> Self {
        Self {
            available: items.len(),
            returned: items.len(),
            items,
        }
    }
}

/// A comic record as the gateway serializes it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComicRecord {
    pub id: i64,
    pub title: String,
    pub issue_number: i64,
    pub description: Option<String>,
    pub thumbnail: Thumbnail,
    pub creators: CreatorList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keys {
    pub public_key: String,
    pub private_key: String,
}

impl Keys {
    pub fn new(public_key: &str, private_key: &str) -> Self {
        Self {
            public_key: public_key.to_string(),
            private_key: private_key.to_string(),
        }
    }

    fn expected_hash(&self, ts: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(self.private_key.as_bytes());
        hasher.update(self.public_key.as_bytes());
        hex::encode(hasher.finalize())
    }
}

pub type Db = Arc<RwLock<BTreeMap<i64, ComicRecord>>>;

#[derive(Clone)]
pub struct AppState {
    pub keys: Keys,
    pub db: Db,
}

impl AppState {
    pub fn new(keys: Keys, comics: Vec<ComicRecord>) -> Self {
        let db = comics.into_iter().map(|c| (c.id, c)).collect();
        Self {
            keys,
            db: Arc::new(RwLock::new(db)),
        }
    }
}

pub const TEST_PUBLIC_KEY: &str = "test-public";
pub const TEST_PRIVATE_KEY: &str = "test-private";

/// Seed catalog: a regular issue, a trade paperback, and an issue without
/// artwork.
pub fn fixtures() -> Vec<ComicRecord> {
    vec![
        ComicRecord {
            id: 52646,
            title: "Amazing Spider-Man (2014) #1".to_string(),
            issue_number: 1,
            description: Some("Peter Parker is back!".to_string()),
            thumbnail: Thumbnail {
                path: "http://i.annihil.us/u/prod/marvel/i/mg/c/e0/5d11b4b5c0e08".to_string(),
                extension: "jpg".to_string(),
            },
            creators: CreatorList::new(vec![
                Creator { name: "Dan Slott".to_string(), role: "writer".to_string() },
                Creator { name: "Humberto Ramos".to_string(), role: "penciller".to_string() },
                Creator { name: "Edgar Delgado".to_string(), role: "colorist".to_string() },
            ]),
        },
        ComicRecord {
            id: 15878,
            title: "Hulk: Planet Hulk TPB (Trade Paperback)".to_string(),
            issue_number: 0,
            description: Some("Exiled to a distant world, the Hulk fights his way to the top.".to_string()),
            thumbnail: Thumbnail {
                path: "http://i.annihil.us/u/prod/marvel/i/mg/6/f0/4bc6644a7cf6f".to_string(),
                extension: "jpg".to_string(),
            },
            creators: CreatorList::new(vec![Creator {
                name: "Greg Pak".to_string(),
                role: "writer".to_string(),
            }]),
        },
        ComicRecord {
            id: 5813,
            title: "Marvel Milestones (2005) #22".to_string(),
            issue_number: 22,
            description: None,
            thumbnail: Thumbnail {
                path: "http://i.annihil.us/u/prod/marvel/i/mg/b/40/image_not_available".to_string(),
                extension: "jpg".to_string(),
            },
            creators: CreatorList::new(Vec::new()),
        },
    ]
}

pub fn app() -> Router {
    app_with_state(AppState::new(Keys::new(TEST_PUBLIC_KEY, TEST_PRIVATE_KEY), fixtures()))
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/v1/public/comics", get(list_comics))
        .route("/v1/public/comics/{id}", get(get_comic))
        .route("/images/{*file}", get(get_image))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn envelope(results: Vec<ComicRecord>) -> serde_json::Value {
    json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": 0,
            "limit": 20,
            "total": results.len(),
            "count": results.len(),
            "results": results,
        }
    })
}

fn gateway_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

/// Check `apikey`, `ts` and `hash` the way the real gateway does.
fn authorize(keys: &Keys, params: &HashMap<String, String>) -> Result<(), Response> {
    let (Some(apikey), Some(ts), Some(hash)) = (params.get("apikey"), params.get("ts"), params.get("hash"))
    else {
        return Err(gateway_error(
            StatusCode::CONFLICT,
            "MissingParameter",
            "You must provide a user key, a timestamp and a hash.",
        ));
    };
    if *apikey != keys.public_key || *hash != keys.expected_hash(ts) {
        tracing::debug!(%apikey, %ts, "rejecting request with invalid credentials");
        return Err(gateway_error(
            StatusCode::UNAUTHORIZED,
            "InvalidCredentials",
            "That hash, timestamp and key combination is invalid.",
        ));
    }
    Ok(())
}

async fn list_comics(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, Response> {
    authorize(&state.keys, &params)?;
    let comics = state.db.read().await;
    Ok(Json(envelope(comics.values().cloned().collect())))
}

async fn get_comic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, Response> {
    authorize(&state.keys, &params)?;
    let comics = state.db.read().await;
    match comics.get(&id) {
        Some(comic) => Ok(Json(envelope(vec![comic.clone()]))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 404, "status": "We couldn't find that comic_issue" })),
        )
            .into_response()),
    }
}

async fn get_image(Path(file): Path<String>) -> Response {
    if file.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "image/png")], PLACEHOLDER_PNG).into_response()
}
