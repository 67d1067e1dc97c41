//! Common test utilities: an in-process stand-in for the hosted mock API.
#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use contract_tests::{Config, ContractContext, Schema};
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Knobs for how faithfully the fake behaves.
#[derive(Debug, Clone)]
pub struct FakeOptions {
    pub schema: Schema,
    /// Start with one movie and one review.
    pub seed: bool,
    /// Reject reviews without a movie reference with 400.
    pub strict_validation: bool,
    /// PUT replaces the record instead of merging the patch.
    pub replace_on_update: bool,
    /// DELETE answers 500 and keeps the record.
    pub fail_deletes: bool,
    /// Status a successful POST answers with.
    pub created_status: StatusCode,
}

impl Default for FakeOptions {
    fn default() -> Self {
        Self {
            schema: Schema::canonical(),
            seed: true,
            strict_validation: false,
            replace_on_update: false,
            fail_deletes: false,
            created_status: StatusCode::CREATED,
        }
    }
}

#[derive(Default)]
struct Store {
    collections: HashMap<String, BTreeMap<u64, Value>>,
    next_id: u64,
    deleted: Vec<String>,
}

impl Store {
    fn insert(&mut self, resource: &str, mut record: Map<String, Value>) -> Value {
        self.next_id += 1;
        let id = self.next_id;
        record.insert("id".to_string(), Value::String(id.to_string()));
        let record = Value::Object(record);
        self.collections
            .entry(resource.to_string())
            .or_default()
            .insert(id, record.clone());
        record
    }
}

#[derive(Clone)]
struct FakeState {
    store: Arc<Mutex<Store>>,
    options: Arc<FakeOptions>,
}

pub struct FakeMockApi {
    pub address: String,
    state: FakeState,
}

impl FakeMockApi {
    pub async fn spawn(options: FakeOptions) -> Self {
        let mut store = Store::default();
        for resource in ["movies", "reviews"] {
            store.collections.insert(resource.to_string(), BTreeMap::new());
        }
        if options.seed {
            let schema = &options.schema;
            let movie = store.insert(
                "movies",
                object(json!({
                    schema.movie_title.as_str(): "Seed Movie",
                    schema.movie_genre.as_str(): "Drama",
                    schema.movie_release_year.as_str(): 1999,
                })),
            );
            store.insert(
                "reviews",
                object(json!({
                    schema.review_movie_ref.as_str(): movie["id"].clone(),
                    schema.review_text.as_str(): "Seed review",
                    schema.review_rating.as_str(): 4,
                })),
            );
        }

        let state = FakeState {
            store: Arc::new(Mutex::new(store)),
            options: Arc::new(options),
        };

        let router = Router::new()
            .route("/", get(root))
            .route("/:resource", get(list).post(create))
            .route("/:resource/:id", get(fetch).put(update).delete(remove))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake mock API");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self { address, state }
    }

    pub fn config(&self) -> Config {
        Config {
            schema: self.state.options.schema.clone(),
            ..Config::for_base_url(self.address.clone())
        }
    }

    pub async fn context(&self) -> ContractContext {
        ContractContext::connect(self.config())
            .await
            .expect("Failed to connect to fake mock API")
    }

    pub fn count(&self, resource: &str) -> usize {
        let store = self.state.store.lock().unwrap();
        store.collections.get(resource).map_or(0, |c| c.len())
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        let store = self.state.store.lock().unwrap();
        store
            .collections
            .get(resource)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Paths of successful deletions, in order.
    pub fn deleted(&self) -> Vec<String> {
        self.state.store.lock().unwrap().deleted.clone()
    }

    pub fn insert(&self, resource: &str, record: Value) -> Value {
        self.state.store.lock().unwrap().insert(resource, object(record))
    }

    pub fn clear(&self, resource: &str) {
        let mut store = self.state.store.lock().unwrap();
        if let Some(collection) = store.collections.get_mut(resource) {
            collection.clear();
        }
    }
}

pub async fn spawn_default() -> FakeMockApi {
    FakeMockApi::spawn(FakeOptions::default()).await
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!("Not found"))).into_response()
}

fn parse_id(id: &str) -> Option<u64> {
    id.parse().ok()
}

async fn root() -> Response {
    (StatusCode::OK, Json(json!({"status": "ok"}))).into_response()
}

async fn list(State(state): State<FakeState>, Path(resource): Path<String>) -> Response {
    let store = state.store.lock().unwrap();
    match store.collections.get(&resource) {
        Some(collection) => {
            let records: Vec<Value> = collection.values().cloned().collect();
            (StatusCode::OK, Json(Value::Array(records))).into_response()
        }
        None => not_found(),
    }
}

async fn create(
    State(state): State<FakeState>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Value::Object(record) = body else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "expected object"})))
            .into_response();
    };

    let options = &state.options;
    if options.strict_validation
        && resource == "reviews"
        && !record.contains_key(&options.schema.review_movie_ref)
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("{} is required", options.schema.review_movie_ref)})),
        )
            .into_response();
    }

    let mut store = state.store.lock().unwrap();
    if !store.collections.contains_key(&resource) {
        return not_found();
    }
    let created = store.insert(&resource, record);
    (options.created_status, Json(created)).into_response()
}

async fn fetch(
    State(state): State<FakeState>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let store = state.store.lock().unwrap();
    let record = parse_id(&id).and_then(|key| store.collections.get(&resource)?.get(&key));
    match record {
        Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
        None => not_found(),
    }
}

async fn update(
    State(state): State<FakeState>,
    Path((resource, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Response {
    let replace = state.options.replace_on_update;
    let mut store = state.store.lock().unwrap();
    let Some(key) = parse_id(&id) else {
        return not_found();
    };
    let Some(record) = store
        .collections
        .get_mut(&resource)
        .and_then(|c| c.get_mut(&key))
    else {
        return not_found();
    };

    if replace {
        let mut replaced = object(patch);
        replaced.insert("id".to_string(), Value::String(id));
        *record = Value::Object(replaced);
    } else if let (Some(target), Value::Object(patch)) = (record.as_object_mut(), patch) {
        for (field, value) in patch {
            if field != "id" {
                target.insert(field, value);
            }
        }
    }

    (StatusCode::OK, Json(record.clone())).into_response()
}

async fn remove(
    State(state): State<FakeState>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    if state.options.fail_deletes {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("boom"))).into_response();
    }

    let mut store = state.store.lock().unwrap();
    let removed = parse_id(&id).and_then(|key| store.collections.get_mut(&resource)?.remove(&key));
    match removed {
        Some(record) => {
            store.deleted.push(format!("/{}/{}", resource, id));
            (StatusCode::OK, Json(record)).into_response()
        }
        None => not_found(),
    }
}
