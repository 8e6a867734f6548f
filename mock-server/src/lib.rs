use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub state: String,
    pub address1: String,
    #[serde(default)]
    pub address2: String,
}

#[derive(Debug)]
pub struct Store {
    next_id: i64,
    students: BTreeMap<i64, Student>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            students: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/Student", get(list_students).post(create_student))
        .route(
            "/api/Student/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_students(State(db): State<Db>) -> Json<Vec<Student>> {
    let store = db.read().await;
    Json(store.students.values().cloned().collect())
}

async fn create_student(
    State(db): State<Db>,
    Json(input): Json<Student>,
) -> (StatusCode, Json<Student>) {
    let mut store = db.write().await;
    let student = Student {
        id: store.next_id,
        ..input
    };
    store.next_id += 1;
    store.students.insert(student.id, student.clone());
    tracing::info!(id = student.id, "student created");
    (StatusCode::CREATED, Json(student))
}

async fn get_student(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, StatusCode> {
    let store = db.read().await;
    store.students.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<Student>,
) -> Result<Json<Student>, StatusCode> {
    if input.id != 0 && input.id != id {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let student = store.students.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *student = Student { id, ..input };
    tracing::info!(id, "student updated");
    Ok(Json(student.clone()))
}

async fn delete_student(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .students
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
