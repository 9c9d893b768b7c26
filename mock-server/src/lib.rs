use std::{cmp::Ordering, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;
use validator::Validate;

const ID_LEN: usize = 24;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    pub status: bool,
    pub body: String,
    pub category: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewTodo {
    #[validate(length(min = 1, message = "Todos must have a non-empty owner"))]
    pub owner: String,
    pub status: bool,
    #[validate(length(min = 1, message = "Todos must have a non-empty body"))]
    pub body: String,
    #[validate(length(min = 1, message = "Todos must have a non-empty category"))]
    pub category: String,
}

impl NewTodo {
    fn into_todo(self, id: String) -> Todo {
        Todo {
            id,
            owner: self.owner,
            status: self.status,
            body: self.body,
            category: self.category,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub owner: Option<String>,
    pub status: Option<String>,
    pub sortby: Option<String>,
    pub sortorder: Option<String>,
}

/// Insertion-ordered store.
pub type Db = Arc<RwLock<Vec<Todo>>>;

/// Fields `sortby` may name. Anything else leaves insertion order alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Owner,
    Body,
    Category,
    Status,
}

impl SortKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "owner" => Some(SortKey::Owner),
            "body" => Some(SortKey::Body),
            "category" => Some(SortKey::Category),
            "status" => Some(SortKey::Status),
            _ => None,
        }
    }

    fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortKey::Owner => a.owner.cmp(&b.owner),
            SortKey::Body => a.body.cmp(&b.body),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Status => a.status.cmp(&b.status),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a store pre-filled with `seed`. Seeds get fresh ids.
pub fn app_with(seed: Vec<NewTodo>) -> Router {
    let todos = seed.into_iter().map(|t| t.into_todo(new_id())).collect();
    let db: Db = Arc::new(RwLock::new(todos));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", get(get_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener, seed: Vec<NewTodo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

/// 24 lowercase hex characters.
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

fn check_id(id: &str) -> ApiResult<()> {
    if id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            "The requested todo id wasn't a legal id.".to_string(),
        ))
    }
}

async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Todo>>> {
    let status = match params.status.as_deref() {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("status must be true or false, got {other:?}"),
            ))
        }
    };

    let todos = db.read().await;
    let mut matching: Vec<Todo> = todos
        .iter()
        .filter(|t| params.owner.as_deref().map_or(true, |o| t.owner == o))
        .filter(|t| status.map_or(true, |s| t.status == s))
        .cloned()
        .collect();
    drop(todos);

    if let Some(key) = params.sortby.as_deref().and_then(SortKey::parse) {
        matching.sort_by(|a, b| key.compare(a, b));
        if params.sortorder.as_deref() == Some("desc") {
            matching.reverse();
        }
    }

    tracing::debug!(count = matching.len(), "listed todos");
    Ok(Json(matching))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<NewTodo>,
) -> ApiResult<(StatusCode, Json<Created>)> {
    input
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let id = new_id();
    db.write().await.push(input.into_todo(id.clone()));
    tracing::info!(%id, "created todo");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Todo>> {
    check_id(&id)?;
    let todos = db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                "The requested todo was not found".to_string(),
            )
        })
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    check_id(&id)?;
    let mut todos = db.write().await;
    let before = todos.len();
    todos.retain(|t| t.id != id);
    if todos.len() == before {
        return Err((
            StatusCode::NOT_FOUND,
            "The requested todo was not found".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}
