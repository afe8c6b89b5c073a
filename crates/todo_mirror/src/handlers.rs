use actix_web::{
    web::{self, Data, Json},
    HttpResponse,
};
use serde::Deserialize;
use serde_json::json;
use todo_core::{Todo, TodoId};
use todo_web::{AppError, Result};

use crate::state::MirrorState;

/// Whole-collection syncs can be much larger than a single record.
const SYNC_PAYLOAD_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct UpdateDoneRequest {
    pub done: bool,
}

pub fn mirror_app_config(
    state: Data<MirrorState>,
) -> impl Fn(&mut web::ServiceConfig) + Send + Clone + 'static {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(SYNC_PAYLOAD_LIMIT));
        config(cfg);
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/todos", web::get().to(list_todos))
        .route("/todos", web::post().to(upsert_todo))
        .route("/todos/sync", web::post().to(sync_todos))
        .route("/todos/{id}", web::put().to(update_todo))
        .route("/todos/{id}", web::delete().to(delete_todo));
}

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Todo mirror service is running",
        "endpoints": ["/todos", "/todos/sync"],
    }))
}

pub async fn list_todos(state: Data<MirrorState>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.list().await)
}

/// Inserts the todo or overwrites the one with the same id.
pub async fn upsert_todo(state: Data<MirrorState>, payload: Json<Todo>) -> Result<HttpResponse> {
    let todo = state.store.upsert(payload.into_inner()).await;
    state.persist().await?;
    Ok(HttpResponse::Ok().json(todo))
}

pub async fn update_todo(
    state: Data<MirrorState>,
    path: web::Path<TodoId>,
    payload: Json<UpdateDoneRequest>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let todo = state
        .store
        .update(id, Some(payload.done))
        .await
        .ok_or(AppError::TodoNotFound(id))?;
    state.persist().await?;
    Ok(HttpResponse::Ok().json(todo))
}

pub async fn delete_todo(state: Data<MirrorState>, path: web::Path<TodoId>) -> Result<HttpResponse> {
    let id = path.into_inner();
    if state.store.delete(id).await == 0 {
        return Err(AppError::TodoNotFound(id));
    }
    state.persist().await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Todo deleted successfully" })))
}

/// Replaces the whole collection with the pushed one.
pub async fn sync_todos(
    state: Data<MirrorState>,
    payload: Json<Vec<Todo>>,
) -> Result<HttpResponse> {
    let todos = payload.into_inner();
    let count = todos.len();
    state.store.replace_all(todos).await;
    state.persist().await?;
    log::info!("Synced {} todos", count);
    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Synced {} todos successfully", count),
    })))
}
