use actix_web::{
    web::{self, Data, Json},
    HttpResponse,
};

use crate::dto::{parse_todo_id, CreateTodoRequest, UpdateTodoRequest};
use crate::state::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/todos", web::get().to(list_todos))
        .route("/todos", web::post().to(create_todo))
        .route("/todos/{id}", web::put().to(update_todo))
        .route("/todos/{id}", web::delete().to(delete_todo));
}

pub async fn list_todos(state: Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.store.list().await)
}

/// Malformed or missing bodies create a todo without text.
pub async fn create_todo(
    state: Data<AppState>,
    payload: Option<Json<CreateTodoRequest>>,
) -> HttpResponse {
    let text = payload.and_then(|payload| payload.into_inner().into_text());
    let todo = state.store.create(text).await;
    log::debug!("Created todo {}", todo.id);
    HttpResponse::Created().json(todo)
}

/// Always 204, whether or not the id exists.
pub async fn update_todo(
    state: Data<AppState>,
    path: web::Path<String>,
    payload: Option<Json<UpdateTodoRequest>>,
) -> HttpResponse {
    match parse_todo_id(&path) {
        Some(id) => {
            let done = payload.and_then(|payload| payload.done());
            state.store.update(id, done).await;
        }
        None => {
            log::debug!("No todo matches unparseable id {:?}", path.as_str());
            state.store.touch().await;
        }
    }
    HttpResponse::NoContent().finish()
}

/// Always 204, whether or not the id exists.
pub async fn delete_todo(state: Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match parse_todo_id(&path) {
        Some(id) => {
            state.store.delete(id).await;
        }
        None => {
            log::debug!("No todo matches unparseable id {:?}", path.as_str());
            state.store.touch().await;
        }
    }
    HttpResponse::NoContent().finish()
}
