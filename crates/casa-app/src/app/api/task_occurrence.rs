//! `/task-occurrences`: individual task occurrences.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use casa_db::model::task::{NewTaskOccurrence, TaskOccurrence, TaskOccurrencePatch};
use casa_service::task;

use super::request::{Created, parse_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn list(depot: &mut Depot) -> AppResult<Json<Vec<TaskOccurrence>>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::list_occurrences(&mut conn).await?))
}

#[handler]
async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<Created<TaskOccurrence>> {
    let new: NewTaskOccurrence = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Created(task::create_occurrence(&mut conn, &new).await?))
}

#[handler]
async fn get(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TaskOccurrence>> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::get_occurrence(&mut conn, id).await?))
}

/// ## Summary
/// PUT/PATCH /task-occurrences/{id} - Update status, assignee, payer group or
/// subtasks. Absent fields keep their stored value.
#[handler]
async fn patch(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TaskOccurrence>> {
    let id = path_id(req, "id")?;
    let changes: TaskOccurrencePatch = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::patch_occurrence(&mut conn, id, &changes).await?))
}

#[handler]
async fn delete(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    task::delete_occurrence(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("task-occurrences")
        .get(list)
        .post(create)
        .push(
            Router::with_path("{id}")
                .get(get)
                .put(patch)
                .patch(patch)
                .delete(delete),
        )
}
