//! `/tasks`: task installment CRUD and occurrence generation.

use chrono::Utc;
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use casa_db::model::task::{NewTaskInstallment, TaskInstallment, TaskOccurrence};
use casa_service::recurrence::generator::GenerationReport;
use casa_service::task;

use super::expand::expand_tasks;
use super::request::{Created, parse_body, path_id};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn list(depot: &mut Depot) -> AppResult<Json<Vec<TaskInstallment>>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::list_installments(&mut conn).await?))
}

/// ## Summary
/// POST /tasks - Create a task installment.
///
/// ## Errors
/// Returns HTTP 400 if the title is blank or the cron expression is malformed.
#[handler]
async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<Created<TaskInstallment>> {
    let new: NewTaskInstallment = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Created(task::create_installment(&mut conn, &new).await?))
}

#[handler]
async fn get(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TaskInstallment>> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::get_installment(&mut conn, id).await?))
}

#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<TaskInstallment>> {
    let id = path_id(req, "id")?;
    let changes: NewTaskInstallment = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::update_installment(&mut conn, id, &changes).await?))
}

#[handler]
async fn delete(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    task::delete_installment(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[handler]
async fn generate(req: &mut Request, depot: &mut Depot) -> AppResult<Json<GenerationReport>> {
    let id = path_id(req, "id")?;
    let settings = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let report = task::generate_occurrences(
        &mut conn,
        id,
        settings.expansion.lookahead_months,
        Utc::now(),
    )
    .await?;
    Ok(Json(report))
}

#[handler]
async fn occurrences(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<TaskOccurrence>>> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(task::list_occurrences_for_task(&mut conn, id).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("tasks")
        .get(list)
        .post(create)
        .push(Router::with_path("update-occurrences").post(expand_tasks))
        .push(
            Router::with_path("{id}")
                .get(get)
                .put(update)
                .delete(delete)
                .push(Router::with_path("occurrences").get(occurrences).post(generate)),
        )
}
