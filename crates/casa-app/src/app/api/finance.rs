//! `/finances`: finance installment CRUD and occurrence generation.

use chrono::Utc;
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use casa_db::model::finance::{FinanceInstallment, FinanceOccurrence, NewFinanceInstallment};
use casa_service::finance;
use casa_service::recurrence::generator::GenerationReport;

use super::expand::expand_finances;
use super::request::{Created, parse_body, path_id};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn list(depot: &mut Depot) -> AppResult<Json<Vec<FinanceInstallment>>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(finance::list_installments(&mut conn).await?))
}

#[handler]
async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<Created<FinanceInstallment>> {
    let new: NewFinanceInstallment = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Created(finance::create_installment(&mut conn, &new).await?))
}

#[handler]
async fn get(req: &mut Request, depot: &mut Depot) -> AppResult<Json<FinanceInstallment>> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(finance::get_installment(&mut conn, id).await?))
}

#[handler]
async fn update(req: &mut Request, depot: &mut Depot) -> AppResult<Json<FinanceInstallment>> {
    let id = path_id(req, "id")?;
    let changes: NewFinanceInstallment = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(finance::update_installment(&mut conn, id, &changes).await?))
}

#[handler]
async fn delete(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    finance::delete_installment(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// ## Summary
/// POST /finances/{id}/occurrences - Generate the occurrences of one
/// installment and report how many were created.
///
/// ## Errors
/// Returns HTTP 404 for an unknown installment and HTTP 422 when its stored
/// interval is invalid.
#[handler]
async fn generate(req: &mut Request, depot: &mut Depot) -> AppResult<Json<GenerationReport>> {
    let id = path_id(req, "id")?;
    let settings = get_config_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let report = finance::generate_occurrences(
        &mut conn,
        id,
        settings.expansion.lookahead_months,
        Utc::now(),
    )
    .await?;
    Ok(Json(report))
}

#[handler]
async fn occurrences(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<FinanceOccurrence>>> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        finance::list_occurrences_for_installment(&mut conn, id).await?,
    ))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("finances")
        .get(list)
        .post(create)
        .push(Router::with_path("update-occurrences").post(expand_finances))
        .push(
            Router::with_path("{id}")
                .get(get)
                .put(update)
                .delete(delete)
                .push(Router::with_path("occurrences").get(occurrences).post(generate)),
        )
}
