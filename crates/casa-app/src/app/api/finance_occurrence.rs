//! `/finance-occurrences`: individual finance occurrences.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use casa_db::model::finance::{FinanceOccurrence, FinanceOccurrencePatch, NewFinanceOccurrence};
use casa_service::finance;

use super::request::{Created, parse_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn list(depot: &mut Depot) -> AppResult<Json<Vec<FinanceOccurrence>>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(finance::list_occurrences(&mut conn).await?))
}

/// ## Summary
/// POST /finance-occurrences - Create a single occurrence by hand.
///
/// ## Errors
/// Returns HTTP 409 if the installment already has an occurrence on that date.
#[handler]
async fn create(req: &mut Request, depot: &mut Depot) -> AppResult<Created<FinanceOccurrence>> {
    let new: NewFinanceOccurrence = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Created(finance::create_occurrence(&mut conn, &new).await?))
}

#[handler]
async fn get(req: &mut Request, depot: &mut Depot) -> AppResult<Json<FinanceOccurrence>> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(finance::get_occurrence(&mut conn, id).await?))
}

/// ## Summary
/// PUT/PATCH /finance-occurrences/{id} - Update amount and/or status.
#[handler]
async fn patch(req: &mut Request, depot: &mut Depot) -> AppResult<Json<FinanceOccurrence>> {
    let id = path_id(req, "id")?;
    let changes: FinanceOccurrencePatch = parse_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(finance::patch_occurrence(&mut conn, id, &changes).await?))
}

#[handler]
async fn delete(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req, "id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    finance::delete_occurrence(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("finance-occurrences")
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
