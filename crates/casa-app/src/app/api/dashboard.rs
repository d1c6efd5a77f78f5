//! Read-only views: dashboard rows, wallet balances and transactions.

use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use casa_db::model::dashboard::DashboardRow;
use casa_db::model::ledger::Transaction;
use casa_service::ledger::{self, WalletBalance};

use super::request::path_id;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn dashboard(depot: &mut Depot) -> AppResult<Json<Vec<DashboardRow>>> {
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(ledger::dashboard_rows(&mut conn).await?))
}

/// ## Summary
/// GET /wallets/{user_id} - Latest balance of a user; zero when none exists.
#[handler]
async fn wallet(req: &mut Request, depot: &mut Depot) -> AppResult<Json<WalletBalance>> {
    let user_id = path_id(req, "user_id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(ledger::current_balance(&mut conn, user_id).await?))
}

#[handler]
async fn transactions(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<Transaction>>> {
    let occurrence_id = path_id(req, "occurrence_id")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        ledger::transactions_for_occurrence(&mut conn, occurrence_id).await?,
    ))
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("occurrences/dashboard").get(dashboard))
        .push(Router::with_path("wallets/{user_id}").get(wallet))
        .push(Router::with_path("transactions/{occurrence_id}").get(transactions))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use salvo::http::StatusCode;
    use salvo::prelude::*;
    use salvo::test::{ResponseExt, TestClient};

    #[test_log::test(tokio::test)]
    async fn wallet_rejects_malformed_user_id() {
        let service = Service::new(super::routes());

        let mut res = TestClient::get("http://127.0.0.1:5800/wallets/bob")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        let body: serde_json::Value = res.take_json().await.expect("json body");
        assert_eq!(body["error"], "Bad request: 'bob' is not a valid id");
    }
}
