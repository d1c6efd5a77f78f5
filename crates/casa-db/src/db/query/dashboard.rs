use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::occurrences_dashboard;
use crate::model::dashboard::DashboardRow;

/// ## Summary
/// Loads every dashboard row, newest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(conn: &mut DbConnection<'_>) -> QueryResult<Vec<DashboardRow>> {
    occurrences_dashboard::table
        .order(occurrences_dashboard::date.desc())
        .select(DashboardRow::as_select())
        .load(conn)
        .await
}
