mod dashboard;
mod expand;
mod finance;
mod finance_occurrence;
mod healthcheck;
mod request;
mod task;
mod task_occurrence;

use salvo::Router;

/// ## Summary
/// Constructs the API router.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(finance::routes())
        .push(finance_occurrence::routes())
        .push(task::routes())
        .push(task_occurrence::routes())
        .push(dashboard::routes())
}
