// src/web/handlers/dashboard_handlers.rs
use anyhow::Result;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::storage::{read_ranked, MissingPrerequisite};
use crate::types::RankedJob;
use crate::web::page::{render_dashboard, render_error};
use crate::web::types::{DashboardState, DataResponse, ErrorResponse, SalaryRange, View};

fn load_jobs(state: &DashboardState, range: SalaryRange) -> Result<Vec<RankedJob>> {
    let jobs = read_ranked(&state.top_csv)?;
    Ok(range.apply(jobs))
}

fn failure(e: &anyhow::Error) -> (Status, ErrorResponse) {
    if e.downcast_ref::<MissingPrerequisite>().is_some() {
        (
            Status::ServiceUnavailable,
            ErrorResponse::new(
                e.to_string(),
                "MISSING_PREREQUISITE",
                vec![
                    "Run the pipeline first: job-kpi run --mode efficiency".to_string(),
                    "Check the configured paths.top_csv".to_string(),
                ],
            ),
        )
    } else {
        error!("Failed to load ranked offers: {:#}", e);
        (
            Status::InternalServerError,
            ErrorResponse::new(
                format!("{:#}", e),
                "INVALID_DATA",
                vec!["Regenerate the table with job-kpi rank --mode efficiency".to_string()],
            ),
        )
    }
}

pub async fn list_jobs_handler(
    state: &State<DashboardState>,
    range: SalaryRange,
) -> Result<Json<DataResponse<Vec<RankedJob>>>, (Status, Json<ErrorResponse>)> {
    match load_jobs(state, range) {
        Ok(jobs) => {
            info!("Serving {} ranked offers", jobs.len());
            Ok(Json(DataResponse::success(
                format!("{} offers", jobs.len()),
                jobs,
            )))
        }
        Err(e) => {
            let (status, body) = failure(&e);
            Err((status, Json(body)))
        }
    }
}

pub async fn dashboard_handler(
    state: &State<DashboardState>,
    view: View,
    range: SalaryRange,
) -> Result<RawHtml<String>, (Status, RawHtml<String>)> {
    match load_jobs(state, range) {
        Ok(jobs) => Ok(RawHtml(render_dashboard(&jobs, view, range))),
        Err(e) => {
            let (status, body) = failure(&e);
            Err((status, RawHtml(render_error(&body.error))))
        }
    }
}
