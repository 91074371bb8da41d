// src/web/mod.rs
//! Read-only dashboard over the efficiency top-N table.

pub mod handlers;
pub mod page;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::config::AppConfig;
use crate::types::RankedJob;

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "GET, OPTIONS"));
    }
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[get("/jobs?<min_salary>&<max_salary>")]
pub async fn list_jobs(
    min_salary: Option<f64>,
    max_salary: Option<f64>,
    state: &State<DashboardState>,
) -> Result<Json<DataResponse<Vec<RankedJob>>>, (Status, Json<ErrorResponse>)> {
    handlers::list_jobs_handler(state, SalaryRange::new(min_salary, max_salary)).await
}

#[get("/?<view>&<min_salary>&<max_salary>")]
pub async fn dashboard(
    view: Option<View>,
    min_salary: Option<f64>,
    max_salary: Option<f64>,
    state: &State<DashboardState>,
) -> Result<RawHtml<String>, (Status, RawHtml<String>)> {
    handlers::dashboard_handler(
        state,
        view.unwrap_or_default(),
        SalaryRange::new(min_salary, max_salary),
    )
    .await
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Not found".to_string(),
        "NOT_FOUND",
        vec!["Available endpoints: /api/health, /api/jobs".to_string()],
    ))
}

/// Assemble the dashboard without launching it.
pub fn build_rocket(rocket: Rocket<Build>, state: DashboardState) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![not_found])
        .mount("/api", routes![health, list_jobs])
        .mount("/", routes![dashboard])
}

pub async fn start_dashboard(config: &AppConfig) -> Result<()> {
    let figment = rocket::Config::figment()
        .merge(("address", config.dashboard.address.clone()))
        .merge(("port", config.dashboard.port));

    let state = DashboardState {
        top_csv: config.paths.top_csv.clone(),
    };

    info!(
        "Dashboard on http://{}:{} reading {}",
        config.dashboard.address,
        config.dashboard.port,
        state.top_csv.display()
    );

    build_rocket(rocket::custom(figment), state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Dashboard server failed: {}", e))?;

    Ok(())
}
