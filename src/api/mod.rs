mod report;

use std::ffi::OsString;
use std::io::{self, Write};
use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::core::{Assumptions, InputError, Projection, ProjectionSummary, project, summarize};

pub use report::render_table;

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

pub const MAX_LOAN_TERM_YEARS: u32 = 50;
pub const MAX_HORIZON_YEARS: u32 = 100;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    home_value: Option<f64>,
    mortgage_rate: Option<f64>,
    maintenance_rate: Option<f64>,
    property_tax_rate: Option<f64>,
    home_growth_rate: Option<f64>,
    down_payment: Option<f64>,
    loan_term: Option<f64>,
    monthly_rent: Option<f64>,
    rent_growth_rate: Option<f64>,
    investment_return_rate: Option<f64>,
    years: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "rentorown",
    bin_name = "rentorown project",
    about = "Compare buying a home with a mortgage against renting and investing the difference"
)]
struct Cli {
    #[arg(long, default_value_t = 500_000.0, help = "Purchase price of the home")]
    home_value: f64,
    #[arg(long, default_value_t = 5.0, help = "Annual mortgage rate in percent")]
    mortgage_rate: f64,
    #[arg(
        long,
        default_value_t = 1.0,
        help = "Annual maintenance as percent of home value"
    )]
    maintenance_rate: f64,
    #[arg(
        long,
        default_value_t = 1.0,
        help = "Annual property tax as percent of home value"
    )]
    property_tax_rate: f64,
    #[arg(long, default_value_t = 8.0, help = "Annual home value growth in percent")]
    home_growth_rate: f64,
    #[arg(long, default_value_t = 15.0, help = "Down payment in percent of home value")]
    down_payment: f64,
    #[arg(long, default_value_t = 25, help = "Mortgage term in years")]
    loan_term: u32,
    #[arg(long, default_value_t = 2_000.0, help = "Rent per month in year 1")]
    monthly_rent: f64,
    #[arg(long, default_value_t = 5.0, help = "Annual rent growth in percent")]
    rent_growth_rate: f64,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Annual return on the renter's investments in percent"
    )]
    investment_return_rate: f64,
    #[arg(long, help = "Years to project; defaults to the loan term")]
    years: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    assumptions: Assumptions,
    years: Vec<u32>,
    #[serde(flatten)]
    projection: Projection,
    summary: ProjectionSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

/// Validates percentage-based inputs and normalizes them to the fractional
/// form the engine works in. This is the only place rates are divided by 100.
fn build_assumptions(cli: &Cli) -> Result<Assumptions, InputError> {
    let home_value = finite("home-value", cli.home_value)?;
    if home_value <= 0.0 {
        return Err(InputError::OutOfRange {
            field: "home-value",
            requirement: "> 0",
            value: home_value,
        });
    }

    let monthly_rent = finite("monthly-rent", cli.monthly_rent)?;
    if monthly_rent < 0.0 {
        return Err(InputError::OutOfRange {
            field: "monthly-rent",
            requirement: ">= 0",
            value: monthly_rent,
        });
    }

    let loan_term_years = whole_years("loan-term", cli.loan_term, MAX_LOAN_TERM_YEARS)?;
    let years = whole_years(
        "years",
        cli.years.unwrap_or(loan_term_years),
        MAX_HORIZON_YEARS,
    )?;

    Ok(Assumptions {
        home_value,
        mortgage_rate: percent("mortgage-rate", cli.mortgage_rate)?,
        maintenance_rate: percent("maintenance-rate", cli.maintenance_rate)?,
        property_tax_rate: percent("property-tax-rate", cli.property_tax_rate)?,
        home_growth_rate: percent("home-growth-rate", cli.home_growth_rate)?,
        monthly_rent,
        rent_growth_rate: percent("rent-growth-rate", cli.rent_growth_rate)?,
        investment_return_rate: percent("investment-return-rate", cli.investment_return_rate)?,
        loan_term_years,
        down_payment_fraction: percent("down-payment", cli.down_payment)?,
        years,
    })
}

fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field })
    }
}

fn percent(field: &'static str, value: f64) -> Result<f64, InputError> {
    let value = finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(InputError::OutOfRange {
            field,
            requirement: "between 0 and 100",
            value,
        });
    }
    Ok(value / 100.0)
}

/// Web payloads carry year counts as JSON numbers; anything that is not a
/// non-negative integer fitting `u32` is rejected against its field.
fn year_count(field: &'static str, value: f64) -> Result<u32, InputError> {
    let value = finite(field, value)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(InputError::OutOfRange {
            field,
            requirement: "a whole number of years",
            value,
        });
    }
    Ok(value as u32)
}

fn whole_years(field: &'static str, value: u32, max: u32) -> Result<u32, InputError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::YearsOutOfRange {
            field,
            min: 1,
            max,
            value,
        })
    }
}

/// Runs one projection from command-line flags and writes it to stdout.
pub fn run_projection_cli<I, T>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let assumptions = build_assumptions(&cli)?;
    let projection = project(&assumptions);
    debug!(
        "projected {} years, monthly payment {:.2}",
        projection.horizon(),
        projection.monthly_payment
    );

    let mut stdout = io::stdout().lock();
    match cli.format {
        OutputFormat::Table => {
            let table = render_table(&projection, &summarize(&projection));
            stdout
                .write_all(table.as_bytes())
                .context("failed to write projection table")?;
        }
        OutputFormat::Json => {
            let response = build_project_response(assumptions, projection);
            serde_json::to_writer_pretty(&mut stdout, &response)
                .context("failed to write projection JSON")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

pub async fn run_http_server(port: u16) -> io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("rent-or-own HTTP API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
            field: None,
        },
    )
}

async fn project_get_handler(payload: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => malformed_request(rejection.body_text()),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => malformed_request(rejection.body_text()),
    }
}

fn malformed_request(error: String) -> Response {
    warn!("rejected malformed projection request: {error}");
    json_response(StatusCode::BAD_REQUEST, ErrorResponse { error, field: None })
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let assumptions = match assumptions_from_payload(payload) {
        Ok(assumptions) => assumptions,
        Err(err) => {
            warn!("rejected projection request: {err}");
            return error_response(StatusCode::BAD_REQUEST, &err);
        }
    };

    let projection = project(&assumptions);
    debug!(
        "projected {} years for home value {:.0}",
        projection.horizon(),
        assumptions.home_value
    );
    json_response(StatusCode::OK, build_project_response(assumptions, projection))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, err: &InputError) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: err.to_string(),
            field: Some(err.field()),
        },
    )
}

#[cfg(test)]
fn assumptions_from_json(json: &str) -> Result<Assumptions, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    assumptions_from_payload(payload).map_err(|e| e.to_string())
}

fn assumptions_from_payload(payload: ProjectPayload) -> Result<Assumptions, InputError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.home_value {
        cli.home_value = v;
    }
    if let Some(v) = payload.mortgage_rate {
        cli.mortgage_rate = v;
    }
    if let Some(v) = payload.maintenance_rate {
        cli.maintenance_rate = v;
    }
    if let Some(v) = payload.property_tax_rate {
        cli.property_tax_rate = v;
    }
    if let Some(v) = payload.home_growth_rate {
        cli.home_growth_rate = v;
    }
    if let Some(v) = payload.down_payment {
        cli.down_payment = v;
    }
    if let Some(v) = payload.loan_term {
        cli.loan_term = year_count("loan-term", v)?;
    }
    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.rent_growth_rate {
        cli.rent_growth_rate = v;
    }
    if let Some(v) = payload.investment_return_rate {
        cli.investment_return_rate = v;
    }
    if let Some(v) = payload.years {
        cli.years = Some(year_count("years", v)?);
    }

    build_assumptions(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        home_value: 500_000.0,
        mortgage_rate: 5.0,
        maintenance_rate: 1.0,
        property_tax_rate: 1.0,
        home_growth_rate: 8.0,
        down_payment: 15.0,
        loan_term: 25,
        monthly_rent: 2_000.0,
        rent_growth_rate: 5.0,
        investment_return_rate: 8.0,
        years: None,
        format: OutputFormat::Json,
    }
}

fn build_project_response(assumptions: Assumptions, projection: Projection) -> ProjectResponse {
    let summary = summarize(&projection);
    ProjectResponse {
        assumptions,
        years: (0..=projection.horizon()).collect(),
        projection,
        summary,
    }
}
