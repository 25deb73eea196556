//! Web API module for KitchenPlan.
//!
//! This module provides a REST API for a browser-based planner frontend,
//! exposing project files, the module catalog and the financing calculator.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/projects` - List project files
//! - `GET /api/projects/{filename}` - Load a project
//! - `PUT /api/projects/{filename}` - Save a project
//! - `POST /api/projects/{filename}/modules` - Add a module from the catalog
//! - `PUT /api/projects/{filename}/modules/{id}/position` - Move a module
//! - `POST /api/projects/{filename}/modules/{id}/rotate` - Rotate a module
//! - `DELETE /api/projects/{filename}/modules/{id}` - Remove a module
//! - `GET /api/catalog` - Module library
//! - `POST /api/finance/schedule` - Amortization schedule
//! - `POST /api/finance/quote` - Financing quote
//! - `POST /api/finance/compare` - Financing packages
//! - `POST /api/finance/affordability` - Affordability

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::constants::{APP_NAME, PROJECT_FILE_EXTENSION};
use crate::finance::{
    self, Affordability, AmortizationSchedule, FinanceError, FinanceOption, FinanceQuote,
    LoanTerms, QuoteRequest,
};
use crate::models::catalog::{categories, find_template};
use crate::models::{
    CatalogCategory, KitchenModule, Placement, PlannerError, PlannerProject, ProjectParseError,
};
use crate::planner::PlannerSession;
use crate::services::{ProjectService, ProjectSummary};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Directory holding project files
    workspace_root: PathBuf,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(config: Config, workspace_root: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            workspace_root,
        }
    }

    /// Returns the workspace root directory.
    #[must_use]
    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Project list response.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    /// Project summaries, sorted by filename.
    pub projects: Vec<ProjectSummary>,
}

/// Catalog response.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Template groups in display order.
    pub categories: Vec<CatalogCategory>,
    /// Total number of templates.
    pub count: usize,
}

/// Add-module request.
#[derive(Debug, Deserialize)]
pub struct AddModuleRequest {
    /// Catalog template name.
    pub template: String,
    /// Explicit x position; random inside the configured window when absent.
    pub x: Option<f64>,
    /// Explicit y position; random inside the configured window when absent.
    pub y: Option<f64>,
}

/// Move-module request.
#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    /// New x position.
    pub x: f64,
    /// New y position.
    pub y: f64,
}

/// Quote request; absent fields use the configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBody {
    /// Total project price.
    pub total_amount: Option<f64>,
    /// Down payment.
    pub down_payment: Option<f64>,
    /// Annual interest rate in percent.
    pub interest_rate: Option<f64>,
    /// Term in months.
    pub loan_term_months: Option<u32>,
}

/// Comparison response.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    /// Base quote the packages derive from.
    pub quote: FinanceQuote,
    /// Standard, extended, premium and quick packages.
    pub options: Vec<FinanceOption>,
}

/// Affordability request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityRequest {
    /// Gross monthly income.
    pub monthly_income: f64,
    /// Down payment.
    #[serde(default)]
    pub down_payment: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    /// Term in months.
    pub loan_term_months: u32,
    /// Maximum debt-to-income ratio; configured value when absent.
    pub max_dti: Option<f64>,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(error: impl Into<String>, details: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details(error, details)),
    )
}

fn not_found(error: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (StatusCode::NOT_FOUND, Json(ApiError::new(error)))
}

fn internal(error: impl Into<String>, details: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(error, details)),
    )
}

fn finance_error(err: &FinanceError) -> (StatusCode, Json<ApiError>) {
    bad_request("Invalid financing input", err.to_string())
}

// ============================================================================
// Helpers
// ============================================================================

/// Validates a filename to prevent path traversal attacks.
///
/// Returns the sanitized filename or an error if the filename is invalid.
fn validate_filename(filename: &str) -> Result<&str, ApiError> {
    if filename.is_empty() {
        return Err(ApiError::new("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::new(
            "Invalid filename: path traversal not allowed",
        ));
    }

    if filename.starts_with('.') {
        return Err(ApiError::new("Invalid filename: hidden files not allowed"));
    }

    Ok(filename)
}

/// Resolves a validated project filename inside the workspace, adding the
/// `.json` extension when missing.
fn project_path(state: &AppState, filename: &str) -> ApiResult<PathBuf> {
    let filename = validate_filename(filename).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;

    let filename = if std::path::Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION))
    {
        filename.to_string()
    } else {
        format!("{filename}.{PROJECT_FILE_EXTENSION}")
    };

    Ok(state.workspace_root.join(filename))
}

/// Loads an existing project: 404 when absent, 400 when malformed.
fn load_project(path: &std::path::Path) -> ApiResult<PlannerProject> {
    if !path.exists() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        return Err(not_found(format!("Project file not found: {name}")));
    }

    ProjectService::load(path).map_err(|e| {
        if e.downcast_ref::<ProjectParseError>().is_some() {
            bad_request("Error loading project", format!("{e:#}"))
        } else {
            internal("Failed to load project", format!("{e:#}"))
        }
    })
}

fn save_project(project: &PlannerProject, path: &std::path::Path) -> ApiResult<()> {
    ProjectService::save(project, path)
        .map_err(|e| internal("Failed to save project", format!("{e:#}")))
}

/// Parses a JSON request body, reporting failures as JSON 400 responses.
fn parse_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| bad_request("Invalid request body", e.to_string()))
}

fn module_or_404(project: &PlannerProject, id: &str) -> ApiResult<KitchenModule> {
    project
        .module(id)
        .cloned()
        .ok_or_else(|| not_found(format!("Module not found: {id}")))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/projects - List all project files in the workspace.
async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<ProjectListResponse>> {
    let projects = ProjectService::list(&state.workspace_root)
        .map_err(|e| internal("Failed to read workspace directory", format!("{e:#}")))?;

    Ok(Json(ProjectListResponse { projects }))
}

/// GET /api/projects/{filename} - Load a project.
async fn get_project(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<PlannerProject>> {
    let path = project_path(&state, &filename)?;
    Ok(Json(load_project(&path)?))
}

/// PUT /api/projects/{filename} - Save a project document.
///
/// The body goes through the same defaults and validation as a file load.
async fn save_project_document(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: String,
) -> ApiResult<StatusCode> {
    let path = project_path(&state, &filename)?;

    let project = PlannerProject::from_json(&body)
        .map_err(|e| bad_request("Invalid project", e.to_string()))?;

    save_project(&project, &path)?;
    info!(file = %path.display(), modules = project.modules.len(), "saved project");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/projects/{filename}/modules - Add a module from the catalog.
async fn add_module(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: String,
) -> ApiResult<(StatusCode, Json<KitchenModule>)> {
    let request: AddModuleRequest = parse_body(&body)?;
    let template = find_template(&request.template).ok_or_else(|| {
        bad_request(
            "Unknown template",
            format!("No catalog template named '{}'", request.template),
        )
    })?;

    let path = project_path(&state, &filename)?;
    let mut session = PlannerSession::new(load_project(&path)?)
        .with_placement(state.config.planner.default_placement());

    let id = match (request.x, request.y) {
        (Some(x), Some(y)) => session.add_module_with(&template, Placement::At { x, y }),
        (None, None) => session.add_module(&template),
        _ => {
            return Err(bad_request(
                "Invalid position",
                "x and y must be given together",
            ))
        }
    }
    .map_err(|e| match e {
        PlannerError::InvalidPosition { .. } => bad_request("Invalid position", e.to_string()),
        _ => bad_request("Invalid template", e.to_string()),
    })?;

    save_project(session.project(), &path)?;
    let module = module_or_404(session.project(), &id)?;

    Ok((StatusCode::CREATED, Json(module)))
}

/// PUT /api/projects/{filename}/modules/{id}/position - Move a module.
async fn move_module(
    State(state): State<AppState>,
    Path((filename, id)): Path<(String, String)>,
    body: String,
) -> ApiResult<Json<KitchenModule>> {
    let request: PositionRequest = parse_body(&body)?;
    if !request.x.is_finite() || !request.y.is_finite() {
        return Err(bad_request("Invalid position", "x and y must be finite"));
    }

    let path = project_path(&state, &filename)?;
    let mut session = PlannerSession::new(load_project(&path)?);

    let moved = session
        .move_module(&id, request.x, request.y)
        .map_err(|e| bad_request("Invalid position", e.to_string()))?;
    if !moved {
        return Err(not_found(format!("Module not found: {id}")));
    }
    save_project(session.project(), &path)?;

    Ok(Json(module_or_404(session.project(), &id)?))
}

/// POST /api/projects/{filename}/modules/{id}/rotate - Rotate a module.
async fn rotate_module(
    State(state): State<AppState>,
    Path((filename, id)): Path<(String, String)>,
) -> ApiResult<Json<KitchenModule>> {
    let path = project_path(&state, &filename)?;
    let mut session = PlannerSession::new(load_project(&path)?);

    if !session.rotate_module(&id) {
        return Err(not_found(format!("Module not found: {id}")));
    }
    save_project(session.project(), &path)?;

    Ok(Json(module_or_404(session.project(), &id)?))
}

/// DELETE /api/projects/{filename}/modules/{id} - Remove a module.
async fn remove_module(
    State(state): State<AppState>,
    Path((filename, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let path = project_path(&state, &filename)?;
    let mut session = PlannerSession::new(load_project(&path)?);

    if session.remove_module(&id).is_none() {
        return Err(not_found(format!("Module not found: {id}")));
    }
    save_project(session.project(), &path)?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/catalog - Module library.
async fn get_catalog() -> Json<CatalogResponse> {
    let categories = categories();
    let count = categories.iter().map(|c| c.modules.len()).sum();
    Json(CatalogResponse { categories, count })
}

/// POST /api/finance/schedule - Amortization schedule for a loan.
async fn finance_schedule(body: String) -> ApiResult<Json<AmortizationSchedule>> {
    let terms: LoanTerms = parse_body(&body)?;
    let schedule = AmortizationSchedule::compute(terms).map_err(|e| finance_error(&e))?;
    Ok(Json(schedule))
}

fn quote_from_body(state: &AppState, body: &str) -> ApiResult<FinanceQuote> {
    let request: QuoteBody = if body.trim().is_empty() {
        QuoteBody::default()
    } else {
        parse_body(body)?
    };

    let defaults = state.config.finance.quote_request();
    let request = QuoteRequest {
        total_amount: request.total_amount.unwrap_or(defaults.total_amount),
        down_payment: request.down_payment.unwrap_or(defaults.down_payment),
        interest_rate: request.interest_rate.unwrap_or(defaults.interest_rate),
        loan_term_months: request.loan_term_months.unwrap_or(defaults.loan_term_months),
    };

    FinanceQuote::compute(request).map_err(|e| {
        warn!("rejected quote request: {e}");
        finance_error(&e)
    })
}

/// POST /api/finance/quote - Financing quote.
async fn finance_quote(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<FinanceQuote>> {
    Ok(Json(quote_from_body(&state, &body)?))
}

/// POST /api/finance/compare - Financing packages for a quote.
async fn finance_compare(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<CompareResponse>> {
    let quote = quote_from_body(&state, &body)?;
    let options = finance::compare(&quote).map_err(|e| finance_error(&e))?;
    Ok(Json(CompareResponse { quote, options }))
}

/// POST /api/finance/affordability - Largest loan an income supports.
async fn finance_affordability(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<Affordability>> {
    let request: AffordabilityRequest = parse_body(&body)?;
    let result = finance::affordability(
        request.monthly_income,
        request.down_payment,
        request.interest_rate,
        request.loan_term_months,
        request.max_dti.unwrap_or(state.config.finance.max_dti),
    )
    .map_err(|e| finance_error(&e))?;

    Ok(Json(result))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // The server is meant to run locally next to the frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Project endpoints
        .route("/api/projects", get(list_projects))
        .route(
            "/api/projects/{filename}",
            get(get_project).put(save_project_document),
        )
        .route("/api/projects/{filename}/modules", post(add_module))
        .route(
            "/api/projects/{filename}/modules/{id}",
            axum::routing::delete(remove_module),
        )
        .route(
            "/api/projects/{filename}/modules/{id}/position",
            put(move_module),
        )
        .route(
            "/api/projects/{filename}/modules/{id}/rotate",
            post(rotate_module),
        )
        // Catalog
        .route("/api/catalog", get(get_catalog))
        // Financing
        .route("/api/finance/schedule", post(finance_schedule))
        .route("/api/finance/quote", post(finance_quote))
        .route("/api/finance/compare", post(finance_compare))
        .route("/api/finance/affordability", post(finance_affordability))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(
    config: Config,
    workspace_root: PathBuf,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = create_router(AppState::new(config, workspace_root));

    info!("Starting {} web server on {}", APP_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename_valid() {
        assert!(validate_filename("kitchen.json").is_ok());
        assert!(validate_filename("kitchen-2").is_ok());
    }

    #[test]
    fn test_validate_filename_path_traversal() {
        assert!(validate_filename("../secret.json").is_err());
        assert!(validate_filename("foo/../bar.json").is_err());
        assert!(validate_filename("..").is_err());
    }

    #[test]
    fn test_validate_filename_absolute_path() {
        assert!(validate_filename("/etc/passwd").is_err());
        assert!(validate_filename("\\Windows\\System32").is_err());
    }

    #[test]
    fn test_validate_filename_hidden_files() {
        assert!(validate_filename(".env").is_err());
    }

    #[test]
    fn test_validate_filename_empty() {
        assert!(validate_filename("").is_err());
    }

    #[test]
    fn test_project_path_adds_extension() {
        let state = AppState::new(Config::default(), PathBuf::from("/work"));
        assert_eq!(
            project_path(&state, "kitchen").unwrap(),
            PathBuf::from("/work/kitchen.json")
        );
        assert_eq!(
            project_path(&state, "kitchen.JSON").unwrap(),
            PathBuf::from("/work/kitchen.JSON")
        );
        assert!(project_path(&state, "../kitchen").is_err());
    }
}
