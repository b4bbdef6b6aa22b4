use crate::core::{calculate, Operation};
use crate::models::{
    BinaryOperands, CalculationResponse, ErrorResponse, HealthResponse, HistoryEntry,
    PowerOperands, UnaryOperand, VersionResponse,
};
use crate::services::HistoryStore;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

/// Retrieval bound for the history listing
const HISTORY_LIMIT: usize = 50;

/// Application state shared across all handlers
///
/// The history store is optional: in the stateless variant the service
/// computes without recording and never touches a database.
#[derive(Clone)]
pub struct AppState {
    pub history: Option<Arc<HistoryStore>>,
}

impl AppState {
    pub fn new(history: Option<Arc<HistoryStore>>) -> Self {
        Self { history }
    }
}

/// Configure the always-available routes (liveness, version, health,
/// and the arithmetic endpoints)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(liveness))
        .route("/version", web::get().to(version))
        .route("/health", web::get().to(health))
        .route("/add", web::get().to(add))
        .route("/subtract", web::get().to(subtract))
        .route("/multiply", web::get().to(multiply))
        .route("/divide", web::get().to(divide))
        .route("/power", web::get().to(power))
        .route("/mod", web::get().to(modulo))
        .route("/sqrt", web::get().to(sqrt));
}

/// Configure the routes gated on the history store being ready
pub fn configure_history(cfg: &mut web::ServiceConfig) {
    cfg.route("/history", web::get().to(list_history));
}

/// Liveness endpoint
async fn liveness() -> impl Responder {
    HttpResponse::Ok().body("Calculator service is up and running!")
}

/// Version endpoint
async fn version() -> impl Responder {
    HttpResponse::Ok().json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Calculator service".to_string(),
    })
}

/// Health check endpoint
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
    })
}

async fn add(state: web::Data<AppState>, query: web::Query<BinaryOperands>) -> impl Responder {
    respond(&state, Operation::Add, query.operand1(), Some(query.operand2())).await
}

async fn subtract(state: web::Data<AppState>, query: web::Query<BinaryOperands>) -> impl Responder {
    respond(
        &state,
        Operation::Subtract,
        query.operand1(),
        Some(query.operand2()),
    )
    .await
}

async fn multiply(state: web::Data<AppState>, query: web::Query<BinaryOperands>) -> impl Responder {
    respond(
        &state,
        Operation::Multiply,
        query.operand1(),
        Some(query.operand2()),
    )
    .await
}

async fn divide(state: web::Data<AppState>, query: web::Query<BinaryOperands>) -> impl Responder {
    respond(
        &state,
        Operation::Divide,
        query.operand1(),
        Some(query.operand2()),
    )
    .await
}

async fn power(state: web::Data<AppState>, query: web::Query<PowerOperands>) -> impl Responder {
    respond(
        &state,
        Operation::Power,
        query.operand1(),
        Some(query.operand2()),
    )
    .await
}

async fn modulo(state: web::Data<AppState>, query: web::Query<BinaryOperands>) -> impl Responder {
    respond(&state, Operation::Mod, query.operand1(), Some(query.operand2())).await
}

async fn sqrt(state: web::Data<AppState>, query: web::Query<UnaryOperand>) -> impl Responder {
    respond(&state, Operation::Sqrt, query.operand(), None).await
}

/// Shared calculation pipeline: compute, persist on success, reply
///
/// The history insert is awaited before the success response is written,
/// so a recorded entry always corresponds to a response the client saw.
/// A store failure after a successful calculation fails the request: the
/// alternative would report a history record that does not exist.
async fn respond(
    state: &AppState,
    op: Operation,
    operand1: f64,
    operand2: Option<f64>,
) -> HttpResponse {
    match calculate(operand1, operand2, op) {
        Ok(result) => {
            if let Some(store) = &state.history {
                let entry = HistoryEntry::record(op, operand1, operand2, result);
                if let Err(e) = store.record(&entry).await {
                    tracing::error!("Failed to record {} in history: {}", op, e);
                    return HttpResponse::InternalServerError()
                        .json(ErrorResponse::new("Failed to record calculation."));
                }
            }

            tracing::info!("{}({}, {:?}) = {}", op, operand1, operand2, result);
            HttpResponse::Ok().json(CalculationResponse { result })
        }
        Err(e) => {
            tracing::info!("Rejected {} request: {}", op, e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// History listing endpoint
///
/// GET /history
///
/// Returns up to the 50 most recent entries, newest first.
async fn list_history(state: web::Data<AppState>) -> impl Responder {
    let store = match &state.history {
        Some(store) => store,
        None => return HttpResponse::NotFound().finish(),
    };

    match store.recent(HISTORY_LIMIT).await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => {
            tracing::error!("Failed to fetch history: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to fetch history."))
        }
    }
}
