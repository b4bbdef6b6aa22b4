use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use calc_svc::config::Settings;
use calc_svc::models::ErrorResponse;
use calc_svc::routes::{self, calc::AppState};
use calc_svc::services::HistoryStore;
use std::sync::Arc;
use tracing::{error, info};

/// Translate query-string deserialization failures into the service's
/// structured error body instead of actix's default plain-text 400
fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let message = format!("Invalid query: {}", err);
    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    )
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging is up; report failures on stderr
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Initialize logging (env vars override the config file)
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting calculator service...");

    // Connect the history store before binding the listener; a failed
    // initial connection aborts startup with a non-zero exit
    let history = if settings.history.enabled {
        match HistoryStore::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        {
            Ok(store) => {
                info!("History store connected, migrations applied");
                Some(Arc::new(store))
            }
            Err(e) => {
                error!("Failed to connect to history store: {}", e);
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "history store connection required",
                ));
            }
        }
    } else {
        info!("History recording disabled, running stateless");
        None
    };

    let history_enabled = history.is_some();
    let app_state = AppState::new(history);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes);

        if history_enabled {
            app.configure(routes::configure_history_routes)
        } else {
            app
        }
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
