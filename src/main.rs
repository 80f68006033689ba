use std::sync::Arc;

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;

use dish_form::app_state::AppState;
use dish_form::config::AppConfig;
use dish_form::routes;
use dish_form::services::{dishes_client::DishesClient, pages};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing dish-form server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    metrics::describe_counter!(
        "dish_submissions_total",
        "Dish submissions sent to the dishes API, by outcome"
    );
    metrics::describe_histogram!(
        "dish_submission_seconds",
        "Round-trip time of a dish submission"
    );

    tracing::info!(dishes_api_url = %config.dishes_api_url, "Initializing dishes API client");
    let dishes = DishesClient::new(&config.dishes_api_url)
        .expect("Failed to initialize dishes API client");

    let templates = pages::load_templates().expect("Failed to compile page templates");

    let state = AppState::new(dishes, templates);

    let app = routes::router(state).route(
        "/metrics",
        get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
    );

    tracing::info!("Starting dish-form on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
