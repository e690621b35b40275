mod config;
mod error;
mod handlers;
mod routes;


use axum::{body::Body, response::Response, Router};
use lambda_http::{
    run, service_fn, Body as LambdaBody, Error, Request as LambdaRequest,
    Response as LambdaResponse,
};
use log::{debug, error, info};
use tower::ServiceExt;

use crate::config::ServiceConfig;

fn lambda_body_into_axum(body: LambdaBody) -> Body {
    match body {
        LambdaBody::Empty => Body::empty(),
        LambdaBody::Text(text) => Body::from(text),
        LambdaBody::Binary(data) => Body::from(data),
    }
}

/// Serves one API Gateway event through the shared router
async fn handle_lambda_event(
    app: Router,
    event: LambdaRequest,
) -> Result<LambdaResponse<LambdaBody>, Error> {
    debug!("Lambda event: {} {}", event.method(), event.uri().path());

    let request = event.map(lambda_body_into_axum);
    let response = match app.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    into_lambda_response(response).await
}

// JSON bodies go back as text; anything that is not UTF-8 as binary
async fn into_lambda_response(response: Response) -> Result<LambdaResponse<LambdaBody>, Error> {
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.map_err(|err| {
        error!("Failed to buffer response body: {}", err);
        err
    })?;

    let body = if bytes.is_empty() {
        LambdaBody::Empty
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => LambdaBody::Text(text),
            Err(err) => LambdaBody::Binary(err.into_bytes()),
        }
    };

    Ok(LambdaResponse::from_parts(parts, body))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let app = routes::create_router(&config).await;

    if let Ok(function_name) = std::env::var("AWS_LAMBDA_FUNCTION_NAME") {
        info!(
            "Running in AWS Lambda environment: {} (version: {})",
            function_name,
            std::env::var("AWS_LAMBDA_FUNCTION_VERSION").unwrap_or_else(|_| "unknown".into())
        );
        run(service_fn(move |event| handle_lambda_event(app.clone(), event))).await?;
    } else {
        info!("Starting service in non-Lambda environment");
        let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
        info!("listening on {}", config.bind_addr);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    info!("Service finished");
    Ok(())
}
