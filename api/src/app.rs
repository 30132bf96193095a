use std::{error::Error, sync::Arc, time::Duration};

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
	Router,
};
use serde::Serialize;
use sqlx::Pool;
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use typed_builder::TypedBuilder;

use crate::{prelude::*, routes, service::token::TokenCodec};

/// The state of the application, cloned into every request. Everything in it
/// is either a handle to a shared resource or read only.
#[derive(Clone)]
pub struct AppState {
	/// The database connection pool.
	pub database: Pool<DatabaseType>,
	/// The configuration the application was started with.
	pub config: Arc<AppConfig>,
	/// Issues and verifies access tokens, keyed with the configured secret.
	pub tokens: Arc<TokenCodec>,
}

impl AppState {
	pub fn new(database: Pool<DatabaseType>, config: AppConfig) -> Self {
		let tokens = Arc::new(TokenCodec::from_config(&config));
		Self {
			database,
			config: Arc::new(config),
			tokens,
		}
	}
}

/// The successful response of an endpoint. Wrapped in the
/// `{"success": true, ...}` envelope when it is sent.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AppResponse<T>
where
	T: Serialize,
{
	#[builder(default = StatusCode::OK)]
	pub status_code: StatusCode,
	pub body: T,
}

impl<T> AppResponse<T>
where
	T: Serialize,
{
	/// Converts the response into a `Result` that can be returned from a
	/// handler.
	pub fn into_result(self) -> Result<Self, ErrorType> {
		Ok(self)
	}
}

impl<T> IntoResponse for AppResponse<T>
where
	T: Serialize,
{
	fn into_response(self) -> Response {
		(self.status_code, Json(ApiSuccessResponseBody::new(self.body))).into_response()
	}
}

/// The full router of the application, with every endpoint under `/api` and
/// the layers shared by all of them.
#[instrument(skip(state))]
pub fn setup_routes(state: &AppState) -> Router {
	Router::new()
		.nest("/api", routes::setup_routes(state))
		.layer(TimeoutLayer::new(Duration::from_secs(
			state.config.request_timeout_seconds,
		)))
		.layer(CorsLayer::permissive())
		.layer(TraceLayer::new_for_http())
		.with_state(state.clone())
}

/// Binds to the configured address and serves the application until a
/// shutdown signal arrives.
#[instrument(skip(state))]
pub async fn start_server(state: AppState) -> Result<(), Box<dyn Error>> {
	let bind_addr = state.config.bind_addr;
	let router = setup_routes(&state);

	let listener = TcpListener::bind(bind_addr).await?;
	info!("Listening for connections on {bind_addr}");

	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	info!("Server stopped");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(error) = signal::ctrl_c().await {
		error!("Unable to listen for the shutdown signal: {error}");
		std::future::pending::<()>().await;
	}
	info!("Shutdown signal received");
}
