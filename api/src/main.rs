use std::error::Error;

use journal_api::{app, db, prelude::*, service, utils::config};
use tracing::{Dispatch, Level};
use tracing_subscriber::{
	filter::LevelFilter,
	fmt::{format::FmtSpan, Layer as FmtLayer},
	layer::SubscriberExt,
	prelude::*,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
	let config = config::parse_config()?;

	tracing::dispatcher::set_global_default(Dispatch::new(
		tracing_subscriber::registry().with(
			FmtLayer::new()
				.with_span_events(FmtSpan::NONE)
				.event_format(
					tracing_subscriber::fmt::format()
						.with_ansi(config.environment == RunningEnvironment::Development)
						.with_file(false)
						.compact(),
				)
				.with_filter(
					tracing_subscriber::filter::Targets::new()
						.with_target("journal_api", LevelFilter::TRACE)
						.with_target("models", LevelFilter::TRACE)
						.with_target("tower_http", LevelFilter::DEBUG),
				)
				.with_filter(LevelFilter::from_level(
					if config.environment == RunningEnvironment::Development {
						Level::TRACE
					} else {
						Level::DEBUG
					},
				)),
		),
	))?;
	info!(
		"Configuration read. Running environment set to {}",
		config.environment
	);

	let database = db::connect(&config.database).await?;
	debug!("Database connection pool established");

	db::initialize(&database).await?;
	debug!("Database initialized");

	let state = AppState::new(database, config);
	service::password::prepare_missing_account_hash();
	service::auth::bootstrap_editor(&state)
		.await
		.map_err(|error| format!("Unable to bootstrap the editor account: {error:?}"))?;

	app::start_server(state).await?;

	Ok(())
}
