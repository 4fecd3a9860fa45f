use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use ambassador_engine::{events::EventProducers, OrderFlowApi, RankingsApi, SqliteDatabase};
use futures::future::join_all;
use log::*;
use stripe_tools::StripeApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{settlement::create_settlement_event_handlers, stripe::StripeCheckout},
    routes::{health, ConfirmOrderRoute, CreateOrderRoute, OrdersRoute, RankingsRoute},
};

/// How long to wait for in-flight settlement jobs after the HTTP server has stopped.
const SETTLEMENT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_db_connections).await?;
    if config.run_migrations {
        db.run_migrations().await?;
    }
    let stripe = StripeApi::new(config.stripe.clone()).map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
    let gateway = StripeCheckout::new(stripe);
    let handlers = create_settlement_event_handlers(&config, db.clone());
    let producers = handlers.producers();
    let settlement_tasks = handlers.start_handlers();
    let srv = create_server_instance(config, db, gateway, producers)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    info!("📬️ Server has stopped. Waiting for outstanding settlement jobs to finish");
    if tokio::time::timeout(SETTLEMENT_DRAIN_TIMEOUT, join_all(settlement_tasks)).await.is_err() {
        warn!("📬️ Settlement jobs did not finish within {SETTLEMENT_DRAIN_TIMEOUT:?}. Some notifications may be lost.");
    }
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: StripeCheckout,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let split = config.revenue_split;
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), gateway.clone(), producers.clone()).with_revenue_split(split);
        let rankings_api = RankingsApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("amb::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(rankings_api))
            .service(health)
            .service(
                web::scope("/api")
                    .service(OrdersRoute::<SqliteDatabase, StripeCheckout>::new())
                    .service(CreateOrderRoute::<SqliteDatabase, StripeCheckout>::new())
                    .service(ConfirmOrderRoute::<SqliteDatabase, StripeCheckout>::new())
                    .service(RankingsRoute::<SqliteDatabase>::new()),
            )
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
