#![deny(clippy::wildcard_imports)]

use actix_web::{web, App, HttpServer};
use backend::config::db::DbProfile;
use backend::infra::state::build_state;
use backend::middleware::cors_middleware;
use backend::middleware::{RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan};
use backend::routes;
use migration::{migrate, MigrationCommand};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    backend::logging::init_tracing();

    println!("starting bigtwo backend on http://127.0.0.1:3001");

    let app_state = build_state().with_db(DbProfile::Prod).build().await.expect("failed to build application state");

    migrate(&app_state.db, MigrationCommand::Up).await.expect("failed to run migrations");

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityHeaders)
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .wrap(TraceSpan)
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure)
    })
    .bind(("127.0.0.1", 3001))?
    .run()
    .await
}
