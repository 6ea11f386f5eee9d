use actix_web::web;

pub mod games;
pub mod health;
pub mod ws;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(games::configure_routes)
        .configure(ws::configure_routes);
}
