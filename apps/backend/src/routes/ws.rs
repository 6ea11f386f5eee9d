//! Websocket upgrade route. Grounded on the teacher's `ws::session::upgrade`
//! handler wiring, minus the `CurrentUser` extractor it gates on — there is
//! no identity to establish before upgrading (§ Non-goals: no auth).

use actix_web::web;

use crate::ws::session::upgrade;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").route(web::get().to(upgrade)));
}
