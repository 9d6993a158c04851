use actix_web::web;

pub mod health;
pub mod sessions;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(web::scope("/api/sessions").configure(sessions::configure_routes));
}
