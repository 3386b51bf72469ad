pub mod health;
pub mod history;
pub mod search;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::config)
            .configure(search::config)
            .configure(history::config)
    );
}
