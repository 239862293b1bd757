pub mod auth;
pub mod fallback;
pub mod health;
pub mod hls;
pub mod swagger;
pub mod upload;

use actix_web::web;

/// Application routes shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/process")
                .route("/login", web::post().to(auth::login))
                .route("/addUser", web::post().to(auth::add_user))
                .route("/upload", web::post().to(upload::upload)),
        )
        .route("/hls_sample/{id}", web::get().to(hls::hls_sample));
}
