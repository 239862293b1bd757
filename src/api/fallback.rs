use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::utils::html::HTML_CONTENT_TYPE;

pub const NOT_FOUND_PAGE: &str = "404.html";

const DEFAULT_NOT_FOUND_BODY: &str = "<h1>404 Not Found</h1>";

/// Unmatched routes get `public/404.html` when it exists.
pub async fn not_found(config: web::Data<AppConfig>) -> HttpResponse {
    let page = config.public_dir.join(NOT_FOUND_PAGE);

    let body = match tokio::fs::read_to_string(&page).await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("No custom 404 page at {}: {}", page.display(), e);
            DEFAULT_NOT_FOUND_BODY.to_string()
        }
    };

    HttpResponse::NotFound().content_type(HTML_CONTENT_TYPE).body(body)
}
