use std::path::Path;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::utils::html;

/// Extension of `id` including the leading dot, or "" when there is none.
fn extension_of(id: &str) -> String {
    Path::new(id)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

// Placeholder until HLS playlists are served; the response ignores `id`.
#[utoipa::path(
    get,
    path = "/hls_sample/{id}",
    tag = "Media",
    params(("id" = String, Path, description = "Requested HLS resource")),
    responses(
        (status = 200, description = "Static placeholder page", body = String, content_type = "text/html")
    )
)]
pub async fn hls_sample(req: HttpRequest, id: web::Path<String>) -> HttpResponse {
    log::info!("Called hls sample");
    log::info!("Path name: {}", req.path());
    log::info!("Requested id: {}, type: {}", id, extension_of(&id));

    html::page("<h3>Success to File Uploaded</h3>")
}
