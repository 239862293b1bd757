use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::services::upload_service;
use crate::utils::html;

/// Shape of the multipart body, for the API docs only
#[derive(serde::Deserialize, utoipa::ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[serde(rename = "fileTest")]
    #[schema(value_type = String, format = Binary)]
    file_test: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/process/upload",
    tag = "Upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Upload summary or failure page", body = String, content_type = "text/html")
    )
)]
pub async fn upload(config: web::Data<AppConfig>, mut payload: Multipart) -> HttpResponse {
    log::info!("Called /process/upload");

    let dir = config.upload_dir();

    match upload_service::receive_upload(&mut payload, &dir, config.upload_max_bytes).await {
        Ok(file) => {
            log::info!(
                "Current file info: {}, {}, {}, {}",
                file.original_name,
                file.stored_name,
                file.mime_type,
                file.size
            );

            html::page(format!(
                "<h3>Success to File Uploaded</h3><hr/>\
                 <p>Original FileName : {} -> Stored FileName : {}</p>\
                 <p>MIME TYPE : {}</p>\
                 <p>File Size : {}</p>",
                html::escape(&file.original_name),
                html::escape(&file.stored_name),
                html::escape(&file.mime_type),
                file.size
            ))
        }
        Err(e) => {
            log::warn!("❌ Upload failed: {}", e);
            html::page("<h3>Fail to File Upload</h3>")
        }
    }
}
