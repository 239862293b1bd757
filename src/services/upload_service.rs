use std::fmt::Display;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::web::Bytes;
use futures::{Stream, TryStreamExt};
use tokio::io::AsyncWriteExt;

use crate::{models::UploadedFile, utils::AppError};

/// Multipart field that carries the upload
pub const UPLOAD_FIELD: &str = "fileTest";
pub const MAX_FILES: usize = 1;
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const FALLBACK_NAME: &str = "upload";

/// Final path component of a client-supplied name. Directory parts are
/// dropped so the file always lands inside the upload directory.
pub fn sanitize_file_name(original: &str) -> &str {
    match original.rsplit(&['/', '\\'][..]).next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => FALLBACK_NAME,
    }
}

/// `<original name><unix millis>`
pub fn stored_file_name(original: &str, timestamp_ms: i64) -> String {
    format!("{}{}", sanitize_file_name(original), timestamp_ms)
}

/// Writes `stream` into `dir`, failing (and removing the partial file) once
/// more than `limit` bytes arrive.
pub async fn store_stream<S, E>(
    dir: &Path,
    original_name: &str,
    mime_type: String,
    stream: S,
    limit: u64,
) -> Result<UploadedFile, AppError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    tokio::fs::create_dir_all(dir).await?;

    let stored_name = stored_file_name(original_name, chrono::Utc::now().timestamp_millis());
    let size = write_new_file(&dir.join(&stored_name), original_name, stream, limit).await?;

    Ok(UploadedFile {
        original_name: original_name.to_string(),
        stored_name,
        mime_type,
        size,
    })
}

/// Never opens an existing file: a name clash fails this upload and leaves
/// the other file alone.
async fn write_new_file<S, E>(
    path: &Path,
    original_name: &str,
    mut stream: S,
    limit: u64,
) -> Result<u64, AppError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| AppError::UploadError(format!("cannot create {}: {}", path.display(), e)))?;

    let mut size: u64 = 0;
    let result: Result<(), AppError> = async {
        while let Some(chunk) = stream
            .try_next()
            .await
            .map_err(|e| AppError::UploadError(e.to_string()))?
        {
            size += chunk.len() as u64;
            if size > limit {
                return Err(AppError::UploadError(format!(
                    "file '{}' exceeds the {} byte limit",
                    original_name, limit
                )));
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        Ok(())
    }
    .await;

    if let Err(e) = result {
        drop(file);
        if let Err(rm) = tokio::fs::remove_file(path).await {
            log::warn!("Failed to remove partial upload {}: {}", path.display(), rm);
        }
        return Err(e);
    }

    Ok(size)
}

/// Pulls the single `fileTest` file out of a multipart body. Text fields are
/// skipped; any extra file fails the whole upload and removes what was stored.
pub async fn receive_upload(
    payload: &mut Multipart,
    dir: &Path,
    limit: u64,
) -> Result<UploadedFile, AppError> {
    let mut uploaded = None;

    match collect_files(payload, dir, limit, &mut uploaded).await {
        Ok(()) => uploaded.ok_or_else(|| {
            AppError::InvalidRequest(format!("no file in field '{}'", UPLOAD_FIELD))
        }),
        Err(e) => {
            if let Some(file) = uploaded {
                discard(dir, &file).await;
            }
            Err(e)
        }
    }
}

async fn collect_files(
    payload: &mut Multipart,
    dir: &Path,
    limit: u64,
    uploaded: &mut Option<UploadedFile>,
) -> Result<(), AppError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::UploadError(e.to_string()))?
    {
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_string),
                cd.get_filename().map(str::to_string),
            ),
            None => (None, None),
        };

        let Some(filename) = filename else {
            // plain form value
            while field
                .try_next()
                .await
                .map_err(|e| AppError::UploadError(e.to_string()))?
                .is_some()
            {}
            continue;
        };

        if name.as_deref() != Some(UPLOAD_FIELD) {
            return Err(AppError::InvalidRequest(format!(
                "unexpected file field '{}'",
                name.unwrap_or_default()
            )));
        }

        if uploaded.is_some() {
            return Err(AppError::InvalidRequest(format!(
                "more than {} file(s) in field '{}'",
                MAX_FILES, UPLOAD_FIELD
            )));
        }

        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        *uploaded = Some(store_stream(dir, &filename, mime_type, &mut field, limit).await?);
    }

    Ok(())
}

async fn discard(dir: &Path, file: &UploadedFile) {
    let path = dir.join(&file.stored_name);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => log::info!("Removed rejected upload {}", path.display()),
        Err(e) => log::warn!("Failed to remove rejected upload {}: {}", path.display(), e),
    }
}
