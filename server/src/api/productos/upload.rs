//! Product image upload
//!
//! Accepts PNG, JPEG and WebP; everything is re-encoded to JPEG before
//! it lands in the uploads directory.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use shared::models::Producto;
use shared::{AppError, AppResult, ErrorCode};

const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for product photos
const JPEG_QUALITY: u8 = 85;

fn compress_to_jpeg(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::with_message(ErrorCode::ImageInvalid, format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }
    Ok(buffer)
}

fn validate_upload(data: &[u8], ext: &str, max_bytes: usize) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ImageInvalid,
            "Empty file provided",
        ));
    }
    if data.len() > max_bytes {
        return Err(AppError::new(ErrorCode::ImageTooLarge)
            .with_detail("max_bytes", max_bytes)
            .with_detail("actual_bytes", data.len()));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::ImageInvalid,
            format!(
                "Unsupported format '{}'. Supported: {}",
                ext_lower,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }
    Ok(())
}

/// POST /api/productos/{id}/imagen
pub async fn upload_imagen(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<Producto>> {
    super::handler::owned_producto(&state, &user, &id).await?;

    let images_dir = state.config.uploads_dir().join("images");
    fs::create_dir_all(&images_dir)
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {e}")))?;

    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ImageInvalid,
                format!("Invalid file extension for: {filename}"),
            )
        })?;

    validate_upload(&data, &ext, state.config.max_upload_bytes)?;
    let compressed = compress_to_jpeg(&data)?;

    let new_filename = format!("{}.jpg", Uuid::new_v4());
    let file_path = images_dir.join(&new_filename);
    fs::write(&file_path, &compressed)
        .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

    let url = format!("/uploads/images/{new_filename}");
    let producto = state.productos().set_imagen(&id, &url).await?;

    tracing::info!(
        producto = %id,
        original_name = %filename,
        size = compressed.len(),
        "Product image uploaded"
    );

    Ok(Json(producto))
}
