//! Image Upload Handler
//!
//! Accepts product/banner images from the back office. Every upload is
//! decoded, re-encoded as JPEG and stored under its content hash, so the
//! same picture uploaded twice lands on the same file.

use std::io::Cursor;
use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported input formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for catalog images
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

/// POST /api/admin/upload — multipart with a single `file` field
pub async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut payload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let data = field.bytes().await?.to_vec();
        payload = Some((original_name, data));
        break;
    }

    let Some((original_name, data)) = payload else {
        return Err(AppError::validation("Missing 'file' field"));
    };

    validate_image(&data, &original_name)?;

    let jpeg = reencode_jpeg(data)?;

    // Content-addressed filename: same bytes, same file
    let mut hasher = Sha256::new();
    hasher.update(&jpeg);
    let hash = hex::encode(hasher.finalize());
    let filename = format!("{}.jpg", &hash[..16]);

    let uploads_dir = state.config.uploads_dir();
    let target = uploads_dir.join(&filename);
    if !target.exists() {
        tokio::fs::create_dir_all(&uploads_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {e}")))?;
        tokio::fs::write(&target, &jpeg)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store upload: {e}")))?;
        tracing::info!(filename = %filename, size = jpeg.len(), "Image stored");
    }

    Ok(Json(UploadResponse {
        url: format!("/uploads/{filename}"),
        size: jpeg.len(),
        filename,
        original_name,
    }))
}

fn validate_image(data: &[u8], original_name: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported format '{ext}'. Allowed: {}",
            SUPPORTED_FORMATS.join(", ")
        )));
    }
    Ok(())
}

/// Decode whatever came in and re-encode as JPEG
fn reencode_jpeg(data: Vec<u8>) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(&data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_and_unknown_formats_rejected() {
        let too_big = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(validate_image(&too_big, "big.png").is_err());
        assert!(validate_image(&[1, 2, 3], "notes.txt").is_err());
        assert!(validate_image(&[], "empty.png").is_err());
        assert!(validate_image(&[1, 2, 3], "flower.webp").is_ok());
    }

    #[test]
    fn reencode_produces_jpeg() {
        // 2x2 white PNG made in-memory
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([255, 255, 255]));
        let mut png = Vec::new();
        img.write_to(
            &mut Cursor::new(&mut png),
            image::ImageFormat::Png,
        )
        .unwrap();

        let jpeg = reencode_jpeg(png).unwrap();
        // JPEG SOI marker
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
