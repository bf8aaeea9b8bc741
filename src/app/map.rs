use std::path::Path;

use eframe::egui;
use thiserror::Error;

pub(super) const MAP_FILE_EXTENSIONS: &[&str] = &["gif", "jpg", "jpeg", "png"];

#[derive(Debug, Error)]
pub(super) enum MapError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

pub(super) fn decode_map(path: &Path) -> Result<egui::ColorImage, MapError> {
    let bytes = std::fs::read(path).map_err(|source| MapError::Read {
        path: path.display().to_string(),
        source,
    })?;
    decode_bytes(&bytes).map_err(|source| MapError::Decode {
        path: path.display().to_string(),
        source,
    })
}

fn decode_bytes(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
