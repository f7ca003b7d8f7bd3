use std::path::Path;

use egui::ColorImage;

use crate::error::{CommandResult, EditorError};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Decoded contents of a dropped image file.
#[derive(Debug)]
pub struct DroppedImage {
    pub name: String,
    pub pixels: ColorImage,
}

/// Collects files dropped onto the window and decodes the images among them.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up files dropped during this frame.
    /// Returns true if there is anything to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files.extend(i.raw.dropped_files.iter().cloned());
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decodes every pending image file. Files that are not images or fail to
    /// decode are logged and skipped.
    pub fn process_dropped_files(&mut self) -> Vec<DroppedImage> {
        let mut images = Vec::new();
        for file in self.dropped_files.drain(..) {
            let name = display_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {}", name);
                continue;
            }
            match read_image_file(&file).and_then(|bytes| decode_image(&bytes)) {
                Ok(pixels) => {
                    log::info!("Loaded dropped image {}", name);
                    images.push(DroppedImage { name, pixels });
                }
                Err(err) => log::error!("{}: {}", name, err),
            }
        }
        images
    }
}

/// Decodes image file contents into straight RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> CommandResult<ColorImage> {
    let image =
        image::load_from_memory(bytes).map_err(|err| EditorError::ImageDecode(err.to_string()))?;
    log::debug!("Decoded image: {}x{}", image.width(), image.height());
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        has_image_extension(path)
    } else {
        has_image_extension(Path::new(&file.name))
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn read_image_file(file: &egui::DroppedFile) -> CommandResult<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }

    // Only native builds can read from the filesystem
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            return std::fs::read(path)
                .map_err(|err| EditorError::ImageDecode(format!("{}: {}", path.display(), err)));
        }
    }

    Err(EditorError::ImageDecode("dropped file has no accessible data".to_owned()))
}
