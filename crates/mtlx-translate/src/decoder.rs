//! The image decoding seam between the translator and the host's image
//! loader.

use camino::{Utf8Path, Utf8PathBuf};
use image::GenericImageView;
use thiserror::Error;

use mtlx_document::paths::ProjectPaths;
use mtlx_material::texture::{Texture, TextureFormat};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image `{0}` not found")]
    NotFound(Utf8PathBuf),
    #[error("failed to decode image `{path}`: {source}")]
    Decode {
        path: Utf8PathBuf,
        source: image::ImageError,
    },
}

/// Decodes a project-relative image path into an RGBA8 texture with a full
/// mip chain.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Utf8Path) -> Result<Texture, DecodeError>;
}

/// Production decoder backed by the `image` crate. Paths are globalized
/// through the project before hitting the filesystem.
pub struct FileImageDecoder {
    project: ProjectPaths,
}

impl FileImageDecoder {
    pub fn new(project: ProjectPaths) -> Self {
        Self { project }
    }
}

impl ImageDecoder for FileImageDecoder {
    fn decode(&self, path: &Utf8Path) -> Result<Texture, DecodeError> {
        let absolute = self.project.globalize(path);
        if !absolute.exists() {
            return Err(DecodeError::NotFound(path.to_owned()));
        }
        let image = image::open(absolute.as_std_path()).map_err(|source| DecodeError::Decode {
            path: path.to_owned(),
            source,
        })?;
        Ok(decode_with_mips(&image))
    }
}

/// Builds the mip chain for a decoded image, largest level first.
pub fn decode_with_mips(image: &image::DynamicImage) -> Texture {
    let (width, height) = image.dimensions();
    let mip_count = mip_count(width, height);

    let mut data = Vec::new();
    for mip in 0..mip_count {
        let w = (width >> mip).max(1);
        let h = (height >> mip).max(1);
        if mip == 0 {
            data.extend_from_slice(image.to_rgba8().as_raw());
        } else {
            // resize_exact: the packed layout promises exactly
            // (width >> mip, height >> mip) per level, so the filter must
            // not preserve aspect ratio.
            let downsampled = image.resize_exact(w, h, image::imageops::FilterType::Lanczos3);
            data.extend_from_slice(downsampled.to_rgba8().as_raw());
        }
    }

    Texture {
        width,
        height,
        format: TextureFormat::Rgba8Unorm,
        mip_count,
        data,
    }
}

/// Helper to determine how many mips a texture needs.
#[inline]
fn mip_count(width: u32, height: u32) -> u32 {
    width.max(height).ilog2() + 1
}
