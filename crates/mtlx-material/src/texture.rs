use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureFormat {
    Rgba8Unorm,
    Rgba8Srgb,
}

/// A decoded texture payload: RGBA8 mips appended back to back, largest
/// first. This is the form the import cache stores and the form the host
/// uploads.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub mip_count: u32,
    pub data: Vec<u8>,
}

impl Texture {
    /// Dimensions of a given mip level.
    #[inline]
    pub fn mip_dimensions(&self, mip: u32) -> (u32, u32) {
        ((self.width >> mip).max(1), (self.height >> mip).max(1))
    }
}
