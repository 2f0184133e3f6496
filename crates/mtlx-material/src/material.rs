//! The fixed-function material surface the translator writes into.

use std::collections::BTreeMap;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::texture::Texture;

/// Texture slots of the fixed-function material.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureSlot {
    Albedo,
    Metallic,
    Roughness,
    Normal,
    Emission,
    AmbientOcclusion,
}

/// Which color channel of a packed texture a scalar map reads from.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum TextureChannel {
    #[default]
    Red,
    Green,
    Blue,
    Alpha,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum Transparency {
    #[default]
    Opaque,
    Alpha,
    AlphaScissor,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum AlphaAntiAliasing {
    #[default]
    Off,
    AlphaToCoverageAndToOne,
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum DepthDraw {
    #[default]
    OpaqueOnly,
    Always,
}

/// A fixed-function PBR material: texture slots plus scalar/color
/// properties and the feature flags the translator can raise. Created
/// empty (at host defaults), mutated field by field during translation,
/// then handed to the caller.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StandardMaterial {
    pub albedo: Vec4,
    pub metallic: f32,
    pub roughness: f32,
    pub specular: f32,
    pub emission: Vec3,

    pub albedo_srgb_forced: bool,
    pub normal_mapping: bool,
    pub emission_enabled: bool,

    pub metallic_channel: TextureChannel,
    pub roughness_channel: TextureChannel,
    pub ao_channel: TextureChannel,

    pub transparency: Transparency,
    pub alpha_antialiasing: AlphaAntiAliasing,
    pub depth_draw: DepthDraw,
    pub alpha_scissor_threshold: f32,

    textures: BTreeMap<TextureSlot, Texture>,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            albedo: Vec4::ONE,
            metallic: 0.0,
            roughness: 1.0,
            specular: 0.5,
            emission: Vec3::ZERO,
            albedo_srgb_forced: false,
            normal_mapping: false,
            emission_enabled: false,
            metallic_channel: TextureChannel::default(),
            roughness_channel: TextureChannel::default(),
            ao_channel: TextureChannel::default(),
            transparency: Transparency::default(),
            alpha_antialiasing: AlphaAntiAliasing::default(),
            depth_draw: DepthDraw::default(),
            alpha_scissor_threshold: 0.5,
            textures: BTreeMap::new(),
        }
    }
}

impl StandardMaterial {
    pub fn set_texture(&mut self, slot: TextureSlot, texture: Texture) {
        self.textures.insert(slot, texture);
    }

    pub fn texture(&self, slot: TextureSlot) -> Option<&Texture> {
        self.textures.get(&slot)
    }

    pub fn has_texture(&self, slot: TextureSlot) -> bool {
        self.textures.contains_key(&slot)
    }

    pub fn textures(&self) -> impl Iterator<Item = (TextureSlot, &Texture)> {
        self.textures.iter().map(|(slot, tex)| (*slot, tex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureFormat;

    #[test]
    fn defaults_match_the_host_material() {
        let mat = StandardMaterial::default();
        assert_eq!(mat.albedo, Vec4::ONE);
        assert_eq!(mat.metallic, 0.0);
        assert_eq!(mat.roughness, 1.0);
        assert_eq!(mat.specular, 0.5);
        assert_eq!(mat.transparency, Transparency::Opaque);
        assert!(mat.textures().next().is_none());
    }

    #[test]
    fn texture_slots_store_and_report() {
        let mut mat = StandardMaterial::default();
        mat.set_texture(
            TextureSlot::Albedo,
            Texture {
                width: 1,
                height: 1,
                format: TextureFormat::Rgba8Srgb,
                mip_count: 1,
                data: vec![255; 4],
            },
        );
        assert!(mat.has_texture(TextureSlot::Albedo));
        assert!(!mat.has_texture(TextureSlot::Normal));
    }
}
