//! The input-name effect table.
//!
//! Every recognized shading input maps to exactly one deterministic effect
//! on the material, for a literal and for a texture. This table is the
//! single source of truth for the mapping; the translator only walks
//! inputs and dispatches here.

use mtlx_document::value::Value;
use mtlx_material::material::{
    AlphaAntiAliasing, DepthDraw, StandardMaterial, TextureChannel, TextureSlot, Transparency,
};
use mtlx_material::texture::{Texture, TextureFormat};

/// The closed set of shading inputs the translator understands. Anything
/// else on the node is ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InputKey {
    BaseColor,
    Metallic,
    Roughness,
    Specular,
    Normal,
    Emissive,
    Occlusion,
    AlphaMode,
    AlphaCutoff,
}

impl InputKey {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "base_color" => InputKey::BaseColor,
            "metallic" => InputKey::Metallic,
            "roughness" => InputKey::Roughness,
            "specular" => InputKey::Specular,
            "normal" => InputKey::Normal,
            "emissive" => InputKey::Emissive,
            "occlusion" => InputKey::Occlusion,
            "alpha_mode" => InputKey::AlphaMode,
            "alpha_cutoff" => InputKey::AlphaCutoff,
            _ => return None,
        })
    }

    /// The texture slot this input feeds, for inputs that accept textures.
    pub fn slot(&self) -> Option<TextureSlot> {
        Some(match self {
            InputKey::BaseColor => TextureSlot::Albedo,
            InputKey::Metallic => TextureSlot::Metallic,
            InputKey::Roughness => TextureSlot::Roughness,
            InputKey::Normal => TextureSlot::Normal,
            InputKey::Emissive => TextureSlot::Emission,
            InputKey::Occlusion => TextureSlot::AmbientOcclusion,
            InputKey::Specular | InputKey::AlphaMode | InputKey::AlphaCutoff => return None,
        })
    }

    /// Applies a literal value. Matrix literals are not translated (there
    /// is no transform slot on the fixed-function material) and values of
    /// the wrong shape leave the material untouched, so a property is never
    /// partially applied.
    pub fn apply_literal(&self, material: &mut StandardMaterial, value: &Value) {
        if value.is_matrix() {
            return;
        }
        match self {
            InputKey::BaseColor => match value {
                Value::Color3(rgb) | Value::Vector3(rgb) => {
                    material.albedo.x = rgb[0];
                    material.albedo.y = rgb[1];
                    material.albedo.z = rgb[2];
                }
                Value::Color4(rgba) | Value::Vector4(rgba) => {
                    material.albedo.x = rgba[0];
                    material.albedo.y = rgba[1];
                    material.albedo.z = rgba[2];
                    material.albedo.w *= rgba[3];
                }
                _ => {}
            },
            InputKey::Metallic => {
                if let Some(v) = value.as_f32() {
                    material.metallic = v;
                }
            }
            InputKey::Roughness => {
                if let Some(v) = value.as_f32() {
                    material.roughness = v;
                }
            }
            InputKey::Specular => {
                if let Some(v) = value.as_f32() {
                    material.specular = v;
                }
            }
            // A literal normal carries no useful direction for a
            // fixed-function material; only the feature flag is raised.
            InputKey::Normal => material.normal_mapping = true,
            // Occlusion only means something as a baked texture.
            InputKey::Occlusion => {}
            InputKey::Emissive => {
                material.emission_enabled = true;
                match value {
                    Value::Color3(rgb) | Value::Vector3(rgb) => {
                        material.emission.x = rgb[0];
                        material.emission.y = rgb[1];
                        material.emission.z = rgb[2];
                    }
                    Value::Color4(rgba) | Value::Vector4(rgba) => {
                        material.emission.x = rgba[0];
                        material.emission.y = rgba[1];
                        material.emission.z = rgba[2];
                    }
                    _ => {}
                }
            }
            InputKey::AlphaMode => {
                if value.is_truthy() {
                    material.transparency = Transparency::Alpha;
                    material.alpha_antialiasing = AlphaAntiAliasing::AlphaToCoverageAndToOne;
                    material.depth_draw = DepthDraw::Always;
                }
            }
            InputKey::AlphaCutoff => {
                if let Some(v) = value.as_f32() {
                    material.transparency = Transparency::AlphaScissor;
                    material.depth_draw = DepthDraw::Always;
                    material.alpha_scissor_threshold = v;
                }
            }
        }
    }

    /// Applies a baked texture, with the per-slot side effects the baked
    /// channel-packing convention requires.
    pub fn apply_texture(&self, material: &mut StandardMaterial, mut texture: Texture) {
        let Some(slot) = self.slot() else {
            return;
        };
        match self {
            InputKey::BaseColor => {
                material.albedo_srgb_forced = true;
                texture.format = TextureFormat::Rgba8Srgb;
            }
            InputKey::Metallic => {
                // A metallic texture means the metallic range is
                // texture-driven; a still-default scalar would zero it out.
                if material.metallic == 0.0 {
                    material.metallic = 1.0;
                }
                material.metallic_channel = TextureChannel::Blue;
            }
            InputKey::Roughness => material.roughness_channel = TextureChannel::Green,
            InputKey::Normal => material.normal_mapping = true,
            InputKey::Emissive => material.emission_enabled = true,
            InputKey::Occlusion => material.ao_channel = TextureChannel::Red,
            _ => {}
        }
        material.set_texture(slot, texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    fn tex() -> Texture {
        Texture {
            width: 4,
            height: 4,
            format: TextureFormat::Rgba8Unorm,
            mip_count: 1,
            data: vec![0; 64],
        }
    }

    #[test]
    fn base_color_literal_preserves_alpha() {
        let mut mat = StandardMaterial::default();
        InputKey::BaseColor.apply_literal(&mut mat, &Value::Color3([0.2, 0.3, 0.4]));
        assert_eq!(mat.albedo, Vec4::new(0.2, 0.3, 0.4, 1.0));

        InputKey::BaseColor.apply_literal(&mut mat, &Value::Color4([0.2, 0.3, 0.4, 0.5]));
        assert_eq!(mat.albedo.w, 0.5);
    }

    #[test]
    fn base_color_texture_forces_srgb() {
        let mut mat = StandardMaterial::default();
        InputKey::BaseColor.apply_texture(&mut mat, tex());
        assert!(mat.albedo_srgb_forced);
        assert_eq!(
            mat.texture(TextureSlot::Albedo).unwrap().format,
            TextureFormat::Rgba8Srgb
        );
    }

    #[test]
    fn metallic_texture_raises_default_scalar() {
        let mut mat = StandardMaterial::default();
        InputKey::Metallic.apply_texture(&mut mat, tex());
        assert_eq!(mat.metallic, 1.0);
        assert_eq!(mat.metallic_channel, TextureChannel::Blue);
    }

    #[test]
    fn metallic_texture_keeps_explicit_scalar() {
        let mut mat = StandardMaterial::default();
        InputKey::Metallic.apply_literal(&mut mat, &Value::Float(0.25));
        InputKey::Metallic.apply_texture(&mut mat, tex());
        assert_eq!(mat.metallic, 0.25);
    }

    #[test]
    fn packed_channel_side_effects() {
        let mut mat = StandardMaterial::default();
        InputKey::Roughness.apply_texture(&mut mat, tex());
        InputKey::Occlusion.apply_texture(&mut mat, tex());
        assert_eq!(mat.roughness_channel, TextureChannel::Green);
        assert_eq!(mat.ao_channel, TextureChannel::Red);
    }

    #[test]
    fn alpha_mode_is_only_applied_when_truthy() {
        let mut mat = StandardMaterial::default();
        InputKey::AlphaMode.apply_literal(&mut mat, &Value::Bool(false));
        assert_eq!(mat.transparency, Transparency::Opaque);

        InputKey::AlphaMode.apply_literal(&mut mat, &Value::Int(1));
        assert_eq!(mat.transparency, Transparency::Alpha);
        assert_eq!(
            mat.alpha_antialiasing,
            AlphaAntiAliasing::AlphaToCoverageAndToOne
        );
        assert_eq!(mat.depth_draw, DepthDraw::Always);
    }

    #[test]
    fn alpha_cutoff_never_applies_partially() {
        let mut mat = StandardMaterial::default();
        // Wrong value shape: nothing changes, not even the transparency.
        InputKey::AlphaCutoff.apply_literal(&mut mat, &Value::Color3([0.5, 0.5, 0.5]));
        assert_eq!(mat.transparency, Transparency::Opaque);
        assert_eq!(mat.alpha_scissor_threshold, 0.5);

        InputKey::AlphaCutoff.apply_literal(&mut mat, &Value::Float(0.25));
        assert_eq!(mat.transparency, Transparency::AlphaScissor);
        assert_eq!(mat.depth_draw, DepthDraw::Always);
        assert_eq!(mat.alpha_scissor_threshold, 0.25);
    }

    #[test]
    fn emissive_literal_enables_and_sets_color() {
        let mut mat = StandardMaterial::default();
        InputKey::Emissive.apply_literal(&mut mat, &Value::Color3([1.0, 0.5, 0.0]));
        assert!(mat.emission_enabled);
        assert_eq!(mat.emission, Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn matrices_are_a_silent_gap() {
        let mut mat = StandardMaterial::default();
        InputKey::Roughness.apply_literal(&mut mat, &Value::Matrix33([0.0; 9]));
        assert_eq!(mat.roughness, 1.0);
    }

    #[test]
    fn unrecognized_names_do_not_map() {
        assert!(InputKey::from_name("subsurface").is_none());
        assert!(InputKey::from_name("sheen_color").is_none());
    }
}
