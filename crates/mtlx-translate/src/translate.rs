//! Translation of a baked document's renderable shading node into a
//! fixed-function material.

use std::sync::Arc;

use mtlx_document::element::{Document, Input, Node, NodeGraph};
use mtlx_document::paths::ProjectPaths;
use mtlx_document::value::Value;
use mtlx_log::{debug, warn};
use mtlx_material::material::StandardMaterial;
use thiserror::Error;

use crate::decoder::ImageDecoder;
use crate::effect::InputKey;

/// What to do when a baked document exposes more than one renderable
/// shading node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RenderablePolicy {
    /// Translate the first renderable in document order and log the rest.
    #[default]
    FirstMatch,
    /// Fail the whole translation.
    Strict,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("document contains nothing to translate")]
    NothingToTranslate,
    #[error("document contains {0} renderable shading nodes")]
    MultipleRenderables(usize),
}

/// Walks one renderable shading node and maps its recognized inputs onto a
/// [`StandardMaterial`]. Inputs are visited in document order; every
/// per-input failure skips only that input, so one broken texture
/// reference never discards the rest of the material.
pub struct Translator {
    policy: RenderablePolicy,
    project: ProjectPaths,
    decoder: Arc<dyn ImageDecoder>,
}

impl Translator {
    pub fn new(project: ProjectPaths, decoder: Arc<dyn ImageDecoder>) -> Self {
        Self {
            policy: RenderablePolicy::default(),
            project,
            decoder,
        }
    }

    pub fn with_policy(mut self, policy: RenderablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn translate(&self, doc: &Document) -> Result<StandardMaterial, TranslateError> {
        let shaders = mtlx_document::renderable::renderables(doc);
        let shader = match shaders.len() {
            0 => return Err(TranslateError::NothingToTranslate),
            1 => shaders[0],
            n => match self.policy {
                RenderablePolicy::Strict => return Err(TranslateError::MultipleRenderables(n)),
                RenderablePolicy::FirstMatch => {
                    warn!(
                        "document contains {n} renderable shading nodes, translating `{}`",
                        shaders[0].name
                    );
                    shaders[0]
                }
            },
        };

        let mut material = StandardMaterial::default();
        for input in &shader.inputs {
            let Some(key) = InputKey::from_name(&input.name) else {
                debug!("ignoring unrecognized input `{}`", input.name);
                continue;
            };

            if input.is_connection() {
                self.apply_connection(doc, key, input, &mut material);
            } else {
                self.apply_value(key, input, &mut material);
            }
        }

        Ok(material)
    }

    fn apply_value(&self, key: InputKey, input: &Input, material: &mut StandardMaterial) {
        let Some(raw) = &input.value else {
            debug!("input `{}` has neither value nor connection", input.name);
            return;
        };
        match Value::parse(&input.ty, raw) {
            Ok(value) => key.apply_literal(material, &value),
            Err(err) => debug!("skipping input `{}`: {err}", input.name),
        }
    }

    fn apply_connection(
        &self,
        doc: &Document,
        key: InputKey,
        input: &Input,
        material: &mut StandardMaterial,
    ) {
        let Some(path) = self.texture_path(doc, key, input) else {
            return;
        };
        match self.decoder.decode(&path) {
            Ok(texture) => key.apply_texture(material, texture),
            Err(err) => warn!("skipping input `{}`: {err}", input.name),
        }
    }

    /// Follows an input's graph/output reference to the image node that
    /// feeds it and extracts the project-relative file path.
    fn texture_path(
        &self,
        doc: &Document,
        key: InputKey,
        input: &Input,
    ) -> Option<camino::Utf8PathBuf> {
        let Some(graph_name) = &input.nodegraph else {
            warn!("input `{}` references an output without a graph", input.name);
            return None;
        };
        let Some(graph) = doc.nodegraph(graph_name) else {
            warn!(
                "input `{}` references missing node graph `{graph_name}`",
                input.name
            );
            return None;
        };
        // is_connection() guarantees the output name is present.
        let output_name = input.output.as_deref()?;
        let Some(output) = graph.output(output_name) else {
            warn!(
                "input `{}` references missing output `{graph_name}.{output_name}`",
                input.name
            );
            return None;
        };
        let Some(mut node) = graph.node(&output.nodename) else {
            warn!(
                "output `{graph_name}.{output_name}` references missing node `{}`",
                output.nodename
            );
            return None;
        };
        // Normal maps bake behind a `normalmap` wrapper node, so the image
        // node may sit one hop further upstream.
        if key == InputKey::Normal {
            if let Some(upstream) = upstream_node(graph, node) {
                node = upstream;
            }
        }
        let Some(filepath) = node.inputs.first().and_then(|i| i.value.as_deref()) else {
            warn!(
                "image node `{}` in graph `{graph_name}` carries no file path",
                node.name
            );
            return None;
        };
        Some(self.project.project_relative(filepath))
    }
}

fn upstream_node<'a>(graph: &'a NodeGraph, node: &Node) -> Option<&'a Node> {
    let name = node.inputs.first()?.nodename.as_deref()?;
    graph.node(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodeError;
    use camino::{Utf8Path, Utf8PathBuf};
    use glam::{Vec3, Vec4};
    use mtlx_document::read;
    use mtlx_material::material::{
        AlphaAntiAliasing, DepthDraw, TextureChannel, TextureSlot, Transparency,
    };
    use mtlx_material::texture::{Texture, TextureFormat};
    use rustc_hash::FxHashMap;

    struct StubDecoder {
        images: FxHashMap<Utf8PathBuf, Texture>,
    }

    impl StubDecoder {
        fn new(paths: &[&str]) -> Arc<Self> {
            let mut images = FxHashMap::default();
            for path in paths {
                images.insert(
                    Utf8PathBuf::from(*path),
                    Texture {
                        width: 2,
                        height: 2,
                        format: TextureFormat::Rgba8Unorm,
                        mip_count: 1,
                        data: vec![128; 16],
                    },
                );
            }
            Arc::new(Self { images })
        }
    }

    impl ImageDecoder for StubDecoder {
        fn decode(&self, path: &Utf8Path) -> Result<Texture, DecodeError> {
            self.images
                .get(path)
                .cloned()
                .ok_or_else(|| DecodeError::NotFound(path.to_owned()))
        }
    }

    fn translator(decoder: Arc<dyn ImageDecoder>) -> Translator {
        Translator::new(ProjectPaths::new("/proj"), decoder)
    }

    #[test]
    fn literal_scenario_maps_exactly() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="base_color" type="color3" value="0.2, 0.3, 0.4" />
                   <input name="metallic" type="float" value="0.0" />
                   <input name="roughness" type="float" value="0.5" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let mat = translator(StubDecoder::new(&[])).translate(&doc).unwrap();
        assert_eq!(mat.albedo, Vec4::new(0.2, 0.3, 0.4, 1.0));
        assert_eq!(mat.metallic, 0.0);
        assert_eq!(mat.roughness, 0.5);
        assert_eq!(mat.specular, 0.5);
        assert!(mat.textures().next().is_none());
    }

    #[test]
    fn texture_connections_resolve_through_the_graph() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <nodegraph name="baked">
                   <image name="albedo_img" type="color3">
                     <input name="file" type="filename" value="textures\albedo.png" />
                   </image>
                   <image name="mr_img" type="color3">
                     <input name="file" type="filename" value="textures/mr.png" />
                   </image>
                   <output name="albedo_out" type="color3" nodename="albedo_img" />
                   <output name="mr_out" type="color3" nodename="mr_img" />
                 </nodegraph>
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="base_color" type="color3" nodegraph="baked" output="albedo_out" />
                   <input name="metallic" type="float" nodegraph="baked" output="mr_out" />
                   <input name="roughness" type="float" nodegraph="baked" output="mr_out" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let decoder = StubDecoder::new(&["textures/albedo.png", "textures/mr.png"]);
        let mat = translator(decoder).translate(&doc).unwrap();

        assert!(mat.albedo_srgb_forced);
        assert_eq!(
            mat.texture(TextureSlot::Albedo).unwrap().format,
            TextureFormat::Rgba8Srgb
        );
        // Default scalar raised so the texture drives the range.
        assert_eq!(mat.metallic, 1.0);
        assert_eq!(mat.metallic_channel, TextureChannel::Blue);
        assert_eq!(mat.roughness_channel, TextureChannel::Green);
    }

    #[test]
    fn normal_connection_hops_past_the_wrapper_node() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <nodegraph name="baked">
                   <image name="normal_img" type="vector3">
                     <input name="file" type="filename" value="textures/normal.png" />
                   </image>
                   <normalmap name="normal_map" type="vector3">
                     <input name="in" type="vector3" nodename="normal_img" />
                   </normalmap>
                   <output name="normal_out" type="vector3" nodename="normal_map" />
                 </nodegraph>
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="normal" type="vector3" nodegraph="baked" output="normal_out" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let decoder = StubDecoder::new(&["textures/normal.png"]);
        let mat = translator(decoder).translate(&doc).unwrap();
        assert!(mat.normal_mapping);
        assert!(mat.has_texture(TextureSlot::Normal));
    }

    #[test]
    fn broken_reference_skips_only_that_input() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="normal" type="vector3" nodegraph="missing" output="out" />
                   <input name="roughness" type="float" value="0.25" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let mat = translator(StubDecoder::new(&[])).translate(&doc).unwrap();
        assert!(!mat.normal_mapping);
        assert_eq!(mat.roughness, 0.25);
    }

    #[test]
    fn missing_image_skips_only_that_input() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <nodegraph name="baked">
                   <image name="img" type="color3">
                     <input name="file" type="filename" value="textures/gone.png" />
                   </image>
                   <output name="out" type="color3" nodename="img" />
                 </nodegraph>
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="base_color" type="color3" nodegraph="baked" output="out" />
                   <input name="metallic" type="float" value="1.0" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let mat = translator(StubDecoder::new(&[])).translate(&doc).unwrap();
        assert!(!mat.has_texture(TextureSlot::Albedo));
        assert!(!mat.albedo_srgb_forced);
        assert_eq!(mat.metallic, 1.0);
    }

    #[test]
    fn alpha_properties_apply_in_document_order() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="alpha_mode" type="integer" value="1" />
                   <input name="alpha_cutoff" type="float" value="0.5" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let mat = translator(StubDecoder::new(&[])).translate(&doc).unwrap();
        // The later cutoff wins the transparency mode.
        assert_eq!(mat.transparency, Transparency::AlphaScissor);
        assert_eq!(mat.alpha_antialiasing, AlphaAntiAliasing::AlphaToCoverageAndToOne);
        assert_eq!(mat.depth_draw, DepthDraw::Always);
        assert_eq!(mat.alpha_scissor_threshold, 0.5);
    }

    #[test]
    fn shader_with_no_inputs_yields_defaults() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <standard_surface name="surface" type="surfaceshader" />
               </materialx>"#,
        )
        .unwrap();

        let mat = translator(StubDecoder::new(&[])).translate(&doc).unwrap();
        assert_eq!(mat, StandardMaterial::default());
    }

    #[test]
    fn empty_document_is_fatal() {
        let doc = read::from_str(r#"<materialx version="1.38" />"#).unwrap();
        assert!(matches!(
            translator(StubDecoder::new(&[])).translate(&doc),
            Err(TranslateError::NothingToTranslate)
        ));
    }

    #[test]
    fn multiple_renderables_follow_the_policy() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <standard_surface name="first" type="surfaceshader">
                   <input name="roughness" type="float" value="0.1" />
                 </standard_surface>
                 <standard_surface name="second" type="surfaceshader">
                   <input name="roughness" type="float" value="0.9" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let decoder = StubDecoder::new(&[]);
        let mat = translator(decoder.clone()).translate(&doc).unwrap();
        assert_eq!(mat.roughness, 0.1);

        let strict = translator(decoder).with_policy(RenderablePolicy::Strict);
        assert!(matches!(
            strict.translate(&doc),
            Err(TranslateError::MultipleRenderables(2))
        ));
    }

    #[test]
    fn emissive_literal_enables_emission() {
        let doc = read::from_str(
            r#"<materialx version="1.38">
                 <standard_surface name="surface" type="surfaceshader">
                   <input name="emissive" type="color3" value="2.0, 1.0, 0.5" />
                 </standard_surface>
               </materialx>"#,
        )
        .unwrap();

        let mat = translator(StubDecoder::new(&[])).translate(&doc).unwrap();
        assert!(mat.emission_enabled);
        assert_eq!(mat.emission, Vec3::new(2.0, 1.0, 0.5));
    }
}
