//! The `.mtlx` material asset and its loader.

use std::sync::Arc;

use mtlx_log::{debug, info};
use mtlx_material::material::StandardMaterial;
use mtlx_translate::decoder::{FileImageDecoder, ImageDecoder};
use mtlx_translate::resolver::Resolver;
use mtlx_translate::translate::{RenderablePolicy, Translator};

use crate::asset::{Asset, AssetName, AssetNameBuf};
use crate::import_cache::ImportCache;
use crate::loader::{AssetLoadError, AssetLoader};
use crate::manager::{Assets, CacheMode};

pub struct MaterialAsset {
    pub material: StandardMaterial,
    pub source: AssetNameBuf,
}

impl Asset for MaterialAsset {
    const EXTENSION: &'static str = "mtlx";
    const RESOURCE_TYPE: &'static str = "StandardMaterial";

    type Loader = MtlxLoader;
}

/// Imports a source document into a [`StandardMaterial`], going through the
/// on-disk import cache: a source already imported is decoded straight from
/// its cache entry unless the caller asks for a fresh import, otherwise it
/// is resolved, translated and cached.
pub struct MtlxLoader {
    resolver: Resolver,
    policy: RenderablePolicy,
    decoder: Option<Arc<dyn ImageDecoder>>,
}

impl MtlxLoader {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            policy: RenderablePolicy::default(),
            decoder: None,
        }
    }

    pub fn with_policy(mut self, policy: RenderablePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the filesystem-backed image decoder.
    pub fn with_decoder(mut self, decoder: Arc<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }
}

impl AssetLoader for MtlxLoader {
    type Asset = MaterialAsset;

    fn load(
        &self,
        assets: &Assets,
        asset: &AssetName,
        cache: CacheMode,
    ) -> Result<MaterialAsset, AssetLoadError> {
        let project = assets.project();
        let entry = ImportCache::new(project, asset);

        if cache == CacheMode::Reuse {
            if let Some(material) = entry.read_material() {
                debug!("reusing import cache entry for `{asset}`");
                return Ok(MaterialAsset {
                    material,
                    source: asset.to_owned(),
                });
            }
        }

        info!("importing `{asset}`");
        entry.create_dir()?;

        let source = project.globalize(asset);
        let baked = self.resolver.resolve(&source, &entry.baked_document_path())?;

        let decoder = self
            .decoder
            .clone()
            .unwrap_or_else(|| Arc::new(FileImageDecoder::new(project.clone())));
        let material = Translator::new(project.clone(), decoder)
            .with_policy(self.policy)
            .translate(&baked)?;

        entry.write_material(asset, MaterialAsset::RESOURCE_TYPE, &material)?;

        Ok(MaterialAsset {
            material,
            source: asset.to_owned(),
        })
    }
}
