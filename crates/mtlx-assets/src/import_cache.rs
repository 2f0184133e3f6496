//! The on-disk import cache.
//!
//! Every imported source file gets a directory under `.imported/` in the
//! project root, keyed by a hash of its project-relative path. The
//! directory holds the baked document, the encoded material and a
//! plain-text metadata file describing the import.

use std::hash::{Hash, Hasher};

use camino::{Utf8Path, Utf8PathBuf};
use mtlx_document::paths::ProjectPaths;
use mtlx_log::warn;
use mtlx_material::material::StandardMaterial;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset::{AssetName, AssetNameBuf};

pub const IMPORT_DIR: &str = ".imported";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("i/o error on `{path}`: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode imported material: {0}")]
    Encode(#[from] bincode::Error),
    #[error("failed to encode import metadata: {0}")]
    Metadata(#[from] ron::Error),
}

/// Sidecar metadata written next to every imported material.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportMetadata {
    pub source: AssetNameBuf,
    pub hash: String,
    pub resource_type: String,
    pub extension: String,
}

/// Paths of one source file's import artifacts.
#[derive(Debug, Clone)]
pub struct ImportCache {
    dir: Utf8PathBuf,
    stem: String,
    hash: u64,
}

impl ImportCache {
    pub fn new(project: &ProjectPaths, source: &AssetName) -> Self {
        let mut hasher = FxHasher::default();
        source.as_str().hash(&mut hasher);
        let hash = hasher.finish();

        let stem = source.file_stem().unwrap_or("asset").to_owned();
        let dir = project
            .root()
            .join(IMPORT_DIR)
            .join(format!("{stem}-{hash:016x}"));

        Self { dir, stem, hash }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Where the baker writes the flattened document.
    pub fn baked_document_path(&self) -> Utf8PathBuf {
        self.dir.join(format!("{}-{:016x}.mtlx", self.stem, self.hash))
    }

    pub fn material_path(&self) -> Utf8PathBuf {
        self.dir.join("material.res")
    }

    pub fn metadata_path(&self) -> Utf8PathBuf {
        self.dir.join("material.import")
    }

    pub fn create_dir(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| CacheError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Reads a previously imported material. A corrupt cache entry is
    /// logged and treated as absent so the import reruns.
    pub fn read_material(&self) -> Option<StandardMaterial> {
        let path = self.material_path();
        let bytes = std::fs::read(&path).ok()?;
        match bincode::deserialize(&bytes) {
            Ok(material) => Some(material),
            Err(err) => {
                warn!("corrupt import cache entry `{path}`: {err}");
                None
            }
        }
    }

    pub fn write_material(
        &self,
        source: &AssetName,
        resource_type: &str,
        material: &StandardMaterial,
    ) -> Result<(), CacheError> {
        self.create_dir()?;

        let encoded = bincode::serialize(material)?;
        let path = self.material_path();
        std::fs::write(&path, encoded).map_err(|source| CacheError::Io { path, source })?;

        let metadata = ImportMetadata {
            source: source.to_owned(),
            hash: format!("{:016x}", self.hash),
            resource_type: resource_type.to_owned(),
            extension: source.extension().unwrap_or_default().to_owned(),
        };
        let text = ron::ser::to_string_pretty(&metadata, Default::default())?;
        let path = self.metadata_path();
        std::fs::write(&path, text).map_err(|source| CacheError::Io { path, source })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_directories_are_stable_per_source() {
        let project = ProjectPaths::new("/proj");
        let a = ImportCache::new(&project, AssetName::new("materials/wood.mtlx"));
        let b = ImportCache::new(&project, AssetName::new("materials/wood.mtlx"));
        let c = ImportCache::new(&project, AssetName::new("materials/steel.mtlx"));

        assert_eq!(a.dir(), b.dir());
        assert_ne!(a.dir(), c.dir());
        assert!(a.dir().as_str().starts_with("/proj/.imported/wood-"));
        assert_eq!(a.baked_document_path().extension(), Some("mtlx"));
    }
}
