use camino::Utf8PathBuf;
use thiserror::Error;

use mtlx_translate::resolver::ResolveError;
use mtlx_translate::translate::TranslateError;

use crate::asset::{Asset, AssetName};
use crate::import_cache::CacheError;
use crate::manager::{Assets, CacheMode};

#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("no loader registered for `{0}`")]
    NoLoader(String),
    #[error("i/o error on `{path}`: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Implemented by types that load a particular asset.
pub trait AssetLoader: Send + Sync {
    /// The asset that this loader loads.
    type Asset: Asset;

    /// Loads the asset. `CacheMode::Ignore` means the caller wants a fresh
    /// import; loaders with an on-disk cache must bypass it and re-import.
    fn load(
        &self,
        assets: &Assets,
        asset: &AssetName,
        cache: CacheMode,
    ) -> Result<Self::Asset, AssetLoadError>;
}
