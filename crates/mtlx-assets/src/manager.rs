use std::{
    any::{Any, TypeId},
    ops::Deref,
    sync::Arc,
};

use dashmap::DashMap;

use mtlx_document::paths::ProjectPaths;

use crate::asset::{Asset, AssetName, AssetNameBuf};
use crate::loader::{AssetLoadError, AssetLoader};

/// Whether a load may reuse an asset already resident in memory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CacheMode {
    #[default]
    Reuse,
    Ignore,
}

/// Asset manager.
#[derive(Clone)]
pub struct Assets(pub(crate) Arc<AssetsInner>);

pub(crate) struct AssetsInner {
    /// Project the managed assets belong to.
    project: ProjectPaths,
    /// Loaders used to load assets. Maps from type ID of the asset to the loader.
    loaders: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    /// Registered asset extensions and the host resource type they import into.
    extensions: DashMap<String, &'static str>,
    /// Resident assets by name.
    resident: DashMap<AssetNameBuf, Arc<dyn Any + Send + Sync>>,
}

/// A handle to a loaded asset. Cheap to clone; the asset stays resident at
/// least as long as a handle exists.
pub struct Handle<A: Asset> {
    asset: Arc<A>,
    name: AssetNameBuf,
}

impl<A: Asset> Handle<A> {
    pub fn name(&self) -> &AssetName {
        &self.name
    }
}

impl<A: Asset> Clone for Handle<A> {
    fn clone(&self) -> Self {
        Self {
            asset: self.asset.clone(),
            name: self.name.clone(),
        }
    }
}

impl<A: Asset> Deref for Handle<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.asset
    }
}

impl Assets {
    pub fn new(project: ProjectPaths) -> Self {
        Self(Arc::new(AssetsInner {
            project,
            loaders: DashMap::new(),
            extensions: DashMap::new(),
            resident: DashMap::new(),
        }))
    }

    pub fn project(&self) -> &ProjectPaths {
        &self.0.project
    }

    /// Register a new asset type to load.
    ///
    /// # Panics
    /// Panics if the same asset type is already registered or an asset with the same extension
    /// is already registered.
    pub fn register<A: Asset>(&self, loader: A::Loader) {
        if self
            .0
            .loaders
            .insert(TypeId::of::<A>(), Arc::new(loader))
            .is_some()
        {
            panic!("asset loader of same type already exists");
        }
        if self
            .0
            .extensions
            .insert(A::EXTENSION.into(), A::RESOURCE_TYPE)
            .is_some()
        {
            panic!(
                "asset type with extension '{}' already exists",
                A::EXTENSION
            );
        }
    }

    /// The host resource type a file imports into, by extension. `None` for
    /// files no registered loader handles.
    pub fn resource_type(&self, name: &AssetName) -> Option<&'static str> {
        let ext = name.extension()?;
        self.0.extensions.get(ext).map(|entry| *entry.value())
    }

    pub fn loaded(&self, name: &AssetName) -> bool {
        self.0.resident.contains_key(name)
    }

    /// Drops the resident copy of an asset. Outstanding handles keep their
    /// copy alive; subsequent loads re-import.
    pub fn unload(&self, name: &AssetName) {
        self.0.resident.remove(name);
    }

    pub fn load<A: Asset>(&self, name: &AssetName) -> Result<Handle<A>, AssetLoadError> {
        self.load_with(name, CacheMode::Reuse)
    }

    pub fn load_with<A: Asset>(
        &self,
        name: &AssetName,
        cache: CacheMode,
    ) -> Result<Handle<A>, AssetLoadError> {
        if cache == CacheMode::Reuse {
            if let Some(existing) = self.0.resident.get(name) {
                if let Ok(asset) = existing.value().clone().downcast::<A>() {
                    return Ok(Handle {
                        asset,
                        name: name.to_owned(),
                    });
                }
            }
        }

        let loader = self
            .0
            .loaders
            .get(&TypeId::of::<A>())
            .and_then(|entry| entry.value().clone().downcast::<A::Loader>().ok())
            .ok_or_else(|| AssetLoadError::NoLoader(std::any::type_name::<A>().into()))?;

        let asset = Arc::new(loader.load(self, name, cache)?);
        self.0
            .resident
            .insert(name.to_owned(), asset.clone() as Arc<dyn Any + Send + Sync>);

        Ok(Handle {
            asset,
            name: name.to_owned(),
        })
    }
}
