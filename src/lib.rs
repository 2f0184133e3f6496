pub mod assets {
    pub use mtlx_assets::*;
}

pub mod document {
    pub use mtlx_document::*;
}

pub mod log {
    pub use mtlx_log::*;
}

pub mod material {
    pub use mtlx_material::*;
}

pub mod translate {
    pub use mtlx_translate::*;
}

pub mod prelude {
    pub use mtlx_assets::prelude::*;
    pub use mtlx_document::prelude::*;
    pub use mtlx_material::prelude::*;
    pub use mtlx_translate::prelude::*;
}

use prelude::*;

/// Registers every importer this crate ships with an asset manager.
pub fn register_loaders(assets: &Assets, resolver: Resolver) {
    assets.register::<MaterialAsset>(MtlxLoader::new(resolver));
}
