pub mod asset;
pub mod import_cache;
pub mod loader;
pub mod manager;
pub mod material;


pub mod prelude {
    pub use crate::{asset::*, import_cache::*, loader::*, manager::*, material::*};
}
