pub mod material;
pub mod texture;

pub mod prelude {
    pub use crate::{material::*, texture::*};
}
