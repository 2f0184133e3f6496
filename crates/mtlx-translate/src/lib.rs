pub mod decoder;
pub mod effect;
pub mod resolver;
pub mod translate;

pub mod prelude {
    pub use crate::{decoder::*, effect::*, resolver::*, translate::*};
}
