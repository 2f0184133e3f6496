pub mod element;
pub mod library;
pub mod modifiers;
pub mod paths;
pub mod read;
pub mod renderable;
pub mod validate;
pub mod value;

pub mod prelude {
    pub use crate::{
        element::*, library::*, modifiers::*, paths::*, read::*, renderable::*, validate::*,
        value::*,
    };
}
