pub use self::{board::*, entity::*, position::*, tile::*};

pub(crate) mod board;
pub(crate) mod entity;
pub(crate) mod position;
pub(crate) mod tile;
