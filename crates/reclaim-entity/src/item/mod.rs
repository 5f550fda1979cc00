//! Item entity: lost/found reports and their claim substate.

pub mod item_type;
pub mod model;

pub use item_type::ItemType;
pub use model::{CreateItem, Item, UpdateItem};
