//! Data model types

mod budget;
mod ids;
mod item;
mod list;
mod timestamp;
mod value;

pub use budget::*;
pub use ids::*;
pub use item::*;
pub use list::*;
pub use timestamp::*;
pub use value::*;
