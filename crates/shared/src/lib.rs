mod entity;
mod error;
mod filter;
pub mod grocery;
mod memory;
pub mod recipe;
mod remote;

pub use entity::*;
pub use error::*;
pub use filter::*;
pub use grocery::GroceryList;
pub use memory::*;
pub use recipe::{DietaryTag, MealType, Recipe};
pub use remote::*;
