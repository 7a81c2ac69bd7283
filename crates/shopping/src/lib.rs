pub mod categorization;
pub mod list;

pub use categorization::{CategorizationService, Category};
pub use list::{ShoppingItem, ShoppingList, ShoppingListGenerator};
