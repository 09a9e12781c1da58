pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryRecipeRepository;
pub use postgres::{create_pool, PgRecipeRepository};
pub use repository::RecipeRepository;

#[cfg(test)]
pub use repository::MockRecipeRepository;
