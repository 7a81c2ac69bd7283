use thiserror::Error;

pub type RecipeSourceResult<T> = Result<T, RecipeSourceError>;

#[derive(Error, Debug)]
pub enum RecipeSourceError {
    #[error("Failed to read recipe data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse recipe data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}
