//! Ingredient search: text normalization, containment matching and ranking.

pub mod matcher;
pub mod normalize;
pub mod store;

pub use matcher::{IngredientMatcher, MatchResult, Score};
pub use normalize::{normalize, Normalizer};
pub use store::RecipeStore;
