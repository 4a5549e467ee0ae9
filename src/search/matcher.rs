use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error};

use crate::db::models::RecipeRow;
use crate::search::normalize::Normalizer;
use crate::search::store::{RecipeStore, INGREDIENT_DELIMITER};

/// Marker the scraper writes when a field was not available
const MISSING: &str = "N/A";

/// Unit suffixes trailing a review count ("120 votos", "1 voto")
const REVIEW_SUFFIXES: [&str; 4] = ["votos", "voto", "votes", "vote"];

/// Ranking key derived from a recipe's rating and review count
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub rating: f64,
    pub reviews: i64,
}

impl Score {
    pub fn from_fields(rating: Option<&str>, reviews: Option<&str>) -> Self {
        Self {
            rating: parse_rating(rating),
            reviews: parse_reviews(reviews),
        }
    }

    /// Descending by rating, then descending by review count
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .rating
            .total_cmp(&self.rating)
            .then_with(|| other.reviews.cmp(&self.reviews))
    }
}

/// Parse a rating like "4.8"; missing, "N/A" or garbage counts as 0.0.
///
/// NaN has no place in the ordering and also counts as 0.0.
pub fn parse_rating(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() && value != MISSING => value
            .parse::<f64>()
            .ok()
            .filter(|rating| !rating.is_nan())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parse a review count like "120 votos"; missing, "N/A" or garbage counts as 0
pub fn parse_reviews(raw: Option<&str>) -> i64 {
    let Some(value) = raw.map(str::trim) else {
        return 0;
    };
    if value.is_empty() || value == MISSING {
        return 0;
    }

    let number = REVIEW_SUFFIXES
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
        .unwrap_or(value)
        .trim();

    number.parse::<i64>().unwrap_or(0)
}

/// A matching recipe, without its ingredient list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: i64,
    pub titulo: String,
    pub nota: Option<String>,
    pub avaliacoes: Option<String>,
    pub autor: Option<String>,
    pub tempo_preparo: Option<String>,
    pub link: Option<String>,
    pub imagem: Option<String>,
    #[serde(skip)]
    pub score: Score,
}

impl From<RecipeRow> for MatchResult {
    fn from(row: RecipeRow) -> Self {
        let score = Score::from_fields(row.nota.as_deref(), row.avaliacoes.as_deref());
        Self {
            id: row.id,
            titulo: row.titulo,
            nota: row.nota,
            avaliacoes: row.avaliacoes,
            autor: row.autor,
            tempo_preparo: row.tempo_preparo,
            link: row.link,
            imagem: row.imagem,
            score,
        }
    }
}

/// Finds recipes whose ingredients contain every query term.
///
/// Both sides go through the shared [`Normalizer`], so "feijao" finds
/// "Feijão preto". Containment is plain substring search: "sal" also finds
/// "salsicha".
#[derive(Clone)]
pub struct IngredientMatcher {
    normalizer: Arc<Normalizer>,
}

impl IngredientMatcher {
    pub fn new(normalizer: Arc<Normalizer>) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Search the store and return every match, best ranked first.
    ///
    /// Never fails: a store error is logged and yields an empty list, as does
    /// an empty query. A term that normalizes to nothing (only combining
    /// marks) is kept and is contained in every ingredient.
    pub async fn search<S>(&self, store: &S, query: &[String]) -> Vec<MatchResult>
    where
        S: RecipeStore + ?Sized,
    {
        let terms = self.normalize_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let rows = match store.fetch_all_with_ingredients().await {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "Recipe store unavailable during search");
                return Vec::new();
            }
        };

        let scanned = rows.len();
        let results = self.rank(rows, &terms);
        debug!(
            "Ingredient search {:?}: {} of {} recipes matched",
            terms,
            results.len(),
            scanned
        );

        results
    }

    /// Trim and normalize query terms. Blank terms are dropped before
    /// normalization; terms that normalize to "" are kept.
    pub fn normalize_terms(&self, query: &[String]) -> Vec<String> {
        query
            .iter()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .map(|term| self.normalizer.normalize(term))
            .collect()
    }

    /// Filter `rows` against already-normalized `terms`, then sort stably
    pub fn rank(&self, rows: Vec<RecipeRow>, terms: &[String]) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = rows
            .into_iter()
            .filter(|row| self.matches(row, terms))
            .map(MatchResult::from)
            .collect();

        // slice::sort_by is stable; ties keep store order
        matches.sort_by(|a, b| a.score.rank(&b.score));
        matches
    }

    /// Whether every term is contained in some ingredient of `row`
    pub fn matches(&self, row: &RecipeRow, terms: &[String]) -> bool {
        let joined = match row.ings.as_deref() {
            Some(joined) if !joined.is_empty() => joined,
            _ => return false,
        };

        let ingredients: Vec<String> = joined
            .split(INGREDIENT_DELIMITER)
            .map(|item| self.normalizer.normalize(item))
            .collect();

        terms
            .iter()
            .all(|term| ingredients.iter().any(|item| item.contains(term.as_str())))
    }
}
