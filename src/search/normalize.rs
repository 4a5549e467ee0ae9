use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Default number of distinct inputs kept by [`Normalizer`]
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Canonicalize text for comparison: NFD-decompose, drop combining marks,
/// then lowercase.
///
/// `normalize("Açúcar") == "acucar"`. Empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        // Lowercasing can emit decomposable text (U+0130 -> "i\u{307}")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Memoizing front for [`normalize`], bounded by an LRU.
///
/// The same ingredient strings recur across thousands of recipes in a single
/// search, so hits are the common case. Safe to share across requests.
pub struct Normalizer {
    cache: Mutex<LruCache<String, String>>,
}

impl Normalizer {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or(NonZeroUsize::new(DEFAULT_CACHE_SIZE).expect("non-zero default"));

        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut cache = self.cache.lock();
        if let Some(hit) = cache.get(text) {
            return hit.clone();
        }

        let normalized = normalize(text);
        cache.put(text.to_string(), normalized.clone());
        normalized
    }

    /// Whether `text` is cached, without touching its recency
    pub fn contains(&self, text: &str) -> bool {
        self.cache.lock().contains(text)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.lock().cap().get()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}
