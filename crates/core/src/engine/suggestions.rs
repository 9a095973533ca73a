use crate::domain::records::{SuggestionFilters, SuggestionItem};
use crate::engine::random::pick;
use crate::engine::RandomSource;

pub const SUGGESTION_TLDS: [&str; 5] = ["com", "net", "io", "ai", "co"];
pub const VALUE_MIN: i64 = 200;
pub const VALUE_MAX: i64 = 5_199;

const UNAVAILABLE_BELOW: f64 = 0.3;

/// Builds one candidate per ordered pair of distinct keyword positions, then
/// applies `filters`.
///
/// Draws per candidate: TLD index, availability float, value, brandability.
pub fn generate_suggestions(
    rng: &mut dyn RandomSource,
    keywords: &str,
    filters: &SuggestionFilters,
) -> Vec<SuggestionItem> {
    let tokens: Vec<&str> = keywords.split_whitespace().collect();
    let n = tokens.len();
    let mut out = Vec::with_capacity(n.saturating_mul(n.saturating_sub(1)));

    for (i, first) in tokens.iter().enumerate() {
        for (j, second) in tokens.iter().enumerate() {
            if i == j {
                continue;
            }
            let tld = pick(rng, &SUGGESTION_TLDS);
            let available = rng.next_float() > UNAVAILABLE_BELOW;
            let estimated_value = rng.next_int(VALUE_MIN, VALUE_MAX);
            let brandability = rng.next_int(1, 10) as u8;

            out.push(SuggestionItem {
                name: format!("{first}{second}.{tld}"),
                available,
                estimated_value,
                brandability,
            });
        }
    }

    filters.apply(out)
}
