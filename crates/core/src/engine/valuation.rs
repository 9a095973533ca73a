use crate::domain::records::{KeywordClass, ValuationFactors, ValuationResult};
use crate::engine::RandomSource;
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};

pub const VALUE_MIN: i64 = 500;
pub const VALUE_MAX: i64 = 10_499;
pub const BRANDABILITY_MAX: i64 = 9;

const TECH_KEYWORD: &str = "tech";

/// Draws: estimated value, then brandability.
///
/// Input without a dot (or ending in one) has no TLD and is rejected with
/// [`EngineError::InvalidInput`]; anything else is accepted as-is.
pub fn value_domain(
    rng: &mut dyn RandomSource,
    domain: &str,
    now: DateTime<Utc>,
) -> EngineResult<ValuationResult> {
    let tld = match domain.rsplit_once('.') {
        Some((_, tld)) if !tld.is_empty() => tld,
        _ => {
            return Err(EngineError::invalid_input(format!(
                "domain has no top-level domain: {domain:?}"
            )))
        }
    };

    let estimated_value = rng.next_int(VALUE_MIN, VALUE_MAX);
    let brandability = rng.next_int(0, BRANDABILITY_MAX) as u8;

    let keywords = if domain.contains(TECH_KEYWORD) {
        KeywordClass::TechHighValue
    } else {
        KeywordClass::Standard
    };

    Ok(ValuationResult {
        domain: domain.to_string(),
        estimated_value,
        factors: ValuationFactors {
            length: domain.chars().count(),
            keywords,
            tld: tld.to_string(),
            brandability,
        },
        timestamp: now,
    })
}
