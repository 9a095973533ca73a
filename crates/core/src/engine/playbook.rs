use crate::domain::records::{OutreachStrategy, PlaybookResult, PriceRange};
use crate::engine::random::pick;
use crate::engine::{RandomSource, INDUSTRIES};

pub const PRICE_MIN_RANGE: (i64, i64) = (500, 1_499);
pub const PRICE_MAX_RANGE: (i64, i64) = (2_000, 10_999);
pub const OUTREACH_PLATFORMS: [&str; 3] = ["Email", "LinkedIn", "Domain Marketplaces"];

/// Draws: target count (2..=3), one industry index per target, price min,
/// price max.
///
/// A draw that repeats an already chosen industry is dropped rather than
/// redrawn, so fewer industries than the target count can come back.
pub fn generate_playbook(rng: &mut dyn RandomSource, domain: &str) -> PlaybookResult {
    let target = rng.next_int(2, 3);
    let mut industries: Vec<String> = Vec::with_capacity(target as usize);
    for _ in 0..target {
        let industry = *pick(rng, &INDUSTRIES);
        if !industries.iter().any(|s| s == industry) {
            industries.push(industry.to_string());
        }
    }

    let price_range = PriceRange {
        min: rng.next_int(PRICE_MIN_RANGE.0, PRICE_MIN_RANGE.1),
        max: rng.next_int(PRICE_MAX_RANGE.0, PRICE_MAX_RANGE.1),
    };

    let lead_industry = industries.first().map(String::as_str).unwrap_or(INDUSTRIES[0]);
    let email_template = email_template(domain, lead_industry);

    PlaybookResult {
        domain: domain.to_string(),
        target_industries: industries,
        price_range,
        outreach_strategy: OutreachStrategy {
            platforms: OUTREACH_PLATFORMS.iter().map(|p| p.to_string()).collect(),
            email_template,
        },
        pitch_examples: vec![
            format!(
                "{domain} is perfect for your upcoming product launch because it's memorable and directly relates to your industry."
            ),
            format!(
                "Owning {domain} will give you an edge over competitors with less premium domain names."
            ),
        ],
    }
}

fn email_template(domain: &str, industry: &str) -> String {
    format!(
        "Subject: {domain} - Premium Domain Opportunity\n\n\
         Hello [Name],\n\n\
         I noticed your company is growing in the {industry} space and thought you might be interested in the premium domain {domain}.\n\n\
         This domain would be perfect for your brand because...\n\n\
         [Your Name]"
    )
}
