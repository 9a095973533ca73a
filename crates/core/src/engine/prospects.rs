use crate::domain::records::ProspectRecord;
use crate::engine::random::pick;
use crate::engine::RandomSource;

struct Company {
    name: &'static str,
    industry: &'static str,
    website: &'static str,
    email: &'static str,
    relevance: f64,
}

const ROSTER: [Company; 5] = [
    Company {
        name: "TechNova",
        industry: "Tech",
        website: "technova.com",
        email: "info@technova.com",
        relevance: 9.2,
    },
    Company {
        name: "HealthPulse",
        industry: "Health",
        website: "healthpulse.com",
        email: "contact@healthpulse.com",
        relevance: 8.7,
    },
    Company {
        name: "EduLearn",
        industry: "Education",
        website: "edulearn.com",
        email: "hello@edulearn.com",
        relevance: 7.9,
    },
    Company {
        name: "FinEdge",
        industry: "Finance",
        website: "finedge.com",
        email: "info@finedge.com",
        relevance: 8.5,
    },
    Company {
        name: "ShopEase",
        industry: "E-commerce",
        website: "shopease.com",
        email: "sales@shopease.com",
        relevance: 9.0,
    },
];

const FIRST_NAMES: [&str; 5] = ["John", "Sarah", "Michael", "Emma", "David"];
const LAST_NAMES: [&str; 5] = ["Smith", "Johnson", "Williams", "Brown", "Jones"];
const TITLES: [&str; 5] = ["CEO", "CMO", "CTO", "Marketing Director", "Brand Manager"];

const RELEVANCE_JITTER: f64 = 0.5;

/// Draws: count (3..=5), then per draw: company index, jitter float, first
/// name, last name, title.
///
/// Repeated companies are dropped, not redrawn. The domain does not affect
/// the roster yet.
pub fn generate_prospects(rng: &mut dyn RandomSource, _domain: &str) -> Vec<ProspectRecord> {
    let count = rng.next_int(3, 5);
    let mut out: Vec<ProspectRecord> = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let company = pick(rng, &ROSTER);
        let jitter = (rng.next_float() * 2.0 - 1.0) * RELEVANCE_JITTER;
        let first = pick(rng, &FIRST_NAMES);
        let last = pick(rng, &LAST_NAMES);
        let title = pick(rng, &TITLES);

        if out.iter().any(|p| p.name == company.name) {
            continue;
        }

        out.push(ProspectRecord {
            name: company.name.to_string(),
            industry: company.industry.to_string(),
            website: company.website.to_string(),
            email: company.email.to_string(),
            contact_name: format!("{first} {last}"),
            contact_title: title.to_string(),
            relevance: round_tenth((company.relevance + jitter).clamp(1.0, 10.0)),
        });
    }

    out.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    out
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::is_valid_email;
    use crate::engine::{ScriptedRandom, SeededRandom};
    use std::collections::BTreeSet;

    #[test]
    fn scripted_prospects_are_sorted_and_deduped() {
        // count 4: EduLearn(+0.0), TechNova(-0.5), EduLearn again, ShopEase(+0.5)
        let mut rng = ScriptedRandom::new(
            [4, 2, 0, 0, 0, 0, 1, 1, 1, 2, 3, 3, 3, 4, 4, 4, 4, 4],
            [0.5, 0.0, 0.9, 1.0],
        );
        let out = generate_prospects(&mut rng, "example.com");

        let names: Vec<_> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ShopEase", "TechNova", "EduLearn"]);
        assert_eq!(out[0].relevance, 9.5);
        assert_eq!(out[1].relevance, 8.7);
        assert_eq!(out[2].relevance, 7.9);
        assert_eq!(out[1].contact_name, "Sarah Johnson");
        assert_eq!(out[1].contact_title, "CMO");
        assert_eq!(out[2].contact_name, "John Smith");
        assert_eq!(out[0].contact_title, "Brand Manager");
    }

    #[test]
    fn shape_holds_across_many_draws() {
        let mut rng = SeededRandom::new(31);
        for _ in 0..1000 {
            let out = generate_prospects(&mut rng, "example.com");
            assert!((1..=5).contains(&out.len()));

            let unique: BTreeSet<_> = out.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(unique.len(), out.len());

            for pair in out.windows(2) {
                assert!(pair[0].relevance >= pair[1].relevance);
            }
            for p in &out {
                assert!((1.0..=10.0).contains(&p.relevance));
                assert_eq!(p.relevance, round_tenth(p.relevance));
                assert!(is_valid_email(&p.email));
            }
        }
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_tenth(9.249), 9.2);
        assert_eq!(round_tenth(9.25), 9.3);
        assert_eq!(round_tenth(10.0), 10.0);
    }
}
