//! Wire shapes returned by the remote domain-intelligence API, and the checks
//! that turn them into domain records.

use crate::domain::records::{
    KeywordClass, OutreachStrategy, PlaybookResult, PriceRange, ProspectRecord, SuggestionItem,
    ValuationFactors, ValuationResult,
};
use anyhow::{bail, ensure, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

const MAX_TARGET_INDUSTRIES: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteValuation {
    pub domain: String,
    pub estimated_value: i64,
    pub factors: RemoteFactors,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFactors {
    pub length: usize,
    pub keywords: String,
    pub tld: String,
    pub brandability: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSuggestion {
    pub name: String,
    #[serde(default)]
    pub available: bool,
    pub estimated_value: i64,
    pub brandability: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePlaybook {
    pub domain: String,
    pub target_industries: Vec<String>,
    pub price_range: PriceRange,
    pub outreach_strategy: OutreachStrategy,
    #[serde(default)]
    pub pitch_examples: Vec<String>,
}

/// Relevance may arrive as a number or as a pre-formatted string ("8.7").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProspect {
    pub name: String,
    pub industry: String,
    pub website: String,
    pub email: String,
    pub contact_name: String,
    pub contact_title: String,
    pub relevance: Value,
}

impl RemoteValuation {
    pub fn validate_and_into_valuation(
        self,
        expected_domain: &str,
        received_at: DateTime<Utc>,
    ) -> anyhow::Result<ValuationResult> {
        ensure!(
            self.domain == expected_domain,
            "valuation domain mismatch: expected {expected_domain}, got {}",
            self.domain
        );
        ensure!(
            self.estimated_value >= 0,
            "estimatedValue must be non-negative (got {})",
            self.estimated_value
        );

        let keywords = self.factors.keywords.parse::<KeywordClass>()?;
        let brandability = u8::try_from(self.factors.brandability)
            .ok()
            .filter(|b| *b <= 9)
            .with_context(|| {
                format!(
                    "brandability out of range: {}",
                    self.factors.brandability
                )
            })?;

        Ok(ValuationResult {
            domain: self.domain,
            estimated_value: self.estimated_value,
            factors: ValuationFactors {
                length: self.factors.length,
                keywords,
                tld: self.factors.tld,
                brandability,
            },
            timestamp: self.timestamp.unwrap_or(received_at),
        })
    }
}

impl RemoteSuggestion {
    pub fn validate_and_into_item(self) -> anyhow::Result<SuggestionItem> {
        let name = self.name.trim().to_string();
        ensure!(!name.is_empty(), "suggestion name must be non-empty");
        ensure!(
            self.estimated_value >= 0,
            "estimatedValue must be non-negative for {name}"
        );
        ensure!(
            (1..=10).contains(&self.brandability),
            "brandability must be 1..=10 for {name} (got {})",
            self.brandability
        );

        Ok(SuggestionItem {
            name,
            available: self.available,
            estimated_value: self.estimated_value,
            brandability: self.brandability as u8,
        })
    }
}

impl RemotePlaybook {
    pub fn validate_and_into_playbook(self, expected_domain: &str) -> anyhow::Result<PlaybookResult> {
        ensure!(
            self.domain == expected_domain,
            "playbook domain mismatch: expected {expected_domain}, got {}",
            self.domain
        );
        ensure!(
            (1..=MAX_TARGET_INDUSTRIES).contains(&self.target_industries.len()),
            "targetIndustries must have 1..={MAX_TARGET_INDUSTRIES} entries (got {})",
            self.target_industries.len()
        );

        let mut seen = BTreeSet::new();
        for industry in &self.target_industries {
            ensure!(!industry.trim().is_empty(), "industry must be non-empty");
            ensure!(seen.insert(industry.as_str()), "duplicate industry: {industry}");
        }

        ensure!(
            self.price_range.min <= self.price_range.max,
            "priceRange.min {} exceeds max {}",
            self.price_range.min,
            self.price_range.max
        );

        Ok(PlaybookResult {
            domain: self.domain,
            target_industries: self.target_industries,
            price_range: self.price_range,
            outreach_strategy: self.outreach_strategy,
            pitch_examples: self.pitch_examples,
        })
    }
}

impl RemoteProspect {
    fn validate_and_into_record(self) -> anyhow::Result<ProspectRecord> {
        let name = self.name.trim().to_string();
        ensure!(!name.is_empty(), "prospect name must be non-empty");

        let relevance = match &self.relevance {
            Value::Number(n) => n.as_f64().context("relevance is not a finite number")?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .with_context(|| format!("relevance is not numeric: {s}"))?,
            other => bail!("unexpected relevance value for {name}: {other}"),
        };
        ensure!(
            (1.0..=10.0).contains(&relevance),
            "relevance must be 1.0..=10.0 for {name} (got {relevance})"
        );

        Ok(ProspectRecord {
            name,
            industry: self.industry,
            website: self.website,
            email: self.email,
            contact_name: self.contact_name,
            contact_title: self.contact_title,
            relevance: (relevance * 10.0).round() / 10.0,
        })
    }
}

/// Drops repeated company names (first wins) and orders by relevance, highest first.
pub fn validate_and_into_prospects(
    remote: Vec<RemoteProspect>,
) -> anyhow::Result<Vec<ProspectRecord>> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(remote.len());
    for item in remote {
        let record = item.validate_and_into_record()?;
        if seen.insert(record.name.clone()) {
            out.push(record);
        }
    }
    out.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap()
    }

    #[test]
    fn valuation_accepts_expected_shape() {
        let remote: RemoteValuation = serde_json::from_value(json!({
            "domain": "mytechstartup.ai",
            "estimatedValue": 4200,
            "factors": {
                "length": 16,
                "keywords": "tech (high value)",
                "tld": "ai",
                "brandability": 7
            }
        }))
        .unwrap();

        let v = remote
            .validate_and_into_valuation("mytechstartup.ai", now())
            .unwrap();
        assert_eq!(v.factors.keywords, KeywordClass::TechHighValue);
        assert_eq!(v.factors.brandability, 7);
        assert_eq!(v.timestamp, now());
    }

    #[test]
    fn valuation_rejects_domain_mismatch_and_bad_keywords() {
        let remote: RemoteValuation = serde_json::from_value(json!({
            "domain": "other.com",
            "estimatedValue": 4200,
            "factors": {"length": 9, "keywords": "standard", "tld": "com", "brandability": 3}
        }))
        .unwrap();
        assert!(remote.validate_and_into_valuation("example.com", now()).is_err());

        let remote: RemoteValuation = serde_json::from_value(json!({
            "domain": "example.com",
            "estimatedValue": 4200,
            "factors": {"length": 11, "keywords": "premium", "tld": "com", "brandability": 3}
        }))
        .unwrap();
        assert!(remote.validate_and_into_valuation("example.com", now()).is_err());
    }

    #[test]
    fn valuation_rejects_brandability_above_nine() {
        let remote: RemoteValuation = serde_json::from_value(json!({
            "domain": "example.com",
            "estimatedValue": 4200,
            "factors": {"length": 11, "keywords": "standard", "tld": "com", "brandability": 10}
        }))
        .unwrap();
        assert!(remote.validate_and_into_valuation("example.com", now()).is_err());
    }

    #[test]
    fn suggestion_rejects_out_of_range_brandability() {
        let remote = RemoteSuggestion {
            name: "alphabeta.io".to_string(),
            available: true,
            estimated_value: 300,
            brandability: 0,
        };
        assert!(remote.validate_and_into_item().is_err());
    }

    #[test]
    fn playbook_rejects_duplicate_industries_and_inverted_range() {
        let base = json!({
            "domain": "example.com",
            "targetIndustries": ["Tech", "Tech"],
            "priceRange": {"min": 500, "max": 2000},
            "outreachStrategy": {"platforms": ["Email"], "emailTemplate": "hi"}
        });
        let remote: RemotePlaybook = serde_json::from_value(base).unwrap();
        assert!(remote.validate_and_into_playbook("example.com").is_err());

        let remote: RemotePlaybook = serde_json::from_value(json!({
            "domain": "example.com",
            "targetIndustries": ["Tech"],
            "priceRange": {"min": 3000, "max": 2000},
            "outreachStrategy": {"platforms": ["Email"], "emailTemplate": "hi"}
        }))
        .unwrap();
        assert!(remote.validate_and_into_playbook("example.com").is_err());
    }

    #[test]
    fn prospects_accept_string_relevance_dedupe_and_sort() {
        let remote: Vec<RemoteProspect> = serde_json::from_value(json!([
            {"name": "EduLearn", "industry": "Education", "website": "edulearn.com",
             "email": "hello@edulearn.com", "contactName": "Emma Brown",
             "contactTitle": "CMO", "relevance": "7.9"},
            {"name": "TechNova", "industry": "Tech", "website": "technova.com",
             "email": "info@technova.com", "contactName": "John Smith",
             "contactTitle": "CEO", "relevance": 9.24},
            {"name": "EduLearn", "industry": "Education", "website": "edulearn.com",
             "email": "hello@edulearn.com", "contactName": "David Jones",
             "contactTitle": "CTO", "relevance": 8.1}
        ]))
        .unwrap();

        let out = validate_and_into_prospects(remote).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "TechNova");
        assert_eq!(out[0].relevance, 9.2);
        assert_eq!(out[1].name, "EduLearn");
        assert_eq!(out[1].contact_name, "Emma Brown");
    }

    #[test]
    fn prospects_reject_relevance_out_of_range() {
        let remote: Vec<RemoteProspect> = serde_json::from_value(json!([
            {"name": "TechNova", "industry": "Tech", "website": "technova.com",
             "email": "info@technova.com", "contactName": "John Smith",
             "contactTitle": "CEO", "relevance": 11.0}
        ]))
        .unwrap();
        assert!(validate_and_into_prospects(remote).is_err());
    }
}
