use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub domain: String,
    pub estimated_value: i64,
    pub factors: ValuationFactors,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationFactors {
    pub length: usize,
    pub keywords: KeywordClass,
    pub tld: String,
    pub brandability: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeywordClass {
    #[serde(rename = "tech (high value)")]
    TechHighValue,
    #[serde(rename = "standard")]
    Standard,
}

impl KeywordClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TechHighValue => "tech (high value)",
            Self::Standard => "standard",
        }
    }
}

impl std::str::FromStr for KeywordClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        [Self::TechHighValue, Self::Standard]
            .into_iter()
            .find(|k| k.as_str() == s)
            .with_context(|| format!("unknown keyword class: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub name: String,
    pub available: bool,
    pub estimated_value: i64,
    pub brandability: u8,
}

/// Post-filters applied to a suggestion batch, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionFilters {
    /// TLD without the leading dot. Blank means "any".
    #[serde(default)]
    pub tld: Option<String>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub min_value: Option<i64>,
}

impl SuggestionFilters {
    pub fn tld(&self) -> Option<&str> {
        self.tld.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn apply(&self, items: Vec<SuggestionItem>) -> Vec<SuggestionItem> {
        let mut items = items;

        if let Some(tld) = self.tld() {
            let suffix = format!(".{tld}");
            items.retain(|s| s.name.ends_with(&suffix));
        }

        if let Some(max_length) = self.max_length {
            items.retain(|s| s.name.chars().count() <= max_length);
        }

        if let Some(min_value) = self.min_value {
            items.retain(|s| s.estimated_value >= min_value);
        }

        items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookResult {
    pub domain: String,
    pub target_industries: Vec<String>,
    pub price_range: PriceRange,
    pub outreach_strategy: OutreachStrategy,
    pub pitch_examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachStrategy {
    pub platforms: Vec<String>,
    pub email_template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectRecord {
    pub name: String,
    pub industry: String,
    pub website: String,
    pub email: String,
    pub contact_name: String,
    pub contact_title: String,
    /// 1.0..=10.0, one decimal place.
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageMockup {
    pub id: u32,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub features: [String; 3],
}

/// A domain the user is tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEntry {
    pub name: String,
    pub value: i64,
    pub added_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(name: &str, estimated_value: i64) -> SuggestionItem {
        SuggestionItem {
            name: name.to_string(),
            available: true,
            estimated_value,
            brandability: 5,
        }
    }

    #[test]
    fn keyword_class_serializes_to_display_labels() {
        assert_eq!(
            serde_json::to_value(KeywordClass::TechHighValue).unwrap(),
            json!("tech (high value)")
        );
        assert_eq!(
            serde_json::to_value(KeywordClass::Standard).unwrap(),
            json!("standard")
        );
        for class in [KeywordClass::TechHighValue, KeywordClass::Standard] {
            assert_eq!(serde_json::to_value(class).unwrap(), json!(class.as_str()));
            assert_eq!(class.as_str().parse::<KeywordClass>().unwrap(), class);
        }
        assert!("premium".parse::<KeywordClass>().is_err());
    }

    #[test]
    fn filters_apply_tld_then_length_then_value() {
        let filters = SuggestionFilters {
            tld: Some("com".to_string()),
            max_length: Some(10),
            min_value: Some(1000),
        };
        let out = filters.apply(vec![
            item("ab.com", 2000),
            item("ab.io", 2000),
            item("abcdefgh.com", 2000),
            item("cd.com", 999),
            item("xcom.net", 5000),
        ]);
        let names: Vec<_> = out.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ab.com"]);
    }

    #[test]
    fn blank_tld_filter_is_ignored() {
        let filters = SuggestionFilters {
            tld: Some(" ".to_string()),
            ..SuggestionFilters::default()
        };
        assert_eq!(filters.tld(), None);
        assert_eq!(filters.apply(vec![item("ab.io", 1)]).len(), 1);
    }

    #[test]
    fn records_use_camel_case_field_names() {
        let v = serde_json::to_value(item("ab.com", 10)).unwrap();
        assert_eq!(v["estimatedValue"], 10);

        let filters: SuggestionFilters =
            serde_json::from_value(json!({"maxLength": 12, "minValue": 300})).unwrap();
        assert_eq!(filters.max_length, Some(12));
        assert_eq!(filters.min_value, Some(300));
        assert_eq!(filters.tld, None);
    }
}
