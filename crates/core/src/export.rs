use crate::domain::records::ProspectRecord;

const PROSPECT_HEADERS: [&str; 7] = [
    "Company",
    "Industry",
    "Website",
    "Contact Name",
    "Contact Title",
    "Email",
    "Relevance",
];

/// Renders prospects as CSV, one row per record in the given order.
pub fn prospects_csv(prospects: &[ProspectRecord]) -> String {
    let mut lines = Vec::with_capacity(prospects.len() + 1);
    lines.push(PROSPECT_HEADERS.join(","));

    for p in prospects {
        let relevance = format!("{:.1}", p.relevance);
        let row = [
            p.name.as_str(),
            p.industry.as_str(),
            p.website.as_str(),
            p.contact_name.as_str(),
            p.contact_title.as_str(),
            p.email.as_str(),
            relevance.as_str(),
        ];
        lines.push(row.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(","));
    }

    lines.join("\n")
}

pub fn prospects_file_name(domain: &str) -> String {
    format!("{domain}_prospects.csv")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
