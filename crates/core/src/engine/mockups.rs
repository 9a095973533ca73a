use crate::domain::records::LandingPageMockup;

const STYLES: [(&str, [&str; 3]); 3] = [
    ("Modern", ["Responsive design", "Clear CTAs", "Modern typography"]),
    ("Classic", ["Traditional layout", "Trust indicators", "Service highlights"]),
    ("Bold", ["Striking visuals", "Bold typography", "Strong CTAs"]),
];

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/800x600";

/// One descriptor per design style, in Modern, Classic, Bold order.
pub fn generate_landing_page_mockups(domain: &str, industry: &str) -> Vec<LandingPageMockup> {
    let industry_title = capitalize_first(industry);

    STYLES
        .iter()
        .zip(1u32..)
        .map(|((style, features), id)| LandingPageMockup {
            id,
            title: format!("{industry_title} - {style} Design"),
            image_url: format!("{PLACEHOLDER_BASE}?text={style}+Design"),
            description: format!(
                "A {} landing page design for {domain} focused on {industry}.",
                style.to_lowercase()
            ),
            features: features.map(str::to_string),
        })
        .collect()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
