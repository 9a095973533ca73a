//! Mock domain-intelligence engine.
//!
//! Every generator is a synchronous function over an injected
//! [`RandomSource`]; backends add latency and state handling on top. The
//! order in which each generator draws from the source is part of its
//! contract so that scripted sources produce exact outputs.

pub mod mockups;
pub mod playbook;
pub mod prospects;
pub mod random;
pub mod suggestions;
pub mod valuation;

pub use mockups::generate_landing_page_mockups;
pub use playbook::generate_playbook;
pub use prospects::generate_prospects;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use suggestions::generate_suggestions;
pub use valuation::value_domain;

/// Industries a playbook can target.
pub const INDUSTRIES: [&str; 5] = ["Tech", "Health", "Finance", "Education", "E-commerce"];
