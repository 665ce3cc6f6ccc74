//! Score aggregation — the deterministic core of the ATS pipeline.
//!
//! Combines the five section analyses, the link-validity ratio, and the
//! employer-reputation bonus into a single 0-100 integer. Pure and
//! synchronous; every input comes from the assembled [`AnalysisBundle`].

use serde::{Deserialize, Serialize};

use crate::ats::models::AnalysisBundle;

/// Fixed stage weights. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub projects: f64,
    pub education: f64,
    pub formatting: f64,
    pub links: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skills: 0.25,
            experience: 0.25,
            projects: 0.20,
            education: 0.15,
            formatting: 0.10,
            links: 0.05,
        }
    }
}

/// Link score used when the resume contains no links at all. Having no links
/// is neutral-positive, not a penalty.
pub const NO_LINKS_DEFAULT: f64 = 8.0;

/// An average employer rating strictly above this adds the flat bonus.
pub const COMPANY_BONUS_THRESHOLD: f64 = 7.0;

/// Flat bonus — a step function, intentionally coarse.
pub const COMPANY_BONUS: f64 = 5.0;

/// Computes the final ATS score for a bundle with the default weights.
///
/// All sub-scores are assumed to lie in [0, 10]; that invariant is enforced
/// when the section analyses are parsed, so no lower clamp is applied here.
pub fn calculate_ats_score(bundle: &AnalysisBundle) -> u32 {
    calculate_with_weights(bundle, &ScoreWeights::default())
}

pub fn calculate_with_weights(bundle: &AnalysisBundle, weights: &ScoreWeights) -> u32 {
    let skills = &bundle.skills_analysis;
    let projects = &bundle.projects_analysis;
    let formatting = &bundle.formatting_analysis;
    let links = &bundle.link_validation;

    let skills_score = (skills.skills_relevance + skills.market_demand) / 2.0;
    let experience_score = bundle.experience_analysis.experience_quality;
    let projects_score = (projects.project_quality + projects.innovation) / 2.0;
    let education_score = bundle.education_analysis.education_quality;
    let formatting_score = (formatting.ats_compliance
        + formatting.readability
        + formatting.organization
        + formatting.formatting)
        / 4.0;
    let links_score = if links.total_links > 0 {
        (links.valid_links as f64 / links.total_links as f64) * 10.0
    } else {
        NO_LINKS_DEFAULT
    };

    let weighted = skills_score * weights.skills
        + experience_score * weights.experience
        + projects_score * weights.projects
        + education_score * weights.education
        + formatting_score * weights.formatting
        + links_score * weights.links;

    let bonus = if bundle.company_verification.average_company_rating > COMPANY_BONUS_THRESHOLD {
        COMPANY_BONUS
    } else {
        0.0
    };

    let total = weighted * 10.0 + bonus;
    (total.round() as u32).min(100)
}
