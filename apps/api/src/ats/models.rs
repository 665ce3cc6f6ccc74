//! Typed shapes for every stage of the ATS pipeline.
//!
//! The section structs mirror the JSON the analysis prompts demand. Numeric
//! sub-scores are deliberately non-optional: a reply missing one fails
//! deserialization and surfaces as a malformed-response error instead of
//! leaking a default into the score aggregator. Wire names are camelCase to
//! match the prompt schemas and the UI contract.

use serde::{Deserialize, Serialize};

/// Skills section: extracted skill list plus relevance/demand ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsAnalysis {
    #[serde(default)]
    pub skills: Vec<String>,
    pub skills_relevance: f64,
    pub market_demand: f64,
    #[serde(default)]
    pub analysis: String,
}

/// Work-experience section: employers, titles, and an overall quality rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceAnalysis {
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub total_experience: String,
    pub experience_quality: f64,
    #[serde(default)]
    pub analysis: String,
}

/// Projects section: named projects, technologies, quality and innovation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsAnalysis {
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub project_quality: f64,
    pub innovation: f64,
    #[serde(default)]
    pub analysis: String,
}

/// Education section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationAnalysis {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub graduation_year: String,
    #[serde(default)]
    pub gpa: Option<String>,
    pub education_quality: f64,
    #[serde(default)]
    pub analysis: String,
}

/// Formatting section: four independent structural ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingAnalysis {
    pub ats_compliance: f64,
    pub readability: f64,
    pub organization: f64,
    pub formatting: f64,
    #[serde(default)]
    pub analysis: String,
}

/// Outcome of probing a single link found in the resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatus {
    pub link: String,
    /// HTTP status of the probe; `None` when the request itself failed.
    pub status: Option<u16>,
    pub valid: bool,
}

/// Aggregate link-validation result. Invariant: `valid_links <= total_links`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkValidation {
    pub total_links: usize,
    pub valid_links: usize,
    pub link_validation: Vec<LinkStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRating {
    pub company: String,
    pub rating: f64,
    #[serde(default)]
    pub analysis: String,
}

/// Employer-reputation verification. `average_company_rating` is the
/// arithmetic mean of the listed ratings, or the neutral default when the
/// resume named no employers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyVerification {
    #[serde(default)]
    pub company_ratings: Vec<CompanyRating>,
    pub average_company_rating: f64,
}

/// Everything the score aggregator consumes. Assembled once per request and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub skills_analysis: SkillsAnalysis,
    pub experience_analysis: ExperienceAnalysis,
    pub projects_analysis: ProjectsAnalysis,
    pub education_analysis: EducationAnalysis,
    pub formatting_analysis: FormattingAnalysis,
    pub link_validation: LinkValidation,
    pub company_verification: CompanyVerification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub suggestion: String,
    pub priority: Priority,
}

/// Wrapper matching the recommendation prompt's output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
}

/// Final result returned over HTTP and in the terminal progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub ats_score: u32,
    pub analysis_results: AnalysisBundle,
    pub recommendations: Vec<Recommendation>,
}

impl SkillsAnalysis {
    pub fn score_fields(&self) -> [(&'static str, f64); 2] {
        [
            ("skillsRelevance", self.skills_relevance),
            ("marketDemand", self.market_demand),
        ]
    }
}

impl ExperienceAnalysis {
    pub fn score_fields(&self) -> [(&'static str, f64); 1] {
        [("experienceQuality", self.experience_quality)]
    }
}

impl ProjectsAnalysis {
    pub fn score_fields(&self) -> [(&'static str, f64); 2] {
        [
            ("projectQuality", self.project_quality),
            ("innovation", self.innovation),
        ]
    }
}

impl EducationAnalysis {
    pub fn score_fields(&self) -> [(&'static str, f64); 1] {
        [("educationQuality", self.education_quality)]
    }
}

impl FormattingAnalysis {
    pub fn score_fields(&self) -> [(&'static str, f64); 4] {
        [
            ("atsCompliance", self.ats_compliance),
            ("readability", self.readability),
            ("organization", self.organization),
            ("formatting", self.formatting),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_analysis_deserializes_from_prompt_schema() {
        let json = r#"{
            "skills": ["Rust", "PostgreSQL"],
            "skillsRelevance": 8,
            "marketDemand": 9,
            "analysis": "strong backend profile"
        }"#;
        let parsed: SkillsAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.skills.len(), 2);
        assert!((parsed.skills_relevance - 8.0).abs() < f64::EPSILON);
        assert!((parsed.market_demand - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_numeric_subscore_is_an_error() {
        // skillsRelevance absent — must fail, never default.
        let json = r#"{"skills": [], "marketDemand": 5, "analysis": ""}"#;
        assert!(serde_json::from_str::<SkillsAnalysis>(json).is_err());
    }

    #[test]
    fn test_missing_extracted_facts_default() {
        // Lists and commentary are extracted facts, not scores; they may
        // default when a sparse resume leaves them out.
        let json = r#"{"experienceQuality": 6}"#;
        let parsed: ExperienceAnalysis = serde_json::from_str(json).unwrap();
        assert!(parsed.companies.is_empty());
        assert_eq!(parsed.total_experience, "");
    }

    #[test]
    fn test_formatting_requires_all_four_scores() {
        let json = r#"{"atsCompliance": 7, "readability": 8, "organization": 9}"#;
        assert!(serde_json::from_str::<FormattingAnalysis>(json).is_err());
    }

    #[test]
    fn test_priority_wire_format_is_lowercase() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"category": "skills", "suggestion": "add cloud experience", "priority": "high"}"#,
        )
        .unwrap();
        assert_eq!(rec.priority, Priority::High);
        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back["priority"], "high");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = AtsReport {
            ats_score: 90,
            analysis_results: AnalysisBundle {
                skills_analysis: SkillsAnalysis {
                    skills: vec![],
                    skills_relevance: 8.0,
                    market_demand: 8.0,
                    analysis: String::new(),
                },
                experience_analysis: ExperienceAnalysis {
                    companies: vec![],
                    positions: vec![],
                    total_experience: String::new(),
                    experience_quality: 8.0,
                    analysis: String::new(),
                },
                projects_analysis: ProjectsAnalysis {
                    projects: vec![],
                    technologies: vec![],
                    project_quality: 8.0,
                    innovation: 8.0,
                    analysis: String::new(),
                },
                education_analysis: EducationAnalysis {
                    degree: String::new(),
                    institution: String::new(),
                    graduation_year: String::new(),
                    gpa: None,
                    education_quality: 8.0,
                    analysis: String::new(),
                },
                formatting_analysis: FormattingAnalysis {
                    ats_compliance: 8.0,
                    readability: 8.0,
                    organization: 8.0,
                    formatting: 8.0,
                    analysis: String::new(),
                },
                link_validation: LinkValidation {
                    total_links: 0,
                    valid_links: 0,
                    link_validation: vec![],
                },
                company_verification: CompanyVerification {
                    company_ratings: vec![],
                    average_company_rating: 5.0,
                },
            },
            recommendations: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["atsScore"], 90);
        assert!(json["analysisResults"]["skillsAnalysis"]["skillsRelevance"].is_number());
        assert!(json["analysisResults"]["linkValidation"]["totalLinks"].is_number());
    }
}
