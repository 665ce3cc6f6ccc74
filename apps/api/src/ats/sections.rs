//! Section analyzers — one structured LLM call per resume section.
//!
//! All five are structurally identical: fill the template, call the analysis
//! service, sanitize/parse into the typed result, then range-check the
//! sub-scores so an out-of-range value is rejected here instead of skewing
//! the aggregate. No retries happen at this level; transport retries live in
//! the LLM client.

use crate::ats::models::{
    EducationAnalysis, ExperienceAnalysis, FormattingAnalysis, ProjectsAnalysis, SkillsAnalysis,
};
use crate::ats::prompts::{
    EDUCATION_PROMPT_TEMPLATE, EXPERIENCE_PROMPT_TEMPLATE, FORMATTING_PROMPT_TEMPLATE,
    PROJECTS_PROMPT_TEMPLATE, SECTION_SYSTEM, SKILLS_PROMPT_TEMPLATE,
};
use crate::ats::AnalysisError;
use crate::llm_client::LlmClient;

/// Sub-scores are expected on a 1-10 scale; 0 is tolerated so a resume with a
/// genuinely absent section can bottom out rather than error.
const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 10.0;

pub async fn analyze_skills(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<SkillsAnalysis, AnalysisError> {
    let prompt = SKILLS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let result: SkillsAnalysis = llm.call_json(&prompt, SECTION_SYSTEM).await?;
    ensure_scores_in_range(&result.score_fields())?;
    Ok(result)
}

pub async fn analyze_experience(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<ExperienceAnalysis, AnalysisError> {
    let prompt = EXPERIENCE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let result: ExperienceAnalysis = llm.call_json(&prompt, SECTION_SYSTEM).await?;
    ensure_scores_in_range(&result.score_fields())?;
    Ok(result)
}

pub async fn analyze_projects(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<ProjectsAnalysis, AnalysisError> {
    let prompt = PROJECTS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let result: ProjectsAnalysis = llm.call_json(&prompt, SECTION_SYSTEM).await?;
    ensure_scores_in_range(&result.score_fields())?;
    Ok(result)
}

pub async fn analyze_education(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<EducationAnalysis, AnalysisError> {
    let prompt = EDUCATION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let result: EducationAnalysis = llm.call_json(&prompt, SECTION_SYSTEM).await?;
    ensure_scores_in_range(&result.score_fields())?;
    Ok(result)
}

pub async fn analyze_formatting(
    llm: &LlmClient,
    resume_text: &str,
) -> Result<FormattingAnalysis, AnalysisError> {
    let prompt = FORMATTING_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let result: FormattingAnalysis = llm.call_json(&prompt, SECTION_SYSTEM).await?;
    ensure_scores_in_range(&result.score_fields())?;
    Ok(result)
}

fn ensure_scores_in_range(fields: &[(&'static str, f64)]) -> Result<(), AnalysisError> {
    for &(field, value) in fields {
        if !value.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(AnalysisError::ScoreOutOfRange { field, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_scores_pass() {
        assert!(ensure_scores_in_range(&[("a", 0.0), ("b", 10.0), ("c", 7.5)]).is_ok());
    }

    #[test]
    fn test_negative_score_rejected() {
        let err = ensure_scores_in_range(&[("skillsRelevance", -1.0)]).unwrap_err();
        match err {
            AnalysisError::ScoreOutOfRange { field, value } => {
                assert_eq!(field, "skillsRelevance");
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_score_above_ten_rejected() {
        assert!(ensure_scores_in_range(&[("marketDemand", 11.0)]).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(ensure_scores_in_range(&[("innovation", f64::NAN)]).is_err());
    }

    #[test]
    fn test_templates_embed_resume_text() {
        let filled = SKILLS_PROMPT_TEMPLATE.replace("{resume_text}", "RESUME BODY");
        assert!(filled.contains("RESUME BODY"));
        assert!(!filled.contains("{resume_text}"));
    }
}
