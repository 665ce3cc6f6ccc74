//! Per-request orchestration of the ATS analysis stages.
//!
//! Stage graph: text extraction gates everything; the five section analyzers
//! and link validation are mutually independent and run concurrently; company
//! verification needs the employer list from the experience analysis; scoring
//! needs the full bundle; recommendations come last and are non-fatal.
//!
//! Progress events are tagged per step so interleaved completions stay
//! attributable. Each step reports `processing` and at most one `completed`;
//! a failing step surfaces through the single terminal error event instead.

use std::future::Future;
use std::path::Path;

use tracing::info;

use crate::ats::models::{AnalysisBundle, AtsReport};
use crate::ats::{companies, links, recommend, scoring, sections, AnalysisError};
use crate::errors::AppError;
use crate::extraction::{self, MediaType};
use crate::progress::{ProgressNotifier, Step, StepStatus};
use crate::state::AppState;

pub async fn run_analysis(
    state: &AppState,
    client_id: &str,
    path: &Path,
    media: MediaType,
) -> Result<AtsReport, AppError> {
    let resume_text = extraction::extract_text(&state.llm, path, media).await?;
    info!(
        "extracted {} chars of resume text, starting analysis",
        resume_text.len()
    );

    let llm = &state.llm;
    let progress = &state.progress;

    // First error cancels the remaining analyzers and aborts the request;
    // link probing is infallible by design.
    let (skills, experience, projects, education, formatting, link_validation) = tokio::try_join!(
        staged(
            progress,
            client_id,
            Step::Skills,
            sections::analyze_skills(llm, &resume_text),
        ),
        staged(
            progress,
            client_id,
            Step::Experience,
            sections::analyze_experience(llm, &resume_text),
        ),
        staged(
            progress,
            client_id,
            Step::Projects,
            sections::analyze_projects(llm, &resume_text),
        ),
        staged(
            progress,
            client_id,
            Step::Education,
            sections::analyze_education(llm, &resume_text),
        ),
        staged(
            progress,
            client_id,
            Step::Formatting,
            sections::analyze_formatting(llm, &resume_text),
        ),
        async {
            Ok::<_, AnalysisError>(links::validate_links(&state.http, &resume_text).await)
        },
    )
    .map_err(AppError::from)?;

    let company_verification = companies::verify_companies(llm, &experience.companies)
        .await
        .map_err(AppError::from)?;

    let bundle = AnalysisBundle {
        skills_analysis: skills,
        experience_analysis: experience,
        projects_analysis: projects,
        education_analysis: education,
        formatting_analysis: formatting,
        link_validation,
        company_verification,
    };

    let ats_score = scoring::calculate_ats_score(&bundle);
    info!("ATS score computed: {ats_score}");

    let recommendations = recommend::generate_recommendations(llm, &bundle, ats_score).await;

    Ok(AtsReport {
        ats_score,
        analysis_results: bundle,
        recommendations,
    })
}

/// Wraps one analyzer with its progress notifications.
async fn staged<T, Fut>(
    progress: &ProgressNotifier,
    client_id: &str,
    step: Step,
    analyzer: Fut,
) -> Result<T, AnalysisError>
where
    Fut: Future<Output = Result<T, AnalysisError>>,
{
    progress
        .emit_step(client_id, step, StepStatus::Processing)
        .await;
    let value = analyzer.await?;
    progress
        .emit_step(client_id, step, StepStatus::Completed)
        .await;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressEvent;

    #[tokio::test]
    async fn test_staged_emits_processing_then_completed() {
        let progress = ProgressNotifier::new();
        let mut rx = progress.register("c1").await;

        let result = staged(&progress, "c1", Step::Skills, async {
            Ok::<_, AnalysisError>(42)
        })
        .await
        .unwrap();
        assert_eq!(result, 42);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert!(matches!(
            first,
            ProgressEvent::StepUpdate {
                step: Step::Skills,
                status: StepStatus::Processing
            }
        ));
        assert!(matches!(
            second,
            ProgressEvent::StepUpdate {
                step: Step::Skills,
                status: StepStatus::Completed
            }
        ));
    }

    #[tokio::test]
    async fn test_staged_failure_skips_completed_event() {
        let progress = ProgressNotifier::new();
        let mut rx = progress.register("c1").await;

        let result: Result<(), _> = staged(&progress, "c1", Step::Projects, async {
            Err(AnalysisError::ScoreOutOfRange {
                field: "innovation",
                value: 42.0,
            })
        })
        .await;
        assert!(result.is_err());
        drop(progress);

        let first = rx.recv().await.unwrap();
        assert!(matches!(
            first,
            ProgressEvent::StepUpdate {
                status: StepStatus::Processing,
                ..
            }
        ));
        // No completed event follows the failure.
        assert!(rx.recv().await.is_none());
    }
}
