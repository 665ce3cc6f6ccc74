//! Company verification — one reputation-rating call for the employers the
//! experience analyzer extracted.

use crate::ats::models::CompanyVerification;
use crate::ats::prompts::{COMPANY_PROMPT_TEMPLATE, SECTION_SYSTEM};
use crate::ats::AnalysisError;
use crate::llm_client::LlmClient;

/// Average used when the resume names no employers. Sits below the score
/// bonus threshold, so a missing work history neither penalizes nor rewards.
pub const NEUTRAL_COMPANY_RATING: f64 = 5.0;

pub async fn verify_companies(
    llm: &LlmClient,
    companies: &[String],
) -> Result<CompanyVerification, AnalysisError> {
    if companies.is_empty() {
        return Ok(CompanyVerification {
            company_ratings: vec![],
            average_company_rating: NEUTRAL_COMPANY_RATING,
        });
    }

    let prompt = COMPANY_PROMPT_TEMPLATE.replace("{companies}", &companies.join(", "));
    let verification: CompanyVerification = llm.call_json(&prompt, SECTION_SYSTEM).await?;
    Ok(verification)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_company_list_skips_network_call() {
        // A client with a junk key never gets used when the list is empty;
        // any attempted call would fail, so success here proves the skip.
        let llm = LlmClient::new("unused-key".to_string());
        let verification = verify_companies(&llm, &[]).await.unwrap();
        assert!(verification.company_ratings.is_empty());
        assert_eq!(verification.average_company_rating, NEUTRAL_COMPANY_RATING);
    }

    #[test]
    fn test_neutral_rating_is_below_bonus_threshold() {
        assert!(NEUTRAL_COMPANY_RATING < crate::ats::scoring::COMPANY_BONUS_THRESHOLD);
    }

    #[test]
    fn test_company_prompt_embeds_names() {
        let prompt = COMPANY_PROMPT_TEMPLATE.replace("{companies}", "Acme Corp, Globex");
        assert!(prompt.contains("Acme Corp, Globex"));
    }
}
