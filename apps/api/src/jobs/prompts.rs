// All LLM prompt constants for the job-search module.

/// System prompt shared by both job-search LLM stages — enforces JSON-only output.
pub const JOBS_SYSTEM: &str = "You are an expert job search analyst and matching specialist. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Query refinement prompt. Replace `{job_title}`, `{work_mode}`, `{location}`.
pub const REFINE_PROMPT_TEMPLATE: &str = r#"Process the following job search criteria and provide structured, optimized search parameters.

Job Title: {job_title}
Work Mode: {work_mode}
Location: {location}

Tasks:
1. Analyze and refine the job title to include relevant keywords and synonyms
2. Validate and format the work mode preference
3. Extract city and country from the location
4. Suggest additional relevant job titles based on the input

Return a JSON object with this EXACT schema (no extra fields):
{
  "optimizedJobTitle": "primary job title",
  "alternativeJobTitles": ["alternative1", "alternative2"],
  "workMode": "formatted work mode",
  "city": "city name",
  "country": "country name",
  "searchKeywords": ["keyword1", "keyword2", "keyword3"]
}"#;

/// Result re-ranking prompt.
/// Replace `{job_title}`, `{work_mode}`, `{location}`, `{job_listings}`.
pub const RANK_PROMPT_TEMPLATE: &str = r#"Analyze the following job listings and optimize them for the user's search criteria.

User Requirements:
- Job Title: {job_title}
- Work Mode: {work_mode}
- Location: {location}

Job Listings:
{job_listings}

Tasks:
1. Score each job based on relevance to the user requirements (0-100)
2. Rank the jobs by relevance score
3. Return the jobs with their relevance scores

Return a JSON ARRAY (starting with [ and ending with ]) of job objects, each with this EXACT schema:
[
  {
    "id": "job_id",
    "title": "job title",
    "company": "company name",
    "location": "location",
    "description": "description",
    "salary": "salary",
    "workMode": "work mode",
    "url": "application url",
    "postedDate": "date",
    "relevanceScore": 85,
    "isRemote": false,
    "logo": null
  }
]"#;
