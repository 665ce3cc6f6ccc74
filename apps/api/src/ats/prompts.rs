// All LLM prompt constants for the ATS analysis module.
// Templates use `{placeholder}` markers replaced before sending.

/// Shared system prompt for every section analyzer — enforces JSON-only output.
pub const SECTION_SYSTEM: &str = "You are an expert resume reviewer and ATS analyst. \
    Analyze the requested resume section and rate it honestly. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Skills analysis prompt. Replace `{resume_text}`.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Analyze the skills section from this resume text and extract all technical and soft skills mentioned.
Rate the relevance and market demand of these skills on a scale of 1-10.

Resume Text:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["skill1", "skill2"],
  "skillsRelevance": 7,
  "marketDemand": 8,
  "analysis": "detailed analysis"
}"#;

/// Experience analysis prompt. Replace `{resume_text}`.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Analyze the work experience section from this resume text.
Extract company names, job titles, and duration, and assess the quality and relevance of the experience on a scale of 1-10.

Resume Text:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "companies": ["company1", "company2"],
  "positions": ["position1", "position2"],
  "totalExperience": "X years",
  "experienceQuality": 7,
  "analysis": "detailed analysis"
}"#;

/// Projects analysis prompt. Replace `{resume_text}`.
pub const PROJECTS_PROMPT_TEMPLATE: &str = r#"Analyze the projects section from this resume text.
Extract project names, technologies used, and descriptions.
Assess the complexity and relevance of the projects on a scale of 1-10.

Resume Text:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "projects": ["project1", "project2"],
  "technologies": ["tech1", "tech2"],
  "projectQuality": 7,
  "innovation": 6,
  "analysis": "detailed analysis"
}"#;

/// Education analysis prompt. Replace `{resume_text}`.
pub const EDUCATION_PROMPT_TEMPLATE: &str = r#"Analyze the education section from this resume text.
Extract degree, institution, graduation year, and GPA if mentioned.
Assess the quality of the educational background on a scale of 1-10.

Resume Text:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "degree": "degree name",
  "institution": "institution name",
  "graduationYear": "year",
  "gpa": "gpa if mentioned",
  "educationQuality": 7,
  "analysis": "detailed analysis"
}"#;

/// Formatting analysis prompt. Replace `{resume_text}`.
pub const FORMATTING_PROMPT_TEMPLATE: &str = r#"Analyze the formatting and structure of this resume text.
Check for ATS-friendly formatting, readability, and organization, each on a scale of 1-10.

Resume Text:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "atsCompliance": 7,
  "readability": 8,
  "organization": 7,
  "formatting": 8,
  "analysis": "detailed analysis"
}"#;

/// Company verification prompt. Replace `{companies}` with a comma-separated list.
pub const COMPANY_PROMPT_TEMPLATE: &str = r#"Research and verify the reputation and market standing of these companies: {companies}.
Rate each company's reputation on a scale of 1-10 based on their industry standing, size, and recognition.

Return a JSON object with this EXACT schema (no extra fields):
{
  "companyRatings": [
    {"company": "name", "rating": 7, "analysis": "brief analysis"}
  ],
  "averageCompanyRating": 7.0
}"#;

/// Recommendation prompt. Replace `{ats_score}` and `{analysis_json}`.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Based on this ATS analysis with score {ats_score}/100, provide specific recommendations for improvement.

Analysis:
{analysis_json}

Provide 5-7 actionable recommendations. Return a JSON object with this EXACT schema (no extra fields):
{
  "recommendations": [
    {"category": "category", "suggestion": "specific suggestion", "priority": "high"}
  ]
}

"priority" must be exactly one of: "high", "medium", "low"."#;
