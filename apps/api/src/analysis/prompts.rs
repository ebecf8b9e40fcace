// Prompt templates for the AI analysis endpoints.
// Placeholders are substituted with `str::replace`; the JSON-only closing line
// is appended by the builders in `ats` and `structure`.

pub const ATS_SCORE_PROMPT: &str = r#"You are an ATS (Applicant Tracking System) expert. Analyze the resume data against the job description and provide an ATS compatibility score.

RESUME DATA:
{resume_data}

JOB DESCRIPTION:
{job_description}

Please analyze and return a JSON response with the following structure:
{
  "score": number (0-100, where 100 is perfect match),
  "missingKeywords": array of important keywords from job description that are missing from resume,
  "suggestions": array of specific suggestions to improve ATS compatibility,
  "notes": string with additional insights about the match
}

Focus on:
- Keyword matching between resume and job requirements
- Skills alignment
- Experience relevance
- Education requirements
- Format and structure compatibility
"#;

pub const AUTO_STRUCTURE_PROMPT: &str = r#"You are a resume expert. Analyze the following career description text and extract structured information for a resume.

INPUT TEXT:
{text}

Please extract and return a JSON response with the following structure:
{
  "summary": string (professional summary/objective, 2-3 sentences),
  "skills": array of technical and soft skills mentioned,
  "experience": array of work experience bullet points (each as a separate string),
  "education": array of education entries (if mentioned),
  "projects": array of project descriptions (if mentioned)
}

Guidelines:
- Keep summary concise and professional
- Extract all relevant skills (technical, tools, soft skills)
- Convert work experience into action-oriented bullet points
- Include education if mentioned (degree, institution, year)
- Include projects if mentioned with descriptions
- Return empty arrays for fields not found in the text
"#;
