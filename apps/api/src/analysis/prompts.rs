// LLM prompt templates for resume analysis.
// Templates are rendered with `llm_client::prompts::render_template`.

/// Fixed system instruction sent with every analysis call.
pub const ANALYSIS_SYSTEM: &str = "You are an advanced AI interviewer that analyzes resumes against job descriptions. \
    Your task is to provide a detailed analysis of a candidate's resume in JSON format according to the prompt specifications. \
    Focus on extracting accurate information, providing fair assessments, and generating relevant interview questions. \
    Always ensure your output is well-structured and contains only valid JSON.";

/// Inserted only when the required experience is positive. Replace `{years}`.
pub const EXPERIENCE_INSTRUCTION: &str = "The role requires {years} years of experience. \
    Use this as a benchmark when evaluating the candidate's qualifications and providing scores.";

/// Inserted when an explicit or derived skill list is available. Replace `{skills}`
/// with the quoted, comma-separated skill names.
pub const SKILL_LIST_INSTRUCTION: &str =
    "Evaluate the following specific skills from the provided list: [{skills}].";

/// Inserted when no skill list is available.
pub const SKILL_SELF_DERIVE_INSTRUCTION: &str = "Since no specific skill list was provided, \
    analyze the job description to identify the top 5 skills needed for this role at the required experience level.";

/// System instruction for the top-skills side call.
pub const SKILL_EXTRACTION_SYSTEM: &str = "You are a skill extraction expert. \
    Extract only the skills from the job description and return them as a list.";

/// Top-skills prompt. Replace `{job_description}`.
pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract the top 5 most important technical and professional skills from this job description.
Return only a JSON list of strings with no additional text or formatting, for example ["Python", "SQL"].

JOB DESCRIPTION:
{job_description}"#;

/// Resume analysis prompt. Replace: {resume_text}, {job_description},
/// {experience_instruction}, {skill_instruction}.
///
/// The schema and rules below are guidance for the model only. Nothing checks the
/// reply against them; it is passed through as opaque JSON.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r##"Analyze this resume for professional role suitability, focusing on qualifications, skills, and potential concerns:

RESUME: {resume_text}

JOB DESCRIPTION: {job_description}
{experience_instruction}
{skill_instruction}

Generate JSON output in this flattened structure:

{
  "quick_summary": [
    "Concise point 1 about candidate (≤15 words)",
    "Concise point 2 about candidate (≤15 words)",
    "Concise point 3 about candidate (≤15 words)",
    "Concise point 4 about candidate (≤15 words)",
    "Concise point 5 about candidate (≤15 words)"
  ],

  "key_projects": [
    {
      "name": "Project Name",
      "duration": "X months",
      "scope": "team size/org size impacted",
      "contribution": "specific role/responsibility",
      "impact": "measurable outcome"
    }
  ],

  "validated_skills": {
    "technical": ["verified tool/technology 1", "verified tool/technology 2"],
    "functional": ["domain-specific skill 1", "domain-specific skill 2"],
    "leadership": ["management/strategy skill 1", "management/strategy skill 2"]
  },

  "unverified_skills": ["skill without evidence 1", "skill without evidence 2"],

  "scoring": {
    "resume_score": 85,
    "knowledge_score": 80,
    "jd_compatibility_score": 75,
    "overall_score": 78
  },

  "skill_evaluation": {
    "skills": [
      {
        "skill_name": "Python",
        "match_score": 90,
        "remark": "Strong evidence of advanced Python usage in multiple projects"
      },
      {
        "skill_name": "SQL",
        "match_score": 70,
        "remark": "Basic SQL knowledge demonstrated but lacks advanced application"
      }
    ],
    "overall_skill_score": 80,
    "top_missing_skills": ["skill from JD not found in resume 1", "skill from JD not found in resume 2"],
    "Overall_remarks": "Concise overall skills conclusion about the candidate's fit for the role",
  },

  "overall_assessment": {
    "knowledge_score": 85,
    "communication_score": 75,
    "keywords_matched_score": 75,
    "remarks": "Concise overall conclusion about the candidate's fit for the role",
    "overall_score": 80
  },

  "green_flags": {
    "experience_strengths": [
      {
        "type": "CAREER_PROGRESSION | TENURE | PROMOTIONS",
        "details": "Specific strength details"
      }
    ],
    "skill_mastery": [
      {
        "type": "TECHNICAL_DEPTH | DOMAIN_EXPERTISE",
        "details": "Specific skill details"
      }
    ],
    "achievement_highlights": [
      {
        "type": "IMPACT | INNOVATION | SCALE",
        "details": "Specific achievement details"
      }
    ],
    "cultural_fit": [
      {
        "type": "VALUES_ALIGNMENT | COLLABORATION | LEADERSHIP",
        "details": "Specific cultural fit details"
      }
    ],
    "certifications": [
      {
        "type": "TECHNICAL | DOMAIN | LEADERSHIP",
        "details": "Certification details"
      }
    ],
    "other_strengths": [
      {
        "type": "UNIQUE_POSITIVE_ATTRIBUTE",
        "details": "Other positive attribute not falling in above categories"
      }
    ]
  },
  "red_flags": {
    "employment_concerns": [
      {
        "type": "Job Hopping",
        "reason": "3 technical roles less than 18 months - risk for deep expertise",
        "details": "Frontend Developer (8mo), UX Engineer (11mo), Fullstack (14mo)"
      }
    ],
    "achievement_concerns": [
      {
        "type": "Metric Gap",
        "reason": "Team leadership claims lack team size/metrics",
        "example": "Led cross-functional team' without scope details"
      }
    ],
    "skill_concerns": [
      {
        "type": "Obsolete Skills",
        "reason": "Cloud skills outdated - last AWS project 3 years ago",
        "skill": "AWS",
        "evidence": "Last cloud-related project ended 2021"
      }
    ],
    "other_concerns": [
      {
        "type": "Cultural risk",
        "reason": "No collaboration evidence in team-based roles",
        "details": "All projects described as individual contributions"
      }
    ]
  },
  "selection_decision": {
    "selected": true/false,
    "reason": "Precise reasoning for selection/rejection decision based on professional recruiter analysis"
  }
}

Analysis Rules:
1. Quick Summary Generation:
   - Create 5-6 bullet points, each ≤15 words
   - Focus on most relevant qualifications for the job description
   - Include mix of experience, skills, achievements and unique selling points
   - Ensure points are specific and evidence-based, not generic
   - Format for easy scanning by hiring managers

2. Scoring System:
   - Resume Score (out of 100): Quality of resume presentation, clarity, quantification of achievements
   - Knowledge Score (out of 100): Technical and domain expertise based on experience and projects
   - JD Compatibility Score (out of 100): Match between resume and job description requirements
   - Overall Score: Weighted average considering JD compatibility (40%), knowledge (30%), resume quality (30%)

3. Experience Analysis:
   - Calculate only full-time professional experience
   - Part-time roles: Count at 50% of full-time equivalent
   - Internships: Include only if post-graduate or 6+ months duration
   - Identify clear progression through role complexity (junior → mid → senior → lead → management)
   - Extract achievements with quantifiable metrics using this format: "Achieved [X%/amount] [improvement/increase/decrease] in [specific metric] by [specific action]"
   - Standardize tenure calculation (e.g., "2 years 3 months" not "27 months")
   - When dates are month/year only, assume employment began on the 1st of the month
   - Compare actual experience against required experience level for the role

4. Skill Evaluation:
   - For each skill listed in skill_list or extracted from JD:
     - Assign score (0-100) based on evidence in resume
     - Provide brief remark explaining score rationale
     - Calculate overall skill score as weighted average (essential skills weighted higher)
   - List skills from JD not found in resume as "top_missing_skills"
   - Score breakdown: 0-30 (mentioned), 31-60 (some experience), 61-85 (proficient), 86-100 (expert)
   - Overall Remarks: Concise conclusion about candidate's overall skill fit for the role based on skills

5. Overall Assessment:
   - Knowledge Score: Based on depth of experience and skill mastery
   - Communication Score: Quality of resume presentation and impact articulation
   - Keywords Matched Score: Key terms appearing in both resume and job description
   - Remarks: Concise conclusion about candidate's fit for the role
   - Overall Score: Comprehensive evaluation considering all factors

6. Project Evaluation:
   - Categorize scope: Individual (1 person) < Team (2-10) < Cross-functional (11-50) < Enterprise (50+)
   - Verify claimed impact against role level and project duration
   - For each project, identify at least one specific contribution and one measurable outcome
   - Flag projects with impact claims disproportionate to role seniority (e.g., entry-level claiming enterprise-wide impact)
   - Require time-bound project descriptions with clear start/end dates or durations

7. Skill Validation:
   - Technical: Must have supporting project/role evidence showing practical application
   - Functional: Match against industry standard requirements; require evidence of practical application
   - Leadership: Require team size/budget/scope mentions to validate management experience
   - Only include skills in "validated_skills" when there is clear evidence of application
   - Categorize skill levels based on evidence: Beginner (mentioned/coursework), Intermediate (1-2 applications), Advanced (3+ applications/leadership)

8. Red Flag Detection:
   - Job Hopping: Flag if a candidate has 3+ distinct roles with durations under 18 months each, excluding cases where the roles represent internal progression within a single company or legitimate transitions (e.g., internships converting to full-time positions)
   - Overlaps: Flag any instance where roles overlap for more than 1 month concurrently
   - Gaps: Flag any unexplained employment gap lasting more than 6 months
   - Skill Mismatch: Flag claims of expert-level proficiency that lack supporting evidence from project work or role responsibilities
   - Downgrade: Flag any move to a less senior role without clear explanation (e.g., Director → Manager)
   - Objective criteria for "vague claims": No specific metrics, no clear scope definition, no description of personal contribution
   - Other Concerns: Include any other red flags not falling into the above categories
   - Format reasons as: [Observable Pattern] + [Specific Risk] + [Decision Impact]
      - Examples for reasons:
        - "5-year gap in technical roles - hard skill currency risk"
        - "Python claims only in education - no production evidence"
        - "Startup experience only - may lack enterprise process knowledge"
        - "Manager title with no reports listed - scope inflation risk"
        - "Certifications without implementation - theoretical knowledge only"
        - "Consistent individual contributor - leadership readiness unclear"

   - Include mitigation guidance:
     - "interview_focus": Specific area to probe
     - "development_needed": Required training/certification
     - "verification_required": Documents to request
     - "comparative_risk": How this compares to other candidates

   - Severity tied to role requirements:
     - HIGH: Core requirement deficiency
     - MEDIUM: Secondary skill gap
     - LOW: Nice-to-have missing

    - Follow Question Design rules for red flags related interview questions generation

9. Green Flag Detection:
   - Career Progression: Flag consistent upward mobility with increasing responsibility (clear title progression)
   - Technical Depth: Validate expertise with multiple projects (3+) using same technology stack
   - High Impact: Identify achievements with measurable business impact (must include specific metrics)
   - Cultural Indicators: Note volunteer work, mentoring, or community contributions with specific details
   - Certifications: Highlight role-relevant certifications with practical application evidence
   - Include ONLY strengths with concrete evidence (not aspirational or general statements)
   - Other Strengths: Include any other positive attributes not falling into the above categories

10. Consistency Check:
    - IMPORTANT: Ensure green flags and red flags do not contradict each other. The same attribute cannot be both a strength and a concern.
    - For career trajectory: If "career progression" is listed as a green flag, there should not be "downgrade" as a red flag.
    - For skills: If a skill is listed in "validated_skills", it should not appear in "skill_concerns".
    - For achievements: If listed in "notable_achievements", they should not appear in "achievement_concerns".
    - When in doubt, categorize an element as either a green flag OR a red flag, not both.
    - Review all outputs for logical consistency before finalizing

11. Edge Case Handling:
    - Career Transitions: Consider intentional industry/function changes when evaluating progression
    - Freelance/Consulting: Count consistent client work as stable employment (with evidence of continuing clients)
    - Education Gaps: Do not penalize gaps explained by full-time education
    - Recent Graduates: Adjust expectations for early-career candidates (less than 3 years experience)
    - Founder/Entrepreneur: Evaluate based on company milestones rather than traditional progression
    - Industry-Specific: Adjust expectations for industries with known high turnover (e.g., startups, agencies)
    - Career Breaks: Consider parental leave, health issues, or care responsibilities with appropriate context

12. Missing Information Handling:
    - For missing dates: Note as a data quality issue rather than a red flag
    - For ambiguous titles: Base analysis on responsibilities described rather than title alone
    - For missing metrics: Flag as an achievement concern if senior-level role (5+ years experience)
    - For incomplete employment records: Note limitations in analysis
    - Required fields: If any of these are missing, explicitly note limitation: current role, tenure, and at least one achievement

13. Context-Aware Analysis:
    - Consider industry norms when evaluating tenure (e.g., 2 years in tech startups may be normal)
    - Adjust expectations based on career stage (early/mid/senior/executive)
    - For highly specialized roles, focus on depth rather than breadth of experience
    - Consider geographic context for employment patterns and role expectations
    - Compare experience to typical industry benchmarks rather than absolute standards

14. Selection Decision Guidelines:
    - Selection is a binary decision (true/false) representing whether to advance the candidate
    - The decision should be a professional judgment weighing both qualifications and concerns
    - Consider critical thresholds:
      - TRUE: Minimum overall score of 75+ AND no HIGH severity red flags in core requirements
      - FALSE: Overall score below 65 OR multiple HIGH severity red flags in essential areas
      - BORDERLINE (65-74): Decision based on balance of green flags vs. red flags and market conditions
    - The reason must be precise, specific to this candidate, and reflect professional recruiter judgment
    - Format reason as a clear, objective statement that could be defended to hiring managers
    - Reason should reference specific strengths/concerns from the analysis that drove the decision
    - Decision should consider role requirements, company culture, and market conditions
    - If borderline, err on side of inclusion only if specific green flags outweigh red flags"##;
