// All LLM prompt constants for the workflow nodes. Templates use
// `{placeholder}` substitution; replace every placeholder before sending.

/// System prompt for the scanner — analysis plus JSON-only payload.
pub const SCANNER_SYSTEM: &str = "You analyze resumes and identify weak bullet points.";

/// Scanner prompt template. Replace `{resume}` before sending.
pub const SCANNER_PROMPT_TEMPLATE: &str = r#"You are an expert resume editor. Analyze the resume text below and return JSON with the single weakest bullet point.
The JSON must match: {"text": "...", "missing": "..."}.
Only pick bullets lacking metrics, scope, or impact.
Resume:
{resume}
"#;

/// System prompt for the interviewer.
pub const INTERVIEWER_SYSTEM: &str = "You help extract STAR details.";

/// Interviewer prompt template. Replace `{text}` and `{missing}`.
pub const INTERVIEWER_PROMPT_TEMPLATE: &str = r#"You are preparing candidates for behavioral interviews.
Given the weak bullet below, ask ONE precise question that helps capture the missing detail.
Focus on impact, metrics, scope, or actions.
Bullet: "{text}"
Missing: {missing}
"#;

/// System prompt for the router.
pub const ROUTER_SYSTEM: &str = "You evaluate if more info is required.";

/// Router prompt template. Replace `{question}` and `{answer}`. The reply is
/// expected to contain either DRAFT or FOLLOWUP.
pub const ROUTER_PROMPT_TEMPLATE: &str = r#"Decide if the latest answer has enough detail to draft a STAR bullet.
Answer with one token: DRAFT or FOLLOWUP.
Question: {question}
Answer: {answer}
"#;

/// System prompt for the writer.
pub const WRITER_SYSTEM: &str = "You craft concise STAR bullets.";

/// Writer prompt template. Replace `{text}`, `{missing}`, `{resume}`,
/// `{context}`, and `{answer}`.
pub const WRITER_PROMPT_TEMPLATE: &str = r#"You are rewriting resume bullets into STAR format.
Use the weak bullet, resume context, retrieved evidence, and the candidate's answer to craft a single bullet.
The bullet must:
- Start with an action verb
- Include metrics or clear impact
- Fit within 40 words
Weak bullet: "{text}"
Missing info: {missing}
Resume context:
{resume}
Retrieved notes:
{context}
Candidate answer:
{answer}
"#;
