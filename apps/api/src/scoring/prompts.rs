// Scoring prompt templates. Placeholders are filled in a single pass, so
// substituted values are never re-expanded.

use crate::llm_client::truncate_chars;

/// Bumped whenever the rubric or schema wording changes. Stored with results.
pub const PROMPT_VERSION: &str = "1.0";

/// How much of a bad response is echoed back in the repair prompt.
pub const REPAIR_EXCERPT_LIMIT: usize = 2000;

pub const SCHEMA_SKELETON: &str = r#"{
  "overall_score": <0-100 integer>,
  "metrics": {
    "clarity": <0-100 integer>,
    "impact": <0-100 integer>,
    "professionalism": <0-100 integer>,
    "role_fit": <0-100 integer>,
    "ats": <0-100 integer>
  },
  "missing_keywords": [<array of strings>],
  "strengths": [<array of strings>],
  "top_fixes": [<array of strings>],
  "section_feedback": [
    {
      "section": "<Experience|Projects|Skills|Education|Summary|Other>",
      "score": <0-100 integer>,
      "feedback": [<array of strings>],
      "rewrites": [
        {
          "original": "<string>",
          "improved": "<string>"
        }
      ]
    }
  ],
  "notes": "<string>"
}"#;

pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an expert resume reviewer and recruiter. Analyze the following resume for a {role} position at {company}.

Return compact JSON only.
Use short strings; no paragraphs.
Limit each list to max 5 items.
If unsure, return best guess but keep JSON valid.

Resume Text:
---
{resume_text}
---

Provide a comprehensive analysis and scoring. Output MUST be valid JSON matching this exact schema (no markdown, no code blocks, just raw JSON):

{schema}

Scoring Guidelines:
- overall_score: Weighted average considering all factors, emphasis on role_fit
- clarity: How clear and easy to understand (formatting, structure, readability)
- impact: Use of metrics, quantifiable achievements, strong action verbs
- professionalism: Appropriate tone, grammar, consistency, no errors
- role_fit: Alignment with {role} requirements and {company} culture
- ats: ATS-friendly formatting, keyword usage, parseability

Requirements:
- All scores must be integers 0-100
- missing_keywords: 5-10 relevant technical/keywords missing for this role
- strengths: 3-5 specific strengths
- top_fixes: 3-5 highest-impact improvements
- section_feedback: Analyze 3-6 major sections (Experience, Projects, Skills, Education, Summary, etc.)
- rewrites: Include 2-4 example bullet rewrites per section; "original" is exact text from the resume, "improved" adds quantifiable impact
- notes: Brief executive summary, max 200 characters

Return ONLY valid JSON, no other text."#;

pub const REPAIR_PROMPT_TEMPLATE: &str = r#"The previous JSON output was invalid. Fix it to be valid JSON matching this exact schema:

{schema}

Previous invalid output:
{invalid_output}

Return ONLY valid JSON, no markdown, no code blocks, just raw JSON:"#;

/// Fills `{name}` placeholders in one left-to-right pass. Values are emitted
/// verbatim and never rescanned; unknown `{...}` runs are kept as written.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = values.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Renders the first-attempt scoring prompt.
pub fn build_scoring_prompt(resume_text: &str, company: &str, role: &str) -> String {
    render(
        SCORING_PROMPT_TEMPLATE,
        &[
            ("schema", SCHEMA_SKELETON),
            ("role", role),
            ("company", company),
            ("resume_text", resume_text),
        ],
    )
}

/// Renders the repair prompt around the first `REPAIR_EXCERPT_LIMIT`
/// characters of the unparseable output.
pub fn build_repair_prompt(invalid_output: &str) -> String {
    let excerpt = truncate_chars(invalid_output, REPAIR_EXCERPT_LIMIT);
    render(
        REPAIR_PROMPT_TEMPLATE,
        &[("schema", SCHEMA_SKELETON), ("invalid_output", excerpt.as_str())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_prompt_embeds_inputs_and_schema() {
        let prompt = build_scoring_prompt(
            "Senior backend engineer, 5 years Go",
            "Acme",
            "Staff Engineer",
        );
        assert!(prompt.contains("for a Staff Engineer position at Acme"));
        assert!(prompt.contains("---\nSenior backend engineer, 5 years Go\n---"));
        assert!(prompt.contains("Alignment with Staff Engineer requirements and Acme culture"));
        assert!(prompt.contains(SCHEMA_SKELETON));
        assert!(!prompt.contains("{role}"));
        assert!(!prompt.contains("{schema}"));
    }

    #[test]
    fn test_scoring_prompt_is_deterministic() {
        let a = build_scoring_prompt("text", "Acme", "SRE");
        let b = build_scoring_prompt("text", "Acme", "SRE");
        assert_eq!(a, b);
    }

    #[test]
    fn test_resume_text_placeholders_are_not_expanded() {
        let prompt = build_scoring_prompt("I wrote {company} templates", "Acme", "SRE");
        assert!(prompt.contains("I wrote {company} templates"));
    }

    #[test]
    fn test_role_and_company_placeholders_are_kept_verbatim() {
        let prompt = build_scoring_prompt(
            "RESUME_BODY",
            "Acme {schema}",
            "Lead {company} {resume_text}",
        );
        assert!(
            prompt.contains("for a Lead {company} {resume_text} position at Acme {schema}.")
        );
        assert!(prompt.contains("Alignment with Lead {company} {resume_text} requirements"));
        assert_eq!(prompt.matches("RESUME_BODY").count(), 1);
        assert_eq!(prompt.matches(SCHEMA_SKELETON).count(), 1);
    }

    #[test]
    fn test_resume_text_is_not_rescanned_for_role() {
        let prompt = build_scoring_prompt("Led the {role} guild", "Acme", "SRE");
        assert!(prompt.contains("---\nLed the {role} guild\n---"));
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed_braces() {
        assert_eq!(render("{a} {b} {a", &[("a", "x")]), "x {b} {a");
        assert_eq!(render("{{a}}", &[("a", "x")]), "{x}");
        assert_eq!(render("no braces", &[("a", "x")]), "no braces");
    }

    #[test]
    fn test_repair_prompt_embeds_invalid_output() {
        let prompt = build_repair_prompt("{not json");
        assert!(prompt.contains("Previous invalid output:\n{not json\n"));
        assert!(prompt.contains(SCHEMA_SKELETON));
    }

    #[test]
    fn test_repair_prompt_truncates_to_limit() {
        let invalid = format!("{}{}", "a".repeat(REPAIR_EXCERPT_LIMIT), "TAIL");
        let prompt = build_repair_prompt(&invalid);
        assert!(prompt.contains(&"a".repeat(REPAIR_EXCERPT_LIMIT)));
        assert!(!prompt.contains("TAIL"));
    }
}
