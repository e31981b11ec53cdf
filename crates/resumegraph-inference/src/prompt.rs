//! Prompt engineering for triplet proposal

use resumegraph_domain::SectionKind;

/// Build the prompt for the whole-document preparation pass
pub fn build_prepare_prompt(raw_document: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(PREPARE_INSTRUCTIONS);
    prompt.push_str("\n\nRaw resume content:\n---\n");
    prompt.push_str(raw_document);
    prompt.push_str("\n---\n");
    prompt
}

/// Build the proposal prompt for one document section
pub fn build_section_prompt(kind: SectionKind, title: &str, content: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Section type: {}\n", kind));
    if !title.is_empty() {
        prompt.push_str(&format!("Section title: {}\n", title.trim_start_matches('#').trim()));
    }
    prompt.push_str("\nSection content:\n---\n");
    prompt.push_str(content);
    prompt.push_str("\n---\n\n");
    prompt.push_str(OUTPUT_FORMAT_REMINDER);
    prompt
}

/// Build the proposal prompt for a list of specific topics over the whole
/// document
pub fn build_topics_prompt(document: &str, topics: &[String]) -> String {
    let mut prompt = String::new();
    prompt.push_str(EXTRACTION_INSTRUCTIONS);
    prompt.push_str("\n\nExtract triplets ONLY for the following topics:\n");
    for topic in topics {
        prompt.push_str(&format!("- {}\n", topic));
    }
    prompt.push_str("\nIf the document contains nothing about a topic, return no triplets for it.\n");
    prompt.push_str("\nResume content:\n---\n");
    prompt.push_str(document);
    prompt.push_str("\n---\n\n");
    prompt.push_str(OUTPUT_FORMAT_REMINDER);
    prompt
}

const PREPARE_INSTRUCTIONS: &str = r#"Format the raw resume content below into clean markdown.
Fix encoding, spacing, and structure issues. Use `#`-style headings for the
resume's sections. Do not add, remove, or reword any information; focus only
on formatting. Return the formatted resume and nothing else."#;

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract knowledge-graph triplets from the resume content below.
Each triplet is a factual (subject, predicate, object) assertion grounded in the text.

Entity types: PERSON, SKILL, COMPANY, POSITION, EDUCATION, INSTITUTION,
PROJECT, TECHNOLOGY, LOCATION, DATE, ACHIEVEMENT, INDUSTRY, DEPARTMENT.

Relationship types: WORKED_AT, HAS_POSITION, HAS_SKILL, WORKED_ON,
USES_TECHNOLOGY, LOCATED_IN, STUDIED_AT, HAS_DEGREE, ACHIEVED, DURING_PERIOD,
PART_OF, REQUIRES_SKILL, IN_INDUSTRY, COLLABORATED_WITH, MANAGED, CERTIFIED_IN.

Rules:
- Extract specific, concrete entities; avoid generic terms
- Normalize entity names consistently (e.g., "JavaScript" not "javascript")
- Every triplet must be factually supported by the content
- Provide a rich description for each subject, object, and relationship"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "subject": "entity name",
    "predicate": "RELATIONSHIP_TYPE",
    "object": "entity name",
    "subject_type": "ENTITY_TYPE",
    "object_type": "ENTITY_TYPE",
    "subject_description": "context about the subject",
    "object_description": "context about the object",
    "relationship_description": "context about the relationship"
  }
]

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_prompt_includes_kind_and_title() {
        let prompt = build_section_prompt(SectionKind::Experience, "## Work Experience", "text");
        assert!(prompt.contains("Section type: experience"));
        assert!(prompt.contains("Section title: Work Experience"));
        assert!(prompt.contains("text"));
    }

    #[test]
    fn test_section_prompt_omits_empty_title() {
        let prompt = build_section_prompt(SectionKind::Header, "", "Jane Doe");
        assert!(!prompt.contains("Section title:"));
        assert!(prompt.contains("Jane Doe"));
    }

    #[test]
    fn test_section_prompt_includes_format_reminder() {
        let prompt = build_section_prompt(SectionKind::Skills, "## Skills", "Rust");
        assert!(prompt.contains("JSON array only"));
        assert!(prompt.contains("relationship_description"));
    }

    #[test]
    fn test_topics_prompt_lists_topics() {
        let topics = vec!["volunteer work".to_string(), "patents".to_string()];
        let prompt = build_topics_prompt("resume text", &topics);
        assert!(prompt.contains("- volunteer work"));
        assert!(prompt.contains("- patents"));
        assert!(prompt.contains("resume text"));
    }

    #[test]
    fn test_prepare_prompt_contains_document() {
        let prompt = build_prepare_prompt("raw resume");
        assert!(prompt.contains("raw resume"));
        assert!(prompt.contains("clean markdown"));
    }
}
