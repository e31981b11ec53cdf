//! Split a formatted document into ordered, typed sections

use resumegraph_domain::{Section, SectionKind};

/// Synonym stems for classifying heading lines, checked in order.
///
/// A stem matches when any word of the heading starts with it; multi-word
/// entries match as phrases against the whole lowercased heading.
const SYNONYM_TABLES: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Summary,
        &["summary", "objective", "profile", "about"],
    ),
    (
        SectionKind::Experience,
        &["experience", "employment", "work", "career", "professional background"],
    ),
    (
        SectionKind::Education,
        &["education", "academic", "qualification", "degree", "studies"],
    ),
    (
        SectionKind::Certifications,
        &["certification", "certificate", "licens", "course"],
    ),
    (
        SectionKind::Skills,
        &["skill", "technolog", "competenc", "expertise", "proficienc"],
    ),
    (SectionKind::Projects, &["project", "portfolio"]),
    (
        SectionKind::Achievements,
        &["achievement", "award", "honor", "accomplishment"],
    ),
    (SectionKind::Languages, &["language"]),
    (SectionKind::Contact, &["contact"]),
];

/// Split `document` into ordered sections on markdown headings
///
/// Every line of the input lands in exactly one section: content before the
/// first heading goes into a synthetic `header` section, each heading line
/// becomes the title of the section it opens, and a heading that matches no
/// synonym table still opens a section (of kind `Other`). Empty input yields
/// no sections.
///
/// # Examples
///
/// ```
/// use resumegraph_extractor::segment;
/// use resumegraph_domain::SectionKind;
///
/// let sections = segment("Jane Doe\n## Experience\nEngineer at Acme");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].kind, SectionKind::Header);
/// assert_eq!(sections[1].kind, SectionKind::Experience);
/// ```
pub fn segment(document: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(SectionKind, String, Vec<&str>)> = None;

    for line in document.lines() {
        if is_heading(line) {
            if let Some((kind, title, lines)) = current.take() {
                sections.push(Section::new(kind, title, lines.join("\n")));
            }
            let kind = classify(heading_text(line));
            current = Some((kind, line.to_string(), Vec::new()));
        } else {
            match &mut current {
                Some((_, _, lines)) => lines.push(line),
                None => current = Some((SectionKind::Header, String::new(), vec![line])),
            }
        }
    }

    if let Some((kind, title, lines)) = current.take() {
        sections.push(Section::new(kind, title, lines.join("\n")));
    }

    sections
}

/// Whether a line is a markdown heading (`#` run followed by whitespace or
/// nothing)
fn is_heading(line: &str) -> bool {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('#') {
        return false;
    }
    let rest = trimmed.trim_start_matches('#');
    rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')
}

fn heading_text(line: &str) -> &str {
    line.trim_start().trim_start_matches('#').trim()
}

/// Map a heading's text to a section kind via the synonym tables
fn classify(heading: &str) -> SectionKind {
    let normalized = heading.to_lowercase();
    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    for (kind, stems) in SYNONYM_TABLES {
        let matched = stems.iter().any(|stem| {
            if stem.contains(' ') {
                normalized.contains(stem)
            } else {
                words.iter().any(|word| word.starts_with(stem))
            }
        });
        if matched {
            return *kind;
        }
    }

    SectionKind::Other
}
