//! Document sections produced by segmentation

use std::fmt;

/// The recognized section categories of a resume document
///
/// `Header` is synthetic: it collects content appearing before the first
/// recognized heading. `Other` covers headings that match none of the known
/// synonym tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Content before the first heading (name, contact block, etc.)
    Header,
    /// Professional summary / objective / profile
    Summary,
    /// Work experience / employment history
    Experience,
    /// Education and academic background
    Education,
    /// Skills and technologies
    Skills,
    /// Personal or professional projects
    Projects,
    /// Certifications and licenses
    Certifications,
    /// Awards, honors, accomplishments
    Achievements,
    /// Spoken/written languages
    Languages,
    /// Contact details under an explicit heading
    Contact,
    /// Any heading not covered by the tables above
    Other,
}

impl SectionKind {
    /// Stable lowercase name, used in logs and inference context
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Achievements => "achievements",
            SectionKind::Languages => "languages",
            SectionKind::Contact => "contact",
            SectionKind::Other => "other",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ordered, typed slice of a segmented document
///
/// `title` is the raw heading line exactly as it appeared in the source
/// (empty for the synthetic `Header` section); `content` is the joined lines
/// that followed it. Sections are immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Category of this section
    pub kind: SectionKind,

    /// The raw heading line that opened this section, empty for `Header`
    pub title: String,

    /// Lines belonging to this section, joined with newlines
    pub content: String,
}

impl Section {
    /// Create a section
    pub fn new(kind: SectionKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Heading text with markdown markers stripped, for display and prompts
    ///
    /// # Examples
    ///
    /// ```
    /// use resumegraph_domain::{Section, SectionKind};
    ///
    /// let s = Section::new(SectionKind::Experience, "## Work Experience", "...");
    /// assert_eq!(s.heading_text(), "Work Experience");
    /// ```
    pub fn heading_text(&self) -> &str {
        self.title.trim_start_matches('#').trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(SectionKind::Experience.as_str(), "experience");
        assert_eq!(SectionKind::Header.as_str(), "header");
        assert_eq!(format!("{}", SectionKind::Skills), "skills");
    }

    #[test]
    fn test_heading_text_strips_markers() {
        let s = Section::new(SectionKind::Skills, "### Technical Skills  ", "Rust");
        assert_eq!(s.heading_text(), "Technical Skills");
    }

    #[test]
    fn test_heading_text_empty_for_header() {
        let s = Section::new(SectionKind::Header, "", "Jane Doe");
        assert_eq!(s.heading_text(), "");
    }
}
