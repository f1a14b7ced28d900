//! Word-wrapped layout of the portfolio.
//!
//! The document is a flat list of styled rows. Each section occupies a
//! contiguous run of rows, recorded as a [`Span`] so the visibility
//! observer can measure it against the focal band.

use folio_nav::{RegionLayout, SectionList, Span};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::content::{Contact, Education, Experience, Portfolio, Profile, Project, SkillCategory};
use crate::links::Link;
use crate::theme::Role;

/// Narrowest width the layout will wrap to.
pub const MIN_DOC_WIDTH: u16 = 16;

const BULLET: &str = "• ";
const HANG: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub segments: Vec<Segment>,
    /// Clicking the row opens this link.
    pub link: Option<Link>,
}

impl Line {
    fn single(text: impl Into<String>, role: Role) -> Self {
        Self {
            segments: vec![Segment {
                text: text.into(),
                role,
            }],
            link: None,
        }
    }

    /// Concatenated text of every segment.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    regions: Vec<(String, Span)>,
    width: u16,
}

impl Document {
    /// Lay out `portfolio` in `sections` order at `width` columns.
    #[must_use]
    pub fn build(portfolio: &Portfolio, sections: &SectionList, width: u16) -> Self {
        let width = width.max(MIN_DOC_WIDTH);
        let mut out = Builder {
            lines: Vec::new(),
            width: usize::from(width),
        };
        let mut regions = Vec::with_capacity(sections.len());

        for section in sections {
            let top = out.lines.len();
            out.title(&section.label);
            match section.id.as_str() {
                "about" => out.about(&portfolio.profile),
                "experience" => out.experience(portfolio.experience),
                "education" => out.education(portfolio.education),
                "projects" => out.projects(portfolio.projects),
                "skills" => out.skills(portfolio.skills),
                "contact" => out.contact(&portfolio.contact),
                _ => {}
            }
            out.blank();
            let height = out.lines.len() - top;
            regions.push((section.id.clone(), Span::new(top as f64, height as f64)));
        }

        Self {
            lines: out.lines,
            regions,
            width,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Row span of section `index`.
    #[must_use]
    pub fn section_span(&self, index: usize) -> Option<Span> {
        self.regions.get(index).map(|(_, span)| *span)
    }

    /// First row of section `index`, or 0 if there is no such section.
    #[must_use]
    pub fn section_top(&self, index: usize) -> f64 {
        self.section_span(index).map_or(0.0, |s| s.top)
    }

    /// Plain text, one row per line, trailing blanks trimmed.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line.text().trim_end());
            text.push('\n');
        }
        text
    }
}

impl RegionLayout for Document {
    fn region(&self, id: &str) -> Option<Span> {
        self.regions.region(id)
    }
}

struct Builder {
    lines: Vec<Line>,
    width: usize,
}

impl Builder {
    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn title(&mut self, label: &str) {
        let title = label.to_uppercase();
        let rule = "─".repeat(title.width().min(self.width));
        self.lines.push(Line::single(title, Role::SectionTitle));
        self.lines.push(Line::single(rule, Role::Bullet));
        self.blank();
    }

    fn paragraph(&mut self, text: &str, role: Role) {
        for row in wrap(text, self.width) {
            self.lines.push(Line::single(row, role));
        }
    }

    fn bullet(&mut self, text: &str) {
        let inner = self.width.saturating_sub(BULLET.width()).max(1);
        for (i, row) in wrap(text, inner).into_iter().enumerate() {
            let lead = if i == 0 { BULLET } else { HANG };
            self.lines.push(Line {
                segments: vec![
                    Segment {
                        text: lead.to_string(),
                        role: Role::Bullet,
                    },
                    Segment {
                        text: row,
                        role: Role::Body,
                    },
                ],
                link: None,
            });
        }
    }

    fn tags(&mut self, tags: &[&str]) {
        let mut line = Line::default();
        let mut used = 0;
        for tag in tags {
            let chip = truncate(&format!(" {tag} "), self.width);
            let w = chip.width();
            let gap = usize::from(used > 0);
            if used > 0 && used + gap + w > self.width {
                self.lines.push(std::mem::take(&mut line));
                used = 0;
            }
            if used > 0 {
                line.segments.push(Segment {
                    text: " ".to_string(),
                    role: Role::Body,
                });
                used += 1;
            }
            line.segments.push(Segment {
                text: chip,
                role: Role::Tag,
            });
            used += w;
        }
        if !line.segments.is_empty() {
            self.lines.push(line);
        }
    }

    fn about(&mut self, profile: &Profile) {
        for (i, para) in profile.summary.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.paragraph(para, Role::Body);
        }
    }

    fn experience(&mut self, jobs: &[Experience]) {
        for (i, job) in jobs.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.paragraph(&format!("{} · {}", job.role, job.company), Role::Heading);
            self.paragraph(job.period, Role::Meta);
            for highlight in job.highlights {
                self.bullet(highlight);
            }
        }
    }

    fn education(&mut self, schools: &[Education]) {
        for (i, school) in schools.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.paragraph(school.degree, Role::Heading);
            self.paragraph(&format!("{} · {}", school.school, school.period), Role::Meta);
            self.paragraph(school.detail, Role::Body);
        }
    }

    fn projects(&mut self, projects: &[Project]) {
        for (i, project) in projects.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.paragraph(project.name, Role::Heading);
            self.paragraph(project.blurb, Role::Body);
            self.tags(project.tags);
        }
    }

    fn skills(&mut self, categories: &[SkillCategory]) {
        for (i, category) in categories.iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.paragraph(category.name, Role::Heading);
            self.tags(category.skills);
        }
    }

    fn contact(&mut self, contact: &Contact) {
        self.paragraph(contact.note, Role::Body);
        self.blank();
        for (label, link) in [("Email    ", Link::Email), ("LinkedIn ", Link::Profile)] {
            self.lines.push(Line {
                segments: vec![
                    Segment {
                        text: label.to_string(),
                        role: Role::Meta,
                    },
                    Segment {
                        text: link.label(contact).to_string(),
                        role: Role::Link,
                    },
                ],
                link: Some(link),
            });
        }
    }
}

/// Longest prefix of `text` that fits in `width` columns.
fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

/// Greedy word wrap by display width. Words wider than `width` are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_w = 0;

    for word in text.split_whitespace() {
        let word_w = word.width();
        if row_w > 0 && row_w + 1 + word_w <= width {
            row.push(' ');
            row.push_str(word);
            row_w += 1 + word_w;
            continue;
        }
        if row_w > 0 {
            rows.push(std::mem::take(&mut row));
            row_w = 0;
        }
        if word_w <= width {
            row.push_str(word);
            row_w = word_w;
            continue;
        }
        for grapheme in word.graphemes(true) {
            let w = grapheme.width();
            if row_w + w > width && row_w > 0 {
                rows.push(std::mem::take(&mut row));
                row_w = 0;
            }
            row.push_str(grapheme);
            row_w += w;
        }
    }
    if row_w > 0 || rows.is_empty() {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PORTFOLIO, sections};
    use pretty_assertions::assert_eq;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("the quick brown fox", 9), ["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), [""]);
        assert_eq!(wrap("abcdefghij", 4), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_keeps_graphemes_whole() {
        let word = "e\u{301}".repeat(6);
        let rows = wrap(&word, 4);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.starts_with('e')));
    }

    #[test]
    fn wrap_respects_display_width() {
        for row in wrap("日本語のテキストを折り返す", 6) {
            assert!(row.width() <= 6, "{row:?}");
        }
    }

    #[test]
    fn sections_tile_the_document_in_order() {
        let list = sections().unwrap();
        let doc = Document::build(&PORTFOLIO, &list, 60);
        let mut expected_top = 0.0;
        for (i, section) in list.iter().enumerate() {
            let span = doc.region(&section.id).unwrap();
            assert_eq!(span.top, expected_top);
            assert_eq!(doc.section_top(i), span.top);
            let title = doc.line(span.top as usize).unwrap().text();
            assert_eq!(title, section.label.to_uppercase());
            expected_top = span.bottom();
        }
        assert_eq!(expected_top, doc.len() as f64);
    }

    #[test]
    fn no_row_exceeds_width() {
        let list = sections().unwrap();
        for width in [16, 24, 40, 100] {
            let doc = Document::build(&PORTFOLIO, &list, width);
            for line in doc.lines() {
                if line.link.is_none() {
                    assert!(line.text().width() <= usize::from(width), "{:?}", line.text());
                }
            }
        }
    }

    #[test]
    fn narrower_layout_is_taller() {
        let list = sections().unwrap();
        let wide = Document::build(&PORTFOLIO, &list, 100);
        let narrow = Document::build(&PORTFOLIO, &list, 30);
        assert!(narrow.len() > wide.len());
    }

    #[test]
    fn contact_rows_carry_links() {
        let list = sections().unwrap();
        let doc = Document::build(&PORTFOLIO, &list, 80);
        let links: Vec<Link> = doc.lines().filter_map(|l| l.link).collect();
        assert_eq!(links, [Link::Email, Link::Profile]);
    }
}
