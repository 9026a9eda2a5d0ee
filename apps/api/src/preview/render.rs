//! Projection of a `ResumeRecord` into the printable layout.
//!
//! Section visibility is decided by the first entry alone: a repeated section
//! is rendered only when it has entries and its first entry's primary field
//! is non-empty. A blank first entry hides the section even when later
//! entries hold data. Once shown, every entry is rendered and blank single-line
//! fields fall back to placeholder labels; multi-line text renders as-is.

use serde::Serialize;

use crate::models::resume::{ResumeRecord, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewSectionKind {
    Summary,
    Education,
    Experience,
    Volunteer,
    Extracurriculars,
    Projects,
    Skills,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewHeader {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
}

/// One entry laid out as two rows: heading with an aside on the right, then
/// an italic subheading with its own aside, then free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviewItem {
    pub heading: String,
    pub heading_aside: Option<String>,
    pub subheading: Option<String>,
    pub subheading_aside: Option<String>,
    /// `None` when the section has no multi-line field; `Some("")` when it has
    /// one and it is blank.
    pub body: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSection {
    pub kind: PreviewSectionKind,
    pub title: &'static str,
    /// Paragraph content for Summary and Skills.
    pub text: Option<String>,
    pub items: Vec<PreviewItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewDocument {
    pub header: PreviewHeader,
    pub sections: Vec<PreviewSection>,
}

#[cfg(test)]
impl PreviewDocument {
    pub fn section(&self, kind: PreviewSectionKind) -> Option<&PreviewSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn is_visible(record: &ResumeRecord, section: Section) -> bool {
    record
        .first_primary(section)
        .is_some_and(|primary| !primary.is_empty())
}

fn paragraph(kind: PreviewSectionKind, title: &'static str, text: &str) -> Option<PreviewSection> {
    non_empty(text).map(|text| PreviewSection {
        kind,
        title,
        text: Some(text),
        items: Vec::new(),
    })
}

fn education(record: &ResumeRecord) -> Vec<PreviewItem> {
    record
        .education
        .iter()
        .map(|e| PreviewItem {
            heading: or_placeholder(&e.degree, "Degree"),
            heading_aside: Some(or_placeholder(&e.date, "Date")),
            subheading: Some(or_placeholder(&e.institution, "Institution")),
            ..Default::default()
        })
        .collect()
}

fn experience(record: &ResumeRecord) -> Vec<PreviewItem> {
    record
        .experience
        .iter()
        .map(|e| PreviewItem {
            heading: or_placeholder(&e.title, "Job Title"),
            heading_aside: Some(or_placeholder(&e.dates, "Dates")),
            subheading: Some(or_placeholder(&e.company, "Company")),
            subheading_aside: Some(or_placeholder(&e.location, "Location")),
            body: Some(e.responsibilities.clone()),
            link: None,
        })
        .collect()
}

fn volunteer(record: &ResumeRecord) -> Vec<PreviewItem> {
    record
        .volunteer
        .iter()
        .map(|v| PreviewItem {
            heading: or_placeholder(&v.role, "Volunteer Role"),
            heading_aside: Some(or_placeholder(&v.dates, "Dates")),
            subheading: Some(or_placeholder(&v.organization, "Organization")),
            subheading_aside: Some(or_placeholder(&v.location, "Location")),
            body: Some(v.description.clone()),
            link: None,
        })
        .collect()
}

fn extracurriculars(record: &ResumeRecord) -> Vec<PreviewItem> {
    record
        .extracurriculars
        .iter()
        .map(|a| PreviewItem {
            heading: or_placeholder(&a.name, "Activity Name"),
            subheading: Some(or_placeholder(&a.role, "Role")),
            body: Some(a.description.clone()),
            ..Default::default()
        })
        .collect()
}

fn projects(record: &ResumeRecord) -> Vec<PreviewItem> {
    record
        .projects
        .iter()
        .map(|p| PreviewItem {
            heading: or_placeholder(&p.name, "Project Name"),
            body: Some(p.description.clone()),
            link: non_empty(&p.link),
            ..Default::default()
        })
        .collect()
}

type ItemsFn = fn(&ResumeRecord) -> Vec<PreviewItem>;

pub fn render(record: &ResumeRecord) -> PreviewDocument {
    let header = PreviewHeader {
        name: or_placeholder(&record.full_name, "Your Name"),
        email: or_placeholder(&record.email, "your.email@example.com"),
        phone: or_placeholder(&record.phone, "(123) 456-7890"),
        website: non_empty(&record.website),
    };

    let repeated: [(Section, PreviewSectionKind, &'static str, ItemsFn); 5] = [
        (Section::Education, PreviewSectionKind::Education, "Education", education),
        (Section::Experience, PreviewSectionKind::Experience, "Experience", experience),
        (
            Section::Volunteer,
            PreviewSectionKind::Volunteer,
            "Volunteer Experience",
            volunteer,
        ),
        (
            Section::Extracurriculars,
            PreviewSectionKind::Extracurriculars,
            "Extracurricular Activities",
            extracurriculars,
        ),
        (Section::Projects, PreviewSectionKind::Projects, "Projects", projects),
    ];

    let mut sections = Vec::new();
    sections.extend(paragraph(PreviewSectionKind::Summary, "Summary", &record.summary));
    for (section, kind, title, items) in repeated {
        if is_visible(record, section) {
            sections.push(PreviewSection {
                kind,
                title,
                text: None,
                items: items(record),
            });
        }
    }
    sections.extend(paragraph(PreviewSectionKind::Skills, "Skills", &record.skills));

    PreviewDocument { header, sections }
}
