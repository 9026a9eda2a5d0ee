use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Unknown resume field '{0}'")]
    UnknownField(String),

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("Section '{section}' has no field '{field}'")]
    UnknownEntryField { section: Section, field: String },

    #[error("Index {index} is out of range for section '{section}' (length {len})")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Field and section identifiers
// ────────────────────────────────────────────────────────────────────────────

/// The free-text, single-valued fields of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    FullName,
    Email,
    Phone,
    Website,
    Summary,
    Skills,
}

impl ScalarField {
    pub const ALL: [ScalarField; 6] = [
        ScalarField::FullName,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Website,
        ScalarField::Summary,
        ScalarField::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::FullName => "fullName",
            ScalarField::Email => "email",
            ScalarField::Phone => "phone",
            ScalarField::Website => "website",
            ScalarField::Summary => "summary",
            ScalarField::Skills => "skills",
        }
    }

    pub fn parse(name: &str) -> Result<Self, EditError> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| EditError::UnknownField(name.to_string()))
    }
}

/// The repeated sections of a resume. Each holds an ordered list of entries
/// with a fixed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Education,
    Experience,
    Volunteer,
    Extracurriculars,
    Projects,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Education,
        Section::Experience,
        Section::Volunteer,
        Section::Extracurriculars,
        Section::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Volunteer => "volunteer",
            Section::Extracurriculars => "extracurriculars",
            Section::Projects => "projects",
        }
    }

    pub fn parse(name: &str) -> Result<Self, EditError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name)
            .ok_or_else(|| EditError::UnknownSection(name.to_string()))
    }

    /// Field names of one entry, in form order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Section::Education => EducationEntry::FIELDS,
            Section::Experience => ExperienceEntry::FIELDS,
            Section::Volunteer => VolunteerEntry::FIELDS,
            Section::Extracurriculars => ExtracurricularEntry::FIELDS,
            Section::Projects => ProjectEntry::FIELDS,
        }
    }

    /// The field whose emptiness in the first entry hides the whole section
    /// in the preview.
    pub fn primary_field(&self) -> &'static str {
        self.fields()[0]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section entries
// ────────────────────────────────────────────────────────────────────────────

/// One entry of a repeated section. `Default` is the blank template.
/// The first name in `FIELDS` is the entry's primary field.
pub trait SectionEntry: Default + Clone {
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;

    fn primary(&self) -> &str {
        self.field(Self::FIELDS[0]).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub date: String,
}

impl SectionEntry for EducationEntry {
    const FIELDS: &'static [&'static str] = &["degree", "institution", "date"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "degree" => Some(&self.degree),
            "institution" => Some(&self.institution),
            "date" => Some(&self.date),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "degree" => Some(&mut self.degree),
            "institution" => Some(&mut self.institution),
            "date" => Some(&mut self.date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub responsibilities: String,
}

impl SectionEntry for ExperienceEntry {
    const FIELDS: &'static [&'static str] =
        &["title", "company", "location", "dates", "responsibilities"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "company" => Some(&self.company),
            "location" => Some(&self.location),
            "dates" => Some(&self.dates),
            "responsibilities" => Some(&self.responsibilities),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "company" => Some(&mut self.company),
            "location" => Some(&mut self.location),
            "dates" => Some(&mut self.dates),
            "responsibilities" => Some(&mut self.responsibilities),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerEntry {
    pub role: String,
    pub organization: String,
    pub location: String,
    pub dates: String,
    pub description: String,
}

impl SectionEntry for VolunteerEntry {
    const FIELDS: &'static [&'static str] =
        &["role", "organization", "location", "dates", "description"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "role" => Some(&self.role),
            "organization" => Some(&self.organization),
            "location" => Some(&self.location),
            "dates" => Some(&self.dates),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "role" => Some(&mut self.role),
            "organization" => Some(&mut self.organization),
            "location" => Some(&mut self.location),
            "dates" => Some(&mut self.dates),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtracurricularEntry {
    pub name: String,
    pub role: String,
    pub description: String,
}

impl SectionEntry for ExtracurricularEntry {
    const FIELDS: &'static [&'static str] = &["name", "role", "description"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "role" => Some(&self.role),
            "description" => Some(&self.description),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "role" => Some(&mut self.role),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub link: String,
}

impl SectionEntry for ProjectEntry {
    const FIELDS: &'static [&'static str] = &["name", "description", "link"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            "link" => Some(&self.link),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "description" => Some(&mut self.description),
            "link" => Some(&mut self.link),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ResumeRecord
// ────────────────────────────────────────────────────────────────────────────

/// The canonical resume being built in one session.
///
/// Serialized field order matches the form: personal details, summary, the
/// repeated sections, then skills. The assistant's feedback prompt embeds
/// this serialization verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub volunteer: Vec<VolunteerEntry>,
    pub extracurriculars: Vec<ExtracurricularEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: String,
}

impl Default for ResumeRecord {
    /// All scalars blank; every section holds exactly one blank entry.
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            summary: String::new(),
            experience: vec![ExperienceEntry::default()],
            volunteer: vec![VolunteerEntry::default()],
            extracurriculars: vec![ExtracurricularEntry::default()],
            projects: vec![ProjectEntry::default()],
            education: vec![EducationEntry::default()],
            skills: String::new(),
        }
    }
}

impl ResumeRecord {
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::FullName => &self.full_name,
            ScalarField::Email => &self.email,
            ScalarField::Phone => &self.phone,
            ScalarField::Website => &self.website,
            ScalarField::Summary => &self.summary,
            ScalarField::Skills => &self.skills,
        }
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: String) {
        let slot = match field {
            ScalarField::FullName => &mut self.full_name,
            ScalarField::Email => &mut self.email,
            ScalarField::Phone => &mut self.phone,
            ScalarField::Website => &mut self.website,
            ScalarField::Summary => &mut self.summary,
            ScalarField::Skills => &mut self.skills,
        };
        *slot = value;
    }

    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Education => self.education.len(),
            Section::Experience => self.experience.len(),
            Section::Volunteer => self.volunteer.len(),
            Section::Extracurriculars => self.extracurriculars.len(),
            Section::Projects => self.projects.len(),
        }
    }

    /// Primary field of the first entry, or `None` when the section is empty.
    pub fn first_primary(&self, section: Section) -> Option<&str> {
        match section {
            Section::Education => self.education.first().map(SectionEntry::primary),
            Section::Experience => self.experience.first().map(SectionEntry::primary),
            Section::Volunteer => self.volunteer.first().map(SectionEntry::primary),
            Section::Extracurriculars => {
                self.extracurriculars.first().map(SectionEntry::primary)
            }
            Section::Projects => self.projects.first().map(SectionEntry::primary),
        }
    }

    pub fn update_entry(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: String,
    ) -> Result<(), EditError> {
        match section {
            Section::Education => set_entry_field(&mut self.education, section, index, field, value),
            Section::Experience => {
                set_entry_field(&mut self.experience, section, index, field, value)
            }
            Section::Volunteer => set_entry_field(&mut self.volunteer, section, index, field, value),
            Section::Extracurriculars => {
                set_entry_field(&mut self.extracurriculars, section, index, field, value)
            }
            Section::Projects => set_entry_field(&mut self.projects, section, index, field, value),
        }
    }

    /// Appends the section's blank template.
    pub fn add_entry(&mut self, section: Section) {
        match section {
            Section::Education => self.education.push(EducationEntry::default()),
            Section::Experience => self.experience.push(ExperienceEntry::default()),
            Section::Volunteer => self.volunteer.push(VolunteerEntry::default()),
            Section::Extracurriculars => {
                self.extracurriculars.push(ExtracurricularEntry::default())
            }
            Section::Projects => self.projects.push(ProjectEntry::default()),
        }
    }

    /// Removes the entry at `index`. Removing the last entry leaves the
    /// section empty; no blank entry is put back.
    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<(), EditError> {
        match section {
            Section::Education => remove_at(&mut self.education, section, index),
            Section::Experience => remove_at(&mut self.experience, section, index),
            Section::Volunteer => remove_at(&mut self.volunteer, section, index),
            Section::Extracurriculars => remove_at(&mut self.extracurriculars, section, index),
            Section::Projects => remove_at(&mut self.projects, section, index),
        }
    }
}

fn set_entry_field<E: SectionEntry>(
    entries: &mut [E],
    section: Section,
    index: usize,
    field: &str,
    value: String,
) -> Result<(), EditError> {
    let len = entries.len();
    let entry = entries
        .get_mut(index)
        .ok_or(EditError::IndexOutOfRange {
            section,
            index,
            len,
        })?;
    let slot = entry
        .field_mut(field)
        .ok_or_else(|| EditError::UnknownEntryField {
            section,
            field: field.to_string(),
        })?;
    *slot = value;
    Ok(())
}

fn remove_at<E>(entries: &mut Vec<E>, section: Section, index: usize) -> Result<(), EditError> {
    if index >= entries.len() {
        return Err(EditError::IndexOutOfRange {
            section,
            index,
            len: entries.len(),
        });
    }
    entries.remove(index);
    Ok(())
}
