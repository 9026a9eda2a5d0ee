//! Static description of the resume form: what each input is called, what it
//! shows while empty, and whether it is a multi-line text area.

use serde::Serialize;

use crate::models::resume::{ScalarField, Section};

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSpec {
    pub section: Section,
    pub title: &'static str,
    pub add_label: &'static str,
    /// The preview shows this section only when the first entry has this field set.
    pub primary_field: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub personal: Vec<FieldSpec>,
    pub summary: FieldSpec,
    pub sections: Vec<SectionSpec>,
    pub skills: FieldSpec,
}

const fn input(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        placeholder,
        multiline: false,
    }
}

const fn textarea(name: &'static str, label: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        placeholder,
        multiline: true,
    }
}

pub fn scalar_spec(field: ScalarField) -> FieldSpec {
    match field {
        ScalarField::FullName => input("fullName", "Full Name", "Jane Doe"),
        ScalarField::Email => input("email", "Email Address", "jane.doe@example.com"),
        ScalarField::Phone => input("phone", "Phone Number", "(123) 456-7890"),
        ScalarField::Website => input("website", "Website / Portfolio", "github.com/janedoe"),
        ScalarField::Summary => textarea(
            "summary",
            "Summary",
            "A brief 2-3 sentence summary...",
        ),
        ScalarField::Skills => textarea(
            "skills",
            "Skills",
            "e.g., JavaScript, React, Node.js, Python, SQL, Git",
        ),
    }
}

pub fn section_spec(section: Section) -> SectionSpec {
    match section {
        Section::Education => SectionSpec {
            section,
            title: "Education",
            add_label: "Add Education",
            primary_field: section.primary_field(),
            fields: vec![
                input("degree", "Degree / Certificate", "B.S. in Computer Science"),
                input("institution", "Institution", "University of Technology"),
                input("date", "Graduation Date", "May 2019"),
            ],
        },
        Section::Experience => SectionSpec {
            section,
            title: "Work Experience",
            add_label: "Add Experience",
            primary_field: section.primary_field(),
            fields: vec![
                input("title", "Job Title", "Software Engineer"),
                input("company", "Company", "Tech Solutions Inc."),
                input("location", "Location", "San Francisco, CA"),
                input("dates", "Dates", "Jan 2020 - Present"),
                textarea(
                    "responsibilities",
                    "Responsibilities",
                    "Describe your key achievements...",
                ),
            ],
        },
        Section::Volunteer => SectionSpec {
            section,
            title: "Volunteer Experience",
            add_label: "Add Volunteer Role",
            primary_field: section.primary_field(),
            fields: vec![
                input("role", "Role", "Event Coordinator"),
                input("organization", "Organization", "Community Outreach"),
                input("location", "Location", "New York, NY"),
                input("dates", "Dates", "Summer 2019"),
                textarea("description", "Description", "Describe your contributions..."),
            ],
        },
        Section::Extracurriculars => SectionSpec {
            section,
            title: "Extracurricular Activities",
            add_label: "Add Activity",
            primary_field: section.primary_field(),
            fields: vec![
                input("name", "Activity Name", "University Coding Club"),
                input("role", "Your Role", "President / Member"),
                textarea(
                    "description",
                    "Description",
                    "Describe the activity and your involvement...",
                ),
            ],
        },
        Section::Projects => SectionSpec {
            section,
            title: "Projects",
            add_label: "Add Project",
            primary_field: section.primary_field(),
            fields: vec![
                input("name", "Project Name", "AI Resume Builder"),
                textarea("description", "Description", "Describe the project..."),
                input("link", "Link", "github.com/user/project-repo"),
            ],
        },
    }
}

pub fn form_schema() -> FormSchema {
    FormSchema {
        personal: [
            ScalarField::FullName,
            ScalarField::Email,
            ScalarField::Phone,
            ScalarField::Website,
        ]
        .into_iter()
        .map(scalar_spec)
        .collect(),
        summary: scalar_spec(ScalarField::Summary),
        sections: Section::ALL.into_iter().map(section_spec).collect(),
        skills: scalar_spec(ScalarField::Skills),
    }
}
