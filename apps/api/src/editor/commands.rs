//! Edit commands and the reducer that applies them.
//!
//! `apply` never mutates its input: it returns a fresh `ResumeRecord`, or an
//! error with the original left as it was. Callers swap the returned record
//! into the session, which bumps the session revision.

use serde::Deserialize;
use tracing::debug;

use crate::models::resume::{EditError, ResumeRecord, ScalarField, Section};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    UpdateField {
        field: ScalarField,
        value: String,
    },
    UpdateEntry {
        section: Section,
        index: usize,
        field: String,
        value: String,
    },
    AddEntry {
        section: Section,
    },
    RemoveEntry {
        section: Section,
        index: usize,
    },
}

pub fn apply(record: &ResumeRecord, command: EditCommand) -> Result<ResumeRecord, EditError> {
    let mut next = record.clone();
    match command {
        EditCommand::UpdateField { field, value } => {
            debug!(
                "update field {} ({} -> {} chars)",
                field.as_str(),
                next.scalar(field).len(),
                value.len()
            );
            next.set_scalar(field, value);
        }
        EditCommand::UpdateEntry {
            section,
            index,
            field,
            value,
        } => {
            debug!("update {section}[{index}].{field}");
            next.update_entry(section, index, &field, value)?;
        }
        EditCommand::AddEntry { section } => {
            debug!("add entry to {section} (now {})", next.section_len(section) + 1);
            next.add_entry(section);
        }
        EditCommand::RemoveEntry { section, index } => {
            debug!("remove {section}[{index}]");
            next.remove_entry(section, index)?;
        }
    }
    Ok(next)
}
