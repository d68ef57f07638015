//! Partial update command for projects.

use crate::model::error::DomainResult;
use crate::model::project::Project;
use crate::model::status::ProjectStatus;
use crate::patch::field::{parse_date, parse_enum, parse_string, PatchField, Payload};
use crate::patch::EntityPatch;
use chrono::NaiveDate;
use serde_json::Value;

/// Parsed project PATCH payload.
///
/// `name`, `startDate` and `status` can be omitted but not nulled;
/// `description` and `endDate` accept `null` as "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    name: Option<String>,
    description: PatchField<String>,
    start_date: Option<NaiveDate>,
    end_date: PatchField<NaiveDate>,
    status: Option<ProjectStatus>,
}

impl ProjectPatch {
    /// Parses a JSON object; unknown keys are ignored.
    ///
    /// # Errors
    /// - `InvalidInput` for a non-object payload, `null` on a non-clearable
    ///   field, or a value that does not parse.
    pub fn from_json(payload: &Value) -> DomainResult<Self> {
        let payload = Payload::from_value(payload)?;
        Ok(Self {
            name: payload.required("name", parse_string)?,
            description: payload.clearable("description", parse_string)?,
            start_date: payload.required("startDate", parse_date)?,
            end_date: payload.clearable("endDate", parse_date)?,
            status: payload.required("status", parse_enum::<ProjectStatus>)?,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: PatchField<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: PatchField<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> &PatchField<String> {
        &self.description
    }

    pub fn is_description_present(&self) -> bool {
        self.description.is_present()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> &PatchField<NaiveDate> {
        &self.end_date
    }

    pub fn is_end_date_present(&self) -> bool {
        self.end_date.is_present()
    }

    pub fn status(&self) -> Option<ProjectStatus> {
        self.status
    }

    /// Names of the fields this patch touches, in payload key spelling.
    pub fn present_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_present() {
            fields.push("description");
        }
        if self.start_date.is_some() {
            fields.push("startDate");
        }
        if self.end_date.is_present() {
            fields.push("endDate");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        fields
    }
}

impl EntityPatch for ProjectPatch {
    type Target = Project;

    fn apply_to(&self, project: &mut Project) -> DomainResult<()> {
        // Name is the only fallible field; it runs first so a rejection
        // leaves the project untouched.
        if let Some(name) = &self.name {
            project.set_name(name.as_str())?;
        }
        if let Some(description) = self.description.to_update() {
            project.set_description(description);
        }
        if let Some(start_date) = self.start_date {
            project.set_start_date(start_date);
        }
        if let Some(end_date) = self.end_date.to_update() {
            project.set_end_date(end_date);
        }
        if let Some(status) = self.status {
            project.set_status(status);
        }
        Ok(())
    }
}
