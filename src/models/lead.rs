use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An early-access form submission as sent by the landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    #[serde(default)]
    pub name: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub telegram: Option<String>,
    pub teaching_format: Option<String>,
    pub weekly_hours: Option<String>,
    pub commute_hours: Option<String>,
    pub biggest_pain: Option<String>,
    pub subjects: Option<String>,
    pub optional_notes: Option<String>,
    #[serde(default)]
    pub interview_opt_in: bool,
    #[serde(default)]
    pub willingness_to_pay_opt_in: bool,
    #[serde(default)]
    pub receive_updates: bool,
}

impl SubmissionInput {
    /// Trim every text field and turn blank optionals into `None`.
    /// Browsers post empty inputs as `""`, which means "not provided".
    pub fn normalize(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            whatsapp: present(self.whatsapp),
            email: present(self.email),
            telegram: present(self.telegram),
            teaching_format: present(self.teaching_format),
            weekly_hours: present(self.weekly_hours),
            commute_hours: present(self.commute_hours),
            biggest_pain: present(self.biggest_pain),
            subjects: present(self.subjects),
            optional_notes: present(self.optional_notes),
            ..self
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An accepted submission, stamped and flattened for the downstream integrations.
/// Missing optional fields are empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub telegram: String,
    pub teaching_format: String,
    pub weekly_hours: String,
    pub commute_hours: String,
    pub biggest_pain: String,
    pub subjects: String,
    pub optional_notes: String,
    pub interview_opt_in: bool,
    pub willingness_to_pay_opt_in: bool,
    pub receive_updates: bool,
}

impl SubmissionRecord {
    pub fn from_input(input: SubmissionInput, accepted_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: accepted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            name: input.name,
            whatsapp: input.whatsapp.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            telegram: input.telegram.unwrap_or_default(),
            teaching_format: input.teaching_format.unwrap_or_default(),
            weekly_hours: input.weekly_hours.unwrap_or_default(),
            commute_hours: input.commute_hours.unwrap_or_default(),
            biggest_pain: input.biggest_pain.unwrap_or_default(),
            subjects: input.subjects.unwrap_or_default(),
            optional_notes: input.optional_notes.unwrap_or_default(),
            interview_opt_in: input.interview_opt_in,
            willingness_to_pay_opt_in: input.willingness_to_pay_opt_in,
            receive_updates: input.receive_updates,
        }
    }
}
