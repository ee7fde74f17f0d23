use crate::models::SubmissionRecord;

/// Header row, in sheet column order A through M.
pub const HEADERS: [&str; 13] = [
    "Timestamp",
    "Name",
    "WhatsApp",
    "Email",
    "Teaching Format",
    "Weekly Hours",
    "Commute Hours",
    "Biggest Pain",
    "Subjects",
    "Optional Notes",
    "Interview Opt-In",
    "Willingness to Pay",
    "Receive Updates",
];

pub const FIRST_COLUMN: &str = "A";
pub const LAST_COLUMN: &str = "M";

/// Cells for one lead, positionally aligned with `HEADERS`.
pub fn to_row(record: &SubmissionRecord) -> Vec<String> {
    vec![
        record.timestamp.clone(),
        record.name.clone(),
        record.whatsapp.clone(),
        record.email.clone(),
        record.teaching_format.clone(),
        record.weekly_hours.clone(),
        record.commute_hours.clone(),
        record.biggest_pain.clone(),
        record.subjects.clone(),
        record.optional_notes.clone(),
        yes_no(record.interview_opt_in).to_string(),
        yes_no(record.willingness_to_pay_opt_in).to_string(),
        yes_no(record.receive_updates).to_string(),
    ]
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// `Sheet1!A:M`
pub fn data_range(sheet: &str) -> String {
    format!("{sheet}!{FIRST_COLUMN}:{LAST_COLUMN}")
}

/// `Sheet1!A1:M1`
pub fn header_range(sheet: &str) -> String {
    format!("{sheet}!{FIRST_COLUMN}1:{LAST_COLUMN}1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            timestamp: "2025-01-15T08:30:00.000Z".to_string(),
            name: "Complete Form".to_string(),
            whatsapp: "+6591234567".to_string(),
            email: "complete@example.com".to_string(),
            telegram: "@completeuser".to_string(),
            teaching_format: "Hybrid".to_string(),
            weekly_hours: "5-10 hours".to_string(),
            commute_hours: "1-2 hours".to_string(),
            biggest_pain: "Scheduling conflicts".to_string(),
            subjects: "English, History".to_string(),
            optional_notes: "Very interested".to_string(),
            interview_opt_in: true,
            willingness_to_pay_opt_in: false,
            receive_updates: true,
        }
    }

    #[test]
    fn row_matches_header_order() {
        let row = to_row(&record());
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(
            row,
            vec![
                "2025-01-15T08:30:00.000Z",
                "Complete Form",
                "+6591234567",
                "complete@example.com",
                "Hybrid",
                "5-10 hours",
                "1-2 hours",
                "Scheduling conflicts",
                "English, History",
                "Very interested",
                "Yes",
                "No",
                "Yes",
            ]
        );
    }

    #[test]
    fn telegram_is_not_a_sheet_column() {
        let row = to_row(&record());
        assert!(!row.iter().any(|cell| cell == "@completeuser"));
    }

    #[test]
    fn ranges() {
        assert_eq!(data_range("Sheet1"), "Sheet1!A:M");
        assert_eq!(header_range("Leads"), "Leads!A1:M1");
    }
}
