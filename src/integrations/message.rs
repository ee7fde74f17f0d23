use crate::models::SubmissionRecord;

use super::row::yes_no;

const NOT_SPECIFIED: &str = "Not specified";

/// Human-readable summary of a lead for the product owner.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerMessage {
    pub title: String,
    pub content: String,
}

pub fn render(record: &SubmissionRecord) -> OwnerMessage {
    let title = format!("New TutorAtlas early-access signup: {}", record.name);

    let content = format!(
        "Name: {name}\n\
         WhatsApp: {whatsapp}\n\
         Email: {email}\n\
         Telegram: {telegram}\n\
         Teaching Format: {teaching_format}\n\
         Weekly Hours: {weekly_hours}\n\
         Commute Hours: {commute_hours}\n\
         Biggest Pain: {biggest_pain}\n\
         Subjects: {subjects}\n\
         Interview Opt-In: {interview}\n\
         Willingness to Pay: {pay}\n\
         Receive Updates: {updates}\n\
         Notes: {notes}\n\
         Submitted At: {timestamp}",
        name = record.name,
        whatsapp = or_not_specified(&record.whatsapp),
        email = or_not_specified(&record.email),
        telegram = or_not_specified(&record.telegram),
        teaching_format = or_not_specified(&record.teaching_format),
        weekly_hours = or_not_specified(&record.weekly_hours),
        commute_hours = or_not_specified(&record.commute_hours),
        biggest_pain = or_not_specified(&record.biggest_pain),
        subjects = or_not_specified(&record.subjects),
        interview = yes_no(record.interview_opt_in),
        pay = yes_no(record.willingness_to_pay_opt_in),
        updates = yes_no(record.receive_updates),
        notes = if record.optional_notes.is_empty() { "None" } else { record.optional_notes.as_str() },
        timestamp = record.timestamp,
    );

    OwnerMessage { title, content }
}

fn or_not_specified(value: &str) -> &str {
    if value.is_empty() { NOT_SPECIFIED } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_placeholders_for_missing_fields() {
        let record = SubmissionRecord {
            timestamp: "2025-01-15T08:30:00.000Z".to_string(),
            name: "Jane Smith".to_string(),
            whatsapp: "+6591234567".to_string(),
            email: String::new(),
            telegram: String::new(),
            teaching_format: String::new(),
            weekly_hours: "10-15 hours".to_string(),
            commute_hours: String::new(),
            biggest_pain: String::new(),
            subjects: String::new(),
            optional_notes: String::new(),
            interview_opt_in: true,
            willingness_to_pay_opt_in: false,
            receive_updates: false,
        };

        let message = render(&record);
        assert_eq!(message.title, "New TutorAtlas early-access signup: Jane Smith");
        assert_eq!(
            message.content,
            "Name: Jane Smith\n\
             WhatsApp: +6591234567\n\
             Email: Not specified\n\
             Telegram: Not specified\n\
             Teaching Format: Not specified\n\
             Weekly Hours: 10-15 hours\n\
             Commute Hours: Not specified\n\
             Biggest Pain: Not specified\n\
             Subjects: Not specified\n\
             Interview Opt-In: Yes\n\
             Willingness to Pay: No\n\
             Receive Updates: No\n\
             Notes: None\n\
             Submitted At: 2025-01-15T08:30:00.000Z"
        );
    }

    #[test]
    fn includes_notes_when_present() {
        let record = SubmissionRecord {
            timestamp: "t".to_string(),
            name: "Bob".to_string(),
            whatsapp: String::new(),
            email: "bob@example.com".to_string(),
            telegram: String::new(),
            teaching_format: String::new(),
            weekly_hours: String::new(),
            commute_hours: String::new(),
            biggest_pain: String::new(),
            subjects: String::new(),
            optional_notes: "Call after 6pm".to_string(),
            interview_opt_in: false,
            willingness_to_pay_opt_in: false,
            receive_updates: false,
        };

        let message = render(&record);
        assert!(message.content.contains("Notes: Call after 6pm"));
        assert!(message.content.contains("WhatsApp: Not specified"));
    }
}
