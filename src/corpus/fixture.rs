//! Built-in sample corpus
//!
//! Six chats and 42 messages spread over a single day, plus the curated
//! narratives and canned answers that go with them. The day is a parameter
//! so callers can anchor the corpus on "today" or on a fixed date in tests.

use super::store::{CorpusFile, MessageStore};
use super::types::{Chat, Message};
use crate::digest::types::{CuratedSummary, SummaryCatalog};
use crate::search::types::AnswerRule;
use chrono::NaiveDate;

const CHATS: &[(&str, &str, &[&str])] = &[
    ("1", "Event Planning 🎉", &["Sarah", "Mike", "Emma", "John", "Lisa"]),
    ("2", "Family Group 👨‍👩‍👧‍👦", &["Mom", "Dad", "Sister", "Brother"]),
    ("3", "Work Team", &["Alice", "Bob", "Charlie", "Diana"]),
    ("4", "Gym Buddies 💪", &["Tom", "Jerry", "Max"]),
    ("5", "Sarah Miller", &[]),
    ("6", "John (Work)", &[]),
];

// (id, chat, sender, hour, minute, text)
const MESSAGES: &[(&str, &str, &str, u32, u32, &str)] = &[
    ("m1", "1", "Sarah", 9, 15, "Hey everyone! So excited for the birthday party this Saturday! 🎂"),
    ("m2", "1", "Mike", 9, 18, "Can't wait! What time should we arrive?"),
    ("m3", "1", "Emma", 9, 22, "The venue opens at 6 PM. Let's all try to be there by 5:45 to help set up."),
    ("m4", "1", "John", 9, 30, "I'll bring the decorations. Got balloons and banners ready!"),
    ("m5", "1", "Lisa", 9, 45, "I'm ordering the cake from Sweet Treats Bakery. 3-tier chocolate cake as we discussed ✅"),
    ("m6", "1", "Sarah", 10, 0, "Perfect! Here's the venue link: https://venue.example.com/skylounge"),
    ("m7", "1", "Mike", 10, 15, "Just confirmed - DJ is booked from 7 PM to 11 PM"),
    ("m8", "1", "Emma", 11, 30, "Everyone agreed on $50 each for the gift, right? I'll collect venmo"),
    ("m9", "1", "John", 12, 0, "Confirmed! Sent you $50"),
    ("m10", "1", "Lisa", 14, 30, "Reminder: RSVP deadline is tomorrow! We need final headcount for catering"),
    ("m11", "2", "Mom", 8, 0, "Good morning sweethearts! ☀️"),
    ("m12", "2", "Dad", 8, 5, "Don't forget Sunday dinner at our place! 5 PM"),
    ("m13", "2", "Sister", 8, 30, "I'll be there! Can I bring my friend Jake?"),
    ("m14", "2", "Mom", 8, 35, "Of course! The more the merrier 😊"),
    ("m15", "2", "Brother", 9, 0, "Running late, might arrive around 5:30"),
    ("m16", "2", "Dad", 10, 30, "I'm making my famous lasagna 🍝"),
    ("m17", "2", "Sister", 11, 0, "YUM! I'll bring dessert - thinking tiramisu?"),
    ("m18", "2", "Mom", 11, 15, "Perfect! That's decided then. See you all Sunday!"),
    ("m19", "3", "Alice", 9, 0, "Morning team! Quick update on the project deadline"),
    ("m20", "3", "Alice", 9, 2, "Client moved the presentation to Wednesday 2 PM instead of Friday"),
    ("m21", "3", "Bob", 9, 10, "😬 That's tight. I can finish the slides by Tuesday EOD"),
    ("m22", "3", "Charlie", 9, 15, "I'll handle the data analysis. Should have it by tomorrow noon"),
    ("m23", "3", "Diana", 9, 30, "I'll coordinate with the design team for the final mockups"),
    ("m24", "3", "Alice", 10, 0, "Great teamwork everyone! Let's sync at 3 PM today to review progress"),
    ("m25", "3", "Bob", 10, 45, "Here's the draft: https://docs.example.com/presentation-v2"),
    ("m26", "3", "Charlie", 14, 0, "Data analysis complete! Uploaded to the shared drive ✅"),
    ("m27", "3", "Diana", 15, 30, "Meeting notes: we agreed on the blue theme and minimalist approach"),
    ("m28", "4", "Tom", 6, 30, "Who's hitting the gym at 7 AM? 💪"),
    ("m29", "4", "Jerry", 6, 35, "I'm in! Leg day today"),
    ("m30", "4", "Max", 6, 40, "Same! Let's gooo"),
    ("m31", "4", "Tom", 8, 30, "Great session! New PR on squats 🎯"),
    ("m32", "4", "Jerry", 12, 0, "Protein shake recipe anyone? Getting bored of the same flavors"),
    ("m33", "4", "Max", 12, 15, "Try banana + peanut butter + cocoa. Game changer!"),
    ("m34", "5", "Sarah", 10, 30, "Hey! Are we still on for coffee tomorrow at 3?"),
    ("m35", "5", "You", 10, 35, "Yes! Looking forward to it. Same place as last time?"),
    ("m36", "5", "Sarah", 10, 40, "Let's try that new café on Main Street instead! ☕"),
    ("m37", "5", "You", 10, 45, "Perfect, see you there!"),
    ("m38", "6", "John", 11, 0, "Quick question about the Q4 report"),
    ("m39", "6", "You", 11, 5, "Sure, what's up?"),
    ("m40", "6", "John", 11, 10, "Can you send me the latest sales figures by 4 PM today?"),
    ("m41", "6", "You", 11, 15, "Absolutely, I'll have them ready"),
    ("m42", "6", "John", 11, 20, "Thanks! You're a lifesaver 🙏"),
];

/// Sample chats
pub fn sample_chats() -> Vec<Chat> {
    CHATS
        .iter()
        .map(|(id, name, participants)| Chat {
            id: id.to_string(),
            name: name.to_string(),
            is_group: !participants.is_empty(),
            participants: (!participants.is_empty())
                .then(|| participants.iter().map(|p| p.to_string()).collect()),
        })
        .collect()
}

/// Sample messages, all sent on `day`
pub fn sample_messages(day: NaiveDate) -> Vec<Message> {
    MESSAGES
        .iter()
        .filter_map(|&(id, chat_id, sender, hour, minute, text)| {
            Some(Message {
                id: id.to_string(),
                chat_id: chat_id.to_string(),
                sender: sender.to_string(),
                timestamp: day.and_hms_opt(hour, minute, 0)?,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Sample store anchored on `day`
pub fn sample_store(day: NaiveDate) -> MessageStore {
    // IDs in the tables above are unique, so construction cannot fail
    MessageStore::new(sample_chats(), sample_messages(day)).unwrap_or_default()
}

/// The sample corpus as a fixture file, including curated narratives
pub fn sample_corpus_file(day: NaiveDate) -> CorpusFile {
    CorpusFile {
        chats: sample_chats(),
        messages: sample_messages(day),
        summaries: sample_catalog().into_entries(),
    }
}

fn curated(summary: &str, key_points: &[&str], start: usize, end: usize) -> CuratedSummary {
    CuratedSummary {
        summary: summary.to_string(),
        key_points: key_points.iter().map(|k| k.to_string()).collect(),
        notable_start: start,
        notable_end: end,
    }
}

/// Curated narratives for the sample chats
pub fn sample_catalog() -> SummaryCatalog {
    let mut catalog = SummaryCatalog::new();
    catalog.insert(
        "1",
        curated(
            "The group finalized plans for Saturday's birthday party at Sky Lounge. Venue opens at 6 PM with setup at 5:45. Lisa ordered a 3-tier chocolate cake, Mike confirmed the DJ (7-11 PM), and everyone agreed on $50 each for the gift. RSVP deadline is tomorrow.",
            &[
                "Party is Saturday at Sky Lounge, arrive 5:45 PM for setup",
                "3-tier chocolate cake ordered from Sweet Treats Bakery",
                "DJ booked from 7 PM to 11 PM",
                "$50 contribution per person for the gift",
                "RSVP deadline is tomorrow for catering headcount",
            ],
            2,
            5,
        ),
    );
    catalog.insert(
        "2",
        curated(
            "Family dinner confirmed for Sunday at 5 PM. Dad is making lasagna, sister is bringing tiramisu and asked to bring friend Jake (approved). Brother will arrive around 5:30.",
            &[
                "Sunday dinner at parents' house at 5 PM",
                "Dad making lasagna, sister bringing tiramisu",
                "Sister's friend Jake is welcome to join",
                "Brother running late, arriving around 5:30",
            ],
            0,
            3,
        ),
    );
    catalog.insert(
        "3",
        curated(
            "Critical deadline change: client presentation moved from Friday to Wednesday 2 PM. Team divided tasks - Bob on slides (Tuesday EOD), Charlie on data analysis (tomorrow noon), Diana coordinating design. Team sync at 3 PM today. Blue theme with minimalist approach was chosen.",
            &[
                "Presentation moved to Wednesday 2 PM (was Friday)",
                "Bob: slides ready by Tuesday EOD",
                "Charlie: data analysis by tomorrow noon",
                "Diana: coordinating with design team",
                "Team sync meeting at 3 PM today",
                "Agreed on blue theme, minimalist approach",
            ],
            0,
            4,
        ),
    );
    catalog.insert(
        "4",
        curated(
            "Morning gym session completed at 7 AM - leg day. Tom hit a new PR on squats. Group discussed protein shake recipes, with Max recommending banana + peanut butter + cocoa.",
            &[
                "7 AM gym session for leg day",
                "Tom achieved new squat PR",
                "New shake recipe: banana + peanut butter + cocoa",
            ],
            0,
            2,
        ),
    );
    catalog.insert(
        "5",
        curated(
            "Coffee date confirmed for tomorrow at 3 PM. Changed venue to new café on Main Street instead of the usual spot.",
            &["Coffee tomorrow at 3 PM", "New location: café on Main Street"],
            0,
            2,
        ),
    );
    catalog.insert(
        "6",
        curated(
            "John requested Q4 sales figures for a report. Deadline is 4 PM today. Confirmed delivery.",
            &["Q4 sales figures needed by 4 PM today", "For report preparation"],
            0,
            2,
        ),
    );
    catalog
}

fn rule(triggers: &[&str], answer: &str) -> AnswerRule {
    AnswerRule {
        triggers: triggers.iter().map(|t| t.to_string()).collect(),
        answer: answer.to_string(),
    }
}

/// Canned answers for questions about the sample corpus, in priority order
pub fn sample_answer_rules() -> Vec<AnswerRule> {
    vec![
        rule(
            &["dinner", "friday"],
            "Yes! There's a family dinner planned for Sunday at 5 PM at your parents' house. Dad is making lasagna and your sister is bringing tiramisu.",
        ),
        rule(
            &["party", "saturday"],
            "The birthday party is Saturday at Sky Lounge! Arrive at 5:45 PM for setup, venue opens at 6 PM. DJ runs from 7-11 PM. Don't forget: $50 for the group gift.",
        ),
        rule(
            &["venue", "time"],
            "Saturday's party is at Sky Lounge (venue opens 6 PM). The presentation was moved to Wednesday 2 PM. Sunday dinner is at 5 PM.",
        ),
        rule(
            &["deadline", "due"],
            "Key deadlines: RSVP for the party tomorrow, Q4 figures due by 4 PM today, presentation moved to Wednesday 2 PM.",
        ),
        rule(
            &["coffee", "sarah"],
            "You have coffee with Sarah tomorrow at 3 PM at the new café on Main Street.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_sample_sizes() {
        assert_eq!(sample_chats().len(), 6);
        assert_eq!(sample_messages(day()).len(), 42);
        assert!(sample_messages(day()).iter().all(|m| m.date() == day()));
    }

    #[test]
    fn test_direct_chats_have_no_participants() {
        let chats = sample_chats();
        let sarah = chats.iter().find(|c| c.id == "5").unwrap();
        assert!(!sarah.is_group);
        assert!(sarah.participants.is_none());
    }

    #[test]
    fn test_every_message_has_a_chat() {
        let store = sample_store(day());
        for message in store.messages_on_date(day()) {
            assert!(store.chat_by_id(&message.chat_id).is_some());
        }
    }

    #[test]
    fn test_catalog_covers_every_chat() {
        let catalog = sample_catalog();
        for chat in sample_chats() {
            assert!(catalog.get(&chat.id).is_some(), "no entry for {}", chat.id);
        }
    }
}
