//! # Question Catalog
//!
//! The fixed sequence of questions the wizard asks. Configuration, not runtime state.

use crate::domain::types::{FieldId, Question};

pub const QUESTIONS: [Question; 6] = [
    Question {
        field: FieldId::Platform,
        prompt: "What type of video is this?",
        options: Some(&["YouTube", "Shorts", "Reels", "TikTok"]),
        placeholder: None,
    },
    Question {
        field: FieldId::Topic,
        prompt: "What is the main topic of the video?",
        options: None,
        placeholder: Some("e.g. AI tools, exam tips, fitness, tech review..."),
    },
    Question {
        field: FieldId::Audience,
        prompt: "Who is the target audience?",
        options: Some(&["Students", "Beginners", "Professionals", "Creators", "Everyone"]),
        placeholder: None,
    },
    Question {
        field: FieldId::Emotion,
        prompt: "What is the key emotion you want to trigger?",
        options: Some(&["Curiosity", "Shock", "Excitement", "Fear", "Inspiration", "Fun"]),
        placeholder: None,
    },
    Question {
        field: FieldId::Style,
        prompt: "Is the video:",
        options: Some(&["Educational", "Entertainment", "Story", "Tutorial", "Opinion"]),
        placeholder: None,
    },
    Question {
        field: FieldId::Benefit,
        prompt: "What is ONE main benefit or surprise in the video?",
        options: None,
        placeholder: Some("e.g. Save time, secret trick, mistake people make..."),
    },
];
