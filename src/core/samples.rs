//! Built-in sample scam messages
//!
//! The three canned texts offered to users who want to see the analyzer in
//! action without pasting a real message.

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    SAMPLE_AUTHORITY_CALL, SAMPLE_BANKING_EMAIL, SAMPLE_DIGITAL_ARREST_SMS,
};

/// Communication channel a message arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    Sms,
    Email,
    Call,
    #[default]
    Other,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "SMS",
            Channel::Email => "EMAIL",
            Channel::Call => "CALL",
            Channel::Other => "OTHER",
        }
    }
}

/// A canned example message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleMessage {
    pub id: &'static str,
    pub title: &'static str,
    pub channel: Channel,
    pub text: &'static str,
}

pub const SAMPLE_MESSAGES: [SampleMessage; 3] = [
    SampleMessage {
        id: "digital-arrest-sms",
        title: "Digital arrest SMS scam",
        channel: Channel::Sms,
        text: SAMPLE_DIGITAL_ARREST_SMS,
    },
    SampleMessage {
        id: "banking-fraud-email",
        title: "Banking fraud email",
        channel: Channel::Email,
        text: SAMPLE_BANKING_EMAIL,
    },
    SampleMessage {
        id: "fake-authority-call",
        title: "Fake authority call transcript",
        channel: Channel::Call,
        text: SAMPLE_AUTHORITY_CALL,
    },
];

/// Look up a sample by id
pub fn find_sample(id: &str) -> Option<&'static SampleMessage> {
    SAMPLE_MESSAGES.iter().find(|s| s.id == id)
}
