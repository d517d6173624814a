//! Keyword replies used by voice surfaces when the assistant server is not
//! involved. Classification is a plain case-insensitive substring match.

use serde::Serialize;

use crate::personas::{self, Language, PersonaId};
use crate::synthesizer::chat_template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Compassionate,
    Listening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Greeting,
    Health,
    Wisdom,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalReply {
    pub mood: Mood,
    pub topic: Topic,
    pub text: String,
}

pub fn classify_mood(input: &str) -> Mood {
    let lowered = input.to_lowercase();
    if contains_any(&lowered, &["help", "support", "guidance"]) {
        Mood::Compassionate
    } else if contains_any(&lowered, &["listen", "tell", "explain"]) {
        Mood::Listening
    } else {
        Mood::Neutral
    }
}

pub fn classify_topic(input: &str) -> Topic {
    let lowered = input.to_lowercase();
    if contains_any(&lowered, &["hello", "greet"]) {
        Topic::Greeting
    } else if contains_any(&lowered, &["health", "medical"]) {
        Topic::Health
    } else if contains_any(&lowered, &["wisdom", "philosophy"]) {
        Topic::Wisdom
    } else {
        Topic::General
    }
}

/// Ibn Sina answers from his own phrasebook. Other personas greet with
/// their introduction and otherwise fall back to their canned chat line.
pub fn reply(persona: PersonaId, language: Language, input: &str) -> LocalReply {
    let topic = classify_topic(input);
    let text = match (persona, topic) {
        (PersonaId::IbnSina, topic) => ibn_sina_line(topic, language).to_string(),
        (other, Topic::Greeting) => personas::persona(other).introduction(language),
        (other, _) => chat_template(other, input),
    };

    LocalReply {
        mood: classify_mood(input),
        topic,
        text,
    }
}

fn ibn_sina_line(topic: Topic, language: Language) -> &'static str {
    match (topic, language) {
        (Topic::Greeting, Language::En) => {
            "Peace be upon you. I am Ibn Sina, at your service. How may I assist you in matters of health, wisdom, or knowledge?"
        }
        (Topic::Greeting, Language::Ar) => {
            "السلام عليكم. أنا ابن سينا في خدمتك. كيف أساعدك في أمور الصحة أو الحكمة أو المعرفة؟"
        }
        (Topic::Health, Language::En) => {
            "As a physician, I believe in treating both the body and the soul. What concerns you about your health?"
        }
        (Topic::Health, Language::Ar) => {
            "بصفتي طبيباً، أؤمن بعلاج الجسد والروح معاً. ما الذي يقلقك بشأن صحتك؟"
        }
        (Topic::Wisdom, Language::En) => {
            "True knowledge comes from both observation and contemplation. What wisdom do you seek?"
        }
        (Topic::Wisdom, Language::Ar) => {
            "المعرفة الحقة تأتي من الملاحظة والتأمل معاً. ما الحكمة التي تبحث عنها؟"
        }
        (Topic::General, Language::En) => {
            "I am here to share the knowledge I have gathered through years of study and practice. Please, tell me what troubles you."
        }
        (Topic::General, Language::Ar) => {
            "أنا هنا لأشاركك ما جمعته من معرفة عبر سنوات من الدراسة والممارسة. أخبرني بما يشغلك."
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
