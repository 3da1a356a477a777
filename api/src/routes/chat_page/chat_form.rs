use serde::{Deserialize, Serialize};

/// Form fields posted by the chat page.
#[derive(Debug, Default, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub question: String,
    /// Selector value; falls back to the session's last choice when unknown.
    #[serde(default)]
    pub profile: Option<String>,
}

/// One `<option>` of the expertise selector.
#[derive(Debug, Serialize)]
pub struct ProfileOption {
    pub value: &'static str,
    pub label: String,
    pub selected: bool,
}

/// Static "Skill Focus" gauge shown in the sidebar.
#[derive(Debug, Serialize)]
pub struct SkillGauge {
    pub name: &'static str,
    pub level: u8,
}

pub const SKILL_FOCUS: [(&str, u8); 3] = [("Python", 70), ("Statistics", 60), ("Machine Learning", 50)];
