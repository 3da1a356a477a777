//! Prompt builder: fixed tutor instructions + expertise level + question.

use crate::profile::Profile;

/// Tutor instructions with `{level}` and `{question}` placeholders.
pub const TUTOR_TEMPLATE: &str = "\
You are an expert and friendly AI tutor for Data Science.
Only answer Data Science, Machine Learning, Statistics,
Python, SQL, AI, or Visualization questions.

User expertise level: {level}

Question:
{question}

Give a clear explanation with examples if helpful.
";

/// Interpolates `question` and `level` into [`TUTOR_TEMPLATE`].
///
/// The question is inserted verbatim. An empty `level` means `Intermediate`.
///
/// # Example
/// ```
/// use tutor::prompt::build_prompt;
/// let p = build_prompt("What is overfitting?", "Beginner");
/// assert!(p.contains("User expertise level: Beginner"));
/// assert!(p.contains("What is overfitting?"));
/// ```
pub fn build_prompt(question: &str, level: &str) -> String {
    let level = match level.trim() {
        "" => Profile::default().label(),
        l => l,
    };
    TUTOR_TEMPLATE
        .replace("{level}", level)
        .replace("{question}", question)
}

pub fn build_prompt_for(question: &str, profile: Profile) -> String {
    build_prompt(question, profile.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_deterministic_and_complete() {
        let a = build_prompt("How does k-means work?", "Advanced");
        let b = build_prompt("How does k-means work?", "Advanced");
        assert_eq!(a, b);
        assert!(a.starts_with("You are an expert and friendly AI tutor for Data Science."));
        assert!(a.contains("User expertise level: Advanced"));
        assert!(a.contains("Question:\nHow does k-means work?\n"));
        assert!(a.trim_end().ends_with("Give a clear explanation with examples if helpful."));
    }

    #[test]
    fn empty_level_defaults_to_intermediate() {
        assert!(build_prompt("q", "").contains("User expertise level: Intermediate"));
        assert!(build_prompt("q", "   ").contains("User expertise level: Intermediate"));
    }

    #[test]
    fn question_is_not_reinterpreted() {
        // Placeholders inside the question itself stay untouched.
        let p = build_prompt_for("what does {level} mean in f-strings?", Profile::Beginner);
        assert!(p.contains("what does {level} mean in f-strings?"));
        assert!(p.contains("User expertise level: Beginner"));
    }
}
