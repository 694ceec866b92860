/// Fixed prompt for `/api/suggest-messages`.
///
/// The output format lives entirely in this text; nothing downstream checks
/// that the model honoured it.
pub const SUGGESTION_PROMPT: &str = "Create a list of three open-ended and engaging questions \
formatted as a single string. Each question should be separated by '||'. These questions are \
for an anonymous social messaging platform, like Qooh.me, and should be suitable for a diverse \
audience. Avoid personal or sensitive topics, focusing instead on universal themes that \
encourage friendly interaction. For example, your output should be structured like this: \
'What's a hobby you've recently started?||If you could have dinner with any historical figure, \
who would it be?||What's a simple thing that makes you happy?'. Ensure the questions are \
intriguing, foster curiosity, and contribute to a positive and welcoming conversational \
environment.";

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::questions::QUESTION_DELIMITER;

    #[test]
    fn prompt_asks_for_three_delimited_questions() {
        assert!(SUGGESTION_PROMPT.contains("three"));
        assert!(SUGGESTION_PROMPT.contains(&format!("'{}'", QUESTION_DELIMITER)));
    }

    #[test]
    fn example_in_prompt_splits_into_three() {
        let start = SUGGESTION_PROMPT.find("'What's").unwrap() + 1;
        let end = SUGGESTION_PROMPT[start..].find("?'").unwrap() + start + 1;
        let example = murmur_core::SuggestedQuestions::new(&SUGGESTION_PROMPT[start..end]);
        assert_eq!(example.questions().len(), 3);
    }
}
