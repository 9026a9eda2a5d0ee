use crate::models::resume::ResumeRecord;

/// General career question. `{question}` is the user's message as typed.
pub const CAREER_ADVICE_PROMPT: &str = "You are a helpful and detailed career assistant for students. \
Your tone is encouraging and professional. \
Answer the following question thoroughly and provide a comprehensive, elongated response. \
If applicable, use examples or step-by-step lists. \
Format your answer using markdown. \
The user's question is: {question}";

/// Review of the resume built in the editor. `{resume_json}` is the
/// pretty-printed record.
pub const RESUME_FEEDBACK_PROMPT: &str = "You are an expert resume reviewer and career coach. \
Your tone should be encouraging, professional, and very thorough. \
Analyze the following resume data, which is in JSON format. \
Provide a detailed, section-by-section review in a long, \"elongated\" format. \
For each section (Summary, Experience, etc.), first praise what is good, \
then provide specific, actionable suggestions for improvement. \
Explain the 'why' behind each suggestion to help the user learn. \
Conclude with a summary of the top 3 most impactful changes the user can make. \
Format the entire response using markdown for readability.\n\n\
Here is the resume data:\n\n{resume_json}";

/// Review of an uploaded resume file sent as an inline attachment.
pub const FILE_REVIEW_PROMPT: &str = "You are an expert resume reviewer and career coach. \
Your tone should be encouraging, professional, and very thorough. \
Analyze this uploaded resume file (which could be an image, PDF, or document). \
Provide a detailed, section-by-section review in a long, 'elongated' format. \
For each section you identify, first praise what is good, \
then provide specific, actionable suggestions for improvement. \
Explain the 'why' behind each suggestion. \
Conclude with a summary of the top 3 most impactful changes the user can make. \
Format the entire response using markdown for readability.";

/// Transcript text standing in for the user when feedback is requested.
pub const FEEDBACK_REQUEST_TEXT: &str = "Please give me detailed feedback on the resume I built.";

pub const NO_FILE_SELECTED_TEXT: &str = "Please upload a file first.";

pub fn career_advice_prompt(question: &str) -> String {
    CAREER_ADVICE_PROMPT.replace("{question}", question)
}

pub fn resume_feedback_prompt(record: &ResumeRecord) -> String {
    // A record of plain strings always serializes.
    let resume_json = serde_json::to_string_pretty(record).unwrap_or_default();
    RESUME_FEEDBACK_PROMPT.replace("{resume_json}", &resume_json)
}

pub fn file_review_text(file_name: &str) -> String {
    format!("Reviewing uploaded file: {file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_career_prompt_ends_with_question() {
        let prompt = career_advice_prompt("How do I list a gap year?");
        assert!(prompt.starts_with("You are a helpful and detailed career assistant"));
        assert!(prompt.ends_with("The user's question is: How do I list a gap year?"));
    }

    #[test]
    fn test_feedback_prompt_embeds_pretty_json() {
        let mut record = ResumeRecord::default();
        record.full_name = "Jane Doe".to_string();

        let prompt = resume_feedback_prompt(&record);

        let (_, json) = prompt.split_once("Here is the resume data:\n\n").unwrap();
        assert!(json.starts_with("{\n  \"fullName\": \"Jane Doe\""));
        let parsed: ResumeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_prompts_ask_for_markdown() {
        for prompt in [CAREER_ADVICE_PROMPT, RESUME_FEEDBACK_PROMPT, FILE_REVIEW_PROMPT] {
            assert!(prompt.contains("markdown"));
        }
    }
}
