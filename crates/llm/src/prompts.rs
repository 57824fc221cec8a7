//! Prompt templates for the two model calls.

pub const CLASSIFIER_SYSTEM_PROMPT: &str = "You are an intent classifier.";

pub const ANSWER_SYSTEM_PROMPT: &str = "You are an expert software engineer. \
Answer questions using ONLY the provided code context. Do NOT hallucinate.";

/// Returned without calling the generator when retrieval comes back empty
pub const NO_RESULTS_MESSAGE: &str = "No relevant information found in this repository.";

/// Answers grow past the model's useful context long before the retrieval
/// cap does, so the prompt takes only the first fragments
const CONTEXT_FRAGMENT_LIMIT: usize = 10;

/// The classification prompt: closed label set, one-word answer
#[must_use]
pub fn classification_prompt(question: &str) -> String {
    format!(
        "Classify the user question into ONE of these intent types:\n\
         \n\
         overview  -> asking about architecture, purpose, or summary\n\
         api       -> asking about APIs, endpoints, routes\n\
         flow      -> asking how something works or execution flow\n\
         setup     -> asking about installation, deployment, running\n\
         specific  -> asking about a specific function or implementation\n\
         general   -> anything else\n\
         \n\
         Return ONLY one word from:\n\
         overview, api, flow, setup, specific, general\n\
         \n\
         Question:\n\
         {question}\n"
    )
}

/// Join the leading fragments into the context block
#[must_use]
pub fn build_context(fragments: &[String]) -> String {
    fragments
        .iter()
        .take(CONTEXT_FRAGMENT_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The grounded answer prompt, with the fixed refusal sentence
#[must_use]
pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "You are analyzing a software codebase.\n\
         \n\
         Answer the question using ONLY the provided code context.\n\
         \n\
         If the answer is not present in the context, say:\n\
         \"I cannot find this in the codebase.\"\n\
         \n\
         CODEBASE CONTEXT:\n\
         {context}\n\
         \n\
         QUESTION:\n\
         {question}\n\
         \n\
         ANSWER:\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_takes_the_first_ten_fragments() {
        let fragments: Vec<String> = (0..12).map(|i| format!("fragment {i}")).collect();
        let context = build_context(&fragments);
        assert!(context.contains("fragment 0"));
        assert!(context.contains("fragment 9"));
        assert!(!context.contains("fragment 10"));
    }

    #[test]
    fn answer_prompt_embeds_question_and_context() {
        let prompt = answer_prompt("what does main do", "def main(): ...");
        assert!(prompt.contains("what does main do"));
        assert!(prompt.contains("def main(): ..."));
        assert!(prompt.contains("I cannot find this in the codebase."));
    }

    #[test]
    fn classification_prompt_lists_the_closed_label_set() {
        let prompt = classification_prompt("how do I run this");
        for label in ["overview", "api", "flow", "setup", "specific", "general"] {
            assert!(prompt.contains(label), "missing label {label}");
        }
        assert!(prompt.contains("how do I run this"));
    }
}
