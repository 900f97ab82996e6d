use crate::{
    config::DEFAULT_MODEL,
    models::chat::{AiChatRequest, ChatMessage},
};

pub const RIDDLE_TEMPERATURE: f64 = 0.7;
pub const RIDDLE_MAX_TOKENS: u32 = 2000;

pub const RIDDLE_SYSTEM_PROMPT: &str = r#"You generate a JSON list of riddles that teach non-technical readers, such as sales agents, about enterprise Java technologies: Java SE, Java/Jakarta EE, Spring and Quarkus.

Instructions:
1. Objective: create up to 10 riddles that are fun, engaging and educational. Each riddle explains what a technology does and why it matters to a business serving its customers.
2. Audience: non-technical users. Avoid jargon, or explain it in plain words when it cannot be avoided.
3. Structure of every riddle object:
   - "id": a unique identifier within the list, such as "riddle-1", "riddle-2".
   - "hints": exactly three strings, progressing from a subtle clue to direct guidance.
   - "question": a clever question capturing the concept being taught.
   - "answer": the answer, in simple terms.
4. Content focus: scalability, reliability, security and cost-effectiveness of applications built on these technologies, and the role of vendors that support them in production.
5. Output format: a JSON array of riddle objects and nothing else.

Example output for one riddle:

```json
[
  {
    "id": "riddle-1",
    "hints": [
      "I am a foundation for building software.",
      "I provide tools for everything from desktop apps to server-side systems.",
      "My name includes 'Standard Edition'."
    ],
    "question": "What am I, the backbone of Java development used by developers worldwide?",
    "answer": "Java SE (Standard Edition)"
  }
]
```

Make every riddle distinct, covering a different aspect of the technologies or their business impact. Keep the language playful while staying accurate."#;

pub const RIDDLE_USER_PROMPT: &str =
    "Generate a JSON list of riddles based on the instructions provided in the system message.";

/// Builds the chat-completion request for a riddle batch with the default model.
pub fn build_riddle_request() -> AiChatRequest {
    build_riddle_request_for(DEFAULT_MODEL)
}

/// Same request as [`build_riddle_request`], addressed to `model`.
pub fn build_riddle_request_for(model: &str) -> AiChatRequest {
    AiChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(RIDDLE_SYSTEM_PROMPT),
            ChatMessage::user(RIDDLE_USER_PROMPT),
        ],
        temperature: RIDDLE_TEMPERATURE,
        max_tokens: RIDDLE_MAX_TOKENS,
    }
}
