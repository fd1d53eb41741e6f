mod generator;
mod prompts;

pub use generator::{Reply, ResponseGenerator};
pub use prompts::{
    build_prompt, APOLOGY_REPLY, EMPTY_REPLY, SUGGESTED_QUESTIONS, SYSTEM_INSTRUCTION,
    WELCOME_MESSAGE,
};
