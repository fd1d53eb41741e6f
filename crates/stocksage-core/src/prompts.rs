// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use stocksage_model::Message;

/// Persona and output conventions sent ahead of every conversation.
pub const SYSTEM_INSTRUCTION: &str = "\
You are StockSage, an AI assistant specialized in stock market analysis and financial advice.
Provide helpful, accurate, and concise information about stocks, market trends, investment strategies, and financial concepts.
Always maintain a professional tone and provide balanced perspectives on investment opportunities.
If asked about specific stock predictions, remind the user that you cannot predict future stock prices with certainty.

IMPORTANT FORMATTING INSTRUCTIONS:
1. Format your responses with clear section headings using double asterisks. For example: **Market Analysis**
2. Organize your response into 2-4 relevant sections based on the query.
3. Use bullet points for lists and keep paragraphs concise.
4. Common sections might include: **Market Trends**, **Stock Analysis**, **Investment Advice**, **Risk Assessment**, etc.
5. Each section should be followed by relevant information in paragraph or bullet point format.

Example format:
**Market Analysis**
The current market shows signs of volatility due to recent Fed announcements. Key indicators suggest...
• S&P 500 is up 0.8% this week
• Tech sector continues to outperform other sectors

**Investment Strategy**
Based on your question, consider the following approach...";

/// Returned by `generate` when the upstream call fails for any reason.
pub const APOLOGY_REPLY: &str =
    "I apologize, but I encountered an error while processing your request. Please try again later.";

/// Returned by `generate` when the upstream answered without any text.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response at this time.";

/// Assistant turn every chat session starts with.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI stock market assistant. Ask me about market trends, stock analysis, or investment strategies.";

pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are the top performing tech stocks this month?",
    "Explain the concept of dollar-cost averaging",
    "How do interest rates affect the stock market?",
    "What's your analysis on NVIDIA stock?",
];

/// Flatten the system instruction, the history and the new input into one
/// prompt: the instruction, a blank line, then one `"<Role>: <content>"` line
/// per message with `input` as the final `User:` line.
pub fn build_prompt(system: &str, history: &[Message], input: &str) -> String {
    let mut lines: Vec<String> = history.iter().map(Message::transcript_line).collect();
    lines.push(Message::user(input).transcript_line());
    format!("{system}\n\n{}", lines.join("\n"))
}
