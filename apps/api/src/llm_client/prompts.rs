// Provider-level prompt fragments that enforce JSON-only output.
// The scoring prompts themselves live in scoring/prompts.rs.

/// Prepended to every Ollama prompt (Ollama's generate API has no system turn).
pub const OLLAMA_JSON_PREFIX: &str =
    "You must return raw JSON only. Do not use markdown, backticks, or commentary.\n\n";

/// System message sent with every Groq chat completion.
pub const GROQ_JSON_SYSTEM: &str =
    "Return raw JSON only. No markdown, no backticks, no commentary.";
