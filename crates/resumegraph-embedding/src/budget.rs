//! Provider token budgets and size estimation

/// Approximate characters per token
pub const CHARS_PER_TOKEN: usize = 4;

/// Fraction of the provider budget actually used, as a safety margin
pub const SAFETY_MARGIN: f64 = 0.8;

/// Conservative token budget for unrecognized models
pub const DEFAULT_TOKEN_BUDGET: usize = 2048;

/// Maximum input size in tokens for a given embedding model
///
/// Falls back to [`DEFAULT_TOKEN_BUDGET`] for unrecognized identifiers.
pub fn token_budget(model_id: &str) -> usize {
    let model = model_id.to_lowercase();
    // Provider prefixes (e.g. "ollama/nomic-embed-text") are part of the id.
    if model.contains("text-embedding-3") || model.contains("text-embedding-ada-002") {
        8191
    } else if model.contains("nomic-embed-text") {
        2048
    } else if model.contains("mxbai-embed-large") || model.contains("all-minilm") {
        512
    } else {
        DEFAULT_TOKEN_BUDGET
    }
}

/// Estimated token count of a text (4 characters ≈ 1 token)
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Maximum character count the pipeline sends in one provider call
///
/// The token budget converted to characters, scaled by the safety margin.
pub fn safe_char_budget(model_id: &str) -> usize {
    let budget_chars = token_budget(model_id) * CHARS_PER_TOKEN;
    (budget_chars as f64 * SAFETY_MARGIN) as usize
}
