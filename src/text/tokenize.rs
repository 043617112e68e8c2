//! Token counting via `tiktoken-rs`'s `cl100k_base` encoding, the same
//! encoding the chat-completion engines in this pipeline are priced and
//! budgeted against.

use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

static BPE: OnceLock<CoreBPE> = OnceLock::new();

fn bpe() -> &'static CoreBPE {
    BPE.get_or_init(|| tiktoken_rs::cl100k_base().expect("cl100k_base ships with tiktoken-rs"))
}

/// BPE token ids for `text`, in order.
pub fn tokenize(text: &str) -> Vec<usize> {
    bpe().encode_ordinary(text)
}

pub fn token_count(text: &str) -> usize {
    tokenize(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_has_no_tokens() {
        assert_eq!(token_count(""), 0);
    }

    #[test]
    fn longer_text_has_more_tokens() {
        assert!(token_count("a longer sentence with several words") > token_count("short"));
    }

    #[test]
    fn tokenize_and_token_count_agree() {
        let text = "the quick brown fox";
        assert_eq!(tokenize(text).len(), token_count(text));
    }
}
