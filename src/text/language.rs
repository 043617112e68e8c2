//! Best-effort source-language detection. Never fails: an undetectable or
//! too-short sample falls back to `"auto"`, leaving downstream engines to
//! treat the source language as unknown rather than aborting the pipeline.

pub fn detect_language(title: &str, content: &str) -> String {
    let sample = format!("{title} {content}");
    match whatlang::detect(&sample) {
        Some(info) if info.is_reliable() => info.lang().code().to_string(),
        _ => "auto".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        let lang = detect_language(
            "Good morning",
            "The quick brown fox jumps over the lazy dog near the riverbank every single morning.",
        );
        assert_eq!(lang, "eng");
    }

    #[test]
    fn falls_back_to_auto_on_empty_input() {
        assert_eq!(detect_language("", ""), "auto");
    }
}
