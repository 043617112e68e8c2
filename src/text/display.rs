//! Bilingual display composition (§ DisplayMode). Pure string stitching —
//! the orchestrator decides which text is "original" and which is
//! "translated"; this just lays them out.

use crate::models::DisplayMode;

pub fn set_translation_display(
    original: &str,
    translated: &str,
    mode: DisplayMode,
    separator: &str,
) -> String {
    match mode {
        DisplayMode::TranslationOnly => translated.to_string(),
        DisplayMode::TranslationThenOriginal => format!("{translated}{separator}{original}"),
        DisplayMode::OriginalThenTranslation => format!("{original}{separator}{translated}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_only_drops_the_original() {
        let out = set_translation_display("hola", "hello", DisplayMode::TranslationOnly, "\n---\n");
        assert_eq!(out, "hello");
    }

    #[test]
    fn translation_then_original_orders_translation_first() {
        let out = set_translation_display("hola", "hello", DisplayMode::TranslationThenOriginal, "\n---\n");
        assert_eq!(out, "hello\n---\nhola");
    }

    #[test]
    fn original_then_translation_orders_original_first() {
        let out = set_translation_display("hola", "hello", DisplayMode::OriginalThenTranslation, "\n---\n");
        assert_eq!(out, "hola\n---\nhello");
    }
}
