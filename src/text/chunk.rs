//! Token-budget-aware chunking for chunk-mode translation and the
//! hierarchical summarizer. Grounded on `original_source/utils/text_handler.py`'s
//! `chunk_on_delimiter` / `combine_chunks_with_no_minimum` / `group_chunks`
//! trio — the token-packing algorithm is preserved exactly, only the data
//! shapes are made idiomatic (owned `Vec<String>` instead of a `(str, int)`
//! tuple list with a mutable out-param for the drop count).

use super::tokenize::token_count;

/// Greedily packs the pieces of `text` (split on `delimiter`) into chunks
/// that each stay within `max_tokens`, re-appending `delimiter` to every
/// chunk but the accounting for the final one. Pieces that alone exceed
/// `max_tokens` are dropped (with a `"..."` marker appended to the chunk
/// before them) rather than emitted oversized.
pub fn chunk_on_delimiter(text: &str, max_tokens: usize, delimiter: &str) -> Vec<String> {
    let pieces: Vec<&str> = text.split(delimiter).collect();
    let (combined, dropped) = combine_chunks_with_no_minimum(&pieces, max_tokens, delimiter);
    if dropped > 0 {
        tracing::warn!(dropped, "dropped oversized chunks that could not fit max_tokens alone");
    }
    combined.into_iter().map(|c| format!("{c}{delimiter}")).collect()
}

fn combine_chunks_with_no_minimum(
    pieces: &[&str],
    max_tokens: usize,
    delimiter: &str,
) -> (Vec<String>, usize) {
    let mut dropped_count = 0usize;
    let mut output: Vec<String> = Vec::new();
    let mut candidate: Vec<String> = Vec::new();

    for piece in pieces {
        if token_count(piece) > max_tokens {
            let mut with_ellipsis = candidate.clone();
            with_ellipsis.push("...".to_string());
            if token_count(&with_ellipsis.join(delimiter)) <= max_tokens {
                candidate.push("...".to_string());
                dropped_count += 1;
            }
            continue;
        }

        let mut extended = candidate.clone();
        extended.push((*piece).to_string());
        if token_count(&extended.join(delimiter)) > max_tokens {
            if !candidate.is_empty() {
                output.push(candidate.join(delimiter));
            }
            candidate = vec![(*piece).to_string()];
        } else {
            candidate.push((*piece).to_string());
        }
    }

    if !candidate.is_empty() {
        output.push(candidate.join(delimiter));
    }

    (output, dropped_count)
}

/// Regroups already-split `chunks` (paired with a per-chunk metric, either
/// token or character counts) into larger blocks that stay under
/// `max_size / 2` each, so the hierarchical summarizer always has headroom
/// to append its own prompt scaffolding. Table rows (chunks starting with
/// `|`) are joined with a bare newline instead of a blank line so a split
/// table is re-assembled rather than broken into separate paragraphs.
pub fn group_chunks(chunks: &[String], values: &[usize], max_size: usize) -> Vec<String> {
    let half = max_size / 2;
    let mut grouped = Vec::new();
    let mut current = String::new();
    let mut current_value = 0usize;

    for (chunk, &value) in chunks.iter().zip(values.iter()) {
        if current_value + value > half {
            if !current.trim().is_empty() {
                grouped.push(current.trim().to_string());
            }
            current = chunk.clone();
            current_value = value;
        } else if chunk.starts_with('|') {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(chunk);
            current_value += value;
        } else {
            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(chunk);
            current_value += value;
        }
    }

    if !current.trim().is_empty() {
        grouped.push(current.trim().to_string());
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_on_delimiter_keeps_pieces_under_budget() {
        let text = "one.two.three.four.five.six.seven.eight.nine.ten";
        let chunks = chunk_on_delimiter(text, 4, ".");
        for chunk in &chunks {
            assert!(token_count(chunk) <= 4 + 1);
        }
        assert!(!chunks.is_empty());
    }

    #[test]
    fn chunk_on_delimiter_reappends_delimiter() {
        let chunks = chunk_on_delimiter("a.b.c", 50, ".");
        assert_eq!(chunks, vec!["a.b.c.".to_string()]);
    }

    #[test]
    fn group_chunks_stays_under_half_max_size() {
        let chunks = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
        let values = vec![10, 10, 10];
        let grouped = group_chunks(&chunks, &values, 20);
        assert_eq!(grouped.len(), 3);
    }

    #[test]
    fn group_chunks_merges_table_rows_with_bare_newline() {
        let chunks = vec!["| a | b |".to_string(), "| 1 | 2 |".to_string()];
        let values = vec![5, 5];
        let grouped = group_chunks(&chunks, &values, 100);
        assert_eq!(grouped, vec!["| a | b |\n| 1 | 2 |".to_string()]);
    }

    #[test]
    fn group_chunks_never_emits_blank_entries() {
        let chunks = vec!["".to_string(), "content".to_string()];
        let values = vec![0, 5];
        let grouped = group_chunks(&chunks, &values, 100);
        assert_eq!(grouped, vec!["content".to_string()]);
    }
}
