use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static PAREN_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

fn normalize_quotes(s: &str) -> String {
    s.replace(['\u{201c}', '\u{201d}'], "\"")
}

/// Length of `s` in grapheme clusters once any `(...)` spans are removed.
/// Stage directions are free: they count toward nothing when checking line
/// width, but are preserved verbatim in the output. Counting graphemes
/// rather than chars keeps accented letters and other combining sequences
/// from being double-counted.
fn effective_length(s: &str) -> usize {
    PAREN_SPAN.replace_all(s, "").graphemes(true).count()
}

/// Greedily word-wraps `dialogue` so that every output line's
/// [`effective_length`] is at most `max_chars`, preserving parenthesized
/// spans verbatim and normalizing curly quotes to straight ones.
///
/// Joining the returned lines with single spaces reproduces the input's
/// whitespace-normalized word sequence, and splitting an already-split line
/// is a no-op.
pub fn split_dialogue(dialogue: &str, max_chars: usize) -> Vec<String> {
    let dialogue = normalize_quotes(dialogue);

    if effective_length(&dialogue) <= max_chars {
        return vec![dialogue];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in dialogue.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if effective_length(&candidate) > max_chars && !current.is_empty() {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_dialogue_is_unchanged() {
        assert_eq!(split_dialogue("hola mundo", 60), vec!["hola mundo"]);
    }

    #[test]
    fn parenthesized_spans_do_not_count_toward_width() {
        let text = "Hola (cariñosa) mundo maravilloso de prueba extendida";
        let lines = split_dialogue(text, 20);

        for line in &lines {
            assert!(effective_length(line) <= 20, "line too long: {line:?}");
        }

        let words: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let expected: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn splits_long_dialogue_on_word_boundaries() {
        let text = "one two three four five six seven eight nine ten";
        let lines = split_dialogue(text, 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(effective_length(line) <= 10);
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn curly_quotes_are_normalized() {
        let lines = split_dialogue("\u{201c}hola\u{201d}", 60);
        assert_eq!(lines, vec!["\"hola\""]);
    }

    #[test]
    fn splitting_already_split_line_is_a_no_op() {
        let text = "one two three four five six seven eight nine ten";
        let first_pass = split_dialogue(text, 10);
        for line in &first_pass {
            let second_pass = split_dialogue(line, 10);
            assert_eq!(second_pass, vec![line.clone()]);
        }
    }

    #[test]
    fn single_overlong_word_still_emitted() {
        let lines = split_dialogue("supercalifragilisticexpialidocious", 5);
        assert_eq!(lines, vec!["supercalifragilisticexpialidocious"]);
    }
}
