//! Plain-text conversion and padding

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

static ASTERISK_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));

static UNDERSCORE_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_]+)_").expect("valid regex"));

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));

/// Flattens lightly formatted text into a single line of plain text (SMS bodies, plain-text
/// email). Stages run in order:
///
/// 1. HTML/XML entities, named and numeric, are decoded (`&amp;` and `&#38;` become `&`).
/// 2. Single-level `*emphasis*` and `_emphasis_` markers are removed. Matching is
///    non-greedy and non-nested; a marker with no closing partner is left alone.
/// 3. Every run of `\n`/`\r` becomes one space and the result is trimmed.
///
/// This is deliberately shallow. It isn't a markdown parser and identifiers such as
/// `snake_case_name` lose their inner underscores.
pub fn convert_to_plain_text(formatted_text: &str) -> String {
    let decoded = html_escape::decode_html_entities(formatted_text);
    let stripped = ASTERISK_EMPHASIS.replace_all(&decoded, "$1");
    let stripped = UNDERSCORE_EMPHASIS.replace_all(&stripped, "$1");
    let collapsed = NEWLINE_RUNS.replace_all(&stripped, " ");

    collapsed.trim().to_string()
}

/// Left-pads the display form of `value` with `pad` until it is `length` characters long.
///
/// Lengths count Unicode scalar values. A value already `length` or longer is returned as-is,
/// never truncated. A multi-character `pad` is repeated and cut short to fit exactly
/// (`string_pad(7, 6, "ab") == "ababa7"`); an empty `pad` leaves the value unpadded.
pub fn string_pad(value: impl Display, length: usize, pad: &str) -> String {
    let text = value.to_string();
    let current = text.chars().count();

    if current >= length || pad.is_empty() {
        return text;
    }

    let mut padded: String = pad.chars().cycle().take(length - current).collect();
    padded.push_str(&text);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis() {
        assert_eq!(convert_to_plain_text("*Hello* _world_"), "Hello world");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(convert_to_plain_text("Hello &amp; goodbye"), "Hello & goodbye");
        assert_eq!(convert_to_plain_text("&#38; &#x26; &lt;b&gt;"), "& & <b>");
    }

    #[test]
    fn full_pipeline() {
        assert_eq!(
            convert_to_plain_text("*Bold* &amp; _italic_\n\nNew line"),
            "Bold & italic New line"
        );
    }

    #[test]
    fn entities_decode_before_markdown() {
        assert_eq!(convert_to_plain_text("&#42;starred&#42;"), "starred");
    }

    #[test]
    fn unmatched_markers_are_kept() {
        assert_eq!(convert_to_plain_text("5 * 3"), "5 * 3");
        assert_eq!(convert_to_plain_text("_open only"), "_open only");
    }

    #[test]
    fn nested_markers_unwrap_innermost_only() {
        assert_eq!(convert_to_plain_text("*_both_*"), "both");
        assert_eq!(convert_to_plain_text("**double**"), "*double*");
    }

    #[test]
    fn underscores_inside_identifiers() {
        assert_eq!(convert_to_plain_text("snake_case_name"), "snakecasename");
    }

    #[test]
    fn newline_runs_collapse_and_trim() {
        assert_eq!(convert_to_plain_text("\n\nline one\r\n\r\nline two\n"), "line one line two");
        assert_eq!(convert_to_plain_text("   "), "");
        assert_eq!(convert_to_plain_text(""), "");
    }

    #[test]
    fn pad_numbers() {
        assert_eq!(string_pad(1, 6, "0"), "000001");
        assert_eq!(string_pad(42, 8, "*"), "******42");
        assert_eq!(string_pad(-5, 3, "0"), "0-5");
    }

    #[test]
    fn pad_never_truncates() {
        assert_eq!(string_pad(123456789, 4, "0"), "123456789");
        assert_eq!(string_pad("exact", 5, "."), "exact");
    }

    #[test]
    fn pad_with_multi_character_string() {
        assert_eq!(string_pad(7, 6, "ab"), "ababa7");
        assert_eq!(string_pad("x", 3, "abcdef"), "abx");
    }

    #[test]
    fn pad_with_empty_string() {
        assert_eq!(string_pad(9, 4, ""), "9");
    }

    #[test]
    fn pad_counts_characters_not_bytes() {
        assert_eq!(string_pad("é", 3, "·"), "··é");
    }
}
