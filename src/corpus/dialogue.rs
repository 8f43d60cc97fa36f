//! Dialogue extraction from MIT Shakespeare play pages.
//!
//! Every spoken line of a play is marked up as
//! `<A NAME=act.scene.line>speech</A><br>`; everything else on the page
//! (speaker headings, stage directions, navigation) is ignored.

use crate::core::word_chain::words_from_text;

const ANCHOR_OPEN: &str = "<A NAME=";
const ANCHOR_CLOSE: &str = "</A><br>";

/// One numbered line of dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueLine<'a> {
    pub act: u32,
    pub scene: u32,
    pub line: u32,
    pub speech: &'a str,
}

/// Extract the numbered dialogue lines of a play page, in page order.
pub fn parse_dialogue_lines(html: &str) -> impl Iterator<Item = DialogueLine<'_>> {
    html.lines().filter_map(parse_line)
}

/// The speech text of every dialogue line.
pub fn dialogue_lines(html: &str) -> impl Iterator<Item = &str> {
    parse_dialogue_lines(html).map(|line| line.speech)
}

/// The words of dialogue of a play page, in order, punctuation kept.
pub fn parse_dialogue(html: &str) -> impl Iterator<Item = String> + '_ {
    words_from_text(dialogue_lines(html))
}

/// Find the first dialogue anchor on a line.
///
/// The speech runs up to the last `</A><br>` on the line.
fn parse_line(line: &str) -> Option<DialogueLine<'_>> {
    line.match_indices(ANCHOR_OPEN).find_map(|(at, _)| {
        let rest = &line[at + ANCHOR_OPEN.len()..];
        let (act, rest) = split_number(rest)?;
        let (scene, rest) = split_number(rest.strip_prefix('.')?)?;
        let (number, rest) = split_number(rest.strip_prefix('.')?)?;
        let rest = rest.strip_prefix('>')?;
        let end = rest.rfind(ANCHOR_CLOSE)?;
        Some(DialogueLine {
            act,
            scene,
            line: number,
            speech: &rest[..end],
        })
    })
}

/// Split a leading run of ASCII digits off `s`.
fn split_number(s: &str) -> Option<(u32, &str)> {
    let digits = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let value = s[..digits].parse().ok()?;
    Some((value, &s[digits..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numbered_line() {
        let line = parse_line("<A NAME=2.2.101>But let that go.</A><br>").unwrap();
        assert_eq!(line.act, 2);
        assert_eq!(line.scene, 2);
        assert_eq!(line.line, 101);
        assert_eq!(line.speech, "But let that go.");
    }

    #[test]
    fn speaker_headings_are_skipped() {
        assert!(parse_line("<A NAME=speech19><b>LORD POLONIUS</b></a>").is_none());
        assert!(parse_line("<blockquote>").is_none());
        assert!(parse_line("<p><i>Exit</i></p>").is_none());
    }

    #[test]
    fn missing_close_is_skipped() {
        assert!(parse_line("<A NAME=1.1.1>Who's there?").is_none());
        assert!(parse_line("<A NAME=1.1>Who's there?</A><br>").is_none());
    }

    #[test]
    fn speech_runs_to_last_close() {
        let line = parse_line("<A NAME=1.2.3>one</A><br>two</A><br>").unwrap();
        assert_eq!(line.speech, "one</A><br>two");
    }

    #[test]
    fn later_anchor_on_line_is_found() {
        let line = parse_line("<A NAME=speech1><A NAME=1.1.1>Who's there?</A><br>").unwrap();
        assert_eq!(line.speech, "Who's there?");
    }

    #[test]
    fn indentation_is_kept_in_speech() {
        let html = "<A NAME=2.2.91>                  This business is well ended.</A><br>\n";
        let speeches: Vec<&str> = dialogue_lines(html).collect();
        assert_eq!(speeches, vec!["                  This business is well ended."]);

        let words: Vec<String> = parse_dialogue(html).collect();
        assert_eq!(words, vec!["This", "business", "is", "well", "ended."]);
    }
}
