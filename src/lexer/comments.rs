use crate::lexer::{LexerError, Position};
use std::ops::Range;

/// Whether the stripper is currently inside a `/* ... */` comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentState {
    Normal,
    InsideBlockComment { opened_at: Position },
}

/// A source line with comments removed. `columns[i]` is the 1-based column
/// the i-th character of `text` had in the original line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrippedLine {
    pub text: String,
    pub columns: Vec<usize>,
}

impl StrippedLine {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Line-by-line comment remover. Block comments may span lines, so state is
/// carried from one call of [`CommentStripper::strip_line`] to the next.
#[derive(Debug)]
pub struct CommentStripper {
    state: CommentState,
}

impl Default for CommentStripper {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentStripper {
    pub fn new() -> Self {
        Self {
            state: CommentState::Normal,
        }
    }

    pub fn in_block_comment(&self) -> bool {
        matches!(self.state, CommentState::InsideBlockComment { .. })
    }

    /// Strip one physical line. `line_no` is 1-based and only used for positions.
    pub fn strip_line(&mut self, line: &str, line_no: usize) -> StrippedLine {
        let mut kept: Vec<Range<usize>> = Vec::new();
        let mut start = 0;

        loop {
            let rest = &line[start..];

            if let CommentState::InsideBlockComment { .. } = self.state {
                match rest.find("*/") {
                    Some(end) => {
                        start += end + 2;
                        self.state = CommentState::Normal;
                        continue;
                    }
                    None => break,
                }
            }

            let block = rest.find("/*");
            let line_comment = rest.find("//");

            match (block, line_comment) {
                (Some(open), lc) if lc.map_or(true, |lc| open < lc) => {
                    kept.push(start..start + open);
                    self.state = CommentState::InsideBlockComment {
                        opened_at: Position::new(line_no, column_of(line, start + open)),
                    };
                    start += open + 2;
                }
                (_, Some(lc)) => {
                    kept.push(start..start + lc);
                    break;
                }
                _ => {
                    kept.push(start..line.len());
                    break;
                }
            }
        }

        let mut stripped = StrippedLine::default();
        for range in kept {
            let mut column = column_of(line, range.start);
            for ch in line[range].chars() {
                stripped.text.push(ch);
                stripped.columns.push(column);
                column += 1;
            }
        }
        stripped
    }

    /// Fails if a block comment is still open at end of input.
    pub fn finish(&self) -> Result<(), LexerError> {
        match self.state {
            CommentState::Normal => Ok(()),
            CommentState::InsideBlockComment { opened_at } => {
                Err(LexerError::UnterminatedBlockComment(opened_at))
            }
        }
    }
}

/// Physical lines of `source`. Unlike `str::lines`, a trailing empty line is kept.
pub(crate) fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn column_of(line: &str, byte: usize) -> usize {
    line[..byte].chars().count() + 1
}

/// Remove every comment from `source`, keeping one output line per input line.
pub fn strip_comments(source: &str) -> Result<String, LexerError> {
    let mut stripper = CommentStripper::new();
    let lines: Vec<String> = split_lines(source)
        .enumerate()
        .map(|(idx, line)| stripper.strip_line(line, idx + 1).text)
        .collect();
    stripper.finish()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn strip_one(line: &str) -> String {
        CommentStripper::new().strip_line(line, 1).text
    }

    #[rstest]
    #[case("let x = 1; // trailing", "let x = 1; ")]
    #[case("// whole line", "")]
    #[case("a /* inline */ b", "a  b")]
    #[case("a/*x*/b", "ab")]
    #[case("a /* one */ b /* two */ c", "a  b  c")]
    #[case("a /* one */ b // rest", "a  b ")]
    #[case("a // x /* y */", "a ")]
    #[case("/** doc */ class Main {", " class Main {")]
    #[case("x = 4 / 2;", "x = 4 / 2;")]
    fn test_single_line(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_one(input), expected);
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        let mut stripper = CommentStripper::new();
        assert_eq!(stripper.strip_line("a /* start", 1).text, "a ");
        assert!(stripper.in_block_comment());
        assert_eq!(stripper.strip_line("still // comment", 2).text, "");
        assert_eq!(stripper.strip_line("end */ b // c", 3).text, " b ");
        assert!(!stripper.in_block_comment());
        assert!(stripper.finish().is_ok());
    }

    #[test]
    fn test_reopened_block_after_close() {
        let mut stripper = CommentStripper::new();
        stripper.strip_line("/* first", 1);
        assert_eq!(stripper.strip_line("*/ x /* second", 2).text, " x ");
        assert!(stripper.in_block_comment());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = strip_comments("class A {\n  /* never closed\n}\n").unwrap_err();
        assert_eq!(err, LexerError::UnterminatedBlockComment(Position::new(2, 3)));
    }

    #[test]
    fn test_columns_track_original_positions() {
        let stripped = strip_one("a/*xy*/b");
        assert_eq!(stripped, "ab");
        let line = CommentStripper::new().strip_line("a/*xy*/b", 1);
        assert_eq!(line.columns, vec![1, 8]);
    }

    proptest! {
        #[test]
        fn prop_stripping_is_idempotent(source in "[a/* \n]{0,40}") {
            if let Ok(once) = strip_comments(&source) {
                let twice = strip_comments(&once).expect("stripped text has no open comment");
                prop_assert_eq!(twice, once);
            }
        }
    }
}
