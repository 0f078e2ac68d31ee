//! Inline span parsing
//!
//! Splits one line of markup into styled runs. Every delimiter pattern is
//! matched at every position it can start, then overlapping candidates are
//! resolved leftmost-then-longest: the candidate list is stably sorted by
//! (start ascending, length descending) and accepted greedily, so ties fall
//! back to pattern declaration order.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::InlineRun;

#[derive(Debug, Clone, Copy)]
struct SpanStyle {
    bold: bool,
    italic: bool,
    monospace: bool,
}

struct SpanPattern {
    regex: Regex,
    style: SpanStyle,
}

impl SpanPattern {
    fn new(pattern: &str, bold: bool, italic: bool, monospace: bool) -> Self {
        Self {
            regex: Regex::new(pattern).expect("inline pattern is a valid regex"),
            style: SpanStyle {
                bold,
                italic,
                monospace,
            },
        }
    }
}

// Order matters: it breaks ties between candidates of equal start and length.
static PATTERNS: Lazy<Vec<SpanPattern>> = Lazy::new(|| {
    vec![
        SpanPattern::new(r"\*\*\*(.+?)\*\*\*", true, true, false),
        SpanPattern::new(r"__(.+?)__", true, false, false),
        SpanPattern::new(r"\*\*(.+?)\*\*", true, false, false),
        SpanPattern::new(r"_(.+?)_", false, true, false),
        SpanPattern::new(r"\*(.+?)\*", false, true, false),
        SpanPattern::new(r"`(.+?)`", false, false, true),
    ]
});

/// A delimited span found in the line
#[derive(Debug, Clone)]
struct Candidate {
    span: Range<usize>,
    inner: Range<usize>,
    style: SpanStyle,
}

impl Candidate {
    fn len(&self) -> usize {
        self.span.end - self.span.start
    }

    fn overlaps(&self, other: &Candidate) -> bool {
        self.span.start < other.span.end && other.span.start < self.span.end
    }
}

/// Parse the inline markup of a single line into styled runs.
///
/// The runs cover the whole line left to right; styled runs carry the text
/// between their delimiters. A line without any recognised span yields a
/// single plain run (an empty line yields one empty run).
///
/// ```rust
/// use chatsave_core::parse_inline;
///
/// let runs = parse_inline("a **b** c");
/// assert_eq!(runs.len(), 3);
/// assert!(runs[1].bold);
/// assert_eq!(runs[1].text, "b");
/// ```
pub fn parse_inline(line: &str) -> Vec<InlineRun> {
    let mut candidates = collect_candidates(line);

    if candidates.is_empty() {
        return vec![InlineRun::plain(line)];
    }

    // Stable: equal (start, len) keeps pattern order
    candidates.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.len().cmp(&a.len()))
    });

    let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !accepted.iter().any(|a| a.overlaps(&candidate)) {
            accepted.push(candidate);
        }
    }

    // Accepted in start order already, since candidates were visited that way
    let mut runs = Vec::with_capacity(accepted.len() * 2 + 1);
    let mut cursor = 0;

    for candidate in accepted {
        if candidate.span.start > cursor {
            runs.push(InlineRun::plain(&line[cursor..candidate.span.start]));
        }

        let SpanStyle {
            bold,
            italic,
            monospace,
        } = candidate.style;
        runs.push(InlineRun::styled(
            &line[candidate.inner.clone()],
            bold,
            italic,
            monospace,
        ));
        cursor = candidate.span.end;
    }

    if cursor < line.len() {
        runs.push(InlineRun::plain(&line[cursor..]));
    }

    runs
}

/// Find, for every pattern, the match beginning at each position where one can begin
fn collect_candidates(line: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for pattern in PATTERNS.iter() {
        let mut pos = 0;
        while pos < line.len() {
            let Some(caps) = pattern.regex.captures_at(line, pos) else {
                break;
            };
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            candidates.push(Candidate {
                span: whole.range(),
                inner: inner.range(),
                style: pattern.style,
            });

            // Step one character past this start so the next search can begin inside it
            pos = whole.start()
                + line[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> InlineRun {
        InlineRun::styled(text, true, false, false)
    }

    fn italic(text: &str) -> InlineRun {
        InlineRun::styled(text, false, true, false)
    }

    fn code(text: &str) -> InlineRun {
        InlineRun::styled(text, false, false, true)
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(parse_inline("just text"), vec![InlineRun::plain("just text")]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_inline(""), vec![InlineRun::plain("")]);
    }

    #[test]
    fn test_precedence() {
        let runs = parse_inline("***a*** **b** *c*");
        assert_eq!(
            runs,
            vec![
                InlineRun::styled("a", true, true, false),
                InlineRun::plain(" "),
                bold("b"),
                InlineRun::plain(" "),
                italic("c"),
            ]
        );
    }

    #[test]
    fn test_outer_span_wins_overlap() {
        let runs = parse_inline("**a _b_ c**");
        assert_eq!(runs, vec![bold("a _b_ c")]);
    }

    #[test]
    fn test_underscore_variants() {
        let runs = parse_inline("__strong__ and _soft_");
        assert_eq!(
            runs,
            vec![bold("strong"), InlineRun::plain(" and "), italic("soft")]
        );
    }

    #[test]
    fn test_inline_code() {
        let runs = parse_inline("call `f(x)` now");
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("call "),
                code("f(x)"),
                InlineRun::plain(" now"),
            ]
        );
    }

    #[test]
    fn test_code_shields_inner_markers() {
        let runs = parse_inline("`a*b*c`");
        assert_eq!(runs, vec![code("a*b*c")]);
    }

    #[test]
    fn test_unterminated_marker_is_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![InlineRun::plain("2 * 3 = 6")]);
        assert_eq!(parse_inline("**open"), vec![InlineRun::plain("**open")]);
    }

    #[test]
    fn test_runs_cover_line() {
        let line = "x *y* `z` __w__ tail";
        let runs = parse_inline(line);
        let text: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "x y z w tail");
    }

    #[test]
    fn test_non_ascii_text() {
        let runs = parse_inline("héllo **wörld** ✓");
        assert_eq!(
            runs,
            vec![
                InlineRun::plain("héllo "),
                bold("wörld"),
                InlineRun::plain(" ✓"),
            ]
        );
    }
}
