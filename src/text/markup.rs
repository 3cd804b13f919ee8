//! Inline highlight markup: `plain [highlighted] plain`.

/// A maximal span of paragraph text sharing one highlight state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run<'a> {
    /// Run text with bracket delimiters removed.
    pub text: &'a str,
    /// Whether the run was enclosed in `[...]`.
    pub highlight: bool,
}

impl<'a> Run<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            highlight: false,
        }
    }

    pub fn highlighted(text: &'a str) -> Self {
        Self {
            text,
            highlight: true,
        }
    }
}

/// Split one paragraph (no line breaks) into highlight runs.
///
/// A `[` opens a highlight that closes at the next `]`; a `[` inside the span is part of the
/// highlighted text. A `[` with no later `]` is literal, as is any `]` without an opener. Empty spans produce no run. A paragraph that is
/// blank after trimming yields no runs at all, which callers treat as a blank line.
pub fn tokenize(paragraph: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    if paragraph.trim().is_empty() {
        return runs;
    }

    let mut literal_start = 0usize;
    let mut cursor = 0usize;

    while let Some(rel) = paragraph[cursor..].find('[') {
        let open = cursor + rel;
        let inner_start = open + 1;
        let Some(rel_close) = paragraph[inner_start..].find(']') else {
            break;
        };
        let close = inner_start + rel_close;

        push_run(&mut runs, Run::plain(&paragraph[literal_start..open]));
        push_run(&mut runs, Run::highlighted(&paragraph[inner_start..close]));
        literal_start = close + 1;
        cursor = close + 1;
    }

    push_run(&mut runs, Run::plain(&paragraph[literal_start..]));
    runs
}

fn push_run<'a>(runs: &mut Vec<Run<'a>>, run: Run<'a>) {
    if !run.text.is_empty() {
        runs.push(run);
    }
}

/// Paragraph text with highlight brackets removed (literal brackets are kept).
pub fn strip_markup(paragraph: &str) -> String {
    tokenize(paragraph).iter().map(|r| r.text).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/markup.rs"]
mod tests;
