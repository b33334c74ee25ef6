//! Text helpers behind the script editor. Offsets are in UTF-16 code units,
//! the unit `<textarea>` selection APIs use.

pub fn line_count(code: &str) -> usize {
    code.split('\n').count()
}

/// Content of the line-number gutter for `count` lines.
pub fn line_numbers(count: usize) -> String {
    (1..=count)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keeps the gutter text in sync with the editor, rebuilding it only when
/// the number of lines changes.
#[derive(Clone, Debug, Default)]
pub struct LineCounter {
    cached: usize,
}

impl LineCounter {
    /// New gutter text, or `None` when it is unchanged.
    pub fn refresh(&mut self, code: &str) -> Option<String> {
        let n = line_count(code);
        if n == self.cached {
            return None;
        }
        self.cached = n;
        Some(line_numbers(n))
    }
}

/// Selection range covering line `lineno` (1-based), without its newline.
pub fn line_selection(code: &str, lineno: i64) -> Option<(u32, u32)> {
    let lineno = usize::try_from(lineno).ok().filter(|n| *n >= 1)?;
    let mut start = 0;
    for (i, line) in code.split('\n').enumerate() {
        let len = utf16_len(line);
        if i + 1 == lineno {
            return Some((start, start + len));
        }
        start += len + 1;
    }
    None
}

/// Replace the selection with a tab. Returns the new text and the caret
/// position after the tab.
pub fn insert_tab(value: &str, sel_start: u32, sel_end: u32) -> (String, u32) {
    let start = byte_offset(value, sel_start);
    let end = byte_offset(value, sel_end.max(sel_start));
    let mut out = String::with_capacity(value.len() + 1);
    out.push_str(&value[..start]);
    out.push('\t');
    out.push_str(&value[end..]);
    (out, sel_start + 1)
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

fn byte_offset(s: &str, utf16: u32) -> usize {
    let mut units = 0;
    for (i, ch) in s.char_indices() {
        if units >= utf16 {
            return i;
        }
        units += ch.len_utf16() as u32;
    }
    s.len()
}
