/// Lazily word-wraps a text into lines of at most `width` chars.
///
/// Lines break at whitespace and keep the whitespace that follows their last
/// word, up to the width. A newline always ends a line. A word longer than the
/// width is split at the width.
#[derive(Debug, Clone)]
pub struct LineWrapIter {
    text: String,
    width: usize,
    pos: usize,
}

impl LineWrapIter {
    pub fn new(text: &str, width: usize) -> LineWrapIter {
        LineWrapIter { text: text.to_string(), width: width.max(1), pos: 0 }
    }

    pub fn has_more(&self) -> bool {
        self.pos < self.text.len()
    }

    /// Produce the next line, or [`None`] once the text is consumed.
    pub fn next_line(&mut self) -> Option<String> {
        if !self.has_more() {
            return None;
        }

        let rest = &self.text[self.pos..];
        let (para, newline_len) = match rest.find('\n') {
            Some(i) => (&rest[..i], 1),
            None => (rest, 0),
        };
        let para = para.strip_suffix('\r').unwrap_or(para);

        let (end, next) = find_wrap_pos(para, self.width);
        let line = para[..end].to_string();

        self.pos += if next >= para.len() {
            rest.find('\n').map_or(rest.len(), |i| i + newline_len)
        } else {
            next
        };
        Some(line)
    }
}

impl Iterator for LineWrapIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_line()
    }
}

/// Byte end of the first line of `text` and byte start of the text following it.
fn find_wrap_pos(text: &str, width: usize) -> (usize, usize) {
    let mut chars = text.char_indices().peekable();
    let mut cols: usize = 0;
    let mut end = 0;

    loop {
        let ws_start = chars.peek().map_or(text.len(), |&(i, _)| i);
        let mut ws_cols: usize = 0;
        while let Some(&(_, c)) = chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            ws_cols += 1;
            chars.next();
        }

        let word_start = chars.peek().map_or(text.len(), |&(i, _)| i);
        let mut word_cols: usize = 0;
        while let Some(&(_, c)) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            word_cols += 1;
            chars.next();
        }
        let word_end = chars.peek().map_or(text.len(), |&(i, _)| i);

        let ws_end = nth_char_end(text, ws_start, ws_cols.min(width - cols));
        if word_cols == 0 {
            return (ws_end, text.len());
        }
        if cols + ws_cols + word_cols <= width {
            cols += ws_cols + word_cols;
            end = word_end;
            continue;
        }
        if end == 0 && word_cols > width {
            let split = nth_char_end(text, 0, width);
            return (split, split);
        }
        return (ws_end, word_start);
    }
}

/// Byte index after at most `n` chars of `text` starting at byte `start`.
fn nth_char_end(text: &str, start: usize, n: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| start + i)
}
