//! Multi-line text buffer behind the "Your Code" panel.
//!
//! The buffer is a `Vec<String>` of lines (never empty) with a char-indexed
//! cursor. `version` increases on every content change so the renderer can
//! cache syntax highlighting and the app can push the text into the review
//! session only when it actually changed.
//!
//! Tabs are stored as spaces and `\r\n` / `\r` are normalised to `\n`: the
//! terminal renders neither tabs nor carriage returns predictably.

const TAB: &str = "    ";

/// Text buffer with a cursor.
#[derive(Debug, Clone)]
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
    /// First visible line; kept so the cursor stays in view.
    scroll: usize,
    version: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
            version: 0,
        }
    }
}

/// Byte offset of char index `col` in `line`, clamped to the line end.
fn byte_idx(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl Editor {
    /// Full buffer contents joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the buffer holds no characters at all.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Buffer lines, never empty.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as (row, char column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// First visible line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Content version; bumps on every edit.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    /// Inserts one character at the cursor. `\n` splits the line.
    pub fn insert_char(&mut self, c: char) {
        match c {
            '\n' | '\r' => self.newline(),
            '\t' => self.insert_str(TAB),
            c => {
                let line = &mut self.lines[self.row];
                let at = byte_idx(line, self.col);
                line.insert(at, c);
                self.col += 1;
                self.touch();
            }
        }
    }

    /// Inserts arbitrary text at the cursor (paste).
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let normalised = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', TAB);
        let line = &mut self.lines[self.row];
        let at = byte_idx(line, self.col);
        let tail = line.split_off(at);

        let mut pieces = normalised.split('\n');
        // split always yields at least one piece.
        let first = pieces.next().unwrap_or_default();
        self.lines[self.row].push_str(first);
        let mut last_len = char_len(first) + self.col;
        for piece in pieces {
            self.row += 1;
            self.lines.insert(self.row, piece.to_owned());
            last_len = char_len(piece);
        }
        self.col = last_len;
        self.lines[self.row].push_str(&tail);
        self.touch();
    }

    /// Splits the current line at the cursor.
    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_idx(line, self.col);
        let tail = line.split_off(at);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, tail);
        self.touch();
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_idx(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
            self.touch();
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
            self.lines[self.row].push_str(&current);
            self.touch();
        }
    }

    /// Deletes the character under the cursor, joining lines at line end.
    pub fn delete(&mut self) {
        let len = char_len(&self.lines[self.row]);
        if self.col < len {
            let line = &mut self.lines[self.row];
            let at = byte_idx(line, self.col);
            line.remove(at);
            self.touch();
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            self.touch();
        }
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        *self = Self {
            version: self.version + 1,
            ..Self::default()
        };
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < char_len(&self.lines[self.row]) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(char_len(&self.lines[self.row]));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(char_len(&self.lines[self.row]));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = char_len(&self.lines[self.row]);
    }

    /// Scrolls the view by `delta` lines without moving the cursor.
    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Adjusts `scroll` so the cursor row is inside a viewport of `height` rows.
    pub fn keep_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
    }
}
