/// Character stream over the program text.
///
/// Counts lines as newlines are consumed and supports pushing back exactly one
/// character, which is all the lexer needs to find the end of an identifier or
/// number.
pub struct SourceReader {
    chars: Vec<char>,
    current: usize,
    offset: usize,
    line: usize,
    pushed_back: Option<char>,
}

impl SourceReader {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            offset: 0,
            line: 1,
            pushed_back: None,
        }
    }

    /// Returns the next character, or `None` once the input is exhausted.
    /// Keeps returning `None` after the end.
    pub fn next_char(&mut self) -> Option<char> {
        let c = match self.pushed_back.take() {
            Some(c) => c,
            None => {
                let c = *self.chars.get(self.current)?;
                self.current += 1;
                c
            }
        };

        self.offset += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Pushes `c` back so the next call to `next_char` returns it again.
    pub fn unread(&mut self, c: char) {
        debug_assert!(self.pushed_back.is_none(), "only one character of push-back");
        self.offset -= 1;
        if c == '\n' {
            self.line -= 1;
        }
        self.pushed_back = Some(c);
    }

    /// Current line, 1-based.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Character (not byte) offset of the next character to be read, which is
    /// what diagnostic rendering indexes by.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
