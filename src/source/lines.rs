//! Byte stream to line splitting with carry-over of partial lines.

/// Splits arbitrary byte chunks into newline-terminated lines.
///
/// Bytes after the last newline of a chunk are held until the next chunk
/// completes the line, so chunk boundaries never change the resulting
/// sequence. Lines are decoded as UTF-8 only once complete; invalid
/// sequences become U+FFFD. A trailing `\r` is dropped.
#[derive(Debug, Default)]
pub struct LineSplitter {
    carry: Vec<u8>,
}

impl LineSplitter {
    /// A splitter with nothing buffered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every line it completes.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (index, byte) in bytes.iter().enumerate() {
            if *byte == b'\n' {
                let mut line = std::mem::take(&mut self.carry);
                line.extend_from_slice(&bytes[start..index]);
                lines.push(decode(line));
                start = index + 1;
            }
        }
        self.carry.extend_from_slice(&bytes[start..]);
        lines
    }

    /// Flush a final line that was never terminated.
    pub fn finish(&mut self) -> Option<String> {
        if self.carry.is_empty() {
            None
        } else {
            Some(decode(std::mem::take(&mut self.carry)))
        }
    }

    /// Number of buffered bytes not yet forming a complete line.
    pub fn pending(&self) -> usize {
        self.carry.len()
    }
}

fn decode(mut bytes: Vec<u8>) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_complete_lines() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"one\ntwo\n"), ["one", "two"]);
        assert_eq!(splitter.pending(), 0);
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn carries_partial_line_into_next_chunk() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"comm"), Vec::<String>::new());
        assert_eq!(splitter.pending(), 4);
        assert_eq!(splitter.push(b"it abc\nparent"), ["commit abc"]);
        assert_eq!(splitter.push(b" def\n"), ["parent def"]);
    }

    #[test]
    fn finish_emits_unterminated_tail() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"a\nb"), ["a"]);
        assert_eq!(splitter.finish().as_deref(), Some("b"));
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn keeps_empty_lines() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"\n\nx\n"), ["", "", "x"]);
    }

    #[test]
    fn multibyte_characters_survive_chunk_boundaries() {
        let text = "Jürgen\n".as_bytes();
        let mut splitter = LineSplitter::new();
        let mut lines = splitter.push(&text[..2]);
        lines.extend(splitter.push(&text[2..]));
        assert_eq!(lines, ["Jürgen"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"a\xffb\n"), ["a\u{fffd}b"]);
    }

    #[test]
    fn strips_carriage_return() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push(b"dos\r\n"), ["dos"]);
    }
}
