//! Splits long generated text into pieces that fit a single Discord message.
//!
//! Paragraphs (separated by a blank line, `"\n\n"`) are packed greedily into
//! chunks. A paragraph that cannot fit in any chunk on its own is hard-sliced
//! into fixed-width pieces. Lengths are counted in characters, which is how
//! Discord measures its message limit, and slicing never splits a character.

use thiserror::Error;

/// The maximum character length allowed for a single Discord message.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// The only recognised soft-break point.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

const SEPARATOR_LEN: usize = 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Invalid chunk configuration: max length must be at least 1, got {0}")]
    InvalidConfiguration(usize),
}

/// How a chunk attaches to the chunk before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// First chunk of the sequence.
    Start,
    /// Split at a paragraph separator; rejoin with `"\n\n"`.
    Paragraph,
    /// Cut inside an over-long paragraph; rejoin with nothing.
    HardSlice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub boundary: Boundary,
}

/// Splits `text` into message-sized strings of at most `max_len` characters.
///
/// Returns an empty vector for empty input.
///
/// # Errors
///
/// [`ChunkError::InvalidConfiguration`] when `max_len` is zero.
pub fn chunk_message(text: &str, max_len: usize) -> Result<Vec<String>, ChunkError> {
    Ok(split_chunks(text, max_len)?
        .into_iter()
        .map(|chunk| chunk.text)
        .collect())
}

/// Same as [`chunk_message`], but keeps track of where each split happened.
pub fn split_chunks(text: &str, max_len: usize) -> Result<Vec<Chunk>, ChunkError> {
    if max_len == 0 {
        return Err(ChunkError::InvalidConfiguration(max_len));
    }

    if text.is_empty() {
        return Ok(Vec::new());
    }

    if char_len(text) <= max_len {
        return Ok(vec![Chunk {
            text: text.to_string(),
            boundary: Boundary::Start,
        }]);
    }

    let mut packer = Packer::new(max_len);
    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        packer.push_paragraph(paragraph);
    }

    Ok(packer.finish())
}

/// Reassembles a chunk sequence into the text it was split from.
pub fn rejoin(chunks: &[Chunk]) -> String {
    let mut text = String::new();
    for chunk in chunks {
        if chunk.boundary == Boundary::Paragraph {
            text.push_str(PARAGRAPH_SEPARATOR);
        }
        text.push_str(&chunk.text);
    }
    text
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Greedy paragraph accumulator.
struct Packer {
    max_len: usize,
    chunks: Vec<Chunk>,
    // `None` until a paragraph has been taken; an empty paragraph still counts.
    buffer: Option<String>,
    buffer_len: usize,
    // Boundary the next emitted chunk will carry.
    pending: Boundary,
}

impl Packer {
    fn new(max_len: usize) -> Self {
        Self {
            max_len,
            chunks: Vec::new(),
            buffer: None,
            buffer_len: 0,
            pending: Boundary::Start,
        }
    }

    fn push_paragraph(&mut self, paragraph: &str) {
        let paragraph_len = char_len(paragraph);

        let Some(buffer) = self.buffer.as_mut() else {
            self.start_buffer(paragraph, paragraph_len);
            return;
        };

        if self.buffer_len + SEPARATOR_LEN + paragraph_len <= self.max_len {
            buffer.push_str(PARAGRAPH_SEPARATOR);
            buffer.push_str(paragraph);
            self.buffer_len += SEPARATOR_LEN + paragraph_len;
            return;
        }

        self.flush();
        self.start_buffer(paragraph, paragraph_len);
    }

    /// Takes `paragraph` as the new buffer, or hard-slices it when it is too
    /// long to ever fit.
    fn start_buffer(&mut self, paragraph: &str, paragraph_len: usize) {
        if paragraph_len <= self.max_len {
            self.buffer = Some(paragraph.to_string());
            self.buffer_len = paragraph_len;
            return;
        }

        let mut start = 0;
        let mut count = 0;
        for (idx, _) in paragraph.char_indices() {
            if count == self.max_len {
                self.emit(paragraph[start..idx].to_string());
                self.pending = Boundary::HardSlice;
                start = idx;
                count = 0;
            }
            count += 1;
        }
        self.emit(paragraph[start..].to_string());

        self.buffer = None;
        self.buffer_len = 0;
        self.pending = Boundary::Paragraph;
    }

    fn flush(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.emit(buffer);
            self.buffer_len = 0;
            self.pending = Boundary::Paragraph;
        }
    }

    fn emit(&mut self, text: String) {
        // Discord rejects blank messages, so whitespace-only pieces left at a
        // split point are dropped.
        if text.trim().is_empty() {
            return;
        }

        let boundary = if self.chunks.is_empty() {
            Boundary::Start
        } else {
            self.pending
        };
        self.chunks.push(Chunk { text, boundary });
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}
