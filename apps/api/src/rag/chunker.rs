//! Text chunking for the retrieval index.
//!
//! Splits on paragraph boundaries first, packing whole paragraphs into
//! chunks of at most `CHUNK_SIZE` characters; a paragraph longer than a
//! chunk is hard-split by a sliding character window that carries
//! `CHUNK_OVERLAP` characters between adjacent windows.

/// Max chunk length in characters.
pub const CHUNK_SIZE: usize = 900;
/// Characters shared between adjacent windows of a hard-split paragraph.
pub const CHUNK_OVERLAP: usize = 150;

pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        let paragraph_len = paragraph.chars().count();

        if paragraph_len > chunk_size {
            flush(&mut chunks, &mut current, &mut current_len);
            hard_split(paragraph, chunk_size, overlap, &mut chunks);
            continue;
        }

        // +2 for the paragraph separator rejoined below.
        if current_len > 0 && current_len + 2 + paragraph_len > chunk_size {
            flush(&mut chunks, &mut current, &mut current_len);
        }

        if current_len > 0 {
            current.push_str("\n\n");
            current_len += 2;
        }
        current.push_str(paragraph);
        current_len += paragraph_len;
    }

    flush(&mut chunks, &mut current, &mut current_len);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &mut String, current_len: &mut usize) {
    if *current_len > 0 {
        chunks.push(std::mem::take(current));
        *current_len = 0;
    }
}

fn hard_split(paragraph: &str, chunk_size: usize, overlap: usize, chunks: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();
    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut start = 0;
    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
}
