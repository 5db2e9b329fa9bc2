//! Overlapping text chunking with boundary-aware splitting

use unicode_segmentation::UnicodeSegmentation;

use crate::types::TextChunk;

/// Text chunker with configurable size and overlap.
///
/// Splits on the largest boundary that fits: paragraphs first, then
/// sentences, then words, then raw characters. The trailing `overlap`
/// characters of each chunk seed the next one, so a semantic unit spanning a
/// chunk boundary survives in at least one chunk.
pub struct TextChunker {
    /// Target chunk size in bytes
    chunk_size: usize,
    /// Overlap between chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. `overlap` must be smaller than `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(
            overlap < chunk_size,
            "chunk overlap must be smaller than chunk size"
        );

        Self {
            chunk_size,
            overlap,
        }
    }

    /// Split text into overlapping chunks.
    ///
    /// Deterministic for identical input and parameters. Empty input yields
    /// an empty sequence, not an error.
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let units = split_units(text, self.chunk_size);

        let mut chunks: Vec<TextChunk> = Vec::new();
        let mut current = String::new();

        for unit in units {
            if !current.is_empty() && current.len() + unit.len() > self.chunk_size {
                let seed = self.overlap_tail(&current);
                chunks.push(TextChunk::new(std::mem::take(&mut current), chunks.len()));

                // Seed the next chunk with the overlap, unless even the seed
                // plus this unit would not fit.
                if seed.len() + unit.len() <= self.chunk_size {
                    current = seed;
                }
            }
            current.push_str(unit);
        }

        if !current.is_empty() {
            chunks.push(TextChunk::new(current, chunks.len()));
        }

        chunks
    }

    /// Trailing overlap of a finished chunk, aligned to a character boundary
    fn overlap_tail(&self, text: &str) -> String {
        if text.len() <= self.overlap {
            return text.to_string();
        }

        let mut start = text.len() - self.overlap;
        while start > 0 && !text.is_char_boundary(start) {
            start -= 1;
        }

        text[start..].to_string()
    }
}

/// Split text into units no larger than `max`, descending from paragraph to
/// sentence to word to character boundaries only as needed. Concatenating
/// the units reproduces the input exactly.
fn split_units(text: &str, max: usize) -> Vec<&str> {
    let mut units = Vec::new();

    for paragraph in text.split_inclusive("\n\n") {
        if paragraph.len() <= max {
            units.push(paragraph);
            continue;
        }

        for sentence in paragraph.split_sentence_bounds() {
            if sentence.len() <= max {
                units.push(sentence);
                continue;
            }

            for word in sentence.split_word_bounds() {
                if word.len() <= max {
                    units.push(word);
                    continue;
                }

                // Degenerate run longer than a whole chunk; cut at character
                // boundaries.
                let mut rest = word;
                while rest.len() > max {
                    let mut cut = max;
                    while !rest.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    units.push(&rest[..cut]);
                    rest = &rest[cut..];
                }
                if !rest.is_empty() {
                    units.push(rest);
                }
            }
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        (1..=30)
            .map(|i| format!("Clause {} covers a distinct benefit of the policy.", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(500, 200);
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn short_input_yields_single_chunk() {
        let chunker = TextChunker::new(500, 200);
        let chunks = chunker.chunk("Maternity cover begins after 24 months.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Maternity cover begins after 24 months.");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn chunks_respect_size_limit() {
        let chunker = TextChunker::new(120, 40);
        for chunk in chunker.chunk(&sample_text()) {
            assert!(
                chunk.content.len() <= 120,
                "chunk of {} bytes exceeds limit",
                chunk.content.len()
            );
        }
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let chunker = TextChunker::new(200, 80);
        let chunks = chunker.chunk(&sample_text());
        assert!(chunks.len() > 2);

        for pair in chunks.windows(2) {
            // The next chunk starts with a suffix of the previous one.
            let shared = (1..=pair[1].content.len().min(pair[0].content.len()))
                .rev()
                .find(|n| pair[0].content.ends_with(&pair[1].content[..*n]));
            assert!(shared.is_some(), "no overlap between consecutive chunks");
        }
    }

    #[test]
    fn stripping_overlaps_reconstructs_input() {
        let text = sample_text();
        let chunker = TextChunker::new(150, 50);
        let chunks = chunker.chunk(&text);

        let mut rebuilt = chunks[0].content.clone();
        for chunk in &chunks[1..] {
            let overlap = (0..=chunk.content.len().min(rebuilt.len()))
                .rev()
                .find(|n| rebuilt.ends_with(&chunk.content[..*n]))
                .unwrap_or(0);
            rebuilt.push_str(&chunk.content[overlap..]);
        }

        assert_eq!(rebuilt, text);
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = sample_text();
        let chunker = TextChunker::new(180, 60);
        assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }

    #[test]
    fn paragraph_boundaries_preferred_when_they_fit() {
        let text = "First paragraph stays whole.\n\nSecond paragraph stays whole too.";
        let chunker = TextChunker::new(40, 10);
        let chunks = chunker.chunk(text);
        assert!(chunks[0].content.starts_with("First paragraph"));
        assert!(chunks.iter().any(|c| c.content.contains("Second paragraph")));
    }

    #[test]
    fn handles_multibyte_input_without_panicking() {
        let text = "Grenzüberschreitende Deckung gilt für Versicherte. ".repeat(20);
        let chunker = TextChunker::new(100, 30);
        let chunks = chunker.chunk(&text);
        assert!(!chunks.is_empty());
        for chunk in chunks {
            assert!(chunk.content.len() <= 100);
        }
    }

    #[test]
    #[should_panic(expected = "overlap must be smaller")]
    fn overlap_must_be_smaller_than_size() {
        TextChunker::new(100, 100);
    }
}
