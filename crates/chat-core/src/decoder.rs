//! Incremental UTF-8 decoding for streamed reply bodies.
//!
//! Chunk boundaries are arbitrary byte offsets, so a multi-byte character can
//! arrive split over two chunks. The decoder holds back an incomplete trailing
//! sequence until the next chunk completes it. Invalid bytes decode to U+FFFD.

use std::char::REPLACEMENT_CHARACTER;

#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode as much of `chunk` (plus held-back bytes) as forms complete characters
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(err) => {
                    let valid_end = start + err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));

                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        // Incomplete sequence at the end: wait for more bytes
                        None => {
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Flush held-back bytes at end of stream
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }

    /// Bytes waiting for the rest of a character
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
