//! Append-only byte accumulator that reassembles CRLF-terminated IRC
//! messages out of arbitrarily-chunked socket reads (§4.1).

const CRLF: &[u8] = b"\r\n";

/// Per-connection receive buffer. A message is the byte sequence up to
/// and including the first CRLF; `extract` hands back complete messages
/// (CRLF retained, per §9 Open Question (b)) and leaves any trailing
/// partial message buffered for the next `append`.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    /// Pulls every complete CRLF-terminated message out of the buffer,
    /// in arrival order, leaving an incomplete tail (if any) in place.
    pub fn extract(&mut self) -> Vec<Vec<u8>> {
        let mut messages = Vec::new();
        let mut start = 0;
        while let Some(pos) = find_crlf(&self.bytes[start..]) {
            let end = start + pos + CRLF.len();
            messages.push(self.bytes[start..end].to_vec());
            start = end;
        }
        if start > 0 {
            self.bytes.drain(0..start);
        }
        messages
    }

    /// Returns the bytes currently buffered without consuming them.
    pub fn peek(&self) -> &[u8] {
        &self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn find_crlf(haystack: &[u8]) -> Option<usize> {
    haystack.windows(2).position(|w| w == CRLF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_crlf_across_appends() {
        let mut buf = ByteBuffer::new();
        buf.append(b"X\r");
        assert!(buf.extract().is_empty());
        buf.append(b"\nY");
        let msgs = buf.extract();
        assert_eq!(msgs, vec![b"X\r\n".to_vec()]);
        assert_eq!(buf.peek(), b"Y");
    }

    #[test]
    fn multiple_messages_in_one_append() {
        let mut buf = ByteBuffer::new();
        buf.append(b"NICK alice\r\nUSER alice 0 * :Alice\r\n");
        let msgs = buf.extract();
        assert_eq!(
            msgs,
            vec![
                b"NICK alice\r\n".to_vec(),
                b"USER alice 0 * :Alice\r\n".to_vec(),
            ]
        );
    }

    #[test]
    fn incomplete_tail_stays_buffered() {
        let mut buf = ByteBuffer::new();
        buf.append(b"PING :tok");
        assert!(buf.extract().is_empty());
        assert_eq!(buf.peek(), b"PING :tok");
    }

    #[test]
    fn round_trip_without_crlf_never_emits() {
        let mut buf = ByteBuffer::new();
        for chunk in [b"ab".as_slice(), b"cd".as_slice(), b"ef".as_slice()] {
            buf.append(chunk);
            assert!(buf.extract().is_empty());
        }
        assert_eq!(buf.peek(), b"abcdef");
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buf = ByteBuffer::new();
        buf.append(b"abc");
        buf.clear();
        assert!(buf.is_empty());
    }
}
