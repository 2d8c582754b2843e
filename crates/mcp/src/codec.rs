// Line framing for inbound JSON-RPC messages

use bytes::BytesMut;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

/// Default cap on a single inbound message, newline excluded
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

/// A line that could not be turned into a message string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("message is not valid UTF-8")]
    InvalidUtf8,

    #[error("message exceeds the maximum length")]
    TooLong,
}

/// Newline-delimited framing that reports bad lines as items instead of stream errors.
///
/// `FramedRead` ends the stream after a decoder error, so per-line problems are
/// yielded as `Err(FrameError)` and only I/O failures terminate the stream.
#[derive(Debug)]
pub struct MessageLineCodec {
    inner: LinesCodec,
}

impl MessageLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn classify(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<Result<String, FrameError>>, std::io::Error> {
        match result {
            Ok(line) => Ok(line.map(Ok)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Err(FrameError::TooLong))),
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Err(FrameError::InvalidUtf8)))
            }
            Err(LinesCodecError::Io(e)) => Err(e),
        }
    }
}

impl Default for MessageLineCodec {
    fn default() -> Self {
        Self::new(MAX_MESSAGE_BYTES)
    }
}

impl Decoder for MessageLineCodec {
    type Item = Result<String, FrameError>;
    type Error = std::io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::classify(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::classify(self.inner.decode_eof(buf))
    }
}
