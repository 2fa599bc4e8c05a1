//! Length-prefixed JSON frame codec.
//!
//! Frames the contract's messages for any reliable byte stream:
//!
//! ```text
//! +--------------+----------------------+
//! | Length (u32 LE) | JSON message body |
//! +--------------+----------------------+
//! ```
//!
//! The length covers the body only. Frames over [`MAX_FRAME_LEN`] are
//! rejected before allocation; a well-formed message never comes close
//! to the cap (values are at most 4096 bytes).

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::TransportError;

/// Upper bound on a frame body, in bytes.
pub const MAX_FRAME_LEN: u32 = 64 * 1024;

/// Writes one framed message.
pub fn write_frame<W: Write, T: Serialize>(
    writer: &mut W,
    message: &T,
) -> Result<(), TransportError> {
    let body = serde_json::to_vec(message).map_err(|e| TransportError::Codec(e.to_string()))?;
    if body.len() as u64 > MAX_FRAME_LEN as u64 {
        return Err(TransportError::Codec(format!(
            "frame body is {} bytes (limit {})",
            body.len(),
            MAX_FRAME_LEN
        )));
    }
    writer.write_all(&(body.len() as u32).to_le_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Reads one framed message.
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> Result<T, TransportError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(TransportError::Codec(format!(
            "frame length {} exceeds limit {}",
            len, MAX_FRAME_LEN
        )));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body)?;
    serde_json::from_slice(&body).map_err(|e| TransportError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Request, Response};
    use std::io::Cursor;

    #[test]
    fn test_frame_round_trip() {
        let request = Request::WriteBytes {
            key: "serial".to_string(),
            value: Some(vec![1, 2, 3]),
        };

        let mut buf = Vec::new();
        write_frame(&mut buf, &request).unwrap();

        let mut cursor = Cursor::new(buf);
        let decoded: Request = read_frame(&mut cursor).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_back_to_back_frames() {
        let first = Request::GetSupportedFeatures;
        let second = Request::ReadBytes {
            key: "k".to_string(),
        };

        let mut buf = Vec::new();
        write_frame(&mut buf, &first).unwrap();
        write_frame(&mut buf, &second).unwrap();

        let mut cursor = Cursor::new(buf);
        let a: Request = read_frame(&mut cursor).unwrap();
        let b: Request = read_frame(&mut cursor).unwrap();
        assert_eq!(a, first);
        assert_eq!(b, second);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(MAX_FRAME_LEN + 1).to_le_bytes());
        buf.extend_from_slice(&[0u8; 16]);

        let mut cursor = Cursor::new(buf);
        let result: Result<Response, _> = read_frame(&mut cursor);
        assert!(matches!(result, Err(TransportError::Codec(_))));
    }

    #[test]
    fn test_truncated_frame_is_io_error() {
        let request = Request::GetSupportedFeatures;
        let mut buf = Vec::new();
        write_frame(&mut buf, &request).unwrap();
        buf.truncate(buf.len() - 2);

        let mut cursor = Cursor::new(buf);
        let result: Result<Request, _> = read_frame(&mut cursor);
        assert!(matches!(result, Err(TransportError::Io(_))));
    }

    #[test]
    fn test_garbage_body_is_codec_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(b"!!!!");

        let mut cursor = Cursor::new(buf);
        let result: Result<Request, _> = read_frame(&mut cursor);
        assert!(matches!(result, Err(TransportError::Codec(_))));
    }
}
