//! Base64 transcoding and other encoding helpers
//!
//! Malformed input is never guessed at: decoding returns [`Error::Decode`] for bad base64 and
//! [`Error::Utf8`] when text was requested but the payload isn't UTF-8.

use std::io::Write;

use data_encoding::{BASE64, BASE64_NOPAD, BASE64URL, BASE64URL_NOPAD, HEXLOWER, HEXUPPER};
use tracing::{debug, trace};

use crate::error::Error;

/// Standard (padded) base64 encoding of the UTF-8 bytes of `data`.
pub fn base64_encode(data: &str) -> String {
    base64_encode_bytes(data.as_bytes())
}

/// Standard (padded) base64 encoding of `data`.
pub fn base64_encode_bytes(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Inverse of [`base64_encode`]: decodes standard padded base64 and interprets the bytes as
/// UTF-8.
pub fn base64_decode(data: &str) -> Result<String, Error> {
    let bytes = base64_decode_bytes(data)?;
    Ok(String::from_utf8(bytes)?)
}

/// Decodes standard padded base64 into raw bytes.
pub fn base64_decode_bytes(data: &str) -> Result<Vec<u8>, Error> {
    BASE64.decode(data.as_bytes()).map_err(|e| {
        debug!("base64 decode failed at position {}: {}", e.position, e.kind);
        Error::Decode(e)
    })
}

/// Attempt to decode `encoded_value` into a `Vec<u8>` using multiple encoding formats until
/// one succeeds: hex (either case), then base64url and base64, each with or without padding.
pub fn try_decode(encoded_value: &str) -> Result<Vec<u8>, Error> {
    trace!("lenient decode of {} bytes", encoded_value.len());

    let value = HEXLOWER
        .decode(encoded_value.as_bytes())
        .or_else(|_| HEXUPPER.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64URL.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64URL_NOPAD.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64.decode(encoded_value.as_bytes()))
        .or_else(|_| BASE64_NOPAD.decode(encoded_value.as_bytes()))?;

    Ok(value)
}

/// Write a hex dump of the provided data to the writer.
///
/// The output format is similar to traditional hex dump tools:
/// - 8-digit hex offset
/// - 16 bytes per line in hex (grouped by 2 bytes)
/// - ASCII representation on the right
pub fn hexdump<W: Write>(data: &[u8], writer: &mut W) -> std::io::Result<()> {
    const BYTES_PER_LINE: usize = 16;

    for (offset, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        write!(writer, "{:08x}: ", offset * BYTES_PER_LINE)?;

        for (i, byte) in chunk.iter().enumerate() {
            write!(writer, "{byte:02x}")?;
            if i % 2 == 1 {
                write!(writer, " ")?;
            }
        }

        let padding = BYTES_PER_LINE - chunk.len();
        for i in 0..padding {
            write!(writer, "  ")?;
            if (chunk.len() + i) % 2 == 1 {
                write!(writer, " ")?;
            }
        }

        write!(writer, " |")?;
        for byte in chunk {
            let ch = if byte.is_ascii_graphic() || *byte == b' ' {
                *byte as char
            } else {
                '.'
            };
            write!(writer, "{ch}")?;
        }
        writeln!(writer, "|")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use data_encoding::DecodeKind;

    use super::*;

    #[test]
    fn encode_known_values() {
        assert_eq!(base64_encode(""), "");
        assert_eq!(base64_encode("f"), "Zg==");
        assert_eq!(base64_encode("fo"), "Zm8=");
        assert_eq!(base64_encode("foo"), "Zm9v");
        assert_eq!(base64_encode("Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
    }

    #[test]
    fn encode_multibyte_text() {
        assert_eq!(base64_encode("é"), "w6k=");
        assert_eq!(base64_decode("w6k=").unwrap(), "é");
    }

    #[test]
    fn decode_known_values() {
        assert_eq!(base64_decode("SGVsbG8sIFdvcmxkIQ==").unwrap(), "Hello, World!");
        assert_eq!(base64_decode("").unwrap(), "");
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(matches!(
            base64_decode("not base64!"),
            Err(Error::Decode(_))
        ));
        // Missing padding is not standard base64
        assert!(matches!(base64_decode("Zg"), Err(Error::Decode(_))));
    }

    #[test]
    fn decode_rejects_non_utf8_payload() {
        let encoded = base64_encode_bytes(&[0xff, 0xfe, 0xfd]);
        assert!(matches!(base64_decode(&encoded), Err(Error::Utf8(_))));
        assert_eq!(base64_decode_bytes(&encoded).unwrap(), vec![0xff, 0xfe, 0xfd]);
    }

    #[test]
    fn lenient_decode_hex_lower() {
        let value = "0101010101010101";
        assert_eq!(try_decode(value).unwrap(), vec![0x01u8; 8]);
    }

    #[test]
    fn lenient_decode_hex_upper() {
        let value = "0A0A0A0A";
        assert_eq!(try_decode(value).unwrap(), vec![0x0au8; 4]);
    }

    #[test]
    fn lenient_decode_base64_variants() {
        // 32 bytes of 0x42, padded and unpadded
        let padded = "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI=";
        let unpadded = "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI";
        assert_eq!(try_decode(padded).unwrap(), vec![0x42u8; 32]);
        assert_eq!(try_decode(unpadded).unwrap(), vec![0x42u8; 32]);

        // base64url alphabet
        assert_eq!(try_decode("-_8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn lenient_decode_invalid() {
        let result = try_decode("not-a-valid-encoding!!!");
        assert!(matches!(
            result,
            Err(Error::Decode(data_encoding::DecodeError { .. }))
        ));
    }

    #[test]
    fn decode_error_reports_position() {
        match base64_decode_bytes("Zm9v!AAA") {
            Err(Error::Decode(e)) => {
                assert_eq!(e.position, 4);
                assert_eq!(e.kind, DecodeKind::Symbol);
            }
            other => panic!("expected a symbol error, got {other:?}"),
        }
    }

    #[test]
    fn test_hexdump() {
        let data = b"Hello, World! This is a test.";
        let mut output = Vec::new();

        hexdump(data, &mut output).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("00000000:"));
        assert!(result.contains("4865 6c6c")); // "Hell" with space
        assert!(result.contains("|Hello, World! Th|"));
        assert!(result.contains("|is is a test.|"));
    }

    #[test]
    fn test_hexdump_short() {
        let data = b"Test";
        let mut output = Vec::new();

        hexdump(data, &mut output).unwrap();
        let result = String::from_utf8(output).unwrap();

        assert!(result.contains("00000000: 5465 7374"));
        assert!(result.contains("|Test|"));
    }
}
