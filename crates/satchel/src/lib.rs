//! Small, stateless utilities: hashing, one-time passwords, base64 transcoding, plain-text
//! conversion, padding, safe error serialization, and date formatting/arithmetic.
//!
//! Every function is independent and safe to call from any thread; nothing here holds state
//! between calls.

#![forbid(unsafe_code)]

pub mod crypto;
pub mod date;
pub mod encoding;
pub mod error;
pub mod serialize;
pub mod text;

// Re-export the operations callers reach for most
pub use crypto::{generate_otp, sha1};
pub use date::{DateInput, DateUnit, add_date, date};
pub use encoding::{base64_decode, base64_encode};
pub use error::Error;
pub use serialize::{ErrorLike, Subject, serialize_object};
pub use text::{convert_to_plain_text, string_pad};
