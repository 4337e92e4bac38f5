use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid date: '{0}'")]
    InvalidDate(String),

    #[error("unsupported date unit: '{0}' (expected years, months, days, hours, minutes or seconds)")]
    UnsupportedUnit(String),

    #[error("date arithmetic out of range: {0}")]
    DateRange(#[from] jiff::Error),

    #[error("invalid base64: {0}")]
    Decode(#[from] data_encoding::DecodeError),

    #[error("decoded bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
