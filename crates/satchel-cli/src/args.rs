#![doc(hidden)]

use clap::Parser;
use satchel::crypto::DEFAULT_OTP_LENGTH;
use satchel::date::DEFAULT_DATE_FORMAT;

/// Arguments for the satchel CLI
#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Hashing, OTP, base64, text and date utilities")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Output details; specify multiple times for more detail"
    )]
    pub verbose: u8,

    #[clap(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Only log errors"
    )]
    pub quiet: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// SHA-1 fingerprint of the input (not for security-sensitive use)
    Sha1 {
        #[clap(help = "Text to hash")]
        input: String,
    },
    /// Generate a numeric one-time password
    Otp {
        #[clap(
            short,
            long,
            value_name = "DIGITS",
            help = "Number of digits",
            default_value_t = DEFAULT_OTP_LENGTH
        )]
        length: usize,
    },
    /// Base64 encode the input text
    Base64Encode {
        #[clap(help = "Text to encode")]
        input: String,
    },
    /// Decode standard base64 back to text
    Base64Decode {
        #[clap(help = "Base64 to decode")]
        input: String,

        #[clap(long, help = "Print a hex dump of the decoded bytes instead of text")]
        dump: bool,
    },
    /// Convert lightly formatted text (entities, *emphasis*, newlines) to a single plain line
    Plain {
        #[clap(help = "Formatted text")]
        input: String,
    },
    /// Left-pad a value to a fixed width
    Pad {
        #[clap(help = "Value to pad")]
        value: String,

        #[clap(short, long, value_name = "WIDTH", help = "Total width after padding")]
        length: usize,

        #[clap(
            short = 'c',
            long = "char",
            value_name = "PAD",
            help = "Padding character (or string)",
            default_value = "0"
        )]
        pad: String,
    },
    /// Serialize a JSON value or plain message into a safe error record
    Serialize {
        #[clap(help = "JSON value; anything that isn't JSON is treated as a message")]
        input: String,
    },
    /// Format a date (default: now) with a token template
    Date {
        #[clap(help = "Date to format; omit for the current time")]
        date: Option<String>,

        #[clap(
            short,
            long,
            value_name = "TEMPLATE",
            help = "Template using YYYY YY MMMM MMM MM M DD HH hh mm ss A",
            default_value = DEFAULT_DATE_FORMAT
        )]
        format: String,
    },
    /// Add (or subtract) calendar units to a date
    AddDate {
        #[clap(allow_negative_numbers = true, help = "Amount to add; negative to subtract")]
        value: i64,

        #[clap(
            short,
            long,
            help = "years, months, days, hours, minutes or seconds",
            default_value = "days"
        )]
        unit: String,

        #[clap(short, long, help = "Starting date; omit for the current time")]
        date: Option<String>,

        #[clap(
            short,
            long,
            value_name = "TEMPLATE",
            help = "Template for the result; omit for RFC 9557 output"
        )]
        format: Option<String>,
    },
}
