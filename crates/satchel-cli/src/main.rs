//! The satchel command-line front end

use std::io::Write;

use clap::Parser;
use satchel::date::{DateFormat, DateInput};
use satchel::encoding::{base64_decode_bytes, hexdump};
use satchel::serialize::StdError;
use satchel::{
    add_date, base64_decode, base64_encode, convert_to_plain_text, crypto, date, serialize_object,
    sha1, string_pad,
};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::args::{Args, Command};

mod args;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Satchel(#[from] satchel::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    fn to_record(&self) -> Map<String, Value> {
        match self {
            CliError::Satchel(e) => serialize_object(e),
            CliError::Io(e) => serialize_object(&StdError::new(e)),
        }
    }
}

fn main() {
    let args = Args::parse();

    enable_logging(&args);
    debug!("command line: {:?}", args);

    let mut stdout = std::io::stdout().lock();

    if let Err(e) = run(args.command, &mut stdout) {
        error!("{}", e);
        eprintln!("{}", Value::Object(e.to_record()));
        std::process::exit(1);
    }
}

fn run<W: Write>(command: Command, out: &mut W) -> Result<(), CliError> {
    match command {
        Command::Sha1 { input } => writeln!(out, "{}", sha1(&input))?,
        Command::Otp { length } => writeln!(out, "{}", crypto::generate_otp(length))?,
        Command::Base64Encode { input } => writeln!(out, "{}", base64_encode(&input))?,
        Command::Base64Decode { input, dump } => {
            if dump {
                hexdump(&base64_decode_bytes(&input)?, out)?;
            } else {
                writeln!(out, "{}", base64_decode(&input)?)?;
            }
        }
        Command::Plain { input } => writeln!(out, "{}", convert_to_plain_text(&input))?,
        Command::Pad { value, length, pad } => {
            writeln!(out, "{}", string_pad(&value, length, &pad))?
        }
        Command::Serialize { input } => {
            let value = serde_json::from_str::<Value>(&input).unwrap_or(Value::String(input));
            writeln!(out, "{}", Value::Object(serialize_object(value)))?;
        }
        Command::Date { date: input, format } => {
            writeln!(out, "{}", date(&format, DateInput::from(input))?)?
        }
        Command::AddDate {
            value,
            unit,
            date: input,
            format,
        } => {
            let result = add_date(input, value, &unit)?;
            match format {
                Some(template) => writeln!(out, "{}", DateFormat::parse(&template).render(&result))?,
                None => writeln!(out, "{result}")?,
            }
        }
    }

    Ok(())
}

fn enable_logging(args: &Args) {
    let mut builder = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr);

    if args.quiet {
        builder = builder.with_max_level(tracing::Level::ERROR);
    } else {
        match args.verbose {
            2.. => builder = builder.with_max_level(tracing::Level::TRACE),
            1 => builder = builder.with_max_level(tracing::Level::DEBUG),
            _ => builder = builder.with_max_level(tracing::Level::INFO),
        }
    }

    builder.init();
}
