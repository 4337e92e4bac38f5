#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use satchel::date::{DateFormat, DateInput};
use satchel::{DateUnit, add_date};

#[derive(Arbitrary, Debug)]
struct FuzzDate<'a> {
    template: &'a str,
    input: &'a str,
    millis: i64,
    amount: i64,
    unit: u8,
}

fuzz_target!(|fuzz: FuzzDate<'_>| {
    let format = DateFormat::parse(fuzz.template);

    // Unparseable dates are errors, never panics
    if let Ok(zoned) = DateInput::from(fuzz.input).resolve() {
        let _ = format.render(&zoned);
    }

    let unit = match fuzz.unit % 6 {
        0 => DateUnit::Years,
        1 => DateUnit::Months,
        2 => DateUnit::Days,
        3 => DateUnit::Hours,
        4 => DateUnit::Minutes,
        _ => DateUnit::Seconds,
    };

    if let Ok(shifted) = add_date(DateInput::EpochMillis(fuzz.millis), fuzz.amount, &unit.to_string()) {
        let _ = format.render(&shifted);
    }
});
