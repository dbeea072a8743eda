#![no_main]

use libfuzzer_sys::fuzz_target;

use gql_parser::{parse, ParserOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let _ = parse(s, ParserOptions::default());
});
