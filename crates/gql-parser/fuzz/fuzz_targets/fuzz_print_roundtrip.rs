#![no_main]

use libfuzzer_sys::fuzz_target;

use gql_parser::{parse, print, ParserOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(document) = parse(s, ParserOptions::default()) {
        let printed = print(&document);
        let _ = parse(printed.as_str(), ParserOptions::default());
    }
});
