#![no_main]

use std::rc::Rc;

use libfuzzer_sys::fuzz_target;

use gql_parser::{Lexer, Source};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let source = Rc::new(Source::new(s, "fuzz.graphql"));
    let _ = Lexer::new(source);
});
