#![no_main]
use engine::{build_search_index, extract_position};
use libfuzzer_sys::fuzz_target;
use parsers::parse_javascript;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(Some(tree)) = parse_javascript(s) {
            let root = Arc::new(tree);
            let index = build_search_index(&root);
            for node in index.lookup("type", "Identifier") {
                if let Some(span) = extract_position(node, Some(s)) {
                    let _ = span.slice(s);
                }
            }
        }
    }
});
