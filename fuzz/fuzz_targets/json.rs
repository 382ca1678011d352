#![no_main]
use engine::{build_search_index, evaluate, extract_search_terms, Filter, FilterTag};
use libfuzzer_sys::fuzz_target;
use parsers::parse_json;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(Some(tree)) = parse_json(s) {
            let root = Arc::new(tree);
            let index = build_search_index(&root);
            let terms = extract_search_terms(&root);
            let filter: Filter = terms
                .filter_keys()
                .into_iter()
                .filter_map(|k| {
                    let term = terms.values(k)?.first()?;
                    Some(FilterTag::new(k, term.as_str()))
                })
                .collect();
            let _ = evaluate(&root, &filter, &index);
        }
    }
});
