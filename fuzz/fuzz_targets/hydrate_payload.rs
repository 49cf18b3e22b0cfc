#![no_main]

use libfuzzer_sys::fuzz_target;
use pulse_core::session::{Hydration, hydrate};
use std::collections::HashSet;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let (records, hydration) = hydrate(Some(raw));

    let keys: HashSet<&str> = records.iter().map(|r| r.contact_number.as_str()).collect();
    assert_eq!(keys.len(), records.len());
    if let Hydration::Stored { kept, .. } = hydration {
        assert_eq!(kept, records.len());
    }
});
