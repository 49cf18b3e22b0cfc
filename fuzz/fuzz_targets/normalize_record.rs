#![no_main]

use libfuzzer_sys::fuzz_target;
use pulse_core::MENU;
use pulse_core::normalize::normalize;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<Value>(data) else {
        return;
    };
    let Ok(record) = normalize(&value) else {
        return;
    };

    assert!(!record.contact_number.trim().is_empty());
    let catalog: usize = MENU.iter().map(|c| c.items.len()).sum();
    assert_eq!(record.orders.keys().count(), catalog);
});
