// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use posgraph::Registry;

fuzz_target!(|data: &str| {
    let registry = Registry::new();
    let point = registry.create("fuzz", Some(7)).unwrap();

    // Must never panic; success means the input named the live point
    if let Ok(id) = registry.resolve_id(data) {
        assert_eq!(id, point.id);
    }
    let _ = registry.find_by_name(data);
});
