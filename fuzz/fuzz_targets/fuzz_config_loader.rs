#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use taskgate::config::loader::load_from_str;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        // Loading must never panic, and a successful load always upholds
        // the prefix and key invariants.
        if let Ok(result) = load_from_str(json, Path::new("fuzz.json")) {
            let config = result.config;
            let prefix = config.url_prefix();
            assert!(prefix.is_empty() || prefix.starts_with('/'));
            assert!(!config.tasks().is_empty());
            for (key, task) in config.tasks() {
                assert_eq!(*key, task.name().to_lowercase());
                assert!(!task.name().is_empty() && !task.name().contains('/'));
            }
        }
    }
});
