#![no_main]

use std::path::Path;

use cardpop::config::parse_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Anything that parses must also pass validation.
    if let Ok(config) = parse_config(text, Path::new("fuzz.json")) {
        assert!(config.validate().is_ok());
        assert!(!config.transition_duration.is_zero());
    }
});
