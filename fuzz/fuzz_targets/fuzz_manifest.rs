//! Fuzz target: device manifest decoding
//!
//! Feeds arbitrary bytes to both manifest decoders and verifies:
//! - No panics under arbitrary byte inputs
//! - Any manifest that validates also builds its device set and motor
//!   groups, with no port declared twice
//!
//! cargo fuzz run fuzz_manifest

#![no_main]

use libfuzzer_sys::fuzz_target;
use portguard::config::MonitorConfig;

fn check(config: &MonitorConfig) {
    let set = config
        .device_set()
        .expect("validated manifest must build a device set");
    assert_eq!(set.len(), config.devices.len());

    let mut ports: Vec<u8> = set.iter().map(|d| d.port().number()).collect();
    ports.sort_unstable();
    ports.dedup();
    assert_eq!(ports.len(), set.len(), "duplicate port survived validation");

    let groups = config
        .motor_groups()
        .expect("validated manifest must build its motor groups");
    assert!(groups.iter().all(|(_, g)| !g.is_empty()));
}

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = MonitorConfig::from_json(data) {
        check(&config);
    }
    if let Ok(config) = MonitorConfig::from_postcard(data) {
        check(&config);
    }
});
