#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    let status = gitter::parse_status_z(&input);
    assert_eq!(status, gitter::parse_status_z(&input));
    if input.chars().all(|c| c == '\0') {
        assert!(status.is_clean());
    }

    let _ = gitter::parse_status_porcelain(&input);
});
