#![no_main]
use generic_uri::pct_enc::{decode, encode, quote, table};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let quoted = quote(data, table::URIC);
    assert_eq!(decode(&quoted, false), data);

    let encoded = encode(&quoted);
    assert!(encoded.is_ascii());
    assert_eq!(decode(&encoded, false), data);
});
