#![no_main]
use generic_uri::Uri;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (Ok(base), Ok(child)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    let target = base.resolve(&child);
    let reparsed = Uri::parse(target.as_str()).unwrap();
    assert_eq!(target, reparsed);

    if base.is_absolute() && !base.is_opaque() {
        assert!(target.is_absolute());
    }

    // Relativizing against a directory and resolving again is lossless.
    if base.is_absolute() && base.path().is_some_and(|p| p.ends_with('/')) {
        let base = base.normalize();
        let target = target.normalize();
        let rel = base.relativize(&target);
        Uri::parse(rel.as_str()).unwrap();
        assert_eq!(base.resolve(&rel), target);
    }
});
