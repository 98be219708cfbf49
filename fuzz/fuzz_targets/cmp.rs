#![no_main]
use generic_uri::Uri;
use libfuzzer_sys::fuzz_target;
use std::{
    cmp::Ordering,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn hash_of<T: Hash>(x: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    x.hash(&mut hasher);
    hasher.finish()
}

fuzz_target!(|data: (&str, &str)| {
    let (Ok(a), Ok(b)) = (Uri::parse(data.0), Uri::parse(data.1)) else {
        return;
    };

    assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    if a == b {
        assert_eq!(hash_of(&a), hash_of(&b));
    }
    assert_eq!(a, a.to_owned());
});
