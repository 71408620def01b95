#![allow(dead_code)]

use cmdtpl_rs::{Template, scan};

/// Scan `input` and assert the segments reassemble it verbatim.
pub fn scan_roundtrip(input: &str) -> Template {
    let template = scan(input).expect("scan failed");
    assert_eq!(
        template.reconstruct(input),
        input,
        "reconstruction mismatch for {input:?}"
    );
    template
}
