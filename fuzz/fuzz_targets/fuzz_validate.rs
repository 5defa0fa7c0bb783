//! Fuzz target: CPF validation on arbitrary text.
//!
//! `validate` must never panic, and must agree with `Cpf::parse`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use praxis_core::{validate, Cpf};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let verdict = validate(input);
    match Cpf::parse(input) {
        Ok(cpf) => {
            assert!(verdict, "parse succeeded but validate rejected {input:?}");
            // Re-parsing the canonical forms must succeed.
            assert!(validate(&cpf.to_string()));
            assert!(validate(&cpf.digits()));
        }
        Err(_) => assert!(!verdict, "parse failed but validate accepted {input:?}"),
    }
});
