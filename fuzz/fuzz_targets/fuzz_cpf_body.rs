//! Fuzz target: `POST /cpf` body parsing.
//!
//! Arbitrary bytes fed to the body parser must never panic; a successful
//! parse always yields a non-empty CPF string.

#![no_main]

use libfuzzer_sys::fuzz_target;
use praxis_gateway::routes::parse_cpf_body;

fuzz_target!(|data: &[u8]| {
    if let Ok(cpf) = parse_cpf_body(data) {
        assert!(!cpf.is_empty(), "parsed cpf must be non-empty");
        let _ = praxis_core::validate(&cpf);
    }
});
