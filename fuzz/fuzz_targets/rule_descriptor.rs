#![no_main]

use libfuzzer_sys::fuzz_target;
use tabulet::{GcRule, RuleDescriptor};

// Fuzz target for descriptor decoding.
// Arbitrary bytes must never panic the decoder, and every descriptor it
// accepts must satisfy the round-trip law.
fuzz_target!(|data: &[u8]| {
    if data.len() > 65535 {
        return;
    }

    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(descriptor) = RuleDescriptor::from_json(json) else {
        return;
    };

    match GcRule::from_descriptor(&descriptor) {
        Ok(rule) => {
            // Accepted rules must be valid and round-trippable.
            rule.validate().expect("decoded rule failed validation");

            let encoded = rule.to_descriptor();
            let decoded = GcRule::from_descriptor(&encoded)
                .expect("re-encoded descriptor failed to decode");
            assert_eq!(decoded, rule, "round trip changed the rule");
        }
        Err(status) => {
            assert!(
                status.is_malformed_rule() || status.is_invalid_rule(),
                "unexpected error kind from decoder: {status}"
            );
        }
    }
});
