// Property-based tests for ISO-4217 code validation

use paybridge::Currency;
use proptest::prelude::*;

proptest! {
    #[test]
    fn three_letter_codes_parse_and_uppercase(code in "[A-Za-z]{3}") {
        let currency: Currency = code.parse().unwrap();

        prop_assert_eq!(currency.as_str(), code.to_uppercase());
        prop_assert_eq!(currency.to_string(), code.to_uppercase());
    }

    #[test]
    fn wrong_length_codes_rejected(code in "[A-Z]{0,2}|[A-Z]{4,10}") {
        prop_assert!(code.parse::<Currency>().is_err());
    }

    #[test]
    fn codes_with_digits_rejected(code in "[A-Z][0-9][A-Z]") {
        prop_assert!(code.parse::<Currency>().is_err());
    }

    #[test]
    fn serde_roundtrip(code in "[A-Z]{3}") {
        let currency: Currency = code.parse().unwrap();
        let json = serde_json::to_string(&currency).unwrap();

        prop_assert_eq!(&json, &format!("\"{}\"", code));

        let back: Currency = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, currency);
    }
}

#[test]
fn deserializing_malformed_code_fails() {
    assert!(serde_json::from_str::<Currency>("\"EU\"").is_err());
    assert!(serde_json::from_str::<Currency>("\"978\"").is_err());
}
