//! Property tests: every record assembled through the setters renders to a
//! payload that parses back to the same record without errors.

use proptest::prelude::*;

use spc_core::{parse, ActorRecord, ActorRole, Amount, Modulo10, PaymentRecord, Version};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const NAME: &str = "[A-Za-z]{1,15}( [A-Za-z]{1,15})?";
const FREE_TEXT: &str = "([A-Za-z0-9/.;:][A-Za-z0-9 /.;:]{0,58}[A-Za-z0-9])? {0,3}";
const SCHEME_LINE: &str = "([A-Za-z0-9]{2}[/;][A-Za-z0-9 /;]{0,36}[A-Za-z0-9])? {0,2}";

fn country() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("CH"), Just("LI"), Just("DE"), Just("FR")]
}

prop_compose! {
    fn structured_actor()(
        name in NAME,
        street in NAME,
        number in "[0-9]{1,4}",
        postcode in "[0-9]{4}",
        location in "[A-Za-z]{1,20}",
        country_code in country(),
    ) -> ActorRecord {
        ActorRecord::structured(name, street, number, postcode, location, country_code)
    }
}

prop_compose! {
    fn combined_actor()(
        name in NAME,
        line_1 in NAME,
        line_2 in "[0-9]{4} [A-Za-z]{1,20}",
        country_code in country(),
    ) -> ActorRecord {
        ActorRecord::combined(name, line_1, line_2, country_code)
    }
}

fn optional_actor(version: Version) -> BoxedStrategy<Option<ActorRecord>> {
    match version {
        // Combined addresses carry no postcode, which 1.0 requires.
        Version::V1_0 => prop_oneof![Just(None), structured_actor().prop_map(Some)].boxed(),
        Version::V2_0 => prop_oneof![
            Just(None),
            structured_actor().prop_map(Some),
            combined_actor().prop_map(Some),
        ]
        .boxed(),
    }
}

fn reference() -> impl Strategy<Value = (&'static str, String)> {
    prop_oneof![
        Just(("NON", String::new())),
        "[0-9]{26}".prop_map(|body| ("QRR", Modulo10::complete(&body).unwrap_or_default())),
        "RF[0-9]{2}[A-Z0-9]{1,21}".prop_map(|r| ("SCOR", r)),
    ]
}

fn payment_record() -> impl Strategy<Value = PaymentRecord> {
    prop_oneof![Just(Version::V1_0), Just(Version::V2_0)]
        .prop_flat_map(|version| {
            (
                (
                    Just(version),
                    "[0-9]{19}",
                    proptest::option::of(0u64..=99_999_999_999),
                    prop_oneof![Just("CHF"), Just("EUR")],
                    proptest::option::of((2018i32..=2100, 1u32..=12, 1u32..=28)),
                ),
                (reference(), FREE_TEXT, FREE_TEXT, SCHEME_LINE, SCHEME_LINE),
                (
                    structured_actor(),
                    optional_actor(version),
                    optional_actor(version),
                ),
            )
        })
        .prop_map(
            |(
                (version, iban_digits, cents, currency, due),
                ((reference_type, reference), message, bill_info, scheme_1, scheme_2),
                (creditor, ultimate_creditor, ultimate_debtor),
            )| {
                let mut record = PaymentRecord::new();
                record.set_version(version);
                record.set_iban(&format!("CH{iban_digits}"));
                record.set_amount_value(cents.and_then(|c| Amount::from_cents(c).ok()));
                record.set_currency(currency);
                if let Some((y, m, d)) = due {
                    record.set_due_date(y, m, d);
                }
                record.set_reference(reference_type, &reference);
                record.set_unstructured_message(&message);
                record.set_bill_info(&bill_info);
                record.set_alternative_schemes(&[scheme_1.as_str(), scheme_2.as_str()]);
                record.set_actor(ActorRole::Creditor, creditor);
                if let Some(actor) = ultimate_creditor {
                    record.set_actor(ActorRole::UltimateCreditor, actor);
                }
                if let Some(actor) = ultimate_debtor {
                    record.set_actor(ActorRole::UltimateDebtor, actor);
                }
                record
            },
        )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn generated_records_are_valid(record in payment_record()) {
        prop_assert!(record.is_valid(), "{}\n---\n{}", record.validate(), record.render());
    }

    #[test]
    fn parse_render_reproduces_record(record in payment_record()) {
        let text = record.render();
        let parsed = parse(&text);
        prop_assert!(parsed.errors.is_empty(), "{}", parsed.errors);
        prop_assert_eq!(&parsed.record, &record);
        prop_assert_eq!(parsed.record.render(), text);
    }

    #[test]
    fn version_matches_layout_length(record in payment_record()) {
        let text = record.render();
        let expected = match record.version() {
            Version::V1_0 => 30,
            Version::V2_0 => 34,
        };
        prop_assert_eq!(record.layout().len(), expected);
        prop_assert!(text.split('\n').count() <= expected);
        prop_assert!(text.split('\n').count() >= 25);
    }
}
