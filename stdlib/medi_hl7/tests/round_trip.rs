use medi_hl7::{normalize, parse_hl7};
use proptest::prelude::*;

// Tokens are never empty or blank, so no level ends in a bare delimiter, not
// even after the message is trimmed. Those are dropped by the splitter.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Z0-9][A-Z0-9 .]{0,5}",
        1 => "\\\\[FSTRE]\\\\",
    ]
}

fn joined(
    inner: impl Strategy<Value = String>,
    separator: &'static str,
) -> impl Strategy<Value = String> {
    prop::collection::vec(inner, 1..4).prop_map(move |parts| parts.join(separator))
}

fn field() -> impl Strategy<Value = String> {
    joined(joined(joined(token(), "&"), "^"), "~")
}

fn segment() -> impl Strategy<Value = String> {
    (
        "[A-Z]{2}[A-Z0-9]",
        prop::collection::vec(prop::option::of(field()), 0..6),
        field(),
    )
        .prop_map(|(name, middle, last)| {
            let mut parts = vec![name];
            parts.extend(middle.into_iter().map(Option::unwrap_or_default));
            parts.push(last);
            parts.join("|")
        })
}

fn message() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(segment(), 0..6),
        prop_oneof![Just("\r"), Just("\n"), Just("\r\n")],
    )
        .prop_map(|(segments, line_end)| {
            let mut lines = vec!["MSH|^~\\&|APP|FAC".to_string()];
            lines.extend(segments);
            lines.join(line_end)
        })
}

proptest! {
    #[test]
    fn render_reproduces_normalized_input(input in message()) {
        let msg = parse_hl7(&input).unwrap();
        prop_assert_eq!(msg.to_string(), normalize(&input));
    }

    #[test]
    fn field_addresses_render_their_source(input in message()) {
        let msg = parse_hl7(&input).unwrap();
        for segment in msg.segments() {
            let name = segment.name().unwrap_or_default();
            if msg.find_segment(&name).map(|s| std::ptr::eq(s, segment)) != Some(true) {
                continue;
            }
            for (i, field) in segment.fields().iter().enumerate() {
                let address = format!("{name}.{i}");
                prop_assert_eq!(msg.get_value(&address).unwrap(), field.to_string());
            }
        }
    }
}
