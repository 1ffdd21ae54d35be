use std::path::PathBuf;
use std::sync::Once;

use medi_hl7::{normalize, parse_hl7, resolve, Delimiters, HL7Error, Message};
use pretty_assertions::assert_eq;

static INIT: Once = Once::new();
fn setup_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

fn load(name: &str) -> Message {
    setup_test_logger();
    Message::from_bytes(&fixture(name)).expect("fixture should parse")
}

#[test]
fn sample_message_lookups() {
    let msg = load("sample.hl7");
    assert_eq!(msg.segments().len(), 4);
    assert_eq!(resolve(&msg, "PID.0").unwrap(), "PID");
    assert_eq!(resolve(&msg, "PID.2").unwrap(), "0493575^^^2^ID 1");
    assert_eq!(resolve(&msg, "PID-2-5").unwrap(), "ID 1");
    assert_eq!(resolve(&msg, "MSH.8.2").unwrap(), "A04");
}

#[test]
fn test_message_depth_semantics() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "PID.1").unwrap(), "1");
    assert_eq!(resolve(&msg, "PID.3").unwrap(), "123456^^^DH&MR");
    assert_eq!(resolve(&msg, "PID.3.1").unwrap(), "123456");
    assert_eq!(resolve(&msg, "PID.3.4").unwrap(), "DH&MR");
    assert_eq!(resolve(&msg, "PID.3.4.1").unwrap(), "DH");
    assert_eq!(resolve(&msg, "PID.3.4.2").unwrap(), "MR");
}

#[test]
fn empty_field_is_present_but_empty() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "PID.2").unwrap(), "");
    assert_eq!(resolve(&msg, "PID.2.1").unwrap(), "");
    assert_eq!(resolve(&msg, "PID.2.1.1").unwrap(), "");
}

#[test]
fn segment_address_returns_whole_line() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "PV1").unwrap(), "PV1||I|WARD1^101^1");
    // Anything past four components reads the whole segment as well.
    assert_eq!(resolve(&msg, "PV1.3.1.1.1").unwrap(), "PV1||I|WARD1^101^1");
}

#[test]
fn header_fields_are_addressable() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "MSH.0").unwrap(), "MSH");
    assert_eq!(resolve(&msg, "MSH.1").unwrap(), "^~\\&");
    assert_eq!(resolve(&msg, "MSH.2").unwrap(), "MESA_ADT");
    assert_eq!(*msg.delimiters(), Delimiters::default());
}

#[test]
fn field_address_keeps_all_repeats() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "PID.5").unwrap(), "SMITH^JOHN^Q~SMYTH^JON");
}

#[test]
fn deeper_addresses_only_see_first_repeat() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "PID.5.1").unwrap(), "SMITH");
    assert_eq!(resolve(&msg, "PID.5.2.1").unwrap(), "JOHN");
    assert_eq!(resolve(&msg, "PID.11.3").unwrap(), "ANYTOWN");
    // Q only exists in the first repeat; the second has two components.
    assert_eq!(resolve(&msg, "PID.5.3").unwrap(), "Q");
}

#[test]
fn escaped_delimiters_stay_in_the_value() {
    let msg = load("test.hl7");
    assert_eq!(resolve(&msg, "OBX.5").unwrap(), "Range 5\\^10 mg");
    assert_eq!(resolve(&msg, "OBX.5.1").unwrap(), "Range 5\\^10 mg");
    assert_eq!(
        resolve(&msg, "OBX.5.2"),
        Err(HL7Error::InvalidLocation("OBX.5.2".into()))
    );
}

#[test]
fn unresolvable_addresses_are_invalid_locations() {
    let msg = load("test.hl7");
    for address in [
        "ZZZ.1", "pid.1", "PID.99", "PID.3.9", "PID.3.4.3", "PID.x", "PID.3.0", "",
    ] {
        assert_eq!(
            resolve(&msg, address),
            Err(HL7Error::InvalidLocation(address.to_string())),
            "address {address:?}"
        );
    }
}

#[test]
fn lookup_uses_first_segment_with_the_name() {
    setup_test_logger();
    let msg = parse_hl7("MSH|^~\\&\rNK1|1|ROE\rPID|1|FIRST\rPID|2|SECOND").unwrap();
    assert_eq!(resolve(&msg, "PID.2").unwrap(), "FIRST");
    assert_eq!(msg.segments_named("PID").count(), 2);
    assert_eq!(msg.get_value("NK1.2").unwrap(), "ROE");
}

#[test]
fn test_message_round_trips() {
    let raw = fixture("test.hl7");
    let text = std::str::from_utf8(&raw).unwrap();
    let msg = parse_hl7(text).unwrap();
    assert_eq!(msg.to_string(), normalize(text));
}

#[test]
fn message_is_shareable_across_threads() {
    let msg = std::sync::Arc::new(load("test.hl7"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let msg = std::sync::Arc::clone(&msg);
            std::thread::spawn(move || resolve(&msg, "PID.3.4.2").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "MR");
    }
}
