use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, B256, address};
use foundry_abi_resolver::{
    ArgValue, Codec, DataFilter, DynAbiCodec, Interface, LogTopic, Mismatch, ResolveError,
    find_event, strip_signature_topic,
};

const ALICE: Address = address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
const BOB: Address = address!("fB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");

fn vault() -> Interface {
    let abi: JsonAbi = serde_json::from_str(
        r#"[
            {"type":"event","name":"Deposit","inputs":[{"name":"owner","type":"address","indexed":true},{"name":"assets","type":"uint256","indexed":false},{"name":"note","type":"string","indexed":false}],"anonymous":false},
            {"type":"event","name":"Deposit","inputs":[{"name":"owner","type":"address","indexed":true},{"name":"shares","type":"uint256","indexed":false}],"anonymous":false},
            {"type":"event","name":"Sweep","inputs":[{"name":"to","type":"address","indexed":true}],"anonymous":true}
        ]"#,
    )
    .unwrap();
    Interface::from(abi)
}

fn address_topic(address: Address) -> LogTopic {
    B256::left_padding_from(address.as_slice()).into()
}

#[test]
fn matches_deposit_logs() {
    crate::init_tracing();
    let abi = vault();
    let codec = DynAbiCodec::default();

    let deposit = find_event(&abi, "Deposit", Some(&["note"][..])).unwrap();
    let topics = [codec.signature_hash(deposit).into(), address_topic(ALICE)];
    let indexed = strip_signature_topic(deposit, Some(&topics[..]), &codec).unwrap();
    assert_eq!(indexed, &[address_topic(ALICE)]);

    let data = codec
        .encode(
            &["uint256".to_string(), "string".to_string()],
            &[ArgValue::from(100u64), ArgValue::from("payday")],
        )
        .unwrap();
    let filter = DataFilter::new(vec![
        ("uint256".to_string(), Some(vec![50u64.into(), 100u64.into()])),
        ("string".to_string(), None),
    ]);
    assert!(filter.matches(&codec, &data).unwrap());

    let filter = DataFilter::new(vec![
        ("uint256".to_string(), None),
        ("string".to_string(), Some(vec!["rent".into()])),
    ]);
    assert!(!filter.matches(&codec, &data).unwrap());
}

#[test]
fn rejects_logs_of_other_events() {
    let abi = vault();
    let codec = DynAbiCodec::default();

    let deposit = find_event(&abi, "Deposit", Some(&["shares"][..])).unwrap();
    let other = find_event(&abi, "Deposit", Some(&["note"][..])).unwrap();
    let topics = [codec.signature_hash(other).into(), address_topic(BOB)];

    let err = strip_signature_topic(deposit, Some(&topics[..]), &codec).unwrap_err();
    assert!(matches!(err, ResolveError::MismatchedAbi(Mismatch::SignatureMismatch { .. })));
    assert!(err.to_string().starts_with("the event signature did not match the provided ABI"));

    assert!(matches!(
        find_event(&abi, "Deposit", None),
        Err(ResolveError::MultipleEvents(name)) if name == "Deposit"
    ));
}

#[test]
fn anonymous_events_have_no_signature_topic() {
    let abi = vault();
    let codec = DynAbiCodec::default();
    let sweep = find_event(&abi, "Sweep", None).unwrap();

    let topics = [address_topic(BOB)];
    assert_eq!(strip_signature_topic(sweep, Some(&topics[..]), &codec).unwrap(), &topics);
}
