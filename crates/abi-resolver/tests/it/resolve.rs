use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, B256, Bytes, U256, address};
use foundry_abi_resolver::{
    ArgValue, Codec, DynAbiCodec, ElementKind, Identifier, Interface, Mismatch, MismatchReason,
    NamedArgs, ResolveError, resolve,
};
use similar_asserts::assert_eq;
use std::collections::BTreeMap;

const TOKEN_ABI: &str = r#"[
    {"type":"constructor","inputs":[{"name":"supply","type":"uint256"}],"stateMutability":"nonpayable"},
    {"type":"receive","stateMutability":"payable"},
    {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"},{"name":"memo","type":"string"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"mint","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"},
    {"type":"function","name":"mint","inputs":[{"name":"to","type":"address"},{"name":"id","type":"bytes32"}],"outputs":[],"stateMutability":"nonpayable"},
    {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"submit","inputs":[{"name":"order","type":"tuple","components":[{"name":"maker","type":"address"},{"name":"amounts","type":"uint256[]"}]},{"name":"deadline","type":"uint64"}],"outputs":[],"stateMutability":"nonpayable"},
    {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}],"anonymous":false},
    {"type":"error","name":"InsufficientBalance","inputs":[{"name":"available","type":"uint256"},{"name":"required","type":"uint256"}]}
]"#;

const ALICE: Address = address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");

fn token() -> Interface {
    let abi: JsonAbi = serde_json::from_str(TOKEN_ABI).unwrap();
    Interface::from(&abi)
}

fn named(entries: &[(&str, ArgValue)]) -> NamedArgs {
    entries.iter().map(|(name, value)| (name.to_string(), value.clone())).collect()
}

#[test]
fn resolves_overloads_from_json_abi() {
    crate::init_tracing();
    let abi = token();
    let codec = DynAbiCodec::default();

    let resolved = resolve(&abi, "transfer", &[ALICE.into(), 1u64.into()], &NamedArgs::new(), &codec)
        .unwrap();
    assert_eq!(resolved.element.signature(), "transfer(address,uint256)");

    let resolved = resolve(
        &abi,
        "transfer",
        &[ALICE.into(), 1u64.into()],
        &named(&[("memo", "rent".into())]),
        &codec,
    )
    .unwrap();
    assert_eq!(resolved.element.signature(), "transfer(address,uint256,string)");
    assert_eq!(
        resolved.arguments,
        vec![ArgValue::from(ALICE), ArgValue::from(1u64), ArgValue::from("rent")]
    );
}

#[test]
fn resolves_overloads_by_type() {
    let abi = token();
    let codec = DynAbiCodec::default();
    let id = ArgValue::from(Bytes::copy_from_slice(B256::with_last_byte(0xff).as_slice()));

    let resolved =
        resolve(&abi, "mint", &[ALICE.into(), id.clone()], &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.element.signature(), "mint(address,bytes32)");

    let resolved =
        resolve(&abi, "mint", &[ALICE.into(), 5u64.into()], &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.element.signature(), "mint(address,uint256)");

    let err = resolve(&abi, "mint", &[ALICE.into(), true.into()], &NamedArgs::new(), &codec)
        .unwrap_err();
    let Some(Mismatch::Resolution(diagnosis)) = err.as_mismatch() else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(diagnosis.reason, MismatchReason::ArgumentTypes);
    assert_eq!(diagnosis.positional_types, "address,bool");
    assert_eq!(
        diagnosis.signatures,
        vec!["mint(address,uint256)".to_string(), "mint(address,bytes32)".to_string()]
    );
}

#[test]
fn diagnoses_wrong_argument_count() {
    let abi = token();
    let codec = DynAbiCodec::default();
    let err = resolve(&abi, "transfer", &[ALICE.into()], &NamedArgs::new(), &codec).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not identify the intended function with name `transfer`, positional arguments with \
         type(s) `(address)` and keyword arguments with type(s) `{}`.\n\
         Found 2 function(s) with the name `transfer`: [transfer(address,uint256), \
         transfer(address,uint256,string)]\n\
         Function invocation failed due to improper number of arguments."
    );
}

#[test]
fn aligns_struct_arguments() {
    let abi = token();
    let codec = DynAbiCodec::default();
    let amounts = ArgValue::List(vec![1u64.into(), 2u64.into()]);
    let order = ArgValue::Map(BTreeMap::from([
        ("amounts".to_string(), amounts.clone()),
        ("maker".to_string(), ALICE.into()),
    ]));

    let resolved = resolve(&abi, "submit", &[order, 9u64.into()], &NamedArgs::new(), &codec)
        .unwrap();
    assert_eq!(resolved.types, vec!["(address,uint256[])".to_string(), "uint64".to_string()]);
    assert_eq!(
        resolved.arguments,
        vec![ArgValue::List(vec![ALICE.into(), amounts]), ArgValue::from(9u64)]
    );

    let calldata = resolved.encode_input(&codec).unwrap();
    let decoded = codec.decode(&resolved.types, &calldata[4..]).unwrap();
    assert_eq!(
        decoded,
        vec![
            DynSolValue::Tuple(vec![
                DynSolValue::Address(ALICE),
                DynSolValue::Array(vec![
                    DynSolValue::Uint(U256::from(1), 256),
                    DynSolValue::Uint(U256::from(2), 256),
                ]),
            ]),
            DynSolValue::Uint(U256::from(9), 64),
        ]
    );
}

#[test]
fn special_elements() {
    let abi = token();
    let codec = DynAbiCodec::default();

    let resolved = resolve(&abi, Identifier::Receive, &[], &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.element.kind(), ElementKind::Receive);

    let resolved =
        resolve(&abi, "constructor", &[1000u64.into()], &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.selector, None);
    assert_eq!(resolved.encode_input(&codec).unwrap().len(), 32);

    assert!(matches!(
        resolve(&abi, Identifier::Fallback, &[], &NamedArgs::new(), &codec),
        Err(ResolveError::NotFound(ElementKind::Fallback))
    ));

    // zero-argument lookups take the unique candidate
    let resolved = resolve(&abi, "totalSupply", &[], &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.selector.map(|s| s.to_string()), Some("0x18160ddd".to_string()));
}

#[test]
fn errors_and_events() {
    let abi = token();
    let codec = DynAbiCodec::default();
    let args: [ArgValue; 2] = [1u64.into(), 2u64.into()];
    let resolved = resolve(&abi, "InsufficientBalance", &args, &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.element.kind(), ElementKind::Error);
    assert_eq!(resolved.selector, codec.selector(resolved.element));

    let args: [ArgValue; 3] = [ALICE.into(), ALICE.into(), 1u64.into()];
    let resolved = resolve(&abi, "Transfer", &args, &NamedArgs::new(), &codec).unwrap();
    assert_eq!(resolved.element.kind(), ElementKind::Event);
}
