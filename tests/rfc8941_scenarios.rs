//! End-to-end parse and serialize scenarios, independent of the per-module
//! unit tests colocated with the implementation.

use rust_decimal::Decimal;
use sfv::{BareItem, Dictionary, InnerList, Item, List, ListEntry, Parameters, Parser, SerializeValue};
use std::convert::TryInto;
use std::str::FromStr;

#[test]
fn parses_list_of_three_strings_with_empty_parameters() {
    let list = Parser::parse_list(br#""foo", "bar", "It was the best of times.""#).unwrap();
    assert_eq!(list.len(), 3);
    for entry in &list {
        match entry {
            ListEntry::Item(item) => assert!(item.params.is_empty()),
            _ => panic!("expected item"),
        }
    }
    assert_eq!(
        list[2].clone(),
        ListEntry::Item(Item::new(
            BareItem::new_string("It was the best of times.").unwrap()
        ))
    );
}

#[test]
fn parses_item_with_url_parameter() {
    let item = Parser::parse_item(br#"2; foourl="https://foo.example.com/""#).unwrap();
    assert_eq!(item.bare_item.as_int(), Some(2));
    assert_eq!(
        item.params.get("foourl").and_then(|v| v.as_str()),
        Some("https://foo.example.com/")
    );
}

#[test]
fn parses_dictionary_with_string_and_byte_sequence() {
    let dict = Parser::parse_dictionary(b"en=\"Applepie\", da=:w4ZibGV0w6ZydGU=:").unwrap();
    assert_eq!(dict.len(), 2);

    match dict.get("en").unwrap() {
        ListEntry::Item(item) => assert_eq!(item.bare_item.as_str(), Some("Applepie")),
        _ => panic!("expected item"),
    }
    match dict.get("da").unwrap() {
        ListEntry::Item(item) => assert_eq!(
            item.bare_item.as_byte_seq().unwrap().as_slice(),
            &[0xC3, 0x86, 0x62, 0x6C, 0x65, 0x74, 0xC3, 0xA6, 0x72, 0x74, 0x65]
        ),
        _ => panic!("expected item"),
    }
}

#[test]
fn serializes_dictionary_of_items_and_inner_lists() {
    let mut dict = Dictionary::new();
    dict.insert(
        "a".into(),
        InnerList::new(vec![
            Item::new(BareItem::new_integer(1).unwrap()),
            Item::new(BareItem::new_integer(2).unwrap()),
        ])
        .into(),
    );
    dict.insert("b".into(), Item::new(BareItem::new_integer(3).unwrap()).into());

    let mut c_params = Parameters::new();
    c_params.insert("aa".into(), BareItem::new_token("bb").unwrap());
    dict.insert(
        "c".into(),
        Item::with_params(BareItem::new_integer(4).unwrap(), c_params).into(),
    );

    let mut d_params = Parameters::new();
    d_params.insert("valid".into(), BareItem::new_boolean(true).unwrap());
    dict.insert(
        "d".into(),
        InnerList::with_params(
            vec![
                Item::new(BareItem::new_integer(5).unwrap()),
                Item::new(BareItem::new_integer(6).unwrap()),
            ],
            d_params,
        )
        .into(),
    );

    assert_eq!(
        dict.serialize_value().unwrap(),
        "a=(1 2), b=3, c=4;aa=bb, d=(5 6);valid"
    );
}

#[test]
fn serializes_list_with_parameterized_item() {
    let mut params = Parameters::new();
    params.insert("q".into(), BareItem::new_integer(5).unwrap());

    let list: List = vec![
        Item::new(BareItem::new_integer(1).unwrap()).into(),
        Item::new(BareItem::new_integer(2).unwrap()).into(),
        Item::with_params(BareItem::new_integer(34).unwrap(), params).into(),
    ];

    assert_eq!(list.serialize_value().unwrap(), "1, 2, 34;q=5");
}

#[test]
fn duplicate_keys_keep_last_write_in_original_position() {
    let dict = Parser::parse_dictionary(b"a=1,b=2,a=3").unwrap();
    assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    let a_value = match dict.get("a").unwrap() {
        ListEntry::Item(item) => item.bare_item.as_int(),
        _ => None,
    };
    assert_eq!(a_value, Some(3));
}

#[test]
fn boolean_item_true_parses_and_invalid_variant_fails() {
    let item = Parser::parse_item(b"?1").unwrap();
    assert_eq!(item.bare_item.as_bool(), Some(true));
    assert!(Parser::parse_item(b"?T").is_err());
}

#[test]
fn decimal_rounds_half_to_even() {
    let nine_nine_nine_five: Decimal = Decimal::from_str("9.9995").unwrap();
    let bare: BareItem = nine_nine_nine_five.try_into().unwrap();
    assert_eq!(Item::new(bare).serialize_value().unwrap(), "10.0");

    let zero_zero_one_five: Decimal = Decimal::from_str("0.0015").unwrap();
    let bare: BareItem = zero_zero_one_five.try_into().unwrap();
    assert_eq!(Item::new(bare).serialize_value().unwrap(), "0.002");

    let zero_zero_two_five: Decimal = Decimal::from_str("0.0025").unwrap();
    let bare: BareItem = zero_zero_two_five.try_into().unwrap();
    assert_eq!(Item::new(bare).serialize_value().unwrap(), "0.002");
}

#[test]
fn full_round_trip_through_all_three_top_level_shapes() {
    let list_input = "1;a=tok, (\"foo\" \"bar\");baz, ()";
    let list = Parser::parse_list(list_input.as_bytes()).unwrap();
    let reparsed = Parser::parse_list(list.serialize_value().unwrap().as_bytes()).unwrap();
    assert_eq!(list, reparsed);

    let dict_input = "a=?0, b, c; foo=bar, rating=1.5, fruits=(apple pear)";
    let dict = Parser::parse_dictionary(dict_input.as_bytes()).unwrap();
    let reparsed = Parser::parse_dictionary(dict.serialize_value().unwrap().as_bytes()).unwrap();
    assert_eq!(dict, reparsed);

    let item_input = "12.445;foo=bar";
    let item = Parser::parse_item(item_input.as_bytes()).unwrap();
    let reparsed = Parser::parse_item(item.serialize_value().unwrap().as_bytes()).unwrap();
    assert_eq!(item, reparsed);
}
