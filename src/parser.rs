use crate::scanner::Scanner;
use crate::{
    BareItem, BareItemDecimal, BareItemInteger, Dictionary, InnerList, Item, List, ListEntry,
    Parameters, SFVResult,
};
use rust_decimal::Decimal;
use std::convert::TryInto;
use std::str::FromStr;
use std::sync::OnceLock;

/// Exposes methods for parsing input into a structured field value.
///
/// There is one entry point per top-level shape: [`Parser::parse_list`],
/// [`Parser::parse_dictionary`] and [`Parser::parse_item`]. Each skips
/// leading and trailing `SP`, runs the matching top-level production, and
/// requires the input to be fully consumed.
pub struct Parser;

impl Parser {
    /// Parses input into a structured field value of `List` type.
    /// ```
    /// # use sfv::Parser;
    /// let list = Parser::parse_list(b"1;a=tok, (\"foo\" \"bar\");baz, ()");
    /// assert!(list.is_ok());
    /// ```
    pub fn parse_list(input_bytes: &[u8]) -> SFVResult<List> {
        let mut scanner = Scanner::new(input_bytes)?;
        scanner.skip_sp();

        let list = Self::parse_list_contents(&mut scanner)?;

        scanner.skip_sp();
        if !scanner.is_eof() {
            return Err("parse_list: trailing characters after parsed value");
        }
        Ok(list)
    }

    /// Parses input into a structured field value of `Dictionary` type.
    /// ```
    /// # use sfv::Parser;
    /// let dict = Parser::parse_dictionary(b"a=?0, b, c; foo=bar, rating=1.5");
    /// assert!(dict.is_ok());
    /// ```
    pub fn parse_dictionary(input_bytes: &[u8]) -> SFVResult<Dictionary> {
        let mut scanner = Scanner::new(input_bytes)?;
        scanner.skip_sp();

        let dict = Self::parse_dictionary_contents(&mut scanner)?;

        scanner.skip_sp();
        if !scanner.is_eof() {
            return Err("parse_dictionary: trailing characters after parsed value");
        }
        Ok(dict)
    }

    /// Parses input into a structured field value of `Item` type.
    /// ```
    /// # use sfv::Parser;
    /// let item = Parser::parse_item(b"12.445;foo=bar");
    /// assert!(item.is_ok());
    /// ```
    pub fn parse_item(input_bytes: &[u8]) -> SFVResult<Item> {
        let mut scanner = Scanner::new(input_bytes)?;
        scanner.skip_sp();

        let item = Self::parse_item_contents(&mut scanner)?;

        scanner.skip_sp();
        if !scanner.is_eof() {
            return Err("parse_item: trailing characters after parsed value");
        }
        Ok(item)
    }

    fn parse_list_contents(scanner: &mut Scanner) -> SFVResult<List> {
        if scanner.is_eof() {
            return Ok(List::new());
        }

        let mut members = List::new();
        loop {
            members.push(Self::parse_item_or_inner_list(scanner)?);

            scanner.skip_ows();
            if scanner.is_eof() {
                return Ok(members);
            }
            if !scanner.try_consume_byte(b',') {
                return Err("parse_list: expected ',' between list members");
            }
            scanner.skip_ows();
            if scanner.is_eof() {
                return Err("parse_list: trailing comma at end of list");
            }
        }
    }

    fn parse_dictionary_contents(scanner: &mut Scanner) -> SFVResult<Dictionary> {
        let mut dict = Dictionary::new();
        if scanner.is_eof() {
            return Ok(dict);
        }

        loop {
            let key = Self::parse_key(scanner)?;

            let value = if scanner.try_consume_byte(b'=') {
                Self::parse_item_or_inner_list(scanner)?
            } else {
                let params = Self::parse_parameters(scanner)?;
                ListEntry::Item(Item::with_params(BareItem::new_boolean(true)?, params))
            };
            dict.insert(key, value);

            scanner.skip_ows();
            if scanner.is_eof() {
                return Ok(dict);
            }
            if !scanner.try_consume_byte(b',') {
                return Err("parse_dictionary: expected ',' between dictionary members");
            }
            scanner.skip_ows();
            if scanner.is_eof() {
                return Err("parse_dictionary: trailing comma at end of dictionary");
            }
        }
    }

    fn parse_item_or_inner_list(scanner: &mut Scanner) -> SFVResult<ListEntry> {
        if scanner.peek_match(|b| b == b'(') {
            Self::parse_inner_list(scanner)
        } else {
            Self::parse_item_contents(scanner).map(ListEntry::Item)
        }
    }

    fn parse_inner_list(scanner: &mut Scanner) -> SFVResult<ListEntry> {
        if !scanner.try_consume_byte(b'(') {
            return Err("parse_inner_list: expected '('");
        }

        let mut items = Vec::new();
        loop {
            scanner.skip_sp();

            if scanner.try_consume_byte(b')') {
                let params = Self::parse_parameters(scanner)?;
                return Ok(ListEntry::InnerList(InnerList::with_params(items, params)));
            }

            items.push(Self::parse_item_contents(scanner)?);

            if !scanner.peek_match(|b| b == b' ' || b == b')') {
                return Err("parse_inner_list: expected SP or ')' after item");
            }
        }
    }

    fn parse_item_contents(scanner: &mut Scanner) -> SFVResult<Item> {
        let bare_item = Self::parse_bare_item(scanner)?;
        let params = Self::parse_parameters(scanner)?;
        Ok(Item::with_params(bare_item, params))
    }

    fn parse_parameters(scanner: &mut Scanner) -> SFVResult<Parameters> {
        let mut params = Parameters::new();

        while scanner.try_consume_byte(b';') {
            scanner.skip_sp();

            let key = Self::parse_key(scanner)?;
            let value = if scanner.try_consume_byte(b'=') {
                Self::parse_bare_item(scanner)?
            } else {
                BareItem::new_boolean(true)?
            };
            params.insert(key, value);
        }
        Ok(params)
    }

    fn parse_key(scanner: &mut Scanner) -> SFVResult<String> {
        if !scanner.peek_match(|b| b == b'*' || b.is_ascii_lowercase()) {
            return Err("parse_key: first character is not lcalpha or '*'");
        }

        let bytes = scanner.scan(|b| {
            b == b'*' || b == b'_' || b == b'-' || b == b'.' || b.is_ascii_lowercase() || b.is_ascii_digit()
        });
        // `bytes` is ASCII by construction (Scanner rejects non-ASCII input up front).
        Ok(std::str::from_utf8(bytes).unwrap().to_owned())
    }

    fn parse_bare_item(scanner: &mut Scanner) -> SFVResult<BareItem> {
        match scanner.peek() {
            None => Err("parse_bare_item: unexpected end of input"),
            Some(b'?') => Self::parse_boolean(scanner),
            Some(b'"') => Self::parse_string(scanner),
            Some(b':') => Self::parse_byte_sequence(scanner),
            Some(b) if b == b'-' || b.is_ascii_digit() => Self::parse_number(scanner),
            Some(b) if b.is_ascii_alphabetic() || b == b'*' => Self::parse_token(scanner),
            Some(_) => Err("parse_bare_item: item type can't be identified"),
        }
    }

    fn parse_boolean(scanner: &mut Scanner) -> SFVResult<BareItem> {
        if !scanner.try_consume_byte(b'?') {
            return Err("parse_boolean: first character is not '?'");
        }
        match scanner.get_byte()? {
            b'0' => BareItem::new_boolean(false),
            b'1' => BareItem::new_boolean(true),
            _ => Err("parse_boolean: invalid variant"),
        }
    }

    fn parse_string(scanner: &mut Scanner) -> SFVResult<BareItem> {
        if !scanner.try_consume_byte(b'"') {
            return Err("parse_string: first character is not DQUOTE");
        }

        let mut value = String::new();
        loop {
            let byte = match scanner.get_byte() {
                Ok(byte) => byte,
                Err(_) => return Err("parse_string: no closing DQUOTE"),
            };

            match byte {
                b'"' => return BareItem::new_string(&value),
                b'\\' => match scanner.get_byte() {
                    Ok(escaped @ (b'\\' | b'"')) => value.push(escaped as char),
                    Ok(_) => return Err("parse_string: disallowed character after '\\'"),
                    Err(_) => return Err("parse_string: last input character is '\\'"),
                },
                b' ' | b'\x21' | b'\x23'..=b'\x5B' | b'\x5D'..=b'\x7E' => value.push(byte as char),
                _ => return Err("parse_string: not a visible character"),
            }
        }
    }

    fn parse_token(scanner: &mut Scanner) -> SFVResult<BareItem> {
        if !scanner.peek_match(|b| b.is_ascii_alphabetic() || b == b'*') {
            return Err("parse_token: first character is not ALPHA or '*'");
        }

        let bytes = scanner.scan(|b| crate::utils::is_tchar(b as char) || b == b':' || b == b'/');
        // `bytes` is ASCII by construction.
        BareItem::new_token(std::str::from_utf8(bytes).unwrap())
    }

    fn parse_byte_sequence(scanner: &mut Scanner) -> SFVResult<BareItem> {
        if !scanner.try_consume_byte(b':') {
            return Err("parse_byte_sequence: first character is not ':'");
        }

        let bytes = scanner.scan(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=');

        if !scanner.try_consume_byte(b':') {
            return if scanner.is_eof() {
                Err("parse_byte_sequence: no closing ':'")
            } else {
                Err("parse_byte_sequence: invalid character in byte sequence")
            };
        }

        // `bytes` is ASCII by construction.
        let encoded = std::str::from_utf8(bytes).unwrap();
        let decoded = decode_lenient_base64(encoded)
            .ok_or("parse_byte_sequence: invalid base64 content")?;
        BareItem::new_byte_seq(&decoded)
    }

    fn parse_number(scanner: &mut Scanner) -> SFVResult<BareItem> {
        let negative = scanner.try_consume_byte(b'-');

        if !scanner.peek_match(|b| b.is_ascii_digit()) {
            return Err("parse_number: input number does not start with a digit");
        }

        let mut is_integer = true;
        let mut digits = String::new();

        loop {
            match scanner.peek() {
                Some(b) if b.is_ascii_digit() => {
                    if is_integer && digits.len() == 15 {
                        return Err("parse_number: integer too long, length > 15");
                    }
                    if !is_integer && digits.len() == 16 {
                        return Err("parse_number: decimal too long, length > 16");
                    }
                    digits.push(scanner.get_byte()? as char);
                }
                Some(b'.') if is_integer => {
                    if digits.len() > 12 {
                        return Err(
                            "parse_number: decimal too long, illegal position for decimal point",
                        );
                    }
                    digits.push(scanner.get_byte()? as char);
                    is_integer = false;
                }
                _ => break,
            }
        }

        if is_integer {
            let mut value: i64 = digits
                .parse()
                .map_err(|_| "parse_number: parsing integer failed")?;
            if negative {
                value = -value;
            }
            let integer: BareItemInteger = value.try_into()?;
            Ok(BareItem::Integer(integer))
        } else {
            let chars_after_dot = digits
                .find('.')
                .map(|dot_pos| digits.len() - dot_pos - 1)
                .unwrap();

            match chars_after_dot {
                0 => return Err("parse_number: decimal ends with '.'"),
                1..=3 => (),
                _ => return Err("parse_number: invalid decimal fraction length"),
            }

            let mut value =
                Decimal::from_str(&digits).map_err(|_| "parse_number: parsing decimal failed")?;
            if negative {
                value.set_sign_negative(true);
            }
            let decimal: BareItemDecimal = value.try_into()?;
            Ok(BareItem::Decimal(decimal))
        }
    }
}

/// RFC 8941 base64 content is permissive: padding may be present, absent, or
/// (for the trailing group) non-canonical. Only a character outside the
/// base64 alphabet is rejected; the Scanner already guarantees that by the
/// time this runs.
fn decode_lenient_base64(input: &str) -> Option<Vec<u8>> {
    let trimmed = input.trim_end_matches('=');
    if trimmed.contains('=') {
        return None;
    }
    lenient_base64().decode(trimmed.as_bytes()).ok()
}

fn lenient_base64() -> &'static data_encoding::Encoding {
    static ENCODING: OnceLock<data_encoding::Encoding> = OnceLock::new();
    ENCODING.get_or_init(|| {
        let mut spec = data_encoding::BASE64_NOPAD.specification();
        spec.check_trailing_bits = false;
        spec.encoding().expect("lenient base64 spec is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SerializeValue;

    #[test]
    fn parses_empty_list_and_dictionary() {
        assert_eq!(Parser::parse_list(b"").unwrap(), List::new());
        assert_eq!(Parser::parse_dictionary(b"").unwrap(), Dictionary::new());
    }

    #[test]
    fn empty_input_fails_as_item() {
        assert!(Parser::parse_item(b"").is_err());
    }

    #[test]
    fn parses_list_of_strings() {
        let list = Parser::parse_list(br#""foo", "bar", "It was the best of times.""#).unwrap();
        assert_eq!(list.len(), 3);
        match &list[0] {
            ListEntry::Item(item) => assert_eq!(item.bare_item.as_str(), Some("foo")),
            _ => panic!("expected item"),
        }
    }

    #[test]
    fn parses_item_with_parameter() {
        let item = Parser::parse_item(br#"2; foourl="https://foo.example.com/""#).unwrap();
        assert_eq!(item.bare_item.as_int(), Some(2));
        assert_eq!(
            item.params.get("foourl").and_then(|v| v.as_str()),
            Some("https://foo.example.com/")
        );
    }

    #[test]
    fn parses_dictionary_with_byte_sequence() {
        let dict = Parser::parse_dictionary(b"en=\"Applepie\", da=:w4ZibGV0w6ZydGU=:").unwrap();
        let en = match dict.get("en").unwrap() {
            ListEntry::Item(item) => item.bare_item.as_str().unwrap(),
            _ => panic!("expected item"),
        };
        assert_eq!(en, "Applepie");

        let da = match dict.get("da").unwrap() {
            ListEntry::Item(item) => item.bare_item.as_byte_seq().unwrap().clone(),
            _ => panic!("expected item"),
        };
        assert_eq!(
            da,
            vec![0xC3, 0x86, 0x62, 0x6C, 0x65, 0x74, 0xC3, 0xA6, 0x72, 0x74, 0x65]
        );
    }

    #[test]
    fn duplicate_dictionary_keys_last_write_wins() {
        let dict = Parser::parse_dictionary(b"a=1,b=2,a=3").unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(
            dict.get("a").and_then(|v| match v {
                ListEntry::Item(item) => item.bare_item.as_int(),
                _ => None,
            }),
            Some(3)
        );
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn boolean_item_parses() {
        let item = Parser::parse_item(b"?1").unwrap();
        assert_eq!(item.bare_item.as_bool(), Some(true));
        assert!(Parser::parse_item(b"?T").is_err());
    }

    #[test]
    fn negative_zero_is_zero() {
        let item = Parser::parse_item(b"-0").unwrap();
        assert_eq!(item.bare_item.as_int(), Some(0));
    }

    #[test]
    fn integer_boundaries() {
        assert!(Parser::parse_item(b"999999999999999").is_ok());
        assert!(Parser::parse_item(b"1000000000000000").is_err());
        assert!(Parser::parse_item(b"-999999999999999").is_ok());
    }

    #[test]
    fn decimal_fraction_longer_than_three_digits_is_rejected() {
        assert!(Parser::parse_item(b"12.123456789012").is_err());
        assert!(Parser::parse_item(b"12.1234").is_err());
        assert!(Parser::parse_item(b"12.123").is_ok());
    }

    #[test]
    fn base64_accepted_with_or_without_padding() {
        let no_pad = Parser::parse_item(b":aGVsbG8:").unwrap();
        let padded = Parser::parse_item(b":aGVsbG8=:").unwrap();
        assert_eq!(no_pad.bare_item.as_byte_seq(), padded.bare_item.as_byte_seq());
        assert_eq!(no_pad.bare_item.as_byte_seq().unwrap(), b"hello");
    }

    #[test]
    fn base64_non_zero_pad_bits_accepted() {
        assert!(Parser::parse_item(b":iZ==:").is_ok());
    }

    #[test]
    fn missing_parameter_value_is_boolean_true() {
        let item = Parser::parse_item(b"1;flag").unwrap();
        assert_eq!(item.params.get("flag").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn dictionary_value_can_be_inner_list() {
        let dict = Parser::parse_dictionary(b"a=(1 2 3)").unwrap();
        match dict.get("a").unwrap() {
            ListEntry::InnerList(inner) => assert_eq!(inner.items.len(), 3),
            _ => panic!("expected inner list"),
        }
    }

    #[test]
    fn parse_then_serialize_round_trips() {
        let input = b"1;a=tok, (\"foo\" \"bar\");baz, ()";
        let list = Parser::parse_list(input).unwrap();
        let serialized = list.serialize_value().unwrap();
        let reparsed = Parser::parse_list(serialized.as_bytes()).unwrap();
        assert_eq!(list, reparsed);
    }

    #[test]
    fn rejects_non_ascii_input() {
        assert!(Parser::parse_item("\"café\"".as_bytes()).is_err());
    }
}
