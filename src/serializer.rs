use crate::{BareItem, Dictionary, InnerList, Item, List, ListEntry, Parameters, SFVResult};

/// Serializes a structured field value into a `String`.
pub trait SerializeValue {
    /// Serializes a structured field value into a `String`.
    /// # Examples
    /// ```
    /// # use sfv::{Parser, SerializeValue};
    ///
    /// let parsed_list_field = Parser::parse_list("\"london\", \t\t\"berlin\"".as_bytes());
    /// assert!(parsed_list_field.is_ok());
    ///
    /// assert_eq!(
    ///     parsed_list_field.unwrap().serialize_value().unwrap(),
    ///     "\"london\", \"berlin\""
    /// );
    /// ```
    fn serialize_value(&self) -> SFVResult<String>;
}

impl SerializeValue for Dictionary {
    fn serialize_value(&self) -> SFVResult<String> {
        let mut output = String::new();
        Serializer::serialize_dict(self, &mut output)?;
        Ok(output)
    }
}

impl SerializeValue for List {
    fn serialize_value(&self) -> SFVResult<String> {
        let mut output = String::new();
        Serializer::serialize_list(self, &mut output)?;
        Ok(output)
    }
}

impl SerializeValue for Item {
    fn serialize_value(&self) -> SFVResult<String> {
        let mut output = String::new();
        Serializer::serialize_item(self, &mut output)?;
        Ok(output)
    }
}

/// Serializes a standalone `InnerList`, outside of the `List`/`Dictionary`
/// context RFC 8941 requires for inner lists to appear in.
///
/// This is a non-RFC escape hatch: the resulting bytes do not parse back as
/// a list or dictionary member (there is no outer comma-separated context to
/// parse them into). Reach for it only when a caller deliberately wants the
/// `(...)`-delimited wire form of a single inner list on its own.
pub trait SerializeInnerListValue {
    /// Serializes a standalone `InnerList`. See the trait docs for the RFC
    /// caveat.
    fn serialize_inner_list_value(&self) -> SFVResult<String>;
}

impl SerializeInnerListValue for InnerList {
    fn serialize_inner_list_value(&self) -> SFVResult<String> {
        let mut output = String::new();
        Serializer::serialize_as_inner_list(self, &mut output)?;
        Ok(output)
    }
}

/// Container serialization functions.
///
/// Every method reads its input by shared reference: serializing a tree
/// does not consume it, so the same `List`/`Dictionary`/`Item` can be
/// serialized any number of times.
pub(crate) struct Serializer;

impl Serializer {
    pub(crate) fn serialize_item(input_item: &Item, output: &mut String) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-item
        input_item.bare_item.write(output)?;
        Self::serialize_parameters(&input_item.params, output)?;
        Ok(())
    }

    pub(crate) fn serialize_list(input_list: &List, output: &mut String) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-list
        // Empty list serializes to empty output, symmetric with the parser
        // accepting empty input as the empty list.
        for (idx, member) in input_list.iter().enumerate() {
            match member {
                ListEntry::Item(item) => Self::serialize_item(item, output)?,
                ListEntry::InnerList(inner_list) => {
                    Self::serialize_inner_list(inner_list, output)?
                }
            };

            // If more items remain in input_list:
            //      Append "," to output.
            //      Append a single SP to output.
            if idx < input_list.len() - 1 {
                output.push_str(", ");
            }
        }
        Ok(())
    }

    pub(crate) fn serialize_dict(input_dict: &Dictionary, output: &mut String) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-dictionary
        // Empty dictionary serializes to empty output; see serialize_list.
        for (idx, (member_name, member_value)) in input_dict.iter().enumerate() {
            Self::serialize_key(member_name, output)?;

            match member_value {
                ListEntry::Item(item) => {
                    // If dict member is boolean true, no need to serialize it:
                    // only its params must be serialized. Otherwise serialize
                    // the entire item with its params.
                    if item.bare_item == BareItem::Boolean(true.into()) {
                        Self::serialize_parameters(&item.params, output)?;
                    } else {
                        output.push('=');
                        Self::serialize_item(item, output)?;
                    }
                }
                ListEntry::InnerList(inner_list) => {
                    output.push('=');
                    Self::serialize_inner_list(inner_list, output)?;
                }
            }

            // If more items remain in input_dictionary:
            //      Append "," to output.
            //      Append a single SP to output.
            if idx < input_dict.len() - 1 {
                output.push_str(", ");
            }
        }
        Ok(())
    }

    fn serialize_inner_list(input_inner_list: &InnerList, output: &mut String) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-innerlist
        let items = &input_inner_list.items;

        output.push('(');
        for (idx, item) in items.iter().enumerate() {
            Self::serialize_item(item, output)?;

            // If more values remain in inner_list, append a single SP to output.
            if idx < items.len() - 1 {
                output.push(' ');
            }
        }
        output.push(')');
        Self::serialize_parameters(&input_inner_list.params, output)?;
        Ok(())
    }

    /// Non-RFC escape hatch: serializes a standalone inner list, without the
    /// surrounding list or dictionary context the grammar normally requires.
    /// Callers must be deliberate — the output does not parse back as a list
    /// or dictionary member on its own.
    pub(crate) fn serialize_as_inner_list(
        input_inner_list: &InnerList,
        output: &mut String,
    ) -> SFVResult<()> {
        Self::serialize_inner_list(input_inner_list, output)
    }

    pub(crate) fn serialize_bare_item(
        input_bare_item: &BareItem,
        output: &mut String,
    ) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-bare-item
        input_bare_item.write(output)
    }

    pub(crate) fn serialize_parameters(
        input_params: &Parameters,
        output: &mut String,
    ) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-params
        for (param_name, param_value) in input_params.iter() {
            output.push(';');
            Self::serialize_key(param_name, output)?;

            if param_value != &BareItem::Boolean(true.into()) {
                output.push('=');
                Self::serialize_bare_item(param_value, output)?;
            }
        }
        Ok(())
    }

    pub(crate) fn serialize_key(input_key: &str, output: &mut String) -> SFVResult<()> {
        // https://httpwg.org/specs/rfc8941.html#ser-key
        // Note the asymmetry with parse_key: '.' is accepted by the parser's
        // key grammar but rejected here (see DESIGN.md).
        let disallowed_chars =
            |c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "_-*".contains(c));

        if input_key.chars().any(disallowed_chars) {
            return Err("serialize_key: disallowed character in input");
        }

        if let Some(char) = input_key.chars().next() {
            if !(char.is_ascii_lowercase() || char == '*') {
                return Err("serialize_key: first character is not lcalpha or '*'");
            }
        }
        output.push_str(input_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BareItem, Item, Parameters};

    #[test]
    fn empty_list_and_dictionary_serialize_to_empty_string() {
        assert_eq!(List::new().serialize_value().unwrap(), "");
        assert_eq!(Dictionary::new().serialize_value().unwrap(), "");
    }

    #[test]
    fn serializing_does_not_consume_the_tree() {
        let list: List = vec![Item::new(BareItem::new_integer(1).unwrap()).into()];
        assert_eq!(
            list.serialize_value().unwrap(),
            list.serialize_value().unwrap()
        );
    }

    #[test]
    fn serialize_key_rejects_dot() {
        let mut output = String::new();
        assert!(Serializer::serialize_key("a.b", &mut output).is_err());
    }

    #[test]
    fn boolean_parameter_uses_short_form() {
        let mut params = Parameters::new();
        params.insert("valid".into(), BareItem::new_boolean(true).unwrap());
        let item = Item::with_params(BareItem::new_integer(5).unwrap(), params);
        assert_eq!(item.serialize_value().unwrap(), "5;valid");
    }
}
