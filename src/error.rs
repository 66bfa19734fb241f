//! Error type shared by the scanner, parser and serializer.
//!
//! Every fallible operation in this crate returns [`SFVResult`]: a `Result`
//! whose error is a `'static` string literal naming the grammar production
//! and the violated constraint (e.g. `"parse_number: integer number is out
//! of range"`, `"serialize_key: disallowed character in input"`). There is
//! no separate `ParseError`/`SerializationError` enum — the call site (a
//! `parser::Parser` method vs. a `serializer::Serializer` method) already
//! pins down which of the two failure categories a given message belongs
//! to.

/// Result type returned by every parsing and serialization entry point.
pub type SFVResult<T> = std::result::Result<T, &'static str>;
