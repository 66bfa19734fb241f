//! Character-class predicates shared between the parser and the bare-item
//! validators.

/// `tchar` from RFC 9110 §5.6.2, as referenced by RFC 8941's token grammar
/// (`sf-token = ( ALPHA / "*" ) *( tchar / ":" / "/" )`).
pub(crate) fn is_tchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}
