//! Percent codec for `application/x-www-form-urlencoded` bodies and query strings.

#[cfg(feature = "url_encoding")]
pub mod url_encoding;

#[cfg(feature = "url_encoding")]
pub use url_encoding::{decode_component, decode_form, encode_form, encode_url_owned, DecodeError, DecodeErrorKind};
