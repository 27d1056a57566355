use std::borrow::Cow;

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Custom encode set for application/x-www-form-urlencoded allowing unreserved characters including hyphens
const FORM_URLENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Why a form component could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// A `%` not followed by two hexadecimal digits.
    #[error("malformed percent escape at byte {0}")]
    InvalidPercentEscape(usize),
    /// The decoded octets are not valid UTF-8.
    #[error("decoded octets are not valid UTF-8")]
    InvalidUtf8,
}

/// A form segment that failed to decode. `name` is the decoded parameter
/// name of the segment, or the raw name when the name itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot decode parameter `{name}`: {kind}")]
pub struct DecodeError {
    pub name: String,
    pub kind: DecodeErrorKind,
}

/// Encodes a string for URL safety and returns an owned `String`
///
/// # Example
/// ```
/// use oauth2_lib::url_encoding::encode_url_owned;
/// let encoded = encode_url_owned("Hello World!");
/// assert_eq!(encoded, "Hello%20World%21");
/// ```
pub fn encode_url_owned(input: &str) -> String {
    percent_encode(input.as_bytes(), FORM_URLENCODE_SET).to_string()
}

/// Decodes a single form component.
///
/// `+` stands for a space, `%XY` for the octet `0xXY`. Unlike a lenient
/// decoder a stray `%` is an error, and so is a byte sequence that is not
/// UTF-8 once decoded.
///
/// # Example
/// ```
/// use oauth2_lib::url_encoding::decode_component;
/// assert_eq!(decode_component("https%3A%2F%2Fclient%2Eexample%2Ecom%2Fcb").unwrap(), "https://client.example.com/cb");
/// assert_eq!(decode_component("read+write").unwrap(), "read write");
/// assert!(decode_component("100%").is_err());
/// ```
pub fn decode_component(input: &str) -> Result<String, DecodeError> {
    let error = |kind| DecodeError { name: input.to_string(), kind };

    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(error(DecodeErrorKind::InvalidPercentEscape(i)));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced: Cow<'_, str> = if input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| error(DecodeErrorKind::InvalidUtf8))
}

/// Splits a form or query string into ordered `(name, value)` pairs.
///
/// Segments are separated by `&`. The first `=` in a segment separates the
/// name from the value; a segment without `=` has no value. An empty input
/// yields an empty list.
///
/// # Example
/// ```
/// use oauth2_lib::url_encoding::decode_form;
/// let pairs = decode_form("grant_type=authorization_code&flag&code=a%20b").unwrap();
/// assert_eq!(pairs, vec![
///     ("grant_type".to_string(), Some("authorization_code".to_string())),
///     ("flag".to_string(), None),
///     ("code".to_string(), Some("a b".to_string())),
/// ]);
/// ```
pub fn decode_form(form: &str) -> Result<Vec<(String, Option<String>)>, DecodeError> {
    if form.is_empty() {
        return Ok(Vec::new());
    }
    form.split('&')
        .map(|segment| {
            let (raw_name, raw_value) = match segment.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (segment, None),
            };
            // A bad name reports itself raw; a bad value reports the decoded name.
            let name = decode_component(raw_name)?;
            let value = raw_value
                .map(decode_component)
                .transpose()
                .map_err(|e| DecodeError { name: name.clone(), kind: e.kind })?;
            Ok((name, value))
        })
        .collect()
}

/// Serialises `(name, value)` pairs as application/x-www-form-urlencoded.
/// A pair without a value is written as the bare name.
///
/// # Example
/// ```
/// use oauth2_lib::url_encoding::encode_form;
/// let form = encode_form([("scope", Some("read write")), ("flag", None)]);
/// assert_eq!(form, "scope=read%20write&flag");
/// ```
pub fn encode_form<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut form = String::new();
    for (name, value) in pairs {
        if !form.is_empty() {
            form.push('&');
        }
        form.push_str(&encode_url_owned(name));
        if let Some(value) = value {
            form.push('=');
            form.push_str(&encode_url_owned(value));
        }
    }
    form
}
