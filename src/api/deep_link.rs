//! Deep link targets consumed by the ParkMyWhip mobile app.
//!
//! The app registers the `parkmywhip://` scheme; everything this service
//! produces ultimately lands on one of the URIs built here. Encoding must
//! match what the in-page script produces with JS `encodeURIComponent`,
//! otherwise the app would see different bytes depending on which endpoint
//! forwarded the user.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Scheme root, also used as the bare fallback link on error pages.
pub const SCHEME_ROOT: &str = "parkmywhip://parkmywhip.com";

/// Flow type used when the auth backend did not send one.
pub const DEFAULT_FLOW_TYPE: &str = "recovery";

// encodeURIComponent keeps ASCII alphanumerics and - _ . ! ~ * ' ( )
// unescaped; everything else is percent-encoded, space included (%20, not +).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build the reset-password deep link for a server-visible token.
#[must_use]
pub fn reset_password(token: &str, flow_type: &str) -> String {
    format!(
        "{SCHEME_ROOT}/reset-password?token={}&type={}",
        encode_component(token),
        encode_component(flow_type)
    )
}
