//! # Whiplink
//!
//! `whiplink` is a small stateless HTTP service that bridges ParkMyWhip's
//! email-based auth flows into the native mobile app via the
//! `parkmywhip://` custom URL scheme.
//!
//! Auth emails land the user in a browser; the app lives behind a deep
//! link. Two endpoints cover the two ways the credentials can arrive:
//!
//! - `/auth-redirect`: the auth backend delivers tokens in the URL *hash
//!   fragment*, which browsers never send to the server. The endpoint
//!   returns an HTML page whose inline script reads the fragment
//!   client-side and forwards it into the app.
//! - `/password-reset-redirect`: the reset token arrives as a plain query
//!   parameter, so the endpoint answers with a direct HTTP 302 into the
//!   app scheme.
//!
//! The service holds no state and talks to no backend; every request is
//! independently terminal.

pub mod api;
pub mod cli;
