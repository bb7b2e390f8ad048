//! Translation between the load balancer's event envelope and HTTP.
//!
//! The rest of the bot is written against ordinary HTTP requests and
//! responses. This module owns the boundary with the serverless platform:
//!
//! - [`codec`] converts an ALB target group event into an [`axum`] request
//!   and a response back into an outbound envelope.
//! - [`entry`] wraps the codec and the router behind the one-event-in,
//!   one-envelope-out invocation contract.
//!
//! Because the codec is the only piece that knows about envelopes, the same
//! router can be served behind a load balancer, a direct HTTP listener, or a
//! test harness.

mod codec;
mod entry;

pub use codec::{AlbRequest, AlbResponse, DecodeError, EncodeError, decode_request, encode_response};
pub use entry::{EntryError, LambdaEntry};
