//! netpoint - URI-driven endpoint factory for message-oriented transports
//!
//! This library turns a URI such as `tcp://host:port`, `udp://host:port`,
//! `mcast://host:port`, or `vm://id` into a fully configured, protocol-framed
//! endpoint description: transport family, resolved address, wire-framing
//! codec, and all derived configuration (timeouts, session-creation policy,
//! exchange mode). The resulting [`EndpointConfig`] is handed to an external
//! I/O engine for activation; no socket I/O happens here.
//!
//! # Quick Start
//!
//! ```rust
//! use netpoint::{EndpointFactory, ExchangeMode, Params};
//!
//! let factory = EndpointFactory::new();
//! let params = Params::from([("textline", "true"), ("sync", "true")]);
//!
//! let endpoint = factory.create_endpoint("tcp://127.0.0.1:9000", &params)?;
//! assert_eq!(endpoint.exchange_mode, ExchangeMode::RequestResponse);
//! # Ok::<(), netpoint::Error>(())
//! ```
//!
//! # Codec selection
//!
//! A codec registered under the name given by the `codec` parameter always
//! wins. Otherwise stream endpoints frame with newline-delimited text (when
//! `textline=true`) or opaque object serialization, and datagram endpoints
//! use a raw byte-passthrough codec, since each datagram already arrives as
//! one complete unit.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod charset;
pub mod codec;
pub mod endpoint;
pub mod error;
pub mod params;

pub use codec::registry::{CodecRegistry, InMemoryCodecRegistry};
pub use codec::{
    CodecSpec, Payload, ProtocolCodec, RawDatagramCodec, SerializationCodec, TextLineCodec,
};
pub use endpoint::{EndpointAddress, EndpointConfig, EndpointFactory, ExchangeMode, TransportKind};
pub use error::{Error, Result};
pub use params::Params;
