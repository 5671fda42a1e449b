//! Endpoint configuration types.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::codec::{CodecSpec, ProtocolCodec};

/// Transport family of an endpoint, fixed by the URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Connection-oriented stream transport (TCP)
    Stream,
    /// Connectionless datagram transport (UDP, multicast)
    Datagram,
    /// In-process pipe, no network I/O
    InProcess,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stream => "stream",
            Self::Datagram => "datagram",
            Self::InProcess => "in-process",
        };
        write!(f, "{name}")
    }
}

/// Whether a message expects a correlated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeMode {
    /// The sender waits for a response
    RequestResponse,
    /// Fire-and-forget
    OneWay,
}

/// Resolved destination of an endpoint. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointAddress {
    /// Host and port for stream and datagram transports. Hostname
    /// resolution is the I/O engine's job.
    Socket {
        /// Target host, as written in the URI
        host: String,
        /// Target port
        port: u16,
    },
    /// Namespace key for in-process pipes
    InProcess {
        /// Pipe identifier
        id: u32,
    },
}

impl fmt::Display for EndpointAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Socket { host, port } => write!(f, "{host}:{port}"),
            Self::InProcess { id } => write!(f, "vm:{id}"),
        }
    }
}

/// One stage in a service filter chain.
#[derive(Clone)]
pub enum Filter {
    /// Wire-framing codec stage
    Codec(Arc<dyn ProtocolCodec>),
    /// Session diagnostics stage
    Logging(LoggingFilter),
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(_) => f.write_str("Codec(..)"),
            Self::Logging(filter) => f.debug_tuple("Logging").field(filter).finish(),
        }
    }
}

/// Ordered, named filter stages applied to every session of a service.
#[derive(Debug, Clone, Default)]
pub struct FilterChain {
    stages: Vec<(String, Filter)>,
}

impl FilterChain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage at the end of the chain.
    pub fn add_last(&mut self, name: impl Into<String>, filter: Filter) {
        self.stages.push((name.into(), filter));
    }

    /// The stage registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.stages
            .iter()
            .find(|(stage, _)| stage == name)
            .map(|(_, filter)| filter)
    }

    /// All stages, in application order.
    #[must_use]
    pub fn stages(&self) -> &[(String, Filter)] {
        &self.stages
    }

    /// The codec stage, when one is attached.
    #[must_use]
    pub fn codec(&self) -> Option<&Arc<dyn ProtocolCodec>> {
        self.stages.iter().find_map(|(_, filter)| match filter {
            Filter::Codec(codec) => Some(codec),
            Filter::Logging(_) => None,
        })
    }
}

/// Session diagnostics emitted through `tracing`.
///
/// The I/O engine invokes these callbacks from its session threads; the
/// filter itself holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingFilter;

impl LoggingFilter {
    /// Create the filter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Record a session being opened.
    pub fn session_opened(&self, remote: &EndpointAddress) {
        debug!(%remote, "session opened");
    }

    /// Record a session being closed.
    pub fn session_closed(&self, remote: &EndpointAddress) {
        debug!(%remote, "session closed");
    }

    /// Record an inbound message of `len` bytes.
    pub fn message_received(&self, len: usize) {
        trace!(len, "message received");
    }

    /// Record an outbound message of `len` bytes.
    pub fn message_sent(&self, len: usize) {
        trace!(len, "message sent");
    }
}

/// Per-side (acceptor or connector) service settings handed to the I/O
/// engine.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Filter stages applied to each session of this service
    pub filters: FilterChain,
    /// Bind the listening socket with address reuse
    pub reuse_address: bool,
    /// Drop live sessions when the service unbinds
    pub disconnect_on_unbind: bool,
}

/// Fully resolved endpoint description produced by the factory.
///
/// Created once, immutable thereafter; whichever runtime component activates
/// the endpoint owns it from there.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Original endpoint URI
    pub uri: String,
    /// Transport family
    pub kind: TransportKind,
    /// Resolved destination address
    pub address: EndpointAddress,
    /// Codec choice; absent for in-process endpoints
    pub codec: Option<CodecSpec>,
    /// Acceptor-side service settings; absent for in-process endpoints
    pub acceptor: Option<ServiceConfig>,
    /// Connector-side service settings; absent for in-process endpoints
    pub connector: Option<ServiceConfig>,
    /// Defer session establishment until the first send
    pub lazy_session_creation: bool,
    /// Response wait time for request-response exchanges; zero means no limit
    pub timeout: Duration,
    /// Whether the full logical message, not only its body, crosses the wire
    pub transfer_exchange: bool,
    /// Request-response or one-way
    pub exchange_mode: ExchangeMode,
}
