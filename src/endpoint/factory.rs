//! URI-to-endpoint dispatch and the per-transport builders.

use std::sync::Arc;
use std::time::Duration;

use crate::codec::registry::{CodecRegistry, InMemoryCodecRegistry};
use crate::codec::{self, CodecSpec};
use crate::error::{Error, Result};
use crate::params::Params;

use super::config::{
    EndpointAddress, EndpointConfig, ExchangeMode, Filter, LoggingFilter, ServiceConfig,
    TransportKind,
};
use super::uri::ConnectUri;

/// Builds endpoint configurations from URIs.
///
/// The factory performs a synchronous, single-pass computation per endpoint:
/// parameter validation, then codec resolution, then transport-specific
/// defaulting, failing fast at each step. It holds the registry consulted
/// when a `codec` parameter names a custom codec.
pub struct EndpointFactory {
    registry: Arc<dyn CodecRegistry>,
}

impl Default for EndpointFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointFactory {
    /// Factory with an empty codec registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryCodecRegistry::new()),
        }
    }

    /// Factory using `registry` for custom codec lookup.
    #[must_use]
    pub fn with_registry(registry: Arc<dyn CodecRegistry>) -> Self {
        Self { registry }
    }

    /// Build the endpoint configuration for `uri`.
    ///
    /// `tcp` maps to the stream builder, `udp`/`mcast`/`multicast` to the
    /// datagram builder, `vm` to the in-process builder. Any other scheme
    /// fails with [`Error::UnsupportedTransport`].
    pub fn create_endpoint(&self, uri: &str, params: &Params) -> Result<EndpointConfig> {
        let connect = ConnectUri::parse(uri)?;
        match connect.scheme() {
            "tcp" => self.build_stream(&connect, params),
            "udp" | "mcast" | "multicast" => self.build_datagram(&connect, params),
            "vm" => Self::build_in_process(&connect),
            other => Err(Error::UnsupportedTransport {
                scheme: other.to_string(),
                uri: uri.to_string(),
            }),
        }
    }

    fn build_stream(&self, connect: &ConnectUri, params: &Params) -> Result<EndpointConfig> {
        let (host, port) = connect.socket_address()?;
        let lazy_session_creation = params.flag("lazySessionCreation");
        let timeout = params.timeout()?;
        let transfer_exchange = params.flag("transferExchange");
        let codec = codec::resolve(params, TransportKind::Stream, self.registry.as_ref())?;

        let mut connector = ServiceConfig::default();
        attach_filters(&mut connector, codec.as_ref());

        let mut acceptor = ServiceConfig::default();
        attach_filters(&mut acceptor, codec.as_ref());
        acceptor.reuse_address = true;
        acceptor.disconnect_on_unbind = true;

        Ok(EndpointConfig {
            uri: connect.as_str().to_string(),
            kind: TransportKind::Stream,
            address: EndpointAddress::Socket { host, port },
            codec,
            acceptor: Some(acceptor),
            connector: Some(connector),
            lazy_session_creation,
            timeout,
            transfer_exchange,
            exchange_mode: exchange_mode(params),
        })
    }

    fn build_datagram(&self, connect: &ConnectUri, params: &Params) -> Result<EndpointConfig> {
        let (host, port) = connect.socket_address()?;
        let lazy_session_creation = params.flag("lazySessionCreation");
        let timeout = params.timeout()?;
        let codec = codec::resolve(params, TransportKind::Datagram, self.registry.as_ref())?;

        let mut connector = ServiceConfig::default();
        attach_filters(&mut connector, codec.as_ref());

        let mut acceptor = ServiceConfig::default();
        attach_filters(&mut acceptor, codec.as_ref());
        // address reuse is on by default for datagram acceptors
        acceptor.reuse_address = true;
        acceptor.disconnect_on_unbind = true;

        Ok(EndpointConfig {
            uri: connect.as_str().to_string(),
            kind: TransportKind::Datagram,
            address: EndpointAddress::Socket { host, port },
            codec,
            acceptor: Some(acceptor),
            connector: Some(connector),
            lazy_session_creation,
            timeout,
            // the full exchange envelope cannot cross a datagram transport,
            // so the parameter is overridden no matter what the caller set
            transfer_exchange: false,
            exchange_mode: exchange_mode(params),
        })
    }

    fn build_in_process(connect: &ConnectUri) -> Result<EndpointConfig> {
        let id = connect.pipe_id()?;
        Ok(EndpointConfig {
            uri: connect.as_str().to_string(),
            kind: TransportKind::InProcess,
            address: EndpointAddress::InProcess { id },
            // in-process messages pass as in-memory references
            codec: None,
            acceptor: None,
            connector: None,
            lazy_session_creation: false,
            timeout: Duration::ZERO,
            transfer_exchange: false,
            exchange_mode: ExchangeMode::OneWay,
        })
    }
}

fn exchange_mode(params: &Params) -> ExchangeMode {
    if params.flag("sync") {
        ExchangeMode::RequestResponse
    } else {
        ExchangeMode::OneWay
    }
}

fn attach_filters(config: &mut ServiceConfig, codec: Option<&CodecSpec>) {
    if let Some(spec) = codec {
        config.filters.add_last("codec", Filter::Codec(spec.build()));
    }
    config
        .filters
        .add_last("logger", Filter::Logging(LoggingFilter::new()));
}
