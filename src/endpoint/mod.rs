//! Endpoint configuration and the URI-driven factory.

mod config;
mod factory;
mod uri;

pub use config::{
    EndpointAddress, EndpointConfig, ExchangeMode, Filter, FilterChain, LoggingFilter,
    ServiceConfig, TransportKind,
};
pub use factory::EndpointFactory;
pub use uri::ConnectUri;
