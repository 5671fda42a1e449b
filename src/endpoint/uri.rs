//! Endpoint URI parsing.

use crate::error::{Error, Result};

/// Parsed form of an endpoint URI such as `tcp://host:port` or `vm://id`.
///
/// Parsing splits scheme from authority; interpreting the authority is
/// transport-specific and done by [`socket_address`](Self::socket_address)
/// or [`pipe_id`](Self::pipe_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectUri {
    scheme: String,
    authority: String,
    original: String,
}

impl ConnectUri {
    /// Parse `uri` into scheme and authority.
    pub fn parse(uri: &str) -> Result<Self> {
        let (scheme, authority) = uri.split_once("://").ok_or_else(|| Error::InvalidUri {
            uri: uri.to_string(),
            reason: "missing `://` separator".to_string(),
        })?;
        if scheme.is_empty() {
            return Err(Error::InvalidUri {
                uri: uri.to_string(),
                reason: "empty scheme".to_string(),
            });
        }
        if authority.is_empty() {
            return Err(Error::InvalidUri {
                uri: uri.to_string(),
                reason: "empty authority".to_string(),
            });
        }
        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.to_string(),
            original: uri.to_string(),
        })
    }

    /// URI scheme, lowercased.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Everything after the scheme separator.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The URI exactly as the caller gave it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Split the authority into host and port for networked transports.
    ///
    /// Hostname resolution is left to the I/O engine; only the port is
    /// validated here.
    pub fn socket_address(&self) -> Result<(String, u16)> {
        let (host, port) = self
            .authority
            .rsplit_once(':')
            .ok_or_else(|| self.invalid("missing port"))?;
        if host.is_empty() {
            return Err(self.invalid("empty host"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| self.invalid(format!("invalid port `{port}`")))?;
        Ok((host.to_string(), port))
    }

    /// Numeric namespace token for in-process endpoints.
    ///
    /// The token is not a network port; it only keys the in-process pipe
    /// namespace.
    pub fn pipe_id(&self) -> Result<u32> {
        self.authority
            .parse::<u32>()
            .map_err(|_| self.invalid(format!("invalid in-process id `{}`", self.authority)))
    }

    fn invalid(&self, reason: impl Into<String>) -> Error {
        Error::InvalidUri {
            uri: self.original.clone(),
            reason: reason.into(),
        }
    }
}
