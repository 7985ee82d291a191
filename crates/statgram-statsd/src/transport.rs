use crate::error::{Result, StatsdError};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

/// A fire-and-forget channel for encoded stat lines.
///
/// Implementations never surface per-send failures: telemetry delivery is
/// best-effort and must not perturb the monitored process's main workload.
pub trait Transport: Send + Sync {
    /// Hands one wire line to the channel.
    fn send(&self, line: &str);
}

/// Sends each line as one UDP datagram to the configured aggregator.
///
/// The endpoint is resolved and the local socket bound once at construction;
/// construction failures are fatal because they indicate a configuration the
/// operator must fix before relying on metrics. After that, each send is a
/// single non-blocking `send_to` with no connection and no acknowledgment.
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Resolves `host:port` and opens an unconnected local send socket.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint does not resolve or the socket
    /// cannot be created.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let endpoint = format!("{host}:{port}");
        let target = (host, port)
            .to_socket_addrs()
            .map_err(|e| StatsdError::Resolve {
                endpoint: endpoint.clone(),
                source: e,
            })?
            .next()
            .ok_or(StatsdError::NoAddress { endpoint })?;

        let bind_addr: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).map_err(StatsdError::Bind)?;
        socket.set_nonblocking(true).map_err(StatsdError::Bind)?;

        Ok(Self { socket, target })
    }

    /// The resolved aggregator address.
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Transport for UdpTransport {
    fn send(&self, line: &str) {
        // Lost datagrams are invisible to callers; log at trace level only.
        if let Err(e) = self.socket.send_to(line.as_bytes(), self.target) {
            tracing::trace!(error = %e, "statsd send failed");
        }
    }
}

/// Accepts and discards every line.
///
/// Selected when no aggregator endpoint is configured, so the rest of the
/// pipeline runs unchanged with no network effects.
pub struct NoopTransport;

impl Transport for NoopTransport {
    fn send(&self, _line: &str) {}
}
