//! UDP frame listener
//!
//! Every datagram is treated as one candidate frame. Only payloads of exactly
//! `size³` bytes reach the cube; anything else is counted and discarded.

use crate::config::{ServerConfig, MAX_DATAGRAM};
use crate::metrics::StreamMetrics;
use anyhow::Context;
use ledcube::{parse_port, Cube, LedStrip, NetworkInfo};
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;

/// Hosts have no WiFi module to ask, so the reported MAC is all zeros.
const HOST_MAC: [u8; 6] = [0; 6];

/// Receives streamed frames and draws them on a cube it owns.
pub struct FrameListener<S: LedStrip> {
    socket: UdpSocket,
    bind_host: String,
    cube: Cube<S>,
    metrics: Arc<StreamMetrics>,
    network: NetworkInfo,
    refresh_every: Duration,
    last_refresh: Instant,
    buf: Vec<u8>,
}

impl<S: LedStrip> FrameListener<S> {
    /// Bind the configured address and take ownership of `cube`.
    pub async fn bind(
        config: &ServerConfig,
        cube: Cube<S>,
        metrics: Arc<StreamMetrics>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            cube.size() == config.size,
            "cube is {}³ but the listener expects {}³ frames",
            cube.size(),
            config.size
        );

        let socket = bind_socket(&config.bind_host, config.port).await?;
        let local = socket.local_addr()?;
        tracing::info!("Listening for frames on {}", local);

        Ok(Self {
            network: network_info(local),
            socket,
            bind_host: config.bind_host.clone(),
            cube,
            metrics,
            refresh_every: config.network_refresh(),
            last_refresh: Instant::now(),
            buf: vec![0; MAX_DATAGRAM],
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn cube(&self) -> &Cube<S> {
        &self.cube
    }

    pub fn cube_mut(&mut self) -> &mut Cube<S> {
        &mut self.cube
    }

    pub fn metrics(&self) -> &Arc<StreamMetrics> {
        &self.metrics
    }

    /// Address details as last refreshed.
    pub fn network_info(&self) -> &NetworkInfo {
        &self.network
    }

    /// Move the listener to the port named by `text`.
    ///
    /// The text is parsed leniently, so garbage binds port 0 and lets the OS
    /// choose. Asking for the port already bound keeps the current socket.
    /// Returns the port actually bound.
    pub async fn set_port(&mut self, text: &str) -> anyhow::Result<u16> {
        let requested = parse_port(text);
        let current = self.socket.local_addr()?;
        if requested != 0 && requested == current.port() {
            self.refresh_network(current);
            return Ok(requested);
        }

        let socket = bind_socket(&self.bind_host, requested).await?;
        let local = socket.local_addr()?;
        self.socket = socket;
        self.refresh_network(local);
        tracing::info!("Rebound frame listener to {}", local);
        Ok(local.port())
    }

    /// Wait for one datagram and apply it. Returns whether it was a frame.
    pub async fn recv_once(&mut self) -> anyhow::Result<bool> {
        let (len, peer) = self
            .socket
            .recv_from(&mut self.buf)
            .await
            .context("failed to receive datagram")?;

        let applied = self.cube.apply_frame(&self.buf[..len]);
        if applied {
            self.metrics.record_applied(len);
            tracing::debug!("Applied frame from {}", peer);
        } else {
            self.metrics.record_dropped(len);
            tracing::trace!("Dropped {} byte datagram from {}", len, peer);
        }

        if self.last_refresh.elapsed() >= self.refresh_every {
            let local = self.socket.local_addr()?;
            self.refresh_network(local);
        }

        Ok(applied)
    }

    /// Receive frames until `shutdown` resolves.
    pub async fn run_until<F>(&mut self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Frame listener shutting down");
                    return Ok(());
                }
                result = self.recv_once() => {
                    if let Err(e) = result {
                        tracing::warn!("Receive error: {:#}", e);
                    }
                }
            }
        }
    }

    fn refresh_network(&mut self, local: SocketAddr) {
        self.network = network_info(local);
        self.last_refresh = Instant::now();
        tracing::debug!("Network info: {}", self.network);
    }
}

async fn bind_socket(host: &str, port: u16) -> anyhow::Result<UdpSocket> {
    UdpSocket::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))
}

fn network_info(local: SocketAddr) -> NetworkInfo {
    let ip = match local.ip() {
        IpAddr::V4(ip) => ip,
        IpAddr::V6(ip) => ip.to_ipv4_mapped().unwrap_or(Ipv4Addr::UNSPECIFIED),
    };
    NetworkInfo::new(ip, HOST_MAC, local.port())
}
