//! Local network address discovery
//!
//! Resolves the address other devices on the LAN would use to reach this
//! machine, for display in the startup banner and the QR-scannable URL.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Well-known public address dialed to force route selection.
/// Connecting a UDP socket sends no packets; it only binds a local interface.
const PROBE_ADDR: &str = "8.8.8.8:80";

/// Best-effort outward-facing IPv4 address of this machine.
///
/// Any failure (no network, no route) degrades to the loopback address so the
/// server can still start; only the displayed URL becomes inaccurate.
pub fn local_ipv4() -> IpAddr {
    discover().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn discover() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect(PROBE_ADDR).ok()?;
    let addr = socket.local_addr().ok()?;
    match addr.ip() {
        ip @ IpAddr::V4(_) => Some(ip),
        IpAddr::V6(_) => None,
    }
}
