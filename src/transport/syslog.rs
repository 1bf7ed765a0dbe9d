//! Remote syslog transport over UDP (Papertrail style)
//!
//! Frames follow RFC 5424 with facility `user`:
//! `<PRI>1 <timestamp> <hostname> <program> - - - <message>`

use super::{Record, Transport};
use crate::error::{LogError, Result};
use chrono::{SecondsFormat, Utc};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

const FACILITY_USER: u8 = 1;

/// Syslog severity for a level name
pub fn severity(level: &str) -> u8 {
    match level {
        "error" => 3,
        "warn" => 4,
        "remote" | "audit" => 5,
        "info" => 6,
        _ => 7,
    }
}

/// Sends each record as one UDP datagram to a remote syslog endpoint
#[derive(Debug)]
pub struct SyslogTransport {
    socket: UdpSocket,
    target: SocketAddr,
    hostname: String,
    program: String,
}

impl SyslogTransport {
    /// Resolve `host:port` and connect a UDP socket to it
    pub fn connect(host_and_port: &str, hostname: &str, program: &str) -> Result<Self> {
        let (_, port) = host_and_port.rsplit_once(':').ok_or_else(|| {
            LogError::Config(format!("syslog address '{}' is not host:port", host_and_port))
        })?;
        if port.parse::<u16>().is_err() {
            return Err(LogError::Config(format!(
                "syslog port '{}' is not a number",
                port
            )));
        }

        // Resolve the whole string so bracketed IPv6 literals work
        let target = host_and_port
            .to_socket_addrs()
            .map_err(|e| LogError::Connection(format!("{}: {}", host_and_port, e)))?
            .next()
            .ok_or_else(|| LogError::Connection(format!("{}: no address", host_and_port)))?;

        let local = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)?;
        socket.connect(target)?;

        tracing::info!(target = %target, program = %program, "Remote syslog connected");

        Ok(Self {
            socket,
            target,
            hostname: hostname.to_string(),
            program: program.to_string(),
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Build the datagram for a record
    pub fn frame(&self, record: &Record<'_>) -> String {
        let pri = FACILITY_USER * 8 + severity(record.level.name());
        format!(
            "<{}>1 {} {} {} - - - {}",
            pri,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            self.hostname,
            self.program,
            record.message
        )
    }
}

impl Transport for SyslogTransport {
    fn name(&self) -> &str {
        "syslog"
    }

    fn write(&self, record: &Record<'_>) -> Result<()> {
        let frame = self.frame(record);
        self.socket.send(frame.as_bytes()).map_err(|e| LogError::Transport {
            transport: "syslog".to_string(),
            reason: format!("{}: {}", self.target, e),
        })?;
        Ok(())
    }
}
