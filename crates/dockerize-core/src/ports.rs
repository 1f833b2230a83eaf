//! Local port allocation for the generated services
//!
//! Availability is checked by binding a transient listener on the loopback
//! interface. The answer is a hint, not a reservation: another process can
//! claim the port between the check and its actual use.

use crate::error::{Error, Result};
use crate::validation::validate_port;
use colored::Colorize;
use std::net::Ipv4Addr;
use tokio::net::TcpListener;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Default port per logical service, in assignment order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDefaults {
    services: Vec<(String, u16)>,
}

impl Default for PortDefaults {
    fn default() -> Self {
        Self::new([("DEV_PORT", 3000), ("PROD_PORT", 8080), ("NGINX_PORT", 80)])
    }
}

impl PortDefaults {
    pub fn new<S: Into<String>>(services: impl IntoIterator<Item = (S, u16)>) -> Self {
        Self {
            services: services
                .into_iter()
                .map(|(name, port)| (name.into(), port))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.services.iter().map(|(name, port)| (name.as_str(), *port))
    }
}

/// Port chosen for each logical service. Duplicates across services are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortAssignment {
    ports: Vec<(String, u16)>,
}

impl PortAssignment {
    pub fn get(&self, service: &str) -> Option<u16> {
        self.ports
            .iter()
            .find(|(name, _)| name == service)
            .map(|(_, port)| *port)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.ports.iter().map(|(name, port)| (name.as_str(), *port))
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    fn push(&mut self, service: &str, port: u16) {
        self.ports.push((service.to_string(), port));
    }
}

/// Check whether `port` can currently be bound on 127.0.0.1.
///
/// Invalid ports report `false`. The probe listener is dropped before the
/// result is returned, so nothing stays bound after the check.
pub async fn check_port_availability(port: i64) -> bool {
    let port = match validate_port(port) {
        Ok(p) => p,
        Err(e) => {
            log::debug!("Invalid port for availability check: {}", e);
            return false;
        }
    };

    match TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await {
        Ok(listener) => {
            drop(listener);
            true
        }
        Err(e) => {
            log::debug!("Port {} availability check failed: {}", port, e);
            false
        }
    }
}

/// Linear probe from `start_port`, trying at most `max_attempts` ports
pub async fn find_available_port(start_port: i64, max_attempts: u32) -> Result<u16> {
    for offset in 0..i64::from(max_attempts) {
        let Some(candidate) = start_port.checked_add(offset) else {
            break;
        };
        if check_port_availability(candidate).await {
            if let Ok(port) = validate_port(candidate) {
                return Ok(port);
            }
        }
    }

    Err(Error::PortsExhausted {
        start: start_port,
        attempts: max_attempts,
    })
}

/// Assigns one port per service, probing sequentially
#[derive(Debug, Clone)]
pub struct PortAllocator {
    defaults: PortDefaults,
    max_attempts: u32,
}

impl Default for PortAllocator {
    fn default() -> Self {
        Self::new(PortDefaults::default(), DEFAULT_MAX_ATTEMPTS)
    }
}

impl PortAllocator {
    pub fn new(defaults: PortDefaults, max_attempts: u32) -> Self {
        Self {
            defaults,
            max_attempts,
        }
    }

    /// Keep each default when free, otherwise probe upward from `default + 1`.
    ///
    /// Never fails: when probing is exhausted the default is kept anyway.
    pub async fn assign_dynamic_ports(&self) -> PortAssignment {
        let mut assignment = PortAssignment::default();

        for (service, default_port) in self.defaults.iter() {
            if check_port_availability(i64::from(default_port)).await {
                assignment.push(service, default_port);
                continue;
            }

            match find_available_port(i64::from(default_port) + 1, self.max_attempts).await {
                Ok(port) => {
                    println!(
                        "{}",
                        format!(
                            "Port {} is in use, assigned {} instead",
                            default_port, port
                        )
                        .yellow()
                    );
                    assignment.push(service, port);
                }
                Err(e) => {
                    println!(
                        "{}",
                        format!("Error finding available port for {}: {}", service, e).red()
                    );
                    assignment.push(service, default_port);
                }
            }
        }

        assignment
    }
}

/// [`PortAllocator::assign_dynamic_ports`] with the stock defaults
pub async fn assign_dynamic_ports() -> PortAssignment {
    PortAllocator::default().assign_dynamic_ports().await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn occupy() -> (TcpListener, u16) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[tokio::test]
    async fn test_invalid_ports_are_unavailable() {
        assert!(!check_port_availability(0).await);
        assert!(!check_port_availability(-1).await);
        assert!(!check_port_availability(65536).await);
    }

    #[tokio::test]
    async fn test_occupied_port_is_unavailable() {
        let (_listener, port) = occupy().await;
        assert!(!check_port_availability(i64::from(port)).await);
    }

    #[tokio::test]
    async fn test_probe_releases_the_port() {
        let (listener, port) = occupy().await;
        drop(listener);

        assert!(check_port_availability(i64::from(port)).await);
        // a second probe and a real bind both succeed, so the first probe let go
        assert!(check_port_availability(i64::from(port)).await);
        let rebound = TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await;
        assert!(rebound.is_ok());
    }

    #[tokio::test]
    async fn test_find_available_port_skips_occupied() {
        let (_listener, port) = occupy().await;
        if port == u16::MAX {
            return;
        }
        let found = find_available_port(i64::from(port), 10).await.unwrap();
        assert!(found > port);
        assert!(i64::from(found) < i64::from(port) + 10);
    }

    #[tokio::test]
    async fn test_find_available_port_exhausts() {
        let (_listener, port) = occupy().await;
        let err = find_available_port(i64::from(port), 1).await.unwrap_err();
        assert!(err.to_string().contains("Could not find available port"));

        let err = find_available_port(70000, 5).await.unwrap_err();
        assert!(matches!(err, Error::PortsExhausted { start: 70000, .. }));
    }

    #[tokio::test]
    async fn test_find_available_port_near_i64_max() {
        let start = i64::MAX - 1;
        let err = find_available_port(start, 5).await.unwrap_err();
        assert!(matches!(
            err,
            Error::PortsExhausted { start: s, attempts: 5 } if s == start
        ));
    }

    #[tokio::test]
    async fn test_assigns_every_service() {
        let ports = assign_dynamic_ports().await;
        assert_eq!(ports.len(), 3);
        for service in ["DEV_PORT", "PROD_PORT", "NGINX_PORT"] {
            let port = ports.get(service).unwrap();
            assert!(port >= 1);
        }
    }

    #[tokio::test]
    async fn test_occupied_defaults_still_yield_ports() {
        let (_a, dev) = occupy().await;
        let (_b, prod) = occupy().await;
        let (_c, nginx) = occupy().await;

        let allocator = PortAllocator::new(
            PortDefaults::new([("DEV_PORT", dev), ("PROD_PORT", prod), ("NGINX_PORT", nginx)]),
            DEFAULT_MAX_ATTEMPTS,
        );
        let ports = allocator.assign_dynamic_ports().await;

        assert_eq!(ports.len(), 3);
        for (_, port) in ports.iter() {
            assert!(port >= 1);
        }
    }

    #[tokio::test]
    async fn test_exhausted_probe_keeps_default() {
        let (_listener, port) = occupy().await;
        let allocator = PortAllocator::new(PortDefaults::new([("DEV_PORT", port)]), 0);

        let ports = allocator.assign_dynamic_ports().await;
        assert_eq!(ports.get("DEV_PORT"), Some(port));
    }
}
