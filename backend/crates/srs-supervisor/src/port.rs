//! Port allocation and availability checking.

use crate::error::{Result as SupervisorResult, SupervisorError};

use std::net::TcpListener;
use std::panic::Location;

use error_location::ErrorLocation;

const LOOPBACK: &str = "127.0.0.1";
const WILDCARD: &str = "0.0.0.0";

pub struct PortAllocator;

impl PortAllocator {
    /// Ask the OS for a free loopback port.
    ///
    /// The probe listener is dropped before returning, so the port is only
    /// free at the moment of the call; another process may still take it
    /// before the service binds.
    #[track_caller]
    pub fn find_free() -> SupervisorResult<u16> {
        let listener = TcpListener::bind((LOOPBACK, 0))?;
        let port = listener.local_addr()?.port();
        drop(listener);
        Ok(port)
    }

    /// First bindable port, trying `preferred` before anything in `range`.
    #[track_caller]
    pub fn find_available(preferred: u16, range: (u16, u16)) -> SupervisorResult<u16> {
        let (start, end) = range;
        std::iter::once(preferred)
            .chain((start..=end).filter(|&port| port != preferred))
            .find(|&port| port != 0 && Self::is_available(port))
            .ok_or_else(|| SupervisorError::NoAvailablePort {
                start,
                end,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Whether a listener could be bound on `port` at this moment.
    ///
    /// Probes the wildcard address, which is what the service binds by
    /// default, so a port held on any local interface counts as taken.
    pub fn is_available(port: u16) -> bool {
        TcpListener::bind((WILDCARD, port)).is_ok()
    }
}
