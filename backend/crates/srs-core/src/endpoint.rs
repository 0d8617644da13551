use crate::{CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// The four endpoints the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Liveness probe, no side effects
    Ping,
    /// Validate and run a [`Command`](crate::Command)
    Exec,
    /// Report the current [`Status`](crate::Status)
    Query,
    /// Release the lifecycle gate so the host shuts down
    Exit,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Exec => HttpMethod::Post,
            Self::Ping | Self::Query | Self::Exit => HttpMethod::Get,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Ping => "/ping",
            Self::Exec => "/exec",
            Self::Query => "/query",
            Self::Exit => "/exit",
        }
    }

    /// Content type the request body must declare, if the endpoint takes a body
    pub fn consumes(&self) -> Option<&'static str> {
        match self {
            Self::Exec => Some(CONTENT_TYPE_JSON),
            Self::Ping | Self::Query | Self::Exit => None,
        }
    }

    pub fn produces(&self) -> &'static str {
        match self {
            Self::Query => CONTENT_TYPE_JSON,
            Self::Ping | Self::Exec | Self::Exit => CONTENT_TYPE_TEXT,
        }
    }
}

pub const ROUTE_TABLE: [Endpoint; 4] = [
    Endpoint::Ping,
    Endpoint::Exec,
    Endpoint::Query,
    Endpoint::Exit,
];
