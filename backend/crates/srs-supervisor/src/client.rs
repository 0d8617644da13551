use crate::error::{Result as SupervisorResult, SupervisorError};

use srs_core::{CONTENT_TYPE_JSON, Command, Endpoint, Status};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method, Response};
use tracing::debug;

/// Outcome of a well-formed `/exec` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    Accepted,
    Rejected { status: u16, body: String },
}

/// Status and body of a response, uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

/// HTTP client for the four service routes
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: String,
    client: ReqwestClient,
}

impl ServiceClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Service URL (e.g., "http://127.0.0.1:9999")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    pub fn for_port(host: &str, port: u16) -> Self {
        Self::new(&format!("http://{host}:{port}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, endpoint: Endpoint) -> reqwest::RequestBuilder {
        let method = match endpoint.method() {
            srs_core::HttpMethod::Get => Method::GET,
            srs_core::HttpMethod::Post => Method::POST,
        };
        let url = format!("{}{}", self.base_url, endpoint.path());
        self.client.request(method, &url)
    }

    /// `GET /ping`; returns the body, which a healthy service sets to `hello`
    pub async fn ping(&self) -> SupervisorResult<String> {
        let response = self.request(Endpoint::Ping).send().await?;
        expect_success("/ping", response).await
    }

    /// `POST /exec` with a JSON command
    pub async fn exec(&self, command: &Command) -> SupervisorResult<ExecOutcome> {
        let response = self.request(Endpoint::Exec).json(command).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("/exec {} -> {} {}", command.name, status.as_u16(), body);

        if !status.is_success() {
            return Ok(ExecOutcome::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        if body != srs_core::OK_REPLY {
            return Err(SupervisorError::UnexpectedReply {
                endpoint: "/exec",
                status: status.as_u16(),
                body,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ExecOutcome::Accepted)
    }

    /// `POST /exec` with an arbitrary body and optional content type
    pub async fn exec_raw(
        &self,
        body: &str,
        content_type: Option<&str>,
    ) -> SupervisorResult<RawReply> {
        let mut req = self.request(Endpoint::Exec).body(body.to_string());
        if let Some(content_type) = content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = req.send().await?;
        Ok(RawReply {
            status: response.status().as_u16(),
            body: response.text().await?,
        })
    }

    /// `GET /query`
    pub async fn query(&self) -> SupervisorResult<Status> {
        let response = self
            .request(Endpoint::Query)
            .header(reqwest::header::ACCEPT, CONTENT_TYPE_JSON)
            .send()
            .await?;
        let body = expect_success("/query", response).await?;
        let status = serde_json::from_str(&body).map_err(|e| SupervisorError::UnexpectedReply {
            endpoint: "/query",
            status: 200,
            body: format!("{body} ({e})"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(status)
    }

    /// `GET /exit`; returns the body, `ok` when the service accepted the request
    pub async fn exit(&self) -> SupervisorResult<String> {
        let response = self.request(Endpoint::Exit).send().await?;
        expect_success("/exit", response).await
    }
}

async fn expect_success(endpoint: &'static str, response: Response) -> SupervisorResult<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SupervisorError::UnexpectedReply {
            endpoint,
            status: status.as_u16(),
            body,
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(body)
}
