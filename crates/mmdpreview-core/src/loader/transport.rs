use std::time::Duration;

/// Identifying `User-Agent` sent with every pack request.
pub const USER_AGENT: &str = "mmdpreview";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single HTTP response as seen by the loader. Redirects are never followed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
            body: String::new(),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 301 | 302 | 303 | 307 | 308)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues one GET request. Transport-level failures (DNS, TLS, I/O) are returned as `Err`;
/// any HTTP status, including errors and redirects, is returned as `Ok`.
pub trait PackTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, String>;
}

/// Blocking HTTP transport backed by `ureq`, with automatic redirects disabled.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        let agent = ureq::AgentBuilder::new()
            .redirects(0)
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build();
        Self { agent }
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PackTransport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => return Err(err.to_string()),
        };
        let status = response.status();
        let location = response.header("location").map(str::to_string);
        let body = response.into_string().map_err(|err| err.to_string())?;
        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}
