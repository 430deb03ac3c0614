/// Per-call execution context handed from the transport to the tool handler.
#[derive(Debug, Clone)]
pub struct RequestContext {
    transport: Transport,
    authorization: Option<String>,
    call_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

impl Transport {
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
        }
    }
}

impl RequestContext {
    pub fn stdio() -> Self {
        Self::new(Transport::Stdio, None)
    }

    pub fn http(authorization: Option<String>) -> Self {
        Self::new(Transport::Http, authorization)
    }

    fn new(transport: Transport, authorization: Option<String>) -> Self {
        Self {
            transport,
            authorization,
            call_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Caller-supplied `Authorization` value; empty values count as absent.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref().filter(|value| !value.is_empty())
    }

    pub fn call_id(&self) -> &str {
        &self.call_id
    }
}
