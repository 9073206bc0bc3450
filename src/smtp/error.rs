use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error with {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection closed by {host}")]
    Closed { host: String },
    #[error("deadline reached while talking to {host}")]
    Deadline { host: String },
}

impl SmtpError {
    pub(crate) fn connect(host: &str, port: u16, source: std::io::Error) -> Self {
        Self::Connect {
            host: host.to_string(),
            port,
            source,
        }
    }

    pub(crate) fn io(host: &str, source: std::io::Error) -> Self {
        Self::Io {
            host: host.to_string(),
            source,
        }
    }

    pub(crate) fn closed(host: &str) -> Self {
        Self::Closed {
            host: host.to_string(),
        }
    }

    pub(crate) fn deadline(host: &str) -> Self {
        Self::Deadline {
            host: host.to_string(),
        }
    }
}
