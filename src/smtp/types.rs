use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Classification of one probed recipient.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStatus {
    /// RCPT TO was accepted.
    Valid,
    /// RCPT TO was rejected with a definitive "no such user" reply.
    Invalid,
    /// Anything else: temporary failure, policy block, timeout, transport
    /// error, rate limiting.
    Unknown,
}

impl ProbeStatus {
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point reached in the SMTP conversation.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStage {
    Greet,
    Helo,
    MailFrom,
    Rcpt,
    Done,
}

impl ProbeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greet => "greet",
            Self::Helo => "helo",
            Self::MailFrom => "mailfrom",
            Self::Rcpt => "rcpt",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code attached to a [`ProbeOutcome`]: the SMTP reply that settled the
/// conversation, or the local reason none did. Serialized as its display
/// string (`"550"`, `"rate_limited"`).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(into = "String", try_from = "String"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeCode {
    Reply(u16),
    RateLimited,
    NoMxHosts,
    Timeout,
    Transport,
}

impl fmt::Display for ProbeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reply(code) => write!(f, "{code}"),
            Self::RateLimited => f.write_str("rate_limited"),
            Self::NoMxHosts => f.write_str("no_mx"),
            Self::Timeout => f.write_str("timeout"),
            Self::Transport => f.write_str("transport"),
        }
    }
}

impl From<ProbeCode> for String {
    fn from(code: ProbeCode) -> Self {
        code.to_string()
    }
}

impl TryFrom<String> for ProbeCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "rate_limited" => Ok(Self::RateLimited),
            "no_mx" => Ok(Self::NoMxHosts),
            "timeout" => Ok(Self::Timeout),
            "transport" => Ok(Self::Transport),
            reply => reply
                .parse::<u16>()
                .ok()
                .filter(|code| (100..1000).contains(code))
                .map(Self::Reply)
                .ok_or_else(|| format!("unknown probe code '{value}'")),
        }
    }
}

/// Terminal result of one probe.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: ProbeStatus,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub code: Option<ProbeCode>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub host: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub stage: Option<ProbeStage>,
}

impl ProbeOutcome {
    pub fn unknown(code: ProbeCode) -> Self {
        Self {
            status: ProbeStatus::Unknown,
            code: Some(code),
            host: None,
            stage: None,
        }
    }
}

/// Client commands, rendered verbatim with CRLF termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmtpCommand {
    Helo(String),
    MailFrom(String),
    RcptTo(String),
    Quit,
}

impl SmtpCommand {
    pub fn line(&self) -> String {
        format!("{self}\r\n")
    }
}

impl fmt::Display for SmtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Helo(name) => write!(f, "HELO {name}"),
            Self::MailFrom(sender) => write!(f, "MAIL FROM:<{sender}>"),
            Self::RcptTo(recipient) => write!(f, "RCPT TO:<{recipient}>"),
            Self::Quit => f.write_str("QUIT"),
        }
    }
}
