use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, trace};

use super::error::SmtpError;
use super::machine::{Conversation, ProbeEvent, Settled, Transition, advance};
use super::types::{ProbeCode, ProbeOutcome, ProbeStage, ProbeStatus, SmtpCommand};

const QUIT_GRACE: Duration = Duration::from_millis(500);
const MAX_PENDING_REPLY: usize = 8 * 1024;

/// Runs one probe conversation against `host:port` and classifies it.
///
/// The whole session, connect included, shares a single deadline armed
/// here. Every failure resolves to an `unknown` outcome. The socket is owned
/// by this call and closed when it returns.
pub async fn converse(
    host: &str,
    port: u16,
    conv: &Conversation<'_>,
    budget: Duration,
) -> ProbeOutcome {
    let deadline = Instant::now() + budget;

    let mut session = match SmtpSession::connect(host, port, deadline).await {
        Ok(session) => session,
        Err(err) => {
            debug!(target: "smtp_probe", %host, error = %err, "connect failed");
            return settle_on_error(host, ProbeStage::Greet, &err, conv);
        }
    };

    let mut stage = ProbeStage::Greet;
    let mut pending: Option<ProbeEvent> = None;
    loop {
        let event = match pending.take() {
            Some(event) => event,
            None => session.next_event(deadline).await,
        };
        let Transition {
            stage: next,
            send,
            settled,
        } = advance(stage, event, conv);

        if let Some(settled) = settled {
            if settled.quit {
                session.quit().await;
            }
            debug!(
                target: "smtp_probe",
                %host,
                status = %settled.status,
                code = %settled.code,
                stage = %settled.at,
                "probe settled"
            );
            return outcome(host, settled);
        }

        stage = next;
        if let Some(command) = send {
            if let Err(err) = session.send(&command, deadline).await {
                debug!(target: "smtp_probe", %host, error = %err, "write failed");
                pending = Some(event_for(&err));
            }
        }
    }
}

struct SmtpSession {
    host: String,
    stream: TcpStream,
    buffer: Vec<u8>,
}

impl SmtpSession {
    async fn connect(host: &str, port: u16, deadline: Instant) -> Result<Self, SmtpError> {
        let stream = match timeout_at(deadline, TcpStream::connect((host, port))).await {
            Err(_) => return Err(SmtpError::deadline(host)),
            Ok(Err(err)) => return Err(SmtpError::connect(host, port, err)),
            Ok(Ok(stream)) => stream,
        };
        trace!(target: "smtp_probe", %host, port, "connected");
        Ok(Self {
            host: host.to_string(),
            stream,
            buffer: Vec::new(),
        })
    }

    async fn next_event(&mut self, deadline: Instant) -> ProbeEvent {
        match self.read_reply(deadline).await {
            Ok(code) => ProbeEvent::Reply(code),
            Err(err) => {
                debug!(target: "smtp_probe", host = %self.host, error = %err, "read failed");
                event_for(&err)
            }
        }
    }

    async fn read_reply(&mut self, deadline: Instant) -> Result<u16, SmtpError> {
        let mut chunk = [0u8; 1024];
        loop {
            let read = match timeout_at(deadline, self.stream.read(&mut chunk)).await {
                Err(_) => return Err(SmtpError::deadline(&self.host)),
                Ok(Err(err)) => return Err(SmtpError::io(&self.host, err)),
                Ok(Ok(0)) => return Err(SmtpError::closed(&self.host)),
                Ok(Ok(read)) => read,
            };
            self.buffer.extend_from_slice(&chunk[..read]);
            if !self.buffer.ends_with(b"\n") && self.buffer.len() < MAX_PENDING_REPLY {
                continue;
            }

            let text = String::from_utf8_lossy(&self.buffer).into_owned();
            self.buffer.clear();
            trace!(target: "smtp_probe", host = %self.host, reply = %text.trim_end(), "S");
            if let Some(code) = last_reply_code(&text) {
                return Ok(code);
            }
        }
    }

    async fn send(&mut self, command: &SmtpCommand, deadline: Instant) -> Result<(), SmtpError> {
        trace!(target: "smtp_probe", host = %self.host, %command, "C");
        let line = command.line();
        match timeout_at(deadline, self.stream.write_all(line.as_bytes())).await {
            Err(_) => Err(SmtpError::deadline(&self.host)),
            Ok(Err(err)) => Err(SmtpError::io(&self.host, err)),
            Ok(Ok(())) => Ok(()),
        }
    }

    /// Best effort: the reply to QUIT is not awaited.
    async fn quit(&mut self) {
        let line = SmtpCommand::Quit.line();
        if let Ok(Err(err)) = timeout(QUIT_GRACE, self.stream.write_all(line.as_bytes())).await {
            trace!(target: "smtp_probe", host = %self.host, error = %err, "QUIT not delivered");
        }
        let _ = timeout(QUIT_GRACE, self.stream.shutdown()).await;
    }
}

/// Reply code carried by the last non-empty line of `chunk`. `None` when that
/// line is a continuation (`250-...`) or does not start with three digits.
pub(crate) fn last_reply_code(chunk: &str) -> Option<u16> {
    let line = chunk
        .lines()
        .map(str::trim_end)
        .rev()
        .find(|line| !line.is_empty())?;
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.get(3) == Some(&b'-') {
        return None;
    }
    line[..3].parse().ok()
}

fn event_for(err: &SmtpError) -> ProbeEvent {
    match err {
        SmtpError::Deadline { .. } => ProbeEvent::Timeout,
        SmtpError::Closed { .. } => ProbeEvent::Closed,
        SmtpError::Connect { .. } | SmtpError::Io { .. } => ProbeEvent::TransportError,
    }
}

fn settle_on_error(
    host: &str,
    stage: ProbeStage,
    err: &SmtpError,
    conv: &Conversation<'_>,
) -> ProbeOutcome {
    match advance(stage, event_for(err), conv).settled {
        Some(settled) => outcome(host, settled),
        None => ProbeOutcome {
            status: ProbeStatus::Unknown,
            code: Some(ProbeCode::Transport),
            host: Some(host.to_string()),
            stage: Some(stage),
        },
    }
}

fn outcome(host: &str, settled: Settled) -> ProbeOutcome {
    ProbeOutcome {
        status: settled.status,
        code: Some(settled.code),
        host: Some(host.to_string()),
        stage: Some(settled.at),
    }
}
