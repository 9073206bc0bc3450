//! Transport-free transition function of the probe conversation.
//!
//! The driver feeds one [`ProbeEvent`] at a time and applies the returned
//! [`Transition`]: write `send` if present, stop once `settled` is present.

use super::types::{ProbeCode, ProbeStage, ProbeStatus, SmtpCommand};

/// How the reply to `RCPT TO` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RcptRule {
    /// Mailbox probing: only 550/551/553 count as "no such user".
    Mailbox,
    /// Catch-all detection: any 5xx means the random recipient was refused.
    CatchAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    /// Final reply code of a received chunk.
    Reply(u16),
    Timeout,
    /// Peer closed the connection.
    Closed,
    TransportError,
}

/// Parameters of one conversation.
#[derive(Debug, Clone, Copy)]
pub struct Conversation<'a> {
    pub helo: &'a str,
    pub mail_from: &'a str,
    pub recipient: &'a str,
    pub rule: RcptRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub status: ProbeStatus,
    pub code: ProbeCode,
    /// Stage at which the conversation ended.
    pub at: ProbeStage,
    /// Whether a polite `QUIT` goes out before closing.
    pub quit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub stage: ProbeStage,
    pub send: Option<SmtpCommand>,
    pub settled: Option<Settled>,
}

impl Transition {
    fn stay(stage: ProbeStage) -> Self {
        Self {
            stage,
            send: None,
            settled: None,
        }
    }

    fn send(stage: ProbeStage, command: SmtpCommand) -> Self {
        Self {
            stage,
            send: Some(command),
            settled: None,
        }
    }

    fn settle(at: ProbeStage, status: ProbeStatus, code: ProbeCode) -> Self {
        let quit = matches!(status, ProbeStatus::Valid | ProbeStatus::Invalid);
        Self {
            stage: ProbeStage::Done,
            send: None,
            settled: Some(Settled {
                status,
                code,
                at,
                quit,
            }),
        }
    }
}

pub fn advance(stage: ProbeStage, event: ProbeEvent, conv: &Conversation<'_>) -> Transition {
    if stage == ProbeStage::Done {
        return Transition::stay(ProbeStage::Done);
    }

    let code = match event {
        ProbeEvent::Reply(code) => code,
        ProbeEvent::Timeout => {
            return Transition::settle(stage, ProbeStatus::Unknown, ProbeCode::Timeout);
        }
        ProbeEvent::Closed | ProbeEvent::TransportError => {
            return Transition::settle(stage, ProbeStatus::Unknown, ProbeCode::Transport);
        }
    };
    let reply = ProbeCode::Reply(code);

    match stage {
        ProbeStage::Greet => Transition::send(
            ProbeStage::Helo,
            SmtpCommand::Helo(conv.helo.to_string()),
        ),
        ProbeStage::Helo | ProbeStage::MailFrom if code == 250 => {
            if stage == ProbeStage::Helo {
                Transition::send(
                    ProbeStage::MailFrom,
                    SmtpCommand::MailFrom(conv.mail_from.to_string()),
                )
            } else {
                Transition::send(
                    ProbeStage::Rcpt,
                    SmtpCommand::RcptTo(conv.recipient.to_string()),
                )
            }
        }
        // Early policy rejection.
        ProbeStage::Helo | ProbeStage::MailFrom if is_permanent(code) => {
            Transition::settle(stage, ProbeStatus::Unknown, reply)
        }
        // Any other reply before RCPT leaves the conversation waiting for the
        // deadline.
        ProbeStage::Helo | ProbeStage::MailFrom => Transition::stay(stage),
        ProbeStage::Rcpt => Transition::settle(stage, classify_rcpt(code, conv.rule), reply),
        ProbeStage::Done => Transition::stay(ProbeStage::Done),
    }
}

fn classify_rcpt(code: u16, rule: RcptRule) -> ProbeStatus {
    match (rule, code) {
        (_, 250) => ProbeStatus::Valid,
        (RcptRule::Mailbox, 550 | 551 | 553) => ProbeStatus::Invalid,
        (RcptRule::CatchAll, code) if is_permanent(code) => ProbeStatus::Invalid,
        _ => ProbeStatus::Unknown,
    }
}

fn is_permanent(code: u16) -> bool {
    (500..600).contains(&code)
}
