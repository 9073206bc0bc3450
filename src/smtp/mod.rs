//! Minimal SMTP client used to ask a mail host whether it accepts a recipient.
//!
//! The conversation (banner, `HELO`, `MAIL FROM`, `RCPT TO`) is described by
//! the pure [`advance`] function and driven over a plain TCP socket by
//! [`converse`]. Mailbox probing ([`probe_smtp`]) and catch-all detection
//! share that driver and differ only by their [`RcptRule`]. Nothing is ever
//! sent past `RCPT TO`.

mod error;
mod machine;
mod options;
mod probe;
mod session;
mod types;
mod util;

pub use error::SmtpError;
pub use machine::{Conversation, ProbeEvent, RcptRule, Settled, Transition, advance};
pub use options::SmtpOptions;
pub use probe::{connect_and_probe, probe_smtp};
pub use session::converse;
pub use types::{ProbeCode, ProbeOutcome, ProbeStage, ProbeStatus, SmtpCommand};
pub use util::random_local_part;
