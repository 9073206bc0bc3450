use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use mailprobe_lib::{Thresholds, ValidateOptions};

#[derive(Parser, Debug)]
#[command(name = "mailprobe-cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// format: human|json|ndjson
    #[arg(long, default_value = "human")]
    pub format: String,

    /// options de validation au format JSON (feature `with-serde`)
    #[arg(long)]
    pub config: Option<String>,

    /// active la sonde SMTP (RCPT TO sans envoi)
    #[arg(long)]
    pub smtp: bool,

    /// active la détection catch-all
    #[arg(long = "catch-all")]
    pub catch_all: bool,

    /// nom annoncé dans HELO
    #[arg(long)]
    pub helo: Option<String>,

    /// enveloppe MAIL FROM
    #[arg(long = "from")]
    pub mail_from: Option<String>,

    /// port SMTP
    #[arg(long)]
    pub port: Option<u16>,

    /// timeout par requête DNS (ms)
    #[arg(long = "dns-timeout")]
    pub dns_timeout_ms: Option<u64>,

    /// timeout global d'une session SMTP (ms)
    #[arg(long = "smtp-timeout")]
    pub smtp_timeout_ms: Option<u64>,

    /// connexions SMTP max par domaine et par minute
    #[arg(long = "max-per-minute")]
    pub max_per_minute: Option<usize>,

    /// ne pas interroger MX
    #[arg(long)]
    pub no_mx: bool,

    /// ne pas vérifier SPF
    #[arg(long)]
    pub no_spf: bool,

    /// ne pas vérifier DMARC
    #[arg(long)]
    pub no_dmarc: bool,

    /// seuil du verdict valid
    #[arg(long = "valid-threshold")]
    pub valid_threshold: Option<u8>,

    /// seuil du verdict risky
    #[arg(long = "risky-threshold")]
    pub risky_threshold: Option<u8>,

    /// seuil du verdict unknown
    #[arg(long = "unknown-threshold")]
    pub unknown_threshold: Option<u8>,

    /// ajoute intelligence, risques et détail du score
    #[arg(long)]
    pub detailed: bool,

    /// trace étape par étape
    #[arg(long)]
    pub trace: bool,

    /// verbosité des logs sur stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Validate {
        /// adresse e-mail à évaluer
        email: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    /// Filtre de logs par défaut quand `RUST_LOG` est absent.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "mailprobe_lib=info,warn",
            2 => "mailprobe_lib=debug,smtp_probe=debug,info",
            _ => "trace",
        }
    }

    /// Applique les drapeaux par-dessus `base` (défauts ou fichier --config).
    pub fn apply(&self, mut options: ValidateOptions) -> Result<ValidateOptions> {
        options.smtp.enabled |= self.smtp;
        options.catch_all.enabled |= self.catch_all;
        if let Some(helo) = &self.helo {
            options.smtp.helo_name = helo.clone();
        }
        if let Some(from) = &self.mail_from {
            options.smtp.mail_from = from.clone();
        }
        if let Some(port) = self.port {
            options.smtp.port = port;
        }
        if let Some(ms) = self.dns_timeout_ms {
            options.dns.timeout_ms = ms;
        }
        if let Some(ms) = self.smtp_timeout_ms {
            // la détection catch-all suit le même budget
            options.smtp.timeout_ms = ms;
            options.catch_all.timeout_ms = ms;
        }
        if let Some(limit) = self.max_per_minute {
            options.smtp.max_connections_per_domain_per_minute = limit;
        }
        options.dns.mx &= !self.no_mx;
        options.dns.spf &= !self.no_spf;
        options.dns.dmarc &= !self.no_dmarc;

        let thresholds = &mut options.scoring.thresholds;
        if let Some(valid) = self.valid_threshold {
            thresholds.valid = valid;
        }
        if let Some(risky) = self.risky_threshold {
            thresholds.risky = risky;
        }
        if let Some(unknown) = self.unknown_threshold {
            thresholds.unknown = unknown;
        }
        check_thresholds(thresholds)?;

        options.detailed |= self.detailed;
        options.trace |= self.trace;
        Ok(options)
    }
}

fn check_thresholds(t: &Thresholds) -> Result<()> {
    if t.valid > 100 || t.risky > t.valid || t.unknown > t.risky {
        bail!(
            "seuils incohérents: valid={} risky={} unknown={} (attendu 100 >= valid >= risky >= unknown)",
            t.valid,
            t.risky,
            t.unknown
        );
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
pub fn load_config(path: &str) -> Result<ValidateOptions> {
    use anyhow::Context;

    let raw = std::fs::read_to_string(path).with_context(|| format!("read config {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("parse config {path}"))
}

#[cfg(not(feature = "with-serde"))]
pub fn load_config(_path: &str) -> Result<ValidateOptions> {
    bail!("--config nécessite la feature 'with-serde'")
}
