//! Contrôle syntaxique d'une adresse: la seule étape dont l'échec arrête la
//! validation.

mod domain;
mod local;
mod types;

pub use types::SyntaxReport;

use domain::check_domain;
use local::is_local_valid;

/// Trim + minuscules, appliqué avant toute autre étape.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn check_syntax(email: &str) -> SyntaxReport {
    let input = email.trim();
    let mut reasons = Vec::new();

    if input.len() > 254 {
        reasons.push(format!("total length {} > 254", input.len()));
    }

    let parts: Vec<&str> = input.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return SyntaxReport {
            input: input.to_string(),
            local: String::new(),
            domain: String::new(),
            ascii_domain: String::new(),
            valid: false,
            reasons,
        };
    }
    let (local, domain) = (parts[0], parts[1].trim_end_matches('.').to_lowercase());

    if local.is_empty() || local.len() > 64 {
        reasons.push(format!(
            "local part length {} invalid (1..=64)",
            local.len()
        ));
    } else if !is_local_valid(local) {
        reasons.push("invalid local part".to_string());
    }

    let ascii_domain = check_domain(&domain, &mut reasons).unwrap_or_default();

    SyntaxReport {
        input: input.to_string(),
        local: local.to_string(),
        domain,
        ascii_domain,
        valid: reasons.is_empty(),
        reasons,
    }
}
