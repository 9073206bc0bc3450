/// Valide le domaine: conversion IDNA puis contrôle des labels.
/// Les raisons invalidantes sont poussées dans `reasons`; renvoie la forme
/// ASCII quand la conversion a réussi.
pub(crate) fn check_domain(domain: &str, reasons: &mut Vec<String>) -> Option<String> {
    if domain.is_empty() {
        reasons.push("domain part is empty".to_string());
        return None;
    }

    let ascii = match idna::domain_to_ascii(domain) {
        Ok(d) => d,
        Err(_) => {
            reasons.push("domain punycode conversion failed".to_string());
            return None;
        }
    };
    if ascii.is_empty() {
        reasons.push("domain empty after IDNA conversion".to_string());
        return None;
    }
    if ascii.len() > 253 {
        reasons.push(format!("domain length {} > 253", ascii.len()));
    }

    // au moins un point
    if !ascii.contains('.') {
        reasons.push("domain must contain at least one dot".to_string());
    }

    for label in ascii.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
            continue;
        }
        if label.len() > 63 {
            reasons.push(format!("domain label '{label}' length {} > 63", label.len()));
        }
        if label.starts_with('-') || label.ends_with('-') {
            reasons.push(format!("domain label '{label}' cannot start/end with '-'"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            reasons.push(format!("domain label '{label}' has invalid chars"));
        }
    }

    Some(ascii)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_domain_ok() {
        let mut reasons = vec![];
        let ascii = check_domain("example.com", &mut reasons);
        assert!(reasons.is_empty(), "{:?}", reasons);
        assert_eq!(ascii.as_deref(), Some("example.com"));
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        let mut reasons = vec![];
        check_domain(&format!("{long}.com"), &mut reasons);
        assert!(!reasons.is_empty());
    }

    #[test]
    fn idn_is_converted() {
        let mut reasons = vec![];
        let ascii = check_domain("exämple.com", &mut reasons);
        assert!(reasons.is_empty(), "{:?}", reasons);
        assert_eq!(ascii.as_deref(), Some("xn--exmple-cua.com"));
    }

    #[test]
    fn single_label_and_empty_are_rejected() {
        let mut reasons = vec![];
        check_domain("localhost", &mut reasons);
        assert_eq!(reasons, vec!["domain must contain at least one dot".to_string()]);

        let mut reasons = vec![];
        assert_eq!(check_domain("", &mut reasons), None);
        assert_eq!(reasons.len(), 1);
    }
}
