/// Local part without its `+tag`.
pub fn base_local(local: &str) -> &str {
    local.split_once('+').map_or(local, |(base, _)| base)
}

/// Sub-address tag (`alice+news` → `news`), if present and non-empty.
pub fn plus_tag(local: &str) -> Option<&str> {
    local
        .split_once('+')
        .map(|(_, tag)| tag)
        .filter(|tag| !tag.is_empty())
}

fn ignores_dots(domain: &str) -> bool {
    matches!(domain, "gmail.com" | "googlemail.com")
}

/// Address as the mailbox provider sees it: plus tag removed, dots removed
/// where the provider ignores them, `googlemail.com` folded into
/// `gmail.com`. Expects lower-cased input.
pub fn canonicalize(local: &str, domain: &str) -> String {
    let base = base_local(local);
    let local = if ignores_dots(domain) {
        base.replace('.', "")
    } else {
        base.to_string()
    };
    let domain = if domain == "googlemail.com" {
        "gmail.com"
    } else {
        domain
    };
    format!("{local}@{domain}")
}
