use phf::phf_map;

static PROVIDER_DOMAINS: phf::Map<&'static str, &'static str> = phf_map! {
    "gmail.com" => "Gmail",
    "googlemail.com" => "Gmail",
    "outlook.com" => "Outlook",
    "outlook.fr" => "Outlook",
    "hotmail.com" => "Outlook",
    "hotmail.fr" => "Outlook",
    "live.com" => "Outlook",
    "live.fr" => "Outlook",
    "msn.com" => "Outlook",
    "yahoo.com" => "Yahoo",
    "yahoo.fr" => "Yahoo",
    "ymail.com" => "Yahoo",
    "icloud.com" => "iCloud",
    "me.com" => "iCloud",
    "mac.com" => "iCloud",
    "aol.com" => "AOL",
    "proton.me" => "Proton",
    "protonmail.com" => "Proton",
    "gmx.com" => "GMX",
    "gmx.fr" => "GMX",
    "gmx.de" => "GMX",
    "orange.fr" => "Orange",
    "wanadoo.fr" => "Orange",
    "free.fr" => "Free",
    "sfr.fr" => "SFR",
    "laposte.net" => "La Poste",
    "zoho.com" => "Zoho",
    "fastmail.com" => "Fastmail",
};

// MX host suffix -> hosted mail platform
static MX_SUFFIXES: &[(&str, &str)] = &[
    ("google.com", "Google Workspace"),
    ("googlemail.com", "Google Workspace"),
    ("outlook.com", "Microsoft 365"),
    ("protection.outlook.com", "Microsoft 365"),
    ("pphosted.com", "Proofpoint"),
    ("mimecast.com", "Mimecast"),
    ("zoho.com", "Zoho"),
    ("zoho.eu", "Zoho"),
    ("messagingengine.com", "Fastmail"),
    ("protonmail.ch", "Proton"),
    ("ovh.net", "OVHcloud"),
];

/// Mailbox provider for `domain`: a direct match on well-known consumer
/// domains first, then the platform its MX hosts belong to.
pub fn detect_provider(domain: &str, mx_hosts: &[String]) -> Option<&'static str> {
    if let Some(name) = PROVIDER_DOMAINS.get(domain).copied() {
        return Some(name);
    }
    mx_hosts.iter().find_map(|host| {
        MX_SUFFIXES
            .iter()
            .find(|(suffix, _)| host.as_str() == *suffix || host.ends_with(&format!(".{suffix}")))
            .map(|(_, name)| *name)
    })
}
