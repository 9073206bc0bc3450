use phf::phf_map;

static DOMAIN_TYPOS: phf::Map<&'static str, &'static str> = phf_map! {
    "gmial.com" => "gmail.com",
    "gmai.com" => "gmail.com",
    "gmal.com" => "gmail.com",
    "gamil.com" => "gmail.com",
    "gnail.com" => "gmail.com",
    "gmail.co" => "gmail.com",
    "gmail.con" => "gmail.com",
    "gmail.cm" => "gmail.com",
    "gmail.fr" => "gmail.com",
    "hotmal.com" => "hotmail.com",
    "hotmial.com" => "hotmail.com",
    "hotmail.co" => "hotmail.com",
    "hotmail.con" => "hotmail.com",
    "homail.com" => "hotmail.com",
    "hotmai.fr" => "hotmail.fr",
    "outlok.com" => "outlook.com",
    "outlook.co" => "outlook.com",
    "outloo.com" => "outlook.com",
    "yaho.com" => "yahoo.com",
    "yahooo.com" => "yahoo.com",
    "yahoo.co" => "yahoo.com",
    "yahoo.con" => "yahoo.com",
    "yhoo.fr" => "yahoo.fr",
    "iclod.com" => "icloud.com",
    "icloud.co" => "icloud.com",
    "icoud.com" => "icloud.com",
    "orange.f" => "orange.fr",
    "oragne.fr" => "orange.fr",
    "wanadoo.f" => "wanadoo.fr",
    "wanado.fr" => "wanadoo.fr",
    "laposte.ne" => "laposte.net",
    "lapost.net" => "laposte.net",
    "free.f" => "free.fr",
    "protonmal.com" => "protonmail.com",
};

/// Likely intended domain when `domain` is a known misspelling.
pub fn suggest_domain(domain: &str) -> Option<&'static str> {
    DOMAIN_TYPOS.get(domain).copied()
}

/// Full corrected address for a misspelled domain.
pub fn suggest_address(local: &str, domain: &str) -> Option<String> {
    suggest_domain(domain).map(|fixed| format!("{local}@{fixed}"))
}
