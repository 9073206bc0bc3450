use phf::phf_set;

use super::canonical::base_local;

static ROLE_ACCOUNTS: phf::Set<&'static str> = phf_set! {
    "abuse",
    "accounting",
    "admin",
    "administrator",
    "billing",
    "careers",
    "contact",
    "hello",
    "help",
    "helpdesk",
    "hostmaster",
    "hr",
    "info",
    "jobs",
    "legal",
    "marketing",
    "media",
    "no-reply",
    "noc",
    "noreply",
    "office",
    "postmaster",
    "press",
    "privacy",
    "root",
    "sales",
    "security",
    "support",
    "team",
    "webmaster",
};

/// Whether the local part names a function rather than a person.
pub fn is_role_address(local: &str) -> bool {
    ROLE_ACCOUNTS.contains(base_local(local))
}
