/// Sortie du contrôle syntaxique: l'adresse découpée et normalisée, avec les
/// raisons de rejet éventuelles.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxReport {
    pub input: String,
    pub local: String,
    /// Domaine en minuscules, tel que saisi (Unicode possible).
    pub domain: String,
    /// Forme IDNA/punycode du domaine, vide si la conversion a échoué.
    pub ascii_domain: String,
    pub valid: bool,
    pub reasons: Vec<String>,
}
