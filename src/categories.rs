//! Category ids, the alias table, and display names.
//!
//! Public category ids resolve to one canonical pool id. The synthetic
//! sign-recognition category has no stored pool; its questions are
//! generated from the sign catalog.

pub const TRAFIK: &str = "trafik";
pub const ILKYARDIM: &str = "ilkyardim";
pub const MOTOR: &str = "motor";
pub const TRAFIKADABI: &str = "trafikadabi";

/// Synthetic category: generated sign-recognition questions.
pub const ISARETLER: &str = "isaretler";

/// Canonical pool ids, in blueprint order.
pub const CANONICAL: [&str; 4] = [ILKYARDIM, TRAFIKADABI, TRAFIK, MOTOR];

// Aliased public ids sharing an underlying pool.
const ALIASES: [(&str, &str); 4] = [
    ("kurallar", TRAFIK),
    ("saglik", ILKYARDIM),
    ("aracteknigi", MOTOR),
    ("adab", TRAFIKADABI),
];

/// Resolve a public category id to its canonical pool id. `None` for ids
/// that neither are canonical nor appear in the alias table.
pub fn resolve(id: &str) -> Option<&'static str> {
    if let Some(&canonical) = CANONICAL.iter().find(|&&c| c == id) {
        return Some(canonical);
    }
    if id == ISARETLER {
        return Some(ISARETLER);
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == id)
        .map(|(_, target)| *target)
}

/// Human-readable category name. Unknown ids fall back to the id itself.
pub fn display_name(id: &str) -> &str {
    match resolve(id) {
        Some(TRAFIK) => "Trafik ve Çevre Bilgisi",
        Some(ILKYARDIM) => "İlk Yardım",
        Some(MOTOR) => "Araç Tekniği",
        Some(TRAFIKADABI) => "Trafik Adabı",
        Some(ISARETLER) => "Trafik İşaretleri",
        _ => id,
    }
}
