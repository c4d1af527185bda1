//! SI prefixes and prefix families.

/// One SI prefix.
///
/// `textual` is the plain-ASCII symbol used in ids and textual
/// abbreviations; `display` is the symbol used for presentation (they
/// differ only for micro: `mu` vs `μ`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SIPrefix {
    pub name: &'static str,
    pub textual: &'static str,
    pub display: &'static str,
    pub factor: f64,
}

impl SIPrefix {
    const fn new(name: &'static str, textual: &'static str, display: &'static str, factor: f64) -> Self {
        Self { name, textual, display, factor }
    }

    /// `factor^power`, e.g. kilo with power 2 is `1e6` (for km²).
    pub fn factor_pow(&self, power: i32) -> f64 {
        self.factor.powi(power)
    }
}

pub const YOTTA: SIPrefix = SIPrefix::new("yotta", "Y", "Y", 1.0e24);
pub const ZETTA: SIPrefix = SIPrefix::new("zetta", "Z", "Z", 1.0e21);
pub const EXA: SIPrefix = SIPrefix::new("exa", "E", "E", 1.0e18);
pub const PETA: SIPrefix = SIPrefix::new("peta", "P", "P", 1.0e15);
pub const TERA: SIPrefix = SIPrefix::new("tera", "T", "T", 1.0e12);
pub const GIGA: SIPrefix = SIPrefix::new("giga", "G", "G", 1.0e9);
pub const MEGA: SIPrefix = SIPrefix::new("mega", "M", "M", 1.0e6);
pub const KILO: SIPrefix = SIPrefix::new("kilo", "k", "k", 1.0e3);
pub const HECTO: SIPrefix = SIPrefix::new("hecto", "h", "h", 1.0e2);
pub const DECA: SIPrefix = SIPrefix::new("deca", "da", "da", 1.0e1);
pub const DECI: SIPrefix = SIPrefix::new("deci", "d", "d", 1.0e-1);
pub const CENTI: SIPrefix = SIPrefix::new("centi", "c", "c", 1.0e-2);
pub const MILLI: SIPrefix = SIPrefix::new("milli", "m", "m", 1.0e-3);
pub const MICRO: SIPrefix = SIPrefix::new("micro", "mu", "\u{03BC}", 1.0e-6);
pub const NANO: SIPrefix = SIPrefix::new("nano", "n", "n", 1.0e-9);
pub const PICO: SIPrefix = SIPrefix::new("pico", "p", "p", 1.0e-12);
pub const FEMTO: SIPrefix = SIPrefix::new("femto", "f", "f", 1.0e-15);
pub const ATTO: SIPrefix = SIPrefix::new("atto", "a", "a", 1.0e-18);
pub const ZEPTO: SIPrefix = SIPrefix::new("zepto", "z", "z", 1.0e-21);
pub const YOCTO: SIPrefix = SIPrefix::new("yocto", "y", "y", 1.0e-24);

/// Every prefix, largest factor first.
pub const ALL_PREFIXES: [SIPrefix; 20] = [
    YOTTA, ZETTA, EXA, PETA, TERA, GIGA, MEGA, KILO, HECTO, DECA, DECI, CENTI, MILLI, MICRO,
    NANO, PICO, FEMTO, ATTO, ZEPTO, YOCTO,
];

/// Look up a prefix by name (`"kilo"`) or by textual/display symbol (`"k"`, `"μ"`).
///
/// ```
/// use metrum::prefix;
/// assert_eq!(prefix::lookup("mu"), Some(prefix::MICRO));
/// assert_eq!(prefix::lookup("mega").unwrap().factor, 1.0e6);
/// assert!(prefix::lookup("kibi").is_none());
/// ```
pub fn lookup(key: &str) -> Option<SIPrefix> {
    ALL_PREFIXES
        .iter()
        .find(|p| p.name == key || p.textual == key || p.display == key)
        .copied()
}

/// Which family of prefixed siblings registration generates for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SIPrefixes {
    /// No prefixed siblings.
    #[default]
    None,
    /// Every prefix, yotta through yocto.
    All,
    /// deca and larger.
    Positive,
    /// deci and smaller.
    Negative,
    /// For kilogram-style units whose id starts with `k`: every prefix
    /// except kilo, applied after stripping the built-in kilo.
    Kilo,
    /// For reciprocal units such as `/m`: every prefix, applied inside
    /// the "per" marker.
    PerUnit,
}

impl SIPrefixes {
    /// Prefixes belonging to the family.
    pub fn prefixes(&self) -> Vec<SIPrefix> {
        match self {
            SIPrefixes::None => Vec::new(),
            SIPrefixes::All | SIPrefixes::PerUnit => ALL_PREFIXES.to_vec(),
            SIPrefixes::Positive => ALL_PREFIXES.iter().filter(|p| p.factor > 1.0).copied().collect(),
            SIPrefixes::Negative => ALL_PREFIXES.iter().filter(|p| p.factor < 1.0).copied().collect(),
            SIPrefixes::Kilo => ALL_PREFIXES.iter().filter(|p| p.name != "kilo").copied().collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SIPrefixes::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families() {
        assert!(SIPrefixes::None.prefixes().is_empty());
        assert_eq!(SIPrefixes::All.prefixes().len(), 20);
        assert_eq!(SIPrefixes::Positive.prefixes().len(), 10);
        assert_eq!(SIPrefixes::Negative.prefixes().len(), 10);
        let kilo = SIPrefixes::Kilo.prefixes();
        assert_eq!(kilo.len(), 19);
        assert!(kilo.iter().all(|p| p.name != "kilo"));
    }

    #[test]
    fn lookup_by_any_key() {
        assert_eq!(lookup("k"), Some(KILO));
        assert_eq!(lookup("\u{03BC}"), Some(MICRO));
        assert_eq!(lookup("da"), Some(DECA));
        assert_eq!(lookup("centi"), Some(CENTI));
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn powers() {
        assert_eq!(KILO.factor_pow(2), 1.0e6);
        assert!((MILLI.factor_pow(3) - 1.0e-9).abs() < 1e-24);
        assert_eq!(KILO.factor_pow(0), 1.0);
    }
}
