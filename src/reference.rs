//! Origins for absolute quantities.

use std::fmt;
use std::sync::Arc;

use crate::error::{UnitError, UnitResult};
use crate::traits::Real;

/// A named origin such as "epoch" or "sea level".
///
/// References compare by identity: two references created separately with
/// the same name are different origins. A reference may be declared at a
/// fixed SI offset from a parent, which allows values to be translated
/// between the two (and between siblings of a common parent).
///
/// ```
/// use metrum::Reference;
///
/// let sea_level = Reference::new("sea level");
/// let harbour = Reference::with_offset("harbour datum", &sea_level, -1.5);
/// assert_eq!(harbour.translate(10.0_f64, &sea_level).unwrap(), 8.5);
/// assert_eq!(sea_level.translate(8.5_f64, &harbour).unwrap(), 10.0);
/// ```
#[derive(Clone)]
pub struct Reference(Arc<ReferenceData>);

struct ReferenceData {
    name: String,
    /// Parent reference and the position of this origin in it (SI).
    parent: Option<(Reference, f64)>,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ReferenceData {
            name: name.into(),
            parent: None,
        }))
    }

    /// A reference whose origin sits at `si_offset` when measured from
    /// `parent`.
    pub fn with_offset(name: impl Into<String>, parent: &Reference, si_offset: f64) -> Self {
        Self(Arc::new(ReferenceData {
            name: name.into(),
            parent: Some((parent.clone(), si_offset)),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Reference> {
        self.0.parent.as_ref().map(|(p, _)| p)
    }

    /// Offset of this origin from its parent, in SI.
    pub fn offset(&self) -> Option<f64> {
        self.0.parent.as_ref().map(|&(_, o)| o)
    }

    /// Re-express an SI value measured from `self` as measured from
    /// `target`.
    ///
    /// Succeeds when the references are the same, when one is the parent
    /// of the other, or when both share a parent. Anything further apart
    /// fails with [`UnitError::IncompatibleReference`].
    pub fn translate<T: Real>(&self, si_value: T, target: &Reference) -> UnitResult<T> {
        let shift = self.shift_to(target)?;
        Ok(si_value + T::from_f64(shift))
    }

    fn shift_to(&self, target: &Reference) -> UnitResult<f64> {
        if self == target {
            return Ok(0.0);
        }
        match (&self.0.parent, &target.0.parent) {
            (Some((p, offset)), _) if p == target => Ok(*offset),
            (_, Some((p, offset))) if p == self => Ok(-*offset),
            (Some((p, from)), Some((q, to))) if p == q => Ok(from - to),
            _ => Err(UnitError::IncompatibleReference {
                from: self.name().to_string(),
                to: target.name().to_string(),
            }),
        }
    }

    pub(crate) fn check_same(&self, other: &Reference) -> UnitResult<()> {
        if self != other {
            return Err(UnitError::IncompatibleReference {
                from: self.name().to_string(),
                to: other.name().to_string(),
            });
        }
        Ok(())
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Reference {}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Reference");
        d.field("name", &self.0.name);
        if let Some((parent, offset)) = &self.0.parent {
            d.field("parent", &parent.name()).field("offset", offset);
        }
        d.finish()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_not_name() {
        let a = Reference::new("epoch");
        let b = Reference::new("epoch");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(matches!(
            a.translate(1.0_f64, &b),
            Err(UnitError::IncompatibleReference { .. })
        ));
    }

    #[test]
    fn one_hop_translations() {
        let unix = Reference::new("unix epoch");
        let gps = Reference::with_offset("gps epoch", &unix, 315_964_800.0);
        let y2k = Reference::with_offset("y2k", &unix, 946_684_800.0);

        // Parent to child and back.
        assert_eq!(gps.translate(0.0_f64, &unix).unwrap(), 315_964_800.0);
        assert_eq!(unix.translate(315_964_800.0_f64, &gps).unwrap(), 0.0);
        // Siblings through the common parent.
        assert_eq!(y2k.translate(0.0_f64, &gps).unwrap(), 946_684_800.0 - 315_964_800.0);
        assert_eq!(gps.parent(), Some(&unix));
        assert_eq!(unix.offset(), None);
    }

    #[test]
    fn two_hops_rejected() {
        let root = Reference::new("root");
        let child = Reference::with_offset("child", &root, 1.0);
        let grandchild = Reference::with_offset("grandchild", &child, 1.0);
        assert_eq!(grandchild.translate(0.0_f64, &child).unwrap(), 1.0);
        let err = grandchild.translate(0.0_f64, &root).unwrap_err();
        assert_eq!(
            err,
            UnitError::IncompatibleReference {
                from: "grandchild".into(),
                to: "root".into()
            }
        );
    }
}
