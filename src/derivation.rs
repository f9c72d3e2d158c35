//! Linked sphere calculation between distance and near vision.
//!
//! Both directions are pure and total: bad or out-of-range input never fails,
//! it just produces [`Derived::Unchanged`] so the caller leaves the target alone.

use log::trace;

use crate::power::{AdditionCategory, PowerValue};

pub use crate::power::format;

/// What to write into the dependent sphere field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Derived {
    /// Clear the target field.
    Empty,
    /// Write this value.
    Value(PowerValue),
    /// Copy the source text as entered (no addition to apply).
    Mirror(String),
    /// Do not write; the source is not derivable yet.
    Unchanged,
}

impl Derived {
    /// Resolve against the target's current text.
    pub fn resolve(self, current: &str) -> String {
        match self {
            Derived::Empty => String::new(),
            Derived::Value(value) => value.to_string(),
            Derived::Mirror(text) => text,
            Derived::Unchanged => current.to_string(),
        }
    }

    pub fn value(&self) -> Option<PowerValue> {
        match self {
            Derived::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub fn writes(&self) -> bool {
        !matches!(self, Derived::Unchanged)
    }
}

pub fn derive_near_from_distance(distance_sph: &str, add: Option<AdditionCategory>) -> Derived {
    let trimmed = distance_sph.trim();
    if trimmed.is_empty() {
        return Derived::Empty;
    }
    if add.is_none() {
        return Derived::Mirror(trimmed.to_string());
    }
    match PowerValue::parse(trimmed).and_then(|distance| distance.plus_addition(add)) {
        Some(near) => Derived::Value(near),
        None => {
            trace!("distance sphere {:?} not derivable, near left as is", distance_sph);
            Derived::Unchanged
        }
    }
}

/// Back-compute distance sphere from an edited near sphere.
///
/// With no addition the offset is zero; the form only calls this once an
/// addition has been chosen.
pub fn derive_distance_from_near(near_sph: &str, add: Option<AdditionCategory>) -> Derived {
    match PowerValue::parse(near_sph).and_then(|near| near.minus_addition(add)) {
        Some(distance) => Derived::Value(distance),
        None => {
            trace!("near sphere {:?} not derivable, distance left as is", near_sph);
            Derived::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::AdditionCategory::{High, Low};

    fn near(distance: &str, add: Option<AdditionCategory>) -> String {
        derive_near_from_distance(distance, add).resolve("")
    }

    #[test]
    fn applies_offsets() {
        assert_eq!(near("+2.00", Some(Low)), "+3.00");
        assert_eq!(near("+2.00", Some(High)), "+4.50");
        assert_eq!(near("-1.00", Some(High)), "+1.50");
        assert_eq!(near("-3.00", Some(Low)), "-2.00");
        assert_eq!(near("-1.00", Some(Low)), "+0.00");
    }

    #[test]
    fn mirrors_without_addition() {
        assert_eq!(near("-2.75", None), "-2.75");
        assert_eq!(near("+0.00", None), "+0.00");
    }

    #[test]
    fn mirror_keeps_text_as_entered() {
        assert_eq!(
            derive_near_from_distance("-2.5", None),
            Derived::Mirror("-2.5".to_string())
        );
        assert_eq!(near(" abc ", None), "abc");
        assert_eq!(near("30000000", None), "30000000");
    }

    #[test]
    fn out_of_range_is_no_op() {
        for huge in ["1e300", "-1e300", "99999999", "30000000"] {
            assert_eq!(derive_near_from_distance(huge, Some(High)), Derived::Unchanged);
            assert_eq!(derive_near_from_distance(huge, Some(Low)), Derived::Unchanged);
            assert_eq!(derive_distance_from_near(huge, Some(High)), Derived::Unchanged);
            assert_eq!(derive_distance_from_near(huge, None), Derived::Unchanged);
        }
    }

    #[test]
    fn empty_distance_clears_near() {
        assert_eq!(derive_near_from_distance("", Some(High)), Derived::Empty);
        assert_eq!(derive_near_from_distance("  ", None), Derived::Empty);
        assert_eq!(Derived::Empty.resolve("+1.00"), "");
    }

    #[test]
    fn malformed_distance_is_no_op() {
        let derived = derive_near_from_distance("abc", Some(Low));
        assert_eq!(derived, Derived::Unchanged);
        assert!(!derived.writes());
        assert_eq!(derived.resolve("+5.25"), "+5.25");
    }

    #[test]
    fn back_derives_distance() {
        assert_eq!(
            derive_distance_from_near("+4.50", Some(High)).value().unwrap().to_string(),
            "+2.00"
        );
        assert_eq!(
            derive_distance_from_near("+0.00", Some(Low)).value().unwrap().to_string(),
            "-1.00"
        );
        assert_eq!(derive_distance_from_near("", Some(Low)), Derived::Unchanged);
        assert_eq!(derive_distance_from_near("x1", Some(Low)), Derived::Unchanged);
    }
}
