use lazy_static::lazy_static;

use crate::power::{AdditionCategory, PowerValue};

pub const POWER_STEP: i32 = 25;
pub const SPHERE_LIMIT: i32 = 900;
pub const CYLINDER_LIMIT: i32 = 400;
pub const AXIS_MAX: u16 = 180;
pub const AXIS_STEP: u16 = 5;

lazy_static! {
    static ref SPHERE_OPTIONS: Vec<PowerValue> = power_range(-SPHERE_LIMIT, SPHERE_LIMIT);
    static ref CYLINDER_OPTIONS: Vec<PowerValue> = power_range(-CYLINDER_LIMIT, CYLINDER_LIMIT);
    static ref AXIS_OPTIONS: Vec<u16> = (0..=AXIS_MAX).step_by(AXIS_STEP as usize).collect();
}

/// Every quarter-diopter step between two bounds (hundredths, inclusive).
fn power_range(min: i32, max: i32) -> Vec<PowerValue> {
    (min..=max)
        .step_by(POWER_STEP as usize)
        .map(PowerValue::from_hundredths)
        .collect()
}

/// Sphere choices, `-9.00` through `+9.00`.
pub fn sphere_options() -> &'static [PowerValue] {
    &SPHERE_OPTIONS
}

/// Cylinder choices, `-4.00` through `+4.00`.
pub fn cylinder_options() -> &'static [PowerValue] {
    &CYLINDER_OPTIONS
}

/// Axis choices in degrees, multiples of five up to 180.
pub fn axis_options() -> &'static [u16] {
    &AXIS_OPTIONS
}

pub fn addition_options() -> &'static [AdditionCategory] {
    &AdditionCategory::ALL
}

/// Option labels as a select box shows them.
pub fn option_labels(kind: OptionKind) -> Vec<String> {
    match kind {
        OptionKind::Sphere => sphere_options().iter().map(|v| v.to_string()).collect(),
        OptionKind::Cylinder => cylinder_options().iter().map(|v| v.to_string()).collect(),
        OptionKind::Axis => axis_options().iter().map(|v| v.to_string()).collect(),
        OptionKind::Addition => addition_options().iter().map(|v| v.to_string()).collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Sphere,
    Cylinder,
    Axis,
    Addition,
}

impl OptionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "sph" | "sphere" => Some(OptionKind::Sphere),
            "cyl" | "cylinder" => Some(OptionKind::Cylinder),
            "axis" => Some(OptionKind::Axis),
            "add" | "addition" => Some(OptionKind::Addition),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_bounds() {
        let spheres = sphere_options();
        assert_eq!(spheres.len(), 73);
        assert_eq!(spheres.first().unwrap().to_string(), "-9.00");
        assert_eq!(spheres.last().unwrap().to_string(), "+9.00");
        assert!(spheres.windows(2).all(|w| w[1].hundredths() - w[0].hundredths() == 25));
    }

    #[test]
    fn cylinder_bounds() {
        let cylinders = cylinder_options();
        assert_eq!(cylinders.len(), 33);
        assert_eq!(cylinders.first().unwrap().to_string(), "-4.00");
        assert_eq!(cylinders.last().unwrap().to_string(), "+4.00");
    }

    #[test]
    fn axis_bounds() {
        let axes = axis_options();
        assert_eq!(axes.len(), 37);
        assert_eq!(axes.first(), Some(&0));
        assert_eq!(axes.last(), Some(&180));
        assert!(axes.iter().all(|a| a % 5 == 0));
    }

    #[test]
    fn labels_include_zero_once() {
        let labels = option_labels(OptionKind::Sphere);
        assert_eq!(labels.iter().filter(|l| *l == "+0.00").count(), 1);
        assert!(!labels.iter().any(|l| l == "-0.00"));
        assert_eq!(option_labels(OptionKind::Addition), vec!["LOW", "HIGH"]);
    }

    #[test]
    fn kind_names() {
        assert_eq!(OptionKind::from_name("SPH"), Some(OptionKind::Sphere));
        assert_eq!(OptionKind::from_name("add"), Some(OptionKind::Addition));
        assert_eq!(OptionKind::from_name("pd"), None);
    }
}
