use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::derivation::{derive_distance_from_near, derive_near_from_distance};
use crate::power::AdditionCategory;

/// Far-vision values for one eye, as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceVision {
    pub sph: String,
    pub cyl: String,
    pub axis: String,
    pub add: Option<AdditionCategory>,
}

/// Reading-vision values for one eye. Only `sph` is linked to distance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearVision {
    pub sph: String,
    pub cyl: String,
    pub axis: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeSidePrescription {
    pub distance: DistanceVision,
    pub near: NearVision,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eye {
    Right,
    Left,
}

impl Eye {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "R" | "OD" | "RIGHT" => Some(Eye::Right),
            "L" | "OS" | "LEFT" => Some(Eye::Left),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    DistanceSph,
    DistanceCyl,
    DistanceAxis,
    DistanceAdd,
    NearSph,
    NearCyl,
    NearAxis,
}

impl Field {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "dsph" => Some(Field::DistanceSph),
            "dcyl" => Some(Field::DistanceCyl),
            "daxis" => Some(Field::DistanceAxis),
            "add" => Some(Field::DistanceAdd),
            "nsph" => Some(Field::NearSph),
            "ncyl" => Some(Field::NearCyl),
            "naxis" => Some(Field::NearAxis),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Field::DistanceSph => "dsph",
            Field::DistanceCyl => "dcyl",
            Field::DistanceAxis => "daxis",
            Field::DistanceAdd => "add",
            Field::NearSph => "nsph",
            Field::NearCyl => "ncyl",
            Field::NearAxis => "naxis",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A user change to one field group of one eye.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    DistanceSph(String),
    DistanceCyl(String),
    DistanceAxis(String),
    DistanceAdd(Option<AdditionCategory>),
    NearSph(String),
    NearCyl(String),
    NearAxis(String),
}

impl Edit {
    pub fn field(&self) -> Field {
        match self {
            Edit::DistanceSph(_) => Field::DistanceSph,
            Edit::DistanceCyl(_) => Field::DistanceCyl,
            Edit::DistanceAxis(_) => Field::DistanceAxis,
            Edit::DistanceAdd(_) => Field::DistanceAdd,
            Edit::NearSph(_) => Field::NearSph,
            Edit::NearCyl(_) => Field::NearCyl,
            Edit::NearAxis(_) => Field::NearAxis,
        }
    }
}

/// Who produced a write. Only user edits trigger derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    UserEdit(Field),
    DerivedWrite(Field),
}

impl Origin {
    pub fn field(&self) -> Field {
        match self {
            Origin::UserEdit(field) | Origin::DerivedWrite(field) => *field,
        }
    }
}

/// One write applied to an eye side, tagged with its origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub origin: Origin,
    pub edit: Edit,
}

impl Update {
    pub fn user(edit: Edit) -> Self {
        Update {
            origin: Origin::UserEdit(edit.field()),
            edit,
        }
    }

    fn derived(edit: Edit) -> Self {
        Update {
            origin: Origin::DerivedWrite(edit.field()),
            edit,
        }
    }
}

impl EyeSidePrescription {
    /// Apply a user edit and return the resulting snapshot.
    pub fn apply(&self, edit: Edit) -> Self {
        self.apply_traced(edit).0
    }

    /// Like [`apply`](Self::apply), also returning every write performed in order.
    pub fn apply_traced(&self, edit: Edit) -> (Self, Vec<Update>) {
        let mut next = self.clone();
        let mut applied = Vec::new();
        let mut pending = VecDeque::from([Update::user(edit)]);

        while let Some(update) = pending.pop_front() {
            next.write(&update.edit);
            if let Origin::UserEdit(field) = update.origin {
                pending.extend(next.linked_write(field));
            }
            applied.push(update);
        }

        (next, applied)
    }

    fn write(&mut self, edit: &Edit) {
        match edit {
            Edit::DistanceSph(v) => self.distance.sph = v.clone(),
            Edit::DistanceCyl(v) => self.distance.cyl = v.clone(),
            Edit::DistanceAxis(v) => self.distance.axis = v.clone(),
            Edit::DistanceAdd(v) => self.distance.add = *v,
            Edit::NearSph(v) => self.near.sph = v.clone(),
            Edit::NearCyl(v) => self.near.cyl = v.clone(),
            Edit::NearAxis(v) => self.near.axis = v.clone(),
        }
    }

    /// The derived write a user edit of `field` calls for, if any.
    fn linked_write(&self, field: Field) -> Option<Update> {
        let derived = match field {
            Field::DistanceSph | Field::DistanceAdd => {
                derive_near_from_distance(&self.distance.sph, self.distance.add)
            }
            Field::NearSph if self.distance.add.is_some() => {
                derive_distance_from_near(&self.near.sph, self.distance.add)
            }
            _ => return None,
        };
        if !derived.writes() {
            return None;
        }
        let edit = match field {
            Field::NearSph => Edit::DistanceSph(derived.resolve(&self.distance.sph)),
            _ => Edit::NearSph(derived.resolve(&self.near.sph)),
        };
        Some(Update::derived(edit))
    }

    pub fn distance_sph_changed(&self, value: &str) -> Self {
        self.apply(Edit::DistanceSph(value.to_string()))
    }

    pub fn distance_cyl_changed(&self, value: &str) -> Self {
        self.apply(Edit::DistanceCyl(value.to_string()))
    }

    pub fn distance_axis_changed(&self, value: &str) -> Self {
        self.apply(Edit::DistanceAxis(value.to_string()))
    }

    pub fn distance_add_changed(&self, add: Option<AdditionCategory>) -> Self {
        self.apply(Edit::DistanceAdd(add))
    }

    pub fn near_sph_changed(&self, value: &str) -> Self {
        self.apply(Edit::NearSph(value.to_string()))
    }

    pub fn near_cyl_changed(&self, value: &str) -> Self {
        self.apply(Edit::NearCyl(value.to_string()))
    }

    pub fn near_axis_changed(&self, value: &str) -> Self {
        self.apply(Edit::NearAxis(value.to_string()))
    }

    /// Current text of a field, as a table cell would show it.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::DistanceSph => self.distance.sph.clone(),
            Field::DistanceCyl => self.distance.cyl.clone(),
            Field::DistanceAxis => self.distance.axis.clone(),
            Field::DistanceAdd => self
                .distance
                .add
                .map(|a| a.to_string())
                .unwrap_or_default(),
            Field::NearSph => self.near.sph.clone(),
            Field::NearCyl => self.near.cyl.clone(),
            Field::NearAxis => self.near.axis.clone(),
        }
    }
}

/// Both eyes of the contact-lens power form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsPowerForm {
    pub right: EyeSidePrescription,
    pub left: EyeSidePrescription,
}

impl ContactsPowerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, eye: Eye) -> &EyeSidePrescription {
        match eye {
            Eye::Right => &self.right,
            Eye::Left => &self.left,
        }
    }

    /// Apply a user edit to one eye; the other eye is carried over untouched.
    pub fn apply(&self, eye: Eye, edit: Edit) -> Self {
        let (side, applied) = self.side(eye).apply_traced(edit);
        for update in &applied {
            debug!("{:?} {:?} -> {:?}", eye, update.origin, update.edit);
        }
        let mut next = self.clone();
        match eye {
            Eye::Right => next.right = side,
            Eye::Left => next.left = side,
        }
        next
    }
}
