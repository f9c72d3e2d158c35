/*!
# optirx

Contact-lens power entry for an optical-retail back office, built in Rust.

## Overview

The prescription form captures, for each eye, a distance (far vision) and a
near (reading) prescription. The near sphere is linked to the distance sphere
through a reading-addition category:

- `LOW` adds `+1.00`
- `HIGH` adds `+2.50`
- no addition: near mirrors distance

Editing the distance sphere or the addition recomputes the near sphere.
Editing the near sphere, once an addition is chosen, back-computes the distance
sphere. Cylinder and axis are never linked, and the two eyes never affect each
other.

## Modules

- **power**: `PowerValue` (signed, two decimals) and `AdditionCategory`
- **options**: sphere, cylinder, axis and addition choice lists
- **derivation**: the pure distance/near sphere calculator
- **form**: immutable form state with origin-tagged updates
- **record**: prescription records and their create/amend/delete lifecycle
- **saving**: gzip + bincode snapshots and JSON dumps of the store
- **config**: environment-driven settings and logger setup
- **error**: error type for the store and parsing layers

## Design Highlights

- Malformed numbers never fail: the calculator reports "do not write"
- Only user edits trigger derivation, so derived writes cannot cycle
- Stored prescriptions load verbatim, with no recompute on open
*/

pub mod config;
pub mod derivation;
pub mod error;
pub mod form;
pub mod options;
pub mod power;
pub mod record;
pub mod saving;

/// Re-export the main types to make them easier to use
pub use config::Config;
pub use derivation::{Derived, derive_distance_from_near, derive_near_from_distance, format};
pub use error::{Error, Result};
pub use form::{ContactsPowerForm, Edit, Eye, EyeSidePrescription, Field, Origin, Update};
pub use options::{OptionKind, axis_options, cylinder_options, sphere_options};
pub use power::{AdditionCategory, PowerValue};
pub use record::{PrescriptionRecord, PrescriptionStore};
pub use saving::{load_or_default, load_store, save_store};
