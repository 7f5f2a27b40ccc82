// Unit normalization for paper test measurements.
// Pure functions over constant tables: no state, no I/O, no logging.

pub mod convert;
pub mod detector;
pub mod error;
pub mod formatter;
pub mod registry;
pub mod smoothness;
pub mod types;


pub use convert::{
    convert, convert_stiffness, convert_tear, convert_tensile, convert_thickness, to_canonical,
    LinearUnit,
};
pub use detector::{looks_like_measurement, parse_measurement, split_measurement};
pub use error::ConversionError;
pub use formatter::{UnitFormatter, UnitPreferences};
pub use registry::{families, families_for_token, FamilyInfo};
pub use smoothness::{bekk_to_pps, pps_to_bekk, smoothness_method, SmoothnessReading};
pub use types::{
    Family, Measurement, SmoothnessMethod, SmoothnessUnit, StiffnessUnit, TearUnit, TensileUnit,
    ThicknessUnit,
};
