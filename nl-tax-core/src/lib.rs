pub mod calculations;
pub mod models;
pub mod registry;

pub use calculations::{
    Box1Engine, Box1Error, Box1Input, Box1Summary, Box3Engine, Box3Error, Box3Input, Box3Step,
    Box3Summary, BreakdownEntry, compute_box1, compute_box3,
};
pub use models::*;
pub use registry::{DEFAULT_YEAR, YearConfigRegistry};
