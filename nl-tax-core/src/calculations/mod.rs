//! Box 1 and Box 3 tax engines.
//!
//! Both engines are pure: a configuration and an input go in, a summary
//! comes out.

pub mod box1;
pub mod box3;
pub mod common;

pub use box1::{Box1Engine, Box1Error, Box1Input, Box1Summary, compute_box1};
pub use box3::{
    Box3Engine, Box3Error, Box3Input, Box3Step, Box3Summary, BreakdownEntry, compute_box3,
};
