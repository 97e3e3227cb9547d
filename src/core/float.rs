use ndarray::ScalarOperand;
use num_traits::{Float, FromPrimitive, Signed};
use std::fmt::{Debug, Display};
use std::ops::AddAssign;

// A Float trait that captures the requirements we need for the various places
// we need floats. These requirements are imposed by ndarray and ndarray-stats
pub trait KMeansFloat:
    Float
    + Debug
    + Display
    + Default
    + AddAssign
    + Signed
    + ScalarOperand
    + Copy
    + Sync
    + Send
    + FromPrimitive
    + 'static
{
}

impl KMeansFloat for f32 {}
impl KMeansFloat for f64 {}
