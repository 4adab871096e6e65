use std::error;
use std::fmt;

/// The error returned when a coordinate is built from the wrong number of
/// ordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidArraySize {
    /// Number of ordinates the coordinate type requires
    pub expected: usize,

    /// Number of ordinates supplied
    pub found: usize,

    /// Fully qualified name of the coordinate type
    pub type_name: &'static str,
}

impl fmt::Display for InvalidArraySize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "invalid array size: {} requires {} values but {} were supplied",
            self.type_name, self.expected, self.found
        )
    }
}

impl error::Error for InvalidArraySize {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// A position with mandatory `x` and `y` ordinates and an optional `z`
/// and / or `m` depending on the capabilities the type declares.
///
/// The capabilities are associated constants so that a reader can compute
/// the arity of a coordinate before any value exists:
///
/// ```
/// use geowkt::{Coordinate, Coordinate2DM, Coordinate3DM};
///
/// assert_eq!(Coordinate2DM::arity(), 3);
/// assert_eq!(Coordinate3DM::arity(), 4);
/// ```
pub trait Coordinate: Copy + fmt::Debug + PartialEq {
    /// The coordinate carries a `z` ordinate
    const THREE_DIMENSIONAL: bool;

    /// The coordinate carries an `m` (measure) ordinate
    const MEASURED: bool;

    /// Construct a coordinate from a flat list of ordinates in `x y [z] [m]`
    /// order.
    fn from_slice(values: &[f64]) -> Result<Self, InvalidArraySize>;

    fn x(&self) -> f64;

    fn y(&self) -> f64;

    /// The `z` ordinate, present only for three dimensional coordinates
    fn z(&self) -> Option<f64> {
        None
    }

    /// The measure, present only for measured coordinates
    fn m(&self) -> Option<f64> {
        None
    }

    /// The number of ordinates this coordinate type is composed of
    fn arity() -> usize {
        2 + usize::from(Self::MEASURED) + usize::from(Self::THREE_DIMENSIONAL)
    }

    /// The fully qualified name of the coordinate type, used in diagnostics
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[inline]
fn check_arity<C: Coordinate>(values: &[f64]) -> Result<(), InvalidArraySize> {
    if values.len() == C::arity() {
        Ok(())
    } else {
        Err(InvalidArraySize {
            expected: C::arity(),
            found: values.len(),
            type_name: C::type_name(),
        })
    }
}

/// Two dimensional coordinate
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate2D {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2D {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate2D { x, y }
    }
}

impl Coordinate for Coordinate2D {
    const THREE_DIMENSIONAL: bool = false;
    const MEASURED: bool = false;

    fn from_slice(values: &[f64]) -> Result<Self, InvalidArraySize> {
        check_arity::<Self>(values)?;
        Ok(Coordinate2D::new(values[0], values[1]))
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Two dimensional coordinate with a measure
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate2DM {
    pub x: f64,
    pub y: f64,
    pub m: f64,
}

impl Coordinate2DM {
    pub fn new(x: f64, y: f64, m: f64) -> Self {
        Coordinate2DM { x, y, m }
    }
}

impl Coordinate for Coordinate2DM {
    const THREE_DIMENSIONAL: bool = false;
    const MEASURED: bool = true;

    fn from_slice(values: &[f64]) -> Result<Self, InvalidArraySize> {
        check_arity::<Self>(values)?;
        Ok(Coordinate2DM::new(values[0], values[1], values[2]))
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn m(&self) -> Option<f64> {
        Some(self.m)
    }
}

/// Three dimensional coordinate
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Coordinate3D { x, y, z }
    }
}

impl Coordinate for Coordinate3D {
    const THREE_DIMENSIONAL: bool = true;
    const MEASURED: bool = false;

    fn from_slice(values: &[f64]) -> Result<Self, InvalidArraySize> {
        check_arity::<Self>(values)?;
        Ok(Coordinate3D::new(values[0], values[1], values[2]))
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> Option<f64> {
        Some(self.z)
    }
}

/// Three dimensional coordinate with a measure
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate3DM {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Coordinate3DM {
    pub fn new(x: f64, y: f64, z: f64, m: f64) -> Self {
        Coordinate3DM { x, y, z, m }
    }
}

impl Coordinate for Coordinate3DM {
    const THREE_DIMENSIONAL: bool = true;
    const MEASURED: bool = true;

    fn from_slice(values: &[f64]) -> Result<Self, InvalidArraySize> {
        check_arity::<Self>(values)?;
        Ok(Coordinate3DM::new(values[0], values[1], values[2], values[3]))
    }

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn z(&self) -> Option<f64> {
        Some(self.z)
    }

    fn m(&self) -> Option<f64> {
        Some(self.m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_follows_capabilities() {
        assert_eq!(Coordinate2D::arity(), 2);
        assert_eq!(Coordinate2DM::arity(), 3);
        assert_eq!(Coordinate3D::arity(), 3);
        assert_eq!(Coordinate3DM::arity(), 4);
    }

    #[test]
    fn from_slice_orders_z_before_m() {
        let c = Coordinate3DM::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(c, Coordinate3DM::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(c.z(), Some(3.0));
        assert_eq!(c.m(), Some(4.0));
    }

    #[test]
    fn from_slice_rejects_wrong_size() {
        let err = Coordinate2D::from_slice(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.expected, 2);
        assert_eq!(err.found, 3);
        assert!(err.type_name.ends_with("Coordinate2D"));
    }

    #[test]
    fn measured_2d_has_no_z() {
        let c = Coordinate2DM::new(1.0, 2.0, 3.0);
        assert_eq!(c.z(), None);
        assert_eq!(c.m(), Some(3.0));
    }
}
