use crate::{Coordinate, Error, WktReader, WktWriter};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Precision model carried by every geometry.
///
/// The codec never interprets it; it is handed from the reader configuration
/// to each constructed geometry unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    #[default]
    Floating,
    Fixed {
        scale: f64,
    },
}

/// Coordinate system carried by every geometry. Opaque to the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    #[default]
    Cartesian,
    Geographic,
}

/// A single position
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<C> {
    coordinate: C,
    precision: Precision,
    coordinate_system: CoordinateSystem,
}

impl<C: Coordinate> Point<C> {
    pub fn new(coordinate: C) -> Self {
        Point::with_context(coordinate, Precision::default(), CoordinateSystem::default())
    }

    pub fn with_context(
        coordinate: C,
        precision: Precision,
        coordinate_system: CoordinateSystem,
    ) -> Self {
        Point {
            coordinate,
            precision,
            coordinate_system,
        }
    }

    pub fn coordinate(&self) -> &C {
        &self.coordinate
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }
}

macro_rules! element_sequence {
    ($(#[$doc:meta])* $name:ident, $element:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name<C> {
            elements: Vec<$element>,
            precision: Precision,
            coordinate_system: CoordinateSystem,
        }

        impl<C: Coordinate> $name<C> {
            pub fn new(elements: Vec<$element>) -> Self {
                $name::with_context(elements, Precision::default(), CoordinateSystem::default())
            }

            pub fn with_context(
                elements: Vec<$element>,
                precision: Precision,
                coordinate_system: CoordinateSystem,
            ) -> Self {
                $name {
                    elements,
                    precision,
                    coordinate_system,
                }
            }

            /// Create a geometry without any elements
            pub fn empty(precision: Precision, coordinate_system: CoordinateSystem) -> Self {
                $name::with_context(Vec::new(), precision, coordinate_system)
            }

            pub fn elements(&self) -> &[$element] {
                &self.elements
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $element> {
                self.elements.iter()
            }

            pub fn len(&self) -> usize {
                self.elements.len()
            }

            pub fn is_empty(&self) -> bool {
                self.elements.is_empty()
            }

            pub fn precision(&self) -> Precision {
                self.precision
            }

            pub fn coordinate_system(&self) -> CoordinateSystem {
                self.coordinate_system
            }
        }

        impl<C: Coordinate> Default for $name<C> {
            fn default() -> Self {
                $name::new(Vec::new())
            }
        }

        impl<C> Index<usize> for $name<C> {
            type Output = $element;

            fn index(&self, index: usize) -> &Self::Output {
                &self.elements[index]
            }
        }

        impl<'a, C> IntoIterator for &'a $name<C> {
            type Item = &'a $element;
            type IntoIter = std::slice::Iter<'a, $element>;

            fn into_iter(self) -> Self::IntoIter {
                self.elements.iter()
            }
        }
    };
}

element_sequence!(
    /// An ordered sequence of coordinates
    LineString,
    C
);

element_sequence!(
    /// A line string intended to be closed. Closure is not validated.
    LinearRing,
    C
);

element_sequence!(MultiPoint, Point<C>);
element_sequence!(MultiLineString, LineString<C>);
element_sequence!(MultiPolygon, Polygon<C>);

element_sequence!(
    /// A heterogeneous, possibly nested, sequence of geometries
    GeometryCollection,
    Geometry<C>
);

/// An outer ring and any number of inner rings (holes)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon<C> {
    outer_ring: LinearRing<C>,
    inner_rings: Vec<LinearRing<C>>,
    precision: Precision,
    coordinate_system: CoordinateSystem,
}

impl<C: Coordinate> Polygon<C> {
    /// Create a polygon. The precision and coordinate system are taken from
    /// the outer ring.
    pub fn new(outer_ring: LinearRing<C>, inner_rings: Vec<LinearRing<C>>) -> Self {
        let precision = outer_ring.precision();
        let coordinate_system = outer_ring.coordinate_system();
        Polygon {
            outer_ring,
            inner_rings,
            precision,
            coordinate_system,
        }
    }

    pub fn with_context(
        outer_ring: LinearRing<C>,
        inner_rings: Vec<LinearRing<C>>,
        precision: Precision,
        coordinate_system: CoordinateSystem,
    ) -> Self {
        Polygon {
            outer_ring,
            inner_rings,
            precision,
            coordinate_system,
        }
    }

    pub fn empty(precision: Precision, coordinate_system: CoordinateSystem) -> Self {
        Polygon {
            outer_ring: LinearRing::empty(precision, coordinate_system),
            inner_rings: Vec::new(),
            precision,
            coordinate_system,
        }
    }

    pub fn outer_ring(&self) -> &LinearRing<C> {
        &self.outer_ring
    }

    pub fn inner_rings(&self) -> &[LinearRing<C>] {
        &self.inner_rings
    }

    /// The outer ring followed by the inner rings
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing<C>> {
        std::iter::once(&self.outer_ring).chain(self.inner_rings.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.outer_ring.is_empty() && self.inner_rings.is_empty()
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }
}

impl<C: Coordinate> Default for Polygon<C> {
    fn default() -> Self {
        Polygon::empty(Precision::default(), CoordinateSystem::default())
    }
}

/// Every geometry the WKT grammar can describe
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry<C> {
    Point(Point<C>),
    LineString(LineString<C>),
    LinearRing(LinearRing<C>),
    Polygon(Polygon<C>),
    MultiPoint(MultiPoint<C>),
    MultiLineString(MultiLineString<C>),
    MultiPolygon(MultiPolygon<C>),
    GeometryCollection(GeometryCollection<C>),
}

impl<C: Coordinate> Geometry<C> {
    /// The WKT keyword of the geometry
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::LinearRing(_) => "LINEARRING",
            Geometry::Polygon(_) => "POLYGON",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::MultiLineString(_) => "MULTILINESTRING",
            Geometry::MultiPolygon(_) => "MULTIPOLYGON",
            Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    /// A point is never empty, every other geometry is empty when it has no
    /// elements.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(x) => x.is_empty(),
            Geometry::LinearRing(x) => x.is_empty(),
            Geometry::Polygon(x) => x.is_empty(),
            Geometry::MultiPoint(x) => x.is_empty(),
            Geometry::MultiLineString(x) => x.is_empty(),
            Geometry::MultiPolygon(x) => x.is_empty(),
            Geometry::GeometryCollection(x) => x.is_empty(),
        }
    }
}

macro_rules! geometry_from {
    ($($name:ident),*) => {
        $(
            impl<C> From<$name<C>> for Geometry<C> {
                fn from(x: $name<C>) -> Self {
                    Geometry::$name(x)
                }
            }
        )*
    };
}

geometry_from!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

/// A borrowed view of one of the geometries known to the writer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryRef<'a, C> {
    Point(&'a Point<C>),
    LineString(&'a LineString<C>),
    LinearRing(&'a LinearRing<C>),
    Polygon(&'a Polygon<C>),
    MultiPoint(&'a MultiPoint<C>),
    MultiLineString(&'a MultiLineString<C>),
    MultiPolygon(&'a MultiPolygon<C>),
    GeometryCollection(&'a GeometryCollection<C>),
}

/// Inspection of a geometry's variant.
///
/// Types outside of this crate's geometry model can implement this trait and
/// return `None` to signal that they have no WKT representation. The writer
/// renders those as an empty string.
pub trait GeometryTrait<C> {
    fn as_type(&self) -> Option<GeometryRef<'_, C>>;
}

impl<C> GeometryTrait<C> for Geometry<C> {
    fn as_type(&self) -> Option<GeometryRef<'_, C>> {
        let x = match self {
            Geometry::Point(x) => GeometryRef::Point(x),
            Geometry::LineString(x) => GeometryRef::LineString(x),
            Geometry::LinearRing(x) => GeometryRef::LinearRing(x),
            Geometry::Polygon(x) => GeometryRef::Polygon(x),
            Geometry::MultiPoint(x) => GeometryRef::MultiPoint(x),
            Geometry::MultiLineString(x) => GeometryRef::MultiLineString(x),
            Geometry::MultiPolygon(x) => GeometryRef::MultiPolygon(x),
            Geometry::GeometryCollection(x) => GeometryRef::GeometryCollection(x),
        };
        Some(x)
    }
}

macro_rules! geometry_trait {
    ($($name:ident),*) => {
        $(
            impl<C> GeometryTrait<C> for $name<C> {
                fn as_type(&self) -> Option<GeometryRef<'_, C>> {
                    Some(GeometryRef::$name(self))
                }
            }
        )*
    };
}

geometry_trait!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

impl<C: Coordinate> fmt::Display for Geometry<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&WktWriter::new().write(self))
    }
}

/// Parse with a default configured [WktReader]
///
/// ```
/// use geowkt::{Coordinate2D, Geometry};
///
/// let geometry: Geometry<Coordinate2D> = "LINESTRING (1.0 1.0, 2.0 2.0)".parse().unwrap();
/// assert_eq!(geometry.geometry_type(), "LINESTRING");
/// ```
impl<C: Coordinate> FromStr for Geometry<C> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WktReader::new().read(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate2D;

    #[test]
    fn polygon_rings_start_with_outer() {
        let outer = LinearRing::new(vec![Coordinate2D::new(1.0, 1.0)]);
        let inner = LinearRing::new(vec![Coordinate2D::new(2.0, 2.0)]);
        let polygon = Polygon::new(outer.clone(), vec![inner.clone()]);
        let rings: Vec<_> = polygon.rings().collect();
        assert_eq!(rings, vec![&outer, &inner]);
    }

    #[test]
    fn empty_geometries() {
        let empty: Geometry<Coordinate2D> = GeometryCollection::default().into();
        assert!(empty.is_empty());
        assert!(Polygon::<Coordinate2D>::default().is_empty());

        let point: Geometry<_> = Point::new(Coordinate2D::new(0.0, 0.0)).into();
        assert!(!point.is_empty());
    }

    #[test]
    fn context_is_carried() {
        let line = LineString::with_context(
            vec![Coordinate2D::new(1.0, 1.0)],
            Precision::Fixed { scale: 100.0 },
            CoordinateSystem::Geographic,
        );
        assert_eq!(line.precision(), Precision::Fixed { scale: 100.0 });
        assert_eq!(line.coordinate_system(), CoordinateSystem::Geographic);
    }

    #[test]
    fn display_writes_wkt() {
        let point: Geometry<_> = Point::new(Coordinate2D::new(1.0, 2.0)).into();
        assert_eq!(point.to_string(), "POINT (1.0 2.0)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_keeps_context() {
        let line = LineString::with_context(
            vec![Coordinate2D::new(1.0, 1.0)],
            Precision::Fixed { scale: 100.0 },
            CoordinateSystem::Geographic,
        );
        let geometry = Geometry::MultiLineString(MultiLineString::new(vec![line]));
        let json = serde_json::to_string(&geometry).unwrap();
        let actual: Geometry<Coordinate2D> = serde_json::from_str(&json).unwrap();
        assert_eq!(actual, geometry);
    }
}
