use super::token::WktToken;
use super::tokenizer::{Token, Tokenizer};
use crate::depth::{Depth, DEFAULT_MAX_DEPTH};
use crate::{
    Coordinate, CoordinateSystem, Encoding, Error, ErrorKind, Geometry, GeometryCollection,
    LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Precision,
    Utf8Encoding,
};
use log::debug;
use std::marker::PhantomData;

/// The dimensionality markers a tagged text declared, or is required to
/// declare.
///
/// At the top level nothing is required. A geometry collection hands the
/// markers it declared down to each of its members so that every nested
/// tagged text repeats them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Dimensions {
    z: bool,
    m: bool,
}

/// Parses Well-Known Text into geometries of coordinate type `C`.
///
/// Whitespace is significant: exactly one space separates adjacent lexical
/// items wherever the grammar shows one, and the first syntax error aborts
/// the read.
///
/// ```
/// use geowkt::{Coordinate3D, Geometry, LineString, WktReader};
///
/// let reader = WktReader::<Coordinate3D>::new();
/// let geometry = reader.read("LINESTRING Z (1.0 2.0 3.0, 4.0 5.0 6.0)").unwrap();
/// let expected = LineString::new(vec![
///     Coordinate3D::new(1.0, 2.0, 3.0),
///     Coordinate3D::new(4.0, 5.0, 6.0),
/// ]);
/// assert_eq!(geometry, Geometry::LineString(expected));
///
/// let err = reader.read("LINESTRING Z (1.0 2.0 3.0,  4.0 5.0 6.0)").unwrap_err();
/// assert_eq!(err.position(), Some((1, 27)));
/// ```
#[derive(Debug, Clone)]
pub struct WktReader<C> {
    precision: Precision,
    coordinate_system: CoordinateSystem,
    max_depth: usize,
    marker: PhantomData<fn() -> C>,
}

/// Construct a customized WKT reader
///
/// ```
/// use geowkt::{Coordinate2D, CoordinateSystem, Geometry, Precision, WktReaderBuilder};
///
/// let reader = WktReaderBuilder::new()
///     .precision(Precision::Fixed { scale: 1000.0 })
///     .coordinate_system(CoordinateSystem::Geographic)
///     .build::<Coordinate2D>();
///
/// match reader.read("POINT (1.0 2.0)").unwrap() {
///     Geometry::Point(point) => {
///         assert_eq!(point.precision(), Precision::Fixed { scale: 1000.0 });
///         assert_eq!(point.coordinate_system(), CoordinateSystem::Geographic);
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WktReaderBuilder {
    precision: Precision,
    coordinate_system: CoordinateSystem,
    max_depth: usize,
}

impl Default for WktReaderBuilder {
    fn default() -> Self {
        WktReaderBuilder::new()
    }
}

impl WktReaderBuilder {
    pub fn new() -> Self {
        WktReaderBuilder {
            precision: Precision::default(),
            coordinate_system: CoordinateSystem::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Precision model assigned to every geometry read
    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Coordinate system assigned to every geometry read
    pub fn coordinate_system(mut self, coordinate_system: CoordinateSystem) -> Self {
        self.coordinate_system = coordinate_system;
        self
    }

    /// Maximum number of geometry collections that may be nested inside each
    /// other. Defaults to 64.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build<C: Coordinate>(&self) -> WktReader<C> {
        WktReader {
            precision: self.precision,
            coordinate_system: self.coordinate_system,
            max_depth: self.max_depth,
            marker: PhantomData,
        }
    }
}

impl<C: Coordinate> Default for WktReader<C> {
    fn default() -> Self {
        WktReader::new()
    }
}

impl<C: Coordinate> WktReader<C> {
    /// A reader with the default precision, coordinate system, and depth
    pub fn new() -> Self {
        WktReaderBuilder::new().build()
    }

    pub fn builder() -> WktReaderBuilder {
        WktReaderBuilder::new()
    }

    /// Parse a WKT string into a geometry
    pub fn read(&self, text: &str) -> Result<Geometry<C>, Error> {
        debug!("reading {} bytes of wkt as {}", text.len(), C::type_name());
        let mut parser = Parser {
            tokenizer: Tokenizer::new(text),
            reader: self,
        };

        let result = match parser.tagged_text(Dimensions::default(), Depth::new(self.max_depth)) {
            Ok(Some(geometry)) => Ok(geometry),
            Ok(None) => Err(Error::new(ErrorKind::UnsupportedType {
                input: String::from(text),
            })),
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            debug!("unable to read wkt: {}", e);
        }

        result
    }

    /// Decode the data with the given encoding and parse the result
    ///
    /// ```
    /// use geowkt::{Coordinate2D, ErrorKind, WktReader};
    ///
    /// let reader = WktReader::<Coordinate2D>::new();
    /// let err = reader.read_bytes(&[0xff, 0xff], encoding_rs::UTF_8).unwrap_err();
    /// assert!(matches!(err.kind(), ErrorKind::InvalidData { .. }));
    /// ```
    pub fn read_bytes<E: Encoding>(&self, data: &[u8], encoding: E) -> Result<Geometry<C>, Error> {
        debug!("decoding {} bytes as {}", data.len(), encoding.name());
        match encoding.decode(data) {
            Some(text) => self.read(&text),
            None => {
                debug!("unable to decode data as {}", encoding.name());
                Err(Error::new(ErrorKind::InvalidData {
                    encoding: String::from(encoding.name()),
                }))
            }
        }
    }

    /// Parse utf-8 encoded data
    pub fn read_slice(&self, data: &[u8]) -> Result<Geometry<C>, Error> {
        self.read_bytes(data, Utf8Encoding::new())
    }
}

/// One parse: each method corresponds to a production of the WKT grammar.
struct Parser<'a, 'r, C> {
    tokenizer: Tokenizer<'a>,
    reader: &'r WktReader<C>,
}

impl<'a, 'r, C: Coordinate> Parser<'a, 'r, C> {
    /// BNF: <geometry tagged text> ::= <point tagged text> | <linestring tagged text>
    ///     | <polygon tagged text> | <multipoint tagged text>
    ///     | <multilinestring tagged text> | <multipolygon tagged text>
    ///     | <geometrycollection tagged text>
    ///
    /// `LINEARRING` is accepted as well even though OGC does not define it.
    /// Returns `None` when the input does not start with a geometry keyword.
    fn tagged_text(
        &mut self,
        require: Dimensions,
        depth: Depth,
    ) -> Result<Option<Geometry<C>>, Error> {
        let geometry: Geometry<C> = if self.tokenizer.accept(WktToken::Point).is_some() {
            self.tagged(require, Self::point_text)?.into()
        } else if self.tokenizer.accept(WktToken::LineString).is_some() {
            self.tagged(require, Self::line_string_text)?.into()
        } else if self.tokenizer.accept(WktToken::LinearRing).is_some() {
            self.tagged(require, Self::linear_ring_text)?.into()
        } else if self.tokenizer.accept(WktToken::Polygon).is_some() {
            self.tagged(require, Self::polygon_text)?.into()
        } else if self.tokenizer.accept(WktToken::MultiPoint).is_some() {
            self.tagged(require, Self::multi_point_text)?.into()
        } else if self.tokenizer.accept(WktToken::MultiLineString).is_some() {
            self.tagged(require, Self::multi_line_string_text)?.into()
        } else if self.tokenizer.accept(WktToken::MultiPolygon).is_some() {
            self.tagged(require, Self::multi_polygon_text)?.into()
        } else if self.tokenizer.accept(WktToken::GeometryCollection).is_some() {
            let depth = depth.push().ok_or_else(|| {
                Error::new(ErrorKind::DepthExceeded {
                    max_depth: depth.max(),
                    line: self.tokenizer.line(),
                    column: self.tokenizer.column(),
                })
            })?;

            self.tagged(require, |p, dims| p.geometry_collection_text(dims, depth))?
                .into()
        } else {
            return Ok(None);
        };

        Ok(Some(geometry))
    }

    /// Everything after the keyword of a tagged text: the dimension suffix
    /// followed by the body.
    #[inline]
    fn tagged<T, F>(&mut self, require: Dimensions, body: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self, Dimensions) -> Result<T, Error>,
    {
        let dims = self.dimension_text(require)?;
        body(self, dims)
    }

    /// BNF: <point text> ::= <left paren> <point> <right paren>
    fn point_text(&mut self, dims: Dimensions) -> Result<Point<C>, Error> {
        self.expect_token(WktToken::LeftParen)?;
        let coordinate = self.coordinate(dims)?;
        self.expect_token(WktToken::RightParen)?;
        Ok(Point::with_context(
            coordinate,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <linestring text> ::= <empty set> | <left paren> <point> {<comma> <point>}* <right paren>
    fn line_string_text(&mut self, dims: Dimensions) -> Result<LineString<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(LineString::empty(self.reader.precision, self.reader.coordinate_system));
        }

        let coordinates = self.delimited(|p| p.coordinate(dims))?;
        Ok(LineString::with_context(
            coordinates,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    fn linear_ring_text(&mut self, dims: Dimensions) -> Result<LinearRing<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(LinearRing::empty(self.reader.precision, self.reader.coordinate_system));
        }

        let coordinates = self.delimited(|p| p.coordinate(dims))?;
        Ok(LinearRing::with_context(
            coordinates,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <polygon text> ::= <empty set> | <left paren> <linestring text> {<comma> <linestring text>}* <right paren>
    ///
    /// The first ring is the outer ring. A polygon with holes requires a comma
    /// after the outer ring, so that is what is reported when neither a comma
    /// nor a closing paren follows it.
    fn polygon_text(&mut self, dims: Dimensions) -> Result<Polygon<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(Polygon::empty(self.reader.precision, self.reader.coordinate_system));
        }

        self.expect_token(WktToken::LeftParen)?;
        let outer_ring = self.linear_ring_text(dims)?;
        let mut inner_rings = Vec::new();

        if self.tokenizer.accept(WktToken::RightParen).is_none() {
            self.expect_token(WktToken::Comma)?;
            self.expect_token(WktToken::SingleSpace)?;
            inner_rings = self.separated(|p| p.linear_ring_text(dims))?;
            self.expect_token(WktToken::RightParen)?;
        }

        Ok(Polygon::with_context(
            outer_ring,
            inner_rings,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <multipoint text> ::= <empty set> | <left paren> <point text> {<comma> <point text>}* <right paren>
    fn multi_point_text(&mut self, dims: Dimensions) -> Result<MultiPoint<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(MultiPoint::empty(self.reader.precision, self.reader.coordinate_system));
        }

        let points = self.delimited(|p| p.point_text(dims))?;
        Ok(MultiPoint::with_context(
            points,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <multilinestring text> ::= <empty set> | <left paren> <linestring text> {<comma> <linestring text>}* <right paren>
    fn multi_line_string_text(&mut self, dims: Dimensions) -> Result<MultiLineString<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(MultiLineString::empty(
                self.reader.precision,
                self.reader.coordinate_system,
            ));
        }

        let lines = self.delimited(|p| p.line_string_text(dims))?;
        Ok(MultiLineString::with_context(
            lines,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <multipolygon text> ::= <empty set> | <left paren> <polygon text> {<comma> <polygon text>}* <right paren>
    fn multi_polygon_text(&mut self, dims: Dimensions) -> Result<MultiPolygon<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(MultiPolygon::empty(self.reader.precision, self.reader.coordinate_system));
        }

        let polygons = self.delimited(|p| p.polygon_text(dims))?;
        Ok(MultiPolygon::with_context(
            polygons,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <geometrycollection text> ::= <empty set> | <left paren> <geometry tagged text> {<comma> <geometry tagged text>}* <right paren>
    fn geometry_collection_text(
        &mut self,
        dims: Dimensions,
        depth: Depth,
    ) -> Result<GeometryCollection<C>, Error> {
        if self.tokenizer.accept(WktToken::Empty).is_some() {
            return Ok(GeometryCollection::empty(
                self.reader.precision,
                self.reader.coordinate_system,
            ));
        }

        let geometries = self.delimited(|p| match p.tagged_text(dims, depth)? {
            Some(geometry) => Ok(geometry),
            None => Err(Error::new(ErrorKind::MissingElement {
                line: p.tokenizer.line(),
                column: p.tokenizer.column(),
            })),
        })?;

        Ok(GeometryCollection::with_context(
            geometries,
            self.reader.precision,
            self.reader.coordinate_system,
        ))
    }

    /// BNF: <point> ::= <x> <y>
    /// BNF: <point z> ::= <x> <y> <z>
    /// BNF: <point m> ::= <x> <y> <m>
    /// BNF: <point zm> ::= <x> <y> <z> <m>
    fn coordinate(&mut self, dims: Dimensions) -> Result<C, Error> {
        let mut values = [0f64; 4];
        values[0] = self.numeric_literal()?;
        self.expect_token(WktToken::SingleSpace)?;
        values[1] = self.numeric_literal()?;
        let mut len = 2;

        for _ in 0..usize::from(dims.z) + usize::from(dims.m) {
            self.expect_token(WktToken::SingleSpace)?;
            values[len] = self.numeric_literal()?;
            len += 1;
        }

        if len != C::arity() {
            return Err(Error::new(ErrorKind::InvalidNumberOfCoordinates {
                found: len,
                required: C::arity(),
                type_name: C::type_name(),
            }));
        }

        Ok(C::from_slice(&values[..len])?)
    }

    /// BNF: <dimension suffix> ::= <space> [Z] [M] [<space>]
    ///
    /// A required marker must be present. A marker that is not required may
    /// still be declared.
    fn dimension_text(&mut self, require: Dimensions) -> Result<Dimensions, Error> {
        self.expect_token(WktToken::SingleSpace)?;

        let z = if require.z {
            self.expect_token(WktToken::ThreeDimensional)?;
            true
        } else {
            self.tokenizer.accept(WktToken::ThreeDimensional).is_some()
        };

        let m = if require.m {
            self.expect_token(WktToken::Measured)?;
            true
        } else {
            self.tokenizer.accept(WktToken::Measured).is_some()
        };

        if z || m {
            self.expect_token(WktToken::SingleSpace)?;
        }

        Ok(Dimensions { z, m })
    }

    fn numeric_literal(&mut self) -> Result<f64, Error> {
        self.tokenizer
            .accept(WktToken::NumericLiteral)
            .and_then(|x| x.parse::<f64>().ok())
            .ok_or_else(|| self.unexpected(WktToken::NumericLiteral))
    }

    /// `<left paren> element {<comma> <space> element}* <right paren>`
    fn delimited<T, F>(&mut self, element: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        self.expect_token(WktToken::LeftParen)?;
        let elements = self.separated(element)?;
        self.expect_token(WktToken::RightParen)?;
        Ok(elements)
    }

    /// `element {<comma> <space> element}*`
    fn separated<T, F>(&mut self, mut element: F) -> Result<Vec<T>, Error>
    where
        F: FnMut(&mut Self) -> Result<T, Error>,
    {
        let mut elements = Vec::new();
        loop {
            elements.push(element(self)?);
            if self.tokenizer.accept(WktToken::Comma).is_none() {
                return Ok(elements);
            }

            self.expect_token(WktToken::SingleSpace)?;
        }
    }

    fn expect_token(&mut self, token: WktToken) -> Result<&'a str, Error> {
        self.tokenizer
            .accept(token)
            .ok_or_else(|| self.unexpected(token))
    }

    fn unexpected(&self, token: WktToken) -> Error {
        Error::new(ErrorKind::UnexpectedToken {
            expected: token.name(),
            line: self.tokenizer.line(),
            column: self.tokenizer.column(),
            remaining: String::from(self.tokenizer.remaining()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate2D, Coordinate3DM};

    fn read2d(input: &str) -> Result<Geometry<Coordinate2D>, Error> {
        WktReader::new().read(input)
    }

    #[test]
    fn dimension_suffix_is_optional_at_top_level() {
        let mut parser = Parser {
            tokenizer: Tokenizer::new(" (1 1)"),
            reader: &WktReader::<Coordinate2D>::new(),
        };
        let dims = parser.dimension_text(Dimensions::default()).unwrap();
        assert_eq!(dims, Dimensions::default());
        assert_eq!(parser.tokenizer.remaining(), "(1 1)");
    }

    #[test]
    fn dimension_suffix_zm() {
        let mut parser = Parser {
            tokenizer: Tokenizer::new(" ZM (1 1 1 1)"),
            reader: &WktReader::<Coordinate3DM>::new(),
        };
        let dims = parser.dimension_text(Dimensions::default()).unwrap();
        assert_eq!(dims, Dimensions { z: true, m: true });
        assert_eq!(parser.tokenizer.remaining(), "(1 1 1 1)");
    }

    #[test]
    fn required_marker_missing() {
        let mut parser = Parser {
            tokenizer: Tokenizer::new(" M (1 1 1)"),
            reader: &WktReader::<Coordinate3DM>::new(),
        };
        let err = parser
            .dimension_text(Dimensions { z: true, m: true })
            .unwrap_err();
        match err.kind() {
            ErrorKind::UnexpectedToken { expected, .. } => assert_eq!(*expected, "Z"),
            x => panic!("unexpected error: {:?}", x),
        }
    }

    #[test]
    fn trailing_comma_in_collection_is_missing_element() {
        let err = read2d("GEOMETRYCOLLECTION (POINT (1 1), )").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::MissingElement { line: 1, column: 34 });
    }

    #[test]
    fn depth_limit() {
        let reader = WktReader::<Coordinate2D>::builder()
            .max_depth(2)
            .build::<Coordinate2D>();
        assert!(reader
            .read("GEOMETRYCOLLECTION (GEOMETRYCOLLECTION EMPTY)")
            .is_ok());

        let err = reader
            .read("GEOMETRYCOLLECTION (GEOMETRYCOLLECTION (GEOMETRYCOLLECTION EMPTY))")
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::DepthExceeded {
                max_depth: 2,
                line: 1,
                column: 59
            }
        );
    }

    #[test]
    fn deeply_nested_input_does_not_overflow() {
        let mut input = String::new();
        for _ in 0..100_000 {
            input.push_str("GEOMETRYCOLLECTION (");
        }

        let err = read2d(&input).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::DepthExceeded { max_depth: 64, .. }
        ));
    }
}
