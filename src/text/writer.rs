use super::token::WktToken;
use super::tokenizer::Token;
use crate::{
    Coordinate, GeometryCollection, GeometryRef, GeometryTrait, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use log::debug;
use std::fmt::{self, Write};

/// Customizes how numbers are written
pub trait WriteVisitor {
    /// Defines how an ordinate is written
    fn visit_f64<W>(&self, writer: &mut W, data: f64) -> fmt::Result
    where
        W: Write;
}

/// The default visitor writes an ordinate with the shortest representation
/// that round trips, always keeping a fractional part (`1.0`, `1e-5`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultWriteVisitor;

impl WriteVisitor for DefaultWriteVisitor {
    fn visit_f64<W>(&self, writer: &mut W, data: f64) -> fmt::Result
    where
        W: Write,
    {
        write!(writer, "{:?}", data)
    }
}

/// Renders geometries as Well-Known Text.
///
/// Everything is written with single spaces and the `, ` separator so that
/// the output can be read back by [WktReader](crate::WktReader).
///
/// ```
/// use geowkt::{Coordinate2D, LineString, Point, WktWriter};
///
/// let writer = WktWriter::new();
/// let point = Point::new(Coordinate2D::new(1.0, 2.0));
/// assert_eq!(writer.write(&point), "POINT (1.0 2.0)");
///
/// let line = LineString::<Coordinate2D>::default();
/// assert_eq!(writer.write(&line), "LINESTRING EMPTY");
/// ```
///
/// Ordinate formatting can be swapped out with a [WriteVisitor]:
///
/// ```
/// use geowkt::{Coordinate2D, Point, WktWriter, WriteVisitor};
/// use std::fmt::{self, Write};
///
/// struct Rounded;
///
/// impl WriteVisitor for Rounded {
///     fn visit_f64<W: Write>(&self, writer: &mut W, data: f64) -> fmt::Result {
///         write!(writer, "{:.2}", data)
///     }
/// }
///
/// let writer = WktWriter::with_visitor(Rounded);
/// let point = Point::new(Coordinate2D::new(1.0, 1.0 / 3.0));
/// assert_eq!(writer.write(&point), "POINT (1.00 0.33)");
/// ```
#[derive(Debug, Default, Clone)]
pub struct WktWriter<V = DefaultWriteVisitor> {
    visitor: V,
}

impl WktWriter<DefaultWriteVisitor> {
    pub fn new() -> Self {
        WktWriter::with_visitor(DefaultWriteVisitor)
    }
}

impl<V: WriteVisitor> WktWriter<V> {
    pub fn with_visitor(visitor: V) -> Self {
        WktWriter { visitor }
    }

    /// Render the geometry into a new string. A geometry without a WKT
    /// representation is rendered as an empty string.
    pub fn write<C, G>(&self, geometry: &G) -> String
    where
        C: Coordinate,
        G: GeometryTrait<C> + ?Sized,
    {
        let mut out = String::new();
        match self.write_to::<C, G, String>(&mut out, geometry) {
            Ok(()) => out,
            Err(_) => {
                debug!("visitor failed to write {}", C::type_name());
                String::new()
            }
        }
    }

    /// Render the geometry into the given writer
    pub fn write_to<C, G, W>(&self, writer: &mut W, geometry: &G) -> fmt::Result
    where
        C: Coordinate,
        G: GeometryTrait<C> + ?Sized,
        W: Write,
    {
        debug!("writing wkt as {}", C::type_name());
        match geometry.as_type() {
            Some(geometry) => self.tagged_text(writer, geometry),
            None => {
                debug!("geometry has no wkt representation");
                Ok(())
            }
        }
    }

    fn tagged_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        geometry: GeometryRef<'_, C>,
    ) -> fmt::Result {
        match geometry {
            GeometryRef::Point(x) => {
                writer.write_str(WktToken::Point.name())?;
                writer.write_char(' ')?;
                if let Some(tag) = dimension_tag::<C>() {
                    writer.write_str(tag)?;
                    writer.write_char(' ')?;
                }
                self.point_text(writer, x)
            }
            GeometryRef::LineString(x) => {
                self.keyword(writer, WktToken::LineString)?;
                self.line_string_text(writer, x)
            }
            GeometryRef::LinearRing(x) => {
                self.keyword(writer, WktToken::LinearRing)?;
                self.linear_ring_text(writer, x)
            }
            GeometryRef::Polygon(x) => {
                self.keyword(writer, WktToken::Polygon)?;
                self.polygon_text(writer, x)
            }
            GeometryRef::MultiPoint(x) => {
                self.keyword(writer, WktToken::MultiPoint)?;
                self.multi_point_text(writer, x)
            }
            GeometryRef::MultiLineString(x) => {
                self.keyword(writer, WktToken::MultiLineString)?;
                self.multi_line_string_text(writer, x)
            }
            GeometryRef::MultiPolygon(x) => {
                self.keyword(writer, WktToken::MultiPolygon)?;
                self.multi_polygon_text(writer, x)
            }
            GeometryRef::GeometryCollection(x) => {
                self.keyword(writer, WktToken::GeometryCollection)?;
                self.geometry_collection_text(writer, x)
            }
        }
    }

    #[inline]
    fn keyword<W: Write>(&self, writer: &mut W, token: WktToken) -> fmt::Result {
        writer.write_str(token.name())?;
        writer.write_char(' ')
    }

    fn point_text<C: Coordinate, W: Write>(&self, writer: &mut W, point: &Point<C>) -> fmt::Result {
        writer.write_char('(')?;
        self.coordinate(writer, point.coordinate())?;
        writer.write_char(')')
    }

    fn line_string_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        line: &LineString<C>,
    ) -> fmt::Result {
        self.sequence(writer, line.elements(), |w, x| self.coordinate(w, x))
    }

    fn linear_ring_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        ring: &LinearRing<C>,
    ) -> fmt::Result {
        self.sequence(writer, ring.elements(), |w, x| self.coordinate(w, x))
    }

    fn polygon_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        polygon: &Polygon<C>,
    ) -> fmt::Result {
        if polygon.is_empty() {
            return writer.write_str(WktToken::Empty.name());
        }

        writer.write_char('(')?;
        for (i, ring) in polygon.rings().enumerate() {
            if i != 0 {
                writer.write_str(", ")?;
            }
            self.linear_ring_text(writer, ring)?;
        }
        writer.write_char(')')
    }

    fn multi_point_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        points: &MultiPoint<C>,
    ) -> fmt::Result {
        self.sequence(writer, points.elements(), |w, x| self.point_text(w, x))
    }

    fn multi_line_string_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        lines: &MultiLineString<C>,
    ) -> fmt::Result {
        self.sequence(writer, lines.elements(), |w, x| self.line_string_text(w, x))
    }

    fn multi_polygon_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        polygons: &MultiPolygon<C>,
    ) -> fmt::Result {
        self.sequence(writer, polygons.elements(), |w, x| self.polygon_text(w, x))
    }

    fn geometry_collection_text<C: Coordinate, W: Write>(
        &self,
        writer: &mut W,
        collection: &GeometryCollection<C>,
    ) -> fmt::Result {
        self.sequence(writer, collection.elements(), |w, x| {
            match x.as_type() {
                Some(geometry) => self.tagged_text(w, geometry),
                None => Ok(()),
            }
        })
    }

    /// `EMPTY` or the parenthesized, comma separated elements
    fn sequence<T, W, F>(&self, writer: &mut W, elements: &[T], mut f: F) -> fmt::Result
    where
        W: Write,
        F: FnMut(&mut W, &T) -> fmt::Result,
    {
        if elements.is_empty() {
            return writer.write_str(WktToken::Empty.name());
        }

        writer.write_char('(')?;
        for (i, element) in elements.iter().enumerate() {
            if i != 0 {
                writer.write_str(", ")?;
            }
            f(writer, element)?;
        }
        writer.write_char(')')
    }

    fn coordinate<C: Coordinate, W: Write>(&self, writer: &mut W, coordinate: &C) -> fmt::Result {
        self.visitor.visit_f64(writer, coordinate.x())?;
        writer.write_char(' ')?;
        self.visitor.visit_f64(writer, coordinate.y())?;

        for value in coordinate.z().into_iter().chain(coordinate.m()) {
            writer.write_char(' ')?;
            self.visitor.visit_f64(writer, value)?;
        }

        Ok(())
    }
}

/// Only point tagged text carries the dimension marker
fn dimension_tag<C: Coordinate>() -> Option<&'static str> {
    match (C::THREE_DIMENSIONAL, C::MEASURED) {
        (true, true) => Some("ZM"),
        (true, false) => Some(WktToken::ThreeDimensional.name()),
        (false, true) => Some(WktToken::Measured.name()),
        (false, false) => None,
    }
}
