/*!

A strict reader and writer for [Well-Known
Text](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry)
(WKT) geometries.

## Features

- ✔ Strict: whitespace is part of the grammar and the first syntax error is
  reported with its line and column
- ✔ Typed: the coordinate dimensionality (2D, 2DM, 3D, 3DM) is a type
  parameter, so a `POINT Z` can never be read as a 2D point
- ✔ Safe: nesting depth is capped so hostile input cannot overflow the stack
- ✔ Encodings: decode any [encoding_rs](https://docs.rs/encoding_rs) encoding
  before reading

## Quick Start

```rust
use geowkt::{Coordinate2D, Geometry, LineString, WktReader, WktWriter};

let reader = WktReader::<Coordinate2D>::new();
let geometry = reader.read("LINESTRING (1.0 1.0, 2.0 2.0)").unwrap();

let expected = LineString::new(vec![
    Coordinate2D::new(1.0, 1.0),
    Coordinate2D::new(2.0, 2.0),
]);
assert_eq!(geometry, Geometry::LineString(expected));

let writer = WktWriter::new();
assert_eq!(writer.write(&geometry), "LINESTRING (1.0 1.0, 2.0 2.0)");
```

## Dimensions

The coordinate type decides which dimension markers the input must carry.
Reading `POINT Z (1.0 2.0 3.0)` requires a coordinate type with a `z`
ordinate:

```rust
use geowkt::{Coordinate2D, Coordinate3D, ErrorKind, WktReader};

let text = "POINT Z (1.0 2.0 3.0)";
assert!(WktReader::<Coordinate3D>::new().read(text).is_ok());

let err = WktReader::<Coordinate2D>::new().read(text).unwrap_err();
assert!(matches!(err.kind(), ErrorKind::InvalidNumberOfCoordinates { found: 3, required: 2, .. }));
```

## Errors

Every syntax error names what was expected along with the unconsumed input:

```rust
use geowkt::{Coordinate2D, WktReader};

let err = WktReader::<Coordinate2D>::new().read("POINT (1.01.0)").unwrap_err();
assert_eq!(
    err.to_string(),
    "Unexpected token at line: 1 column: 12. Expected 'single space' but found -> '.0)'"
);
```

## Logging

Reads and writes are instrumented with the [log](https://docs.rs/log) facade:
entry points and failures at `debug`, every accepted token at `trace`.

*/

mod coord;
mod depth;
mod encoding;
mod errors;
mod geometry;
pub mod text;

pub use self::coord::*;
pub use self::encoding::*;
pub use self::errors::*;
pub use self::geometry::*;
pub use self::text::{
    DefaultWriteVisitor, WktReader, WktReaderBuilder, WktWriter, WriteVisitor,
};
