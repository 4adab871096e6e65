use super::tokenizer::{Lookahead, Token, TokenDefinition};
use once_cell::sync::Lazy;

/// The lexical items of the WKT grammar.
///
/// Whitespace is part of the grammar: [WktToken::SingleSpace] only matches a
/// lone space that is followed by something other than another space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WktToken {
    WhiteSpace,
    SingleSpace,
    NewLine,
    Comma,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftDelimiter,
    RightDelimiter,
    NumericLiteral,
    ThreeDimensional,
    Measured,
    Empty,
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl WktToken {
    pub const ALL: [WktToken; 22] = [
        WktToken::WhiteSpace,
        WktToken::SingleSpace,
        WktToken::NewLine,
        WktToken::Comma,
        WktToken::LeftParen,
        WktToken::RightParen,
        WktToken::LeftBracket,
        WktToken::RightBracket,
        WktToken::LeftDelimiter,
        WktToken::RightDelimiter,
        WktToken::NumericLiteral,
        WktToken::ThreeDimensional,
        WktToken::Measured,
        WktToken::Empty,
        WktToken::Point,
        WktToken::LineString,
        WktToken::LinearRing,
        WktToken::Polygon,
        WktToken::MultiPoint,
        WktToken::MultiLineString,
        WktToken::MultiPolygon,
        WktToken::GeometryCollection,
    ];

    /// Name and pattern of the token
    fn spec(self) -> (&'static str, &'static str) {
        match self {
            WktToken::WhiteSpace => ("white space", r"[ \t]+"),
            WktToken::SingleSpace => ("single space", " "),
            WktToken::NewLine => ("\n or \r", r"[\n\r]"),
            WktToken::Comma => (",", ","),
            WktToken::LeftParen => ("(", r"\("),
            WktToken::RightParen => (")", r"\)"),
            WktToken::LeftBracket => ("[", r"\["),
            WktToken::RightBracket => ("]", r"\]"),
            WktToken::LeftDelimiter => ("( or [", r"[(\[]"),
            WktToken::RightDelimiter => (") or ]", r"[)\]]"),
            WktToken::NumericLiteral => (
                "numeric literal",
                r"[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?",
            ),
            WktToken::ThreeDimensional => ("Z", "z"),
            WktToken::Measured => ("M", "m"),
            WktToken::Empty => ("EMPTY", "empty"),
            WktToken::Point => ("POINT", "point"),
            WktToken::LineString => ("LINESTRING", "linestring"),
            WktToken::LinearRing => ("LINEARRING", "linearring"),
            WktToken::Polygon => ("POLYGON", "polygon"),
            WktToken::MultiPoint => ("MULTIPOINT", "multipoint"),
            WktToken::MultiLineString => ("MULTILINESTRING", "multilinestring"),
            WktToken::MultiPolygon => ("MULTIPOLYGON", "multipolygon"),
            WktToken::GeometryCollection => ("GEOMETRYCOLLECTION", "geometrycollection"),
        }
    }

    fn compile(self) -> TokenDefinition {
        let (name, pattern) = self.spec();
        let definition =
            TokenDefinition::new(name, pattern).expect("wkt token patterns to be valid");

        match self {
            WktToken::SingleSpace => definition.with_lookahead(Lookahead::NotFollowedBy(' ')),
            WktToken::NewLine => definition.newline(),
            _ => definition,
        }
    }

    pub fn definition(self) -> &'static TokenDefinition {
        &REGISTRY[self as usize]
    }
}

static REGISTRY: Lazy<Vec<TokenDefinition>> =
    Lazy::new(|| WktToken::ALL.iter().map(|x| x.compile()).collect());

impl Token for WktToken {
    fn name(&self) -> &'static str {
        self.spec().0
    }

    fn match_len(&self, input: &str) -> Option<usize> {
        self.definition().match_len(input)
    }

    fn is_newline(&self) -> bool {
        *self == WktToken::NewLine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn registry_is_in_declaration_order() {
        for token in WktToken::ALL.iter() {
            assert_eq!(token.definition().name(), token.name());
        }
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("-1.5", Some(4))]
    #[case("+.5", Some(3))]
    #[case("1.0E-5)", Some(6))]
    #[case("1.0e+05 ", Some(7))]
    #[case("1.01.0)", Some(4))]
    #[case("1.", Some(1))]
    #[case(".", None)]
    #[case("K", None)]
    #[case("-", None)]
    fn numeric_literal(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(WktToken::NumericLiteral.match_len(input), expected);
    }

    #[rstest]
    #[case(WktToken::Point, "point (", Some(5))]
    #[case(WktToken::Point, "MULTIPOINT", None)]
    #[case(WktToken::LineString, "LINEARRING", None)]
    #[case(WktToken::ThreeDimensional, "ZM", Some(1))]
    #[case(WktToken::Measured, "m (", Some(1))]
    #[case(WktToken::Empty, "Empty", Some(5))]
    #[case(WktToken::LeftDelimiter, "[", Some(1))]
    #[case(WktToken::RightDelimiter, ")", Some(1))]
    #[case(WktToken::WhiteSpace, " \t x", Some(3))]
    #[case(WktToken::NewLine, "\r\n", Some(1))]
    fn token_matches(#[case] token: WktToken, #[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(token.match_len(input), expected);
    }
}
