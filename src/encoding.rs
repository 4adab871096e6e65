use std::borrow::Cow;

/// An encoding for interpreting byte data as UTF-8 text
///
/// Unlike a lossy decoder, an encoding here reports failure so that the
/// reader can reject bytes that are not valid in the requested encoding
/// instead of parsing replacement characters.
pub trait Encoding {
    /// Name of the encoding used in diagnostics
    fn name(&self) -> &str;

    /// Decodes bytes into a utf-8 string -- allocating if necessary. Returns
    /// `None` when the data is malformed for this encoding.
    fn decode<'a>(&self, data: &'a [u8]) -> Option<Cow<'a, str>>;
}

/// Decodes bytes according to the utf8 standard
///
/// ```
/// use geowkt::{Utf8Encoding, Encoding};
///
/// let encoding = Utf8Encoding::new();
/// assert_eq!(encoding.decode(b"POINT (1 1)").as_deref(), Some("POINT (1 1)"));
/// assert_eq!(encoding.decode(b"\xff\xff"), None);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Utf8Encoding;

impl Utf8Encoding {
    /// Creates a new utf8 decoder
    pub fn new() -> Self {
        Utf8Encoding
    }
}

impl Encoding for Utf8Encoding {
    fn name(&self) -> &str {
        "UTF-8"
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Option<Cow<'a, str>> {
        let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);
        std::str::from_utf8(data).ok().map(Cow::Borrowed)
    }
}

/// Any encoding known to `encoding_rs`. A byte order mark for the encoding
/// is removed before decoding.
///
/// ```
/// use geowkt::Encoding;
///
/// let data = [0xff, 0xfe, b'P', 0, b'O', 0, b'I', 0, b'N', 0, b'T', 0];
/// let decoded = Encoding::decode(&encoding_rs::UTF_16LE, &data);
/// assert_eq!(decoded.as_deref(), Some("POINT"));
/// ```
impl Encoding for &'static encoding_rs::Encoding {
    fn name(&self) -> &str {
        (*self).name()
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Option<Cow<'a, str>> {
        let data = match encoding_rs::Encoding::for_bom(data) {
            Some((encoding, len)) if encoding == *self => &data[len..],
            _ => data,
        };

        self.decode_without_bom_handling_and_without_replacement(data)
    }
}

impl<T: Encoding + ?Sized> Encoding for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Option<Cow<'a, str>> {
        (**self).decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_borrows() {
        let decoded = Utf8Encoding.decode(b"POINT (1 1)").unwrap();
        assert!(matches!(decoded, Cow::Borrowed(_)));
    }

    #[test]
    fn utf8_strips_bom() {
        let decoded = Utf8Encoding.decode(b"\xef\xbb\xbfPOINT").unwrap();
        assert_eq!(decoded, "POINT");
    }

    #[test]
    fn utf8_rejects_invalid() {
        assert_eq!(Utf8Encoding.decode(b"Joe\xffcheeze"), None);
    }

    #[test]
    fn utf16_with_bom() {
        let mut data = vec![0xfe, 0xff];
        for c in "LINESTRING EMPTY".encode_utf16() {
            data.extend_from_slice(&c.to_be_bytes());
        }

        let decoded = Encoding::decode(&encoding_rs::UTF_16BE, &data).unwrap();
        assert_eq!(decoded, "LINESTRING EMPTY");
    }

    #[test]
    fn utf16_unpaired_surrogate() {
        let data = [0x00, 0xd8];
        assert_eq!(Encoding::decode(&encoding_rs::UTF_16LE, &data), None);
    }

    #[test]
    fn windows1252_name() {
        assert_eq!(Encoding::name(&encoding_rs::WINDOWS_1252), "windows-1252");
    }

    #[test]
    fn boxed_encoding() {
        let encoding: Box<dyn Encoding> = Box::new(Utf8Encoding);
        assert_eq!(encoding.name(), "UTF-8");
        assert_eq!(encoding.decode(b"EMPTY").as_deref(), Some("EMPTY"));
    }
}
