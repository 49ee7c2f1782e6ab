//! Geographic extent of a document

use crate::types::{Latitude, Longitude};
use serde::{Deserialize, Serialize};
use waymark_xml::{
    read_element, write_element, ConvertedAttribute, Result, TokenSink, TokenSource, XmlElement,
};

/// The bounding rectangle of the coordinates in a document
///
/// All four corners are required attributes; there is no optional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    min_latitude: Latitude,
    min_longitude: Longitude,
    max_latitude: Latitude,
    max_longitude: Longitude,
}

impl Bounds {
    /// Canonical element name.
    pub const TAG: &'static str = "bounds";

    /// Creates a bounding rectangle from its corners.
    #[must_use = "creates a value that should be used"]
    pub const fn of(
        min_latitude: Latitude,
        min_longitude: Longitude,
        max_latitude: Latitude,
        max_longitude: Longitude,
    ) -> Self {
        Self {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        }
    }

    /// Returns the southern edge.
    #[must_use = "returns the southern edge"]
    pub const fn min_latitude(self) -> Latitude {
        self.min_latitude
    }

    /// Returns the western edge.
    #[must_use = "returns the western edge"]
    pub const fn min_longitude(self) -> Longitude {
        self.min_longitude
    }

    /// Returns the northern edge.
    #[must_use = "returns the northern edge"]
    pub const fn max_latitude(self) -> Latitude {
        self.max_latitude
    }

    /// Returns the eastern edge.
    #[must_use = "returns the eastern edge"]
    pub const fn max_longitude(self) -> Longitude {
        self.max_longitude
    }
}

impl XmlElement for Bounds {
    fn read_as(tag: &str, source: &mut dyn TokenSource) -> Result<Self> {
        let mut minlat = ConvertedAttribute::<Latitude>::new("minlat");
        let mut minlon = ConvertedAttribute::<Longitude>::new("minlon");
        let mut maxlat = ConvertedAttribute::<Latitude>::new("maxlat");
        let mut maxlon = ConvertedAttribute::<Longitude>::new("maxlon");

        read_element(
            source,
            tag,
            &mut [&mut minlat, &mut minlon, &mut maxlat, &mut maxlon],
            &mut [],
        )?;

        Ok(Self {
            min_latitude: minlat.require(tag)?,
            min_longitude: minlon.require(tag)?,
            max_latitude: maxlat.require(tag)?,
            max_longitude: maxlon.require(tag)?,
        })
    }

    fn write_as(&self, tag: &str, sink: &mut dyn TokenSink) -> Result<()> {
        write_element(
            sink,
            tag,
            &[
                ("minlat", self.min_latitude.to_string()),
                ("minlon", self.min_longitude.to_string()),
                ("maxlat", self.max_latitude.to_string()),
                ("maxlon", self.max_longitude.to_string()),
            ],
            |_| Ok(()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_xml::{BindError, XmlTokenReader, XmlTokenWriter};

    fn sample() -> Bounds {
        Bounds::of(
            Latitude::new(46.0).unwrap(),
            Longitude::new(10.0).unwrap(),
            Latitude::new(47.5).unwrap(),
            Longitude::new(12.25).unwrap(),
        )
    }

    #[test]
    fn test_round_trip() {
        let bounds = sample();
        let mut sink = XmlTokenWriter::new(Vec::new());
        bounds.write_as(Bounds::TAG, &mut sink).unwrap();
        let xml = String::from_utf8(sink.into_inner()).unwrap();

        let mut source = XmlTokenReader::from_str(&xml);
        assert_eq!(Bounds::read_as(Bounds::TAG, &mut source).unwrap(), bounds);
    }

    #[test]
    fn test_missing_corner_fails() {
        let mut source =
            XmlTokenReader::from_str(r#"<bounds minlat="1" minlon="2" maxlat="3"/>"#);
        let err = Bounds::read_as(Bounds::TAG, &mut source).unwrap_err();
        assert!(matches!(err, BindError::MissingAttribute { .. }));
    }

    #[test]
    fn test_out_of_range_corner_fails() {
        let mut source = XmlTokenReader::from_str(
            r#"<bounds minlat="95" minlon="2" maxlat="3" maxlon="4"/>"#,
        );
        let err = Bounds::read_as(Bounds::TAG, &mut source).unwrap_err();
        assert!(matches!(err, BindError::Validation { .. }));
    }
}
