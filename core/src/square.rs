//! Composite response shapes: the 3 m square and the full squared address.

use std::fmt;

use url::Url;

use crate::coordinates::Coordinates;
use crate::error::ValidationError;
use crate::language::Language;
use crate::words::ThreeWordAddress;

/// The square a three-word address names, given by two opposite corners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    northeast: Coordinates,
    southwest: Coordinates,
}

impl Square {
    pub fn new(northeast: Coordinates, southwest: Coordinates) -> Self {
        Self {
            northeast,
            southwest,
        }
    }

    pub fn builder() -> SquareBuilder {
        SquareBuilder::default()
    }

    pub fn northeast(&self) -> &Coordinates {
        &self.northeast
    }

    pub fn southwest(&self) -> &Coordinates {
        &self.southwest
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{northeast:{};southwest:{}}}", self.northeast, self.southwest)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SquareBuilder {
    northeast: Option<Coordinates>,
    southwest: Option<Coordinates>,
}

impl SquareBuilder {
    pub fn northeast(mut self, northeast: Coordinates) -> Self {
        self.northeast = Some(northeast);
        self
    }

    pub fn northeast_at(self, latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(self.northeast(Coordinates::from_f64(latitude, longitude)?))
    }

    pub fn southwest(mut self, southwest: Coordinates) -> Self {
        self.southwest = Some(southwest);
        self
    }

    pub fn southwest_at(self, latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(self.southwest(Coordinates::from_f64(latitude, longitude)?))
    }

    pub fn build(self) -> Result<Square, ValidationError> {
        let northeast = self.northeast.ok_or(ValidationError::MissingField("northeast"))?;
        let southwest = self.southwest.ok_or(ValidationError::MissingField("southwest"))?;
        Ok(Square::new(northeast, southwest))
    }
}

/// Everything the service reports about one three-word address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquaredAddress {
    country: String,
    square: Square,
    nearest_place: String,
    coordinates: Coordinates,
    words: ThreeWordAddress,
    language: Language,
    map: Url,
}

impl SquaredAddress {
    pub fn builder() -> SquaredAddressBuilder {
        SquaredAddressBuilder::default()
    }

    /// ISO 3166-1 alpha-2 country code, or `ZZ` at sea.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn square(&self) -> &Square {
        &self.square
    }

    pub fn nearest_place(&self) -> &str {
        &self.nearest_place
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn words(&self) -> &ThreeWordAddress {
        &self.words
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn map(&self) -> &Url {
        &self.map
    }
}

impl fmt::Display for SquaredAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{country='{}',square={},nearestPlace='{}',coordinates={},words={},language={},map={}}}",
            self.country,
            self.square,
            self.nearest_place,
            self.coordinates,
            self.words,
            self.language,
            self.map
        )
    }
}

/// All seven fields are required; `build` names the first one missing in
/// the order country, square, nearestPlace, coordinates, words, language, map.
#[derive(Debug, Default, Clone)]
pub struct SquaredAddressBuilder {
    country: Option<String>,
    square: Option<Square>,
    nearest_place: Option<String>,
    coordinates: Option<Coordinates>,
    words: Option<ThreeWordAddress>,
    language: Option<Language>,
    map: Option<Url>,
}

impl SquaredAddressBuilder {
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn square(mut self, square: Square) -> Self {
        self.square = Some(square);
        self
    }

    pub fn square_corners(self, northeast: Coordinates, southwest: Coordinates) -> Self {
        self.square(Square::new(northeast, southwest))
    }

    pub fn nearest_place(mut self, nearest_place: impl Into<String>) -> Self {
        self.nearest_place = Some(nearest_place.into());
        self
    }

    pub fn coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn coordinates_at(self, latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(self.coordinates(Coordinates::from_f64(latitude, longitude)?))
    }

    pub fn words(mut self, words: ThreeWordAddress) -> Self {
        self.words = Some(words);
        self
    }

    /// Accepts any notation `ThreeWordAddress::parse` does.
    pub fn words_text(self, words: &str) -> Result<Self, ValidationError> {
        Ok(self.words(ThreeWordAddress::parse(words)?))
    }

    /// Exactly three words, each validated.
    pub fn words_list<S: AsRef<str>>(self, words: &[S]) -> Result<Self, ValidationError> {
        Ok(self.words(ThreeWordAddress::from_list(words)?))
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn map(mut self, map: Url) -> Self {
        self.map = Some(map);
        self
    }

    pub fn map_link(self, link: &str) -> Result<Self, ValidationError> {
        let map = Url::parse(link).map_err(|e| ValidationError::InvalidUrl(format!("{link}: {e}")))?;
        Ok(self.map(map))
    }

    pub fn build(self) -> Result<SquaredAddress, ValidationError> {
        Ok(SquaredAddress {
            country: self.country.ok_or(ValidationError::MissingField("country"))?,
            square: self.square.ok_or(ValidationError::MissingField("square"))?,
            nearest_place: self
                .nearest_place
                .ok_or(ValidationError::MissingField("nearestPlace"))?,
            coordinates: self
                .coordinates
                .ok_or(ValidationError::MissingField("coordinates"))?,
            words: self.words.ok_or(ValidationError::MissingField("words"))?,
            language: self.language.ok_or(ValidationError::MissingField("language"))?,
            map: self.map.ok_or(ValidationError::MissingField("map"))?,
        })
    }
}
