//! Query parameters for the two conversion endpoints.
//!
//! Both holders are immutable and add no validation of their own: whatever
//! they reference was already validated when it was built.

use crate::coordinates::Coordinates;
use crate::error::ValidationError;
use crate::language::Language;
use crate::words::ThreeWordAddress;

/// Parameters for `convert-to-3wa`: where, and optionally in which language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordsRequest {
    coordinates: Coordinates,
    language: Option<Language>,
}

/// Earlier name of [`WordsRequest`].
pub type ThreeWordAddressRequest = WordsRequest;

impl WordsRequest {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            language: None,
        }
    }

    pub fn builder() -> WordsRequestBuilder {
        WordsRequestBuilder::default()
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("coordinates", self.coordinates.to_string())];
        if let Some(language) = &self.language {
            pairs.push(("language", language.code().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Default, Clone)]
pub struct WordsRequestBuilder {
    coordinates: Option<Coordinates>,
    language: Option<Language>,
}

impl WordsRequestBuilder {
    pub fn coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn coordinates_at(self, latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(self.coordinates(Coordinates::from_f64(latitude, longitude)?))
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn language_code(self, code: &str) -> Result<Self, ValidationError> {
        Ok(self.language(Language::new(code)?))
    }

    pub fn build(self) -> Result<WordsRequest, ValidationError> {
        let coordinates = self
            .coordinates
            .ok_or(ValidationError::MissingField("coordinates"))?;
        Ok(WordsRequest {
            coordinates,
            language: self.language,
        })
    }
}

/// Parameters for `convert-to-coordinates`: the address to locate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatesRequest {
    words: ThreeWordAddress,
}

impl CoordinatesRequest {
    pub fn new(words: ThreeWordAddress) -> Self {
        Self { words }
    }

    pub fn builder() -> CoordinatesRequestBuilder {
        CoordinatesRequestBuilder::default()
    }

    pub fn words(&self) -> &ThreeWordAddress {
        &self.words
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("words", self.words.to_string())]
    }
}

#[derive(Debug, Default, Clone)]
pub struct CoordinatesRequestBuilder {
    words: Option<ThreeWordAddress>,
}

impl CoordinatesRequestBuilder {
    pub fn words(mut self, words: ThreeWordAddress) -> Self {
        self.words = Some(words);
        self
    }

    pub fn words_text(self, words: &str) -> Result<Self, ValidationError> {
        Ok(self.words(ThreeWordAddress::parse(words)?))
    }

    pub fn words_list<S: AsRef<str>>(self, words: &[S]) -> Result<Self, ValidationError> {
        Ok(self.words(ThreeWordAddress::from_list(words)?))
    }

    pub fn build(self) -> Result<CoordinatesRequest, ValidationError> {
        let words = self.words.ok_or(ValidationError::MissingField("words"))?;
        Ok(CoordinatesRequest { words })
    }
}
