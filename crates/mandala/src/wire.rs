//! Request/response shapes exchanged with a transport layer.
//!
//! A client posts `{ "word": ..., "colors": [...] }` and receives
//! `{ "paths": [{ "id", "d", "transform" }], "colors": { id: color } }`, where `d` is SVG
//! path data and `transform` an SVG `rotate(angle, cx, cy)` about the canvas center.
//! Enable the `serde` feature to (de)serialize these types.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::layout::generator::{Mandala, MandalaGenerator};
use crate::layout::PathRecord;
use crate::palette::{ColorToken, Palette};

/// Incoming generation request. Both fields are required; they are optional here so a
/// missing field surfaces as [`Error::MissingWord`] / [`Error::MissingColors`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub word: Option<String>,
    pub colors: Option<Vec<ColorToken>>,
}

impl GenerationRequest {
    pub fn new(word: impl Into<String>, colors: Vec<ColorToken>) -> Self {
        Self {
            word: Some(word.into()),
            colors: Some(colors),
        }
    }

    /// Checks both fields, returning the seed word and palette.
    ///
    /// A blank word counts as missing. The word is not trimmed: the seed is exactly what
    /// the client sent.
    pub fn validate(&self) -> Result<(&str, Palette)> {
        let word = match self.word.as_deref() {
            Some(w) if !w.trim().is_empty() => w,
            _ => return Err(Error::MissingWord),
        };
        let colors = match &self.colors {
            Some(c) if !c.is_empty() => c.clone(),
            _ => return Err(Error::MissingColors),
        };
        Ok((word, Palette::new(colors)?))
    }
}

/// One path as sent to a renderer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirePath {
    pub id: String,
    pub d: String,
    pub transform: String,
}

impl From<&PathRecord> for WirePath {
    fn from(record: &PathRecord) -> Self {
        Self {
            id: record.id.to_string(),
            d: record.geometry.svg_path_data(),
            transform: record.rotation.svg_transform(),
        }
    }
}

/// Generated mandala in renderer-facing form.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub paths: Vec<WirePath>,
    pub colors: BTreeMap<String, ColorToken>,
}

impl From<&Mandala> for GenerationResponse {
    fn from(mandala: &Mandala) -> Self {
        Self {
            paths: mandala.paths.iter().map(WirePath::from).collect(),
            colors: mandala
                .colors
                .iter()
                .map(|(id, color)| (id.to_string(), color.clone()))
                .collect(),
        }
    }
}

/// Error body returned alongside a client error.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Validate `request` and generate its mandala with the reference parameters.
pub fn handle_generation_request(request: &GenerationRequest) -> Result<GenerationResponse> {
    handle_generation_request_with(&MandalaGenerator::default(), request)
}

/// Like [`handle_generation_request`] with a caller-supplied generator.
pub fn handle_generation_request_with(
    generator: &MandalaGenerator,
    request: &GenerationRequest,
) -> Result<GenerationResponse> {
    let (word, palette) = request.validate().inspect_err(|e| {
        warn!("Rejected generation request: {e}.");
    })?;
    let mandala = generator.generate(word, &palette);
    Ok(GenerationResponse::from(&mandala))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb() -> Vec<ColorToken> {
        vec!["#FF0000".into(), "#00FF00".into(), "#0000FF".into()]
    }

    #[test]
    fn missing_fields_are_client_errors() {
        let no_word = GenerationRequest {
            word: None,
            colors: Some(rgb()),
        };
        let blank_word = GenerationRequest::new("   ", rgb());
        let no_colors = GenerationRequest {
            word: Some("luna".into()),
            colors: None,
        };
        let empty_colors = GenerationRequest::new("luna", Vec::new());

        for (request, expected) in [
            (no_word, "seed word"),
            (blank_word, "seed word"),
            (no_colors, "palette"),
            (empty_colors, "palette"),
        ] {
            let err = handle_generation_request(&request).unwrap_err();
            assert!(err.is_client_error());
            assert!(
                ErrorResponse::from(&err).error.contains(expected),
                "{err} should mention {expected}"
            );
        }
    }

    #[test]
    fn response_matches_reference_strings() {
        let response = handle_generation_request(&GenerationRequest::new("luna", rgb())).unwrap();
        assert_eq!(response.paths.len(), 36);
        assert_eq!(response.colors.len(), 36);

        let first = &response.paths[0];
        assert_eq!(first.id, "path-0-0-0");
        assert_eq!(first.transform, "rotate(0, 150, 150)");
        assert!(first.d.starts_with("M 150,150 L 190,150 Q "));
        assert!(first.d.ends_with(" Z"));

        let last = response.paths.last().unwrap();
        assert_eq!(last.id, "path-2-1-5");
        assert_eq!(last.transform, "rotate(300, 150, 150)");
        assert_eq!(response.colors["path-2-1-5"], "#FF0000");
        assert_eq!(response.colors["path-0-1-0"], "#00FF00");
    }

    #[test]
    fn responses_are_reproducible() {
        let request = GenerationRequest::new("Vicente", rgb());
        let a = handle_generation_request(&request).unwrap();
        let b = handle_generation_request(&request).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn word_is_not_trimmed() {
        let padded = handle_generation_request(&GenerationRequest::new(" luna", rgb())).unwrap();
        let plain = handle_generation_request(&GenerationRequest::new("luna", rgb())).unwrap();
        assert_ne!(padded, plain);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_shapes_match_the_protocol() {
        let request: GenerationRequest =
            serde_json::from_str(r##"{"word":"luna","colors":["#FF0000","#00FF00","#0000FF"]}"##)
                .unwrap();
        let response = handle_generation_request(&request).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["paths"][0]["id"], "path-0-0-0");
        assert_eq!(json["paths"][0]["transform"], "rotate(0, 150, 150)");
        assert_eq!(json["colors"]["path-0-0-0"], "#FF0000");

        let missing: GenerationRequest = serde_json::from_str(r#"{"word":"luna"}"#).unwrap();
        assert!(matches!(
            handle_generation_request(&missing),
            Err(Error::MissingColors)
        ));
    }
}
