//! Preset records and the built-in preset set.
//!
//! A preset is `{id, name, adjustments}`. Collections are exchanged as a JSON
//! array; loading is tolerant per record so one damaged entry never hides the
//! rest.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::adjust::params::{Adjustments, HslBandParams, HslParams};
use crate::error::{CoreError, Result};
use crate::grading::curves::{CurveState, Point};

/// A named adjustment snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub adjustments: Adjustments,
}

impl Preset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, adjustments: Adjustments) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            adjustments,
        }
    }
}

/// Presets that ship with the editor. Ids are stable.
pub fn builtin_presets() -> Vec<Preset> {
    let base = Adjustments::default();
    vec![
        Preset::new(
            "natural",
            "Natural",
            Adjustments {
                contrast: 10.0,
                saturation: 5.0,
                ..base.clone()
            },
        ),
        Preset::new(
            "vivid",
            "Vivid",
            Adjustments {
                exposure: 0.2,
                contrast: 20.0,
                saturation: 30.0,
                vibrance: 10.0,
                ..base.clone()
            },
        ),
        Preset::new(
            "bw-high-contrast",
            "B&W High Contrast",
            Adjustments {
                saturation: -100.0,
                contrast: 40.0,
                exposure: 0.1,
                ..base.clone()
            },
        ),
        Preset::new(
            "matte",
            "Matte",
            Adjustments {
                contrast: -20.0,
                blacks: 20.0,
                curve: CurveState {
                    master: vec![
                        Point::new(0.0, 0.1),
                        Point::new(0.25, 0.25),
                        Point::new(0.5, 0.5),
                        Point::new(0.75, 0.75),
                        Point::new(1.0, 0.9),
                    ],
                    ..CurveState::default()
                },
                ..base.clone()
            },
        ),
        Preset::new(
            "vintage-warm",
            "Vintage Warm",
            Adjustments {
                temperature: 20.0,
                tint: 5.0,
                contrast: 10.0,
                vignette: 20.0,
                ..base.clone()
            },
        ),
        Preset::new(
            "cool-shadows",
            "Cool Shadows",
            Adjustments {
                temperature: -15.0,
                hsl: HslParams {
                    blue: HslBandParams {
                        hue: 0.0,
                        saturation: 10.0,
                        luminance: -10.0,
                    },
                    ..HslParams::default()
                },
                ..base
            },
        ),
    ]
}

/// Parse a JSON array of preset records.
///
/// Records that fail to decode are skipped with a warning. Input that is not
/// a JSON array at all is an error.
pub fn parse_presets(json: &str) -> Result<Vec<Preset>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(records) = value else {
        return Err(CoreError::PresetFormat);
    };

    let mut presets = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Preset>(record) {
            Ok(preset) => presets.push(preset),
            Err(e) => warn!("skipping malformed preset record {index}: {e}"),
        }
    }
    Ok(presets)
}

/// Serialize presets as a JSON array.
pub fn presets_to_json(presets: &[Preset]) -> Result<String> {
    Ok(serde_json::to_string_pretty(presets)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), 6);
        for (i, a) in presets.iter().enumerate() {
            for b in &presets[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_builtin_values_stay_in_range() {
        for preset in builtin_presets() {
            assert_eq!(preset.adjustments.sanitized(), preset.adjustments, "{}", preset.id);
        }
    }

    #[test]
    fn test_parse_skips_corrupt_record() {
        let json = r#"[
            {"id": "a", "name": "A", "adjustments": {"contrast": 12}},
            {"id": "b", "name": 42},
            "not a preset",
            {"id": "c", "name": "C", "adjustments": {}}
        ]"#;
        let presets = parse_presets(json).unwrap();
        let ids: Vec<&str> = presets.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(presets[0].adjustments.contrast, 12.0);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_presets(r#"{"id": "a"}"#),
            Err(CoreError::PresetFormat)
        ));
        assert!(matches!(parse_presets("[oops"), Err(CoreError::Json(_))));
    }
}
