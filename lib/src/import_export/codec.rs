use crate::config::Config;
use crate::error::Result;
use crate::models::bookmark::Bookmark;
use crate::utils;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Serialization scheme for a saved bookmark list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Format named by a file extension, if it names one
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn codec(self, pretty: bool) -> Box<dyn BookmarkCodec> {
        match self {
            Format::Json => Box::new(JsonCodec { pretty }),
            Format::Yaml => Box::new(YamlCodec),
        }
    }
}

/// Trait for turning a bookmark list into a single blob and back.
///
/// Decoding stops at an untyped value: shape checks happen afterwards in
/// [`crate::import_export::validate_import`].
pub trait BookmarkCodec {
    fn encode(&self, bookmarks: &[Bookmark]) -> Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> Result<Value>;
}

pub struct JsonCodec {
    pub pretty: bool,
}

impl BookmarkCodec for JsonCodec {
    fn encode(&self, bookmarks: &[Bookmark]) -> Result<Vec<u8>> {
        let mut out = if self.pretty {
            serde_json::to_vec_pretty(bookmarks)?
        } else {
            serde_json::to_vec(bookmarks)?
        };
        out.push(b'\n');
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

pub struct YamlCodec;

impl BookmarkCodec for YamlCodec {
    fn encode(&self, bookmarks: &[Bookmark]) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(bookmarks)?.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        Ok(serde_yaml::from_slice(bytes)?)
    }
}

/// Pick a codec from the path's extension, falling back to the configured
/// format when the extension names none.
pub fn codec_for_path(path: &Path, config: &Config) -> Box<dyn BookmarkCodec> {
    let format = utils::extension_of(path)
        .and_then(|ext| Format::from_extension(&ext))
        .unwrap_or(config.format);
    format.codec(config.pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample() -> Vec<Bookmark> {
        vec![
            Bookmark::new("Bookmark #1").with("data", "xxxxx"),
            Bookmark::new("Bookmark #2").with("pos", json!({"spine": 2, "frac": 0.5})),
        ]
    }

    #[rstest]
    #[case("saved.json", Format::Yaml, Format::Json)]
    #[case("saved.YAML", Format::Json, Format::Yaml)]
    #[case("saved.yml", Format::Json, Format::Yaml)]
    #[case("saved.pickle", Format::Yaml, Format::Yaml)]
    #[case("saved", Format::Json, Format::Json)]
    fn test_codec_selection(
        #[case] path: &str,
        #[case] fallback: Format,
        #[case] expected: Format,
    ) {
        let config = Config {
            format: fallback,
            ..Config::default()
        };
        let chosen = utils::extension_of(Path::new(path))
            .and_then(|ext| Format::from_extension(&ext))
            .unwrap_or(config.format);
        assert_eq!(chosen, expected);

        // Whatever codec is picked must read back what it wrote
        let codec = codec_for_path(Path::new(path), &config);
        let bytes = codec.encode(&sample()).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), serde_json::to_value(sample()).unwrap());
    }

    #[test]
    fn test_json_compact_is_single_line() {
        let bytes = JsonCodec { pretty: false }.encode(&sample()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("[{"));
    }

    #[test]
    fn test_yaml_decodes_plain_document() {
        let doc = b"- title: A\n  pos: 3\n- title: B\n";
        let value = YamlCodec.decode(doc).unwrap();
        assert_eq!(value, json!([{"title": "A", "pos": 3}, {"title": "B"}]));
    }

    #[test]
    fn test_json_decode_error() {
        let err = JsonCodec { pretty: true }.decode(b"[{\"title\": ").unwrap_err();
        assert!(matches!(err, crate::error::EditorError::Json(_)));
    }
}
