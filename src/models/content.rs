use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An object carrying a string `text` field. Other fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TextBlock {
    pub text: String,
}

// Only JSON objects qualify; a derived impl would also accept `["text"]`.
impl TryFrom<Map<String, Value>> for TextBlock {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        match map.get("text") {
            Some(Value::String(text)) => Ok(Self { text: text.clone() }),
            _ => Err("object has no string `text` field".to_string()),
        }
    }
}

/// One element of a content sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Block(TextBlock),
    /// Anything else (images, tool-use blocks, numbers...). Contributes no text.
    Unrecognized(Value),
}

/// Progress delta or result payload as emitted by the agent runtime.
///
/// The runtime sends either a bare string, a single `{"text": ...}` object,
/// or a list mixing both. Other shapes are kept but carry no text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Block(TextBlock),
    Sequence(Vec<ContentItem>),
    Unrecognized(Value),
}

impl Default for Content {
    fn default() -> Self {
        Content::Sequence(Vec::new())
    }
}

impl ContentItem {
    fn fragment(&self) -> Option<&str> {
        match self {
            ContentItem::Text(text) => Some(text),
            ContentItem::Block(block) => Some(&block.text),
            ContentItem::Unrecognized(_) => None,
        }
    }
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn block(text: impl Into<String>) -> Self {
        Content::Block(TextBlock { text: text.into() })
    }

    /// Fold every extractable text fragment into one trimmed line.
    ///
    /// Fragments are trimmed, blank ones dropped, and the rest joined with
    /// single spaces. Returns an empty string when nothing is extractable.
    pub fn normalize(&self) -> String {
        match self {
            Content::Text(text) => text.trim().to_string(),
            Content::Block(block) => block.text.trim().to_string(),
            Content::Sequence(items) => items
                .iter()
                .filter_map(ContentItem::fragment)
                .map(str::trim)
                .filter(|fragment| !fragment.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Content::Unrecognized(_) => String::new(),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::text(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Content {
        serde_json::from_value(value).expect("content should deserialize")
    }

    #[test]
    fn test_normalize_each_shape() {
        assert_eq!(parse(json!("hello")).normalize(), "hello");
        assert_eq!(parse(json!({"text": "hello"})).normalize(), "hello");
        assert_eq!(
            parse(json!(["a", {"text": "b"}, "c"])).normalize(),
            "a b c"
        );
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(Content::text("  padded \n").normalize(), "padded");
        assert_eq!(
            parse(json!([" a ", "", {"text": "  "}, "b"])).normalize(),
            "a b"
        );
    }

    #[test]
    fn test_unrecognized_items_contribute_nothing() {
        assert_eq!(parse(json!([])).normalize(), "");
        assert_eq!(
            parse(json!([42, {"type": "image"}, {"text": 7}, null])).normalize(),
            ""
        );
        assert_eq!(parse(json!({"type": "tool_use", "id": "x"})).normalize(), "");
        assert_eq!(parse(json!(3.5)).normalize(), "");
        assert_eq!(
            parse(json!([{"type": "image"}, "kept"])).normalize(),
            "kept"
        );
    }

    #[test]
    fn test_block_with_extra_fields() {
        let content = parse(json!({"type": "text", "text": "50% done"}));
        assert_eq!(content, Content::block("50% done"));
        assert_eq!(content.normalize(), "50% done");
    }

    #[test]
    fn test_nested_sequence_is_unrecognized() {
        let content = parse(json!([["inner"], "outer"]));
        assert_eq!(content.normalize(), "outer");
        assert_eq!(parse(json!(["only"])).normalize(), "only");
    }
}
