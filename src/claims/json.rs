//! Cheap structural checks on JSON text that run before it is parsed, plus
//! decoding of footers that may or may not hold JSON.

use crate::errors::PasetoError;

use serde_json::Value as JsonValue;

/// Shape of an unparsed JSON document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonShape {
  /// Nesting depth counting the innermost value, so `1` is depth 1 and
  /// `{"a":1}` is depth 2.
  pub depth: usize,
  /// Number of object keys anywhere in the document.
  pub keys: usize,
}

/// Scans `json` once, tracking brackets and `:` separators outside of string
/// literals. The input does not need to be valid JSON.
#[must_use]
pub fn json_shape(json: &str) -> JsonShape {
  let mut in_string = false;
  let mut escaped = false;
  let mut open = 0_usize;
  let mut max_open = 0_usize;
  let mut keys = 0_usize;

  for byte in json.bytes() {
    if in_string {
      if escaped {
        escaped = false;
      } else if byte == b'\\' {
        escaped = true;
      } else if byte == b'"' {
        in_string = false;
      }
      continue;
    }

    match byte {
      b'"' => in_string = true,
      b'{' | b'[' => {
        open += 1;
        max_open = max_open.max(open);
      }
      b'}' | b']' => open = open.saturating_sub(1),
      b':' => keys += 1,
      _ => {}
    }
  }

  JsonShape {
    depth: max_open + 1,
    keys,
  }
}

#[must_use]
pub fn json_depth(json: &str) -> usize {
  json_shape(json).depth
}

#[must_use]
pub fn count_keys(json: &str) -> usize {
  json_shape(json).keys
}

/// Rejects JSON text deeper than `max_depth` or holding more than `max_keys`
/// keys. A limit of `0` disables that check.
pub fn assert_json_size(json: &str, max_depth: usize, max_keys: usize) -> Result<(), PasetoError> {
  if max_depth == 0 && max_keys == 0 {
    return Ok(());
  }

  let shape = json_shape(json);
  if max_depth > 0 && shape.depth > max_depth {
    return Err(PasetoError::PayloadInvalid(format!(
      "JSON is nested too deeply ({} > {})",
      shape.depth, max_depth
    )));
  }
  if max_keys > 0 && shape.keys > max_keys {
    return Err(PasetoError::PayloadInvalid(format!(
      "JSON has too many keys ({} > {})",
      shape.keys, max_keys
    )));
  }

  Ok(())
}

/// True for text that should be treated as a JSON object footer.
#[must_use]
pub fn looks_like_object(text: &str) -> bool {
  text.starts_with('{') && text.ends_with('}')
}

/// A footer as handed back after decoding a token.
#[derive(Clone, Debug, PartialEq)]
pub enum FooterContent {
  /// The footer was a JSON object.
  Json(JsonValue),
  /// The footer was UTF-8 text that is not a JSON object.
  Text(String),
  /// The footer was not UTF-8.
  Bytes(Vec<u8>),
}

impl FooterContent {
  /// Interprets raw footer bytes, preferring JSON, then text.
  #[must_use]
  pub fn from_bytes(footer: &[u8]) -> Self {
    match std::str::from_utf8(footer) {
      Ok(text) => {
        if looks_like_object(text) {
          if let Ok(value) = serde_json::from_str::<JsonValue>(text) {
            return FooterContent::Json(value);
          }
        }
        FooterContent::Text(text.to_owned())
      }
      Err(_) => FooterContent::Bytes(footer.to_vec()),
    }
  }

  /// The `kid` footer claim, if this footer is JSON and holds one.
  #[must_use]
  pub fn kid(&self) -> Option<&str> {
    match self {
      FooterContent::Json(value) => value.get("kid").and_then(JsonValue::as_str),
      _ => None,
    }
  }
}
