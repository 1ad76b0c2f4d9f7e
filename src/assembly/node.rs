use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::writing::WritingError;

/// A node of the embedded assembly dialect. Only the tag is structural;
/// everything else, nested nodes included, stays as the JSON attributes
/// the compiler emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YulNode {
    #[serde(rename = "nodeType")]
    pub tag: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl YulNode {
    pub fn new(tag: impl Into<String>) -> YulNode {
        YulNode {
            tag: tag.into(),
            attributes: Map::new(),
        }
    }

    /// Builder used when assembling nodes by hand.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> YulNode {
        self.attributes
            .insert(field.to_string(), value.into());
        self
    }

    /// Pretty-printed JSON form, used in diagnostics.
    pub fn dump(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.tag.clone())
    }

    fn malformed(&self, field: &str) -> WritingError {
        WritingError::MalformedAssembly {
            tag: self
                .tag
                .clone(),
            field: field.to_string(),
            dump: self.dump(),
        }
    }

    pub fn has(&self, field: &str) -> bool {
        !matches!(
            self.attributes
                .get(field),
            None | Some(Value::Null)
        )
    }

    /// A string attribute that must be present.
    pub fn text(&self, field: &str) -> Result<&str, WritingError> {
        self.attributes
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| self.malformed(field))
    }

    /// A nested node that must be present.
    pub fn child(&self, field: &str) -> Result<YulNode, WritingError> {
        self.optional_child(field)?
            .ok_or_else(|| self.malformed(field))
    }

    pub fn optional_child(&self, field: &str) -> Result<Option<YulNode>, WritingError> {
        match self
            .attributes
            .get(field)
        {
            None | Some(Value::Null) => Ok(None),
            Some(value) => YulNode::deserialize(value)
                .map(Some)
                .map_err(|_| self.malformed(field)),
        }
    }

    /// A list of nested nodes; a missing list is empty.
    pub fn children(&self, field: &str) -> Result<Vec<YulNode>, WritingError> {
        match self
            .attributes
            .get(field)
        {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Vec::<YulNode>::deserialize(value).map_err(|_| self.malformed(field)),
        }
    }
}
