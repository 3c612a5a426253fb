//! Conversation message types exchanged with the conversation service.
//!
//! Only the fields the enrichment pipeline routes on are typed. Intents,
//! entities and `output` keep the objects the service sent and expose
//! accessors, and unknown top-level fields (`context`, `input`,
//! `alternate_intents`) land in `extra`, so a response that passes through
//! untouched serializes back to the same JSON document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::workspace::WorkspaceId;

/// An opaque JSON object passed through without interpretation.
pub type JsonObject = Map<String, Value>;

/// A message to send to the conversation service.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRequest {
    /// Workspace (trained model) that should answer.
    pub workspace_id: WorkspaceId,
    /// Dialog state returned by the previous turn, passed back unmodified.
    pub context: JsonObject,
    /// User input, typically `{"text": "..."}`.
    pub input: JsonObject,
}

impl ConversationRequest {
    pub fn new(workspace_id: WorkspaceId, context: JsonObject, input: JsonObject) -> Self {
        Self {
            workspace_id,
            context,
            input,
        }
    }
}

/// Response from the conversation service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,

    /// Detected intents, highest confidence first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<Intent>>,

    /// Extracted entities, in the order the service reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

impl ConversationResponse {
    /// A response carrying only an output text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            output: Some(Output::with_text(text)),
            ..Default::default()
        }
    }

    /// The top-ranked intent, if any.
    pub fn top_intent(&self) -> Option<&Intent> {
        self.intents.as_deref().and_then(<[Intent]>::first)
    }

    /// The first extracted entity, if any.
    pub fn first_entity(&self) -> Option<&Entity> {
        self.entities.as_deref().and_then(<[Entity]>::first)
    }

    /// The output text flattened to one string (lines joined by `\n`).
    pub fn output_text(&self) -> Option<String> {
        self.output.as_ref().and_then(Output::joined_text)
    }

    /// Replaces the first occurrence of `token` in the output text.
    ///
    /// Returns false when there is no output text or it does not contain the token.
    pub fn replace_in_output(&mut self, token: &str, replacement: &str) -> bool {
        self.output
            .as_mut()
            .is_some_and(|output| output.replace_first(token, replacement))
    }
}

/// The `output` section of a response.
///
/// Kept as the object the service sent; only `text` is ever rewritten. A
/// `null` text stays `null` and non-string lines are left alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Output(JsonObject);

impl Output {
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut fields = JsonObject::new();
        fields.insert("text".to_string(), Value::String(text.into()));
        Self(fields)
    }

    /// The raw `text` value, a string or a list of lines.
    pub fn text(&self) -> Option<&Value> {
        self.0.get("text")
    }

    /// The text as one string; string lines are joined by `\n`.
    pub fn joined_text(&self) -> Option<String> {
        match self.text()? {
            Value::String(text) => Some(text.clone()),
            Value::Array(lines) => Some(
                lines
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        }
    }

    /// Replaces the first occurrence of `token`; for line lists, only the first
    /// string line containing it is rewritten.
    pub fn replace_first(&mut self, token: &str, replacement: &str) -> bool {
        match self.0.get_mut("text") {
            Some(Value::String(text)) => replace_first_in(text, token, replacement),
            Some(Value::Array(lines)) => lines.iter_mut().any(|line| match line {
                Value::String(line) => replace_first_in(line, token, replacement),
                _ => false,
            }),
            _ => false,
        }
    }
}

fn replace_first_in(text: &mut String, token: &str, replacement: &str) -> bool {
    match text.find(token) {
        Some(start) => {
            text.replace_range(start..start + token.len(), replacement);
            true
        }
        None => false,
    }
}

/// A classified intent, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intent(JsonObject);

impl Intent {
    pub fn new(intent: impl Into<String>, confidence: f64) -> Self {
        let mut fields = JsonObject::new();
        fields.insert("intent".to_string(), Value::String(intent.into()));
        if let Some(confidence) = Number::from_f64(confidence) {
            fields.insert("confidence".to_string(), Value::Number(confidence));
        }
        Self(fields)
    }

    /// Intent name; `None` when missing or not a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get("intent").and_then(Value::as_str)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.0.get("confidence").and_then(Value::as_f64)
    }
}

/// A value extracted from the user's input, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(JsonObject);

impl Entity {
    pub fn new(entity: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = JsonObject::new();
        fields.insert("entity".to_string(), Value::String(entity.into()));
        fields.insert("value".to_string(), Value::String(value.into()));
        Self(fields)
    }

    /// Entity type, e.g. `country`.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("entity").and_then(Value::as_str)
    }

    /// Matched value; `None` when missing or not a string.
    pub fn value(&self) -> Option<&str> {
        self.0.get("value").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream_payload() -> Value {
        json!({
            "intents": [{"intent": "capital", "confidence": 0.94}],
            "entities": [{"entity": "country", "location": [20, 26], "value": "Poland", "confidence": 1}],
            "input": {"text": "what is the capital of Poland"},
            "output": {
                "text": ["The capital is {capital}."],
                "nodes_visited": ["node_1_1496"],
                "log_messages": []
            },
            "context": {"conversation_id": "c-1", "system": {"dialog_turn_counter": 1}},
            "alternate_intents": false
        })
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let payload = upstream_payload();
        let response: ConversationResponse = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(serde_json::to_value(&response).unwrap(), payload);
    }

    #[test]
    fn absent_and_empty_intents_are_distinguished() {
        let absent: ConversationResponse = serde_json::from_value(json!({"output": {}})).unwrap();
        assert!(absent.intents.is_none());
        assert_eq!(serde_json::to_value(&absent).unwrap(), json!({"output": {}}));

        let empty: ConversationResponse =
            serde_json::from_value(json!({"output": {}, "intents": []})).unwrap();
        assert_eq!(empty.intents, Some(vec![]));
        assert!(empty.top_intent().is_none());
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({"output": {}, "intents": []})
        );
    }

    #[test]
    fn null_output_reads_as_absent() {
        let response: ConversationResponse =
            serde_json::from_value(json!({"output": null})).unwrap();
        assert!(response.output.is_none());
    }

    #[test]
    fn top_intent_and_first_entity() {
        let response: ConversationResponse = serde_json::from_value(upstream_payload()).unwrap();
        assert_eq!(response.top_intent().unwrap().name(), Some("capital"));
        assert_eq!(response.top_intent().unwrap().confidence(), Some(0.94));
        assert_eq!(response.first_entity().unwrap().kind(), Some("country"));
        assert_eq!(response.first_entity().unwrap().value(), Some("Poland"));
    }

    #[test]
    fn replace_first_only_touches_first_occurrence() {
        let mut response = ConversationResponse::with_text("{capital} and {capital}");
        assert!(response.replace_in_output("{capital}", "Warsaw"));
        assert_eq!(response.output_text().unwrap(), "Warsaw and {capital}");
    }

    #[test]
    fn replace_first_on_lines_rewrites_first_matching_line() {
        let mut response: ConversationResponse = serde_json::from_value(json!({
            "output": {"text": ["Hello.", 7, "Members: {countries}", "Again {countries}"]}
        }))
        .unwrap();

        assert!(response.replace_in_output("{countries}", "France "));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"output": {"text": ["Hello.", 7, "Members: France ", "Again {countries}"]}})
        );
    }

    #[test]
    fn numbers_and_missing_fields_are_not_normalized() {
        let payload = json!({
            "intents": [
                {"intent": "greeting", "confidence": 1},
                {"intent": "goodbye"},
                {"confidence": 0.2}
            ],
            "entities": [{"entity": "sys-number", "value": 3}],
            "output": {"text": null}
        });

        let response: ConversationResponse = serde_json::from_value(payload.clone()).unwrap();

        assert_eq!(serde_json::to_value(&response).unwrap(), payload);
        assert_eq!(response.top_intent().unwrap().confidence(), Some(1.0));
        assert_eq!(response.intents.as_ref().unwrap()[2].name(), None);
        assert_eq!(response.first_entity().unwrap().value(), None);
        assert_eq!(response.output_text(), None);
    }

    #[test]
    fn null_text_is_left_alone() {
        let mut response: ConversationResponse =
            serde_json::from_value(json!({"output": {"text": null}})).unwrap();

        assert!(!response.replace_in_output("{capital}", "Warsaw"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"output": {"text": null}})
        );
    }

    #[test]
    fn built_intent_serializes_like_the_service() {
        assert_eq!(
            serde_json::to_value(Intent::new("capital", 0.5)).unwrap(),
            json!({"intent": "capital", "confidence": 0.5})
        );
        assert_eq!(
            serde_json::to_value(Entity::new("country", "Spain")).unwrap(),
            json!({"entity": "country", "value": "Spain"})
        );
    }

    #[test]
    fn replace_without_token_is_a_no_op() {
        let mut response = ConversationResponse::with_text("nothing to see");
        assert!(!response.replace_in_output("{capital}", "Warsaw"));
        assert_eq!(response.output_text().unwrap(), "nothing to see");

        let mut bare = ConversationResponse::default();
        assert!(!bare.replace_in_output("{capital}", "Warsaw"));
        assert!(bare.output.is_none());
    }
}
