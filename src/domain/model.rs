use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Domain,
    Email,
    Ip,
    Username,
}

impl IdentifierKind {
    /// Key under which the identifier is echoed back in a [`LookupResponse`].
    pub fn field_name(&self) -> &'static str {
        match self {
            IdentifierKind::Domain => "domain",
            IdentifierKind::Email => "email",
            IdentifierKind::Ip => "ip",
            IdentifierKind::Username => "username",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// What a single provider adapter produced for one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// Live data from the provider.
    Success(Value),
    /// No data; the provider failed or had nothing to say.
    Unavailable,
    /// A hardcoded stand-in shaped like a real response.
    MockSubstituted(Value),
}

impl ProviderOutcome {
    pub fn success<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => ProviderOutcome::Success(value),
            Err(e) => {
                tracing::warn!("failed to encode provider payload: {}", e);
                ProviderOutcome::Unavailable
            }
        }
    }

    pub fn mock<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => ProviderOutcome::MockSubstituted(value),
            Err(e) => {
                tracing::warn!("failed to encode mock payload: {}", e);
                ProviderOutcome::Unavailable
            }
        }
    }

    /// Live payload that carries nothing (`null`, `[]`, `{}`, ...) counts as no data.
    pub fn from_payload(payload: Value) -> Self {
        if is_truthy(&payload) {
            ProviderOutcome::Success(payload)
        } else {
            ProviderOutcome::Unavailable
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ProviderOutcome::Success(value) | ProviderOutcome::MockSubstituted(value) => Some(value),
            ProviderOutcome::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderOutcome::Unavailable)
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, ProviderOutcome::MockSubstituted(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            ProviderOutcome::Success(_) => "success",
            ProviderOutcome::Unavailable => "unavailable",
            ProviderOutcome::MockSubstituted(_) => "mock",
        }
    }
}

/// Loose truthiness: `null`, `false`, zero, `""`, `[]` and `{}` are empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// How an unavailable provider shows up in the results object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The key is left out.
    Optional,
    /// The key stays, valued `null`.
    Always,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderEntry {
    pub name: &'static str,
    pub presence: Presence,
    pub outcome: ProviderOutcome,
}

/// Provider outcomes in invocation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    entries: Vec<ProviderEntry>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, presence: Presence, outcome: ProviderOutcome) {
        self.entries.push(ProviderEntry {
            name,
            presence,
            outcome,
        });
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn outcome(&self, name: &str) -> Option<&ProviderOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.outcome)
    }

    /// Whether `name` will be emitted as a key of the results object.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.name == name && entry.is_emitted())
    }
}

impl ProviderEntry {
    fn is_emitted(&self) -> bool {
        !self.outcome.is_unavailable() || self.presence == Presence::Always
    }
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let emitted: Vec<&ProviderEntry> = self.entries.iter().filter(|e| e.is_emitted()).collect();
        let mut map = serializer.serialize_map(Some(emitted.len()))?;
        for entry in emitted {
            map.serialize_entry(entry.name, &entry.outcome.data())?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResponse {
    pub kind: IdentifierKind,
    pub identifier: String,
    pub results: AggregateResult,
}

impl Serialize for LookupResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.field_name(), &self.identifier)?;
        map.serialize_entry("results", &self.results)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsRecordType {
    A,
    Aaaa,
    Mx,
    Txt,
    Ns,
    Cname,
}

impl DnsRecordType {
    pub const ALL: [DnsRecordType; 6] = [
        DnsRecordType::A,
        DnsRecordType::Aaaa,
        DnsRecordType::Mx,
        DnsRecordType::Txt,
        DnsRecordType::Ns,
        DnsRecordType::Cname,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DnsRecordType::A => "A",
            DnsRecordType::Aaaa => "AAAA",
            DnsRecordType::Mx => "MX",
            DnsRecordType::Txt => "TXT",
            DnsRecordType::Ns => "NS",
            DnsRecordType::Cname => "CNAME",
        }
    }
}
