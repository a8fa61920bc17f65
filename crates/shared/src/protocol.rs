use serde::{Deserialize, Deserializer, Serialize};

/// Multipart field carrying an uploaded email file.
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying pasted email text.
pub const TEXT_FIELD: &str = "texto";

/// Success body of `POST /api/process`.
///
/// Fields the backend leaves out or sends as `null` decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categoria: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resposta: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub texto_original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
