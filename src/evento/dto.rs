use super::model::{parse_local_date_time, Event, EventId, EventKind};
use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: EventId,
    pub nome: String,
    pub descricao: String,
    pub tipo: EventKind,
    pub local: String,
    #[serde(rename = "dataInicio", deserialize_with = "deserialize_date_time")]
    pub data_inicio: NaiveDateTime,
    #[serde(rename = "dataFinal", deserialize_with = "deserialize_date_time")]
    pub data_final: NaiveDateTime,
    #[serde(rename = "linkEvento", default, deserialize_with = "deserialize_optional_str")]
    pub link_evento: Option<String>,
    #[serde(rename = "linkImagem", default, deserialize_with = "deserialize_optional_str")]
    pub link_imagem: Option<String>,
}

impl EventResponse {
    pub fn to_model(self) -> Event {
        Event {
            id: self.id,
            name: self.nome,
            description: self.descricao,
            kind: self.tipo,
            location: self.local,
            starts_at: self.data_inicio,
            ends_at: self.data_final,
            event_link: self.link_evento,
            image_link: self.link_imagem,
        }
    }
}

/// Body the backend sends along a rejected request
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "deserialize_optional_str")]
    pub message: Option<String>,
}

fn deserialize_date_time<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => parse_local_date_time(&s).map_err(de::Error::custom),
        unknown => Err(de::Error::custom(format!(
            "expected a date-time string, found {}",
            unknown
        ))),
    }
}

// Blank strings count as missing
fn deserialize_optional_str<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}
