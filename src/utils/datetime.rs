//! Utilidades de fecha y hora
//!
//! El servidor trabaja con fechas locales de India (UTC+5:30) sin offset.
//! Este módulo centraliza el reloj de India y el parseo flexible de fechas.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Offset de India respecto a UTC, en segundos (+05:30)
pub const IST_OFFSET_SECS: i64 = 19_800;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Convierte un instante UTC a la hora de pared de India
pub fn to_india_wall_clock(instant: DateTime<Utc>) -> NaiveDateTime {
    instant.naive_utc() + Duration::seconds(IST_OFFSET_SECS)
}

/// Hora actual en India, independiente de la zona de la máquina
pub fn now_in_india() -> NaiveDateTime {
    to_india_wall_clock(Utc::now())
}

/// Fecha de hoy en India
pub fn today_in_india() -> NaiveDate {
    now_in_india().date()
}

/// Parsea una fecha/hora local; los valores con offset (RFC3339) se llevan a hora de India
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| to_india_wall_clock(dt.with_timezone(&Utc)))
}

/// Parsea una fecha `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Formato de fecha/hora enviado al servidor
pub fn format_wire(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// Formato legible para la consola
pub fn format_display(value: &NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// Serde para `NaiveDateTime` con parseo tolerante
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wire(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_local_datetime(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid local date-time '{}'", raw)))
    }

    /// Variante para campos opcionales
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => serializer.serialize_str(&super::super::format_wire(v)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                None => Ok(None),
                Some(s) if s.trim().is_empty() => Ok(None),
                Some(s) => super::super::parse_local_datetime(&s)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid local date-time '{}'", s))),
            }
        }
    }
}
