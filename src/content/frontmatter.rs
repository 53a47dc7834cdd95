//! Front-matter parsing and serialization

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::date::parse_calendar_date;
use super::error::Malformed;

/// Scalars written where text is expected (`title: 1984`, `tags: [go, 1.21]`)
/// are kept as their textual form
struct ScalarText;

impl<'de> serde::de::Visitor<'de> for ScalarText {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }
}

/// One list element read through `ScalarText`
struct Scalar(Option<String>);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarText).map(Scalar)
    }
}

/// Text fields may be written as bare numbers or booleans
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarText)
}

/// Custom deserializer that handles both a single scalar and a list of scalars
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(vec![value])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(Scalar(item)) = seq.next_element::<Scalar>()? {
                vec.extend(item);
            }
            Ok(vec)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Header syntax a content file was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFormat {
    /// `---` delimited YAML
    Yaml,
    /// `+++` delimited TOML
    Toml,
}

impl HeaderFormat {
    fn delimiter(self) -> &'static str {
        match self {
            HeaderFormat::Yaml => "---",
            HeaderFormat::Toml => "+++",
        }
    }
}

/// Front-matter data from a content file, as declared by its author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<String>,
    /// Hugo's spelling of `updated`, kept under its own key
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lastmod: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub draft: bool,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "string_or_vec", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    /// Additional custom fields, in declaration order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), Malformed> {
        let (format, header, body) = split_header(content)?;

        let value = match format {
            HeaderFormat::Yaml => {
                if header.trim().is_empty() {
                    serde_yaml::Value::Null
                } else {
                    serde_yaml::from_str::<serde_yaml::Value>(header)
                        .map_err(|e| Malformed::InvalidHeader(e.to_string()))?
                }
            }
            HeaderFormat::Toml => {
                let table = toml::from_str::<toml::Table>(header)
                    .map_err(|e| Malformed::InvalidHeader(e.to_string()))?;
                toml_to_yaml(toml::Value::Table(table))
            }
        };

        let fm = match value {
            serde_yaml::Value::Null => FrontMatter::default(),
            serde_yaml::Value::Mapping(_) => serde_yaml::from_value::<FrontMatter>(value)
                .map_err(|e| Malformed::InvalidHeader(e.to_string()))?,
            _ => {
                return Err(Malformed::InvalidHeader(
                    "expected a mapping of keys to values".to_string(),
                ))
            }
        };

        Ok((fm, body))
    }

    /// The declared title, if it has any visible text
    pub fn required_title(&self) -> Result<&str, Malformed> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(title),
            _ => Err(Malformed::MissingTitle),
        }
    }

    /// Parse the date field into a calendar date
    pub fn parse_date(&self) -> Result<Option<NaiveDate>, Malformed> {
        parse_date_field("date", self.date.as_deref())
    }

    /// Parse the updated field into a calendar date
    pub fn parse_updated(&self) -> Result<Option<NaiveDate>, Malformed> {
        parse_date_field("updated", self.updated.as_deref())
    }

    /// Parse the lastmod field into a calendar date
    pub fn parse_lastmod(&self) -> Result<Option<NaiveDate>, Malformed> {
        parse_date_field("lastmod", self.lastmod.as_deref())
    }

    /// Serialize to the YAML mapping that sits between the delimiters
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Render a complete content file from this header and a body
    pub fn render(&self, body: &str) -> Result<String, serde_yaml::Error> {
        let yaml = self.to_yaml()?;
        let mut out = String::with_capacity(yaml.len() + body.len() + 10);
        out.push_str("---\n");
        out.push_str(&yaml);
        if !yaml.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("---\n");
        if !body.is_empty() {
            out.push('\n');
            out.push_str(body);
        }
        Ok(out)
    }
}

fn parse_date_field(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDate>, Malformed> {
    match value {
        None => Ok(None),
        Some(raw) => parse_calendar_date(raw)
            .map(Some)
            .ok_or_else(|| Malformed::InvalidDate {
                field,
                value: raw.to_string(),
            }),
    }
}

/// Split a file into its header format, raw header text and body
fn split_header(content: &str) -> Result<(HeaderFormat, &str, &str), Malformed> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.trim_start_matches(['\n', '\r']);

    let mut lines = content.split_inclusive('\n');
    let first = lines.next().unwrap_or("");
    let format = match first.trim_end() {
        "---" => HeaderFormat::Yaml,
        "+++" => HeaderFormat::Toml,
        _ => return Err(Malformed::MissingHeader),
    };
    let delimiter = format.delimiter();

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == delimiter {
            let header = &content[header_start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Ok((format, header, body));
        }
        offset += line.len();
    }

    Err(Malformed::UnclosedHeader(delimiter))
}

/// Normalize a TOML header into the YAML value model
fn toml_to_yaml(value: toml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}
