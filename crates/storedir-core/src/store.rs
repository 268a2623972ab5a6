//! The establishment record and its display helpers.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};

const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Characters left unescaped by a URI component encoder.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One establishment in the catalog.
///
/// Serialized with the data file's field names. Absent or `null` text
/// fields read as empty strings; records are never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Per-session identifier, assigned by the loader when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "razon_social", default, deserialize_with = "null_as_empty")]
    pub legal_name: String,
    #[serde(rename = "marca_tienda", default, deserialize_with = "null_as_empty")]
    pub brand_name: String,
    #[serde(rename = "ubicacion", default, deserialize_with = "null_as_empty")]
    pub address_line: String,
    #[serde(rename = "colonia", default, deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(rename = "municipio", default, deserialize_with = "null_as_empty")]
    pub municipality: String,
    /// State or province.
    #[serde(rename = "estado", default, deserialize_with = "null_as_empty")]
    pub region: String,
    /// Exactly five digits, or empty when unknown.
    #[serde(rename = "cp", default, deserialize_with = "null_as_empty")]
    pub postal_code: String,
    #[serde(rename = "rfc", default, deserialize_with = "null_as_empty")]
    pub tax_id: String,
    #[serde(rename = "tienda_ubicacion", default, deserialize_with = "null_as_empty")]
    pub location_label: String,
    #[serde(rename = "top", default, deserialize_with = "null_as_false")]
    pub is_featured: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl Store {
    /// Brand name when present, otherwise the legal name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.brand_name.is_empty() {
            &self.legal_name
        } else {
            &self.brand_name
        }
    }

    /// `"{address}, {neighborhood}"`, without the neighborhood part when empty.
    #[must_use]
    pub fn full_address(&self) -> String {
        if self.neighborhood.is_empty() {
            self.address_line.clone()
        } else {
            format!("{}, {}", self.address_line, self.neighborhood)
        }
    }

    /// `"{municipality}, {region}"`.
    #[must_use]
    pub fn location_text(&self) -> String {
        format!("{}, {}", self.municipality, self.region)
    }

    /// External map-search link for this store.
    #[must_use]
    pub fn map_url(&self) -> String {
        let query = format!(
            "{} {} {}",
            self.display_name(),
            self.full_address(),
            self.location_text()
        );
        format!(
            "{MAP_SEARCH_URL}{}",
            utf8_percent_encode(&query, URI_COMPONENT)
        )
    }

    /// Identity fields searched when address search is off.
    pub(crate) fn identity_fields(&self) -> [&str; 3] {
        [
            self.legal_name.as_str(),
            self.brand_name.as_str(),
            self.tax_id.as_str(),
        ]
    }

    /// Address fields searched when address search is on.
    pub(crate) fn address_fields(&self) -> [&str; 5] {
        [
            self.location_label.as_str(),
            self.address_line.as_str(),
            self.neighborhood.as_str(),
            self.municipality.as_str(),
            self.region.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Store {
        Store {
            legal_name: "ZAPATERIA EL SOL SA DE CV".to_string(),
            brand_name: "El Sol".to_string(),
            address_line: "AV. JUAREZ 12".to_string(),
            neighborhood: "CENTRO".to_string(),
            municipality: "MONTERREY".to_string(),
            region: "NUEVO LEON".to_string(),
            ..Store::default()
        }
    }

    #[test]
    fn display_name_prefers_brand() {
        assert_eq!(sample().display_name(), "El Sol");
    }

    #[test]
    fn display_name_falls_back_to_legal_name() {
        let mut store = sample();
        store.brand_name.clear();
        assert_eq!(store.display_name(), "ZAPATERIA EL SOL SA DE CV");
    }

    #[test]
    fn full_address_omits_empty_neighborhood() {
        let mut store = sample();
        assert_eq!(store.full_address(), "AV. JUAREZ 12, CENTRO");
        store.neighborhood.clear();
        assert_eq!(store.full_address(), "AV. JUAREZ 12");
    }

    #[test]
    fn map_url_encodes_query_like_uri_component() {
        let url = sample().map_url();
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=\
             El%20Sol%20AV.%20JUAREZ%2012%2C%20CENTRO%20MONTERREY%2C%20NUEVO%20LEON"
        );
    }

    #[test]
    fn deserializes_data_file_shape_with_nulls_and_missing_fields() {
        let json = r#"{
            "razon_social": "FARMACIA AZUL",
            "ubicacion": "CALLE 5",
            "municipio": "MERIDA",
            "estado": "YUCATAN",
            "rfc": null,
            "cp": "97000"
        }"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.legal_name, "FARMACIA AZUL");
        assert_eq!(store.tax_id, "");
        assert_eq!(store.brand_name, "");
        assert!(!store.is_featured);
        assert!(store.id.is_none());
    }

    #[test]
    fn serializes_with_data_file_names() {
        let mut store = sample();
        store.is_featured = true;
        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(value["razon_social"], "ZAPATERIA EL SOL SA DE CV");
        assert_eq!(value["estado"], "NUEVO LEON");
        assert_eq!(value["top"], true);
        assert!(value.get("id").is_none());
    }
}
