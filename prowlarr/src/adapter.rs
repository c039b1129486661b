//! Resource adapter: one generic engine driven by a [`ResourceDefinition`]
//!
//! `read` turns a record into the wire request, `write` turns the server's
//! response back into the record. The server is authoritative: `write`
//! replaces every adapter-owned value instead of merging.

use serde_json::{Map, Value};

use crate::api::ProviderResource;
use crate::codec::{self, CodecError};
use crate::envelope::{Category, Envelope};
use crate::field::{FieldKind, FieldSpec, FieldValue, SENSITIVE_MASK};
use crate::record::Record;

/// Static description of one concrete implementation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceDefinition {
    /// Resource name without the provider prefix, e.g. "download_client_transmission"
    pub type_name: &'static str,
    pub category: Category,
    pub implementation: &'static str,
    pub config_contract: &'static str,
    /// Download clients and indexers carry a protocol constant
    pub protocol: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    pub description: &'static str,
}

impl ResourceDefinition {
    /// Full Terraform type name
    pub fn terraform_type(&self) -> String {
        format!("prowlarr_{}", self.type_name)
    }

    /// Envelope members followed by implementation fields
    pub fn specs(&self) -> impl Iterator<Item = &'static FieldSpec> {
        let envelope = self.category.envelope;
        let fields = self.fields;
        envelope.iter().chain(fields.iter())
    }

    /// Unset envelope members stay unset
    pub fn to_generic(&self, record: &Record) -> Envelope {
        let settings = self
            .category
            .envelope
            .iter()
            .filter_map(|spec| {
                record
                    .value(spec.attribute)
                    .map(|value| (spec.attribute, value.clone()))
            })
            .collect();

        Envelope {
            id: record.id,
            name: record.name.clone(),
            implementation: self.implementation.to_string(),
            config_contract: self.config_contract.to_string(),
            protocol: self.protocol.map(str::to_string),
            tags: record.tags.clone(),
            settings,
        }
    }

    /// Copy the envelope's values onto the record. Implementation and
    /// contract stay whatever the definition says.
    pub fn from_generic(&self, envelope: Envelope, record: &mut Record) {
        record.id = envelope.id;
        record.name = envelope.name;
        record.tags = envelope.tags;
        for spec in self.category.envelope {
            let value = envelope
                .settings
                .get(spec.attribute)
                .cloned()
                .unwrap_or_else(|| FieldValue::zero(spec.kind));
            record.values.insert(spec.attribute, value);
        }
    }

    /// Build the wire request, stamping the constants unconditionally
    pub fn read(&self, record: &Record) -> Result<ProviderResource, CodecError> {
        let envelope = self.to_generic(record);

        let mut extra = Map::new();
        codec::encode_object(&envelope.settings, self.category.envelope, &mut extra)?;
        if let Some(protocol) = envelope.protocol {
            extra.insert("protocol".to_string(), Value::String(protocol));
        }

        Ok(ProviderResource {
            id: envelope.id,
            name: envelope.name,
            implementation: envelope.implementation,
            config_contract: envelope.config_contract,
            tags: envelope.tags.into_iter().collect(),
            fields: codec::encode(&record.values, self.fields)?,
            extra,
        })
    }

    /// Overwrite the record from the server's response. Nothing is
    /// changed when decoding fails.
    pub fn write(&self, record: &mut Record, response: &ProviderResource) -> Result<(), CodecError> {
        let settings = codec::decode_object(&response.extra, self.category.envelope)?;
        let mut values = codec::decode(&response.fields, self.fields)?;

        // The server masks stored secrets; keep what was sent
        for spec in self.fields.iter().filter(|s| s.kind == FieldKind::Sensitive) {
            let masked = FieldValue::Sensitive(SENSITIVE_MASK.to_string());
            if values.get(spec.attribute) == Some(&masked) {
                if let Some(previous) = record.value(spec.attribute) {
                    values.insert(spec.attribute, previous.clone());
                }
            }
        }

        let envelope = Envelope {
            id: response.id,
            name: response.name.clone(),
            implementation: response.implementation.clone(),
            config_contract: response.config_contract.clone(),
            protocol: response
                .extra
                .get("protocol")
                .and_then(Value::as_str)
                .map(str::to_string),
            tags: response.tags.iter().copied().collect(),
            settings,
        };

        record.values = values;
        self.from_generic(envelope, record);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Field;
    use crate::resources::download_clients::TRANSMISSION;
    use crate::resources::applications::LIDARR;
    use crate::resources::notifications::WEBHOOK;
    use serde_json::json;

    fn transmission_record() -> Record {
        Record::new("transmission")
            .with("enable", FieldValue::Bool(true))
            .with("priority", FieldValue::Int(1))
            .with("host", FieldValue::String("transmission".to_string()))
            .with("port", FieldValue::Int(9091))
            .with("url_base", FieldValue::String("/transmission/".to_string()))
            .with("password", FieldValue::Sensitive("pass".to_string()))
            .with("recent_tv_priority", FieldValue::Int(1))
    }

    fn field<'a>(request: &'a ProviderResource, name: &str) -> Option<&'a Field> {
        request.fields.iter().find(|f| f.name == name)
    }

    /// What the server would answer to a request: same body plus an id
    fn echo(mut request: ProviderResource, id: i64) -> ProviderResource {
        request.id = id;
        request
    }

    #[test]
    fn read_stamps_constants() {
        let mut record = transmission_record();
        record.values.insert("priority", FieldValue::Int(0));

        let request = TRANSMISSION.read(&record).unwrap();

        assert_eq!(request.implementation, "Transmission");
        assert_eq!(request.config_contract, "TransmissionSettings");
        assert_eq!(request.extra["protocol"], json!("torrent"));
        assert_eq!(request.extra["enable"], json!(true));
        assert_eq!(request.extra["priority"], json!(0));
        assert_eq!(field(&request, "port").unwrap().value, json!(9091));
        assert!(field(&request, "useSsl").is_none());
    }

    #[test]
    fn webhook_without_method_is_accepted() {
        let record = Record::new("hook")
            .with("on_health_issue", FieldValue::Bool(true))
            .with("url", FieldValue::String("http://hook.local".to_string()));

        let request = WEBHOOK.read(&record).unwrap();

        assert!(field(&request, "method").is_none());
        assert!(request.extra.get("includeHealthWarnings").is_none());
        assert_eq!(request.extra["onHealthIssue"], json!(true));
        assert_eq!(field(&request, "url").unwrap().value, json!("http://hook.local"));
    }

    #[test]
    fn read_emits_sorted_tags() {
        let mut record = transmission_record();
        record.tags = [5, 2, 9].into_iter().collect();

        let request = TRANSMISSION.read(&record).unwrap();
        assert_eq!(request.tags, vec![2, 5, 9]);
    }

    #[test]
    fn write_of_read_is_idempotent() {
        let original = transmission_record();

        let mut record = original.clone();
        TRANSMISSION
            .write(&mut record, &echo(TRANSMISSION.read(&original).unwrap(), 3))
            .unwrap();
        let once = record.clone();

        TRANSMISSION
            .write(&mut record, &echo(TRANSMISSION.read(&once).unwrap(), 3))
            .unwrap();

        assert_eq!(record, once);
        assert_eq!(once.id, 3);
        assert_eq!(once.value("host"), original.value("host"));
        assert_eq!(once.value("tv_directory"), Some(&FieldValue::String(String::new())));
    }

    #[test]
    fn write_overwrites_every_owned_value() {
        let mut record = transmission_record().with("add_paused", FieldValue::Bool(true));

        let response: ProviderResource = serde_json::from_value(json!({
            "id": 7,
            "name": "renamed",
            "enable": false,
            "priority": 2,
            "protocol": "torrent",
            "implementation": "Transmission",
            "configContract": "TransmissionSettings",
            "tags": [],
            "fields": [
                {"name": "host", "value": "other"},
                {"name": "port", "value": 9092}
            ]
        }))
        .unwrap();

        TRANSMISSION.write(&mut record, &response).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.name, "renamed");
        assert_eq!(record.value("enable"), Some(&FieldValue::Bool(false)));
        assert_eq!(record.value("priority"), Some(&FieldValue::Int(2)));
        assert_eq!(record.value("add_paused"), Some(&FieldValue::Bool(false)));
        assert_eq!(record.value("url_base"), Some(&FieldValue::String(String::new())));
        assert_eq!(record.value("port"), Some(&FieldValue::Int(9092)));
    }

    #[test]
    fn write_keeps_sent_secret_when_server_masks_it() {
        let mut record = transmission_record();
        let mut response = echo(TRANSMISSION.read(&record).unwrap(), 3);
        for f in response.fields.iter_mut().filter(|f| f.name == "password") {
            f.value = json!(SENSITIVE_MASK);
        }

        TRANSMISSION.write(&mut record, &response).unwrap();

        assert_eq!(
            record.value("password"),
            Some(&FieldValue::Sensitive("pass".to_string()))
        );
    }

    #[test]
    fn write_failure_leaves_record_untouched() {
        let mut record = transmission_record();
        let before = record.clone();

        let mut response = echo(TRANSMISSION.read(&record).unwrap(), 3);
        for f in response.fields.iter_mut().filter(|f| f.name == "recentTvPriority") {
            f.value = json!(2);
        }

        let err = TRANSMISSION.write(&mut record, &response).unwrap_err();
        assert!(matches!(err, CodecError::FieldValidation { .. }));
        assert_eq!(record, before);
    }

    #[test]
    fn application_envelope_carries_sync_level() {
        let record = Record::new("lidarr")
            .with("sync_level", FieldValue::String("fullSync".to_string()))
            .with("base_url", FieldValue::String("http://lidarr:8686".to_string()))
            .with("sync_categories", FieldValue::IntSet([3040, 3000].into_iter().collect()));

        let request = LIDARR.read(&record).unwrap();

        assert_eq!(request.extra["syncLevel"], json!("fullSync"));
        assert!(request.extra.get("protocol").is_none());
        assert_eq!(field(&request, "syncCategories").unwrap().value, json!([3000, 3040]));

        let bad = record.with("sync_level", FieldValue::String("sometimes".to_string()));
        assert!(matches!(
            LIDARR.read(&bad),
            Err(CodecError::FieldValidation { .. })
        ));
    }

    #[test]
    fn specs_list_envelope_first() {
        let attributes: Vec<_> = TRANSMISSION.specs().map(|s| s.attribute).collect();
        assert_eq!(&attributes[..2], &["enable", "priority"]);
        assert_eq!(attributes.len(), 2 + TRANSMISSION.fields.len());
        assert_eq!(
            TRANSMISSION.terraform_type(),
            "prowlarr_download_client_transmission"
        );
    }
}
