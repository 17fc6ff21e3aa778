//! Manifest data types

use serde::{Deserialize, Serialize};

/// One plugin in the manifest feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub guid: String,
    pub name: String,
    pub overview: String,
    pub description: String,
    pub owner: String,
    pub category: String,
    pub image_url: String,
    pub versions: Vec<ReleaseEntry>,
}

/// A published release of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEntry {
    pub version: String,
    pub changelog: String,
    /// Jellyfin ABI the release was built against, e.g. "10.10.3.0"
    pub target_abi: String,
    pub source_url: String,
    /// Lowercase hex MD5 of the release zip
    pub checksum: String,
    /// RFC 3339, whole seconds
    pub timestamp: String,
}

/// `client_payload` of the dispatch event announcing a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePayload {
    pub plugin_name: String,
    pub version: String,
    pub changelog: String,
    pub target_abi: String,
    pub source_url: String,
    pub checksum: String,
    pub timestamp: String,
}

impl ReleasePayload {
    pub fn to_entry(&self) -> ReleaseEntry {
        ReleaseEntry {
            version: self.version.clone(),
            changelog: self.changelog.clone(),
            target_abi: self.target_abi.clone(),
            source_url: self.source_url.clone(),
            checksum: self.checksum.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// Reads a release payload either bare or wrapped in the dispatch event
/// document GitHub hands to the receiving workflow (`$GITHUB_EVENT_PATH`).
pub fn parse_payload(json: &str) -> Result<ReleasePayload, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PayloadDocument {
        Event { client_payload: ReleasePayload },
        Bare(ReleasePayload),
    }

    Ok(match serde_json::from_str(json)? {
        PayloadDocument::Event { client_payload } => client_payload,
        PayloadDocument::Bare(payload) => payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn release_entry_uses_manifest_field_names() {
        let entry = ReleaseEntry {
            version: "1.10.10.5".to_string(),
            changelog: "- fixes".to_string(),
            target_abi: "10.10.3.0".to_string(),
            source_url: "https://example.com/plugin.zip".to_string(),
            checksum: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            timestamp: "2024-11-02T10:00:00Z".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "version": "1.10.10.5",
                "changelog": "- fixes",
                "targetAbi": "10.10.3.0",
                "sourceUrl": "https://example.com/plugin.zip",
                "checksum": "d41d8cd98f00b204e9800998ecf8427e",
                "timestamp": "2024-11-02T10:00:00Z"
            })
        );
    }

    #[test]
    fn payload_parses_dispatch_body() {
        let payload: ReleasePayload = serde_json::from_value(json!({
            "pluginName": "Intro Skipper",
            "version": "1.10.10.5",
            "changelog": "",
            "targetAbi": "10.10.3.0",
            "sourceUrl": "https://example.com/plugin.zip",
            "checksum": "d41d8cd98f00b204e9800998ecf8427e",
            "timestamp": "2024-11-02T10:00:00Z"
        }))
        .unwrap();

        let entry = payload.to_entry();
        assert_eq!(payload.plugin_name, "Intro Skipper");
        assert_eq!(entry.target_abi, "10.10.3.0");
        assert_eq!(entry.version, payload.version);
    }

    #[test]
    fn parse_payload_accepts_event_document_and_bare_payload() {
        let bare = json!({
            "pluginName": "Intro Skipper",
            "version": "1.10.10.5",
            "changelog": "",
            "targetAbi": "10.10.3.0",
            "sourceUrl": "https://example.com/plugin.zip",
            "checksum": "d41d8cd98f00b204e9800998ecf8427e",
            "timestamp": "2024-11-02T10:00:00Z"
        });
        let event = json!({
            "action": "update-manifest-node",
            "client_payload": bare.clone(),
            "repository": { "full_name": "intro-skipper/manifest" }
        });

        let from_bare = parse_payload(&bare.to_string()).unwrap();
        let from_event = parse_payload(&event.to_string()).unwrap();

        assert_eq!(from_bare, from_event);
        assert_eq!(from_event.version, "1.10.10.5");
    }

    #[test]
    fn parse_payload_rejects_incomplete_document() {
        assert!(parse_payload(r#"{"client_payload": {"version": "1.0.0"}}"#).is_err());
    }
}
