//! Generic envelope model
//!
//! The envelope is the part of a provider-backed resource that every
//! implementation in a category shares: identity, name, tags, the
//! implementation/contract constants and a few category-specific members
//! such as `enable` or `syncLevel`.

use std::collections::BTreeSet;

use crate::codec::FieldValues;
use crate::field::FieldSpec;

/// One of the provider-backed categories on the server
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Category {
    /// Human name used in log lines, e.g. "download client"
    pub name: &'static str,
    /// Terraform type name prefix, e.g. "download_client"
    pub prefix: &'static str,
    pub path: &'static str,
    /// Category-specific envelope members, flattened into the record
    pub envelope: &'static [FieldSpec],
}

pub const DOWNLOAD_CLIENT: Category = Category {
    name: "download client",
    prefix: "download_client",
    path: "/api/v1/downloadclient",
    envelope: &[
        FieldSpec::bool("enable", "enable", "Enable flag."),
        FieldSpec::int("priority", "priority", "Priority."),
    ],
};

pub const APPLICATION: Category = Category {
    name: "application",
    prefix: "application",
    path: "/api/v1/applications",
    envelope: &[FieldSpec::string("sync_level", "syncLevel", "Sync level.")
        .required()
        .one_of_strings(&["addOnly", "disabled", "fullSync"])],
};

pub const NOTIFICATION: Category = Category {
    name: "notification",
    prefix: "notification",
    path: "/api/v1/notification",
    envelope: &[
        FieldSpec::bool("on_health_issue", "onHealthIssue", "On health issue flag."),
        FieldSpec::bool(
            "on_application_update",
            "onApplicationUpdate",
            "On application update flag.",
        ),
        FieldSpec::bool(
            "include_health_warnings",
            "includeHealthWarnings",
            "Include health warnings.",
        ),
    ],
};

pub const INDEXER: Category = Category {
    name: "indexer",
    prefix: "indexer",
    path: "/api/v1/indexer",
    envelope: &[
        FieldSpec::bool("enable", "enable", "Enable flag."),
        FieldSpec::int("priority", "priority", "Priority."),
        FieldSpec::int("app_profile_id", "appProfileId", "Application profile ID.").required(),
    ],
};

/// Generic envelope, the superset record shared within a category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub id: i64,
    pub name: String,
    pub implementation: String,
    pub config_contract: String,
    /// `torrent` or `usenet` for download clients and indexers
    pub protocol: Option<String>,
    pub tags: BTreeSet<i64>,
    /// Category-specific members keyed by attribute name
    pub settings: FieldValues,
}
