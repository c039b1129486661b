//! Indexer field tables

use crate::adapter::ResourceDefinition;
use crate::envelope::INDEXER;
use crate::field::FieldSpec;

pub const NEWZNAB: ResourceDefinition = ResourceDefinition {
    type_name: "indexer_newznab",
    category: INDEXER,
    implementation: "Newznab",
    config_contract: "NewznabSettings",
    protocol: Some("usenet"),
    description: "Indexer Newznab resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL.").required(),
        FieldSpec::string("api_path", "apiPath", "API path."),
        FieldSpec::sensitive("api_key", "apiKey", "API key."),
        FieldSpec::string(
            "additional_parameters",
            "additionalParameters",
            "Additional parameters.",
        )
        .omit_when_zero(),
    ],
};

pub const TORZNAB: ResourceDefinition = ResourceDefinition {
    type_name: "indexer_torznab",
    category: INDEXER,
    implementation: "Torznab",
    config_contract: "TorznabSettings",
    protocol: Some("torrent"),
    description: "Indexer Torznab resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL.").required(),
        FieldSpec::string("api_path", "apiPath", "API path."),
        FieldSpec::sensitive("api_key", "apiKey", "API key."),
        FieldSpec::string(
            "additional_parameters",
            "additionalParameters",
            "Additional parameters.",
        )
        .omit_when_zero(),
        FieldSpec::int("minimum_seeders", "torrentBaseSettings.appMinimumSeeders", "Minimum seeders."),
    ],
};

pub const ALL: &[ResourceDefinition] = &[NEWZNAB, TORZNAB];
