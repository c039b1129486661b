//! Application field tables

use crate::adapter::ResourceDefinition;
use crate::envelope::APPLICATION;
use crate::field::FieldSpec;

pub const LIDARR: ResourceDefinition = ResourceDefinition {
    type_name: "application_lidarr",
    category: APPLICATION,
    implementation: "Lidarr",
    config_contract: "LidarrSettings",
    protocol: None,
    description: "Application Lidarr resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL.").required(),
        FieldSpec::string("prowlarr_url", "prowlarrUrl", "Prowlarr URL.").required(),
        FieldSpec::sensitive("api_key", "apiKey", "API key.").required(),
        FieldSpec::int_set("sync_categories", "syncCategories", "Sync categories."),
    ],
};

pub const RADARR: ResourceDefinition = ResourceDefinition {
    type_name: "application_radarr",
    category: APPLICATION,
    implementation: "Radarr",
    config_contract: "RadarrSettings",
    protocol: None,
    description: "Application Radarr resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL.").required(),
        FieldSpec::string("prowlarr_url", "prowlarrUrl", "Prowlarr URL.").required(),
        FieldSpec::sensitive("api_key", "apiKey", "API key.").required(),
        FieldSpec::int_set("sync_categories", "syncCategories", "Sync categories."),
    ],
};

pub const READARR: ResourceDefinition = ResourceDefinition {
    type_name: "application_readarr",
    category: APPLICATION,
    implementation: "Readarr",
    config_contract: "ReadarrSettings",
    protocol: None,
    description: "Application Readarr resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL.").required(),
        FieldSpec::string("prowlarr_url", "prowlarrUrl", "Prowlarr URL.").required(),
        FieldSpec::sensitive("api_key", "apiKey", "API key.").required(),
        FieldSpec::int_set("sync_categories", "syncCategories", "Sync categories."),
    ],
};

pub const SONARR: ResourceDefinition = ResourceDefinition {
    type_name: "application_sonarr",
    category: APPLICATION,
    implementation: "Sonarr",
    config_contract: "SonarrSettings",
    protocol: None,
    description: "Application Sonarr resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL.").required(),
        FieldSpec::string("prowlarr_url", "prowlarrUrl", "Prowlarr URL.").required(),
        FieldSpec::sensitive("api_key", "apiKey", "API key.").required(),
        FieldSpec::int_set("sync_categories", "syncCategories", "Sync categories."),
        FieldSpec::int_set(
            "anime_sync_categories",
            "animeSyncCategories",
            "Anime sync categories.",
        ),
    ],
};

pub const ALL: &[ResourceDefinition] = &[LIDARR, RADARR, READARR, SONARR];
