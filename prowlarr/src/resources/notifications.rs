//! Notification field tables

use crate::adapter::ResourceDefinition;
use crate::envelope::NOTIFICATION;
use crate::field::FieldSpec;

pub const APPRISE: ResourceDefinition = ResourceDefinition {
    type_name: "notification_apprise",
    category: NOTIFICATION,
    implementation: "Apprise",
    config_contract: "AppriseSettings",
    protocol: None,
    description: "Notification Apprise resource.",
    fields: &[
        FieldSpec::string("base_url", "baseUrl", "Base URL."),
        FieldSpec::string("stateless_urls", "statelessUrls", "Comma separated stateless URLs.")
            .omit_when_zero(),
        FieldSpec::string("auth_username", "authUsername", "AuthUsername.").omit_when_zero(),
        FieldSpec::sensitive("auth_password", "authPassword", "AuthPassword.").omit_when_zero(),
        FieldSpec::sensitive("configuration_key", "configurationKey", "ConfigurationKey.")
            .omit_when_zero(),
        FieldSpec::string_set("field_tags", "tags", "Tags and emojis."),
    ],
};

pub const WEBHOOK: ResourceDefinition = ResourceDefinition {
    type_name: "notification_webhook",
    category: NOTIFICATION,
    implementation: "Webhook",
    config_contract: "WebhookSettings",
    protocol: None,
    description: "Notification Webhook resource.",
    fields: &[
        FieldSpec::int("method", "method", "Method. `1` POST, `2` PUT.").one_of_ints(&[1, 2]),
        FieldSpec::string("url", "url", "URL.").required(),
        FieldSpec::string("username", "username", "Username."),
        FieldSpec::sensitive("password", "password", "Password."),
    ],
};

pub const GOTIFY: ResourceDefinition = ResourceDefinition {
    type_name: "notification_gotify",
    category: NOTIFICATION,
    implementation: "Gotify",
    config_contract: "GotifySettings",
    protocol: None,
    description: "Notification Gotify resource.",
    fields: &[
        FieldSpec::int("priority", "priority", "Priority. `0` Min, `2` Low, `5` Normal, `8` High.")
            .one_of_ints(&[0, 2, 5, 8]),
        FieldSpec::string("server", "server", "Server.").required(),
        FieldSpec::sensitive("app_token", "appToken", "App token.").required(),
    ],
};

pub const PUSHOVER: ResourceDefinition = ResourceDefinition {
    type_name: "notification_pushover",
    category: NOTIFICATION,
    implementation: "Pushover",
    config_contract: "PushoverSettings",
    protocol: None,
    description: "Notification Pushover resource.",
    fields: &[
        FieldSpec::int(
            "priority",
            "priority",
            "Priority. `-2` Silent, `-1` Quiet, `0` Normal, `1` High, `2` Emergency.",
        )
        .one_of_ints(&[-2, -1, 0, 1, 2]),
        FieldSpec::int("retry", "retry", "Retry."),
        FieldSpec::int("expire", "expire", "Expire."),
        FieldSpec::sensitive("api_key", "apiKey", "API key.").required(),
        FieldSpec::sensitive("user_key", "userKey", "User key.").required(),
        FieldSpec::string("sound", "sound", "Sound.").omit_when_zero(),
        FieldSpec::string_set("devices", "devices", "List of devices."),
    ],
};

pub const ALL: &[ResourceDefinition] = &[APPRISE, WEBHOOK, GOTIFY, PUSHOVER];
