//! Download client field tables

use crate::adapter::ResourceDefinition;
use crate::envelope::DOWNLOAD_CLIENT;
use crate::field::FieldSpec;

const LAST_FIRST: &[i64] = &[0, 1];

pub const TRANSMISSION: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_transmission",
    category: DOWNLOAD_CLIENT,
    implementation: "Transmission",
    config_contract: "TransmissionSettings",
    protocol: Some("torrent"),
    description: "Download Client Transmission resource.",
    fields: &[
        FieldSpec::bool("add_paused", "addPaused", "Add paused flag."),
        FieldSpec::bool("use_ssl", "useSsl", "Use SSL flag."),
        FieldSpec::int("port", "port", "Port."),
        FieldSpec::int("recent_tv_priority", "recentTvPriority", "Recent TV priority. `0` Last, `1` First.")
            .one_of_ints(LAST_FIRST),
        FieldSpec::int("older_tv_priority", "olderTvPriority", "Older TV priority. `0` Last, `1` First.")
            .one_of_ints(LAST_FIRST),
        FieldSpec::string("host", "host", "host."),
        FieldSpec::string("url_base", "urlBase", "Base URL."),
        FieldSpec::string("username", "username", "Username."),
        FieldSpec::sensitive("password", "password", "Password."),
        FieldSpec::string("tv_category", "tvCategory", "TV category."),
        FieldSpec::string("tv_directory", "tvDirectory", "TV directory.").omit_when_zero(),
    ],
};

pub const QBITTORRENT: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_qbittorrent",
    category: DOWNLOAD_CLIENT,
    implementation: "QBittorrent",
    config_contract: "QBittorrentSettings",
    protocol: Some("torrent"),
    description: "Download Client qBittorrent resource.",
    fields: &[
        FieldSpec::bool("use_ssl", "useSsl", "Use SSL flag."),
        FieldSpec::bool("sequential_order", "sequentialOrder", "Sequential order flag."),
        FieldSpec::bool("first_and_last", "firstAndLast", "First and last flag."),
        FieldSpec::int("port", "port", "Port."),
        FieldSpec::int("item_priority", "priority", "Priority. `0` Last, `1` First.")
            .one_of_ints(LAST_FIRST),
        FieldSpec::int(
            "initial_state",
            "initialState",
            "Initial state. `0` Start, `1` ForceStart, `2` Pause.",
        )
        .one_of_ints(&[0, 1, 2]),
        FieldSpec::string("host", "host", "host."),
        FieldSpec::string("url_base", "urlBase", "Base URL."),
        FieldSpec::string("username", "username", "Username."),
        FieldSpec::sensitive("password", "password", "Password."),
        FieldSpec::string("category", "category", "Category."),
    ],
};

pub const DELUGE: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_deluge",
    category: DOWNLOAD_CLIENT,
    implementation: "Deluge",
    config_contract: "DelugeSettings",
    protocol: Some("torrent"),
    description: "Download Client Deluge resource.",
    fields: &[
        FieldSpec::bool("add_paused", "addPaused", "Add paused flag."),
        FieldSpec::bool("use_ssl", "useSsl", "Use SSL flag."),
        FieldSpec::int("port", "port", "Port."),
        FieldSpec::int("item_priority", "priority", "Priority. `0` Last, `1` First.")
            .one_of_ints(LAST_FIRST),
        FieldSpec::string("host", "host", "host."),
        FieldSpec::string("url_base", "urlBase", "Base URL."),
        FieldSpec::sensitive("password", "password", "Password."),
        FieldSpec::string("category", "category", "Category."),
    ],
};

pub const TORRENT_BLACKHOLE: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_torrent_blackhole",
    category: DOWNLOAD_CLIENT,
    implementation: "TorrentBlackhole",
    config_contract: "TorrentBlackholeSettings",
    protocol: Some("torrent"),
    description: "Download Client Torrent Blackhole resource.",
    fields: &[
        FieldSpec::bool("save_magnet_files", "saveMagnetFiles", "Save magnet files flag."),
        FieldSpec::string("torrent_folder", "torrentFolder", "Torrent folder.").required(),
        FieldSpec::string(
            "magnet_file_extension",
            "magnetFileExtension",
            "Magnet file extension.",
        ),
    ],
};

pub const SABNZBD: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_sabnzbd",
    category: DOWNLOAD_CLIENT,
    implementation: "Sabnzbd",
    config_contract: "SabnzbdSettings",
    protocol: Some("usenet"),
    description: "Download Client SABnzbd resource.",
    fields: &[
        FieldSpec::bool("use_ssl", "useSsl", "Use SSL flag."),
        FieldSpec::int("port", "port", "Port."),
        FieldSpec::int(
            "item_priority",
            "priority",
            "Priority. `-100` Default, `-2` Paused, `-1` Low, `0` Normal, `1` High, `2` Force.",
        )
        .one_of_ints(&[-100, -2, -1, 0, 1, 2]),
        FieldSpec::string("host", "host", "host."),
        FieldSpec::string("url_base", "urlBase", "Base URL."),
        FieldSpec::sensitive("api_key", "apiKey", "API key.").omit_when_zero(),
        FieldSpec::string("username", "username", "Username.").omit_when_zero(),
        FieldSpec::sensitive("password", "password", "Password.").omit_when_zero(),
        FieldSpec::string("category", "category", "Category."),
    ],
};

pub const NZBGET: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_nzbget",
    category: DOWNLOAD_CLIENT,
    implementation: "Nzbget",
    config_contract: "NzbgetSettings",
    protocol: Some("usenet"),
    description: "Download Client NZBGet resource.",
    fields: &[
        FieldSpec::bool("add_paused", "addPaused", "Add paused flag."),
        FieldSpec::bool("use_ssl", "useSsl", "Use SSL flag."),
        FieldSpec::int("port", "port", "Port."),
        FieldSpec::int(
            "item_priority",
            "priority",
            "Priority. `-100` VeryLow, `-50` Low, `0` Normal, `50` High, `100` VeryHigh, `900` Force.",
        )
        .one_of_ints(&[-100, -50, 0, 50, 100, 900]),
        FieldSpec::string("host", "host", "host."),
        FieldSpec::string("url_base", "urlBase", "Base URL."),
        FieldSpec::string("username", "username", "Username."),
        FieldSpec::sensitive("password", "password", "Password."),
        FieldSpec::string("category", "category", "Category."),
    ],
};

pub const USENET_BLACKHOLE: ResourceDefinition = ResourceDefinition {
    type_name: "download_client_usenet_blackhole",
    category: DOWNLOAD_CLIENT,
    implementation: "UsenetBlackhole",
    config_contract: "UsenetBlackholeSettings",
    protocol: Some("usenet"),
    description: "Download Client Usenet Blackhole resource.",
    fields: &[FieldSpec::string("nzb_folder", "nzbFolder", "NZB folder.").required()],
};

pub const ALL: &[ResourceDefinition] = &[
    TRANSMISSION,
    QBITTORRENT,
    DELUGE,
    TORRENT_BLACKHOLE,
    SABNZBD,
    NZBGET,
    USENET_BLACKHOLE,
];
