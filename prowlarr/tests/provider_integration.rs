//! Provider-level flows across categories and tags

mod common;

use common::{data_source, provider_config, resource};
use mockito::{Matcher, Server};
use prowlarr::ProwlarrProvider;
use serde_json::json;
use tfplug::context::Context;
use tfplug::data_source::ReadDataSourceRequest;
use tfplug::provider::{Provider, ProviderSchemaRequest};
use tfplug::resource::{
    CreateResourceRequest, ImportResourceStateRequest, ResourceSchemaRequest,
    ValidateResourceConfigRequest,
};
use tfplug::types::{AttributePath, Dynamic, DynamicValue};
use tokio_test::assert_ok;

fn lidarr_plan() -> DynamicValue {
    let mut plan = DynamicValue::object();
    let _ = plan.set_string(&AttributePath::new("name"), "Lidarr".to_string());
    let _ = plan.set_string(&AttributePath::new("sync_level"), "addOnly".to_string());
    let _ = plan.set_string(&AttributePath::new("base_url"), "http://localhost:8686".to_string());
    let _ = plan.set_string(&AttributePath::new("prowlarr_url"), "http://localhost:9696".to_string());
    let _ = plan.set_string(&AttributePath::new("api_key"), "APIKey".to_string());
    let _ = plan.set_list(
        &AttributePath::new("sync_categories"),
        vec![Dynamic::Number(3010.0), Dynamic::Number(3030.0)],
    );
    plan
}

#[tokio::test(flavor = "multi_thread")]
async fn provider_configures_from_block() {
    let mut provider = ProwlarrProvider::new();

    let schema = provider
        .schema(Context::new(), ProviderSchemaRequest)
        .await
        .schema;
    assert!(schema.attribute("api_key").unwrap().sensitive);

    let response = provider
        .configure(Context::new(), provider_config("http://localhost:9696"))
        .await;
    assert!(response.diagnostics.is_empty());
    assert!(response.provider_data.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn application_create_stamps_constants() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/applications")
        .match_body(Matcher::PartialJson(json!({
            "implementation": "Lidarr",
            "configContract": "LidarrSettings",
            "syncLevel": "addOnly",
            "fields": [
                { "name": "baseUrl", "value": "http://localhost:8686" },
                { "name": "prowlarrUrl", "value": "http://localhost:9696" },
                { "name": "apiKey", "value": "APIKey" },
                { "name": "syncCategories", "value": [3010, 3030] }
            ]
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 4,
                "name": "Lidarr",
                "syncLevel": "addOnly",
                "implementation": "Lidarr",
                "configContract": "LidarrSettings",
                "tags": [],
                "fields": [
                    { "name": "baseUrl", "value": "http://localhost:8686" },
                    { "name": "prowlarrUrl", "value": "http://localhost:9696" },
                    { "name": "apiKey", "value": "********" },
                    { "name": "syncCategories", "value": [3030, 3010] }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let resource = resource(&server.url(), "prowlarr_application_lidarr").await;
    let response = resource
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "prowlarr_application_lidarr".to_string(),
                planned_state: lidarr_plan(),
                config: lidarr_plan(),
            },
        )
        .await;

    mock.assert_async().await;
    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

    let state = &response.new_state;
    assert_eq!(assert_ok!(state.get_i64(&AttributePath::new("id"))), 4);
    assert_eq!(
        assert_ok!(state.get_string(&AttributePath::new("api_key"))),
        "APIKey"
    );
    assert_eq!(
        assert_ok!(state.get_list(&AttributePath::new("sync_categories"))),
        vec![Dynamic::Number(3010.0), Dynamic::Number(3030.0)]
    );
    assert_eq!(
        assert_ok!(state.get_list(&AttributePath::new("tags"))),
        Vec::<Dynamic>::new()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn application_validate_checks_sync_level() {
    let resource = resource("http://localhost:9696", "prowlarr_application_lidarr").await;

    let mut config = lidarr_plan();
    let _ = config.set_string(&AttributePath::new("sync_level"), "sometimes".to_string());

    let response = resource
        .validate(
            Context::new(),
            ValidateResourceConfigRequest {
                type_name: "prowlarr_application_lidarr".to_string(),
                config,
            },
        )
        .await;

    assert_eq!(response.diagnostics.len(), 1);
    assert_eq!(
        response.diagnostics[0].attribute,
        Some(AttributePath::new("sync_level"))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn indexer_import_reads_nested_wire_names() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v1/indexer/12")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 12,
                "name": "Torznab",
                "enable": true,
                "priority": 25,
                "appProfileId": 1,
                "protocol": "torrent",
                "implementation": "Torznab",
                "configContract": "TorznabSettings",
                "tags": [2],
                "fields": [
                    { "name": "baseUrl", "value": "https://feed.example" },
                    { "name": "apiPath", "value": "/api" },
                    { "name": "apiKey", "value": "********" },
                    { "name": "torrentBaseSettings.appMinimumSeeders", "value": 5 },
                    { "name": "torrentBaseSettings.seedRatio" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let resource = resource(&server.url(), "prowlarr_indexer_torznab").await;
    let response = resource
        .import_support()
        .unwrap()
        .import_state(
            Context::new(),
            ImportResourceStateRequest {
                type_name: "prowlarr_indexer_torznab".to_string(),
                id: "12".to_string(),
            },
        )
        .await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = &response.imported_resources[0].state;
    assert_eq!(
        assert_ok!(state.get_i64(&AttributePath::new("minimum_seeders"))),
        5
    );
    assert_eq!(
        assert_ok!(state.get_i64(&AttributePath::new("app_profile_id"))),
        1
    );
    assert_eq!(
        assert_ok!(state.get_string(&AttributePath::new("additional_parameters"))),
        ""
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn every_resource_schema_builds() {
    let provider = ProwlarrProvider::new();

    for (name, factory) in provider.resources() {
        let resource = factory();
        let schema = resource
            .schema(Context::new(), ResourceSchemaRequest)
            .await
            .schema;
        assert!(schema.attribute("id").unwrap().computed, "{}", name);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn tag_resource_and_data_source_agree() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/v1/tag")
        .match_body(Matcher::Json(json!({ "label": "tag_datasource" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":6,"label":"tag_datasource"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/tag")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":6,"label":"tag_datasource"}]"#)
        .create_async()
        .await;

    let tag = resource(&server.url(), "prowlarr_tag").await;
    let mut plan = DynamicValue::object();
    let _ = plan.set_string(&AttributePath::new("label"), "tag_datasource".to_string());

    let created = tag
        .create(
            Context::new(),
            CreateResourceRequest {
                type_name: "prowlarr_tag".to_string(),
                planned_state: plan.clone(),
                config: plan.clone(),
            },
        )
        .await;
    assert!(created.diagnostics.is_empty());

    let lookup = data_source(&server.url(), "prowlarr_tag").await;
    let read = lookup
        .read(
            Context::new(),
            ReadDataSourceRequest {
                type_name: "prowlarr_tag".to_string(),
                config: plan,
            },
        )
        .await;
    assert!(read.diagnostics.is_empty());

    assert_eq!(
        assert_ok!(created.new_state.get_i64(&AttributePath::new("id"))),
        assert_ok!(read.state.get_i64(&AttributePath::new("id")))
    );
}
