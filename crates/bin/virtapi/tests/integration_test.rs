//! End-to-end tests over the sample model shipped in `model/services`.
//!
//! Each test loads the real definition files through the filesystem source,
//! derives the catalog, renders the HTML site and exercises the HTTP layer
//! via `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use virtapi_adapter_docs_html::renderer::HtmlRenderer;
use virtapi_adapter_http_axum::router;
use virtapi_adapter_http_axum::state::AppState;
use virtapi_adapter_source_fs::{FsModelSource, FsSiteWriter};
use virtapi_app::catalog::Catalog;
use virtapi_app::checker::ModelChecker;
use virtapi_app::docs::DocSet;
use virtapi_app::ports::DocRenderer;
use virtapi_app::services::catalog_service::CatalogService;
use virtapi_app::services::publish_service::{PublishService, PublishTarget};
use virtapi_domain::name::Name;

const MODEL_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../model/services");

fn name(s: &str) -> Name {
    s.parse().unwrap()
}

async fn catalog() -> Catalog {
    CatalogService::new(
        FsModelSource::new(MODEL_DIR),
        name("system"),
        ModelChecker::default(),
    )
    .load()
    .await
    .expect("sample model should load")
}

async fn app() -> axum::Router {
    let catalog = catalog().await;
    let site = HtmlRenderer::default()
        .render(&DocSet::build(&catalog))
        .unwrap();
    router::build(AppState::new(catalog, site, ModelChecker::default()))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let resp = app()
        .await
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_load_sample_model_without_violations() {
    let catalog = catalog().await;
    assert_eq!(catalog.model.len(), 10);
    assert!(
        catalog.report.violations.is_empty(),
        "unexpected violations: {:?}",
        catalog.report.violations
    );
}

#[tokio::test]
async fn should_mount_snapshot_restore_below_vms() {
    let catalog = catalog().await;
    let endpoints: Vec<String> = catalog
        .endpoints_for(&name("snapshot"))
        .map(ToString::to_string)
        .collect();
    assert!(endpoints.contains(&"POST /vms/{vm:id}/snapshots/{snapshot:id}/restore".to_owned()));
    assert!(endpoints.contains(&"DELETE /vms/{vm:id}/snapshots/{snapshot:id}".to_owned()));
}

#[tokio::test]
async fn should_summarize_host_add_inputs() {
    let catalog = catalog().await;
    let add = catalog.operation(&name("hosts"), &name("add")).unwrap();

    let summary = add.input_summary();
    let mandatory: Vec<String> = summary.mandatory.iter().map(ToString::to_string).collect();
    let optional: Vec<String> = summary.optional.iter().map(ToString::to_string).collect();
    assert_eq!(mandatory, ["host.address", "host.name"]);
    assert_eq!(
        optional,
        [
            "host.comment",
            "host.display.address",
            "host.override_iptables",
            "host.port",
            "host.power_management.automatic_pm_enabled",
            "host.power_management.enabled",
            "host.power_management.kdump_detection",
            "host.protocol",
            "host.spm.priority",
            "host.power_management.pm_proxies[].type",
        ]
    );
    assert_eq!(summary.alternatives.len(), 2);
    assert_eq!(
        summary.alternatives[0].to_string(),
        "or(mandatory(host.cluster.id), mandatory(host.cluster.name))"
    );
    let inputs: Vec<String> = add.inputs().map(|p| p.name.to_string()).collect();
    assert_eq!(inputs, ["host", "deploy_hosted_engine", "undeploy_hosted_engine"]);

    let ssh = add.signature(&name("using_ssh")).unwrap();
    let ssh_summary = add.signature_summary(ssh);
    let mandatory: Vec<String> = ssh_summary.mandatory.iter().map(ToString::to_string).collect();
    assert_eq!(mandatory, ["host.address", "host.name"]);
    let optional: Vec<String> = ssh_summary.optional.iter().map(ToString::to_string).collect();
    assert!(optional.ends_with(&[
        "host.ssh.authentication_method".to_owned(),
        "host.ssh.fingerprint".to_owned(),
        "host.ssh.port".to_owned(),
        "host.ssh.user.password".to_owned(),
        "host.ssh.user.user_name".to_owned(),
    ]));

    let root_password = add.signature(&name("using_root_password")).unwrap();
    let mandatory: Vec<String> = add
        .signature_summary(root_password)
        .mandatory
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(mandatory, ["host.address", "host.name", "host.root_password"]);
}

#[tokio::test]
async fn should_carry_snapshot_annotations() {
    let catalog = catalog().await;
    let remove = catalog.operation(&name("snapshot"), &name("remove")).unwrap();
    let all_content = remove.parameter(&name("all_content")).unwrap();
    assert_eq!(all_content.doc.metadata.since.as_deref(), Some("4.2"));
    assert_eq!(all_content.doc.example_requests().len(), 1);

    let restore = catalog.operation(&name("snapshot"), &name("restore")).unwrap();
    assert_eq!(restore.doc.metadata.authors, ["Daniel Erez <derez@redhat.com>"]);
    assert_eq!(restore.doc.metadata.date.as_deref(), Some("14 Sep 2016"));
    assert!(restore.doc.metadata.since.is_none());
    let optional: Vec<String> = restore
        .input_summary()
        .optional
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        optional,
        ["restore_memory", "disks[].id", "disks[].image_id"]
    );
}

#[tokio::test]
async fn should_keep_or_group_as_alternative() {
    let catalog = catalog().await;
    let add = catalog.operation(&name("vms"), &name("add")).unwrap();
    let summary = add.input_summary();
    assert_eq!(summary.alternatives.len(), 1);
    assert!(summary.mandatory.iter().all(|p| p.to_string() != "vm.cluster.id"));
}

// ---------------------------------------------------------------------------
// Documentation site
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_publish_tagged_site_into_directory() {
    let catalog = catalog().await;
    let site = HtmlRenderer::new("oVirt Engine API")
        .render(&DocSet::build(&catalog))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let service = PublishService::new(FsSiteWriter::new(dir.path()));
    let target = PublishTarget::parse("tagged", Some("4.2.0")).unwrap();
    let written = service.publish(&target, &site).await.unwrap();
    assert_eq!(written, 11);

    let index = tokio::fs::read_to_string(dir.path().join("4.2.0/index.html"))
        .await
        .unwrap();
    assert!(index.contains("<h2>Storage</h2>"));
    assert!(index.contains("href=\"services/snapshot.html\""));

    let snapshot = tokio::fs::read_to_string(dir.path().join("4.2.0/services/snapshot.html"))
        .await
        .unwrap();
    assert!(snapshot.contains("POST /vms/{vm:id}/snapshots/{snapshot:id}/restore"));
    assert!(snapshot.contains("2016-09-14"));
    assert!(snapshot.contains("2017-02-02"));
}

#[tokio::test]
async fn should_keep_master_and_tagged_sites_side_by_side() {
    let catalog = catalog().await;
    let site = HtmlRenderer::default()
        .render(&DocSet::build(&catalog))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let service = PublishService::new(FsSiteWriter::new(dir.path()));
    service.publish(&PublishTarget::Master, &site).await.unwrap();
    service
        .publish(&PublishTarget::tagged("4.1.9").unwrap(), &site)
        .await
        .unwrap();

    assert!(dir.path().join("master/index.html").is_file());
    assert!(dir.path().join("4.1.9/services/hosts.html").is_file());
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn should_resolve_prefixed_example_request() {
    let (status, json) = get_json(
        "/api/resolve?method=POST&path=/ovirt-engine/api/vms/123/snapshots/456/restore",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], "snapshot");
    assert_eq!(json["operation"], "restore");
    assert_eq!(json["path"], "/vms/{vm:id}/snapshots/{snapshot:id}/restore");
}

#[tokio::test]
async fn should_return_404_for_unresolvable_request() {
    let (status, _) = get("/api/resolve?method=DELETE&path=/hosts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_list_services_with_documentation_summary() {
    let (status, json) = get_json("/api/services").await;
    assert_eq!(status, StatusCode::OK);
    let services = json.as_array().unwrap();
    let hosts = services.iter().find(|s| s["name"] == "hosts").unwrap();
    assert_eq!(hosts["summary"], "A service that manages hosts.");
    let snapshot = services.iter().find(|s| s["name"] == "snapshot").unwrap();
    assert!(snapshot.get("summary").is_none());
}

#[tokio::test]
async fn should_describe_operation_with_follow_parameter() {
    let (status, json) = get_json("/api/services/hosts/operations/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["follow"], true);
    let parameters = json["parameters"].as_array().unwrap();
    assert!(parameters.iter().any(|p| p["name"] == "follow"));
}

#[tokio::test]
async fn should_serve_rendered_documentation() {
    let (status, body) = get("/docs/services/snapshot.html").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("SnapshotService"));
}
