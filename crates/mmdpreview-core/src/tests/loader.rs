use crate::loader::*;
use crate::{IconRecord, PackDescriptor, PackLoadError};
use futures::executor::block_on;
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

const AWS_PACK: &str =
    r#"{"prefix":"aws","icons":{"lambda":{"width":48,"height":48,"body":"<path/>"}}}"#;

#[derive(Default)]
struct MapTransport {
    routes: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<String>>,
}

impl MapTransport {
    fn route(mut self, url: &str, response: HttpResponse) -> Self {
        self.routes.insert(url.to_string(), response);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl PackTransport for MapTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| format!("connection refused: {url}"))
    }
}

/// Redirects `/hop/<n>` to `/hop/<n - 1>` and serves the pack at `/hop/0`.
struct ChainTransport;

impl PackTransport for ChainTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, String> {
        let n = url
            .rsplit('/')
            .next()
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or("bad url")?;
        if n == 0 {
            Ok(HttpResponse::ok(AWS_PACK))
        } else {
            Ok(HttpResponse::redirect(302, format!("{}", n - 1)))
        }
    }
}

#[test]
fn redirect_chains_resolve_to_the_same_document() {
    let direct = fetch_document(&ChainTransport, "https://packs.example/hop/0").unwrap();
    for depth in 1..=MAX_REDIRECTS {
        let url = format!("https://packs.example/hop/{depth}");
        assert_eq!(fetch_document(&ChainTransport, &url).unwrap(), direct);
    }
}

#[test]
fn redirect_chains_longer_than_the_bound_fail() {
    let url = format!("https://packs.example/hop/{}", MAX_REDIRECTS + 1);
    let err = fetch_document(&ChainTransport, &url).unwrap_err();
    assert!(err.contains("too many redirects"), "{err}");
}

#[test]
fn redirect_location_is_resolved_against_the_current_url() {
    let transport = MapTransport::default()
        .route(
            "https://unpkg.com/pack/icons.json",
            HttpResponse::redirect(301, "/pack@1.2.0/icons.json"),
        )
        .route(
            "https://unpkg.com/pack@1.2.0/icons.json",
            HttpResponse::redirect(302, "https://cdn.example/icons.json"),
        )
        .route("https://cdn.example/icons.json", HttpResponse::ok(AWS_PACK));

    let doc = fetch_document(&transport, "https://unpkg.com/pack/icons.json").unwrap();
    assert_eq!(doc.prefix, "aws");
    assert_eq!(
        transport.requests(),
        vec![
            "https://unpkg.com/pack/icons.json",
            "https://unpkg.com/pack@1.2.0/icons.json",
            "https://cdn.example/icons.json",
        ]
    );
}

#[test]
fn fetch_rejects_error_statuses_bad_json_and_bare_redirects() {
    let transport = MapTransport::default()
        .route(
            "https://h.example/404.json",
            HttpResponse {
                status: 404,
                location: None,
                body: "not found".to_string(),
            },
        )
        .route("https://h.example/bad.json", HttpResponse::ok("<html>"))
        .route(
            "https://h.example/bare.json",
            HttpResponse {
                status: 302,
                location: None,
                body: String::new(),
            },
        );

    let err = fetch_document(&transport, "https://h.example/404.json").unwrap_err();
    assert!(err.contains("HTTP 404"), "{err}");
    assert!(fetch_document(&transport, "https://h.example/bad.json").is_err());
    let err = fetch_document(&transport, "https://h.example/bare.json").unwrap_err();
    assert!(err.contains("Location"), "{err}");
    let err = fetch_document(&transport, "https://h.example/down.json").unwrap_err();
    assert!(err.contains("connection refused"), "{err}");
}

#[test]
fn local_pack_loads_into_a_single_loaded_pack() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("aws-icons.json"), AWS_PACK).unwrap();

    let loader = PackLoader::new()
        .with_transport(Arc::new(MapTransport::default()))
        .with_workspace_root(Some(tmp.path().to_string_lossy().into_owned()));
    let report = block_on(loader.load(&[PackDescriptor::new(
        "aws",
        "${workspaceFolder}/aws-icons.json",
    )]));

    assert!(report.warnings.is_empty());
    assert_eq!(report.packs.len(), 1);
    assert_eq!(report.packs[0].name, "aws");
    assert_eq!(
        report.packs[0].icons.get("lambda"),
        Some(&IconRecord::new(48.0, 48.0, "<path/>"))
    );
}

#[test]
fn failed_descriptors_become_warnings_and_order_is_kept() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("aws-icons.json"), AWS_PACK).unwrap();
    fs::write(tmp.path().join("invalid.json"), "{not json").unwrap();
    let root = tmp.path().to_string_lossy().into_owned();

    let transport = MapTransport::default()
        .route("https://packs.example/k8s.json", HttpResponse::ok(AWS_PACK))
        .route(
            "https://packs.example/gone.json",
            HttpResponse {
                status: 500,
                location: None,
                body: String::new(),
            },
        );
    let loader = PackLoader::new()
        .with_transport(Arc::new(transport))
        .with_workspace_root(Some(root));

    let descriptors = vec![
        PackDescriptor::new("remote-ok", "https://packs.example/k8s.json"),
        PackDescriptor::new("broken", "${workspaceFolder}/nope.json"),
        PackDescriptor::new("aws", "${workspaceFolder}/aws-icons.json"),
        PackDescriptor::new("gone", "https://packs.example/gone.json"),
        PackDescriptor::new("invalid", "${workspaceFolder}/invalid.json"),
    ];
    let report = loader.load_sync(&descriptors);

    let loaded = report.packs.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
    assert_eq!(loaded, vec!["remote-ok", "aws"]);

    let warned = report.warnings.iter().map(|w| w.name()).collect::<Vec<_>>();
    assert_eq!(warned, vec!["broken", "gone", "invalid"]);
    assert!(matches!(report.warnings[0], PackLoadError::Read { .. }));
    assert!(matches!(report.warnings[1], PackLoadError::Fetch { .. }));
    assert!(
        report.warnings[0]
            .to_string()
            .starts_with("Could not load icon pack \"broken\": ")
    );
}

#[test]
fn missing_local_pack_next_to_valid_one_yields_one_pack_and_one_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let aws = tmp.path().join("aws-icons.json");
    fs::write(&aws, AWS_PACK).unwrap();

    let loader = PackLoader::new().with_transport(Arc::new(MapTransport::default()));
    let report = loader.load_sync(&[
        PackDescriptor::new("aws", aws.to_string_lossy()),
        PackDescriptor::new(
            "broken",
            tmp.path().join("missing.json").to_string_lossy(),
        ),
    ]);

    assert_eq!(report.packs.len(), 1);
    assert_eq!(report.packs[0].name, "aws");
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].to_string().contains("broken"));
}

#[test]
fn empty_descriptor_list_loads_nothing() {
    let report = PackLoader::new().load_sync(&[]);
    assert!(report.packs.is_empty());
    assert!(report.warnings.is_empty());
}
