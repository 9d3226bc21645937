use crate::*;
use serde_json::json;

#[test]
fn pack_document_parses_the_exchange_format() {
    let doc = IconPackDocument::from_json_str(
        r#"{"prefix":"aws","icons":{"lambda":{"width":48,"height":48,"body":"<path/>"}}}"#,
    )
    .unwrap();
    assert_eq!(doc.prefix, "aws");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("lambda"), Some(&IconRecord::new(48.0, 48.0, "<path/>")));
}

#[test]
fn pack_document_serializes_integral_sizes_as_integers() {
    let mut doc = IconPackDocument::new("aws");
    doc.icons
        .insert("lambda".to_string(), IconRecord::new(48.0, 40.5, "<path/>"));
    assert_eq!(
        doc.to_json_string().unwrap(),
        r#"{"prefix":"aws","icons":{"lambda":{"width":48,"height":40.5,"body":"<path/>"}}}"#
    );
}

#[test]
fn pack_document_keeps_icon_order() {
    let doc = IconPackDocument::from_json_str(
        r#"{"prefix":"p","icons":{"zeta":{"width":1,"height":1,"body":"<a/>"},"alpha":{"width":1,"height":1,"body":"<b/>"}}}"#,
    )
    .unwrap();
    let names = doc.icons.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn iconify_pack_level_sizes_fill_missing_icon_sizes() {
    let doc = IconPackDocument::from_json_str(
        r#"{"prefix":"k8s","width":256,"height":249,"icons":{"pod":{"body":"<g/>"},"svc":{"body":"<g/>","width":32}}}"#,
    )
    .unwrap();
    assert_eq!(doc.get("pod").unwrap().width, 256.0);
    assert_eq!(doc.get("pod").unwrap().height, 249.0);
    assert_eq!(doc.get("svc").unwrap().width, 32.0);
    assert_eq!(doc.get("svc").unwrap().height, 249.0);

    let bare = IconPackDocument::from_json_str(r#"{"icons":{"x":{"body":"<g/>"}}}"#).unwrap();
    assert_eq!(bare.prefix, "");
    assert_eq!(bare.get("x").unwrap().width, 16.0);
}

#[test]
fn pack_document_rejects_invalid_records() {
    let err = IconPackDocument::from_json_str(
        r#"{"prefix":"p","icons":{"x":{"width":0,"height":4,"body":"<g/>"}}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidPack { .. }), "{err}");

    let err = IconPackDocument::from_json_str(
        r#"{"prefix":"p","icons":{"x":{"width":4,"height":4,"body":"   "}}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("empty body"), "{err}");

    let err = IconPackDocument::from_json_str(r#"{"prefix":"p"}"#).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "{err}");
}

#[test]
fn iconify_fields_survive_a_load_and_save() {
    let text = r#"{"prefix":"k8s","icons":{"pod":{"width":24,"height":24,"body":"<path/>","left":2,"top":2,"hFlip":true}},"aliases":{"po":{"parent":"pod"}},"info":{"name":"k8s"},"width":24,"height":24}"#;
    let doc = IconPackDocument::from_json_str(text).unwrap();
    assert_eq!(doc.get("pod").unwrap().extra["left"], json!(2));
    assert_eq!(doc.extra["aliases"], json!({"po": {"parent": "pod"}}));

    let written: serde_json::Value = serde_json::from_str(&doc.to_json_string().unwrap()).unwrap();
    let original: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(written, original);
    assert_eq!(IconPackDocument::from_json_str(&doc.to_json_string().unwrap()).unwrap(), doc);
}

#[test]
fn descriptor_source_classifies_and_substitutes_workspace() {
    let remote = PackDescriptor::new("k8s", "https://unpkg.com/pack/icons.json");
    assert_eq!(
        remote.source(Some("/ws")),
        PackSource::Remote("https://unpkg.com/pack/icons.json".to_string())
    );

    let local = PackDescriptor::new("mine", "${workspaceFolder}/icons/mine.json");
    assert_eq!(
        local.source(Some("/ws")),
        PackSource::Local("/ws/icons/mine.json".into())
    );
    assert_eq!(local.source(None), PackSource::Local("/icons/mine.json".into()));

    let ftp = PackDescriptor::new("odd", "ftp://host/pack.json");
    assert!(!ftp.is_remote());
}

#[test]
fn loaded_pack_serializes_as_name_and_icons() {
    let pack = LoadedPack {
        name: "aws".to_string(),
        icons: IconPackDocument::from_json_str(
            r#"{"prefix":"aws","icons":{"lambda":{"width":48,"height":48,"body":"<path/>"}}}"#,
        )
        .unwrap(),
    };
    assert_eq!(
        serde_json::to_value(&pack).unwrap(),
        json!({
            "name": "aws",
            "icons": {
                "prefix": "aws",
                "icons": { "lambda": { "width": 48, "height": 48, "body": "<path/>" } }
            }
        })
    );
}
