use crate::preview::*;

#[test]
fn viewport_zoom_clamps_and_resets() {
    let mut viewport = Viewport::default();
    assert_eq!(viewport.scale(), 1.0);

    for _ in 0..30 {
        viewport.zoom_in();
    }
    assert_eq!(viewport.scale(), Viewport::MAX_SCALE);

    for _ in 0..30 {
        viewport.zoom_out();
    }
    assert_eq!(viewport.scale(), Viewport::MIN_SCALE);

    assert_eq!(viewport.reset(), 1.0);
    assert!((viewport.zoom(0.2) - 1.2).abs() < 1e-9);
}

#[test]
fn stray_patterns_match_ids_classes_and_container_position() {
    let marker = SurfaceElement::new("div", "dmermaid-42");
    let classed = SurfaceElement::new("div", "x").with_class("mermaid-error");
    let bomb = SurfaceElement::new("SVG", "dmermaid7");
    let orphan = SurfaceElement::new("svg", "mmk8s3");
    let managed = SurfaceElement::new("svg", "mmk8s3").inside_diagram();

    assert!(StrayPattern::IdPrefix("dmermaid-").matches(&marker));
    assert!(!StrayPattern::IdPrefix("dmermaid-").matches(&bomb));
    assert!(StrayPattern::Class("mermaid-error").matches(&classed));
    assert!(
        StrayPattern::TagIdPrefix {
            tag: "svg",
            prefix: "dmermaid"
        }
        .matches(&bomb)
    );
    assert!(StrayPattern::OutsideDiagramIdPrefix("mmk8s").matches(&orphan));
    assert!(!StrayPattern::OutsideDiagramIdPrefix("mmk8s").matches(&managed));
}

#[test]
fn memory_surface_purges_and_exports() {
    let mut surface = MemorySurface::new();
    assert_eq!(surface.status().text, "Initializing…");
    assert_eq!(surface.export_svg(), None);

    surface.insert_element(SurfaceElement::new("div", "dmermaid-1"));
    surface.insert_element(SurfaceElement::new("div", "toolbar"));
    assert_eq!(surface.purge(&[StrayPattern::IdPrefix("dmermaid-")]), 1);
    assert_eq!(surface.elements().len(), 1);

    surface.show_diagram(r#"<svg id="mmk8s1"></svg>"#);
    assert_eq!(surface.export_svg(), Some(r#"<svg id="mmk8s1"></svg>"#));

    surface.viewport_mut().zoom_in();
    assert!(surface.viewport().scale() > 1.0);
}
