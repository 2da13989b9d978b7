use super::*;

#[test]
fn container_page_has_body_and_div() {
    let page = Page::with_container("graph");
    let graph = page.find_by_id("graph").unwrap();
    assert_eq!(page.tag(graph), Some("div"));
    assert_eq!(page.parent(graph), Some(page.body()));
    assert_eq!(page.len(), 2);
}

#[test]
fn attributes_and_styles_keep_insertion_order_and_overwrite() {
    let mut page = Page::new();
    let el = page.append(page.body(), "rect");
    page.set_attr(el, "x", "1");
    page.set_attr(el, "y", "2");
    page.set_attr(el, "x", "3");
    page.set_style(el, "fill", "#ffffff");
    page.set_style(el, "stroke", "black");

    assert_eq!(page.attr(el, "x"), Some("3"));
    assert_eq!(page.style(el, "stroke"), Some("black"));
    assert_eq!(
        page.write_element(el),
        r#"<rect x="3" y="2" style="fill: #ffffff; stroke: black;"></rect>"#
    );

    page.remove_attr(el, "y");
    assert_eq!(page.attr(el, "y"), None);
}

#[test]
fn svg_serialisation_escapes_and_self_closes() {
    let mut page = Page::with_container("graph");
    let graph = page.find_by_id("graph").unwrap();
    let svg = page.append(graph, "svg");
    page.set_attr(svg, "xmlns", SVG_NS);
    let rect = page.append(svg, "rect");
    page.set_attr(rect, "data-name", "Tom \"&\" Jerry");
    let text = page.append(svg, "text");
    page.set_text(text, "<b>");

    let out = page.to_svg().unwrap();
    assert!(out.starts_with("<?xml"));
    assert!(out.contains(r#"<rect data-name="Tom &quot;&amp;&quot; Jerry"/>"#));
    assert!(out.contains("<text>&lt;b&gt;</text>"));
    assert!(!out.contains("<div"));
}

#[test]
fn html_page_inlines_style_and_script() {
    let mut page = Page::with_container("graph");
    let tip = page.append(page.body(), "div");
    page.set_attr(tip, "id", "tooltip");

    let html = page.to_html("Movie Sales");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Movie Sales</title>"));
    assert!(html.contains(r#"<div id="graph"></div>"#));
    assert!(html.contains(r#"<div id="tooltip"></div>"#));
    assert!(html.contains(".tooltip"));
    assert!(html.contains("addEventListener(\"mousemove\""));
    assert!(page.to_svg().is_none());
}

#[test]
fn remove_drops_the_subtree_and_keeps_ids_stable() {
    let mut page = Page::with_container("graph");
    let graph = page.find_by_id("graph").unwrap();
    let svg = page.append(graph, "svg");
    let rect = page.append(svg, "rect");
    let other = page.append(page.body(), "p");

    page.remove(svg);
    assert!(!page.contains(svg));
    assert!(!page.contains(rect));
    assert!(page.contains(other));
    assert!(page.children(graph).is_empty());
    assert!(page.select_all("rect").is_empty());

    // Mutating a removed element is a no-op.
    page.set_attr(rect, "x", "1");
    assert_eq!(page.attr(rect, "x"), None);

    let fresh = page.append(graph, "svg");
    assert_ne!(fresh, svg);
}

#[test]
fn select_by_tag_and_class_in_document_order() {
    let mut page = Page::new();
    let a = page.append(page.body(), "rect");
    let g = page.append(page.body(), "g");
    let b = page.append(g, "rect");
    page.set_attr(a, "class", "tile big");
    page.set_attr(b, "class", "tile");

    assert_eq!(page.select_all("rect"), vec![a, b]);
    assert_eq!(page.select_class("tile"), vec![a, b]);
    assert_eq!(page.select_class("big"), vec![a]);
    assert!(page.select_class("til").is_empty());
}
