use super::*;
use crate::data::model::DataNode;
use crate::layout::treemap::{LayoutEngine, TreemapLayout};
use crate::render::color::default_palette;
use crate::render::tooltip::TooltipOptions;

fn two_leaves() -> DataNode {
    DataNode::container(
        "Data",
        vec![
            DataNode::leaf("A", "Cat1", 100u64),
            DataNode::leaf("TheGodfather", "Cat2", "300"),
        ],
    )
}

fn draw(data: &DataNode, opts: &RenderOptions) -> (Page, RenderedTreemap, OrdinalScale) {
    let mut h = Hierarchy::prepare(data);
    TreemapLayout::new(opts.margin.inner(opts.canvas))
        .layout(&mut h)
        .unwrap();
    let mut page = Page::with_container("graph");
    let container = page.find_by_id("graph").unwrap();
    let mut scale = OrdinalScale::new(["Cat1", "Cat2"], default_palette()).unwrap();
    let drawn = render_treemap(&mut page, container, &h, &mut scale, opts).unwrap();
    (page, drawn, scale)
}

#[test]
fn draws_one_rect_and_one_label_per_leaf() {
    let (page, drawn, _) = draw(&two_leaves(), &RenderOptions::default());
    assert_eq!(page.select_class("tile").len(), 2);
    assert_eq!(page.select_all("text").len(), 2);
    assert_eq!(drawn.tiles().len(), 2);

    let svg = drawn.svg();
    assert_eq!(page.attr(svg, "width"), Some("1100"));
    assert_eq!(page.attr(svg, "height"), Some("700"));
}

#[test]
fn rect_attributes_echo_the_source() {
    let (page, drawn, scale) = draw(&two_leaves(), &RenderOptions::default());

    let big = &drawn.tiles()[0];
    assert_eq!(page.attr(big.rect, "data-name"), Some("TheGodfather"));
    assert_eq!(page.attr(big.rect, "data-category"), Some("Cat2"));
    assert_eq!(page.attr(big.rect, "data-value"), Some("300"));
    assert_eq!(page.attr(big.rect, "x"), Some("0"));
    assert_eq!(page.attr(big.rect, "width"), Some("825"));
    assert_eq!(page.attr(big.rect, "height"), Some("700"));
    assert_eq!(page.style(big.rect, "stroke"), Some("black"));
    assert_eq!(
        page.style(big.rect, "fill").map(str::to_owned),
        scale.get("Cat2").map(|c| c.to_string())
    );

    let small = &drawn.tiles()[1];
    assert_eq!(page.attr(small.rect, "x"), Some("825"));
    assert_eq!(page.attr(small.rect, "data-value"), Some("100"));
    assert_ne!(big.fill, small.fill);
}

#[test]
fn labels_stack_fragments_downwards() {
    let (page, drawn, _) = draw(&two_leaves(), &RenderOptions::default());
    let tile = &drawn.tiles()[0];
    assert_eq!(tile.fragments, ["The", "Godfather"]);

    let spans = page.children(tile.label).to_vec();
    assert_eq!(spans.len(), 2);
    assert_eq!(page.text(spans[0]), Some("The"));
    assert_eq!(page.attr(spans[0], "x"), Some("5"));
    assert_eq!(page.attr(spans[0], "y"), Some("15"));
    assert_eq!(page.attr(spans[1], "y"), Some("25"));
    assert_eq!(page.attr(spans[1], "font-size"), Some("0.6rem"));
    assert_eq!(page.attr(spans[1], "fill"), Some("black"));

    let other = page.children(drawn.tiles()[1].label).to_vec();
    assert_eq!(page.attr(other[0], "x"), Some("830"));
}

#[test]
fn missing_category_omits_the_attribute() {
    let mut leaf = DataNode::leaf("Orphan", "x", 5u64);
    leaf.category = None;
    let data = DataNode::container("Data", vec![leaf]);
    let (page, drawn, scale) = draw(&data, &RenderOptions::default());
    let tile = &drawn.tiles()[0];
    assert_eq!(page.attr(tile.rect, "data-category"), None);
    assert_eq!(tile.tooltip.category, "");
    assert_eq!(scale.domain().len(), 3);
}

#[test]
fn margin_wraps_tiles_in_a_translated_group() {
    let opts = RenderOptions {
        margin: Margin {
            top: 10.0,
            left: 20.0,
            ..Margin::default()
        },
        ..RenderOptions::default()
    };
    let (page, drawn, _) = draw(&two_leaves(), &opts);
    let groups = page.select_all("g");
    assert_eq!(groups.len(), 1);
    assert_eq!(page.attr(groups[0], "transform"), Some("translate(20,10)"));
    assert_eq!(page.parent(drawn.tiles()[0].rect), Some(groups[0]));

    // Pointer positions are shifted back by the margin before hit testing.
    assert_eq!(drawn.hit_test(Point::new(15.0, 5.0)), None);
    assert_eq!(drawn.hit_test(Point::new(25.0, 15.0)), Some(TileId(0)));
}

#[test]
fn hit_test_and_hover_drive_the_tooltip() {
    let (mut page, drawn, _) = draw(&two_leaves(), &RenderOptions::default());
    let tip = Tooltip::attach(&mut page, "tooltip", TooltipOptions::default());

    assert_eq!(drawn.hit_test(Point::new(10.0, 10.0)), Some(TileId(0)));
    assert_eq!(drawn.hit_test(Point::new(900.0, 10.0)), Some(TileId(1)));
    assert_eq!(drawn.hit_test(Point::new(1100.0, 10.0)), None);

    let hit = drawn.hover(&mut page, &tip, Point::new(900.0, 300.0));
    assert_eq!(hit, Some(TileId(1)));
    let state = tip.state(&page);
    assert!(state.visible);
    assert_eq!(state.value.as_deref(), Some("100"));
    assert_eq!(state.left.as_deref(), Some("905px"));
    assert_eq!(state.top.as_deref(), Some("250px"));
    assert!(state.html.unwrap().ends_with("<br>$100"));

    assert_eq!(drawn.hover(&mut page, &tip, Point::new(-1.0, 0.0)), None);
    assert!(!tip.state(&page).visible);
}

#[test]
fn dispatch_enter_move_leave() {
    let (mut page, drawn, _) = draw(&two_leaves(), &RenderOptions::default());
    let tip = Tooltip::attach(&mut page, "tooltip", TooltipOptions::default());
    let tile = TileId(0);

    drawn
        .dispatch(&mut page, &tip, PointerEvent::Enter { tile, at: Point::new(1.0, 2.0) })
        .unwrap();
    assert!(tip.state(&page).visible);

    drawn
        .dispatch(&mut page, &tip, PointerEvent::Move { tile, at: Point::new(50.0, 60.0) })
        .unwrap();
    assert_eq!(tip.state(&page).left.as_deref(), Some("55px"));
    assert_eq!(tip.state(&page).top.as_deref(), Some("10px"));

    drawn
        .dispatch(&mut page, &tip, PointerEvent::Leave { tile })
        .unwrap();
    assert_eq!(tip.state(&page).opacity, "0");

    let err = drawn
        .dispatch(&mut page, &tip, PointerEvent::Leave { tile: TileId(9) })
        .unwrap_err();
    assert!(matches!(err, BoxofficeError::Render(_)));
}

#[test]
fn dispose_removes_the_canvas_only() {
    let (mut page, drawn, _) = draw(&two_leaves(), &RenderOptions::default());
    let tip = Tooltip::attach(&mut page, "tooltip", TooltipOptions::default());
    let before = page.len();
    assert!(before > 3);

    drawn.dispose(&mut page);
    assert!(page.select_all("svg").is_empty());
    assert!(page.select_class("tile").is_empty());
    assert!(page.contains(tip.element()));
    assert!(page.find_by_id("graph").is_some());
    assert_eq!(page.len(), 3);
}

#[test]
fn rejects_a_container_that_is_gone() {
    let data = two_leaves();
    let h = Hierarchy::prepare(&data);
    let mut page = Page::with_container("graph");
    let graph = page.find_by_id("graph").unwrap();
    page.remove(graph);
    let mut scale = OrdinalScale::new(["Cat1"], default_palette()).unwrap();
    let err = render_treemap(&mut page, graph, &h, &mut scale, &RenderOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("container"));
}
