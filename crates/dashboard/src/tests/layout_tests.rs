use super::*;
use chrono::Utc;

fn summary(min_payload: f64, max_payload: f64) -> DatasetSummary {
    DatasetSummary {
        source: "test".to_string(),
        record_count: 3,
        site_count: 2,
        success_count: 2,
        min_payload,
        max_payload,
        loaded_at: Utc::now(),
    }
}

fn dropdown(layout: &PageLayout) -> &Dropdown {
    layout
        .components()
        .into_iter()
        .find_map(|component| match component {
            Component::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        })
        .expect("dropdown")
}

fn slider(layout: &PageLayout) -> &RangeSlider {
    layout
        .components()
        .into_iter()
        .find_map(|component| match component {
            Component::RangeSlider(slider) => Some(slider),
            _ => None,
        })
        .expect("slider")
}

#[test]
fn dropdown_offers_all_sites_then_fixed_enumeration() {
    let layout = build_layout(&summary(0.0, 9600.0));
    let dropdown = dropdown(&layout);

    assert_eq!(dropdown.id, ControlId::SiteDropdown);
    assert_eq!(dropdown.value, SiteSelection::All);
    assert!(dropdown.searchable);
    let values: Vec<&str> = dropdown
        .options
        .iter()
        .map(|option| option.value.as_str())
        .collect();
    assert_eq!(
        values,
        vec!["ALL", "CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
    );
    assert_eq!(dropdown.options[0].label, "All Sites");
}

#[test]
fn slider_defaults_to_dataset_payload_span() {
    let layout = build_layout(&summary(350.0, 9600.0));
    let slider = slider(&layout);

    assert_eq!(slider.min, 0.0);
    assert_eq!(slider.max, 10000.0);
    assert_eq!(slider.step, 1000.0);
    assert_eq!(slider.marks.len(), 2);
    assert_eq!(slider.value.low(), 350.0);
    assert_eq!(slider.value.high(), 9600.0);
    assert_eq!(layout.initial_state.payload_range, slider.value);
    assert_eq!(layout.initial_state.site, SiteSelection::All);
}

#[test]
fn graphs_appear_pie_first() {
    let layout = build_layout(&summary(0.0, 100.0));
    assert_eq!(
        layout.graph_ids(),
        vec![TargetId::SuccessPieChart, TargetId::SuccessPayloadScatterChart]
    );
}

#[test]
fn title_is_first_component_under_root() {
    let layout = build_layout(&summary(0.0, 100.0));
    let Component::Div { children } = &layout.root else {
        panic!("root should be a div");
    };
    let Component::H1 { text, style } = &children[0] else {
        panic!("first child should be the heading");
    };
    assert_eq!(text, PAGE_TITLE);
    assert_eq!(style.get("color").map(String::as_str), Some("#503D36"));
}

#[test]
fn layout_serializes_with_component_tags() {
    let layout = build_layout(&summary(0.0, 100.0));
    let json = serde_json::to_value(&layout).expect("json");
    assert_eq!(json["root"]["component"], "div");
    assert_eq!(json["root"]["children"][0]["component"], "h1");
    assert_eq!(json["initial_state"]["site"], "ALL");
    assert_eq!(json["initial_state"]["payload_range"], serde_json::json!([0.0, 100.0]));
}
