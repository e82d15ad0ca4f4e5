use super::utils::{container_page, script_page};
use crate::scraper::extractor::extract_listings;
use serde_json::json;

#[test]
fn container_results_win_over_script() {
    let html = container_page(
        r#"[{"id": "A"}, {"id": "B"}]"#,
        r#"<script>var data = {"results": [{"id": "C"}]};</script>"#,
    );

    let listings = extract_listings(&html);

    assert_eq!(listings, vec![json!({"id": "A"}), json!({"id": "B"})]);
}

#[test]
fn script_results_used_without_container() {
    let html = script_page(r#"[{"id": "A", "price": "500 €"}]"#, "");

    let listings = extract_listings(&html);

    assert_eq!(listings, vec![json!({"id": "A", "price": "500 €"})]);
}

#[test]
fn script_results_with_nested_arrays() {
    let html = script_page(
        r#"[{"id": "A", "levels": ["1", "2"]}, {"id": "B", "levels": []}]"#,
        "",
    );

    let listings = extract_listings(&html);

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0]["levels"], json!(["1", "2"]));
    assert_eq!(listings[1]["id"], "B");
}

#[test]
fn broken_container_falls_back_to_script() {
    let html = r#"<html><body>
        <div data-json-data='{"results": [oops'></div>
        <script>render({"results": [{"id": "fallback"}]});</script>
    </body></html>"#;

    let listings = extract_listings(html);

    assert_eq!(listings, vec![json!({"id": "fallback"})]);
}

#[test]
fn container_without_results_falls_back_to_script() {
    let html = r#"<html><body>
        <div data-json-data='{"filters": []}'></div>
        <script>render({"results": [{"id": "fallback"}]});</script>
    </body></html>"#;

    assert_eq!(extract_listings(html), vec![json!({"id": "fallback"})]);
}

#[test]
fn empty_container_results_end_the_search() {
    let html = container_page(
        "[]",
        r#"<script>var data = {"results": [{"id": "C"}]};</script>"#,
    );

    assert!(extract_listings(&html).is_empty());
}

#[test]
fn first_parsable_script_wins() {
    let html = r#"<html><head>
        <script>var broken = {"results": [{"id": </script>
        <script>var first = {"results": [{"id": "first"}]};</script>
        <script>var second = {"results": [{"id": "second"}]};</script>
    </head></html>"#;

    assert_eq!(extract_listings(html), vec![json!({"id": "first"})]);
}

#[test]
fn later_results_key_in_same_script_used_when_first_is_malformed() {
    let html = r#"<html><head>
        <script>
            var draft = {"results": [{"id": 1,,]};
            var live = {"results": [{"id": "live"}]};
        </script>
        <script>var other = {"results": [{"id": "other"}]};</script>
    </head></html>"#;

    assert_eq!(extract_listings(html), vec![json!({"id": "live"})]);
}

#[test]
fn entity_encoded_container_attribute() {
    let html = r#"<div data-json-data="{&quot;results&quot;: [{&quot;id&quot;: 7}]}"></div>"#;

    assert_eq!(extract_listings(html), vec![json!({"id": 7})]);
}

#[test]
fn no_payload_yields_empty() {
    let html = r#"<html><body><p>Δεν βρέθηκαν αγγελίες</p><script>var x = 1;</script></body></html>"#;

    assert!(extract_listings(html).is_empty());
}
