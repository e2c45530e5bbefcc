//! End-to-end behaviour of the tree API against parsed and built documents

use indoc::indoc;
use xmlnode::{
    parse, parse_with, Document, NamespaceScope, Node, ReadOptions, Scalar, XmlNode, TEXT_SLOT,
};

#[test]
fn test_attribute_only_element() {
    let mut doc = Document::new("dog");
    doc.put_attribute("name", "Buddy");
    doc.put_attribute("age", 5);

    let xml = doc.to_xml().unwrap();
    assert_eq!(xml, r#"<dog name="Buddy" age="5"/>"#);

    let parsed = parse(&xml).unwrap();
    assert!(parsed.is_empty());
    assert_eq!(parsed.attribute("name").and_then(Scalar::as_str), Some("Buddy"));
    assert_eq!(parsed.attribute("age").and_then(Scalar::as_i64), Some(5));
}

#[test]
fn test_text_stays_after_child() {
    let input = "<message><header>Alert</header>This is important!</message>";
    let doc = parse(input).unwrap();

    let entries: Vec<_> = doc.entries().map(|entry| entry.name()).collect();
    assert_eq!(entries, vec!["header", "@text"]);
    assert_eq!(doc["header"].text().as_deref(), Some("Alert"));
    assert_eq!(doc.text().as_deref(), Some("This is important!"));
    assert_eq!(doc.to_xml().unwrap(), input);

    let mut built = Document::new("message");
    built.put("header", "Alert");
    built.append_text("This is important!");
    assert_eq!(built.to_xml().unwrap(), input);
}

#[test]
fn test_rebound_prefix_resolves_at_child_scope() {
    let input = concat!(
        r#"<root xmlns:ns="A"><child xmlns:ns="B">"#,
        r#"<ns:Element>Value</ns:Element></child></root>"#
    );
    let doc = parse(input).unwrap();

    assert_eq!(doc.lookup_namespace_uri("ns"), Some("A"));

    let child = doc["child"].as_element().unwrap();
    assert_eq!(child.lookup_namespace_uri("ns"), Some("B"));
    assert_eq!(child.element_prefix("Element"), Some("ns"));
    assert_eq!(child.resolve_element_namespace("Element"), Some("B"));
    assert_eq!(child["Element"].text().as_deref(), Some("Value"));

    // The ancestor keeps its own binding
    assert_eq!(doc.lookup_namespace_uri("ns"), Some("A"));
}

#[test]
fn test_parent_scope_rebinds_on_the_parent() {
    let input = concat!(
        r#"<root xmlns:ns="A"><child xmlns:ns="B">"#,
        r#"<ns:Element>Value</ns:Element></child></root>"#
    );
    let options = ReadOptions::default().namespace_scope(NamespaceScope::Parent);
    let doc = parse_with(input, options).unwrap();

    // Same prefix declared twice on one node: the last URI wins
    assert_eq!(doc.lookup_namespace_uri("ns"), Some("B"));
    assert_eq!(doc.prefixes().collect::<Vec<_>>(), vec!["ns"]);
    let child = doc["child"].as_element().unwrap();
    assert_eq!(child.lookup_namespace_uri("ns"), None);
}

fn forecast() -> Document {
    parse(indoc! {r#"
        <Forecast>
            <Day date="mon"><Temperature>10</Temperature></Day>
            <Day date="tue"><Temperature>12</Temperature></Day>
        </Forecast>
    "#})
    .unwrap()
}

#[test]
fn test_sibling_days_mutate_independently() {
    let mut doc = forecast();

    let dates: Vec<_> = doc
        .get_all("Day")
        .filter_map(|day| day.as_element()?.attribute("date")?.as_str())
        .collect();
    assert_eq!(dates, vec!["mon", "tue"]);

    let tuesday = doc.get_mut(1).and_then(Node::as_element_mut).unwrap();
    let previous = tuesday.replace("Temperature", Scalar::from(15)).unwrap();
    assert_eq!(previous.text().as_deref(), Some("12"));

    let temps: Vec<_> = doc
        .get_all("Day")
        .map(|day| day["Temperature"].value().and_then(Scalar::as_i64))
        .collect();
    assert_eq!(temps, vec![Some(10), Some(15)]);

    assert_eq!(
        doc.to_xml().unwrap(),
        concat!(
            r#"<Forecast><Day date="mon"><Temperature>10</Temperature></Day>"#,
            r#"<Day date="tue"><Temperature>15</Temperature></Day></Forecast>"#
        )
    );
}

#[test]
fn test_cloned_subtree_is_independent() {
    let mut doc = forecast();
    let mut copy = doc["Day"].as_element().unwrap().clone();
    copy.put_attribute("date", "wed");
    doc.set("Day", copy);

    assert_eq!(doc.get_all("Day").count(), 3);
    assert_eq!(doc["Day"].as_element().unwrap().attribute("date"), Some(&Scalar::from("mon")));
}

#[test]
fn test_remove_and_replace() {
    let mut doc = parse("<r><a>1</a><b/><a>2</a>tail</r>").unwrap();

    let first = doc.remove("a").unwrap();
    assert_eq!(first.text().as_deref(), Some("1"));
    assert!(!doc.has("a"));
    assert_eq!(doc.to_xml().unwrap(), "<r><b/>tail</r>");

    // Replacing an absent name appends
    assert!(doc.replace("c", Scalar::from("new")).is_none());
    assert_eq!(doc.to_xml().unwrap(), "<r><b/>tail<c>new</c></r>");

    doc.retain(["c", TEXT_SLOT]);
    assert_eq!(doc.to_xml().unwrap(), "<r>tail<c>new</c></r>");

    doc.remove_text();
    assert_eq!(doc.to_xml().unwrap(), "<r><c>new</c></r>");

    doc.append_text("again");
    doc.retain(["c"]);
    assert_eq!(doc.to_xml().unwrap(), "<r><c>new</c></r>");

    doc.remove_all();
    assert!(doc.is_empty());
    assert_eq!(doc.to_xml().unwrap(), "<r/>");
}

#[test]
fn test_remove_at_targets_one_entry() {
    let mut doc = parse("<r><a>1</a><a>2</a></r>").unwrap();
    let removed = doc.remove_at(0).unwrap();
    assert_eq!(removed.text().as_deref(), Some("1"));
    assert_eq!(doc.to_xml().unwrap(), "<r><a>2</a></r>");
    assert!(doc.remove_at(5).is_none());
}

#[test]
fn test_values_survive_a_round_trip() {
    let mut doc = Document::new("v");
    doc.put("big", i64::MAX);
    doc.put("huge", u64::MAX);
    doc.put("neg", -42);
    doc.put("ratio", 1.5);
    doc.put("yes", true);
    doc.put("bin", vec![0u8, 255, 16]);
    doc.put_null("nothing");

    let xml = doc.to_xml().unwrap();
    assert_eq!(
        xml,
        concat!(
            "<v><big>9223372036854775807</big><huge>18446744073709551615</huge>",
            "<neg>-42</neg><ratio>1.5</ratio><yes>true</yes><bin>AP8Q</bin><nothing/></v>"
        )
    );

    let parsed = parse(&xml).unwrap();
    assert_eq!(parsed["big"].value().and_then(Scalar::as_i64), Some(i64::MAX));
    assert_eq!(parsed["huge"].value().and_then(Scalar::as_u64), Some(u64::MAX));
    assert_eq!(parsed["neg"].value().and_then(Scalar::as_i64), Some(-42));
    assert_eq!(parsed["ratio"].value().and_then(Scalar::as_f64), Some(1.5));
    assert_eq!(parsed["yes"].value().and_then(Scalar::as_bool), Some(true));
    assert_eq!(
        parsed["bin"].value().and_then(Scalar::as_bytes).as_deref(),
        Some(&[0u8, 255, 16][..])
    );
    // An empty element parses back as an empty container
    assert!(parsed["nothing"].as_element().is_some_and(XmlNode::is_empty));
}

#[test]
fn test_attribute_values_keep_their_form() {
    let mut doc = Document::new("a");
    doc.put_attribute("n", -7).put_attribute("f", true).put_attribute("s", "tab\there");

    let xml = doc.to_xml().unwrap();
    assert_eq!(xml, r#"<a n="-7" f="true" s="tab&#9;here"/>"#);

    let parsed = parse(&xml).unwrap();
    assert_eq!(parsed.attribute("n").and_then(Scalar::as_i64), Some(-7));
    assert_eq!(parsed.attribute("f").and_then(Scalar::as_bool), Some(true));
    assert_eq!(parsed.attribute("s").and_then(Scalar::as_str), Some("tab\there"));
}

#[test]
fn test_prefixed_attribute_collision() {
    let mut node = XmlNode::new();
    node.bind_namespace("a", "urn:a").bind_namespace("b", "urn:b");
    node.put_prefixed_attribute("a", "id", 1);
    node.put_prefixed_attribute("b", "id", 2);
    assert_eq!(node.attribute_prefix("id"), Some("b"));
    assert_eq!(node.to_xml("e").unwrap(), r#"<e xmlns:a="urn:a" xmlns:b="urn:b" b:id="2"/>"#);

    // An unprefixed write drops the qualification
    node.put_attribute("id", 3);
    assert_eq!(node.attribute_prefix("id"), None);
    assert_eq!(node.to_xml("e").unwrap(), r#"<e xmlns:a="urn:a" xmlns:b="urn:b" id="3"/>"#);
}

#[test]
fn test_search_helpers() {
    let doc = parse("<r><x><y><z>deep</z></y></x><z>direct</z></r>").unwrap();

    // A direct child wins over a match deeper in an earlier sibling
    let found = doc.find_value("z").and_then(Node::text);
    assert_eq!(found.as_deref(), Some("direct"));
    assert_eq!(doc.find_values("z").len(), 2);
    let parent = doc.find_parent("z").unwrap();
    assert!(parent.has("z") && parent.has("x"));

    let x = doc["x"].as_element().unwrap();
    let found = x.find_value("z").and_then(Node::text);
    assert_eq!(found.as_deref(), Some("deep"));
    assert!(x.find_parent("z").unwrap().has("z"));
    assert!(doc.find_value("missing").is_none());
    assert!(doc["x"]["y"]["nope"].is_missing());
}

#[test]
fn test_errors_carry_positions() {
    let err = parse("<a><b x=1/></a>").unwrap_err();
    assert!(err.position().is_some());

    assert!(parse("<a>").is_err());
    assert!(parse("<a></b>").is_err());
    assert!(parse("<a/><b/>").is_err());
}
