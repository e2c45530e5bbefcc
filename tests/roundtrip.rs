//! Parse then write, and compare with the input

use indoc::indoc;
use rstest::rstest;
use xmlnode::{parse_with, Document, ReadOptions};

/// Drops indentation and line breaks between tags
fn normalize(xml: &str) -> String {
    xml.lines().map(str::trim).collect()
}

fn exact() -> ReadOptions {
    ReadOptions::default().trim_text(false)
}

#[rstest]
#[case::empty_element("<a/>")]
#[case::attributes_only(r#"<dog name="Buddy" age="5"/>"#)]
#[case::text("<a>text</a>")]
#[case::child("<a><b>1</b></a>")]
#[case::three_levels("<a><b><c>deep</c></b></a>")]
#[case::repeated_siblings("<l><i>1</i><i>2</i><i>3</i></l>")]
#[case::mixed_content("<p>Hello <b>world</b> and <i>more</i> text</p>")]
#[case::text_after_child("<message><header>Alert</header>This is important!</message>")]
#[case::special_characters(r#"<a t="x &amp; &lt; &quot;">1 &lt; 2 &amp; 3 &gt; 0</a>"#)]
#[case::cdata("<a><![CDATA[<x> & y]]></a>")]
#[case::declaration(r#"<?xml version="1.0" encoding="UTF-8"?><a/>"#)]
#[case::default_namespace(r#"<a xmlns="urn:d"><b/></a>"#)]
#[case::prefixed_attribute(r#"<r xmlns:x="urn:x"><e x:id="1" plain="2"/></r>"#)]
#[case::namespace_redefinition(
    r#"<root xmlns:ns="A"><child xmlns:ns="B"><ns:Element>Value</ns:Element></child></root>"#
)]
#[case::soap_request(concat!(
    r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
    r#"<soap:Body><m:GetPrice xmlns:m="urn:shop"><m:Item>Apples</m:Item></m:GetPrice></soap:Body>"#,
    r#"</soap:Envelope>"#
))]
#[case::soap_header_and_fault(concat!(
    r#"<env:Envelope xmlns:env="http://www.w3.org/2003/05/soap-envelope">"#,
    r#"<env:Header><t:Trace xmlns:t="urn:trace" env:mustUnderstand="true">"#,
    r#"42</t:Trace></env:Header>"#,
    r#"<env:Body><env:Fault><env:Code><env:Value>env:Sender</env:Value>"#,
    r#"</env:Code></env:Fault></env:Body>"#,
    r#"</env:Envelope>"#
))]
fn test_compact_input_is_reproduced(#[case] input: &str) {
    let doc = parse_with(input, exact()).unwrap();
    assert_eq!(doc.to_xml().unwrap(), input);
}

#[rstest]
#[case::open_close_pair("<a></a>", "<a/>")]
#[case::comments_and_pis("<a><!-- c --><b/><?pi x?></a>", "<a><b/></a>")]
#[case::doctype("<!DOCTYPE a [<!ENTITY x \"y\">]><a>1</a>", "<a>1</a>")]
#[case::single_quotes("<a k='v \"q\"'/>", r#"<a k="v &quot;q&quot;"/>"#)]
#[case::char_references("<a>&#65;&#x42;</a>", "<a>AB</a>")]
fn test_canonical_output(#[case] input: &str, #[case] expected: &str) {
    let doc = xmlnode::parse(input).unwrap();
    assert_eq!(doc.to_xml().unwrap(), expected);
}

#[test]
fn test_pretty_printed_input() {
    let input = indoc! {r#"
        <catalog xmlns:p="urn:price">
            <book id="1">
                <title>Rust</title>
                <p:cost>30</p:cost>
            </book>
            <book id="2">
                <title>XML</title>
                <empty/>
            </book>
        </catalog>
    "#};

    let doc = xmlnode::parse(input).unwrap();
    assert_eq!(doc.to_xml().unwrap(), normalize(input));
}

#[test]
fn test_second_pass_is_stable() {
    let input = "<a x=\"1\"><b>t</b>tail<![CDATA[c]]><c/></a>";
    let first = parse_with(input, exact()).unwrap();
    let written = first.to_xml().unwrap();
    let second = parse_with(&written, exact()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_built_tree_parses_back_identically() {
    let mut doc = Document::new("order");
    doc.bind_namespace("x", "urn:x");
    doc.put_attribute("id", 17);
    doc.put("item", "apple").put_attribute("qty", 3);
    doc.put_prefixed_container("x", "meta").put("note", "a < b");
    doc.append_text("done");

    let written = doc.to_xml().unwrap();
    assert_eq!(
        written,
        concat!(
            r#"<order xmlns:x="urn:x" id="17"><item qty="3">apple</item>"#,
            r#"<x:meta><note>a &lt; b</note></x:meta>done</order>"#
        )
    );

    let parsed = xmlnode::parse(&written).unwrap();
    assert_eq!(parsed.to_xml().unwrap(), written);
    assert_eq!(parsed.resolve_element_namespace("meta"), Some("urn:x"));
}
