use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use svgharvest::markuptree::Element;
use svgharvest::{Candidate, EmbeddingType, Error, Options, Pipeline, SvgArtifact};

const LOCATION: &str = "https://example.com/docs/index.html";

const ICON: &str = "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 24 24'>\
    <path d='M0 0h24v24H0z'/></svg>";

const OTHER: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='32' height='16'>\
    <circle r='8'/></svg>";

const SHEET: &str = "<svg xmlns='http://www.w3.org/2000/svg' style='display:none'>\
    <symbol id='home' viewBox='0 0 16 16'><path d='M1 1'/></symbol>\
    <symbol id='user' viewBox='0 0 20 20'><path d='M2 2'/></symbol>\
    <symbol id='gear' viewBox='0 0 24 24'><path d='M3 3'/></symbol>\
    </svg>";

const LOGO: &str = "<svg xmlns='http://www.w3.org/2000/svg' width='40' height='10' class='logo'/>";

fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn big_svg() -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 8 8'>{}</svg>",
        "<rect width='1' height='1'/>".repeat(3000)
    )
}

fn server(url: &str) -> Result<Vec<u8>, Error> {
    let data = match url {
        "https://example.com/docs/icon.svg" => ICON.as_bytes().to_vec(),
        "https://example.com/docs/other.svg" => OTHER.as_bytes().to_vec(),
        "https://example.com/img/sheet.svg" => SHEET.as_bytes().to_vec(),
        "https://example.com/docs/packed.svgz" => gzip(OTHER),
        "https://example.com/docs/big.svgz" => gzip(&big_svg()),
        "https://cdn.example.org/logo.svg" => LOGO.as_bytes().to_vec(),
        _ => {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            })
        }
    };

    Ok(data)
}

fn process(candidates: Vec<Candidate<Element>>) -> Vec<SvgArtifact<Element>> {
    Pipeline::new(Options::default(), server).process(candidates, LOCATION)
}

fn process_markup(list: &[&str]) -> Vec<SvgArtifact<Element>> {
    process(
        list.iter()
            .map(|s| Candidate::Markup(s.to_string()))
            .collect(),
    )
}

fn process_one(markup: &str) -> SvgArtifact<Element> {
    let mut list = process_markup(&[markup]);
    assert_eq!(list.len(), 1);
    list.remove(0)
}

#[test]
fn svg_is_inline() {
    let list = process_markup(&[
        "<svg/>",
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 1 1'><rect/></svg>",
        "<svg width='5' height='5'><g id='a'/></svg>",
    ]);

    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|a| a.embedding_type() == EmbeddingType::Inline));
}

#[test]
fn symbol_becomes_sprite() {
    let a = process_one("<symbol id='x' viewBox='0 0 16 16'><path d='M4 4h8'/></symbol>");
    assert_eq!(a.embedding_type(), EmbeddingType::Sprite);

    let text = a.svg_string();
    assert!(text.contains("<symbol id=\"x\" viewBox=\"0 0 16 16\"><path d=\"M4 4h8\"/></symbol>"));
    assert!(text.contains("<use xlink:href=\"#x\"/>"));
    assert_eq!(a.size_label(), "16x16");
}

#[test]
fn g_with_stroke_keeps_fill_none() {
    let a = process_one("<g id='grp'><rect fill='none' stroke='black'/></g>");
    assert_eq!(a.embedding_type(), EmbeddingType::Sprite);
    assert!(a.svg_string().contains("<rect fill=\"none\" stroke=\"black\"/>"));
}

#[test]
fn g_without_id_is_dropped() {
    let list = process_markup(&["<g><rect fill='none'/></g>"]);
    assert!(list.is_empty());
}

#[test]
fn size_from_view_box() {
    let a = process_one("<svg viewBox='0 0 100 200'/>");
    assert_eq!(a.width(), Some(100));
    assert_eq!(a.height(), Some(200));
    assert_eq!(a.size_label(), "100x200");
}

#[test]
fn size_from_px() {
    let a = process_one("<svg width='50px' height='75px'/>");
    assert_eq!(a.view_box(), Some("0 0 50 75"));
    assert_eq!(a.size_label(), "50x75");
    assert!(a.presentation_markup().unwrap().contains("viewBox=\"0 0 50 75\""));
    // The canonical markup keeps the original attributes.
    assert!(!a.svg_string().contains("viewBox"));
}

#[test]
fn size_in_percent() {
    let a = process_one("<svg width='100%' height='100%'/>");
    assert_eq!(a.width(), None);
    assert_eq!(a.height(), None);
    assert_eq!(a.size_label(), "N/A");
}

#[test]
fn fill_none_removal() {
    let mut a = process_one("<svg fill='none'><path d='M0 0'/></svg>");
    assert!(a.remove_fill_none());
    assert!(!a.svg_string().contains("fill"));

    let mut a = process_one("<svg fill='none' stroke='red'><path d='M0 0'/></svg>");
    assert!(!a.remove_fill_none());
    assert!(a.svg_string().contains("fill=\"none\""));
}

#[test]
fn white_fill() {
    let list = process_markup(&[
        "<svg><path fill='#ffffff'/></svg>",
        "<svg><path fill='#000'/></svg>",
    ]);
    assert!(list[0].white_fill());
    assert!(!list[1].white_fill());
}

#[test]
fn object_is_inlined() {
    let a = process_one("<object data='icon.svg'/>");
    assert_eq!(a.data_src_href(), Some("icon.svg"));
    assert_eq!(a.embedding_type(), EmbeddingType::Inline);
    assert_eq!(a.size_label(), "24x24");
}

#[test]
fn duplicates_are_merged() {
    let list = process_markup(&[
        "<svg viewBox='0 0 8 8'><rect/></svg>",
        "<div/>",
        "<svg   viewBox=\"0 0 8 8\"><rect></rect></svg>",
        "<svg viewBox='0 0 9 9'/>",
    ]);

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id().get(), 1);
    assert_eq!(list[1].id().get(), 4);
}

#[test]
fn fetch_failures_are_isolated() {
    let list = process_markup(&[
        "<img src='icon.svg'/>",
        "<img src='missing.svg'/>",
        "<img src='other.svg'/>",
    ]);

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].img_src_href(), Some("icon.svg"));
    assert_eq!(list[1].img_src_href(), Some("other.svg"));
    assert_eq!(list[1].size_label(), "32x16");
}

#[test]
fn sprite_sheet_is_expanded() {
    let list = process_markup(&["<img src='/img/sheet.svg'/>"]);
    assert_eq!(list.len(), 3);
    assert!(list.iter().all(|a| a.embedding_type() == EmbeddingType::Sprite));

    let labels: Vec<_> = list.iter().map(|a| a.size_label()).collect();
    assert_eq!(labels, vec!["16x16", "20x20", "24x24"]);
    assert!(list[1].svg_string().contains("<use xlink:href=\"#user\"/>"));
}

#[test]
fn use_reference_into_sprite_sheet() {
    let a = process_one("<svg class='icon'><use href='../img/sheet.svg#gear'/></svg>");
    assert_eq!(a.embedding_type(), EmbeddingType::Sprite);
    assert_eq!(a.size_label(), "24x24");
    assert!(a.svg_string().contains("<symbol id=\"gear\""));
}

#[test]
fn svg_with_content_keeps_external_use() {
    let a = process_one(
        "<svg viewBox='0 0 10 10'><circle r='5'/><use href='../img/sheet.svg#gear'/></svg>",
    );
    assert_eq!(a.embedding_type(), EmbeddingType::Inline);
    assert_eq!(a.size_label(), "10x10");
    assert!(a.svg_string().contains("<circle r=\"5\"/>"));
}

#[test]
fn svgz_is_decompressed() {
    let a = process_one("<img src='packed.svgz'/>");
    assert_eq!(a.embedding_type(), EmbeddingType::Inline);
    assert_eq!(a.size_label(), "32x16");
}

#[test]
fn svgz_size_limit_applies_to_decompressed_data() {
    let candidates = vec![Candidate::Markup("<img src='big.svgz'/>".to_string())];

    let mut opt = Options::default();
    opt.max_fetch_size = 4096;
    let list: Vec<SvgArtifact<Element>> = Pipeline::new(opt, server).process(candidates.clone(), LOCATION);
    assert!(list.is_empty());

    let list: Vec<SvgArtifact<Element>> =
        Pipeline::new(Options::default(), server).process(candidates, LOCATION);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].size_label(), "8x8");
}

#[test]
fn html_start_tags() {
    let list = process_markup(&[
        "<img src=\"icon.svg\">",
        "<object data=\"other.svg\"><img src=\"other.png\"></object>",
    ]);

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].img_src_href(), Some("icon.svg"));
    assert_eq!(list[0].size_label(), "24x24");
    assert_eq!(list[1].data_src_href(), Some("other.svg"));
    assert_eq!(list[1].size_label(), "32x16");
}

#[test]
fn base64_data_uri_is_decoded_locally() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let counting = |url: &str| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        server(url)
    };

    // <svg width="3" height="4"/>
    let candidates = vec![Candidate::Markup(
        "<img src='data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMyIgaGVpZ2h0PSI0Ii8+'/>".to_string(),
    )];
    let list: Vec<SvgArtifact<Element>> =
        Pipeline::new(Options::default(), counting).process(candidates, LOCATION);

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].size_label(), "3x4");
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn utf8_data_uri_is_parsed() {
    let mut img = Element::new("img");
    img.set_attribute(
        "src",
        "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 6 6'></svg>",
    );

    let list = process(vec![Candidate::Node(img.clone())]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].embedding_type(), EmbeddingType::ImgSrc);
    assert_eq!(list[0].size_label(), "6x6");
    // The candidate node is an owned copy and stays intact.
    assert!(img.has_name("img"));
}

#[test]
fn utf8_data_uri_mentioning_svg_file() {
    let mut img = Element::new("img");
    img.set_attribute(
        "src",
        "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 4 4'>\
         <title>logo.svg</title><path fill='#000' d='M0 0'/></svg>",
    );

    let list = process(vec![Candidate::Node(img)]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].embedding_type(), EmbeddingType::ImgSrc);
    assert_eq!(list[0].size_label(), "4x4");
    assert!(list[0].svg_string().contains("<title>logo.svg</title>"));
}

#[test]
fn background_image() {
    let list = process(vec![
        Candidate::BackgroundImage("url(\"icon.svg\")".to_string()),
        Candidate::BackgroundImage("url(photo.png)".to_string()),
    ]);

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].img_src_href(), Some("icon.svg"));
    assert_eq!(list[0].embedding_type(), EmbeddingType::Inline);
}

#[test]
fn cross_origin_presentation() {
    let list = process_markup(&[
        "<img src='https://cdn.example.org/logo.svg'/>",
        "<svg width='40' height='10' class='logo'><rect/></svg>",
    ]);

    assert_eq!(list.len(), 2);

    assert!(list[0].is_cross_origin());
    let markup = list[0].presentation_markup().unwrap();
    assert!(markup.contains("width=\"40\""));
    assert!(markup.contains("class=\"logo\""));

    assert!(!list[1].is_cross_origin());
    let markup = list[1].presentation_markup().unwrap();
    assert!(!markup.contains("width="));
    assert!(!markup.contains("class="));
}

#[test]
fn malformed_markup_is_skipped() {
    let list = process_markup(&["<svg><g></svg>", "<svg id='ok'/>"]);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id().get(), 2);
}
