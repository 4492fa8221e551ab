//! End-to-end run over a miniature mirror tree: enumerate, extract,
//! reconcile categories, write, and re-run for byte-identical output.

use std::fs;
use std::path::Path;

use mirrorseed::cli::helpers::write_records;
use mirrorseed::extract::ProductExtractor;
use mirrorseed::mirror::Mirror;
use mirrorseed::models::Product;
use mirrorseed::report::JobReport;
use mirrorseed::resolve::CategoryResolver;
use mirrorseed::taxonomy::CANONICAL_CATEGORIES;

const BASE: &str = "https://www.thelaserstore.com";

fn write_page(dir: &Path, html: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("index.html"), html).unwrap();
}

fn gentlemax_page() -> String {
    r#"<html>
<head><title>2019 Candela GentleMax Pro - The Laser Store</title></head>
<body class="single-product category-yag-lasers-for-sale">
  <h1 class="fl-post-title">2019 Candela GentleMax Pro</h1>
  <div class="fl-post-content">
    <div class="fl-rich-text"><p>Fully refurbished dual-wavelength system.</p></div>
    <div class="woocommerce-product-gallery">
      <a href="/wp-content/uploads/2021/04/photo-225x300.jpg"><img src="/t.jpg"></a>
      <a href="https://i0.wp.com/www.thelaserstore.com/wp-content/uploads/2021/04/photo.jpg"><img src="/t.jpg"></a>
    </div>
    <table class="shop_attributes">
      <tr><th>Manufacturer</th><td>Candela</td></tr>
      <tr><th>Model</th><td>GentleMax Pro</td></tr>
    </table>
  </div>
</body>
</html>"#
        .to_string()
}

fn run_products(mirror: &Mirror) -> (Vec<Product>, JobReport) {
    let extractor = ProductExtractor::new(BASE);
    let mut report = JobReport::default();
    let mut products = Vec::new();
    for (slug, dir) in mirror.subdirs("product") {
        let page = match mirrorseed::mirror::MirrorPage::load(&dir) {
            Ok(page) => page,
            Err(_) => {
                report.skipped += 1;
                continue;
            }
        };
        products.push(extractor.extract(&page, &slug, &mut report));
    }
    products.sort_by(|a, b| a.slug.cmp(&b.slug));
    report.produced = products.len();
    (products, report)
}

#[test]
fn product_pipeline_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    write_page(
        &tmp.path().join("product/2019-candela-gentlemax-pro"),
        &gentlemax_page(),
    );

    let mirror = Mirror::new(tmp.path());
    let (products, report) = run_products(&mirror);
    assert_eq!(report.produced, 1);

    let p = &products[0];
    assert_eq!(p.slug, "2019-candela-gentlemax-pro");
    assert_eq!(p.title, "2019 Candela GentleMax Pro");
    assert_eq!(p.year, Some(2019));
    assert_eq!(p.price, None);
    assert!(p.call_for_price);
    assert_eq!(p.manufacturer.as_deref(), Some("Candela"));
    assert_eq!(p.model.as_deref(), Some("GentleMax Pro"));

    // Proxy-wrapped and size-suffixed variants collapse to one canonical URL.
    assert_eq!(
        p.images,
        vec![format!("{BASE}/wp-content/uploads/2021/04/photo.jpg")]
    );

    // The body-class label reconciles to its canonical taxonomy slug.
    let mut resolver = CategoryResolver::from_taxonomy(CANONICAL_CATEGORIES);
    let slugs: Vec<String> = p
        .categories
        .iter()
        .filter_map(|label| resolver.resolve(label))
        .collect();
    assert_eq!(slugs, vec!["yag-lasers-for-sale"]);
    assert!(resolver.unmatched().is_empty());
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    write_page(
        &tmp.path().join("product/2019-candela-gentlemax-pro"),
        &gentlemax_page(),
    );
    write_page(
        &tmp.path().join("product/2016-cynosure-elite"),
        "<html><body class=\"category-alexandrite-lasers-for-sale\">\
         <h1 class=\"fl-post-title\">2016 Cynosure Elite</h1></body></html>",
    );

    let mirror = Mirror::new(tmp.path());
    let out = tmp.path().join("out/products.json");

    let (products, _) = run_products(&mirror);
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].slug, "2016-cynosure-elite"); // sorted by slug
    write_records(&out, &products).unwrap();
    let first = fs::read(&out).unwrap();

    let (products, _) = run_products(&mirror);
    write_records(&out, &products).unwrap();
    let second = fs::read(&out).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_index_is_skipped_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("product/empty-dir")).unwrap();
    write_page(
        &tmp.path().join("product/real-item"),
        "<html><body><h1 class=\"fl-post-title\">Real Item</h1></body></html>",
    );

    let mirror = Mirror::new(tmp.path());
    let (products, report) = run_products(&mirror);
    assert_eq!(products.len(), 1);
    assert_eq!(report.skipped, 1);
}
