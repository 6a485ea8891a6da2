//! Requests share templates and collaborators but no mutable state.

mod common;

use std::sync::Arc;
use std::thread;

use prodcfg_core::{CellRef, Source};
use prodcfg_engine::ResolveMode;
use prodcfg_traits::catalog::ProductCatalog;
use rust_decimal_macros::dec;

use common::{banner, catalog, configurator, configurator_over};

#[test]
fn test_parallel_requests_are_independent() {
    let engine = Arc::new(configurator());
    let cases = [
        ("hoodie", "L/white/2", "S/none/2"),
        ("hoodie", "L/black/600", "L/black/500"),
        ("banner", "mesh/400/2", "mesh/300/2"),
        ("banner", "vinyl/400/2", "vinyl/400/2"),
        ("tshirt", "L", "S"),
        ("tshirt", "M", "M"),
    ];

    let handles: Vec<_> = cases
        .iter()
        .cycle()
        .take(48)
        .map(|&(name, path, expected)| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let product = engine
                    .configure(name, Some(path), ResolveMode::Lenient)
                    .unwrap();
                assert_eq!(product.config_path, expected, "{name} {path}");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_resolution_leaves_cached_template_untouched() {
    let catalog = Arc::new(catalog());
    let engine = configurator_over(Arc::clone(&catalog));
    let before = catalog.definition("banner").unwrap().unwrap();

    let product = engine
        .configure("banner", Some("mesh/400/2"), ResolveMode::Lenient)
        .unwrap();
    let width = product.parameters[1].numeric().unwrap();
    assert_eq!(width.max, Some(Source::Literal(dec!(300))));
    assert!(product.parameters[0].options()[1].selected);

    let after = catalog.definition("banner").unwrap().unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(*after, banner());

    let width = after.parameter("width").unwrap().numeric().unwrap();
    assert_eq!(width.max, Some(Source::Cell(CellRef::parse("E4").unwrap())));
    assert_eq!(width.value, dec!(100));
    assert!(after.parameters.iter().all(|p| p.enabled.is_none()));
    assert!(after.parameters[0]
        .options()
        .iter()
        .all(|o| o.enabled.is_none() && !o.selected));
}
