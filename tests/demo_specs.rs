//! Every file under `demos/` must parse and draw something.
//!
//! Files with an `answer` are question items; they also have to arm as the
//! kind of question they look like.

use datatest_stable::Utf8Path;
use geofig::{Container, DiagramSpec, geo_click, geo_place, parse_item, parse_spec, render};
use regex_lite::Regex;

fn check_svg(path: &Utf8Path, svg: &str) {
    assert!(svg.starts_with("<svg"), "{path}: not an svg document");
    assert!(svg.trim_end().ends_with("</svg>"), "{path}: unterminated svg");
    let numbers = Regex::new(r#"\s(?:x|y|cx|cy|r|x1|y1|x2|y2)="([^"]*)""#).unwrap();
    for cap in numbers.captures_iter(svg) {
        let value: f64 = cap[1]
            .parse()
            .unwrap_or_else(|_| panic!("{path}: non-numeric coordinate {:?}", &cap[1]));
        assert!(value.is_finite(), "{path}: non-finite coordinate");
    }
}

fn test_demo_file(path: &Utf8Path) -> datatest_stable::Result<()> {
    let source = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&source)?;

    if json.get("answer").is_none() {
        let spec = parse_spec(path.as_str(), &source)?;
        assert!(!matches!(spec, DiagramSpec::Unknown), "{path}: unknown type");
        let mut container = Container::new();
        let figure = render(&mut container, Some(&spec))
            .unwrap_or_else(|| panic!("{path}: nothing rendered"));
        check_svg(path, &figure.surface().borrow().to_svg());
        return Ok(());
    }

    let item = parse_item(path.as_str(), &source)?;
    let mut container = Container::new();
    let is_place = matches!(item.diagram, Some(DiagramSpec::GridPlace(_)));
    if is_place {
        let (session, _rx) = geo_place(&mut container, &item);
        assert!(!session.is_resolved(), "{path}: placement settled on render");
        assert_eq!(container.widgets().count(), 2);
    } else {
        let (session, _rx) = geo_click(&mut container, &item);
        assert!(!session.is_resolved(), "{path}: no targets to click");
    }
    for svg in container.to_svg() {
        check_svg(path, &svg);
    }
    Ok(())
}

datatest_stable::harness! {
    { test = test_demo_file, root = concat!(env!("CARGO_MANIFEST_DIR"), "/demos"), pattern = r"\.json$" },
}
