use camino::{Utf8Path, Utf8PathBuf};
use geofig::{Container, geo_click, geo_place, parse_item, parse_spec, render};
use rayon::prelude::*;
use std::fs;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery          Render every demo into gallery.html");
        eprintln!("  render <file>    Render one spec or item to stdout");
        std::process::exit(1);
    }

    let result = match (args[1].as_str(), args.get(2)) {
        ("gallery", _) => gallery(),
        ("render", Some(file)) => render_file(Utf8Path::new(file)).map(|html| println!("{html}")),
        _ => {
            eprintln!("Unknown command: {}", args[1..].join(" "));
            std::process::exit(1);
        }
    };
    if let Err(report) = result {
        eprintln!("{report:?}");
        std::process::exit(1);
    }
}

/// Render a diagram spec, or a question item armed as click or place, to an
/// HTML fragment.
fn render_file(path: &Utf8Path) -> miette::Result<String> {
    let source = fs::read_to_string(path)
        .map_err(|e| miette::miette!("cannot read {path}: {e}"))?;
    let mut container = Container::new();

    if source.contains("\"answer\"") {
        let item = parse_item(path.as_str(), &source)?;
        let is_place = item
            .diagram
            .as_ref()
            .is_some_and(|d| d.snap().is_some());
        // sessions are dropped once drawn; only the armed figure is shown
        if is_place {
            geo_place(&mut container, &item);
        } else {
            geo_click(&mut container, &item);
        }
    } else {
        let spec = parse_spec(path.as_str(), &source)?;
        if render(&mut container, Some(&spec)).is_none() {
            return Ok("<!-- empty geofig diagram -->".to_string());
        }
    }
    Ok(container.to_html())
}

fn gallery() -> miette::Result<()> {
    let root = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..");
    let demos = root.join("demos");
    let output_path = root.join("gallery.html");

    let mut paths: Vec<Utf8PathBuf> = fs::read_dir(&demos)
        .map_err(|e| miette::miette!("cannot read {demos}: {e}"))?
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.extension() == Some("json"))
        .collect();
    paths.sort();

    let cards: Vec<(String, Result<String, String>)> = paths
        .par_iter()
        .map(|path| {
            let name = path.file_stem().unwrap_or(path.as_str()).to_string();
            let rendered = render_file(path).map_err(|report| format!("{report:?}"));
            (name, rendered)
        })
        .collect();

    let failed = cards.iter().filter(|(_, r)| r.is_err()).count();
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>geofig gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #eee; margin: 0; padding: 24px; }
        .card { background: white; border-radius: 8px; display: inline-block; margin: 8px; padding: 12px; vertical-align: top; }
        .card h2 { font-size: 13px; font-weight: 600; margin: 0 0 8px 0; }
        .error { color: #cb2431; font-family: monospace; white-space: pre-wrap; }
    </style>
</head>
<body>
"#,
    );
    for (name, rendered) in &cards {
        let body = match rendered {
            Ok(fragment) => fragment.clone(),
            Err(report) => format!(r#"<div class="error">{}</div>"#, html_escape(report)),
        };
        html.push_str(&format!(
            "<div class=\"card\" id=\"{name}\">\n<h2>{name}</h2>\n{body}</div>\n"
        ));
    }
    html.push_str("</body>\n</html>\n");

    fs::write(&output_path, html).map_err(|e| miette::miette!("cannot write {output_path}: {e}"))?;
    eprintln!(
        "Wrote {output_path} ({} demos, {failed} failed)",
        cards.len()
    );
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
