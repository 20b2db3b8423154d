//! IDE-style dashboard composed against the in-memory toolkit.
//!
//! Builds a navigation pane split against a stacked editor/preview area,
//! a tabbed drawer for the secondary panels, and a status row padded by
//! a trailing spacer. Every container goes through a composer session,
//! so the run ends by printing the container outline, the captured JSONL
//! log, and a metrics summary.
//!
//! ```bash
//! cargo run --example dashboard
//! ```

use std::time::Duration;

use furnish::{
    Child, Composer, ComposerConfig, Container, HeadlessToolkit, Logger, Result, RowOptions,
    SplitOptions, VecSink,
};

const NAV: &str = "nav";
const EDITOR: &str = "editor";
const PREVIEW: &str = "preview";
const SEARCH: &str = "search";
const PROBLEMS: &str = "problems";
const STATUS: &str = "status";
const BRANCH: &str = "branch";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let sink = VecSink::new();
    let mut toolkit = HeadlessToolkit::new();

    let config = ComposerConfig {
        logger: Some(Logger::new(sink.clone())),
        ..ComposerConfig::default()
    };
    let metrics = config.metrics_handle();

    let root = compose_dashboard(&mut toolkit, config)?;

    println!("container tree:");
    print!("{}", toolkit.outline(root.id()));

    println!();
    println!("session log:");
    for event in sink.events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    if let Some(handle) = metrics {
        let snapshot = handle
            .lock()
            .expect("metrics mutex poisoned")
            .snapshot(Duration::ZERO);
        println!();
        println!(
            "composed {} containers, adopted {} children, {} margin fallbacks",
            snapshot.containers, snapshot.children_adopted, snapshot.margin_fallbacks
        );
    }
    Ok(())
}

fn compose_dashboard(toolkit: &mut HeadlessToolkit, config: ComposerConfig) -> Result<Container> {
    let nav = toolkit.create_widget(NAV);
    let editor = toolkit.create_widget(EDITOR);
    let preview = toolkit.create_widget(PREVIEW);
    let search = toolkit.create_widget(SEARCH);
    let problems = toolkit.create_widget(PROBLEMS);
    let status = toolkit.create_widget(STATUS);
    let branch = toolkit.create_widget(BRANCH);

    let mut composer = Composer::with_config(toolkit, config);

    // Editor and preview share one stack; the drawer tabs sit below it.
    let pages = composer.stack(&[editor, preview])?;
    let drawer = composer.tabs(&[(search, "Search"), (problems, "Problems")])?;
    let work = composer.vertical_split(pages.id(), drawer.id())?;
    let body =
        composer.horizontal_split_with(nav, work.id(), SplitOptions::default().with_ratio(0.25))?;
    let footer = composer.row_with(
        &[Child::Widget(status), Child::Widget(branch)],
        RowOptions::default().with_trailing_spacer(),
    )?;
    let root = composer.column(&[body.into(), footer.into()])?;

    composer.emit_metrics();
    Ok(root)
}
