use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};
use pingo_core::stats::Summary;
use pingo_core::{probe_all, Builder, Repository, SharedRepository};
use std::net::Ipv4Addr;
use tracing::instrument;

/// Generate a Markdown table report of the targets.
#[instrument(skip_all, level = "trace")]
pub fn report_md(builder: &Builder, targets: &[Ipv4Addr]) -> anyhow::Result<()> {
    run_report_table(builder, targets, ASCII_MARKDOWN)
}

/// Generate a pretty table report of the targets.
#[instrument(skip_all, level = "trace")]
pub fn report_pretty(builder: &Builder, targets: &[Ipv4Addr]) -> anyhow::Result<()> {
    run_report_table(builder, targets, UTF8_FULL)
}

fn run_report_table(builder: &Builder, targets: &[Ipv4Addr], preset: &str) -> anyhow::Result<()> {
    let repository = SharedRepository::new();
    let results = probe_all(builder, targets, &repository);
    for (target, result) in targets.iter().zip(results) {
        if let Err(err) = result {
            eprintln!("{target}: {err}");
        }
    }
    println!("{}", make_table(&repository.snapshot(), preset));
    Ok(())
}

fn make_table(repository: &Repository, preset: &str) -> Table {
    let columns = vec![
        "#", "Host", "Loss%", "Snt", "Recv", "Avg", "Best", "Wrst", "StDev",
    ];
    let mut table = Table::new();
    table
        .load_preset(preset)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns);
    for (i, record) in repository.list().iter().enumerate() {
        table.add_row(make_row(i + 1, &Summary::from(record)));
    }
    table
}

fn make_row(number: usize, summary: &Summary) -> Vec<String> {
    let fmt = |val: Option<f64>| val.map_or_else(|| String::from("???"), |val| format!("{val:.1}"));
    vec![
        number.to_string(),
        summary.target.to_string(),
        fmt(summary.loss_pct()),
        summary.sent.to_string(),
        summary.received.to_string(),
        fmt(summary.avg_ms()),
        fmt(summary.best_ms()),
        fmt(summary.worst_ms()),
        format!("{:.1}", summary.stddev_ms),
    ]
}
