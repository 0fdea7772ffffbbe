use crate::crawler::CrawlReport;

/// One line per discovered link, tab-indented by depth.
/// Verbose output names the worker that found each link.
pub fn render_discoveries(report: &CrawlReport, verbose: bool) -> Vec<String> {
    report
        .levels
        .iter()
        .flat_map(|level| level.discovered.iter())
        .map(|discovery| {
            let indent = "\t".repeat(discovery.depth);
            if verbose {
                format!("{}[worker {}] {}", indent, discovery.worker_id, discovery.url)
            } else {
                format!("{}{}", indent, discovery.url)
            }
        })
        .collect()
}

pub fn render_summary(report: &CrawlReport) -> String {
    let stats = &report.stats;
    format!(
        "Crawled {} level(s) from {}: {} page(s) fetched, {} link(s) discovered, {} fetch failure(s), {} invalid and {} duplicate link(s) skipped",
        report.levels.len(),
        report.seed,
        stats.pages_fetched,
        stats.links_discovered,
        stats.fetch_failures,
        stats.invalid_links,
        stats.duplicate_links,
    )
}

pub fn print_report(report: &CrawlReport, verbose: bool) {
    for line in render_discoveries(report, verbose) {
        println!("{}", line);
    }
    println!("{}", render_summary(report));
}
