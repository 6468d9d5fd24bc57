//! Daily cashflow and ranking report over the sample feed.
//!
//! Shows the weekend rule at work: the Friday AED trade and the Saturday
//! SGP trades all roll forward before being aggregated.

use cashflow_report::core::transaction::CashflowDirection;
use cashflow_report::input::sample::SAMPLE_FEED;
use cashflow_report::report::engine::ReportEngine;
use cashflow_report::report::output::ConsoleOutput;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  cashflow-report: Daily Cashflow Example ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut engine = ReportEngine::new(SAMPLE_FEED, ConsoleOutput::new());

    println!("━━━ Settlement Adjustments ━━━\n");
    for entity in engine.entity_ledger().iter() {
        for tx in entity.transactions() {
            println!(
                "  {:<10} {:<4} desired {}  actual {}",
                entity.name(),
                tx.currency(),
                tx.desired_settlement_date().format("%a %d %b %Y"),
                tx.actual_settlement_date().format("%a %d %b %Y"),
            );
        }
    }
    println!();

    println!("━━━ Daily Summary ━━━\n");
    engine.print_daily_summaries();
    println!();

    println!("━━━ Top Incoming Counterparty ━━━\n");
    if let Some(top) = engine.ranking(CashflowDirection::Incoming).first() {
        println!("  {} with {} USD", top.entity, top.total.round_dp(2));
    }
    println!();

    engine.print_ranking(CashflowDirection::Outgoing);

    let stats = engine.ingest_stats();
    println!(
        "\n{} lines read, {} records, {} dropped",
        stats.lines, stats.records, stats.dropped
    );
}
