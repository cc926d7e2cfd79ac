//! Net Worth Engine CLI
//!
//! Runs the demo household through a ten-year scenario and prints the
//! resulting projection

use networth_engine::{
    AuthContext, ProjectionRequest, ProjectionService, ScenarioConfig, StaticAccountStore,
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Net Worth Engine v0.1.0");
    println!("=======================\n");

    let store = StaticAccountStore::demo();
    println!("Snapshot: {} accounts, {} recurring expenses",
        store.accounts.len(),
        store.recurring_expenses.len());
    for account in &store.accounts {
        println!("  {:<12} {:<12} ${:>12.2}",
            account.id,
            account.account_type.as_str(),
            account.balance);
    }
    println!();

    let service = ProjectionService::new(Box::new(store.clone()), Box::new(store));
    let request = ProjectionRequest {
        config: ScenarioConfig::default(),
    };

    let result = service
        .project(&AuthContext::new("demo-user"), &request)
        .expect("demo projection should run");

    // Print header
    println!("Projection Results ({} months):", result.months());
    println!("{:>5} {:>14} {:>14} {:>14} {:>12} {:>12} {:>12}",
        "Month", "NetWorth", "Assets", "Liabilities", "Income", "Expenses", "Net");
    println!("{}", "-".repeat(90));

    // Print first 24 months to console
    for month in 0..result.months().min(25) {
        println!("{:>5} {:>14.2} {:>14.2} {:>14.2} {:>12.2} {:>12.2} {:>12.2}",
            result.net_worth[month].month,
            result.net_worth[month].value,
            result.assets[month].value,
            result.liabilities[month].value,
            result.cash_flow[month].income,
            result.cash_flow[month].expenses,
            result.cash_flow[month].net,
        );
    }

    if result.months() > 25 {
        println!("... ({} more months)", result.months() - 25);
    }

    // Write full results to CSV
    let csv_path = "projection_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");

    writeln!(file, "Month,NetWorth,Assets,Liabilities,Income,Expenses,Net,TotalDebt").unwrap();
    for month in 0..result.months() {
        writeln!(file, "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            result.net_worth[month].month,
            result.net_worth[month].value,
            result.assets[month].value,
            result.liabilities[month].value,
            result.cash_flow[month].income,
            result.cash_flow[month].expenses,
            result.cash_flow[month].net,
            result.debt_payoff[month].total_debt,
        ).unwrap();
    }

    println!("\nFull results written to: {}", csv_path);

    // Print summary
    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_months);
    println!("  Initial Net Worth: ${:.2}", summary.initial_net_worth);
    println!("  Final Net Worth: ${:.2}", summary.final_net_worth);
    println!("  Net Worth Change: ${:.2}", summary.net_worth_change);
    println!("  Total Income: ${:.2}", summary.total_income);
    println!("  Total Expenses: ${:.2}", summary.total_expenses);
    println!("  Final Total Debt: ${:.2}", summary.final_total_debt);
    match summary.debt_free_month {
        Some(month) => println!("  Debt-Free Month: {}", month),
        None => println!("  Debt-Free Month: not reached"),
    }

    // Print key milestone months for validation
    println!("\nKey Milestones:");
    let milestones = [1, 12, 24, 60, 120];
    for &month in &milestones {
        if let Some(point) = result.net_worth.get(month) {
            println!("  Month {:>3}: NetWorth={:.2} Assets={:.2} Debt={:.2}",
                month,
                point.value,
                result.assets[month].value,
                result.debt_payoff[month].total_debt);
        }
    }
}
