use clap::Subcommand;
use glowtrack_core::ReportHistory;

use super::open_database;

#[derive(Subcommand)]
pub enum ReportsAction {
    /// List stored reports, newest first
    List,
    /// Show the most recent report
    Latest,
}

pub async fn run(action: ReportsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (_, db) = open_database()?;
    let history = ReportHistory::new(db);

    match action {
        ReportsAction::List => {
            let reports = history.list().await;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        ReportsAction::Latest => match history.latest().await {
            Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
            None => return Err("no reports stored".into()),
        },
    }
    Ok(())
}
