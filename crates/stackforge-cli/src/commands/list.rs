//! Implementation of `stackforge list`.

use stackforge_core::application::{ProviderInfo, list_providers};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let providers: Vec<ProviderInfo> = list_providers()
        .into_iter()
        .filter(|p| match args.framework {
            Some(fw) => p.frameworks.iter().any(|f| f == fw.as_str()),
            None => true,
        })
        .collect();

    match args.format {
        ListFormat::Table => {
            output.header("Available auth providers:")?;
            for line in table_rows(&providers) {
                output.print(&line)?;
            }
        }
        // JSON, plain lists and CSV go to stdout unconditionally so they can
        // be piped even with --quiet.
        ListFormat::Json => output.json(&providers)?,
        ListFormat::List => {
            for p in &providers {
                println!("{}", p.id);
            }
        }
        ListFormat::Csv => {
            for line in csv_rows(&providers) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn table_rows(providers: &[ProviderInfo]) -> Vec<String> {
    let id_width = providers.iter().map(|p| p.id.len()).max().unwrap_or(0).max(2);
    let name_width = providers.iter().map(|p| p.name.len()).max().unwrap_or(0).max(4);

    providers
        .iter()
        .map(|p| {
            let db = if p.requires_database { "db required" } else { "" };
            format!(
                "  {:<id_width$}  {:<name_width$}  {:<8}  {:<11}  {}",
                p.id,
                p.name,
                p.session_strategy,
                db,
                p.frameworks.join(", "),
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

fn csv_rows(providers: &[ProviderInfo]) -> Vec<String> {
    let mut rows = vec!["id,name,session_strategy,requires_database,frameworks".to_string()];
    rows.extend(providers.iter().map(|p| {
        format!(
            "{},{},{},{},\"{}\"",
            p.id,
            p.name,
            p.session_strategy,
            p.requires_database,
            p.frameworks.join(";"),
        )
    }));
    rows
}
