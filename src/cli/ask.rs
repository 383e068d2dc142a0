// `munibot ask` and `munibot analyze` — one-shot, script-friendly commands.

use anyhow::Result;

use crate::config::MunibotConfig;
use crate::narrator;

/// Run a single query and print the response. With `json`, the full
/// response payload is emitted instead of display text.
pub async fn run_ask(query: &str, json: bool, quiet: bool, config: &MunibotConfig) -> Result<()> {
    let agent = super::build_agent(config)?;
    let outcome = agent.submit(query);

    if !json && !quiet {
        narrator::play(&outcome.narration, agent.delay_scale(), |update| {
            eprintln!("  … {}", update.message);
        })
        .await;
    }

    // A one-shot command has no competing submission, so the response always
    // resolves.
    let response = agent
        .resolve(outcome)
        .await
        .expect("single submission is never superseded");

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.text);
        if !quiet && !response.sources.is_empty() {
            println!("\nsources: {}", response.sources.join(", "));
        }
    }
    Ok(())
}

/// Print the query analysis without composing a response.
pub fn run_analyze(query: &str, json: bool, config: &MunibotConfig) -> Result<()> {
    let agent = super::build_agent(config)?;
    let outcome = agent.submit(query);
    let analysis = &outcome.analysis;

    if json {
        println!("{}", serde_json::to_string_pretty(analysis)?);
        return Ok(());
    }

    println!("query:       {query}");
    println!("primary:     {}", analysis.primary);
    println!(
        "secondaries: {}",
        if analysis.secondaries.is_empty() {
            "(none)".to_string()
        } else {
            analysis
                .secondaries
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!("complexity:  {}", analysis.complexity);
    println!(
        "intents:     {}",
        if analysis.intents.is_empty() {
            "(none)".to_string()
        } else {
            analysis
                .intents
                .iter()
                .map(|i| i.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!("keywords:    {}", analysis.keywords.join(", "));
    println!("scores:");
    for (dept, score) in &analysis.scores {
        if *score > 0 {
            println!("  {dept:<10} {score}");
        }
    }
    Ok(())
}
