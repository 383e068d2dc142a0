// `munibot chat` — interactive terminal REPL.
//
// Each submitted line runs the full query cycle: analysis, paced status
// narration on a spinner, then the composed response. Responses that carry
// option buttons are numbered; typing a number triggers the matching action
// against the current primary department.
//
// Usage:
//   munibot chat                 # interactive session
//   munibot chat --no-history    # don't load or save the transcript

use std::io::{self, Write as IoWrite};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::agent::SuperAgent;
use crate::catalog::Department;
use crate::composer::{AgentResponse, ResponseOption};
use crate::config::MunibotConfig;
use crate::narrator;
use crate::session::{history_path, ChatHistory};

/// Options for the `munibot chat` command.
#[derive(Debug, Default)]
pub struct ChatOpts {
    /// Skip loading and saving the transcript file.
    pub no_history: bool,
    /// Suppress the banner and sources footer.
    pub quiet: bool,
}

/// Entry point for `munibot chat`.
pub async fn run_chat(opts: ChatOpts, config: &MunibotConfig) -> Result<()> {
    let agent = super::build_agent(config)?;
    let path = history_path(&config.data_dir);
    let mut history = if opts.no_history {
        ChatHistory::new(config.history_limit)
    } else {
        ChatHistory::load(&path, config.history_limit)
    };

    if !opts.quiet {
        println!("munibot — St. Louis municipal services assistant (demo)");
        println!("Type a question, a number to pick an option, or 'exit' to quit.\n");
    }

    // Options from the previous response, for number shortcuts.
    let mut pending: Option<(Department, Vec<ResponseOption>)> = None;

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        // A bare number picks an option button from the previous response.
        if let Ok(n) = input.parse::<usize>() {
            if let Some((dept, options)) = pending.clone() {
                if n >= 1 && n <= options.len() {
                    let option = &options[n - 1];
                    debug!(action = %option.action, department = %dept, "option selected");
                    let response = agent.handle_action(dept, &option.action);
                    history.push_user(option.text.clone());
                    pending = print_response(&response, dept, opts.quiet, &mut history);
                } else {
                    println!("No option {n} — pick 1-{} or type a question.", options.len());
                }
                continue;
            }
        }

        history.push_user(input);
        let outcome = agent.submit(input);
        let primary = outcome.analysis.primary;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("static spinner template"),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));

        narrator::play(&outcome.narration, agent.delay_scale(), |update| {
            spinner.set_message(update.message.clone());
        })
        .await;

        let response = agent.resolve(outcome).await;
        spinner.finish_and_clear();

        match response {
            Some(response) => {
                pending = print_response(&response, primary, opts.quiet, &mut history);
            }
            // Latest-wins sequencing; cannot trigger from a serial REPL.
            None => debug!("response superseded before delivery"),
        }
    }

    if !opts.no_history {
        history.save(&path)?;
    }
    Ok(())
}

/// Print a response and record it in the transcript. Returns the option set
/// (scoped to `department`) for number shortcuts on the next prompt.
fn print_response(
    response: &AgentResponse,
    department: Department,
    quiet: bool,
    history: &mut ChatHistory,
) -> Option<(Department, Vec<ResponseOption>)> {
    println!("\n{}\n", response.text);

    if !quiet && !response.sources.is_empty() {
        println!("  sources: {}", response.sources.join(", "));
    }

    let options = response.options.clone().unwrap_or_default();
    if !options.is_empty() {
        for (i, option) in options.iter().enumerate() {
            println!("  [{}] {}", i + 1, option.text);
        }
        println!();
    }

    history.push_agent(response.text.clone(), response.options.clone());

    if options.is_empty() {
        None
    } else {
        Some((department, options))
    }
}
