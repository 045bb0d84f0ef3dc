// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod input;
mod output;

pub use args::{Args, ConfidenceArg, FallbackArg, OutputFormat};
pub use input::{collect_article_files, collect_articles, Article};
pub use output::{format_html, format_json, format_outcome, format_status, format_summary, Report};

use anyhow::{Context, Result};
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::core::Pipeline;
use crate::detection::Outcome;

/// Run the CLI with parsed arguments
pub fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;
    let pipeline = Pipeline::from_config(config);

    if args.status {
        print!("{}", format_status(&pipeline));
        return Ok(());
    }

    let articles = collect_articles(args)?;
    if articles.is_empty() {
        println!("{}", "No articles found!".red());
        return Ok(());
    }

    let outcomes = analyze_all(&pipeline, &articles);

    match args.format {
        OutputFormat::Text => {
            for (article, outcome) in articles.iter().zip(&outcomes) {
                println!("{}", format_outcome(&article.source, outcome, args.verbose));
            }
            if outcomes.len() > 1 {
                let refs: Vec<&Outcome> = outcomes.iter().collect();
                let stats = pipeline.stats();
                print!("{}", format_summary(&refs, args.verbose.then_some(&stats)));
            }
        }
        OutputFormat::Json => {
            let results: Vec<(&str, &Outcome)> = articles
                .iter()
                .map(|a| a.source.as_str())
                .zip(&outcomes)
                .collect();
            println!("{}", format_json(&results).context("serializing results")?);
        }
        OutputFormat::Html => {
            for outcome in &outcomes {
                print!("{}", format_html(outcome));
            }
        }
    }

    Ok(())
}

/// Analyze every article; several articles are spread over the rayon pool
pub fn analyze_all(pipeline: &Pipeline, articles: &[Article]) -> Vec<Outcome> {
    if articles.len() == 1 {
        return vec![pipeline.analyze(&articles[0].text)];
    }

    let progress = ProgressBar::new(articles.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40.cyan/blue}] {pos}/{len} articles")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let outcomes = articles
        .par_iter()
        .progress_with(progress.clone())
        .map(|article| pipeline.analyze(&article.text))
        .collect();
    progress.finish_and_clear();
    outcomes
}
