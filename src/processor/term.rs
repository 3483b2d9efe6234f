//! Terminal implementation of the console reporting sink.
//!
//! Renders the count-based progress indicator with a styled progress bar,
//! highlights error banners in color and answers confirmation prompts from
//! stdin.

use std::io::{self, Write};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::console::{Console, Verbosity};
use crate::{Error, Result};

/// Console sink writing to the attached terminal
pub struct TermConsole {
    verbosity: Verbosity,
    progress: Option<ProgressBar>,
}

impl TermConsole {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            progress: None,
        }
    }

    fn read_answer(question: &str) -> Result<bool> {
        loop {
            print!("{} [Y/n]: ", question);
            io::stdout().flush().map_err(Error::Io)?;

            let mut input = String::new();
            io::stdin().read_line(&mut input).map_err(Error::Io)?;

            match input.trim().to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please enter 'y' for yes or 'n' for no."),
            }
        }
    }
}

impl Console for TermConsole {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn progress_start(&mut self, total: u64) {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%)",
                )
                .unwrap()
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        self.progress = Some(pb);
    }

    fn progress_advance(&mut self) {
        if let Some(ref pb) = self.progress {
            pb.inc(1);
        }
    }

    fn progress_finish(&mut self) {
        if let Some(ref pb) = self.progress {
            pb.finish();
            println!();
        }
    }

    fn comment(&mut self, text: &str) {
        println!("{}", format!("// {}", text).bright_black());
    }

    fn field_list(&mut self, fields: &[(String, String)]) {
        for (name, value) in fields {
            println!("  {:<24} {}", name.bold(), value);
        }
        println!();
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        // Keep the prompt legible while a progress bar is live
        if let Some(ref pb) = self.progress {
            pb.suspend(|| Self::read_answer(question))
        } else {
            Self::read_answer(question)
        }
    }

    fn error_block(&mut self, message: &str) {
        eprintln!("{}", format!("[ERROR] {}", message).red().bold());
    }

    fn listing(&mut self, items: &[String]) {
        for item in items {
            println!(" * {}", item);
        }
    }
}
