//! Test utilities and mock infrastructure for processor lifecycle testing.
//!
//! Provides a recording console that captures every reporting call and plays
//! back scripted confirmation answers, plus a scripted handler that records
//! lifecycle invocations and fails on demand.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

use anyhow::bail;

use super::console::{Console, Verbosity};
use super::lifecycle::{ErrorLedger, Handler};
use crate::Result;
use crate::exchange::Message;
use crate::reader::Record;


/// One captured reporting call
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    ProgressStart(u64),
    ProgressAdvance,
    ProgressFinish,
    Comment(String),
    FieldList(Vec<(String, String)>),
    Confirm(String),
    ErrorBlock(String),
    Listing(Vec<String>),
}

/// Console sink recording every call; confirmation answers are scripted and
/// default to yes once the script runs out
pub struct RecordingConsole {
    verbosity: Verbosity,
    pub events: Vec<ConsoleEvent>,
    answers: VecDeque<bool>,
}

impl RecordingConsole {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            events: Vec::new(),
            answers: VecDeque::new(),
        }
    }

    pub fn with_answers(mut self, answers: &[bool]) -> Self {
        self.answers = answers.iter().copied().collect();
        self
    }
}

impl Console for RecordingConsole {
    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn progress_start(&mut self, total: u64) {
        self.events.push(ConsoleEvent::ProgressStart(total));
    }

    fn progress_advance(&mut self) {
        self.events.push(ConsoleEvent::ProgressAdvance);
    }

    fn progress_finish(&mut self) {
        self.events.push(ConsoleEvent::ProgressFinish);
    }

    fn comment(&mut self, text: &str) {
        self.events.push(ConsoleEvent::Comment(text.to_string()));
    }

    fn field_list(&mut self, fields: &[(String, String)]) {
        self.events.push(ConsoleEvent::FieldList(fields.to_vec()));
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.events.push(ConsoleEvent::Confirm(question.to_string()));
        Ok(self.answers.pop_front().unwrap_or(true))
    }

    fn error_block(&mut self, message: &str) {
        self.events
            .push(ConsoleEvent::ErrorBlock(message.to_string()));
    }

    fn listing(&mut self, items: &[String]) {
        self.events.push(ConsoleEvent::Listing(items.to_vec()));
    }
}

/// Handler recording lifecycle invocations; item calls fail for scripted
/// iteration indices
#[derive(Default)]
pub struct ScriptedHandler {
    pub events: Vec<String>,
    fail_on: HashSet<u64>,
    fail_batch: bool,
    pub end_ledger: Option<ErrorLedger>,
}

impl ScriptedHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, iterations: &[u64]) -> Self {
        self.fail_on = iterations.iter().copied().collect();
        self
    }

    pub fn failing_on_batch(mut self) -> Self {
        self.fail_batch = true;
        self
    }
}

impl Handler for ScriptedHandler {
    fn on_begin(&mut self, _message: &Message) -> anyhow::Result<()> {
        self.events.push("begin".to_string());
        Ok(())
    }

    fn on_item(&mut self, message: &Message) -> anyhow::Result<()> {
        let iteration = message.current_iteration();
        self.events.push(format!("item:{}", iteration));
        if self.fail_on.contains(&iteration) {
            bail!("unusable record {}", iteration);
        }
        Ok(())
    }

    fn on_batch(&mut self, message: &Message) -> anyhow::Result<()> {
        self.events
            .push(format!("batch:{}", message.current_iteration()));
        if self.fail_batch {
            bail!("flush refused");
        }
        Ok(())
    }

    fn on_end(&mut self, _message: &Message, errors: &ErrorLedger) -> anyhow::Result<()> {
        self.events.push("end".to_string());
        self.end_ledger = Some(errors.clone());
        Ok(())
    }
}

/// Build an item-phase message at the given position
pub fn item_message(current: u64, total: u64) -> Message {
    Message::new(
        "books.csv".to_string(),
        PathBuf::from("/data/books.csv"),
        current,
        total,
        Some(Record::from_pairs(vec![
            ("author".to_string(), format!("Author {}", current)),
            ("title".to_string(), format!("Title {}", current)),
        ])),
        None,
    )
}

/// Build a payload-less boundary message at the given position
pub fn boundary_message(current: u64, total: u64) -> Message {
    Message::new(
        "books.csv".to_string(),
        PathBuf::from("/data/books.csv"),
        current,
        total,
        None,
        None,
    )
}
