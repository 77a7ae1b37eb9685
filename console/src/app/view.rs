//! # View Seam
//!
//! Page renderers never print. They hand skeletons, tables and notices to a
//! [`View`]; the terminal implementation writes them to stdout and
//! [`RecordingView`] keeps them for inspection.

use super::pages::dashboard::Dashboard;
use super::state::PageSkeleton;
use crate::table::{SortState, Table};
use parking_lot::Mutex;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// User-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

pub trait View {
    /// Unauthenticated view, optionally with the reason the session ended
    fn show_login(&self, reason: Option<&str>);

    /// Replace the content region with a page skeleton
    fn show_page(&self, skeleton: &PageSkeleton);

    fn show_table(&self, table: &Table, sort: &SortState);

    fn show_dashboard(&self, dashboard: &Dashboard);

    fn show_text(&self, text: &str);

    fn notify(&self, notice: Notice);

    /// Ask before a destructive action
    fn confirm(&self, prompt: &str) -> bool;
}

/// Plain stdout rendering
pub struct TerminalView {
    assume_yes: bool,
}

impl TerminalView {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl View for TerminalView {
    fn show_login(&self, reason: Option<&str>) {
        if let Some(reason) = reason {
            println!("{}", reason);
        }
        println!("Not logged in. Use: login <username> <password>");
    }

    fn show_page(&self, skeleton: &PageSkeleton) {
        println!();
        println!("== {} ==", skeleton.page.title());
        if let Some(hint) = skeleton.search_hint {
            println!("  search: {}", hint);
        }
        for action in &skeleton.actions {
            println!("  action: {}", action);
        }
    }

    fn show_table(&self, table: &Table, sort: &SortState) {
        print!("{}", table.render_text(Some(sort)));
        let _ = io::stdout().flush();
    }

    fn show_dashboard(&self, dashboard: &Dashboard) {
        print!("{}", dashboard.render_text());
        let _ = io::stdout().flush();
    }

    fn show_text(&self, text: &str) {
        println!("{}", text);
    }

    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(m) => println!("{}", m),
            Notice::Success(m) => println!("✔ {}", m),
            Notice::Error(m) => eprintln!("✘ {}", m),
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", prompt);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

/// Everything a [`RecordingView`] was asked to show
#[derive(Debug, Clone)]
pub enum ViewOutput {
    Login(Option<String>),
    Page(PageSkeleton),
    Table(Table),
    Dashboard(Dashboard),
    Text(String),
    Notice(Notice),
}

/// View that records its output. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingView {
    outputs: Arc<Mutex<Vec<ViewOutput>>>,
    confirm_answer: Arc<Mutex<bool>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for every later `confirm` (default: no)
    pub fn answer_confirm(&self, yes: bool) {
        *self.confirm_answer.lock() = yes;
    }

    pub fn outputs(&self) -> Vec<ViewOutput> {
        self.outputs.lock().clone()
    }

    pub fn tables(&self) -> Vec<Table> {
        self.outputs
            .lock()
            .iter()
            .filter_map(|o| match o {
                ViewOutput::Table(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn last_table(&self) -> Option<Table> {
        self.tables().pop()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.outputs
            .lock()
            .iter()
            .filter_map(|o| match o {
                ViewOutput::Notice(n) => Some(n.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(Notice::is_error)
            .map(|n| n.message().to_string())
            .collect()
    }

    pub fn showed_login(&self) -> bool {
        self.outputs
            .lock()
            .iter()
            .any(|o| matches!(o, ViewOutput::Login(_)))
    }

    pub fn clear(&self) {
        self.outputs.lock().clear();
    }

    fn push(&self, output: ViewOutput) {
        self.outputs.lock().push(output);
    }
}

impl View for RecordingView {
    fn show_login(&self, reason: Option<&str>) {
        self.push(ViewOutput::Login(reason.map(str::to_string)));
    }

    fn show_page(&self, skeleton: &PageSkeleton) {
        self.push(ViewOutput::Page(skeleton.clone()));
    }

    fn show_table(&self, table: &Table, _sort: &SortState) {
        self.push(ViewOutput::Table(table.clone()));
    }

    fn show_dashboard(&self, dashboard: &Dashboard) {
        self.push(ViewOutput::Dashboard(dashboard.clone()));
    }

    fn show_text(&self, text: &str) {
        self.push(ViewOutput::Text(text.to_string()));
    }

    fn notify(&self, notice: Notice) {
        self.push(ViewOutput::Notice(notice));
    }

    fn confirm(&self, _prompt: &str) -> bool {
        *self.confirm_answer.lock()
    }
}
