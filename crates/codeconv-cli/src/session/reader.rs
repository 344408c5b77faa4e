//! Line editing on a dedicated thread.
//!
//! `rustyline` blocks while waiting for input, so the editor lives on its
//! own OS thread and the session talks to it through channels. The async
//! side stays free to run the log forwarder and the backend watchers.

use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What one prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl+C at the prompt.
    Interrupted,
    /// Ctrl+D or a closed stdin.
    Eof,
}

/// Handle to the editor thread.
pub struct LineReader {
    prompts: std_mpsc::Sender<String>,
    lines: mpsc::Receiver<ReadOutcome>,
    thread: JoinHandle<()>,
}

impl LineReader {
    /// Start the editor thread, loading and saving history at `history`.
    pub fn spawn(history: Option<PathBuf>) -> Result<Self> {
        let (prompts, prompt_rx) = std_mpsc::channel::<String>();
        let (line_tx, lines) = mpsc::channel(1);
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<(), String>>();

        let thread = thread::Builder::new()
            .name("codeconv-readline".to_string())
            .spawn(move || {
                let mut editor = match DefaultEditor::new() {
                    Ok(editor) => {
                        let _ = ready_tx.send(Ok(()));
                        editor
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                if let Some(path) = &history {
                    load_history(&mut editor, path);
                }

                while let Ok(prompt) = prompt_rx.recv() {
                    let outcome = read_one(&mut editor, &prompt);
                    let done = outcome == ReadOutcome::Eof;
                    if line_tx.blocking_send(outcome).is_err() || done {
                        break;
                    }
                }

                if let Some(path) = &history
                    && let Err(e) = editor.save_history(path)
                {
                    debug!(path = %path.display(), error = %e, "Failed to save session history");
                }
            })
            .context("Failed to spawn line editor thread")?;

        ready_rx
            .recv()
            .context("Line editor thread exited during startup")?
            .map_err(|e| anyhow!("Failed to initialise line editor: {e}"))?;

        Ok(Self {
            prompts,
            lines,
            thread,
        })
    }

    /// Show `prompt` and wait for the next line.
    ///
    /// Returns [`ReadOutcome::Eof`] once the editor thread is gone.
    pub async fn read_line(&mut self, prompt: &str) -> ReadOutcome {
        if self.prompts.send(prompt.to_string()).is_err() {
            return ReadOutcome::Eof;
        }
        self.lines.recv().await.unwrap_or(ReadOutcome::Eof)
    }

    /// Stop the editor thread and wait for it to save the history.
    pub fn close(self) {
        let Self { prompts, thread, .. } = self;
        drop(prompts);
        if thread.join().is_err() {
            warn!("Line editor thread panicked");
        }
    }
}

fn load_history(editor: &mut DefaultEditor, path: &Path) {
    if path.exists()
        && let Err(e) = editor.load_history(path)
    {
        warn!(path = %path.display(), error = %e, "Failed to load session history");
    }
}

fn read_one(editor: &mut DefaultEditor, prompt: &str) -> ReadOutcome {
    match editor.readline(prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }
            ReadOutcome::Line(line)
        }
        Err(ReadlineError::Interrupted) => ReadOutcome::Interrupted,
        Err(ReadlineError::Eof) => ReadOutcome::Eof,
        Err(e) => {
            warn!(error = %e, "Line editor failed");
            ReadOutcome::Eof
        }
    }
}
