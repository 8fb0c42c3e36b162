use std::io::Write;
use sw_core::{Error, Result};
use sw_render::{RenderTarget, TextTarget};
use sw_widget::{Controller, ViewTree, WidgetState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Prints the widget's result container to a terminal.
pub struct TerminalHost<W: Write> {
    out: W,
    target: TextTarget,
    printed: usize,
    generation: u64,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            target: TextTarget,
            printed: 0,
            generation: 0,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints entries added since the last flush. A cleared container
    /// starts over.
    pub fn flush(&mut self, view: &ViewTree) -> Result<()> {
        let results = view.results();
        if results.generation() != self.generation {
            self.generation = results.generation();
            self.printed = 0;
        }

        for entry in &results.entries()[self.printed.min(results.len())..] {
            writeln!(self.out, "{}\n", self.target.render_entry(entry))?;
        }
        self.printed = results.len();
        self.out.flush()?;
        Ok(())
    }

    pub fn note(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "({})", text)?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "? ")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Submits one question and prints results as they resolve.
pub async fn ask<W: Write>(
    controller: &mut Controller,
    host: &mut TerminalHost<W>,
    query: &str,
    summary: bool,
) -> Result<()> {
    if controller.state() == WidgetState::Closed {
        controller.toggle()?;
    }
    controller.set_summary(summary)?;
    controller.type_query(query)?;
    controller.submit()?;
    drain(controller, host).await
}

async fn drain<W: Write>(controller: &mut Controller, host: &mut TerminalHost<W>) -> Result<()> {
    host.flush(controller.view())?;
    while controller.pump().await? {
        host.flush(controller.view())?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Open,
    Close,
    Summary(bool),
    Help,
    Quit,
    Ask(String),
}

pub fn parse_line(line: &str) -> std::result::Result<ReplCommand, String> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        // Blank lines are questions too; the widget reports them
        return Ok(ReplCommand::Ask(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open"), None) => Ok(ReplCommand::Open),
        (Some("close"), None) => Ok(ReplCommand::Close),
        (Some("summary"), Some("on")) => Ok(ReplCommand::Summary(true)),
        (Some("summary"), Some("off")) => Ok(ReplCommand::Summary(false)),
        (Some("help"), None) => Ok(ReplCommand::Help),
        (Some("quit"), None) | (Some("q"), None) => Ok(ReplCommand::Quit),
        _ => Err(format!("Unknown command: {}", trimmed)),
    }
}

const HELP: &str = "type a question, or :open, :close, :summary on|off, :help, :quit";

/// Reads commands and questions line by line until `:quit` or end of input.
pub async fn repl<R, W>(
    controller: &mut Controller,
    host: &mut TerminalHost<W>,
    input: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    host.note(HELP)?;

    loop {
        host.prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                host.note(&message)?;
                continue;
            }
        };

        match command {
            ReplCommand::Open if controller.state() == WidgetState::Closed => {
                controller.toggle()?;
                host.note("opened")?;
            }
            ReplCommand::Close if controller.state() != WidgetState::Closed => {
                controller.toggle()?;
                host.note("closed")?;
            }
            ReplCommand::Open | ReplCommand::Close => host.note("nothing to do")?,
            ReplCommand::Summary(enabled) => {
                controller.set_summary(enabled)?;
                host.note(if enabled { "summary on" } else { "summary off" })?;
            }
            ReplCommand::Help => host.note(HELP)?,
            ReplCommand::Quit => break,
            ReplCommand::Ask(question) => {
                controller.type_query(&question)?;
                match controller.submit() {
                    Ok(()) => drain(controller, host).await?,
                    Err(Error::InvalidTransition(_)) => {
                        host.note("the widget is closed, type :open first")?
                    }
                    Err(err) => return Err(err),
                }
            }
        }
    }

    controller.teardown();
    Ok(())
}
