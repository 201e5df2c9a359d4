#[cfg(test)]
use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

use similar::TextDiff;

pub const PROMPT: &str = "Do you want to continue? (y/N): ";

/// What currently occupies a prospective link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Absent,
    Symlink,
    RegularFile,
    Directory,
}

/// Classify `target` without following symlinks.
///
/// Special files (fifos, sockets, devices) count as regular files so they go
/// through the same confirmation path.
pub fn classify(target: &Path) -> TargetState {
    match fs::symlink_metadata(target) {
        Err(_) => TargetState::Absent,
        Ok(meta) => {
            let file_type = meta.file_type();
            if file_type.is_symlink() {
                TargetState::Symlink
            } else if file_type.is_dir() {
                TargetState::Directory
            } else {
                TargetState::RegularFile
            }
        }
    }
}

/// Unified diff from the link source to the file currently in its place.
pub fn render_diff(source: &Path, existing: &Path) -> String {
    let mut out = format!("Diff: {} x {}\n", source.display(), existing.display());

    match (read_text(source), read_text(existing)) {
        (Some(old), Some(new)) => {
            let source_label = source.display().to_string();
            let existing_label = existing.display().to_string();
            let diff = TextDiff::from_lines(&old, &new);
            let body = diff
                .unified_diff()
                .context_radius(3)
                .header(&source_label, &existing_label)
                .to_string();

            if body.is_empty() {
                out.push_str("(files are identical)\n");
            } else {
                out.push_str(&body);
                if !body.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
        _ => out.push_str("(no textual diff)\n"),
    }

    out
}

fn read_text(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    fs::read_to_string(path).ok()
}

/// Asks the user whether a destructive step may go ahead.
pub trait Confirm {
    /// Show `preview` and block until the user answers. `true` means proceed.
    fn confirm(&mut self, preview: &str) -> io::Result<bool>;
}

/// Line-oriented yes/no prompt over any reader and writer.
///
/// Only the first character of each answer line counts; the rest of the line
/// is discarded. Anything outside `yYnN` asks again, end of input declines.
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalConfirm<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&mut self, preview: &str) -> io::Result<bool> {
        write!(self.output, "{}", preview)?;

        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match line.chars().next() {
                Some('y' | 'Y') => return Ok(true),
                Some('n' | 'N') => return Ok(false),
                _ => continue,
            }
        }
    }
}

/// Replays canned answers; declines once they run out.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    /// Every preview that was shown
    pub seen: Vec<String>,
}

#[cfg(test)]
impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            seen: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, preview: &str) -> io::Result<bool> {
        self.seen.push(preview.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
