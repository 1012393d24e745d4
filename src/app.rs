use log::{info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{self, BufRead, Write};

use vote_tally::{
    group_by_department, NullRomanizer, Phase, PinyinRomanizer, Romanizer, TallyError,
    TallySession,
};

use crate::args::Args;
use crate::export;

/// The roster shipped for the `--demo` flag.
pub const DEMO_ROSTER: &str = "学习部 - 张三 (高二1班)
学习部 - 李四 (高二3班)
文体部 - 王五 (高一2班)
文体部 - 赵六 (高一5班)
宣传部 - 钱七 (高二2班)";

#[derive(Debug, Snafu)]
pub enum AppError {
    #[snafu(display("Error reading roster file {path}"))]
    ReadingRoster {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing report to {path}"))]
    WritingReport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error serializing the results"))]
    SerializingResults { source: serde_json::Error },
    #[snafu(display("Error reading from the standard input"))]
    ReadingInput { source: std::io::Error },
}

pub type AppResult<T> = Result<T, AppError>;

pub fn run(args: &Args) -> AppResult<()> {
    let romanizer: Box<dyn Romanizer> = if args.no_pinyin {
        Box::new(NullRomanizer)
    } else {
        Box::new(PinyinRomanizer)
    };
    let mut app = App {
        session: TallySession::new(),
        romanizer,
    };

    if let Some(path) = args.roster.clone() {
        let text = fs::read_to_string(&path).context(ReadingRosterSnafu { path })?;
        app.load_text(&text);
    } else if args.demo {
        app.load_text(DEMO_ROSTER);
    }

    app.print_help_hint();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context(ReadingInputSnafu {})?;
        match app.handle_line(line.trim())? {
            Outcome::Continue => {
                app.prompt();
            }
            Outcome::Quit => break,
        }
    }
    Ok(())
}

enum Outcome {
    Continue,
    Quit,
}

struct App {
    session: TallySession,
    romanizer: Box<dyn Romanizer>,
}

impl App {
    fn load_text(&mut self, text: &str) {
        match self.session.load(text) {
            Ok(n) => {
                println!("{} candidates loaded, voting is open.", n);
                self.show_tally();
            }
            Err(TallyError::EmptyRoster) => {
                // Stay in setup so the operator fixes the file and
                // retries.
                println!("无法解析名单，请检查格式。 (no candidates could be parsed)");
            }
            Err(e) => {
                println!("cannot load a roster now: {}", e);
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> AppResult<Outcome> {
        if line.is_empty() {
            return Ok(Outcome::Continue);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        match command {
            "quit" | "exit" => return Ok(Outcome::Quit),
            "help" => self.print_help(),
            "show" => self.show_tally(),
            "load" if !rest.is_empty() => {
                let text = fs::read_to_string(rest).context(ReadingRosterSnafu {
                    path: rest.to_string(),
                })?;
                self.load_text(&text);
            }
            "demo" => self.load_text(DEMO_ROSTER),
            "find" => self.find(rest),
            "finish" => match self.session.finish() {
                Ok(snapshot) => {
                    let report = export::text_report(snapshot);
                    println!("{}", report);
                }
                Err(e) => println!("{}", e),
            },
            "back" => match self.session.reopen() {
                Ok(()) => println!("voting reopened."),
                Err(e) => println!("{}", e),
            },
            "reset" => {
                self.session.reset();
                println!("session cleared, back to setup.");
            }
            "export" if !rest.is_empty() => self.export_json(rest)?,
            "export-txt" if !rest.is_empty() => self.export_text(rest)?,
            "-" if !rest.is_empty() => self.vote(rest, -1),
            "+" if !rest.is_empty() => self.vote(rest, 1),
            // Bare input is the quick-vote box: match and vote +1.
            _ => self.vote(line, 1),
        }
        Ok(Outcome::Continue)
    }

    /// Quick vote: fuzzy-match the query and adjust the first match,
    /// the keyboard-driven path used while votes are called out.
    fn vote(&mut self, query: &str, delta: i64) {
        if self.session.phase() != Phase::Voting {
            println!("voting is not open (phase: {}).", self.session.phase());
            return;
        }
        let (target, others) = {
            let matched = self.session.search(query, self.romanizer.as_ref());
            match matched.split_first() {
                None => {
                    println!("no candidate matches {:?}.", query);
                    return;
                }
                Some((first, rest)) => (
                    (first.id.clone(), first.name.clone()),
                    rest.iter().map(|c| c.name.clone()).collect::<Vec<_>>(),
                ),
            }
        };
        let (id, name) = target;
        match self.session.adjust_vote(&id, delta) {
            Ok(votes) => {
                if delta >= 0 {
                    println!("已为 {} +{} 票 (now {})", name, delta, votes);
                } else {
                    println!("已为 {} {} 票 (now {})", name, delta, votes);
                }
                if !others.is_empty() {
                    println!("  (also matched: {})", others.join(", "));
                }
            }
            // Ids come from the search above, so this is a
            // referential-integrity fault: log it and drop the vote,
            // never tear down the session.
            Err(e) => warn!("vote adjustment ignored: {}", e),
        }
    }

    fn find(&self, query: &str) {
        let matched = self.session.search(query, self.romanizer.as_ref());
        if matched.is_empty() {
            println!("no candidate matches {:?}.", query);
            return;
        }
        println!("匹配到 {} 位候选人", matched.len());
        for c in matched {
            println!("  {} · {} · {} ({}票)", c.name, c.class_name, c.department, c.votes);
        }
    }

    fn show_tally(&self) {
        for group in group_by_department(self.session.candidates()) {
            println!("【{}】", group.name);
            for c in group.candidates.iter() {
                println!("  {:>4}票  {} ({})", c.votes, c.name, c.class_name);
            }
        }
    }

    fn export_json(&self, path: &str) -> AppResult<()> {
        match self.session.snapshot() {
            Some(snapshot) => {
                let report = export::json_report(snapshot).context(SerializingResultsSnafu {})?;
                fs::write(path, report).context(WritingReportSnafu {
                    path: path.to_string(),
                })?;
                info!("wrote JSON results to {}", path);
                println!("results written to {}", path);
            }
            None => println!("finish the tally before exporting."),
        }
        Ok(())
    }

    fn export_text(&self, path: &str) -> AppResult<()> {
        match self.session.snapshot() {
            Some(snapshot) => {
                fs::write(path, export::text_report(snapshot)).context(WritingReportSnafu {
                    path: path.to_string(),
                })?;
                info!("wrote text results to {}", path);
                println!("results written to {}", path);
            }
            None => println!("finish the tally before exporting."),
        }
        Ok(())
    }

    fn prompt(&self) {
        print!("[{}] > ", self.session.phase());
        let _ = io::stdout().flush();
    }

    fn print_help_hint(&self) {
        println!("type 'help' for the command list.");
        self.prompt();
    }

    fn print_help(&self) {
        println!("commands:");
        println!("  <query>          quick vote: +1 for the first fuzzy match (name, pinyin or initials)");
        println!("  + <query>        same as the bare query");
        println!("  - <query>        remove one vote from the first match");
        println!("  find <query>     list the matching candidates without voting");
        println!("  show             print the tally grouped by department");
        println!("  load <path>      load a roster file (setup phase)");
        println!("  demo             load the built-in demo roster");
        println!("  finish           freeze the tally and show the results");
        println!("  back             reopen voting to correct the tally");
        println!("  reset            discard everything and return to setup");
        println!("  export <path>    write the frozen results as JSON");
        println!("  export-txt <path> write the frozen results as text");
        println!("  quit             leave");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_roster_parses_in_full() {
        let mut session = TallySession::new();
        assert_eq!(session.load(DEMO_ROSTER), Ok(5));
        assert_eq!(group_by_department(session.candidates()).len(), 3);
    }
}
