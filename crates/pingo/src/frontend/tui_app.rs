use crate::frontend::binding::Bindings;
use pingo_core::{Builder, PingRecord, Pinger, Repository, SharedRepository};
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::thread::JoinHandle;
use tracing::{debug, warn};

pub struct TuiApp {
    pub bindings: Bindings,
    /// The active input prompt, if any.
    pub prompt: Option<Prompt>,
    /// The outcome of the last user action.
    pub status: Option<Status>,
    builder: Builder,
    repository: SharedRepository,
    /// Sessions which have been started but whose record is not yet appended.
    ///
    /// Records are appended in the order the sessions were started.
    pending: VecDeque<PendingSession>,
}

/// An input prompt.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PromptKind {
    /// Read the address of a new target.
    Target,
    /// Read the 1-based number of a result to remove.
    ResultNumber,
}

impl PromptKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Target => "Input IP here",
            Self::ResultNumber => "Input Result Number",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

struct PendingSession {
    target: Ipv4Addr,
    handle: JoinHandle<pingo_core::Result<PingRecord>>,
}

impl TuiApp {
    pub fn new(builder: Builder) -> Self {
        Self {
            bindings: Bindings::default(),
            prompt: None,
            status: None,
            builder,
            repository: SharedRepository::new(),
            pending: VecDeque::new(),
        }
    }

    /// A snapshot of the completed records.
    pub fn records(&self) -> Repository {
        self.repository.snapshot()
    }

    /// The targets of the sessions which are still running.
    pub fn pending_targets(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.pending.iter().map(|session| session.target)
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn push_input(&mut self, c: char) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if let Some(prompt) = &mut self.prompt {
            prompt.input.pop();
        }
    }

    /// Close the active prompt and act on its input.
    pub fn submit(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let input = prompt.input.trim();
        match prompt.kind {
            PromptKind::Target => match Ipv4Addr::from_str(input) {
                Ok(target) => self.start_session(target),
                Err(_) => self.error(format!("invalid IPv4 address: {input:?}")),
            },
            PromptKind::ResultNumber => match usize::from_str(input) {
                Ok(number) if number >= 1 => self.remove_result(number),
                _ => self.error(format!("invalid result number: {input:?}")),
            },
        }
    }

    /// Start a probe session for each target.
    pub fn start_sessions(&mut self, targets: &[Ipv4Addr]) {
        for &target in targets {
            self.start_session(target);
        }
    }

    /// Start a probe session for a target on a new thread.
    pub fn start_session(&mut self, target: Ipv4Addr) {
        match self.builder.clone().target(target).build().and_then(Pinger::spawn) {
            Ok(handle) => {
                debug!(%target, "session started");
                self.pending.push_back(PendingSession { target, handle });
                self.info(format!("probing {target}"));
            }
            Err(err) => self.error(format!("{target}: {err}")),
        }
    }

    /// Append the records of sessions which have completed.
    pub fn collect_finished(&mut self) {
        while self
            .pending
            .front()
            .is_some_and(|session| session.handle.is_finished())
        {
            let Some(PendingSession { target, handle }) = self.pending.pop_front() else {
                break;
            };
            match handle.join() {
                Ok(Ok(record)) => {
                    let index = self.repository.append(record);
                    self.info(format!("[{}] {target} complete", index + 1));
                }
                Ok(Err(err)) => self.error(format!("{target}: {err}")),
                Err(_) => self.error(format!("probe session for {target} panicked")),
            }
        }
    }

    fn remove_result(&mut self, number: usize) {
        match self.repository.remove_at(number - 1) {
            Ok(record) => self.info(format!("removed [{number}] {}", record.target())),
            Err(err) => self.error(err.to_string()),
        }
    }

    fn info(&mut self, msg: String) {
        debug!("{msg}");
        self.status = Some(Status::Info(msg));
    }

    fn error(&mut self, msg: String) {
        warn!("{msg}");
        self.status = Some(Status::Error(msg));
    }
}
