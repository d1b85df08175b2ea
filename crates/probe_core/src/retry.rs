use std::fmt;

/// Default candidate keywords, tried in order for every endpoint.
pub const DEFAULT_KEYWORD_POOL: [&str; 10] = [
    "boy", "a", "flower", "sky", "cat", "test", "hello", "123", "news", "movie",
];

/// Owned copy of the default pool, for callers building a run config.
pub fn default_keyword_pool() -> Vec<String> {
    DEFAULT_KEYWORD_POOL.iter().map(|kw| kw.to_string()).collect()
}

// Transport failure messages are cut down to this many characters in the
// status narrative; the full message stays in the attempt record.
const EXCEPTION_PREVIEW_CHARS: usize = 30;

/// What a single keyword attempt produced, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    TransportError { message: String },
    HttpError { status: u16 },
    NotParsable,
    Parsable,
}

/// Why an endpoint ended up not parsable after the pool ran dry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Transport { message: String },
    HttpStatus { status: u16 },
    NotParsable { attempts: usize },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Transport { message } => {
                write!(f, "request exception: {}", preview(message))
            }
            FailureReason::HttpStatus { status } => write!(f, "HTTP Error {status}"),
            FailureReason::NotParsable { attempts } => {
                write!(f, "parse failed (retried {attempts} times)")
            }
        }
    }
}

fn preview(message: &str) -> String {
    if message.chars().count() <= EXCEPTION_PREVIEW_CHARS {
        return message.to_string();
    }
    let cut: String = message.chars().take(EXCEPTION_PREVIEW_CHARS).collect();
    format!("{cut}...")
}

/// Retry progress for one endpoint. `Trying` always holds a valid index
/// into the keyword pool; the two terminal states carry everything needed
/// for the verdict narrative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    Trying { index: usize },
    Success { keyword: String },
    Exhausted { reason: FailureReason },
}

/// Pure keyword-retry state machine.
///
/// The caller performs one attempt per `Trying` state and feeds the
/// outcome back through [`RetryMachine::advance`]; no IO happens here, so
/// the transition table is testable without a network layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryMachine<'a> {
    keywords: &'a [String],
    state: RetryState,
}

impl<'a> RetryMachine<'a> {
    pub fn new(keywords: &'a [String]) -> Self {
        let state = if keywords.is_empty() {
            // Callers reject an empty pool at startup; here it is simply
            // already exhausted.
            RetryState::Exhausted {
                reason: FailureReason::NotParsable { attempts: 0 },
            }
        } else {
            RetryState::Trying { index: 0 }
        };
        Self { keywords, state }
    }

    pub fn state(&self) -> &RetryState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.state, RetryState::Trying { .. })
    }

    /// Keyword for the attempt the caller should perform next, if any.
    pub fn current_keyword(&self) -> Option<&'a str> {
        match self.state {
            RetryState::Trying { index } => self.keywords.get(index).map(String::as_str),
            _ => None,
        }
    }

    /// Apply one attempt outcome. A parsable hit terminates immediately;
    /// anything else advances to the next keyword, or to `Exhausted` when
    /// the pool is spent. Advancing a terminal machine is a no-op.
    pub fn advance(&mut self, outcome: AttemptOutcome) {
        let index = match &self.state {
            RetryState::Trying { index } => *index,
            _ => return,
        };
        let last = index + 1 >= self.keywords.len();
        self.state = match outcome {
            AttemptOutcome::Parsable => RetryState::Success {
                keyword: self.keywords[index].clone(),
            },
            AttemptOutcome::TransportError { message } if last => RetryState::Exhausted {
                reason: FailureReason::Transport { message },
            },
            AttemptOutcome::HttpError { status } if last => RetryState::Exhausted {
                reason: FailureReason::HttpStatus { status },
            },
            AttemptOutcome::NotParsable if last => RetryState::Exhausted {
                reason: FailureReason::NotParsable {
                    attempts: self.keywords.len(),
                },
            },
            _ => RetryState::Trying { index: index + 1 },
        };
    }

    /// Human-readable narrative for the current state. Only terminal
    /// states appear in verdicts.
    pub fn status_message(&self) -> String {
        match &self.state {
            RetryState::Trying { index } => format!("trying keyword #{index}"),
            RetryState::Success { keyword } => format!("success (keyword: '{keyword}')"),
            RetryState::Exhausted { reason } => reason.to_string(),
        }
    }
}
