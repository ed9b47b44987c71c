//! Accept prompt for the generated document

use std::io::{self, BufRead, IsTerminal, Write};

/// How the accept question gets answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcceptPolicy {
    /// Ask on the terminal; non-interactive input declines
    #[default]
    Ask,
    /// Accept without asking (`--accept`)
    Always,
    /// Decline without asking (`--decline`)
    Never,
}

impl AcceptPolicy {
    pub fn from_flags(accept: bool, decline: bool) -> Self {
        match (accept, decline) {
            (true, _) => Self::Always,
            (false, true) => Self::Never,
            _ => Self::Ask,
        }
    }
}

/// Answer to the accept question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptDecision {
    Accepted,
    Declined,
}

impl AcceptDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Interpret a typed answer. Empty input takes the default (decline).
pub fn parse_answer(input: &str) -> AcceptDecision {
    match input.trim().to_lowercase().as_str() {
        "j" | "ja" | "y" | "yes" => AcceptDecision::Accepted,
        _ => AcceptDecision::Declined,
    }
}

/// Print `question` to `prompt_out` and read one answer line from `input`.
pub fn prompt_accept<R, W>(question: &str, input: &mut R, prompt_out: &mut W) -> io::Result<AcceptDecision>
where
    R: BufRead,
    W: Write,
{
    write!(prompt_out, "{} [j/N]: ", question)?;
    prompt_out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(parse_answer(&answer))
}

/// Resolve the accept question under `policy`. Interactive prompts read
/// stdin on a blocking thread.
pub async fn resolve(policy: AcceptPolicy, question: &str) -> io::Result<AcceptDecision> {
    match policy {
        AcceptPolicy::Always => Ok(AcceptDecision::Accepted),
        AcceptPolicy::Never => Ok(AcceptDecision::Declined),
        AcceptPolicy::Ask => {
            if !io::stdin().is_terminal() {
                tracing::info!("Declining upload in non-interactive mode");
                return Ok(AcceptDecision::Declined);
            }
            let question = question.to_string();
            tokio::task::spawn_blocking(move || {
                let stdin = io::stdin();
                prompt_accept(&question, &mut stdin.lock(), &mut io::stderr())
            })
            .await
            .map_err(io::Error::other)?
        }
    }
}
