// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Interactive questions for values not supplied as flags (module type, dependency lists)
// role: io/prompt
// inputs: any BufRead (stdin in production) and Write (stdout)
// outputs: ModuleType; whitespace-separated package strings
// invariants:
// - at most MAX_ATTEMPTS reads per question; exhaustion is ValidationError::PromptExhausted with the count actually read
// - end of input ends the question immediately with the same error
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::cli::ModuleType;
use crate::error::ValidationError;

pub const MAX_ATTEMPTS: usize = 3;

pub struct Prompter<R, W> {
  input: R,
  output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  fn ask(&mut self, question: &str) -> Result<Option<String>> {
    write!(self.output, "{} ", question)?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
  }

  pub fn module_type(&mut self) -> Result<ModuleType> {
    let question = "Module type (module/commonjs) [commonjs]:";

    let mut attempts = 0;
    while attempts < MAX_ATTEMPTS {
      let Some(answer) = self.ask(question)? else { break };
      attempts += 1;
      match answer.to_ascii_lowercase().as_str() {
        "" | "commonjs" | "cjs" | "c" => return Ok(ModuleType::CommonJs),
        "module" | "esm" | "m" => return Ok(ModuleType::Module),
        other => writeln!(self.output, "'{}' is not a module type; answer module or commonjs", other)?,
      }
    }

    Err(
      ValidationError::PromptExhausted {
        question: question.to_string(),
        attempts,
      }
      .into(),
    )
  }

  /// Free-form package list; an empty answer means none.
  pub fn packages(&mut self, label: &str) -> Result<String> {
    let question = format!("{} (space separated, empty for none):", label);
    match self.ask(&question)? {
      Some(answer) => Ok(answer),
      None => Err(ValidationError::PromptExhausted { question, attempts: 0 }.into()),
    }
  }
}
