//! The action trace written by the planner.
use crate::input::{header_int, header_value, read_lines};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt;
use std::path::Path;

const STEPS_LINE: usize = 6;

/// One replayed step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Step {
    North,
    East,
    South,
    West,
    Stay,
    Finish,
}

impl Step {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'N' => Some(Step::North),
            'E' => Some(Step::East),
            'S' => Some(Step::South),
            'W' => Some(Step::West),
            's' => Some(Step::Stay),
            'F' => Some(Step::Finish),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Step::North => 'N',
            Step::East => 'E',
            Step::South => 'S',
            Step::West => 'W',
            Step::Stay => 's',
            Step::Finish => 'F',
        }
    }
}

/// Final status reported by the planner run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    Finished,
    Dead,
    Working,
    Other(String),
}

impl RunStatus {
    pub fn parse(status: &str) -> Self {
        match status.to_ascii_uppercase().as_str() {
            "FINISHED" => RunStatus::Finished,
            "DEAD" => RunStatus::Dead,
            "WORKING" => RunStatus::Working,
            _ => RunStatus::Other(status.to_string()),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunStatus::Finished => write!(f, "FINISHED"),
            RunStatus::Dead => write!(f, "DEAD"),
            RunStatus::Working => write!(f, "WORKING"),
            RunStatus::Other(status) => write!(f, "{status}"),
        }
    }
}

/// Parsed action-trace file
#[derive(Clone, Debug)]
pub struct ActionTrace {
    pub num_steps: u64,
    pub final_dirt_left: u64,
    pub status: RunStatus,
    /// Only present when line 4 reads `InDock = TRUE|FALSE`
    pub in_dock: Option<bool>,
    pub score: i64,
    pub steps: Vec<Step>,
}

impl ActionTrace {
    pub fn load(file_path: &Path) -> Result<Self> {
        let lines = read_lines(file_path)?;
        Self::parse(&lines).with_context(|| format!("Invalid action trace {}", file_path.display()))
    }

    pub fn parse(lines: &[String]) -> Result<Self> {
        let num_steps = header_int(lines, 0)?;
        let final_dirt_left = header_int(lines, 1)?;
        let status = RunStatus::parse(header_value(lines, 2)?);
        let in_dock = header_value(lines, 3)
            .ok()
            .and_then(|value| match value.to_ascii_uppercase().as_str() {
                "TRUE" => Some(true),
                "FALSE" => Some(false),
                _ => None,
            });
        let score = header_int(lines, 4)?;

        let Some(raw) = lines.get(STEPS_LINE) else {
            bail!("Missing step line {}", STEPS_LINE + 1);
        };
        let steps = parse_steps(raw.trim())?;

        Ok(ActionTrace {
            num_steps,
            final_dirt_left,
            status,
            in_dock,
            score,
            steps,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Parse a raw string of step symbols
///
/// Only `NESWsF` are accepted. Any other symbol fails the whole trace with its
/// position; it is never replayed as an idle step that drains the battery.
pub fn parse_steps(raw: &str) -> Result<Vec<Step>> {
    raw.chars()
        .enumerate()
        .map(|(index, symbol)| match Step::from_symbol(symbol) {
            Some(step) => Ok(step),
            None => bail!("Unknown step symbol {:?} at position {}", symbol, index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_planner_output() {
        let text = concat!(
            "NumSteps = 6\nDirtLeft = 2\nStatus = FINISHED\nInDock = TRUE\nScore = 606\n",
            "Steps\nNsssSF\n"
        );
        let trace = ActionTrace::parse(&lines(text)).unwrap();

        assert_eq!(trace.num_steps, 6);
        assert_eq!(trace.final_dirt_left, 2);
        assert_eq!(trace.status, RunStatus::Finished);
        assert_eq!(trace.in_dock, Some(true));
        assert_eq!(trace.score, 606);
        assert_eq!(
            trace.steps,
            vec![Step::North, Step::Stay, Step::Stay, Step::Stay, Step::South, Step::Finish]
        );
    }

    #[test]
    fn test_separator_lines_are_not_headers() {
        let text = "numSteps = 1\nfinalDirtLeft = 0\nstatus = DEAD\n\nscore = 9\n\nE";
        let trace = ActionTrace::parse(&lines(text)).unwrap();

        assert_eq!(trace.in_dock, None);
        assert_eq!(trace.status, RunStatus::Dead);
        assert_eq!(trace.steps, vec![Step::East]);
    }

    #[test]
    fn test_empty_step_line_is_empty_trace() {
        let text = "n = 0\nd = 0\ns = WORKING\n\nscore = 1\n\n\n";
        let trace = ActionTrace::parse(&lines(text)).unwrap();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_missing_step_line() {
        assert!(ActionTrace::parse(&lines("n = 0\nd = 0\ns = WORKING\n\nscore = 1")).is_err());
    }

    #[test]
    fn test_bad_integer_header() {
        assert!(ActionTrace::parse(&lines("n = many\nd = 0\ns = x\n\nscore = 1\n\nF")).is_err());
    }

    #[test]
    fn test_unknown_symbol() {
        let err = parse_steps("NNxS").unwrap_err();
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_unknown_symbol_fails_whole_trace() {
        let text = "n = 3\nd = 0\ns = WORKING\n\nscore = 1\n\nE?s";
        let err = ActionTrace::parse(&lines(text)).unwrap_err();
        assert!(format!("{err:#}").contains("'?'"));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(RunStatus::parse("dead"), RunStatus::Dead);
        assert_eq!(RunStatus::parse("CRASHED").to_string(), "CRASHED");
    }

    #[test]
    fn test_symbols() {
        for symbol in ['N', 'E', 'S', 'W', 's', 'F'] {
            assert_eq!(Step::from_symbol(symbol).unwrap().symbol(), symbol);
        }
        assert_eq!(Step::from_symbol('n'), None);
    }
}
