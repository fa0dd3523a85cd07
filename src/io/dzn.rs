//! MiniZinc data (`.dzn`) loader for MSPSP instances.
//!
//! # Format
//!
//! A sequence of `key = value;` statements. `%` starts a comment that runs
//! to the end of the line; a statement may span several lines.
//!
//! | Key | Value | Meaning |
//! |-----|-------|---------|
//! | `mint`, `maxt` | integer | known makespan bounds (optional) |
//! | `nActs` | integer | number of activities |
//! | `dur` | `[d1, ..., dn]` | activity durations |
//! | `nSkills` | integer | number of skill types |
//! | `sreq` | `[\| r11, ..., r1s \| ... \|]` | units of each skill per activity |
//! | `nResources` | integer | number of resources |
//! | `mastery` | `[\| b11, ..., b1s \| ... \|]` | `true` if resource masters the skill |
//! | `nPrecs` | integer | number of precedence pairs (optional) |
//! | `pred`, `succ` | `[a, ...]` | `pred[i]` must finish before `succ[i]` starts |
//!
//! Activities are numbered from 1 in `dur`/`sreq` order; resources from 0 in
//! `mastery` order. Unknown keys are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::models::{Activity, ActivityId, ProjectInstance, Resource};

/// Right-hand side of a statement.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Scalar(String),
    List(Vec<String>),
    Table(Vec<Vec<String>>),
}

/// One `key = value;` statement and the line it starts on.
#[derive(Debug, Clone)]
struct Statement {
    line: usize,
    value: Value,
}

/// Reads and parses an instance file.
pub fn load_path(path: impl AsRef<Path>) -> Result<ProjectInstance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| ScheduleError::Io(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = text.len(), "loading instance");
    parse_str(&text)
}

/// Parses instance text.
pub fn parse_str(input: &str) -> Result<ProjectInstance> {
    let statements = split_statements(input)?;
    let data = Data { statements: &statements };

    let num_activities = data.count("nActs")?;
    let num_skills = data.count("nSkills")?;
    let num_resources = data.count("nResources")?;

    let durations = data.i64_list("dur", num_activities)?;
    let demand = data.usize_table("sreq", num_activities, num_skills)?;
    let mastery = data.bool_table("mastery", num_resources, num_skills)?;
    let precedences = data.precedences(num_activities)?;

    let mut activities: Vec<Activity> = durations
        .iter()
        .zip(&demand)
        .enumerate()
        .map(|(i, (&duration, row))| {
            row.iter()
                .enumerate()
                .fold(Activity::new(i + 1, duration), |act, (t, &units)| {
                    act.with_skill(t, units)
                })
        })
        .collect();
    for (pred, succ) in precedences {
        activities[succ - 1].predecessors.insert(pred);
    }

    let resources: Vec<Resource> = mastery
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Resource::new(i).with_skills(
                row.iter()
                    .enumerate()
                    .filter(|&(_, &mastered)| mastered)
                    .map(|(t, _)| t),
            )
        })
        .collect();

    debug!(
        activities = num_activities,
        skills = num_skills,
        resources = num_resources,
        "parsed instance"
    );

    let instance = ProjectInstance::new(num_skills, activities, resources)?;
    Ok(instance.with_makespan_bounds(data.optional_i64("mint")?, data.optional_i64("maxt")?))
}

/// Splits the text into statements keyed by name, dropping comments.
fn split_statements(input: &str) -> Result<HashMap<String, Statement>> {
    let mut statements = HashMap::new();
    let mut pending = String::new();
    let mut start_line = 0;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let code = raw.split('%').next().unwrap_or("");
        for ch in code.chars() {
            if ch == ';' {
                let (key, value) = parse_statement(&pending, start_line)?;
                statements.insert(key, Statement { line: start_line, value });
                pending.clear();
                continue;
            }
            if pending.trim().is_empty() && !ch.is_whitespace() {
                start_line = line_no;
            }
            pending.push(ch);
        }
        pending.push(' ');
    }

    if !pending.trim().is_empty() {
        return Err(ScheduleError::Parse {
            line: start_line,
            message: "statement is missing its terminating ';'".into(),
        });
    }
    Ok(statements)
}

fn parse_statement(text: &str, line: usize) -> Result<(String, Value)> {
    let (key, rhs) = text.split_once('=').ok_or_else(|| ScheduleError::Parse {
        line,
        message: format!("expected `key = value`, found `{}`", text.trim()),
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ScheduleError::Parse {
            line,
            message: "statement without a key".into(),
        });
    }
    Ok((key.to_string(), parse_value(rhs.trim(), line)?))
}

fn parse_value(rhs: &str, line: usize) -> Result<Value> {
    let unclosed = |what: &str| ScheduleError::Parse {
        line,
        message: format!("unterminated {what}"),
    };

    if let Some(body) = rhs.strip_prefix("[|") {
        let body = body.strip_suffix("|]").ok_or_else(|| unclosed("2-D array"))?;
        let rows = body
            .split('|')
            .filter(|row| !row.trim().is_empty())
            .map(split_items)
            .collect();
        Ok(Value::Table(rows))
    } else if let Some(body) = rhs.strip_prefix('[') {
        let body = body.strip_suffix(']').ok_or_else(|| unclosed("array"))?;
        Ok(Value::List(split_items(body)))
    } else {
        Ok(Value::Scalar(rhs.to_string()))
    }
}

fn split_items(body: &str) -> Vec<String> {
    body.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Typed access to parsed statements.
struct Data<'a> {
    statements: &'a HashMap<String, Statement>,
}

impl Data<'_> {
    fn get(&self, key: &str) -> Result<&Statement> {
        self.statements.get(key).ok_or_else(|| ScheduleError::Parse {
            line: 0,
            message: format!("missing `{key}`"),
        })
    }

    fn scalar(&self, key: &str) -> Result<(usize, &str)> {
        let stmt = self.get(key)?;
        match &stmt.value {
            Value::Scalar(s) => Ok((stmt.line, s.as_str())),
            _ => Err(parse_error(stmt.line, format!("`{key}` must be a single value"))),
        }
    }

    fn count(&self, key: &str) -> Result<usize> {
        let (line, s) = self.scalar(key)?;
        parse_number(s, key, line)
    }

    fn optional_i64(&self, key: &str) -> Result<Option<i64>> {
        if !self.statements.contains_key(key) {
            return Ok(None);
        }
        let (line, s) = self.scalar(key)?;
        parse_number(s, key, line).map(Some)
    }

    fn list(&self, key: &str) -> Result<(usize, &[String])> {
        let stmt = self.get(key)?;
        match &stmt.value {
            Value::List(items) => Ok((stmt.line, items.as_slice())),
            _ => Err(parse_error(stmt.line, format!("`{key}` must be a 1-D array"))),
        }
    }

    fn i64_list(&self, key: &str, len: usize) -> Result<Vec<i64>> {
        let (line, items) = self.list(key)?;
        check_len(key, line, items.len(), len)?;
        items.iter().map(|s| parse_number(s, key, line)).collect()
    }

    fn table(&self, key: &str, rows: usize, cols: usize) -> Result<(usize, &[Vec<String>])> {
        let stmt = self.get(key)?;
        let Value::Table(table) = &stmt.value else {
            return Err(parse_error(stmt.line, format!("`{key}` must be a 2-D array")));
        };
        check_len(key, stmt.line, table.len(), rows)?;
        for (i, row) in table.iter().enumerate() {
            if row.len() != cols {
                return Err(parse_error(
                    stmt.line,
                    format!("`{key}` row {} has {} columns, expected {cols}", i + 1, row.len()),
                ));
            }
        }
        Ok((stmt.line, table.as_slice()))
    }

    fn usize_table(&self, key: &str, rows: usize, cols: usize) -> Result<Vec<Vec<usize>>> {
        let (line, table) = self.table(key, rows, cols)?;
        table
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| parse_number(s, key, line))
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }

    fn bool_table(&self, key: &str, rows: usize, cols: usize) -> Result<Vec<Vec<bool>>> {
        let (line, table) = self.table(key, rows, cols)?;
        table
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| match s.as_str() {
                        "true" => Ok(true),
                        "false" => Ok(false),
                        other => Err(parse_error(
                            line,
                            format!("`{key}` expects true/false, found `{other}`"),
                        )),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }

    /// `(pred, succ)` pairs. Absent `pred`/`succ` mean no precedence.
    fn precedences(&self, num_activities: usize) -> Result<Vec<(ActivityId, ActivityId)>> {
        if !self.statements.contains_key("pred") && !self.statements.contains_key("succ") {
            return Ok(Vec::new());
        }
        let (pred_line, preds) = self.list("pred")?;
        let (succ_line, succs) = self.list("succ")?;
        let expected = if self.statements.contains_key("nPrecs") {
            self.count("nPrecs")?
        } else {
            preds.len()
        };
        check_len("pred", pred_line, preds.len(), expected)?;
        check_len("succ", succ_line, succs.len(), expected)?;

        let mut pairs = Vec::with_capacity(expected);
        for (p, s) in preds.iter().zip(succs) {
            let pred: ActivityId = parse_number(p, "pred", pred_line)?;
            let succ: ActivityId = parse_number(s, "succ", succ_line)?;
            for id in [pred, succ] {
                if id == 0 || id > num_activities {
                    return Err(ScheduleError::InvalidInstance(format!(
                        "precedence {pred} -> {succ} references unknown activity {id}"
                    )));
                }
            }
            pairs.push((pred, succ));
        }
        Ok(pairs)
    }
}

fn parse_number<T: std::str::FromStr>(s: &str, key: &str, line: usize) -> Result<T> {
    s.parse()
        .map_err(|_| parse_error(line, format!("`{key}` expects an integer, found `{s}`")))
}

fn check_len(key: &str, line: usize, found: usize, expected: usize) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(parse_error(
            line,
            format!("`{key}` has {found} entries, expected {expected}"),
        ))
    }
}

fn parse_error(line: usize, message: String) -> ScheduleError {
    ScheduleError::Parse { line, message }
}
