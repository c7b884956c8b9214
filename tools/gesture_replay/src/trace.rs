use anyhow::{anyhow, bail, Context, Result};
use tapclock::gesture::{OriginToken, PressPhase, PressSignal, SourceKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReplayStep {
    Press(PressPhase, PressSignal),
    Tick(u64),
}

impl ReplayStep {
    pub fn t_ms(&self) -> u64 {
        match self {
            Self::Press(_, signal) => signal.t_ms,
            Self::Tick(t_ms) => *t_ms,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpectedGesture {
    pub t_ms: u64,
    pub kind: String,
}

fn parse_source(value: &str) -> Result<SourceKind> {
    match value {
        "touch" => Ok(SourceKind::Touch),
        "mouse" => Ok(SourceKind::Mouse),
        "pointer" => Ok(SourceKind::Pointer),
        other => bail!("unknown source `{other}`"),
    }
}

fn parse_phase(value: &str) -> Result<Option<PressPhase>> {
    match value {
        "down" => Ok(Some(PressPhase::Start)),
        "up" => Ok(Some(PressPhase::End)),
        "cancel" | "leave" => Ok(Some(PressPhase::Abort)),
        "tick" => Ok(None),
        other => bail!("unknown phase `{other}`"),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => bail!("invalid primary flag `{other}`"),
    }
}

fn content_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Lines are `ms,phase,source,origin,primary`; `tick` lines only need `ms,tick`.
pub fn parse_trace(source: &str) -> Result<Vec<ReplayStep>> {
    let mut steps = Vec::new();
    for (line_no, line) in content_lines(source) {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let step = parse_step(&fields).with_context(|| format!("line {line_no}: `{line}`"))?;
        if let Some(prev) = steps.last().map(ReplayStep::t_ms) {
            if step.t_ms() < prev {
                bail!("line {line_no}: timestamp {} goes backwards", step.t_ms());
            }
        }
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(fields: &[&str]) -> Result<ReplayStep> {
    let t_ms: u64 = fields
        .first()
        .ok_or_else(|| anyhow!("empty line"))?
        .parse()
        .context("invalid timestamp")?;
    let phase = parse_phase(fields.get(1).ok_or_else(|| anyhow!("missing phase"))?)?;
    let Some(phase) = phase else {
        return Ok(ReplayStep::Tick(t_ms));
    };

    let [_, _, source, origin, primary] = fields else {
        bail!("expected 5 fields, got {}", fields.len());
    };
    Ok(ReplayStep::Press(
        phase,
        PressSignal {
            t_ms,
            origin: OriginToken(origin.parse().context("invalid origin")?),
            source: parse_source(source)?,
            primary: parse_flag(primary)?,
        },
    ))
}

/// Lines are `gesture,ms,kind`, matching the replay output.
pub fn parse_expectations(source: &str) -> Result<Vec<ExpectedGesture>> {
    content_lines(source)
        .filter(|(_, line)| *line != "gesture,ms,kind")
        .map(|(line_no, line)| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            match fields.as_slice() {
                ["gesture", t_ms, kind] => Ok(ExpectedGesture {
                    t_ms: t_ms
                        .parse()
                        .with_context(|| format!("line {line_no}: invalid timestamp"))?,
                    kind: (*kind).to_string(),
                }),
                _ => bail!("line {line_no}: expected `gesture,ms,kind`, got `{line}`"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presses_ticks_and_comments() {
        let steps = parse_trace(
            "# tap then wait\n0,down,touch,1,1\n50,up,touch,1,1\n\n400,tick\n410,leave,mouse,0,0\n",
        )
        .expect("trace should parse");

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[2], ReplayStep::Tick(400));
        match steps[3] {
            ReplayStep::Press(PressPhase::Abort, signal) => {
                assert_eq!(signal.source, SourceKind::Mouse);
                assert!(!signal.primary);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn rejects_backwards_time_and_bad_fields() {
        assert!(parse_trace("10,down,touch,1,1\n5,up,touch,1,1\n").is_err());
        assert!(parse_trace("10,down,stylus,1,1\n").is_err());
        assert!(parse_trace("10,down,touch,1\n").is_err());
        assert!(parse_trace("10,hover,touch,1,1\n").is_err());
    }

    #[test]
    fn expectations_skip_header() {
        let expected =
            parse_expectations("gesture,ms,kind\ngesture,350,tap\n").expect("should parse");
        assert_eq!(
            expected,
            vec![ExpectedGesture {
                t_ms: 350,
                kind: "tap".into()
            }]
        );
    }
}
