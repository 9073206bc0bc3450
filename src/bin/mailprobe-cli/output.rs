#[cfg(feature = "with-serde")]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailprobe_lib::{ValidationResult, Verdict};

pub fn write_reports(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(rows),
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson"),
    }
}

pub fn any_invalid(rows: &[ValidationResult]) -> bool {
    rows.iter().any(|row| row.verdict == Verdict::Invalid)
}

fn verdict_tag(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Valid => "[VALID]  ",
        Verdict::Risky => "[RISKY]  ",
        Verdict::Unknown => "[UNKNOWN]",
        Verdict::Invalid => "[INVALID]",
    }
}

fn write_human(rows: &[ValidationResult]) -> Result<()> {
    for row in rows {
        println!(
            "{} {} ({}/100)",
            verdict_tag(row.verdict),
            row.email,
            row.confidence
        );
        if !row.reasons.is_empty() {
            println!("        reasons: {}", row.reasons.join("; "));
        }
        if let Some(smtp) = &row.checks.smtp {
            let code = smtp.code.map(|c| c.to_string()).unwrap_or_default();
            match &smtp.host {
                Some(host) => println!("        smtp: {} {code} via {host}", smtp.status),
                None => println!("        smtp: {} {code}", smtp.status),
            }
        }
        if let Some(catch_all) = &row.checks.catch_all {
            println!(
                "        catch-all: {} ({}, {})",
                catch_all.is_catch_all, catch_all.confidence, catch_all.method
            );
        }
        if let Some(intel) = &row.intelligence {
            if let Some(provider) = &intel.provider {
                println!("        provider: {provider}");
            }
            if let Some(canonical) = &intel.canonical {
                println!("        canonical: {canonical}");
            }
        }
        if let Some(breakdown) = &row.score_breakdown {
            for (idx, item) in breakdown.iter().enumerate() {
                if idx == 0 {
                    println!("        score: {item}");
                } else {
                    println!("               {item}");
                }
            }
        }
        if let Some(trace) = &row.trace {
            for step in trace {
                println!(
                    "        trace: {:<16} {:>5} ms  {}",
                    step.step, step.elapsed_ms, step.detail
                );
            }
        }
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[ValidationResult], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[ValidationResult], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[ValidationResult], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
