use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;
use serde::Serialize;

use scriptfmt::access::is_valid_attribute_name;
use scriptfmt::{formatted_size, vformat, vformat_with_locale, ArgStore, Locale, Value};

/// Render a format string with positional and named arguments
#[derive(Clone, Debug, Parser)]
struct Args {
    /// format string, e.g. "{0} warning{${0}>1:'s'}"
    format: String,
    /// positional arguments; integers, floats and booleans are
    /// detected, everything else is a string
    values: Vec<String>,
    /// named arguments as name=value, repeatable
    #[arg(long = "arg", value_name = "NAME=VALUE")]
    named: Vec<String>,
    /// locale data as four comma separated fields:
    /// decimal-point,thousands-sep,true-name,false-name
    #[arg(long)]
    locale: Option<String>,
    /// emit a JSON report instead of the raw output
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    format: &'a str,
    output: String,
    units: usize,
}

fn classify(raw: &str) -> Value<'_> {
    if raw == "true" {
        return Value::Bool(true);
    }
    if raw == "false" {
        return Value::Bool(false);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::I64(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::F64(f);
    }
    Value::from(raw)
}

fn parse_locale(raw: &str) -> Result<Locale> {
    let fields: Vec<&str> = raw.split(',').collect();
    let [decimal, thousands, true_name, false_name] = fields[..] else {
        return Err(anyhow!(
            "expected decimal-point,thousands-sep,true-name,false-name: {raw}"
        ));
    };
    let single = |s: &str| -> Result<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(anyhow!("expected a single character: {s:?}")),
        }
    };
    Ok(Locale::new(
        single(decimal)?,
        single(thousands)?,
        true_name,
        false_name,
    ))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut store = ArgStore::new();
    for raw in &args.values {
        store.push(classify(raw));
    }
    for pair in &args.named {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("named argument without '=': {pair}"))?;
        ensure!(
            is_valid_attribute_name(name),
            "argument name is not a valid identifier: {name}"
        );
        store.push_named(name, classify(raw));
    }

    let output = match &args.locale {
        Some(raw) => {
            let locale = parse_locale(raw)?;
            vformat_with_locale(&args.format, &locale, &store)
        }
        None => vformat(&args.format, &store),
    }
    .with_context(|| format!("cannot format {:?}", args.format))?;

    if args.json {
        let units = formatted_size(&args.format, &store)?;
        let report = Report {
            format: &args.format,
            output,
            units,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{output}");
    }

    Ok(())
}
