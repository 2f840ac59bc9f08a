//! Reshapes events with jq programs, run through jaq.

use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
pub use jaq_interpret::Filter;
use jaq_interpret::{Ctx, FilterT, ParseCtx, RcIter, Val};
use serde_json::Value;
use tracing::warn;

/// Compile a jq program, with the standard library available.
pub fn compile(program: &str) -> Result<Filter> {
    let mut defs = ParseCtx::new(Vec::new());
    defs.insert_natives(jaq_core::core());
    defs.insert_defs(jaq_std::std());
    let (main, errs) = jaq_parse::parse(program, jaq_parse::main());
    if !errs.is_empty() {
        return Err(anyhow!(errs.into_iter().join("; ")));
    }
    let main = main.ok_or_else(|| anyhow!("empty jq program"))?;
    let filter = defs.compile(main);
    if !defs.errs.is_empty() {
        return Err(anyhow!(defs.errs.into_iter().map(|(e, _)| e).join("; ")));
    }
    Ok(filter)
}

/// Run a filter and keep only its first output.
pub fn first_result(filter: &Filter, input: Value) -> Option<Result<Value>> {
    let inputs = RcIter::new(core::iter::empty());
    let mut outputs = filter
        .run((Ctx::new([], &inputs), Val::from(input)))
        .map(|r| r.map(Value::from).map_err(|e| anyhow!(e.to_string())));
    let first = outputs.next();
    if outputs.next().is_some() {
        warn!("Filter returned more than one result; subsequent results are ignored");
    }
    first
}

/// Run an optional filter, passing the input through when absent. A
/// filter that yields nothing is an error.
pub fn reshape(filter: Option<&Filter>, input: Value, which: &str) -> Result<Value> {
    match filter {
        None => Ok(input),
        Some(filter) => first_result(filter, input)
            .ok_or_else(|| anyhow!("{} filter produced no result", which))?
            .with_context(|| format!("{} filter failed", which)),
    }
}
