//! Graph command - print the whole workflow

use crate::cli::to_json;
use crate::domain::{TransitionEdge, TransitionGuard};
use crate::errors::Result;

use super::requirements::describe;

pub fn render(guard: &TransitionGuard, json: bool) -> Result<String> {
    if json {
        let edges: Vec<&TransitionEdge> = guard.table().edges().collect();
        return to_json(&edges);
    }
    Ok(guard.table().edges().map(describe).collect::<Vec<_>>().join("\n"))
}

pub fn run(guard: &TransitionGuard, json: bool) -> Result<()> {
    println!("{}", render(guard, json)?);
    Ok(())
}
