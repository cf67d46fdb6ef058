//! Policy command - print the effective guard policy

use crate::cli::to_json;
use crate::domain::TransitionGuard;
use crate::errors::Result;

pub fn run(guard: &TransitionGuard) -> Result<()> {
    println!("{}", to_json(guard.policy())?);
    Ok(())
}
