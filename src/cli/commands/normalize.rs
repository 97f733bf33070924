//! Normalize command - Print internal name forms

use super::NormalizeArgs;
use crate::cli::exit_codes;
use crate::error::KeepRulesError;
use crate::utils::names::{internal_name, split_top_level};

pub fn execute(args: NormalizeArgs) -> Result<i32, KeepRulesError> {
    for line in normalized_lines(&args) {
        println!("{line}");
    }
    Ok(exit_codes::SUCCESS)
}

fn normalized_lines(args: &NormalizeArgs) -> Vec<String> {
    args.names
        .iter()
        .flat_map(|name| {
            let name = internal_name(name);
            if args.filter {
                split_top_level(&name)
            } else {
                vec![name]
            }
        })
        .collect()
}
