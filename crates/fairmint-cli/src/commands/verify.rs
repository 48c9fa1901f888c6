//! Verify command implementation.

use fairmint_allocation::{allocate, verify_directory};

use super::{load_policy, shuffle_options};
use crate::output;
use crate::AllocationArgs;

pub fn run(
    args: &AllocationArgs,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let policy = load_policy(args.policy.as_deref())?;
    let allocations = allocate(
        args.num_nfts_minted,
        &args.random_seed,
        &policy,
        &shuffle_options(args),
    )?;

    let report = verify_directory(&args.output_directory, &allocations, &args.base_image_path)?;

    if json_output {
        let value = serde_json::json!({
            "ok": report.is_ok(),
            "report": report,
        });
        println!("{}", output::format_json(&value));
    } else {
        output::print_verdict_header();
        for verdict in &report.verdicts {
            println!("{}", output::format_verdict_row(verdict));
        }
        for name in &report.unexpected {
            eprintln!("Unexpected file: {}", name);
        }
        let failed = report.failures().count();
        println!(
            "{} of {} serials verified",
            report.verdicts.len() - failed,
            report.verdicts.len()
        );
    }

    if strict && !report.is_ok() {
        return Err(format!(
            "verification failed: {} serial(s) do not match, {} unexpected file(s)",
            report.failures().count(),
            report.unexpected.len()
        )
        .into());
    }

    Ok(())
}
