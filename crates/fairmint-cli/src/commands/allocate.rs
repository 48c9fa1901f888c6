//! Allocate command implementation.

use fairmint_allocation::{allocate, summarize, AllocationError, MetadataWriter, WriteOptions};
use tracing::info;

use super::{load_policy, shuffle_options};
use crate::output;
use crate::AllocationArgs;

pub fn run(
    args: &AllocationArgs,
    force: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let policy = load_policy(args.policy.as_deref())?;
    let allocations = allocate(
        args.num_nfts_minted,
        &args.random_seed,
        &policy,
        &shuffle_options(args),
    )?;

    let options = WriteOptions {
        overwrite: force,
        ..WriteOptions::default()
    };
    let mut writer =
        MetadataWriter::open(&args.output_directory, args.base_image_path.as_str(), options)?;
    writer.write_all(&allocations).map_err(|e| match e {
        AllocationError::FileExists { path } => {
            Box::<dyn std::error::Error>::from(format!(
                "File {} already exists. Use --force to overwrite",
                path.display()
            ))
        }
        other => Box::<dyn std::error::Error>::from(other),
    })?;
    let written = writer.finish();

    info!(
        written,
        dir = %args.output_directory.display(),
        "metadata written"
    );

    let summary = summarize(&allocations, &policy);
    if json_output {
        println!("{}", output::format_json(&serde_json::to_value(&summary)?));
    } else {
        println!(
            "Wrote {} metadata files to {}",
            written,
            args.output_directory.display()
        );
        output::print_summary(&summary);
    }
    Ok(())
}
