//! Shuffle command implementation.

use fairmint_shuffle::{byte_width, ranked_digests, Seed, ShuffleOptions, TokenCount};
use serde_json::json;
use std::num::NonZeroUsize;

use crate::output;

pub fn run(
    count: i64,
    seed: &str,
    with_digests: bool,
    json_output: bool,
    threads: NonZeroUsize,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ShuffleOptions::default().with_threads(threads);
    let ranked = ranked_digests(count, seed, &options)?;

    // Both already validated by the shuffle above.
    let seed = Seed::parse(seed)?;
    let count = TokenCount::try_from(count)?;

    if json_output {
        let order: Vec<u64> = ranked.iter().map(|d| d.serial()).collect();
        let mut value = json!({
            "seed": seed.as_str(),
            "count": count.get(),
            "byte_width": byte_width(count),
            "order": order,
        });
        if with_digests {
            value["digests"] = serde_json::to_value(&ranked)?;
        }
        println!("{}", output::format_json(&value));
    } else {
        output::print_rank_header(with_digests);
        for (rank, digest) in ranked.iter().enumerate() {
            println!("{}", output::format_rank_row(rank as u64, digest, with_digests));
        }
    }
    Ok(())
}
