// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Loads the start duration of an iterative poll interval from JSON configuration.

use poll_interval::{IntervalFn, IterativeConfig, PollDuration, PollInterval};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: IterativeConfig = serde_json::from_str(r#"{ "start_duration": "250ms" }"#)?;

    // Add a quarter of the previous wait, capped at ten seconds.
    let interval = config.build(IntervalFn::new(|d: PollDuration| (d + d.divide(4)).min(PollDuration::TEN_SECONDS)))?;

    let mut previous = None;
    for poll_count in 1..=8 {
        let wait = interval.next(poll_count, previous);
        println!("attempt {poll_count}: wait {wait}");
        previous = Some(wait);
    }

    println!("configuration: {}", serde_json::to_string(&IterativeConfig::from(&interval))?);

    Ok(())
}
