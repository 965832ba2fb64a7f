// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Drives an iterative poll interval from a hand-written polling loop.
//!
//! The loop checks a condition that becomes true on the fifth attempt, doubling the wait between
//! attempts and giving up once the total wait would exceed its budget. No actual sleeping happens;
//! the example only prints the schedule.

use poll_interval::{Error, PollDuration, PollInterval, iterative_with_start};

fn main() -> Result<(), Error> {
    let interval = iterative_with_start(|d: PollDuration| d * 2, PollDuration::FIVE_HUNDRED_MILLISECONDS)?;
    let budget = PollDuration::ONE_MINUTE;

    println!("polling with {interval}");

    let mut previous = None;
    let mut waited = PollDuration::ZERO;

    for poll_count in 1.. {
        if condition_met(poll_count) {
            println!("condition met on attempt {poll_count} after waiting {waited}");
            return Ok(());
        }

        let wait = interval.next(poll_count, previous);
        if waited + wait > budget {
            println!("giving up after {poll_count} attempts, next wait {wait} exceeds the {budget} budget");
            return Ok(());
        }

        println!("attempt {poll_count} failed, waiting {wait}");
        waited = waited + wait;
        previous = Some(wait);
    }

    Ok(())
}

fn condition_met(poll_count: u32) -> bool {
    poll_count >= 5
}
