// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::PollDuration;

/// Default start duration of an iterative poll interval: 100 milliseconds.
///
/// Short enough that a condition which is already satisfied is noticed quickly, while the
/// interval function takes over the pacing of every later attempt.
pub const DEFAULT_START_DURATION: PollDuration = PollDuration::ONE_HUNDRED_MILLISECONDS;
