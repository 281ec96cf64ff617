use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::time::Duration;

use crate::utils::http::{with_query, ApiResponse, HttpClient};
use crate::utils::{Logger, Pacer};

pub const ALREADY_CHECKED_IN_MESSAGE: &str = "Already checked in today";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInStatus {
    CheckedInToday,
    Due,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    CheckedIn { attempts: u32 },
    /// The API answered 400 "Already checked in today".
    AlreadyCheckedIn { attempts: u32 },
    /// Every attempt got a retryable 400.
    Exhausted { attempts: u32, last_message: Option<String> },
    Rejected { attempts: u32, status: u16 },
    TransportFailed { attempts: u32, error: String },
}

impl CheckInOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            CheckInOutcome::CheckedIn { attempts }
            | CheckInOutcome::AlreadyCheckedIn { attempts }
            | CheckInOutcome::Exhausted { attempts, .. }
            | CheckInOutcome::Rejected { attempts, .. }
            | CheckInOutcome::TransportFailed { attempts, .. } => *attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            CheckInOutcome::CheckedIn { .. } | CheckInOutcome::AlreadyCheckedIn { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retries: u32,
    pub delay: Duration,
}

/// Calendar-day comparison in UTC only; local offsets never matter.
pub fn is_same_utc_day(last: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    last.date_naive() == now.date_naive()
}

/// `lastCheckIn` may be an RFC 3339 string, epoch milliseconds, or null.
pub fn parse_last_check_in(body: &Value) -> Option<DateTime<Utc>> {
    match body.get("lastCheckIn")? {
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

/// Asks the status endpoint whether `address` already checked in today.
/// Any failure counts as "due" so the check-in is attempted anyway.
pub async fn check_in_status(
    http: &dyn HttpClient,
    status_url: &str,
    address: &str,
    now: DateTime<Utc>,
) -> CheckInStatus {
    let url = with_query(status_url, "address", address);
    let response = match http.get(&url).await {
        Ok(response) => response,
        Err(e) => {
            Logger::error(&format!("Error fetching check-in status: {}", e));
            return CheckInStatus::Due;
        }
    };

    if response.status != 200 {
        Logger::error(&format!(
            "Failed to fetch check-in status (HTTP {})",
            response.status
        ));
        return CheckInStatus::Due;
    }

    match parse_last_check_in(&response.body) {
        Some(last) if is_same_utc_day(last, now) => {
            Logger::success("Already checked in today. Next check-in at 00:05 UTC.");
            CheckInStatus::CheckedInToday
        }
        _ => {
            Logger::warning("You haven't checked in today. Proceeding to check-in...");
            CheckInStatus::Due
        }
    }
}

enum Reply {
    Success,
    AlreadyDone,
    Retryable,
    Unexpected,
}

fn classify(response: &ApiResponse) -> Reply {
    match response.status {
        201 => Reply::Success,
        400 => {
            let already = response
                .message()
                .map(|m| m.to_ascii_lowercase().contains("already checked in"))
                .unwrap_or(false);
            if already {
                Reply::AlreadyDone
            } else {
                Reply::Retryable
            }
        }
        _ => Reply::Unexpected,
    }
}

/// Posts the daily check-in. A 400 that is not "already checked in" is
/// retried `policy.retries` times with a fixed delay; nothing else is retried.
pub async fn submit_check_in(
    http: &dyn HttpClient,
    pacer: &dyn Pacer,
    check_in_url: &str,
    address: &str,
    policy: RetryPolicy,
) -> CheckInOutcome {
    let url = with_query(check_in_url, "address", address);
    let payload = json!({ "address": address });
    let max_attempts = policy.retries + 1;
    let mut last_message = None;

    for attempt in 1..=max_attempts {
        let response = match http.post(&url, &payload).await {
            Ok(response) => response,
            Err(e) => {
                Logger::error(&format!("Check-in request failed: {}", e));
                return CheckInOutcome::TransportFailed {
                    attempts: attempt,
                    error: e.to_string(),
                };
            }
        };

        match classify(&response) {
            Reply::Success => {
                Logger::success("Check-in success!");
                return CheckInOutcome::CheckedIn { attempts: attempt };
            }
            Reply::AlreadyDone => {
                Logger::success("Already checked in today. Next check-in at 00:05 UTC.");
                return CheckInOutcome::AlreadyCheckedIn { attempts: attempt };
            }
            Reply::Unexpected => {
                Logger::error(&format!(
                    "Check-in rejected with HTTP {}",
                    response.status
                ));
                return CheckInOutcome::Rejected {
                    attempts: attempt,
                    status: response.status,
                };
            }
            Reply::Retryable => {
                last_message = response.message().map(str::to_string);
                if attempt < max_attempts {
                    tracing::debug!(attempt, max_attempts, ?last_message, "check-in retry");
                    pacer.sleep(policy.delay).await;
                }
            }
        }
    }

    Logger::error(&format!(
        "Check-in failed after {} attempt(s){}",
        max_attempts,
        last_message
            .as_deref()
            .map(|m| format!(": {}", m))
            .unwrap_or_default()
    ));
    CheckInOutcome::Exhausted {
        attempts: max_attempts,
        last_message,
    }
}
