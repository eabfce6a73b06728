use std::collections::HashMap;
use std::time::Instant;

use reqwest::{Request, Response};
use tokio::time::sleep;

use crate::{ClientPool, EgressError, Result, Session};

/// Drives one outbound call to completion under the dual retry policy.
///
/// Connectivity failures and retriable status codes consume independent
/// budgets: each attempt's actual outcome decides which budget (if either)
/// is charged. The delay runs only between attempts — never before the
/// first, never after the final outcome. When the pool carries a call-wide
/// deadline, it is checked before each retry is scheduled; an attempt or
/// sleep already in flight is allowed to run out.
pub(crate) async fn execute(
    pool: &ClientPool,
    session: &Session,
    request: Request,
    send_client_cert: bool,
    connectivity_retries: u32,
    status_retries: &HashMap<u16, u32>,
) -> Result<Response> {
    let client = pool.client_for(send_client_cert);
    let mut conn_budget = connectivity_retries;
    // Work on a copy so the caller's request stays reusable.
    let mut status_budget = status_retries.clone();
    let deadline = pool.call_timeout().map(|timeout| Instant::now() + timeout);

    loop {
        let attempt = clone_for_attempt(&request)?;
        match client.execute(attempt).await {
            Ok(response) => {
                let code = response.status().as_u16();
                match status_budget.get_mut(&code) {
                    Some(remaining) if *remaining > 0 => {
                        if past_deadline(deadline) {
                            tracing::debug!(
                                session = %session,
                                "call deadline reached, keeping status {code} response"
                            );
                            return Ok(response);
                        }
                        *remaining -= 1;
                        drop(response);
                        wait_before_retry(pool, session).await;
                    }
                    // An explicit zero entry behaves exactly like an
                    // absent one: return immediately.
                    _ => return Ok(response),
                }
            }
            Err(err) => {
                if conn_budget == 0 || past_deadline(deadline) {
                    return Err(EgressError::Transport(err));
                }
                conn_budget -= 1;
                wait_before_retry(pool, session).await;
            }
        }
    }
}

fn clone_for_attempt(request: &Request) -> Result<Request> {
    // Bodies built from the payload string are always cloneable; only a
    // request hook that swapped in a streaming body can fail here.
    request.try_clone().ok_or_else(|| EgressError::Build {
        url: request.url().to_string(),
        reason: "request body is a stream and cannot be replayed across attempts".to_owned(),
    })
}

fn past_deadline(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|deadline| Instant::now() >= deadline)
}

/// Sleeps in the calling task before the next attempt. Retries are never
/// scheduled asynchronously.
async fn wait_before_retry(pool: &ClientPool, session: &Session) {
    let delay = pool.retry_delay();
    tracing::debug!(session = %session, "retrying outbound call after {} ms", delay.as_millis());
    sleep(delay).await;
}
