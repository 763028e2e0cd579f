// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Concurrent fan-out with partial tolerance.
//!
//! Issues independent lookups concurrently and keeps the ones that resolved.
//! Failed or empty lookups are logged and dropped. Callers that need a
//! mandatory anchor fetch it separately and propagate its error.
//!
//! At most [`MAX_IN_FLIGHT`] lookups run at once, so a busy block cannot
//! flood the upstream node.

use std::{fmt::Display, future::Future};

use futures::stream::{self, StreamExt};

/// Upper bound on lookups awaiting a response at the same time.
pub const MAX_IN_FLIGHT: usize = 16;

/// Run `lookups` concurrently and return the resolved values in input order.
///
/// `Err` results are logged at `warn` with `what` as context; `Ok(None)` is
/// dropped silently.
pub async fn gather_resolved<T, E, I, F>(what: &'static str, lookups: I) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<Option<T>, E>>,
    E: Display,
{
    stream::iter(lookups)
        .buffered(MAX_IN_FLIGHT)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .filter_map(|result| match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch {what}, skipping");
                None
            }
        })
        .collect()
}
