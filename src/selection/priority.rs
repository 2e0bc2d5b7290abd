//! Priority selection.

use crate::health::probe::Prober;
use crate::selection::endpoint::Endpoint;

/// The endpoint chosen by [`select`] and its position in the priority list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Index in the priority list (0 = primary).
    pub index: usize,
    pub endpoint: Endpoint,
}

/// Return the first reachable endpoint in list order, or `None` if all are down.
///
/// Endpoints after the first reachable one are not probed.
pub async fn select<P: Prober>(priority_list: &[Endpoint], prober: &P) -> Option<Selection> {
    for (index, endpoint) in priority_list.iter().enumerate() {
        if prober.check(endpoint).await.reachable {
            return Some(Selection {
                index,
                endpoint: endpoint.clone(),
            });
        }
    }
    None
}
