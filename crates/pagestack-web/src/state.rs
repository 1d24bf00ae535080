//! History record decoding

use pagestack_core::HistoryState;

/// Decode the JSON form of `history.state`.
///
/// Pages loaded before the host router wrote its record have no state, and
/// records that are not objects carry no position; both decode to `None`.
pub fn decode_history_state(json: Option<&str>) -> Option<HistoryState> {
    let json = json?;
    match serde_json::from_str::<HistoryState>(json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unreadable history state");
            None
        }
    }
}
