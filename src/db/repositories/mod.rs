pub mod history;
pub mod stats;

/// Store-assigned timestamp: RFC 3339 UTC with fixed microsecond precision so
/// that string order matches time order.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
