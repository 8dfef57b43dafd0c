//! Prometheus counter registry.

use ::metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const ORDERS_TOTAL: &str = "orders_total";

/// Install the process-wide recorder. Must be called once at startup.
///
/// `orders_total` is exposed at zero before the first order.
pub fn register() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(ORDERS_TOTAL, "Total number of orders placed");
    counter!(ORDERS_TOTAL).absolute(0);

    Ok(handle)
}

/// Increments the orders counter.
pub fn inc_orders() {
    counter!(ORDERS_TOTAL).increment(1);
}

/// Recorder shared by every test in the binary; the first caller installs it.
#[cfg(test)]
pub(crate) fn test_handle() -> PrometheusHandle {
    use std::sync::OnceLock;

    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| register().expect("recorder installs once"))
        .clone()
}
