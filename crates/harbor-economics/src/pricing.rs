//! Session pricing: `P = T * (Cs*S + CR*R + CW*W)` with surge and
//! request-frequency multipliers.

use serde::{Deserialize, Serialize};

use crate::constants::{READ_PRICE_PER_GB, STORAGE_PRICE_PER_GB_MONTH, WRITE_PRICE_PER_GB};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const SECONDS_PER_MONTH: f64 = 30.0 * 24.0 * 3600.0;

/// Customer session shape
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionParameters {
    /// Stored data volume in bytes
    pub storage_load_bytes: f64,
    /// Sustained read bandwidth in bits per second
    pub read_rate_bps: f64,
    /// Sustained write bandwidth in bits per second
    pub write_rate_bps: f64,
    /// Session length in seconds
    pub duration_seconds: f64,
    /// Requests per second, drives the frequency multiplier
    pub request_frequency: f64,
    /// Collateral posted by the customer
    pub collateral: f64,
}

impl SessionParameters {
    /// Reference 1 GB / 1 Mbps session used for per-GB price tracking
    pub fn reference_gb() -> Self {
        Self {
            storage_load_bytes: 1e9,
            read_rate_bps: 1e6,
            write_rate_bps: 1e5,
            duration_seconds: SECONDS_PER_MONTH,
            request_frequency: 1.0,
            collateral: 1000.0,
        }
    }
}

/// Price a session at the given network utilization.
///
/// Pure function: callers read utilization fresh from the ledger per call.
/// The surge multiplier `e^(2u)` matches the network-fee shape, so a busy
/// network prices sessions and fees consistently.
pub fn session_cost(params: &SessionParameters, utilization: f64) -> f64 {
    let storage_gb = params.storage_load_bytes / BYTES_PER_GB;
    let read_gb_per_month = params.read_rate_bps * SECONDS_PER_MONTH / (8.0 * BYTES_PER_GB);
    let write_gb_per_month = params.write_rate_bps * SECONDS_PER_MONTH / (8.0 * BYTES_PER_GB);
    let duration_months = params.duration_seconds / SECONDS_PER_MONTH;

    let base_cost = duration_months
        * (STORAGE_PRICE_PER_GB_MONTH * storage_gb
            + READ_PRICE_PER_GB * read_gb_per_month
            + WRITE_PRICE_PER_GB * write_gb_per_month);

    let market_adjustment = (2.0 * utilization).exp() - 1.0;
    let frequency_factor = params.request_frequency.ln_1p();

    base_cost * (1.0 + market_adjustment) * (1.0 + 0.1 * frequency_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terabyte_session() -> SessionParameters {
        SessionParameters {
            storage_load_bytes: 1e12,
            read_rate_bps: 1e9,
            write_rate_bps: 1e8,
            duration_seconds: SECONDS_PER_MONTH,
            request_frequency: 1.0,
            collateral: 10_000.0,
        }
    }

    #[test]
    fn test_cost_monotone_in_utilization() {
        let session = terabyte_session();
        let low = session_cost(&session, 0.1);
        let high = session_cost(&session, 0.9);
        assert!(high > low);
    }

    #[test]
    fn test_cost_nonnegative() {
        let zero = SessionParameters {
            storage_load_bytes: 0.0,
            read_rate_bps: 0.0,
            write_rate_bps: 0.0,
            duration_seconds: 0.0,
            request_frequency: 0.0,
            collateral: 0.0,
        };
        assert_eq!(session_cost(&zero, 0.5), 0.0);
        assert!(session_cost(&terabyte_session(), 0.0) > 0.0);
    }

    #[test]
    fn test_idle_network_base_cost() {
        // at u = 0 the surge multiplier is exactly 1
        let session = SessionParameters {
            storage_load_bytes: BYTES_PER_GB,
            read_rate_bps: 0.0,
            write_rate_bps: 0.0,
            duration_seconds: SECONDS_PER_MONTH,
            request_frequency: 0.0,
            collateral: 0.0,
        };
        let cost = session_cost(&session, 0.0);
        assert!((cost - STORAGE_PRICE_PER_GB_MONTH).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_multiplier() {
        let mut session = terabyte_session();
        session.request_frequency = 0.0;
        let quiet = session_cost(&session, 0.5);

        session.request_frequency = 100.0;
        let chatty = session_cost(&session, 0.5);

        assert!(chatty > quiet);
        assert!((chatty / quiet - (1.0 + 0.1 * 101.0_f64.ln())).abs() < 1e-9);
    }
}
