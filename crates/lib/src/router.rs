//! # Outcome Routing
//!
//! Turns the result of one inference call into a routed record. Every call
//! transfers exactly one record to exactly one relationship.

use crate::{
    errors::QaError,
    types::{Prediction, Record, Routed},
};
use tracing::{error, warn};

/// Routing policy derived from the processor configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Send predictions that carry a non-empty error to `failure`.
    pub route_errors_to_failure: bool,
}

/// Routes a record according to the inference result.
///
/// - `Err`: the record is sent to `failure` unmodified and the error is logged.
/// - `Ok` with an error and `route_errors_to_failure`: the prediction
///   attributes are attached and the record is sent to `failure`.
/// - `Ok` otherwise: the prediction attributes are attached and the record is
///   sent to `success`. The `error` attribute is always written, possibly empty.
pub fn route(
    mut record: Record,
    result: Result<Prediction, QaError>,
    policy: RoutingPolicy,
) -> Routed {
    match result {
        Err(e) => {
            error!(record = %record.id(), "Unable to answer question with the QA model: {e}");
            Routed::failure(record)
        }
        Ok(prediction) => {
            let failed = policy.route_errors_to_failure && prediction.has_error();
            if failed {
                warn!(
                    record = %record.id(),
                    "QA model reported an error: {}", prediction.error
                );
            }
            record.attributes.extend(prediction.into_attributes());
            if failed {
                Routed::failure(record)
            } else {
                Routed::success(record)
            }
        }
    }
}
