use crate::identity::ValidationStatus;
use crate::Labels;
use metrics::{counter, Counter};

const FORM: &str = "form";
const OUTCOME: &str = "outcome";
const STATUS: &str = "status";
const EVENT: &str = "event";
const SOURCE: &str = "source";

/// Counters for a single form. Created per validation so that the recorder
/// installed at call time receives them.
pub struct FormMetrics {
    pub accepted: Counter,
    pub rejected: Counter,
    labels: Labels,
}

impl FormMetrics {
    pub fn new(form: &str, labels: &Labels) -> Self {
        let labels = labels.clone_with_labels(Labels::new(&[(FORM, form)]));
        FormMetrics {
            accepted: counter!(
                "form.submissions",
                labels.clone_with_labels(Labels::new(&[(OUTCOME, "accepted")]))
            ),
            rejected: counter!(
                "form.submissions",
                labels.clone_with_labels(Labels::new(&[(OUTCOME, "rejected")]))
            ),
            labels,
        }
    }

    pub fn record_outcome(&self, accepted: bool) {
        if accepted {
            self.accepted.increment(1);
        } else {
            self.rejected.increment(1);
        }
    }

    pub fn record_identity(&self, status: ValidationStatus) {
        counter!(
            "identity.validations",
            self.labels
                .clone_with_labels(Labels::new(&[(STATUS, status.as_ref())]))
        )
        .increment(1);
    }
}

pub fn record_session_change(event: &str) {
    counter!("session.changes", Labels::new(&[(EVENT, event)])).increment(1);
}

pub fn record_advisor_response(source: &str, labels: &Labels) {
    counter!(
        "advisor.responses",
        labels.clone_with_labels(Labels::new(&[(SOURCE, source)]))
    )
    .increment(1);
}
