use probe_core::{
    resolve_template, AttemptOutcome, AttemptRecord, EndpointVerdict, RetryMachine, RetryState,
    Task,
};
use probe_logging::{probe_debug, probe_warn};

use crate::classify::ParsabilityClassifier;
use crate::fetch::Prober;
use crate::snapshot::SnapshotSink;

/// Drive one endpoint through the keyword pool until a parsable hit or
/// exhaustion. Always returns exactly one verdict; transport, parse and
/// persistence failures are all absorbed here.
pub async fn probe_endpoint(
    prober: &dyn Prober,
    classifier: &ParsabilityClassifier,
    snapshots: &dyn SnapshotSink,
    keywords: &[String],
    task: &Task,
) -> EndpointVerdict {
    let mut machine = RetryMachine::new(keywords);
    let mut last_attempt = AttemptRecord::default();

    while let Some(keyword) = machine.current_keyword() {
        let url = resolve_template(&task.config.url_template, keyword);

        match prober.probe(&url, task.config.use_proxy).await {
            Err(err) => {
                let message = err.to_string();
                probe_debug!(
                    "{}: transport failure for keyword '{}': {}",
                    task.config.name,
                    keyword,
                    message
                );
                last_attempt = AttemptRecord {
                    status_code: None,
                    body: String::new(),
                    transport_error: Some(message.clone()),
                    parsable: false,
                };
                machine.advance(AttemptOutcome::TransportError { message });
            }
            Ok(response) if response.status != 200 => {
                probe_debug!(
                    "{}: HTTP {} for keyword '{}'",
                    task.config.name,
                    response.status,
                    keyword
                );
                last_attempt = AttemptRecord {
                    status_code: Some(response.status),
                    body: response.body,
                    transport_error: None,
                    parsable: false,
                };
                machine.advance(AttemptOutcome::HttpError {
                    status: response.status,
                });
            }
            Ok(response) => {
                let parsable = classifier.is_parsable(&response.body);
                // Every 200 body is snapshotted, not only a winning one;
                // the last 200 response is what remains on disk.
                if let Err(err) = snapshots.write(&task.category, &task.config.name, &response.body)
                {
                    probe_warn!("snapshot write failed for {}: {}", task.config.name, err);
                }
                last_attempt = AttemptRecord {
                    status_code: Some(response.status),
                    body: response.body,
                    transport_error: None,
                    parsable,
                };
                machine.advance(if parsable {
                    AttemptOutcome::Parsable
                } else {
                    AttemptOutcome::NotParsable
                });
            }
        }
    }

    let parsable = matches!(machine.state(), RetryState::Success { .. });
    EndpointVerdict {
        category: task.category.clone(),
        config: task.config.clone(),
        parsable,
        status_message: machine.status_message(),
        last_attempt,
    }
}
