//! DeprecationHandler — classifies deprecation notices into the registry and
//! passes everything else to the handler it replaced.

use std::sync::Arc;

use depwatch_core::types::{Frame, Notice};

use super::dispatcher::{Disposition, NoticeHandler};
use crate::classifier::Classifier;
use crate::registry::DeprecationRegistry;

pub struct DeprecationHandler {
    classifier: Classifier,
    registry: Arc<DeprecationRegistry>,
    previous: Option<Arc<dyn NoticeHandler>>,
}

impl DeprecationHandler {
    /// `previous` receives every non-deprecation notice.
    pub fn new(classifier: Classifier, previous: Option<Arc<dyn NoticeHandler>>) -> Self {
        Self {
            classifier,
            registry: Arc::new(DeprecationRegistry::new()),
            previous,
        }
    }

    pub fn registry(&self) -> &Arc<DeprecationRegistry> {
        &self.registry
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

impl NoticeHandler for DeprecationHandler {
    fn handle(&self, notice: &Notice, trace: &[Frame]) -> Disposition {
        if !notice.is_deprecation() {
            tracing::trace!(kind = ?notice.kind, "forwarding non-deprecation notice");
            return match &self.previous {
                Some(previous) => previous.handle(notice, trace),
                None => Disposition::Declined,
            };
        }

        let deprecation = self.classifier.classify(notice, trace.to_vec());
        tracing::debug!(
            group = %deprecation.group(),
            method = deprecation.method_full_name().as_deref().unwrap_or("-"),
            message = deprecation.message(),
            "deprecation captured"
        );
        self.registry.record(deprecation);
        Disposition::Handled
    }
}

impl std::fmt::Debug for DeprecationHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeprecationHandler")
            .field("recorded", &self.registry.len())
            .field("has_previous", &self.previous.is_some())
            .finish()
    }
}
