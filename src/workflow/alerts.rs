//! Alert feed workflow: fetch once, render every record as a card.

use crate::ingest::AlertFeed;
use crate::logging::{self, Service};
use crate::render::{AlertCard, RenderInstruction, ALERTS_UNAVAILABLE_MESSAGE};

pub struct AlertFeedWorkflow<F> {
    feed: F,
}

impl<F: AlertFeed> AlertFeedWorkflow<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// Loads the feed. On failure the result is one notice and no cards.
    pub fn load(&self) -> RenderInstruction {
        match self.feed.fetch_alerts() {
            Ok(alerts) => {
                tracing::debug!(count = alerts.len(), "alerts loaded");
                RenderInstruction::AlertCards {
                    cards: alerts.iter().map(AlertCard::from).collect(),
                }
            }
            Err(err) => {
                logging::log_service_failure(Service::AlertFeed, "load alerts", &err);
                RenderInstruction::Notice {
                    message: ALERTS_UNAVAILABLE_MESSAGE.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertRecord, AlertSeverity, AlertThreshold, ClientError};
    use chrono::{TimeZone, Utc};

    struct StaticFeed(Result<Vec<AlertRecord>, ClientError>);

    impl AlertFeed for StaticFeed {
        fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, ClientError> {
            self.0.clone()
        }
    }

    fn record(location: &str, severity: AlertSeverity) -> AlertRecord {
        AlertRecord {
            location: location.to_string(),
            parameter: "nitrate".to_string(),
            value: 14.0,
            threshold: AlertThreshold::Value(10.0),
            severity,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_cards_keep_feed_order() {
        let workflow = AlertFeedWorkflow::new(StaticFeed(Ok(vec![
            record("North Well", AlertSeverity::Low),
            record("South Well", AlertSeverity::High),
        ])));
        let RenderInstruction::AlertCards { cards } = workflow.load() else {
            panic!("expected alert cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].location, "North Well");
        assert_eq!(cards[0].css_class, Some("info"));
        assert_eq!(cards[1].css_class, None);
        assert_eq!(cards[1].threshold, "10");
    }

    #[test]
    fn test_failure_renders_one_notice_and_no_cards() {
        let workflow = AlertFeedWorkflow::new(StaticFeed(Err(ClientError::HttpStatus {
            status: 503,
            message: None,
        })));
        assert_eq!(
            workflow.load(),
            RenderInstruction::Notice {
                message: ALERTS_UNAVAILABLE_MESSAGE.to_string()
            }
        );
    }
}
