use super::disbursement::DisbursementReport;
use super::event::IncomingPaymentEvent;
use std::time::Duration;

/// A human-readable message addressed to a payer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: String,
    pub display_name: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Sent as soon as an incoming payment is accepted.
    pub fn credit_alert(event: &IncomingPaymentEvent, delay: Duration, currency: &str) -> Self {
        Self {
            recipient: event.payer.clone(),
            display_name: event.payer_name.clone(),
            subject: format!("Credit Alert: {currency} {}", event.gross_amount),
            body: format!(
                "We received {currency} {}. Your custom split will execute in {}.",
                event.gross_amount,
                describe_delay(delay)
            ),
        }
    }

    pub fn setup_required(event: &IncomingPaymentEvent) -> Self {
        Self {
            recipient: event.payer.clone(),
            display_name: event.payer_name.clone(),
            subject: "Setup Required".to_string(),
            body: "Please configure your split template in the app.".to_string(),
        }
    }

    pub fn report(event: &IncomingPaymentEvent, report: &DisbursementReport, currency: &str) -> Self {
        Self {
            recipient: event.payer.clone(),
            display_name: event.payer_name.clone(),
            subject: format!("Transaction Report: {currency} {}", report.gross_amount),
            body: report.render(currency),
        }
    }
}

fn describe_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    match secs {
        0 => "a moment".to_string(),
        1 => "1 second".to_string(),
        s if s % 60 != 0 => format!("{s} seconds"),
        60 => "1 minute".to_string(),
        s => format!("{} minutes", s / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;
    use rust_decimal_macros::dec;

    fn event() -> IncomingPaymentEvent {
        IncomingPaymentEvent {
            event_id: "ref-1".into(),
            gross_amount: Amount::new(dec!(10000)).unwrap(),
            payer: "ada@example.com".into(),
            payer_name: "Ada".into(),
            raw_payload: Vec::new(),
            signature: String::new(),
        }
    }

    #[test]
    fn test_credit_alert() {
        let n = Notification::credit_alert(&event(), Duration::from_secs(240), "NGN");
        assert_eq!(n.recipient, "ada@example.com");
        assert_eq!(n.subject, "Credit Alert: NGN 10000");
        assert_eq!(
            n.body,
            "We received NGN 10000. Your custom split will execute in 4 minutes."
        );
    }

    #[test]
    fn test_describe_delay() {
        assert_eq!(describe_delay(Duration::from_secs(0)), "a moment");
        assert_eq!(describe_delay(Duration::from_secs(90)), "90 seconds");
        assert_eq!(describe_delay(Duration::from_secs(60)), "1 minute");
    }
}
