use log::debug;

/// Identifies one issued layout request. Tickets are ordered by issue time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No newer request has resolved yet, the result may be shown
    Current,
    /// A newer request already resolved, the result must be discarded
    Stale,
}

/// Tags successive requests with increasing sequence numbers so that a slow response can never
/// overwrite the result of a request issued after it.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    latest_resolved: Option<RequestTicket>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// Registers the resolution (success or failure) of a request.
    pub fn resolve(&mut self, ticket: RequestTicket) -> Resolution {
        match self.latest_resolved {
            Some(latest) if latest >= ticket => {
                debug!(
                    "discarding response to request #{}, #{} already resolved",
                    ticket.0, latest.0
                );
                Resolution::Stale
            }
            _ => {
                self.latest_resolved = Some(ticket);
                Resolution::Current
            }
        }
    }

    /// True if `ticket` is the most recently issued request
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Number of issued requests that have not been superseded by a resolution
    pub fn in_flight(&self) -> u64 {
        self.issued - self.latest_resolved.map_or(0, |t| t.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_order_resolution_applies_everything() {
        let mut seq = RequestSequencer::new();
        let t1 = seq.issue();
        let t2 = seq.issue();
        assert_eq!(seq.resolve(t1), Resolution::Current);
        assert_eq!(seq.resolve(t2), Resolution::Current);
        assert_eq!(seq.in_flight(), 0);
    }

    #[test]
    fn older_response_after_newer_is_stale() {
        let mut seq = RequestSequencer::new();
        let t1 = seq.issue();
        let t2 = seq.issue();
        assert!(seq.is_latest(t2));
        assert!(!seq.is_latest(t1));
        assert_eq!(seq.resolve(t2), Resolution::Current);
        assert_eq!(seq.resolve(t1), Resolution::Stale);
    }

    #[test]
    fn tickets_are_monotonic() {
        let mut seq = RequestSequencer::new();
        let tickets = (0..5).map(|_| seq.issue()).collect::<Vec<_>>();
        assert!(tickets.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seq.in_flight(), 5);
    }
}
