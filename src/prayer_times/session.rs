use log::debug;

use crate::models::PrayerResponse;

/// Issued when a fetch for a zone starts; only the newest ticket may land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    zone: String,
    generation: u64,
}

impl FetchTicket {
    pub fn zone(&self) -> &str {
        &self.zone
    }
}

/// The selected zone and the monthly table currently shown for it.
///
/// Every selection bumps a generation counter, so a response for a zone the
/// user has already switched away from is discarded instead of overwriting
/// the newer state.
#[derive(Debug, Default)]
pub struct ZoneSession {
    generation: u64,
    zone: Option<String>,
    response: Option<PrayerResponse>,
}

impl ZoneSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, zone: &str) -> FetchTicket {
        self.generation += 1;
        if self.zone.as_deref() != Some(zone) {
            self.response = None;
        }
        self.zone = Some(zone.to_string());
        FetchTicket {
            zone: zone.to_string(),
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Store `response` if `ticket` is still the latest. Returns whether it
    /// was applied.
    pub fn complete(&mut self, ticket: &FetchTicket, response: PrayerResponse) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding response for {} (generation {}, current {})",
                ticket.zone, ticket.generation, self.generation
            );
            return false;
        }
        self.response = Some(response);
        true
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn response(&self) -> Option<&PrayerResponse> {
        self.response.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(zone: &str) -> PrayerResponse {
        PrayerResponse {
            prayer_time: vec![],
            status: "OK!".into(),
            server_time: String::new(),
            period_type: "month".into(),
            lang: "ms_my".into(),
            zone: zone.into(),
            bearing: String::new(),
        }
    }

    #[test]
    fn latest_ticket_lands() {
        let mut session = ZoneSession::new();
        let ticket = session.begin("WLY01");
        assert!(session.complete(&ticket, response("WLY01")));
        assert_eq!(session.response().unwrap().zone, "WLY01");
    }

    #[test]
    fn stale_response_cannot_overwrite_newer_zone() {
        let mut session = ZoneSession::new();
        let slow = session.begin("JHR01");
        let fast = session.begin("SGR01");

        assert!(session.complete(&fast, response("SGR01")));
        assert!(!session.complete(&slow, response("JHR01")));
        assert_eq!(session.zone(), Some("SGR01"));
        assert_eq!(session.response().unwrap().zone, "SGR01");
        assert_eq!(slow.zone(), "JHR01");
    }

    #[test]
    fn switching_zone_clears_shown_table() {
        let mut session = ZoneSession::new();
        let t = session.begin("WLY01");
        session.complete(&t, response("WLY01"));

        let refresh = session.begin("WLY01");
        assert!(session.response().is_some());
        assert!(session.complete(&refresh, response("WLY01")));

        session.begin("PNG01");
        assert!(session.response().is_none());
    }
}
