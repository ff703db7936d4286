use crate::models::Flight;

/// Location filter for available flights.
///
/// A flight matches when its state matches on either leg AND its country
/// matches on either leg. The two legs are checked independently, so a flight
/// from Jalisco, Mexico to Texas, USA matches `("Texas", "Mexico")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFilter {
    pub state: String,
    pub country: String,
}

impl LocationFilter {
    /// Builds a filter only when both values are present and non-empty.
    pub fn from_params(state: Option<&str>, country: Option<&str>) -> Option<Self> {
        let state = state.map(str::trim).filter(|s| !s.is_empty())?;
        let country = country.map(str::trim).filter(|c| !c.is_empty())?;

        Some(Self {
            state: state.to_string(),
            country: country.to_string(),
        })
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        let is = |field: &Option<String>, wanted: &str| field.as_deref() == Some(wanted);

        let state_match = is(&flight.origin.state, &self.state)
            || is(&flight.destination.state, &self.state);
        let country_match = is(&flight.origin.country, &self.country)
            || is(&flight.destination.country, &self.country);

        state_match && country_match
    }
}
