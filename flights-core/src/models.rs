use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Airport {
    /// Reduced projection used by list views.
    pub fn located(state: Option<String>, country: Option<String>) -> Self {
        Self {
            state,
            country,
            ..Self::default()
        }
    }
}

/// Arrival and departure are kept as the text the database renders;
/// no timezone handling happens in this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub origin: Airport,
    #[serde(default)]
    pub destination: Airport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
}

impl Flight {
    /// Reference to a flight by id only, as embedded in a seat selection.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<Flight>,
    #[serde(default)]
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<Seat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
}

/// The fields of an [`Order`] that the booking procedure consumes, after
/// every required field has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub flight_id: i64,
    pub seat_number: String,
}

impl Order {
    /// Checks the fields required to book a seat. Runs before any storage call.
    pub fn validate(&self) -> CoreResult<OrderRequest> {
        let invalid = || CoreError::Validation("invalid order data".to_string());

        let email = required(&self.email).ok_or_else(invalid)?;
        let first_name = required(&self.first_name).ok_or_else(invalid)?;
        let last_name = required(&self.last_name).ok_or_else(invalid)?;

        let seat = self.seat.as_ref().ok_or_else(invalid)?;
        let flight = seat.flight.as_ref().ok_or_else(invalid)?;
        if flight.id < 1 || seat.number.trim().is_empty() {
            return Err(invalid());
        }

        Ok(OrderRequest {
            email,
            first_name,
            last_name,
            flight_id: flight.id,
            seat_number: seat.number.clone(),
        })
    }

    /// Fills in what the backend assigned on a successful booking.
    pub fn confirmed(mut self, id: i64, price: Decimal) -> Self {
        self.id = Some(id);
        if let Some(seat) = self.seat.as_mut() {
            seat.price = Some(price);
        }
        self
    }
}

fn required(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        serde_json::from_str(
            r#"{"email":"a@b.com","first_name":"A","last_name":"B","seat":{"flight":{"id":1},"number":"12A"}}"#,
        )
        .expect("Failed to deserialize")
    }

    #[test]
    fn test_order_deserialization_from_booking_body() {
        let order = sample_order();
        let seat = order.seat.as_ref().unwrap();
        assert_eq!(seat.flight.as_ref().unwrap().id, 1);
        assert_eq!(seat.number, "12A");
        assert!(seat.price.is_none());
        assert!(order.id.is_none());
    }

    #[test]
    fn test_validate_accepts_complete_order() {
        let request = sample_order().validate().unwrap();
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.flight_id, 1);
        assert_eq!(request.seat_number, "12A");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut missing_last = sample_order();
        missing_last.last_name = None;
        assert!(matches!(missing_last.validate(), Err(CoreError::Validation(_))));

        let mut blank_email = sample_order();
        blank_email.email = Some("  ".to_string());
        assert!(blank_email.validate().is_err());

        let mut no_seat = sample_order();
        no_seat.seat = None;
        assert!(no_seat.validate().is_err());

        let mut no_flight = sample_order();
        no_flight.seat.as_mut().unwrap().flight = None;
        assert!(no_flight.validate().is_err());

        let mut zero_flight = sample_order();
        zero_flight.seat.as_mut().unwrap().flight = Some(Flight::with_id(0));
        assert!(zero_flight.validate().is_err());

        let mut no_number = sample_order();
        no_number.seat.as_mut().unwrap().number = String::new();
        assert!(no_number.validate().is_err());
    }

    #[test]
    fn test_confirmed_overwrites_client_price() {
        let mut order = sample_order();
        order.seat.as_mut().unwrap().price = Some(Decimal::new(1, 0));

        let order = order.confirmed(42, Decimal::new(19999, 2));
        assert_eq!(order.id, Some(42));
        assert_eq!(order.seat.unwrap().price, Some(Decimal::new(19999, 2)));
    }

    #[test]
    fn test_list_flight_serializes_partial_airports() {
        let flight = Flight {
            id: 7,
            origin: Airport::located(Some("Jalisco".into()), Some("Mexico".into())),
            destination: Airport::located(Some("Texas".into()), Some("USA".into())),
            arrival: Some("2024-05-01 10:00:00".into()),
            departure: Some("2024-05-01 08:00:00".into()),
        };

        let value = serde_json::to_value(&flight).unwrap();
        assert_eq!(value["origin"], serde_json::json!({"state": "Jalisco", "country": "Mexico"}));
        assert!(value["origin"].get("icao").is_none());
        assert_eq!(value["departure"], "2024-05-01 08:00:00");
    }
}
