//! SQL issued by the gateway. Each string is prepared once per pooled
//! connection by sqlx's statement cache and reused afterwards.

pub const GET_FLIGHT: &str = r#"
    SELECT f.id::INT8 AS id, f.arrival_time::TEXT AS arrival, f.departure_time::TEXT AS departure,
        a.icao AS origin_icao, a.iata AS origin_iata, a.name AS origin_name,
        a.state AS origin_state, a.country AS origin_country,
        b.icao AS destination_icao, b.iata AS destination_iata, b.name AS destination_name,
        b.state AS destination_state, b.country AS destination_country
    FROM flights f
    INNER JOIN airports a ON f.origin_airport_id = a.icao
    INNER JOIN airports b ON f.destination_airport_id = b.icao
    WHERE f.id = $1
"#;

pub const GET_AVAILABLE_FLIGHTS: &str = r#"
    SELECT flight_id::INT8 AS flight_id, arrival_time::TEXT AS arrival, departure_time::TEXT AS departure,
        departure_state, departure_country, arrival_state, arrival_country
    FROM available_flights
    ORDER BY flight_id
    LIMIT $1 OFFSET $2
"#;

pub const GET_AVAILABLE_FLIGHTS_BY_LOCATION: &str = r#"
    SELECT flight_id::INT8 AS flight_id, arrival_time::TEXT AS arrival, departure_time::TEXT AS departure,
        departure_state, departure_country, arrival_state, arrival_country
    FROM available_flights
    WHERE (departure_state = $1 OR arrival_state = $1)
        AND (departure_country = $2 OR arrival_country = $2)
    ORDER BY flight_id
    LIMIT $3 OFFSET $4
"#;

pub const GET_AVAILABLE_SEATS: &str = r#"
    SELECT seat_number, class, price::NUMERIC AS price
    FROM available_seats
    WHERE flight_id = $1
    ORDER BY seat_number
"#;

pub const CREATE_ORDER: &str = r#"
    SELECT o_order_id::INT8 AS order_id, o_price::NUMERIC AS price
    FROM create_order($1, $2, $3, $4::INT4, $5)
"#;
