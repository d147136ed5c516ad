//! Demonstration flight data
//!
//! Not a flight search. A small route table (exact, directional match on
//! the validated origin and destination) with a generic fallback produces
//! one morning and one evening option per trip.

use crate::domain::FlightOption;

struct Route {
    duration: &'static str,
    airlines: [&'static str; 2],
    base_price: u32,
}

const ROUTES: &[(&str, &str, Route)] = &[
    (
        "Bengaluru",
        "Delhi",
        Route {
            duration: "2h 45m",
            airlines: ["Air India", "IndiGo"],
            base_price: 350,
        },
    ),
    (
        "Delhi",
        "Mumbai",
        Route {
            duration: "2h 15m",
            airlines: ["IndiGo", "Vistara"],
            base_price: 300,
        },
    ),
];

const FALLBACK_ROUTE: Route = Route {
    duration: "3h 00m",
    airlines: ["Major Airline", "Budget Carrier"],
    base_price: 400,
};

/// Evening departures are this many dollars cheaper
const EVENING_DISCOUNT: u32 = 50;

fn route(origin: &str, destination: &str) -> &'static Route {
    ROUTES
        .iter()
        .find(|(from, to, _)| *from == origin && *to == destination)
        .map(|(_, _, route)| route)
        .unwrap_or(&FALLBACK_ROUTE)
}

fn flight_number(airline: &str, suffix: &str) -> String {
    let prefix: String = airline.chars().take(2).collect();
    format!("{}{}", prefix, suffix)
}

/// Two demo options for the route: morning at base price, evening discounted
pub fn synthesize(origin: &str, destination: &str) -> Vec<FlightOption> {
    let route = route(origin, destination);
    let [morning_airline, evening_airline] = route.airlines;

    vec![
        FlightOption {
            airline: morning_airline.to_string(),
            flight_number: flight_number(morning_airline, "123"),
            departure: "08:30 AM".to_string(),
            arrival: "11:15 AM".to_string(),
            duration: route.duration.to_string(),
            price: format!("${}", route.base_price),
            stops: "Non-stop".to_string(),
            aircraft: "Airbus A320".to_string(),
        },
        FlightOption {
            airline: evening_airline.to_string(),
            flight_number: flight_number(evening_airline, "456"),
            departure: "16:45 PM".to_string(),
            arrival: "19:30 PM".to_string(),
            duration: route.duration.to_string(),
            price: format!("${}", route.base_price.saturating_sub(EVENING_DISCOUNT)),
            stops: "Non-stop".to_string(),
            aircraft: "Boeing 737".to_string(),
        },
    ]
}
