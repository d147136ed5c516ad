//! Terminal rendering of plans and health reports

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

use crate::domain::{HotelListing, TripResponse};

/// Render a plan as four sections: Overview, Itinerary, Practical Info, Travel Details
pub fn render_plan(plan: &TripResponse) -> String {
    let mut out = String::new();

    section(&mut out, "Overview");
    paragraph(&mut out, &plan.trip_plan.overview);

    section(&mut out, "Itinerary");
    let days = itinerary_days(&plan.trip_plan.itinerary);
    if days.is_empty() {
        paragraph(&mut out, "");
    }
    for day in days {
        let (title, body) = day.split_once('\n').unwrap_or((day.as_str(), ""));
        let _ = writeln!(out, "  {}", title.trim().yellow().bold());
        for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let _ = writeln!(out, "    {}", line);
        }
    }

    section(&mut out, "Practical Info");
    paragraph(&mut out, &plan.trip_plan.practical_info);

    section(&mut out, "Travel Details");
    let coords = plan.coordinates();
    let _ = writeln!(
        out,
        "  {} {:.4}, {:.4}",
        "Destination:".bold(),
        coords.latitude,
        coords.longitude
    );

    let _ = writeln!(out, "  {}", "Flights (demo data)".bold());
    for flight in &plan.flights_info.available_flights {
        let _ = writeln!(
            out,
            "    {} {}  {} -> {}  {}  {}  {}",
            flight.airline.cyan(),
            flight.flight_number,
            flight.departure,
            flight.arrival,
            flight.duration,
            flight.stops.dimmed(),
            flight.price.green()
        );
    }

    let _ = writeln!(out, "  {}", "Hotels".bold());
    if plan.accommodations.hotels.is_empty() {
        let _ = writeln!(out, "    {}", "No hotels found".dimmed());
    }
    for hotel in &plan.accommodations.hotels {
        hotel_line(&mut out, hotel);
    }

    let _ = writeln!(out, "  {} {}", "Photos:".bold(), plan.photos.len());
    for photo in &plan.photos {
        let _ = writeln!(out, "    {}", photo.dimmed());
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.bright_cyan().bold());
}

fn paragraph(out: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        let _ = writeln!(out, "  {}", "(not provided)".dimmed());
        return;
    }
    for line in text.lines() {
        let _ = writeln!(out, "  {}", line.trim_end());
    }
}

fn hotel_line(out: &mut String, hotel: &HotelListing) {
    let rating = hotel
        .rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string());
    let _ = writeln!(
        out,
        "    {} {} {}",
        hotel.name.cyan(),
        format!("({})", rating).yellow(),
        hotel.price_level
    );
    let _ = writeln!(out, "      {}", hotel.address);
    let _ = writeln!(out, "      {}", hotel.phone.dimmed());
    if !hotel.website.is_empty() {
        let _ = writeln!(out, "      {}", hotel.website.dimmed());
    }
}

/// Split an itinerary into per-day blocks, each starting with "Day "
///
/// Text before the first "Day " is kept as its own block.
pub fn itinerary_days(itinerary: &str) -> Vec<String> {
    let mut days = Vec::new();
    for (idx, chunk) in itinerary.split("Day ").enumerate() {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        if idx == 0 {
            days.push(chunk.to_string());
        } else {
            days.push(format!("Day {}", chunk));
        }
    }
    days
}

/// Render a `/health` report (or the `detail` of a failed one)
pub fn render_health(report: &Value) -> String {
    let mut out = String::new();
    let report = report.get("detail").unwrap_or(report);

    let status = report.get("status").and_then(Value::as_str).unwrap_or("unknown");
    let colored_status = match status {
        "healthy" => status.green().bold(),
        "degraded" => status.yellow().bold(),
        _ => status.red().bold(),
    };
    let _ = writeln!(out, "{} {}", "Status:".bold(), colored_status);

    if let Some(services) = report.get("services").and_then(Value::as_object) {
        for (name, up) in services {
            let mark = if up.as_bool().unwrap_or(false) {
                "✓".green()
            } else {
                "✗".red()
            };
            let _ = writeln!(out, "  {} {}", mark, name);
        }
    }
    if let Some(api) = report.get("api_status").and_then(Value::as_str) {
        let _ = writeln!(out, "{} {}", "Maps API:".bold(), api);
    }
    if let Some(error) = report.get("error").and_then(Value::as_str) {
        let _ = writeln!(out, "{} {}", "Error:".bold(), error.red());
    }
    if let Some(ts) = report.get("timestamp").and_then(Value::as_str) {
        let _ = writeln!(out, "{} {}", "Checked:".bold(), ts.dimmed());
    }
    out
}
