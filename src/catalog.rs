//! The fixed catalog of analytics queries that make up one report, plus the
//! static internal-name → display-title table for the produced sheets.

/// One catalog entry: a stable internal name and the query text resolved
/// against the external relational data source.
#[derive(Debug, Clone, Copy)]
pub struct NamedQuery {
    pub name: &'static str,
    pub sql: &'static str,
}

/// The report's queries, in emission order. Sheet order in the exported
/// workbook follows this order exactly.
pub const REPORT_QUERIES: &[NamedQuery] = &[
    NamedQuery {
        name: "airline_performance",
        sql: r#"
            SELECT
                al.airline_name AS "Airline",
                al.airline_country AS "Country",
                COUNT(f.flight_id) AS "Total Flights",
                COUNT(CASE WHEN f.status = 'On Time' THEN 1 END) AS "On-Time Flights",
                ROUND(COUNT(CASE WHEN f.status = 'On Time' THEN 1 END) * 100.0
                      / COUNT(f.flight_id), 2) AS "Punctuality %",
                COUNT(CASE WHEN f.status = 'Delayed' THEN 1 END) AS "Delayed Flights",
                COUNT(CASE WHEN f.status = 'Cancelled' THEN 1 END) AS "Cancelled Flights",
                ROUND(AVG(EXTRACT(EPOCH FROM (f.scheduled_arrival - f.scheduled_departure))
                      / 3600), 2) AS "Avg Duration (h)"
            FROM flights f
            JOIN airline al ON f.airline_id = al.airline_id
            GROUP BY al.airline_id, al.airline_name, al.airline_country
            HAVING COUNT(f.flight_id) > 0
            ORDER BY "Total Flights" DESC;
        "#,
    },
    NamedQuery {
        name: "airport_traffic",
        sql: r#"
            SELECT
                a.airport_name AS "Airport",
                a.city AS "City",
                a.country AS "Country",
                COUNT(DISTINCT CASE WHEN f.departure_airport_id = a.airport_id
                      THEN f.flight_id END) AS "Departures",
                COUNT(DISTINCT CASE WHEN f.arrival_airport_id = a.airport_id
                      THEN f.flight_id END) AS "Arrivals",
                COUNT(DISTINCT f.flight_id) AS "Total Flights",
                COUNT(DISTINCT al.airline_id) AS "Airlines Served"
            FROM airport a
            LEFT JOIN flights f ON a.airport_id = f.departure_airport_id
                OR a.airport_id = f.arrival_airport_id
            LEFT JOIN airline al ON f.airline_id = al.airline_id
            GROUP BY a.airport_id, a.airport_name, a.city, a.country
            HAVING COUNT(DISTINCT f.flight_id) > 0
            ORDER BY "Total Flights" DESC;
        "#,
    },
    NamedQuery {
        name: "passenger_activity",
        sql: r#"
            SELECT
                p.country_of_residence AS "Country of Residence",
                COUNT(DISTINCT p.passenger_id) AS "Passengers",
                COUNT(b.booking_id) AS "Total Bookings",
                COUNT(DISTINCT bf.flight_id) AS "Unique Flights",
                ROUND(COUNT(b.booking_id) * 1.0
                      / COUNT(DISTINCT p.passenger_id), 2) AS "Avg Bookings per Passenger",
                ROUND(COUNT(DISTINCT bf.flight_id) * 1.0
                      / COUNT(DISTINCT p.passenger_id), 2) AS "Avg Flights per Passenger"
            FROM passengers p
            JOIN booking b ON p.passenger_id = b.passenger_id
            JOIN booking_flight bf ON b.booking_id = bf.booking_id
            GROUP BY p.country_of_residence
            HAVING COUNT(DISTINCT p.passenger_id) > 1
            ORDER BY "Total Bookings" DESC;
        "#,
    },
    NamedQuery {
        name: "monthly_statistics",
        sql: r#"
            SELECT
                TO_CHAR(b.created_at, 'YYYY-MM') AS "Month",
                TO_CHAR(b.created_at, 'Month YYYY') AS "Period",
                COUNT(DISTINCT b.booking_id) AS "Bookings",
                COUNT(DISTINCT p.passenger_id) AS "Unique Passengers",
                COUNT(DISTINCT bf.flight_id) AS "Unique Flights",
                ROUND(COUNT(DISTINCT b.booking_id) * 1.0
                      / COUNT(DISTINCT p.passenger_id), 2) AS "Passenger Activity"
            FROM booking b
            JOIN passengers p ON b.passenger_id = p.passenger_id
            JOIN booking_flight bf ON b.booking_id = bf.booking_id
            WHERE b.created_at IS NOT NULL
            GROUP BY "Month", "Period"
            ORDER BY "Month";
        "#,
    },
    NamedQuery {
        name: "route_popularity",
        sql: r#"
            SELECT
                dep.airport_name AS "Departure Airport",
                dep.city AS "Departure City",
                arr.airport_name AS "Arrival Airport",
                arr.city AS "Arrival City",
                COUNT(f.flight_id) AS "Flights",
                COUNT(DISTINCT al.airline_id) AS "Airlines",
                ROUND(AVG(EXTRACT(EPOCH FROM (f.scheduled_arrival - f.scheduled_departure))
                      / 3600), 2) AS "Avg Travel Time (h)"
            FROM flights f
            JOIN airport dep ON f.departure_airport_id = dep.airport_id
            JOIN airport arr ON f.arrival_airport_id = arr.airport_id
            JOIN airline al ON f.airline_id = al.airline_id
            GROUP BY dep.airport_name, dep.city, arr.airport_name, arr.city
            HAVING COUNT(f.flight_id) > 1
            ORDER BY "Flights" DESC
            LIMIT 50;
        "#,
    },
];

/// Resolves an internal sheet name to its human-readable title. Names without
/// a mapping pass through unchanged.
pub fn display_title(name: &str) -> &str {
    match name {
        "airline_performance" => "Airline Performance",
        "airport_traffic" => "Airport Traffic",
        "passenger_activity" => "Passenger Activity",
        "monthly_statistics" => "Monthly Statistics",
        "route_popularity" => "Route Popularity",
        other => other,
    }
}
