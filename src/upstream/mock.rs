//! Mock data tables
//!
//! Reference data served when `USE_MOCK_DATA` is on, shaped like the live
//! API payloads so the dashboard renders identically in both modes.

use serde_json::{json, Value};

// (constructorId, name, nationality)
const CONSTRUCTORS: &[(&str, &str, &str)] = &[
    ("mclaren", "McLaren", "British"),
    ("red_bull", "Red Bull", "Austrian"),
    ("mercedes", "Mercedes", "German"),
    ("ferrari", "Ferrari", "Italian"),
    ("williams", "Williams", "British"),
    ("racing_bulls", "Racing Bulls", "Italian"),
    ("sauber", "Sauber", "Swiss"),
    ("aston_martin", "Aston Martin", "British"),
    ("haas", "Haas", "American"),
    ("alpine", "Alpine", "French"),
];

// (driverId, number, code, givenName, familyName, dateOfBirth, nationality, constructorId)
const DRIVERS: &[(&str, &str, &str, &str, &str, &str, &str, &str)] = &[
    ("piastri", "81", "PIA", "Oscar", "Piastri", "2001-04-06", "Australian", "mclaren"),
    ("norris", "4", "NOR", "Lando", "Norris", "1999-11-13", "British", "mclaren"),
    ("verstappen", "1", "VER", "Max", "Verstappen", "1997-09-30", "Dutch", "red_bull"),
    ("tsunoda", "22", "TSU", "Yuki", "Tsunoda", "2000-05-11", "Japanese", "racing_bulls"),
    ("russell", "63", "RUS", "George", "Russell", "1998-02-15", "British", "mercedes"),
    ("antonelli", "7", "ANT", "Kimi", "Antonelli", "2006-08-25", "Italian", "mercedes"),
    ("leclerc", "16", "LEC", "Charles", "Leclerc", "1997-10-16", "Monegasque", "ferrari"),
    ("hamilton", "44", "HAM", "Lewis", "Hamilton", "1985-01-07", "British", "ferrari"),
    ("albon", "23", "ALB", "Alex", "Albon", "1996-03-23", "Thai", "williams"),
    ("sainz_jr", "55", "SAI", "Carlos", "Sainz Jr.", "1994-09-01", "Spanish", "williams"),
    ("hadjar", "20", "HAD", "Isack", "Hadjar", "2004-09-28", "French", "racing_bulls"),
    ("lawson", "30", "LAW", "Liam", "Lawson", "2002-02-11", "New Zealander", "racing_bulls"),
    ("hulkenberg", "27", "HUL", "Nico", "Hülkenberg", "1987-08-19", "German", "sauber"),
    ("bortoleto", "50", "BOR", "Gabriel", "Bortoleto", "2004-10-14", "Brazilian", "sauber"),
    ("alonso", "14", "ALO", "Fernando", "Alonso", "1981-07-29", "Spanish", "aston_martin"),
    ("stroll", "18", "STR", "Lance", "Stroll", "1998-10-29", "Canadian", "aston_martin"),
    ("bearman", "87", "BEA", "Oliver", "Bearman", "2005-05-08", "British", "haas"),
    ("ocon", "31", "OCO", "Esteban", "Ocon", "1996-09-17", "French", "haas"),
    ("gasly", "10", "GAS", "Pierre", "Gasly", "1996-02-07", "French", "alpine"),
    ("colapinto", "43", "COL", "Franco", "Colapinto", "2003-05-27", "Argentinian", "alpine"),
];

// (driverId, points, wins, podiums), in championship order
const DRIVER_TABLE: &[(&str, u32, u32, u32)] = &[
    ("piastri", 336, 7, 14),
    ("norris", 314, 5, 14),
    ("verstappen", 273, 4, 9),
    ("russell", 237, 2, 8),
    ("leclerc", 173, 0, 5),
    ("hamilton", 125, 0, 2),
    ("antonelli", 88, 0, 1),
    ("albon", 70, 0, 0),
    ("hadjar", 39, 0, 1),
    ("hulkenberg", 37, 0, 1),
    ("alonso", 36, 0, 0),
    ("sainz_jr", 32, 0, 1),
    ("stroll", 32, 0, 0),
    ("lawson", 30, 0, 0),
    ("ocon", 28, 0, 0),
    ("gasly", 20, 0, 0),
    ("tsunoda", 20, 0, 0),
    ("bortoleto", 18, 0, 0),
    ("bearman", 18, 0, 0),
    ("colapinto", 0, 0, 0),
];

// Career totals: (driverId, wins, podiums, races, poles)
const CAREER: &[(&str, u32, u32, u32, u32)] = &[
    ("verstappen", 67, 121, 227, 46),
    ("hamilton", 105, 202, 374, 104),
    ("leclerc", 8, 48, 165, 27),
    ("norris", 9, 40, 146, 13),
    ("piastri", 9, 24, 64, 5),
    ("russell", 5, 23, 146, 7),
    ("alonso", 32, 106, 419, 22),
    ("sainz_jr", 4, 28, 223, 6),
    ("tsunoda", 0, 0, 88, 0),
    ("albon", 0, 2, 122, 0),
    ("gasly", 1, 5, 171, 0),
    ("ocon", 1, 4, 173, 0),
    ("stroll", 0, 3, 183, 1),
    ("hulkenberg", 0, 1, 244, 1),
    ("antonelli", 0, 1, 18, 0),
    ("bearman", 0, 0, 5, 0),
    ("lawson", 0, 0, 11, 0),
    ("colapinto", 0, 0, 9, 0),
    ("hadjar", 0, 1, 17, 0),
    ("bortoleto", 0, 0, 0, 0),
];

// (round, raceName, circuitId, circuitName, lat, long, locality, country, date, time)
type ScheduleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const SCHEDULE: &[ScheduleRow] = &[
    ("1", "Australian Grand Prix", "albert_park", "Albert Park Circuit", "-37.8497", "144.968", "Melbourne", "Australia", "2025-03-16", "05:00:00Z"),
    ("2", "Chinese Grand Prix", "shanghai", "Shanghai International Circuit", "31.3389", "121.220", "Shanghai", "China", "2025-03-23", "07:00:00Z"),
    ("3", "Japanese Grand Prix", "suzuka", "Suzuka Circuit", "34.8431", "136.541", "Suzuka", "Japan", "2025-04-06", "06:00:00Z"),
    ("4", "Bahrain Grand Prix", "bahrain", "Bahrain International Circuit", "26.0325", "50.5106", "Sakhir", "Bahrain", "2025-04-13", "15:00:00Z"),
    ("8", "Monaco Grand Prix", "monaco", "Circuit de Monaco", "43.7347", "7.42056", "Monte-Carlo", "Monaco", "2025-05-25", "13:00:00Z"),
    ("12", "British Grand Prix", "silverstone", "Silverstone Circuit", "52.0786", "-1.01694", "Silverstone", "UK", "2025-07-06", "14:00:00Z"),
    ("16", "Italian Grand Prix", "monza", "Autodromo Nazionale di Monza", "45.6156", "9.28111", "Monza", "Italy", "2025-09-07", "13:00:00Z"),
    ("24", "Abu Dhabi Grand Prix", "yas_marina", "Yas Marina Circuit", "24.4672", "54.6031", "Abu Dhabi", "UAE", "2025-12-07", "13:00:00Z"),
];

const SEASON: &str = "2025";

// (driverId, position, points, grid, millis, time) for the last race podium
const FINALE_LAPS: &str = "78";

const LAST_RACE_PODIUM: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("piastri", "1", "25", "2", "6289000", "1:44:49.000"),
    ("norris", "2", "18", "3", "6290500", "+1.500"),
    ("verstappen", "3", "15", "1", "6292200", "+3.200"),
];

fn constructor(id: &str) -> Value {
    CONSTRUCTORS
        .iter()
        .find(|(cid, _, _)| *cid == id)
        .map(|(cid, name, nationality)| {
            json!({ "constructorId": cid, "name": name, "nationality": nationality })
        })
        .unwrap_or(Value::Null)
}

type DriverRow = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

fn driver_row(id: &str) -> Option<&'static DriverRow> {
    DRIVERS.iter().find(|row| row.0 == id)
}

/// Driver object as it appears inside standings and results.
fn driver_ref(row: &DriverRow) -> Value {
    let (id, number, code, given, family, dob, nationality, _) = *row;
    json!({
        "driverId": id,
        "permanentNumber": number,
        "code": code,
        "givenName": given,
        "familyName": family,
        "dateOfBirth": dob,
        "nationality": nationality,
    })
}

fn circuit(row: &ScheduleRow) -> Value {
    let (_, _, id, name, lat, long, locality, country, _, _) = *row;
    json!({
        "circuitId": id,
        "circuitName": name,
        "Location": { "lat": lat, "long": long, "locality": locality, "country": country },
    })
}

/// Current season drivers.
pub fn drivers() -> Value {
    DRIVERS
        .iter()
        .map(|row| {
            let mut driver = driver_ref(row);
            driver["constructorId"] = json!(row.7);
            driver
        })
        .collect()
}

/// Current season constructors.
pub fn constructors() -> Value {
    CONSTRUCTORS.iter().map(|(id, _, _)| constructor(id)).collect()
}

/// Driver championship standings.
pub fn driver_standings() -> Value {
    DRIVER_TABLE
        .iter()
        .enumerate()
        .filter_map(|(i, (id, points, wins, podiums))| {
            let row = driver_row(id)?;
            let position = (i + 1).to_string();
            Some(json!({
                "position": position,
                "positionText": position,
                "points": points.to_string(),
                "wins": wins.to_string(),
                "podiums": podiums.to_string(),
                "Driver": driver_ref(row),
                "Constructors": [constructor(row.7)],
            }))
        })
        .collect()
}

/// Constructor standings, summed from the driver table.
pub fn constructor_standings() -> Value {
    let mut order: Vec<(&str, u32, u32)> = Vec::new();

    for (id, points, wins, _) in DRIVER_TABLE {
        let Some(row) = driver_row(id) else { continue };
        match order.iter_mut().find(|(cid, _, _)| *cid == row.7) {
            Some(team) => {
                team.1 += points;
                team.2 += wins;
            }
            None => order.push((row.7, *points, *wins)),
        }
    }
    order.sort_by(|a, b| (b.1, b.2).cmp(&(a.1, a.2)));

    order
        .iter()
        .enumerate()
        .map(|(i, (cid, points, wins))| {
            let position = (i + 1).to_string();
            json!({
                "position": position,
                "positionText": position,
                "points": points.to_string(),
                "wins": wins.to_string(),
                "Constructor": constructor(cid),
            })
        })
        .collect()
}

/// Current season calendar.
pub fn schedule() -> Value {
    SCHEDULE
        .iter()
        .map(|row| {
            json!({
                "season": SEASON,
                "round": row.0,
                "raceName": row.1,
                "Circuit": circuit(row),
                "date": row.8,
                "time": row.9,
            })
        })
        .collect()
}

/// Results of the season finale.
pub fn last_race() -> Value {
    let Some(finale) = SCHEDULE.last() else {
        return Value::Null;
    };

    let results: Vec<Value> = LAST_RACE_PODIUM
        .iter()
        .filter_map(|(id, position, points, grid, millis, time)| {
            let row = driver_row(id)?;
            Some(json!({
                "number": row.1,
                "position": position,
                "positionText": position,
                "points": points,
                "Driver": driver_ref(row),
                "Constructor": constructor(row.7),
                "grid": grid,
                "laps": FINALE_LAPS,
                "status": "Finished",
                "Time": { "millis": millis, "time": time },
            }))
        })
        .collect();

    json!({
        "season": SEASON,
        "round": finale.0,
        "raceName": finale.1,
        "Circuit": circuit(finale),
        "date": finale.8,
        "time": finale.9,
        "Results": results,
    })
}

/// Results of a given race; only the finale has mock results.
pub fn race_result(season: &str, round: &str) -> Option<Value> {
    let race = last_race();
    (race["season"] == season && race["round"] == round).then_some(race)
}

/// Career statistics for every current driver.
pub fn all_driver_stats() -> Value {
    CAREER
        .iter()
        .map(|(id, wins, podiums, races, poles)| {
            let name = driver_row(id)
                .map(|row| format!("{} {}", row.3, row.4))
                .unwrap_or_default();
            json!({
                "driver_id": id,
                "name": name,
                "total_wins": wins,
                "total_podiums": podiums,
                "total_races": races,
                "total_poles": poles,
            })
        })
        .collect()
}

/// Career statistics for one driver, zeroed when unknown.
pub fn driver_stats(driver_id: &str) -> Value {
    let (wins, podiums, races) = CAREER
        .iter()
        .find(|row| row.0 == driver_id)
        .map_or((0, 0, 0), |(_, wins, podiums, races, _)| (*wins, *podiums, *races));

    json!({
        "driver_id": driver_id,
        "total_wins": wins,
        "total_podiums": podiums,
        "total_races": races,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(drivers().as_array().unwrap().len(), 20);
        assert_eq!(constructors().as_array().unwrap().len(), 10);
        assert_eq!(driver_standings().as_array().unwrap().len(), 20);
        assert_eq!(all_driver_stats().as_array().unwrap().len(), 20);
    }

    #[test]
    fn test_every_driver_has_a_known_constructor() {
        for driver in drivers().as_array().unwrap() {
            let cid = driver["constructorId"].as_str().unwrap();
            assert!(!constructor(cid).is_null(), "unknown constructor {cid}");
        }
    }

    #[test]
    fn test_constructor_standings_sum_driver_points() {
        let standings = constructor_standings();
        let first = &standings[0];
        assert_eq!(first["position"], "1");
        assert_eq!(first["Constructor"]["constructorId"], "mclaren");
        assert_eq!(first["points"], "650");
        assert_eq!(first["wins"], "12");
        assert_eq!(standings.as_array().unwrap().len(), 10);
    }

    #[test]
    fn test_race_result_only_for_finale() {
        assert!(race_result("2025", "24").is_some());
        assert!(race_result("2025", "1").is_none());
        assert!(race_result("2024", "24").is_none());
    }

    #[test]
    fn test_last_race_podium() {
        let race = last_race();
        assert_eq!(race["raceName"], "Abu Dhabi Grand Prix");
        assert_eq!(race["Results"][0]["Driver"]["driverId"], "piastri");
        assert_eq!(race["Results"].as_array().unwrap().len(), 3);
        assert_eq!(race["Results"][2]["laps"], "78");
        assert_eq!(race["Results"][2]["grid"], "1");
    }

    #[test]
    fn test_driver_stats_known_and_unknown() {
        assert_eq!(driver_stats("hamilton")["total_wins"], 105);
        let unknown = driver_stats("senna");
        assert_eq!(unknown["driver_id"], "senna");
        assert_eq!(unknown["total_races"], 0);
    }
}
