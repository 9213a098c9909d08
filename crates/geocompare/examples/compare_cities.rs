//! Draw one square on a map of Paris, mirror it onto other cities, and print
//! what the same shape measures at each latitude.
//!
//! Usage:
//!   cargo run -p geocompare --example compare_cities
//!   cargo run -p geocompare --example compare_cities -- area

use geocompare::prelude::*;

const CITIES: [(&str, f64, f64); 4] = [
    ("London", 51.5074, -0.1278),
    ("Nairobi", -1.2921, 36.8219),
    ("Oslo", 59.9139, 10.7522),
    ("Reykjavik", 64.1466, -21.9426),
];

fn main() {
    let mode = match std::env::args().nth(1).as_deref() {
        Some("area") => Mode::Area,
        _ => Mode::Line,
    };
    let mut c = Controller::default();
    c.dispatch(Command::SetMode(mode));
    for (lat, lng) in [(48.850, 2.340), (48.850, 2.370), (48.870, 2.370), (48.870, 2.340)] {
        c.dispatch(Command::AddPoint {
            map: MapId::One,
            at: LatLng::new(lat, lng),
            index: None,
        });
    }
    let origin = c.frame();
    println!("Paris: {}", origin.map(MapId::One).label);
    for (name, lat, lng) in CITIES {
        c.dispatch(Command::MoveOverlay(LatLng::new(lat, lng)));
        let f = c.frame();
        println!(
            "{name:<10} {:>12}  ({})",
            f.map(MapId::Two).label,
            f.difference
        );
    }
    match c.share_link() {
        Ok(link) => println!("link: {link}"),
        Err(e) => eprintln!("cannot share: {e}"),
    }
}
