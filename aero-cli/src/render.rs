use aero_catalog::{Seat, SeatStatus};
use aero_core::{page_window, Page};
use aero_shared::{format_naira, Booking, Draft};
use std::io::{self, Write};

/// Bookings table for one page, with a count and pagination bar.
pub fn bookings_page(page: &Page<Booking>, links: usize, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Bookings ({})", page.total_items)?;
    writeln!(
        out,
        "{:<14} {:<20} {:<26} {:<10} {:<10} {:<8} {:>3} {:>10}",
        "ID", "Passenger", "Route", "Depart", "Return", "Class", "Pax", "Price"
    )?;

    if page.items.is_empty() {
        writeln!(out, "No bookings yet")?;
    }

    for b in &page.items {
        let route = format!("{} -> {}", b.origin, b.destination);
        let back = b.return_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<14} {:<20} {:<26} {:<10} {:<10} {:<8} {:>3} {:>10}",
            b.id.to_string(),
            clip(&b.name, 20),
            clip(&route, 26),
            b.depart.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            back,
            b.travel_class.as_str(),
            b.passengers,
            format_naira(b.price)
        )?;
    }

    writeln!(out, "{}", pagination_bar(page, links))
}

/// `Prev 1 [2] 3 Next`, with unavailable ends shown in parentheses.
pub fn pagination_bar<T>(page: &Page<T>, links: usize) -> String {
    let mut parts = Vec::new();
    parts.push(if page.has_prev() { "Prev".to_string() } else { "(Prev)".to_string() });
    for n in page_window(page.page, page.total_pages, links) {
        if n == page.page {
            parts.push(format!("[{}]", n));
        } else {
            parts.push(n.to_string());
        }
    }
    parts.push(if page.has_next() { "Next".to_string() } else { "(Next)".to_string() });
    parts.join(" ")
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
        clipped.push('~');
        clipped
    }
}

/// Seat grid. `[1A]` free, `<1A>` selected, ` -- ` taken.
pub fn seat_grid(rows: &[Vec<(&Seat, SeatStatus)>], out: &mut dyn Write) -> io::Result<()> {
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|(seat, status)| match status {
                SeatStatus::Available => format!("[{:>3}]", seat.label.as_str()),
                SeatStatus::Selected => format!("<{:>3}>", seat.label.as_str()),
                SeatStatus::Occupied => "  -- ".to_string(),
            })
            .collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    writeln!(out, "Legend: [free] <selected> -- taken")
}

pub fn draft(draft: &Draft, out: &mut dyn Write) -> io::Result<()> {
    let form = &draft.form;
    let or_dash = |v: &str| if v.is_empty() { "-".to_string() } else { v.to_string() };

    writeln!(out, "Name:       {}", or_dash(&form.name))?;
    writeln!(out, "Email:      {}", or_dash(&form.email))?;
    writeln!(out, "Route:      {} -> {}", or_dash(&form.origin), or_dash(&form.destination))?;
    writeln!(out, "Departure:  {}", or_dash(&form.depart))?;
    writeln!(out, "Return:     {}", or_dash(&form.return_date))?;
    writeln!(out, "Class:      {}", or_dash(&form.travel_class))?;
    writeln!(out, "Passengers: {}", form.passengers)?;
    let seats: Vec<&str> = draft.seats.iter().map(|s| s.as_str()).collect();
    writeln!(out, "Seats:      {}", if seats.is_empty() { "None".to_string() } else { seats.join(", ") })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_catalog::{SeatMap, SeatSelection};
    use aero_core::paginate;
    use std::collections::HashSet;

    #[test]
    fn test_pagination_bar() {
        let items: Vec<u32> = (1..=13).collect();
        assert_eq!(pagination_bar(&paginate(&items, 6, 1), 5), "(Prev) [1] 2 3 Next");
        assert_eq!(pagination_bar(&paginate(&items, 6, 2), 5), "Prev 1 [2] 3 Next");
        assert_eq!(pagination_bar(&paginate::<u32>(&[], 6, 1), 5), "(Prev) [1] (Next)");
    }

    #[test]
    fn test_seat_grid() {
        let occupied: HashSet<_> = ["1B".parse().unwrap()].into_iter().collect();
        let map = SeatMap::generate(1, 3, &occupied).unwrap();
        let selection = SeatSelection::from_labels(["1C".parse().unwrap()]);

        let mut out = Vec::new();
        seat_grid(&map.render(&selection), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[ 1A]   --  < 1C>\n"));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("Lagos", 10), "Lagos");
        assert_eq!(clip("Johannesburg", 6), "Johan~");
    }
}
