use aero_order::BookingSession;
use aero_shared::{BookingId, SeatLabel};
use aero_store::KeyValueStore;
use anyhow::{bail, Context};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{set_field, Controller, ListView};
use crate::debounce::Debouncer;
use crate::error::AppError;
use crate::notice::Notice;
use crate::render;

const HELP: &str = "\
Booking
  set <field> <value>   name, email, from, to, depart, return, class, passengers
  go <city>             pick a destination
  seats                 seat map with your selection
  pick <seat>...        select seats, e.g. `pick 2C 2D`
  unpick <seat>         drop a seat from the selection
  check                 seat availability only
  preview               validate and show the fare summary
  back                  return to editing after a preview
  confirm               store the previewed booking
  draft                 save the form as a draft
  discard               delete the saved draft
Bookings
  list                  current page
  find <text>           filter by name, route or email (empty clears)
  page <n> | next | prev
  view <id>
  edit <id> <field> <value>
  delete <id>
  clear yes             remove every booking
  export [path]
Other
  help | quit";

enum Flow {
    Continue,
    Search(String),
    Quit,
}

/// Interactive session over line-based input.
pub struct Shell<S> {
    controller: Controller<S>,
    session: BookingSession,
    view: ListView,
}

impl<S: KeyValueStore + Clone> Shell<S> {
    pub fn new(controller: Controller<S>) -> Self {
        Self {
            controller,
            session: BookingSession::new(),
            view: ListView { query: String::new(), page: 1 },
        }
    }

    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Read commands until `quit` or end of input. Search queries are
    /// debounced; a query still pending at the end is applied before return.
    pub async fn run<R>(&mut self, input: R, out: &mut dyn Write) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let delay = Duration::from_millis(self.controller.state().config.search.debounce_ms);
        let (debouncer, mut queries, _task) = Debouncer::<String>::spawn(delay);

        writeln!(out, "Aero Trust booking shell. Type `help` for commands.")?;
        if let Some(draft) = self.controller.state().drafts.load() {
            self.session = BookingSession::resume(Some(draft));
            writeln!(out, "{}", Notice::DraftLoaded)?;
        }

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break;
                    };
                    match self.dispatch(&line, out)? {
                        Flow::Continue => {}
                        Flow::Search(query) => {
                            debouncer.push(query);
                        }
                        Flow::Quit => break,
                    }
                }
                Some(query) = queries.recv() => {
                    self.apply_search(query, out)?;
                }
            }
        }

        drop(debouncer);
        while let Some(query) = queries.recv().await {
            self.apply_search(query, out)?;
        }
        Ok(())
    }

    fn apply_search(&mut self, query: String, out: &mut dyn Write) -> anyhow::Result<()> {
        self.view = ListView { query, page: 1 };
        self.show_list(out)
    }

    fn show_list(&mut self, out: &mut dyn Write) -> anyhow::Result<()> {
        self.view.page = self.controller.list(&self.view, out)?;
        Ok(())
    }

    /// Run one line. Command failures are reported and the shell carries on;
    /// only output errors end it.
    fn dispatch(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<Flow> {
        match self.execute(line, out) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                AppError::from(err).report(out)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn execute(&mut self, line: &str, out: &mut dyn Write) -> anyhow::Result<Flow> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => {}
            "help" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),

            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                set_field(self.session.form_mut(), field, value.trim())?;
                if field == "class" {
                    self.controller.seat_price(&self.session.form().travel_class, out)?;
                }
            }
            "go" => {
                if rest.is_empty() {
                    bail!("usage: go <city>");
                }
                let default_origin = self.controller.state().config.booking.default_origin.clone();
                self.session.pick_destination(rest, &default_origin);
                writeln!(out, "{}", Notice::DestinationSet(rest.to_string()))?;
            }
            "seats" => {
                let map = self.controller.state().seat_map()?;
                render::seat_grid(&map.render(self.session.selection()), out)?;
                self.controller.seat_price(&self.session.form().travel_class, out)?;
            }
            "pick" => {
                let labels = parse_seats(rest)?;
                let map = self.controller.state().seat_map()?;
                self.controller.select_seats(&mut self.session, &map, &labels, out)?;
                writeln!(out, "{}", Notice::SeatsSaved(self.session.selection().to_vec()))?;
                self.controller.seat_price(&self.session.form().travel_class, out)?;
            }
            "unpick" => {
                for label in parse_seats(rest)? {
                    self.session.remove_seat(&label);
                }
                writeln!(out, "{}", Notice::SeatsSaved(self.session.selection().to_vec()))?;
            }
            "check" => self.controller.seats(false, None, out)?,
            "preview" => {
                self.controller.preview_session(&mut self.session, out)?;
                writeln!(out, "Type `confirm` to book or `back` to keep editing.")?;
            }
            "back" => self.session.back_to_editing(),
            "confirm" => {
                self.controller.confirm_session(&mut self.session, out)?;
                self.view = ListView {
                    query: String::new(),
                    page: self.controller.last_page(),
                };
                self.show_list(out)?;
            }
            "draft" => self.controller.save_session(&self.session, out)?,
            "discard" => self.controller.draft_clear(out)?,

            "list" => self.show_list(out)?,
            "find" => return Ok(Flow::Search(rest.to_string())),
            "page" => {
                self.view.page = rest.parse().with_context(|| format!("not a page number: `{}`", rest))?;
                self.show_list(out)?;
            }
            "next" => {
                self.view.page += 1;
                self.show_list(out)?;
            }
            "prev" => {
                self.view.page = self.view.page.saturating_sub(1).max(1);
                self.show_list(out)?;
            }
            "view" => self.controller.view(parse_id(rest)?, false, out)?,
            "edit" => {
                let (id, change) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let id = parse_id(id)?;
                let (field, value) = change.trim().split_once(char::is_whitespace).unwrap_or((change.trim(), ""));

                let mut form = self.controller.state().bookings.get(id)?.to_form();
                set_field(&mut form, field, value.trim())?;
                self.controller.save_edit(id, &form, out)?;
            }
            "delete" => {
                self.controller.delete(parse_id(rest)?, out)?;
            }
            "clear" => self.controller.clear(rest == "yes", out)?,
            "export" => {
                let output = (!rest.is_empty()).then(|| rest.into());
                self.controller.export(output, out)?;
            }

            other => writeln!(out, "Unknown command `{}`. Type `help` for commands.", other)?,
        }

        Ok(Flow::Continue)
    }
}

fn parse_seats(input: &str) -> anyhow::Result<Vec<SeatLabel>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().with_context(|| format!("not a seat: `{}`", s)))
        .collect()
}

fn parse_id(input: &str) -> anyhow::Result<BookingId> {
    input.parse().with_context(|| format!("not a booking id: `{}`", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seats() {
        let seats = parse_seats("2c, 2D 3a").unwrap();
        let labels: Vec<&str> = seats.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["2C", "2D", "3A"]);
        assert!(parse_seats("2C Q").is_err());
        assert!(parse_seats("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("1700000000000").unwrap(), BookingId(1_700_000_000_000));
        assert!(parse_id("abc").is_err());
    }
}
